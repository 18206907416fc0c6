//! Market snapshot audit trail, written alongside each persisted signal.

use chrono::Utc;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::types::MarketData;

use super::Database;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshotRecord {
    pub id: i64,
    pub timestamp: String,
    pub symbol: String,
    pub price: f64,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub volume: Option<f64>,
}

fn snapshot_from_row(row: &Row<'_>) -> rusqlite::Result<MarketSnapshotRecord> {
    Ok(MarketSnapshotRecord {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        symbol: row.get(2)?,
        price: row.get(3)?,
        high_24h: row.get(4)?,
        low_24h: row.get(5)?,
        volume: row.get(6)?,
    })
}

impl Database {
    pub fn save_market_snapshot(
        &self,
        market: &MarketData,
        symbol: &str,
    ) -> Result<i64, ServiceError> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO market_snapshots (timestamp, symbol, price, high_24h, low_24h, volume) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                timestamp,
                symbol,
                market.current_price,
                market.high_24h,
                market.low_24h,
                market.volume,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    pub fn get_market_snapshots(
        &self,
        limit: i64,
    ) -> Result<Vec<MarketSnapshotRecord>, ServiceError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, timestamp, symbol, price, high_24h, low_24h, volume \
             FROM market_snapshots ORDER BY id DESC LIMIT ?1",
        )?;
        let snapshots = stmt
            .query_map(params![limit], snapshot_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(snapshots)
    }
}
