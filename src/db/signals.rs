//! Signal and signal-result operations.

use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::analyzer::calculate_signal_strength;
use crate::errors::ServiceError;
use crate::types::{Direction, Outcome, Signal, SignalResultRecord};

use super::Database;

const SIGNAL_COLUMNS: &str = "id, timestamp, direction, probability, entry_price, target_price, \
     stop_loss, pips_target, risk_reward, duration, strategies, strength_class, \
     trading_allowed, high_impact_news, volume";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalStatistics {
    pub total_signals: i64,
    pub signals_with_results: i64,
    pub wins: i64,
    pub losses: i64,
    pub win_rate: f64,
    pub avg_pips_gained: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn signal_from_row(row: &Row<'_>) -> rusqlite::Result<Signal> {
    let strategies_json: String = row.get(10)?;
    let strategies: BTreeMap<String, u8> = serde_json::from_str(&strategies_json)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(10, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let direction: String = row.get(2)?;
    let probability: i64 = row.get(3)?;
    let entry_price: f64 = row.get(4)?;
    let (_, strength_color) = calculate_signal_strength(probability);

    Ok(Signal {
        id: Some(row.get(0)?),
        timestamp: row.get(1)?,
        direction: Direction::from_str(&direction),
        probability,
        entry_price,
        target_price: row.get(5)?,
        stop_loss: row.get(6)?,
        pips_target: row.get(7)?,
        risk_reward: row.get(8)?,
        duration: row.get(9)?,
        strategies,
        strength_class: row.get(11)?,
        trading_allowed: row.get(12)?,
        has_high_impact_news: row.get(13)?,
        volume: row.get::<_, Option<f64>>(14)?.unwrap_or(0.0),
        strength_color: strength_color.to_string(),
        // Display-only fields not persisted with the signal row.
        current_price: entry_price,
        high_24h: 0.0,
        low_24h: 0.0,
    })
}

impl Database {
    /// Insert one signal in a single transaction and return its row id.
    pub fn save_signal(&self, signal: &Signal) -> Result<i64, ServiceError> {
        let strategies = serde_json::to_string(&signal.strategies)?;
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO signals (timestamp, direction, probability, entry_price, target_price, \
             stop_loss, pips_target, risk_reward, duration, strategies, strength_class, \
             trading_allowed, high_impact_news, volume) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                signal.timestamp,
                signal.direction.as_str(),
                signal.probability,
                signal.entry_price,
                signal.target_price,
                signal.stop_loss,
                signal.pips_target,
                signal.risk_reward,
                signal.duration,
                strategies,
                signal.strength_class,
                signal.trading_allowed,
                signal.has_high_impact_news,
                signal.volume,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    /// Most recent signals, newest first.
    pub fn get_signals(&self, limit: i64) -> Result<Vec<Signal>, ServiceError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM signals ORDER BY id DESC LIMIT ?1",
            SIGNAL_COLUMNS
        ))?;
        let signals = stmt
            .query_map(params![limit], signal_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(signals)
    }

    pub fn get_signal_by_id(&self, id: i64) -> Result<Option<Signal>, ServiceError> {
        let conn = self.lock();
        let signal = conn
            .query_row(
                &format!("SELECT {} FROM signals WHERE id = ?1", SIGNAL_COLUMNS),
                params![id],
                signal_from_row,
            )
            .optional()?;
        Ok(signal)
    }

    /// Record the outcome of a signal. A signal can have at most one result;
    /// the check lives here rather than in a uniqueness constraint.
    pub fn save_signal_result(&self, record: &SignalResultRecord) -> Result<i64, ServiceError> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let signal_exists: i64 = tx.query_row(
            "SELECT COUNT(*) FROM signals WHERE id = ?1",
            params![record.signal_id],
            |row| row.get(0),
        )?;
        if signal_exists == 0 {
            return Err(ServiceError::NotFound);
        }

        let existing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM signal_results WHERE signal_id = ?1",
            params![record.signal_id],
            |row| row.get(0),
        )?;
        if existing > 0 {
            return Err(ServiceError::Validation(format!(
                "Result already recorded for signal {}",
                record.signal_id
            )));
        }

        tx.execute(
            "INSERT INTO signal_results (signal_id, result, pips_gained, exit_price, exit_time, notes) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.signal_id,
                record.result.as_str(),
                record.pips_gained,
                record.exit_price,
                record.exit_time,
                record.notes,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    /// Aggregate performance stats. All-zero on an empty store.
    pub fn get_signal_statistics(&self) -> Result<SignalStatistics, ServiceError> {
        let conn = self.lock();

        let total_signals: i64 =
            conn.query_row("SELECT COUNT(*) FROM signals", [], |row| row.get(0))?;
        let signals_with_results: i64 =
            conn.query_row("SELECT COUNT(*) FROM signal_results", [], |row| row.get(0))?;
        let wins: i64 = conn.query_row(
            "SELECT COUNT(*) FROM signal_results WHERE result = ?1",
            params![Outcome::Win.as_str()],
            |row| row.get(0),
        )?;
        let losses: i64 = conn.query_row(
            "SELECT COUNT(*) FROM signal_results WHERE result = ?1",
            params![Outcome::Loss.as_str()],
            |row| row.get(0),
        )?;
        let avg_pips: Option<f64> = conn.query_row(
            "SELECT AVG(pips_gained) FROM signal_results",
            [],
            |row| row.get(0),
        )?;

        let win_rate = if signals_with_results > 0 {
            round2(wins as f64 / signals_with_results as f64 * 100.0)
        } else {
            0.0
        };

        Ok(SignalStatistics {
            total_signals,
            signals_with_results,
            wins,
            losses,
            win_rate,
            avg_pips_gained: round2(avg_pips.unwrap_or(0.0)),
        })
    }
}
