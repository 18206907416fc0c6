//! SQLite persistence for signals, signal results and market snapshots.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, info};
use rusqlite::Connection;

use crate::errors::ServiceError;
use crate::retry::RetryPolicy;

pub mod signals;
pub mod snapshots;

pub use signals::SignalStatistics;
pub use snapshots::MarketSnapshotRecord;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS signals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    direction TEXT NOT NULL,
    probability INTEGER NOT NULL,
    entry_price REAL NOT NULL,
    target_price REAL NOT NULL,
    stop_loss REAL NOT NULL,
    pips_target INTEGER NOT NULL,
    risk_reward REAL NOT NULL,
    duration INTEGER NOT NULL,
    strategies TEXT NOT NULL,
    strength_class TEXT NOT NULL,
    trading_allowed INTEGER NOT NULL DEFAULT 1,
    high_impact_news INTEGER NOT NULL DEFAULT 0,
    volume REAL
);

CREATE TABLE IF NOT EXISTS signal_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    signal_id INTEGER NOT NULL REFERENCES signals(id),
    result TEXT NOT NULL,
    pips_gained REAL,
    exit_price REAL,
    exit_time TEXT,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS market_snapshots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    symbol TEXT NOT NULL DEFAULT 'EURUSD',
    price REAL NOT NULL,
    high_24h REAL,
    low_24h REAL,
    volume REAL
);
";

/// Handle to the SQLite store. Connections are acquired per operation and
/// never held across requests.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ServiceError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn new_in_memory() -> Result<Self, ServiceError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the on-disk store with bounded retry; fall back to an ephemeral
    /// in-memory database so the service boots in degraded mode instead of
    /// failing outright.
    pub fn open_with_fallback<P: AsRef<Path>>(
        path: P,
        policy: &RetryPolicy,
    ) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        match policy.run("open database", || Database::new(path)) {
            Ok(db) => {
                info!("Database opened at {}", path.display());
                Ok(db)
            }
            Err(e) => {
                error!(
                    "Could not open database at {}: {}; falling back to in-memory store",
                    path.display(),
                    e
                );
                Database::new_in_memory()
            }
        }
    }

    /// Create the tables if they do not exist. Safe to call repeatedly.
    pub fn init_schema(&self) -> Result<(), ServiceError> {
        let conn = self.lock();
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}
