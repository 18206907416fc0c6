// src/state.rs
use tokio::sync::{Mutex, RwLock};

use crate::db::Database;
use crate::indicators::{IndicatorEngine, RandomIndicatorEngine};
use crate::price_feed::QuoteFetcher;
use crate::types::{EconomicNews, MarketData, SignalHistory, TradingHours};

pub const HISTORY_CAPACITY: usize = 10;

/// Everything the handlers and the refresh loop share. Passed around as
/// `web::Data<AppState>`, never as ambient globals. Market and news state are
/// replaced wholesale under their write locks so readers always see a
/// consistent snapshot.
pub struct AppState {
    pub market: RwLock<MarketData>,
    pub news: RwLock<EconomicNews>,
    pub trading_hours: RwLock<TradingHours>,
    pub history: Mutex<SignalHistory>,
    pub engine: Box<dyn IndicatorEngine>,
    pub quotes: QuoteFetcher,
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database, quotes: QuoteFetcher) -> Self {
        Self {
            market: RwLock::new(MarketData::default()),
            news: RwLock::new(EconomicNews::default()),
            trading_hours: RwLock::new(TradingHours::default()),
            history: Mutex::new(SignalHistory::new(HISTORY_CAPACITY)),
            engine: Box::new(RandomIndicatorEngine),
            quotes,
            db,
        }
    }
}
