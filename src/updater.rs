// src/updater.rs - background market data / news refresh
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{interval, MissedTickBehavior};

use crate::analyzer::round5;
use crate::news_feed;
use crate::state::AppState;
use crate::types::MarketData;

/// Fetch the latest quote and replace MarketState in one write. Failures are
/// logged and swallowed; if no price was ever set, a synthetic placeholder is
/// substituted so downstream synthesis never sees a zero price.
pub async fn refresh_market_data(state: &AppState) {
    match state.quotes.fetch().await {
        Ok(quote) => {
            let mut market = state.market.write().await;
            *market = MarketData {
                current_price: quote.price,
                high_24h: quote.high_24h,
                low_24h: quote.low_24h,
                volume: quote.volume,
                last_update: Some(Utc::now()),
            };
            debug!("Updated market data: {:?}", *market);
        }
        Err(e) => {
            warn!("Error fetching market data: {}", e);
            let mut market = state.market.write().await;
            if market.current_price == 0.0 {
                let mut rng = StdRng::from_entropy();
                // Placeholder price, deliberately left with no last_update so
                // it reads as stale.
                market.current_price = round5(1.07 + rng.gen::<f64>() * 0.01);
            }
        }
    }
}

/// Regenerate the simulated economic calendar and replace NewsState.
pub async fn refresh_economic_news(state: &AppState) {
    let news = {
        let mut rng = StdRng::from_entropy();
        news_feed::simulate_news(Utc::now(), &mut rng)
    };
    debug!("Updated economic news, high impact: {}", news.high_impact);
    *state.news.write().await = news;
}

/// Periodic refresh task. One cycle fetches the quote then the news, awaited
/// inline so cycles can never overlap. `start` is idempotent.
pub struct DataUpdater {
    state: Arc<AppState>,
    update_interval: Duration,
    is_running: Arc<tokio::sync::Mutex<bool>>,
}

impl DataUpdater {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            update_interval: Duration::from_secs(60),
            is_running: Arc::new(tokio::sync::Mutex::new(false)),
        }
    }

    pub fn with_interval(mut self, seconds: u64) -> Self {
        self.update_interval = Duration::from_secs(seconds);
        self
    }

    pub async fn start(&self) {
        let mut is_running = self.is_running.lock().await;
        if *is_running {
            warn!("[DATA_UPDATER] Already running");
            return;
        }
        *is_running = true;
        drop(is_running);

        info!(
            "[DATA_UPDATER] Starting background refresh every {:?}",
            self.update_interval
        );

        let state = Arc::clone(&self.state);
        let running_flag = Arc::clone(&self.is_running);
        let interval_duration = self.update_interval;

        tokio::spawn(async move {
            let mut ticker = interval(interval_duration);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut cycle = 0u64;

            loop {
                {
                    let is_running = running_flag.lock().await;
                    if !*is_running {
                        info!("[DATA_UPDATER] Stopping refresh loop");
                        break;
                    }
                }

                ticker.tick().await;
                cycle += 1;

                refresh_market_data(&state).await;
                refresh_economic_news(&state).await;

                debug!("[DATA_UPDATER] Cycle #{} complete", cycle);
            }

            info!("[DATA_UPDATER] Refresh loop ended after {} cycles", cycle);
        });
    }

    pub async fn stop(&self) {
        let mut is_running = self.is_running.lock().await;
        *is_running = false;
        info!("[DATA_UPDATER] Stop requested");
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.lock().await
    }
}
