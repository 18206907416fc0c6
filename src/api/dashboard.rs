// src/api/dashboard.rs
use std::collections::BTreeMap;

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use log::error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::analyzer::analyze_signal;
use crate::db::SignalStatistics;
use crate::indicators::indicator_catalog;
use crate::state::AppState;
use crate::types::{EconomicNews, MarketData, Signal, TradingHours};
use crate::updater::{refresh_economic_news, refresh_market_data};

#[derive(Serialize)]
pub struct DashboardResponse {
    pub signal: Signal,
    pub history: Vec<Signal>,
    pub indicators: BTreeMap<String, String>,
    pub market_data: MarketData,
    pub news: EconomicNews,
    pub trading_hours: TradingHours,
    pub stats: SignalStatistics,
}

/// Full dashboard snapshot: a freshly synthesized signal, the last-10
/// history, the indicator catalog, market/news/settings state and aggregate
/// stats.
pub async fn index(state: web::Data<AppState>) -> impl Responder {
    // Prime market/news on a cold start so the synthesizer has real inputs.
    if state.market.read().await.last_update.is_none() {
        refresh_market_data(&state).await;
    }
    if state.news.read().await.last_update.is_none() {
        refresh_economic_news(&state).await;
    }

    let market = state.market.read().await.clone();
    let news = state.news.read().await.clone();
    let trading_hours = state.trading_hours.read().await.clone();

    let mut rng = StdRng::from_entropy();
    let signal = analyze_signal(
        &market,
        &news,
        &trading_hours,
        state.engine.as_ref(),
        Utc::now(),
        &mut rng,
    );

    let history = {
        let mut history = state.history.lock().await;
        history.push(signal.clone());
        history.snapshot()
    };

    let stats = state.db.get_signal_statistics().unwrap_or_else(|e| {
        error!("Error getting signal statistics: {}", e);
        SignalStatistics::default()
    });

    HttpResponse::Ok().json(DashboardResponse {
        signal,
        history,
        indicators: indicator_catalog(),
        market_data: market,
        news,
        trading_hours,
        stats,
    })
}

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK, signal dashboard is running")
}
