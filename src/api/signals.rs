// src/api/signals.rs
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::json;

use crate::analyzer::analyze_signal;
use crate::errors::ServiceError;
use crate::state::AppState;
use crate::types::{Outcome, SignalResultRecord, SYMBOL};
use crate::updater::{refresh_economic_news, refresh_market_data};

#[derive(Deserialize)]
pub struct SignalsQuery {
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct ResultRequest {
    pub result: Option<String>,
    pub exit_price: Option<f64>,
    pub pips_gained: Option<f64>,
    pub exit_time: Option<String>,
    pub notes: Option<String>,
}

/// Force a refresh + synthesis cycle, persist the signal and a market
/// snapshot, and return the signal. Persistence is best effort: a database
/// failure is logged and the signal is still returned without an id.
pub async fn new_signal(state: web::Data<AppState>) -> impl Responder {
    refresh_market_data(&state).await;
    refresh_economic_news(&state).await;

    let market = state.market.read().await.clone();
    let news = state.news.read().await.clone();
    let trading_hours = state.trading_hours.read().await.clone();

    let mut rng = StdRng::from_entropy();
    let mut signal = analyze_signal(
        &market,
        &news,
        &trading_hours,
        state.engine.as_ref(),
        Utc::now(),
        &mut rng,
    );

    match state.db.save_signal(&signal) {
        Ok(id) => {
            info!("Signal saved to database with ID: {}", id);
            signal.id = Some(id);
        }
        Err(e) => error!("Error saving signal to database: {}", e),
    }

    if let Err(e) = state.db.save_market_snapshot(&market, SYMBOL) {
        error!("Error saving market snapshot: {}", e);
    }

    state.history.lock().await.push(signal.clone());

    HttpResponse::Ok().json(signal)
}

pub async fn get_signals(
    state: web::Data<AppState>,
    query: web::Query<SignalsQuery>,
) -> Result<HttpResponse, ServiceError> {
    let limit = query.limit.unwrap_or(10);
    let signals = state.db.get_signals(limit)?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "signals": signals })))
}

pub async fn get_signal(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    let id = path.into_inner();
    match state.db.get_signal_by_id(id)? {
        Some(signal) => Ok(HttpResponse::Ok().json(json!({ "success": true, "signal": signal }))),
        None => Err(ServiceError::NotFound),
    }
}

pub async fn add_signal_result(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<ResultRequest>,
) -> Result<HttpResponse, ServiceError> {
    let signal_id = path.into_inner();

    let result = body
        .result
        .as_deref()
        .ok_or_else(|| ServiceError::Validation("Missing required field: result".to_string()))?;
    let exit_price = body.exit_price.ok_or_else(|| {
        ServiceError::Validation("Missing required field: exit_price".to_string())
    })?;
    let outcome = Outcome::parse(result)
        .ok_or_else(|| ServiceError::Validation(format!("Invalid result value: {}", result)))?;

    let exit_time = body
        .exit_time
        .clone()
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d %H:%M:%S").to_string());

    let record = SignalResultRecord {
        id: None,
        signal_id,
        result: outcome,
        pips_gained: body.pips_gained,
        exit_price: Some(exit_price),
        exit_time: Some(exit_time),
        notes: body.notes.clone(),
    };

    let result_id = state.db.save_signal_result(&record)?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "result_id": result_id })))
}
