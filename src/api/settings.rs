// src/api/settings.rs
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Value};

use crate::state::AppState;

fn rejected(error: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": false, "error": error }))
}

/// Merge provided trading-hours fields into the current settings. Fields not
/// present in the body keep their current values. The whole
/// read-validate-merge-store sequence runs under one write guard so
/// concurrent merges cannot drop each other's fields; rejected input commits
/// nothing.
pub async fn update_settings(state: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    let mut hours = state.trading_hours.write().await;
    let mut updated = hours.clone();

    if let Some(update) = body.get("trading_hours") {
        if !update.is_object() {
            return rejected("trading_hours must be an object");
        }

        if let Some(enabled) = update.get("enabled") {
            match enabled.as_bool() {
                Some(value) => updated.enabled = value,
                None => return rejected("enabled must be a boolean"),
            }
        }
        if let Some(start) = update.get("start") {
            match start.as_u64() {
                Some(value) if value < 24 => updated.start = value as u32,
                _ => return rejected("start must be an hour in [0,24)"),
            }
        }
        if let Some(end) = update.get("end") {
            match end.as_u64() {
                Some(value) if value <= 24 => updated.end = value as u32,
                _ => return rejected("end must be an hour in [0,24]"),
            }
        }
    }

    *hours = updated.clone();
    drop(hours);

    HttpResponse::Ok().json(json!({
        "success": true,
        "settings": { "trading_hours": updated }
    }))
}
