// src/api/mod.rs
pub mod dashboard;
pub mod market;
pub mod settings;
pub mod signals;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard::index))
        .route("/health", web::get().to(dashboard::health_check))
        .route("/api/new-signal", web::get().to(signals::new_signal))
        .route("/api/market-data", web::get().to(market::market_data))
        .route("/api/economic-news", web::get().to(market::economic_news))
        .route("/api/settings", web::post().to(settings::update_settings))
        .route("/api/signals", web::get().to(signals::get_signals))
        .route("/api/signal/{id}", web::get().to(signals::get_signal))
        .route(
            "/api/signal/{id}/result",
            web::post().to(signals::add_signal_result),
        );
}
