// src/main.rs
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

use signal_dashboard::api;
use signal_dashboard::db::Database;
use signal_dashboard::price_feed::QuoteFetcher;
use signal_dashboard::retry::RetryPolicy;
use signal_dashboard::state::AppState;
use signal_dashboard::updater::{refresh_economic_news, refresh_market_data, DataUpdater};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("signal_dashboard=debug,info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let db_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "signals.db".to_string());

    let db = Database::open_with_fallback(&db_path, &RetryPolicy::default())
        .expect("Failed to open database");
    db.init_schema().expect("Failed to initialize database schema");
    log::info!("Database initialized successfully");

    let state = web::Data::new(AppState::new(db, QuoteFetcher::from_env()));

    // Prime market data and news before accepting requests.
    refresh_market_data(&state).await;
    refresh_economic_news(&state).await;

    let updater = DataUpdater::new(state.clone().into_inner());
    updater.start().await;

    log::info!("Starting server on http://{}:{}", host, port);
    println!("Available endpoints:");
    println!("  GET  http://{}:{}/", host, port);
    println!("  GET  http://{}:{}/health", host, port);
    println!("  GET  http://{}:{}/api/new-signal", host, port);
    println!("  GET  http://{}:{}/api/market-data", host, port);
    println!("  GET  http://{}:{}/api/economic-news", host, port);
    println!("  POST http://{}:{}/api/settings", host, port);
    println!("  GET  http://{}:{}/api/signals", host, port);
    println!("  GET  http://{}:{}/api/signal/{{id}}", host, port);
    println!("  POST http://{}:{}/api/signal/{{id}}/result", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);
        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            .configure(api::configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
