// src/api/market.rs
use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;
use crate::updater::{refresh_economic_news, refresh_market_data};

pub async fn market_data(state: web::Data<AppState>) -> impl Responder {
    refresh_market_data(&state).await;
    let market = state.market.read().await.clone();
    HttpResponse::Ok().json(market)
}

pub async fn economic_news(state: web::Data<AppState>) -> impl Responder {
    refresh_economic_news(&state).await;
    let news = state.news.read().await.clone();
    HttpResponse::Ok().json(news)
}
