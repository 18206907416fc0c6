// src/lib.rs
pub mod analyzer;
pub mod api;
pub mod db;
pub mod errors;
pub mod indicators;
pub mod news_feed;
pub mod price_feed;
pub mod retry;
pub mod state;
pub mod types;
pub mod updater;
