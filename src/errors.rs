// src/errors.rs
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Upstream fetch error: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data parsing error: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),

    #[error("Signal not found")]
    NotFound,
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::NotFound => HttpResponse::NotFound()
                .json(json!({ "success": false, "error": self.to_string() })),
            ServiceError::Validation(msg) => {
                HttpResponse::BadRequest().json(json!({ "success": false, "error": msg }))
            }
            ServiceError::Upstream(e) => {
                log::error!("Upstream fetch error: {}", e);
                HttpResponse::InternalServerError()
                    .json(json!({ "success": false, "error": "Error fetching market data" }))
            }
            ServiceError::Database(e) => {
                log::error!("Database error: {}", e);
                HttpResponse::InternalServerError()
                    .json(json!({ "success": false, "error": "Database operation failed" }))
            }
            ServiceError::Json(e) => {
                log::error!("Serialization error: {}", e);
                HttpResponse::InternalServerError()
                    .json(json!({ "success": false, "error": "Error processing data" }))
            }
            ServiceError::Parse(msg) => {
                log::error!("Data parsing error: {}", msg);
                HttpResponse::InternalServerError()
                    .json(json!({ "success": false, "error": "Error processing data" }))
            }
        }
    }
}
