//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Fixed body message for absent records.
pub const NOT_FOUND_MESSAGE: &str = "Player not found";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// First violated field rule of a player payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, rule: impl std::fmt::Display) -> Self {
        ValidationError {
            field: field.to_string(),
            message: format!("\"{}\" {}", field, rule),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
    #[error("store unavailable")]
    Unavailable,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    BadRequest(String),
    #[error("Player not found")]
    NotFound,
    /// Store failure reported to the client with its cause (create, update).
    #[error(transparent)]
    Rejected(StoreError),
    /// Store failure hidden behind a fixed per-operation message.
    #[error("{context}")]
    Failed {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Maps a store failure to a 500 carrying only `context`.
    pub fn failed(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Failed { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, json!({ "message": NOT_FOUND_MESSAGE })),
            AppError::Rejected(e) => {
                tracing::warn!(error = %e, "store rejected write");
                (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() }))
            }
            AppError::Failed { context, source } => {
                tracing::error!(error = %source, "{}", context);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": context }))
            }
        };
        (status, Json(body)).into_response()
    }
}
