use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// 计费计算错误 (替代原实现中静默传播的 NaN)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    #[error("pickup {pickup_id}: missing {field}")]
    MissingTimestamp {
        pickup_id: String,
        field: &'static str,
    },

    #[error("pickup {pickup_id}: {field} is not a valid date: {value:?}")]
    InvalidTimestamp {
        pickup_id: String,
        field: &'static str,
        value: String,
    },
}

impl InvoiceError {
    pub fn pickup_id(&self) -> &str {
        match self {
            InvoiceError::MissingTimestamp { pickup_id, .. }
            | InvoiceError::InvalidTimestamp { pickup_id, .. } => pickup_id,
        }
    }
}

/// HTTP 层错误
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid temporal range: {0}")]
    Invoice(#[from] InvoiceError),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let (status, error, details) = match &self {
            AppError::Invoice(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid temporal range".to_string(),
                Some(err.to_string()),
            ),
            AppError::Csv(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CSV export failed".to_string(),
                Some(err.to_string()),
            ),
            AppError::Config(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
                Some(err.to_string()),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(msg.clone()),
            ),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
