use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::sync::{SaveReport, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{collection} store returned {status}: {body}")]
    Remote {
        collection: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {collection} response: {message}")]
    Decode {
        collection: &'static str,
        message: String,
    },

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A collection could not be listed; the whole fetch is aborted.
    #[error("Failed to load {collection}: {source}")]
    Fetch {
        collection: &'static str,
        source: Box<AppError>,
    },

    /// The authoritative Course write failed.
    #[error("Failed to {action} course: {source}")]
    PrimaryWrite {
        action: &'static str,
        source: Box<AppError>,
    },

    /// Create mode finished with at least one collection write failing.
    /// Nothing is rolled back.
    #[error("Course {} was only partially created: {}", .0.course_id, .0.failure_summary())]
    PartialCreate(Box<SaveReport>),

    #[error("Upload failed: {0}")]
    Upload(String),
}

impl AppError {
    /// Errors the caller can recover from by simply retrying the request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Fetch { .. } | AppError::Http(_) | AppError::Remote { .. }
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SaveReport>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retryable = self.is_retryable();
        let message = self.to_string();
        let (status, report) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, None),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, None),
            AppError::Conflict(_) => (StatusCode::CONFLICT, None),
            AppError::PartialCreate(report) => (StatusCode::BAD_GATEWAY, Some(*report)),
            AppError::Http(_)
            | AppError::Remote { .. }
            | AppError::Decode { .. }
            | AppError::Fetch { .. }
            | AppError::PrimaryWrite { .. }
            | AppError::Upload(_) => (StatusCode::BAD_GATEWAY, None),
            AppError::Database(e) => {
                error!("database error: {}", e);
                let body = Json(ErrorResponse {
                    error: StatusCode::INTERNAL_SERVER_ERROR.to_string(),
                    message: "Database error occurred".to_string(),
                    retryable: false,
                    report: None,
                });
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message,
            retryable,
            report,
        });

        (status, body).into_response()
    }
}
