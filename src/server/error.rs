//! Mapping of request failures onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extractor::{ExtractError, FetchError};
use crate::store::DbError;

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Short description of what failed
    pub message: String,
    /// Underlying cause
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be read or lacks a usable `url`
    MalformedRequest(String),
    /// The linked page could not be fetched
    Fetch(FetchError),
    /// The article could not be extracted
    Extract(ExtractError),
    /// The record could not be stored
    Persistence(DbError),
    /// The record could not be read
    Lookup(DbError),
    /// The requested page, file or record does not exist
    NotFound(String),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::MalformedRequest(cause) => (
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
                cause.clone(),
            ),
            AppError::Fetch(e @ (FetchError::InvalidUrl { .. } | FetchError::UnsupportedScheme(_))) => {
                (StatusCode::BAD_REQUEST, "Invalid url", e.to_string())
            }
            AppError::Fetch(e) => (StatusCode::BAD_GATEWAY, "Failed to fetch link", e.to_string()),
            AppError::Extract(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to extract article",
                e.to_string(),
            ),
            AppError::Persistence(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save to database",
                e.to_string(),
            ),
            AppError::Lookup(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read from database",
                e.to_string(),
            ),
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "The requested resource wasn't found",
                what.clone(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = self.parts();
        warn!(status = status.as_u16(), %error, "{}", message);

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            message: message.to_string(),
            error,
        });
        (status, body).into_response()
    }
}

impl From<crate::Error> for AppError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::Fetch(e) => AppError::Fetch(e),
            crate::Error::Extract(e) => AppError::Extract(e),
        }
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        AppError::Persistence(e)
    }
}
