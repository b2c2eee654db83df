//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures reported by the persistence collaborator.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("record not found: id {0}")]
    NotFound(i64),
    #[error("backend: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("malformed body: {0}")]
    BadBody(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("internal: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidId(_) => (StatusCode::BAD_REQUEST, "invalid_id"),
            AppError::BadBody(_) => (StatusCode::BAD_REQUEST, "bad_body"),
            AppError::Repo(RepoError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Repo(RepoError::Backend(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
