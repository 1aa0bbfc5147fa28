use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blog_content::ContentError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn content_status(err: &ContentError) -> (StatusCode, String) {
    if err.is_upstream() {
        return (StatusCode::BAD_GATEWAY, "content api error".to_string());
    }
    match err {
        ContentError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        _ => (StatusCode::BAD_REQUEST, err.to_string()),
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::CacheFull => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
                DomainError::Content(content) => content_status(content),
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_message();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        }

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}
