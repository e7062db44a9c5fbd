use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    /// Every failure collapses into the same FAIL envelope; the cause is
    /// only written to the log.
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(ref msg) => {
                tracing::warn!("Rejected request: {}", msg);
                StatusCode::BAD_REQUEST
            }
        };

        (status, Json(ApiResponse::<()>::fail())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
