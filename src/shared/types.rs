use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::FAIL_MESSAGE;

/// Outcome flag of the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Success,
    Fail,
}

/// Machine-readable error code carried by failed responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InternalServerError,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub result: ResultStatus,
    pub data: Option<T>,
    pub message: String,
    pub error_code: Option<ErrorCode>,
}

impl<T> ApiResponse<T> {
    /// The single failure shape shared by every error cause
    pub fn fail() -> ApiResponse<()> {
        ApiResponse {
            result: ResultStatus::Fail,
            data: None,
            message: FAIL_MESSAGE.to_string(),
            error_code: Some(ErrorCode::InternalServerError),
        }
    }
}
