use thiserror::Error;

use crate::shared::constants::{FAIL_MESSAGE, SUCCESS_MESSAGE};
use crate::shared::types::ErrorCode;

/// Why an image or a whole batch did not upload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("no images to upload")]
    Empty,

    #[error("too many images: {0}")]
    TooMany(usize),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("upload error: {0}")]
    Upload(String),

    #[error("{failed} of {total} images failed to upload")]
    ItemsFailed { failed: usize, total: usize },

    #[error("rollback error: {0}")]
    Compensation(String),
}

impl BatchError {
    /// Rejected before any upload was dispatched
    pub fn is_validation(&self) -> bool {
        matches!(self, BatchError::Empty | BatchError::TooMany(_))
    }
}

/// Result of uploading one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { url: String, key: String },
    Failure { reason: String },
}

impl UploadOutcome {
    pub fn failure(error: BatchError) -> Self {
        UploadOutcome::Failure {
            reason: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }

    /// Key of the stored object, present only on success
    pub fn key(&self) -> Option<&str> {
        match self {
            UploadOutcome::Success { key, .. } => Some(key),
            UploadOutcome::Failure { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Success,
    Fail,
}

/// Observable outcome of a whole batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub status: BatchStatus,
    /// Public URLs in completion order; empty unless the batch succeeded
    pub urls: Vec<String>,
    pub message: String,
    pub error_code: Option<ErrorCode>,
    /// Underlying cause of a failed batch. Logged, never sent to the caller.
    pub cause: Option<BatchError>,
}

impl BatchResult {
    pub fn success(urls: Vec<String>) -> Self {
        Self {
            status: BatchStatus::Success,
            urls,
            message: SUCCESS_MESSAGE.to_string(),
            error_code: None,
            cause: None,
        }
    }

    pub fn failure(cause: BatchError) -> Self {
        Self {
            status: BatchStatus::Fail,
            urls: Vec::new(),
            message: FAIL_MESSAGE.to_string(),
            error_code: Some(ErrorCode::InternalServerError),
            cause: Some(cause),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == BatchStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_outcome_carries_reason() {
        let outcome = UploadOutcome::failure(BatchError::Decode("Invalid padding".to_string()));

        assert_eq!(
            outcome,
            UploadOutcome::Failure {
                reason: "decode error: Invalid padding".to_string()
            }
        );
        assert_eq!(outcome.key(), None);
    }

    #[test]
    fn test_failed_batch_uses_generic_shape() {
        let empty = BatchResult::failure(BatchError::Empty);
        let partial = BatchResult::failure(BatchError::ItemsFailed {
            failed: 1,
            total: 3,
        });

        assert_eq!(empty.message, partial.message);
        assert_eq!(empty.error_code, Some(ErrorCode::InternalServerError));
        assert!(empty.urls.is_empty());
        assert!(empty.cause.as_ref().is_some_and(BatchError::is_validation));
        assert!(!partial.cause.as_ref().is_some_and(BatchError::is_validation));
    }
}
