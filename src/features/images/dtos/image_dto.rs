use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::images::models::{BatchResult, BatchStatus};
use crate::shared::types::{ApiResponse, ResultStatus};

/// One image of a batch
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    /// Base64-encoded image bytes
    pub image_data: String,
    /// Key prefix for the stored object; defaults to "images"
    #[schema(example = "posts/42")]
    pub location: Option<String>,
}

/// Batch upload request body
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UploadImagesDto {
    /// Images to upload (1 to 10)
    #[serde(default)]
    pub images: Vec<ImageRequest>,
}

/// Public URL of an uploaded image
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlDto {
    pub image_url: String,
}

impl From<BatchResult> for ApiResponse<Vec<ImageUrlDto>> {
    fn from(batch: BatchResult) -> Self {
        let (result, data) = match batch.status {
            BatchStatus::Success => {
                let urls = batch
                    .urls
                    .into_iter()
                    .map(|image_url| ImageUrlDto { image_url })
                    .collect();
                (ResultStatus::Success, Some(urls))
            }
            BatchStatus::Fail => (ResultStatus::Fail, None),
        };

        ApiResponse {
            result,
            data,
            message: batch.message,
            error_code: batch.error_code,
        }
    }
}
