use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::images::dtos::{ImageUrlDto, UploadImagesDto};
use crate::features::images::services::ImageUploadService;
use crate::shared::types::ApiResponse;

/// Upload a batch of images
///
/// Accepts 1 to 10 base64-encoded images. Either every image is stored and
/// its public URL returned, or none is kept and the request fails.
#[utoipa::path(
    post,
    path = "/api/images/upload",
    tag = "images",
    request_body = UploadImagesDto,
    responses(
        (status = 200, description = "All images uploaded", body = ApiResponse<Vec<ImageUrlDto>>),
        (status = 400, description = "Malformed request body", body = ApiResponse<Vec<ImageUrlDto>>),
        (status = 500, description = "Batch rejected or rolled back", body = ApiResponse<Vec<ImageUrlDto>>)
    )
)]
pub async fn upload_images(
    State(service): State<Arc<ImageUploadService>>,
    AppJson(dto): AppJson<UploadImagesDto>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<ImageUrlDto>>>)> {
    info!("Received image batch of {} images", dto.images.len());

    let result = service.run_batch(dto.images).await;

    let status = if result.is_success() {
        StatusCode::OK
    } else {
        match &result.cause {
            Some(cause) if cause.is_validation() => warn!("Batch rejected: {}", cause),
            Some(cause) => error!("Batch upload failed: {}", cause),
            None => error!("Batch upload failed"),
        }
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((status, Json(result.into())))
}

#[cfg(test)]
mod tests {
    use crate::features::images::routes::routes;
    use crate::features::images::services::ImageUploadService;
    use crate::shared::constants::{FAIL_MESSAGE, SUCCESS_MESSAGE};
    use crate::shared::test_helpers::{InMemoryStorage, TEST_BUCKET, TEST_HOST};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use base64::prelude::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    const BODY_LIMIT: usize = 1024 * 1024;

    fn server(storage: Arc<InMemoryStorage>) -> TestServer {
        let service = Arc::new(ImageUploadService::new(storage, 50));
        TestServer::new(routes(service, BODY_LIMIT)).unwrap()
    }

    fn fail_body() -> Value {
        json!({
            "result": "FAIL",
            "data": null,
            "message": FAIL_MESSAGE,
            "errorCode": "INTERNAL_SERVER_ERROR"
        })
    }

    #[tokio::test]
    async fn test_upload_images_success_envelope() {
        let storage = Arc::new(InMemoryStorage::new());
        let server = server(storage.clone());

        let response = server
            .post("/api/images/upload")
            .json(&json!({
                "images": [
                    { "imageData": BASE64_STANDARD.encode(b"one"), "location": "posts/9" },
                    { "imageData": BASE64_STANDARD.encode(b"two"), "location": null }
                ]
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["result"], "SUCCESS");
        assert_eq!(body["message"], SUCCESS_MESSAGE);
        assert!(body["errorCode"].is_null());

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        let prefix = format!("{}/{}/", TEST_HOST, TEST_BUCKET);
        assert!(data
            .iter()
            .all(|d| d["imageUrl"].as_str().unwrap().starts_with(&prefix)));
        assert_eq!(storage.stored_keys().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_images_missing_images_fails() {
        let storage = Arc::new(InMemoryStorage::new());
        let server = server(storage.clone());

        let response = server.post("/api/images/upload").json(&json!({})).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&fail_body());
        assert_eq!(storage.put_calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_images_partial_failure_rolls_back() {
        let storage = Arc::new(InMemoryStorage::new().fail_on_body(b"bad"));
        let server = server(storage.clone());

        let response = server
            .post("/api/images/upload")
            .json(&json!({
                "images": [
                    { "imageData": BASE64_STANDARD.encode(b"good"), "location": null },
                    { "imageData": BASE64_STANDARD.encode(b"bad"), "location": null }
                ]
            }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&fail_body());
        assert_eq!(storage.delete_calls().len(), 1);
        assert!(storage.stored_keys().is_empty());
    }

    #[tokio::test]
    async fn test_upload_images_oversized_batch_fails_before_upload() {
        let storage = Arc::new(InMemoryStorage::new());
        let server = server(storage.clone());
        let images: Vec<Value> = (0..11)
            .map(|i| json!({ "imageData": BASE64_STANDARD.encode([i as u8]) }))
            .collect();

        let response = server
            .post("/api/images/upload")
            .json(&json!({ "images": images }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&fail_body());
        assert_eq!(storage.put_calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_images_malformed_json_uses_fail_envelope() {
        let server = server(Arc::new(InMemoryStorage::new()));

        let response = server
            .post("/api/images/upload")
            .text("{ not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&fail_body());
    }
}
