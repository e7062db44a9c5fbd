use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::images::handlers::upload_images;
use crate::features::images::services::ImageUploadService;

/// Create routes for the images feature
pub fn routes(service: Arc<ImageUploadService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/images/upload",
            // Base64 payloads are a third larger than the images themselves
            post(upload_images).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(service)
}
