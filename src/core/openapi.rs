use utoipa::{Modify, OpenApi};

use crate::features::images::{dtos as images_dtos, handlers as images_handlers};
use crate::shared::types::{ApiResponse, ErrorCode, ResultStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Images
        images_handlers::upload_images,
    ),
    components(
        schemas(
            // Shared
            ResultStatus,
            ErrorCode,
            // Images
            images_dtos::ImageRequest,
            images_dtos::UploadImagesDto,
            images_dtos::ImageUrlDto,
            ApiResponse<Vec<images_dtos::ImageUrlDto>>,
        )
    ),
    tags(
        (name = "images", description = "All-or-nothing batch image upload"),
    ),
    info(
        title = "Image Batch Upload API",
        version = "0.1.0",
        description = "All-or-nothing batch image upload to object storage",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_upload_route() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Uploads".to_string(),
            version: "9.9.9".to_string(),
            description: "test".to_string(),
        }
        .modify(&mut openapi);

        assert!(openapi.paths.paths.contains_key("/api/images/upload"));
        assert_eq!(openapi.info.title, "Uploads");
        assert_eq!(openapi.info.version, "9.9.9");
    }
}
