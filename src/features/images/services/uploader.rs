use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::prelude::*;
use tracing::{debug, warn};

use crate::features::images::dtos::ImageRequest;
use crate::features::images::models::{BatchError, UploadOutcome};
use crate::features::images::services::key_generator::generate_key;
use crate::modules::storage::{ObjectStorage, Visibility};

/// Upload a single image and fold every error into [`UploadOutcome::Failure`].
///
/// Never returns an error, so one broken image cannot abort the other
/// uploads of its batch.
pub async fn upload_one(item: &ImageRequest, storage: &dyn ObjectStorage) -> UploadOutcome {
    let bytes = match decode_image(&item.image_data) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Skipping image with invalid payload: {}", e);
            return UploadOutcome::failure(e);
        }
    };

    let key = generate_key(item.location.as_deref());

    match storage.put(&key, bytes, Visibility::PublicRead).await {
        Ok(stored) => {
            debug!("Image stored at '{}'", stored.key);
            UploadOutcome::Success {
                url: stored.url,
                key: stored.key,
            }
        }
        Err(e) => {
            warn!("Image upload to '{}' failed: {}", key, e);
            UploadOutcome::failure(BatchError::Upload(e.to_string()))
        }
    }
}

/// Standard alphabet that tolerates non-zero trailing bits, e.g. `QR==`
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Standard padded base64; ASCII whitespace (line wrapping) is ignored.
fn decode_image(image_data: &str) -> Result<Vec<u8>, BatchError> {
    let compact: Vec<u8> = image_data
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    LENIENT_BASE64
        .decode(compact)
        .map_err(|e| BatchError::Decode(e.to_string()))
}
