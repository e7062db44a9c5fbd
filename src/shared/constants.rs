/// Maximum number of images accepted in one batch
pub const MAX_IMAGES_PER_BATCH: usize = 10;

/// Key prefix used when an image carries no location
pub const DEFAULT_IMAGE_PREFIX: &str = "images";

/// Extension appended to every generated object key
pub const IMAGE_EXTENSION: &str = "jpg";

/// Content type sent with every uploaded object
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

// =============================================================================
// RESPONSE MESSAGES
// =============================================================================

pub const SUCCESS_MESSAGE: &str = "Images uploaded successfully.";

pub const FAIL_MESSAGE: &str = "Images were not uploaded.";
