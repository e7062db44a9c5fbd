use uuid::Uuid;

use crate::shared::constants::{DEFAULT_IMAGE_PREFIX, IMAGE_EXTENSION};

/// Build a unique object key: `{prefix}/{uuid}.jpg`, or `images/{uuid}.jpg`
/// when no prefix is given.
///
/// Uniqueness comes from a random v4 UUID alone, so concurrent callers need
/// no coordination.
pub fn generate_key(prefix: Option<&str>) -> String {
    // Trailing slashes are dropped on purpose: "posts/" yields "posts/<id>.jpg"
    // rather than "posts//<id>.jpg", and "/" falls back to the default prefix.
    let prefix = prefix
        .map(|p| p.trim_end_matches('/'))
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_IMAGE_PREFIX);

    format!("{}/{}.{}", prefix, Uuid::new_v4(), IMAGE_EXTENSION)
}
