use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::features::images::dtos::ImageRequest;
use crate::features::images::models::{BatchError, BatchResult, UploadOutcome};
use crate::features::images::services::uploader::upload_one;
use crate::modules::storage::ObjectStorage;
use crate::shared::constants::MAX_IMAGES_PER_BATCH;

/// All-or-nothing batch uploader.
///
/// Either every image of a batch is stored, or the images that did get
/// stored are deleted again and the batch is reported as failed.
pub struct ImageUploadService {
    storage: Arc<dyn ObjectStorage>,
    concurrency_limit: usize,
}

impl ImageUploadService {
    pub fn new(storage: Arc<dyn ObjectStorage>, concurrency_limit: usize) -> Self {
        Self {
            storage,
            concurrency_limit: concurrency_limit.max(1),
        }
    }

    /// Reject empty and oversized batches before anything is uploaded
    pub fn validate(items: &[ImageRequest]) -> Result<(), BatchError> {
        if items.is_empty() {
            return Err(BatchError::Empty);
        }
        if items.len() > MAX_IMAGES_PER_BATCH {
            return Err(BatchError::TooMany(items.len()));
        }
        Ok(())
    }

    /// Upload a batch of images
    ///
    /// # Arguments
    /// * `items` - The images to upload, 1 to `MAX_IMAGES_PER_BATCH`
    ///
    /// # Returns
    /// A successful result with one URL per image, or a failed result after
    /// the images that were stored have been rolled back
    pub async fn run_batch(&self, items: Vec<ImageRequest>) -> BatchResult {
        if let Err(e) = Self::validate(&items) {
            warn!("Rejected image batch: {}", e);
            return BatchResult::failure(e);
        }

        info!(
            "Uploading batch of {} images (concurrency limit {})",
            items.len(),
            self.concurrency_limit
        );

        // Waits for every upload, so the rollback sees the full success set
        let outcomes: Vec<UploadOutcome> = stream::iter(items)
            .map(|item| {
                let storage = Arc::clone(&self.storage);
                async move { upload_one(&item, storage.as_ref()).await }
            })
            .buffer_unordered(self.concurrency_limit)
            .collect()
            .await;

        self.settle(outcomes).await
    }

    /// Commit or roll back once every outcome is in
    async fn settle(&self, outcomes: Vec<UploadOutcome>) -> BatchResult {
        let total = outcomes.len();
        let failed = outcomes.iter().filter(|o| !o.is_success()).count();

        if failed == 0 {
            let urls: Vec<String> = outcomes
                .into_iter()
                .filter_map(|outcome| match outcome {
                    UploadOutcome::Success { url, .. } => Some(url),
                    UploadOutcome::Failure { .. } => None,
                })
                .collect();

            info!("Uploaded all {} images", urls.len());
            return BatchResult::success(urls);
        }

        let keys_to_delete: Vec<String> = outcomes
            .iter()
            .filter_map(UploadOutcome::key)
            .map(str::to_string)
            .collect();

        if !keys_to_delete.is_empty() {
            info!(
                "Rolling back {} uploaded images: {:?}",
                keys_to_delete.len(),
                keys_to_delete
            );

            // Best effort: a failed cleanup must not replace the upload failure
            if let Err(e) = self.storage.delete_many(&keys_to_delete).await {
                error!("{}", BatchError::Compensation(e.to_string()));
            }
        }

        BatchResult::failure(BatchError::ItemsFailed { failed, total })
    }
}
