pub mod image_upload_service;
pub mod key_generator;
pub mod uploader;

pub use image_upload_service::ImageUploadService;
