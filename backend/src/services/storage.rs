//! File storage service for order receipts and product images
//!
//! Blobs live on the local filesystem under directories taken from the
//! `storage` configuration section. Workflows write the blob before touching
//! the database, so a committed row never points at a file that failed to
//! write; stale blobs left behind by replacements are deleted best-effort.

use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

/// An uploaded file taken from a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as submitted by the client (used for its extension)
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Local-filesystem blob store
#[derive(Clone, Debug)]
pub struct FileStorage {
    receipts_dir: PathBuf,
    images_dir: PathBuf,
}

impl FileStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            receipts_dir: PathBuf::from(&config.receipts_dir),
            images_dir: PathBuf::from(&config.product_images_dir),
        }
    }

    /// Persist an order receipt blob
    pub async fn save_receipt(&self, filename: &str, bytes: &[u8]) -> AppResult<()> {
        save(&self.receipts_dir, filename, bytes).await
    }

    /// Delete a previously stored receipt; failures are logged, not surfaced
    pub async fn delete_receipt(&self, filename: &str) {
        delete(&self.receipts_dir, filename).await;
    }

    /// Persist a product image blob
    pub async fn save_product_image(&self, filename: &str, bytes: &[u8]) -> AppResult<()> {
        save(&self.images_dir, filename, bytes).await
    }

    /// Delete a previously stored product image; failures are logged
    pub async fn delete_product_image(&self, filename: &str) {
        delete(&self.images_dir, filename).await;
    }
}

async fn save(dir: &Path, filename: &str, bytes: &[u8]) -> AppResult<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::StorageError(format!("failed to create {}: {}", dir.display(), e)))?;

    let path = dir.join(filename);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::StorageError(format!("failed to write {}: {}", path.display(), e)))
}

async fn delete(dir: &Path, filename: &str) {
    let path = dir.join(filename);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!("Failed to delete stale file {}: {}", path.display(), e);
    }
}

/// Receipt filename: order reference number plus current time, keeping the
/// uploaded file's extension
pub fn receipt_filename(reference_number: &str, original_filename: &str) -> String {
    format!(
        "{}_{}{}",
        reference_number,
        chrono::Utc::now().timestamp_millis(),
        extension_of(original_filename)
    )
}

/// Product image filename: sanitized variant plus current time
pub fn image_filename(variant: &str, original_filename: &str) -> String {
    format!(
        "{}_{}{}",
        shared::validation::sanitize_variant(variant),
        chrono::Utc::now().timestamp_millis(),
        extension_of(original_filename)
    )
}

fn extension_of(filename: &str) -> String {
    match Path::new(filename).extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_filename_keeps_reference_and_extension() {
        let name = receipt_filename("1234567890123", "scan.png");
        assert!(name.starts_with("1234567890123_"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn image_filename_sanitizes_variant() {
        let name = image_filename("250g (ground)", "photo.jpeg");
        assert!(name.starts_with("250gground_"));
        assert!(name.ends_with(".jpeg"));
    }

    #[test]
    fn missing_extension_is_tolerated() {
        let name = receipt_filename("1234567890123", "receipt");
        assert!(!name.contains('.'));
    }
}
