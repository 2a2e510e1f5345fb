//! Receipt file storage on the local filesystem.

use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use spendtrack_core::config::storage::StorageConfig;
use spendtrack_core::error::AppError;

/// Content types accepted for receipt uploads, with their file extensions.
const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/webp", "webp"),
    ("application/pdf", "pdf"),
];

/// Stores uploaded receipt files under a configured root directory.
///
/// Files are written with a generated UUID name so uploads can never
/// collide or traverse outside the root. The database stores the
/// returned filename, relative to the root.
#[derive(Debug, Clone)]
pub struct ReceiptStore {
    /// Root directory for receipt files.
    root: PathBuf,
    /// Maximum accepted receipt size in bytes.
    max_size_bytes: u64,
}

impl ReceiptStore {
    /// Creates a new receipt store from storage configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.receipt_root),
            max_size_bytes: config.max_receipt_size_bytes,
        }
    }

    /// Creates the root directory if it does not exist.
    pub async fn ensure_root(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to create receipt directory '{}': {e}",
                self.root.display()
            ))
        })
    }

    /// Validates and persists an uploaded receipt.
    ///
    /// Returns the stored filename, relative to the receipt root.
    pub async fn save(&self, content_type: &str, data: &[u8]) -> Result<String, AppError> {
        let extension = extension_for(content_type).ok_or_else(|| {
            AppError::validation("Receipt must be a PNG, JPEG, WebP, or PDF file")
        })?;

        if data.is_empty() {
            return Err(AppError::validation("Receipt file is empty"));
        }
        if data.len() as u64 > self.max_size_bytes {
            return Err(AppError::validation(format!(
                "Receipt exceeds the maximum size of {} bytes",
                self.max_size_bytes
            )));
        }

        let filename = format!("{}.{extension}", Uuid::new_v4());
        let path = self.root.join(&filename);

        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::internal(format!("Failed to write receipt '{}': {e}", path.display()))
        })?;

        Ok(filename)
    }

    /// Resolves a stored filename back to its absolute path.
    ///
    /// Rejects names with path separators so a tampered database value
    /// cannot escape the root.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, AppError> {
        if filename.is_empty() || Path::new(filename).components().count() != 1 {
            return Err(AppError::not_found("Receipt not found"));
        }
        Ok(self.root.join(filename))
    }

    /// Deletes a stored receipt file.
    ///
    /// Removal failures are logged rather than surfaced: the caller has
    /// already committed (or aborted) the database change and a stale
    /// file must not fail the request.
    pub async fn remove(&self, filename: &str) {
        let Ok(path) = self.resolve(filename) else {
            return;
        };
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(path = %path.display(), error = %e, "Failed to remove receipt file");
        }
    }
}

/// Maps an accepted content type to its file extension.
fn extension_for(content_type: &str) -> Option<&'static str> {
    ACCEPTED_TYPES
        .iter()
        .find(|(ty, _)| *ty == content_type)
        .map(|(_, ext)| *ext)
}

/// Maps a stored filename's extension back to its content type.
pub(crate) fn content_type_for(filename: &str) -> Option<&'static str> {
    let extension = Path::new(filename).extension()?.to_str()?;
    ACCEPTED_TYPES
        .iter()
        .find(|(_, ext)| *ext == extension)
        .map(|(ty, _)| *ty)
}
