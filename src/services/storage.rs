//! Blob store for uploaded images, backed by local disk.
//!
//! DESIGN
//! ======
//! Blobs live under `{root}/{user_id}/{uuid}.{ext}` and are served
//! read-only at `{public_base}/uploads/...`. Validation (size cap, image
//! allow-list) runs before anything touches disk. Deletion is best-effort:
//! callers log failures and move on.
//!
//! ERROR HANDLING
//! ==============
//! Public URLs are mapped back to relative paths before deletion; URLs
//! outside our public base, containing traversal components, or keyed
//! under another user's directory are refused, so a stored content field
//! can never delete outside the caller's own corner of the upload root.

use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

/// Upload size cap: 5 MB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file too large: {size} bytes (limit {MAX_UPLOAD_BYTES})")]
    TooLarge { size: usize },
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),
    #[error("url is not a managed blob: {0}")]
    ForeignUrl(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// File extension for an allow-listed image content type.
#[must_use]
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// Validate an upload before any store call.
///
/// # Errors
///
/// `TooLarge` over the 5 MB cap, `UnsupportedType` outside the image
/// allow-list.
pub fn validate_upload(content_type: &str, size: usize) -> Result<&'static str, StorageError> {
    let ext = extension_for(content_type)
        .ok_or_else(|| StorageError::UnsupportedType(content_type.to_owned()))?;
    if size > MAX_UPLOAD_BYTES {
        return Err(StorageError::TooLarge { size });
    }
    Ok(ext)
}

/// Disk-backed blob store handle. Cheap to clone; shared via `AppState`.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
    public_base: String,
}

impl Storage {
    /// Create a store rooted at `root`, issuing URLs under `public_base`
    /// (e.g. `http://localhost:3000`).
    #[must_use]
    pub fn new(root: PathBuf, public_base: &str) -> Self {
        Self { root, public_base: public_base.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a collision-resistant storage key scoped to `user_id`.
    #[must_use]
    pub fn key_for(user_id: Uuid, ext: &str) -> String {
        format!("{user_id}/{}.{ext}", Uuid::new_v4())
    }

    /// Public URL for a relative storage key.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/uploads/{key}", self.public_base)
    }

    /// Map a public URL back to its relative storage key.
    ///
    /// Returns `None` for URLs outside our public base and for keys with
    /// traversal or absolute components.
    #[must_use]
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        let prefix = format!("{}/uploads/", self.public_base);
        let key = url.strip_prefix(&prefix)?;
        if key.is_empty() {
            return None;
        }
        let safe = Path::new(key)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return None;
        }
        Some(key.to_owned())
    }

    /// Validate and persist one upload, returning its public URL.
    ///
    /// # Errors
    ///
    /// Validation errors from [`validate_upload`]; IO errors from the
    /// write itself.
    pub async fn store(&self, user_id: Uuid, content_type: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let ext = validate_upload(content_type, bytes.len())?;
        let key = Self::key_for(user_id, ext);

        let dest = self.root.join(&key);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dest, bytes).await?;

        Ok(self.public_url(&key))
    }

    /// Best-effort delete of the blob behind a public URL, scoped to the
    /// owner. Keys live under `{user_id}/...`, and only the user named by
    /// the key may delete it; everyone else's URLs are foreign here no
    /// matter how plausible they look.
    ///
    /// Returns `Ok(true)` when a blob was removed, `Ok(false)` when the URL
    /// did not point at an existing managed blob.
    ///
    /// # Errors
    ///
    /// `ForeignUrl` when the URL is not under our public base or names
    /// another owner's key; IO errors other than not-found from the remove.
    pub async fn delete_by_url(&self, owner_id: Uuid, url: &str) -> Result<bool, StorageError> {
        let key = self
            .key_from_url(url)
            .ok_or_else(|| StorageError::ForeignUrl(url.to_owned()))?;

        let owner_prefix = owner_id.to_string();
        if key.split('/').next() != Some(owner_prefix.as_str()) {
            return Err(StorageError::ForeignUrl(url.to_owned()));
        }

        match tokio::fs::remove_file(self.root.join(&key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
