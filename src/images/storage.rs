//! Content-addressed image storage on the local filesystem.
//!
//! Every file is named after the lowercase hex SHA-256 of its own bytes, so
//! storing the same content twice lands on the same path with the same
//! contents. Writes are plain create-or-truncate; there is no existence
//! check and no rename step.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Permissions for the storage directory (Unix only).
#[cfg(unix)]
const DIR_MODE: u32 = 0o750;

/// Permissions for stored files (Unix only).
#[cfg(unix)]
const FILE_MODE: u32 = 0o640;

/// Metadata about a stored image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Full SHA-256 of the stored bytes, 64 lowercase hex chars.
    pub hash: String,
    /// `{hash}.{extension}`.
    pub file_name: String,
    /// Absolute or root-relative path of the file on disk.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

/// Flat directory of content-addressed files.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory and any missing parents.
    pub async fn ensure_root(&self) -> Result<()> {
        let mut builder = tokio::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(DIR_MODE);

        builder.create(&self.root).await.map_err(|e| {
            Error::startup(
                format!(
                    "Failed to create storage directory {}",
                    self.root.display()
                ),
                e,
            )
        })
    }

    /// Write `data` under its content hash and return what was stored.
    ///
    /// An existing file with the same name is overwritten; by construction
    /// it already holds the same bytes.
    pub async fn put(&self, data: &[u8], extension: &str) -> Result<StoredImage> {
        let hash = content_hash(data);
        let file_name = format_filename(&hash, extension);
        let path = self.path_for(&file_name);

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(FILE_MODE);

        let mut file = options.open(&path).await.map_err(Error::store)?;
        file.write_all(data).await.map_err(Error::store)?;
        file.flush().await.map_err(Error::store)?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Wrote image");

        Ok(StoredImage {
            hash,
            file_name,
            path,
            size: data.len() as u64,
        })
    }

    /// Filesystem path for a stored file name.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

/// Lowercase hex SHA-256 of `data`.
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn format_filename(hash: &str, extension: &str) -> String {
    format!("{hash}.{extension}")
}
