//! Image file store for uploads

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{ClosetMuseError, Result};

/// A file written by [`UploadStore::save`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub file_name: String,
    pub path: PathBuf,
    /// URL the file is served under
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    public_prefix: String,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it is missing
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write `bytes` under a fresh unique name, keeping the original extension
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<StoredFile> {
        if bytes.is_empty() {
            return Err(ClosetMuseError::validation("uploaded file is empty"));
        }

        let file_name = match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.dir.join(&file_name);

        fs::write(&path, bytes).await?;
        debug!("Stored upload {} ({} bytes)", path.display(), bytes.len());

        Ok(StoredFile {
            url: format!("{}/{}", self.public_prefix, file_name),
            file_name,
            path,
        })
    }

    /// Best-effort removal, used to roll back a failed create
    pub async fn remove(&self, file: &StoredFile) {
        if let Err(e) = fs::remove_file(&file.path).await {
            warn!("Failed to remove upload {}: {}", file.path.display(), e);
        }
    }
}

/// Lowercased alphanumeric extension of `name`, if it has a usable one
fn extension_of(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}
