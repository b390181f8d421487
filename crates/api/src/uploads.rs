//! Field image storage on the local filesystem.
//!
//! Files are written below `root` and served back by the router under
//! `/uploads`, so the returned URL is `base_url` joined with the object path.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use fieldbook_core::{
    errors::{BookingError, BookingResult},
    store::ObjectStorage,
};
use tokio::fs;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> BookingResult<PathBuf> {
        let relative = Path::new(path);
        if path.is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(BookingError::Validation(format!("Invalid object path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> BookingResult<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BookingError::Internal(Box::new(e)))?;
        }
        fs::write(&target, &bytes)
            .await
            .map_err(|e| BookingError::Internal(Box::new(e)))?;

        debug!("Stored {} bytes at {}", bytes.len(), target.display());
        Ok(format!("{}/{}", self.base_url, path))
    }
}
