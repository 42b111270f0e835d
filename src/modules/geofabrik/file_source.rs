use std::path::PathBuf;

use async_trait::async_trait;

use super::IndexSource;
use crate::core::error::Result;

/// Reads the region index from a local file (offline use)
pub struct FileIndexSource {
    path: PathBuf,
}

impl FileIndexSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IndexSource for FileIndexSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading region index from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!("Failed to read {}: {:?}", self.path.display(), e);
            e
        })?;
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
