//! Local filesystem storage implementation.
//!
//! Writes are atomic (temp file + rename) so a crash mid-write never
//! leaves a truncated output file behind.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CrawlResult, Product};
use crate::storage::{ProductStorage, WriteSummary};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl ProductStorage for LocalStorage {
    async fn write_products(&self, result: &CrawlResult, file_name: &str) -> Result<WriteSummary> {
        let products = result.products_in_order();

        // serde_json leaves slashes unescaped, matching the output contract.
        let bytes = serde_json::to_vec_pretty(&products)?;
        self.write_bytes(file_name, &bytes).await?;

        Ok(WriteSummary {
            product_count: products.len(),
            location: self.path(file_name).display().to_string(),
        })
    }

    async fn load_products(&self, file_name: &str) -> Result<Vec<Product>> {
        match self.read_bytes(file_name).await? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => {
                log::warn!("No output found at {}", self.path(file_name).display());
                Ok(Vec::new())
            }
        }
    }
}
