//! Storage abstractions for crawl output persistence.
//!
//! The crawler hands a finished `CrawlResult` to a storage backend, which
//! serializes the accumulated products as a pretty-printed UTF-8 JSON array
//! in insertion order.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CrawlResult, Product};

// Re-export for convenience
pub use local::LocalStorage;

/// Summary of a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of products written
    pub product_count: usize,
    /// Where the output landed
    pub location: String,
}

/// Trait for crawl output storage backends.
#[async_trait]
pub trait ProductStorage: Send + Sync {
    /// Serialize the result's products to the named file.
    async fn write_products(&self, result: &CrawlResult, file_name: &str) -> Result<WriteSummary>;

    /// Load previously written products, empty if the file is missing.
    async fn load_products(&self, file_name: &str) -> Result<Vec<Product>>;
}
