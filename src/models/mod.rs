// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod product;
mod result;
mod status;

// Re-export all public types
pub use config::{Config, CrawlerConfig, OutputConfig};
pub use product::{Product, RawProduct};
pub use result::{CrawlConfig, CrawlResult, ResponseMeta};
pub use status::CrawlStatus;
