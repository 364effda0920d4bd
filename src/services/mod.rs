// src/services/mod.rs

//! Crawling services: fetching, extraction, deduplication, orchestration.

mod crawler;
mod dedup;
mod extractor;
mod fetcher;

pub use crawler::{CatalogCrawler, classify_response};
pub use dedup::Deduplicator;
pub use extractor::{PageExtractor, SmartphoneExtractor};
pub use fetcher::{HttpTransport, PageResponse, RetryingFetcher, Sleeper, Transport};
