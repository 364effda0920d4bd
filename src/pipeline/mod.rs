//! Pipeline entry points for crawler operations.
//!
//! - `run_crawler`: Crawl the catalog and persist the product output

pub mod crawl;

pub use crawl::run_crawler;
