// src/pipeline/crawl.rs

//! Catalog crawling pipeline.

use crate::error::Result;
use crate::models::{Config, CrawlConfig, CrawlResult, CrawlStatus};
use crate::services::{CatalogCrawler, HttpTransport, RetryingFetcher, SmartphoneExtractor};
use crate::storage::ProductStorage;

/// Run one crawl against the configured catalog and persist the products.
pub async fn run_crawler(
    config: &Config,
    storage: &dyn ProductStorage,
    input: CrawlConfig,
) -> Result<CrawlResult> {
    log::info!(
        "Catalog crawl starting at {} (page {})",
        config.crawler.base_url,
        input.page
    );

    let transport = HttpTransport::new(&config.crawler)?;
    let fetcher = RetryingFetcher::new(Box::new(transport), &config.crawler);
    let extractor = SmartphoneExtractor::new(&config.crawler.base_url)?;
    let crawler = CatalogCrawler::new(fetcher, Box::new(extractor));

    let result = crawler.crawl(input).await?;

    match result.status {
        CrawlStatus::Completed | CrawlStatus::Stopped => {
            log::info!(
                "Crawl finished: {} with {} product(s)",
                result.status.label(),
                result.total_count
            );
        }
        _ => {
            log::warn!("Crawl ended with status {}", result.status.label());
            if let Some(meta) = &result.response {
                log::warn!("Last response: {} {}", meta.status, meta.url);
            }
        }
    }

    let summary = storage
        .write_products(&result, &config.output.file)
        .await?;
    log::info!(
        "Saved {} product(s) to {}",
        summary.product_count,
        summary.location
    );

    if let Some(next) = result.config {
        log::info!("More pages detected; resume with page {}", next.page);
    }

    Ok(result)
}
