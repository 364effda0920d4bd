// src/services/crawler.rs

//! Crawl orchestration.
//!
//! Drives one crawl invocation end to end: discovery fetch, failure
//! classification, the page loop, record normalization and deduplication,
//! and trailing-page detection. Site-specific extraction is injected as a
//! [`PageExtractor`] so the control flow can be tested with a fake.

use crate::error::Result;
use crate::models::{CrawlConfig, CrawlResult, CrawlStatus, Product, RawProduct, ResponseMeta};
use crate::services::{Deduplicator, PageExtractor, PageResponse, RetryingFetcher};
use crate::utils;

/// Map a discovery response to a terminal failure result, if any.
///
/// A 200 returns `None` and the caller proceeds to extraction; anything
/// else ends the crawl with a status and a response snapshot. Invoked only
/// on the discovery fetch; pages inside the loop are marked failed
/// individually instead of aborting the crawl.
pub fn classify_response(response: &PageResponse) -> Option<CrawlResult> {
    let status = match response.status {
        200 => return None,
        403 => CrawlStatus::Blocked,
        404 => CrawlStatus::Error,
        _ => CrawlStatus::Error,
    };

    Some(CrawlResult::new(status).with_response(snapshot(response)))
}

fn snapshot(response: &PageResponse) -> ResponseMeta {
    ResponseMeta {
        status: response.status,
        url: response.url.clone(),
        body: response.body.clone(),
    }
}

/// Orchestrates the full catalog crawl.
pub struct CatalogCrawler {
    fetcher: RetryingFetcher,
    extractor: Box<dyn PageExtractor>,
}

impl CatalogCrawler {
    pub fn new(fetcher: RetryingFetcher, extractor: Box<dyn PageExtractor>) -> Self {
        Self { fetcher, extractor }
    }

    /// Run one crawl invocation.
    ///
    /// Every non-transport failure resolves into the returned result; only
    /// network-level faults propagate as errors.
    pub async fn crawl(&self, config: CrawlConfig) -> Result<CrawlResult> {
        let start_page = config.page.max(1);

        let response = self.fetcher.fetch(start_page).await?;
        if let Some(failed) = classify_response(&response) {
            log::warn!(
                "Discovery fetch failed with status {} ({})",
                response.status,
                failed.status.label()
            );
            return Ok(failed);
        }

        let total_pages = self.extractor.total_pages(&response.body) as u32;
        if total_pages == 0 {
            // Empty catalog is a valid outcome, not an error.
            log::info!("Catalog reports no pages, stopping");
            return Ok(CrawlResult::new(CrawlStatus::Stopped));
        }

        log::info!("Discovered {} page(s), crawling from page {}", total_pages, start_page);

        let mut result = CrawlResult::new(CrawlStatus::Completed);
        self.fetch_pages(start_page, total_pages, &mut result).await?;
        Ok(result)
    }

    /// Page loop plus trailing-page detection.
    ///
    /// The deduplicator and the failed-pages list are locals of this one
    /// invocation; nothing carries over between crawls.
    async fn fetch_pages(
        &self,
        start_page: u32,
        total_pages: u32,
        result: &mut CrawlResult,
    ) -> Result<()> {
        let mut seen = Deduplicator::new();
        let mut failed_pages: Vec<String> = Vec::new();
        let mut last_body = String::new();
        let mut current_page = start_page;

        while current_page <= total_pages {
            let response = self.fetcher.fetch(current_page).await?;

            if response.status == 200 {
                self.populate(&response.body, current_page, &mut seen, result);
                last_body = response.body;
            } else {
                // Individual page failures are recorded, never escalated.
                log::warn!(
                    "Page {} failed with status {}, continuing",
                    current_page,
                    response.status
                );
                failed_pages.push(response.url);
            }

            current_page += 1;
        }

        if !failed_pages.is_empty() {
            log::warn!("{} page(s) failed during this crawl", failed_pages.len());
        }

        // The cursor lands on total_pages + 1 after a full loop; the
        // extractor's signal decides whether trailing pages exist.
        let more = self.extractor.has_more_pages(&last_body);
        if total_pages > 1 && current_page > total_pages && more {
            log::info!("Pagination evidence beyond page {}, emitting continuation", total_pages);
            result.set_continuation(CrawlConfig {
                page: total_pages + 1,
            });
        }

        Ok(())
    }

    /// Normalize one page's raw field-sets into deduplicated records.
    fn populate(
        &self,
        body: &str,
        page: u32,
        seen: &mut Deduplicator,
        result: &mut CrawlResult,
    ) {
        for raw in self.extractor.extract(body, page) {
            let product = build_product(raw);

            if seen.seen(&product.identifier) {
                continue;
            }

            seen.mark_seen(product.identifier.clone());
            result.add_product(product);
        }
    }
}

/// Normalize a raw field-set into an immutable product record.
///
/// The identifier hashes the normalized title, capacity, and colour, so
/// colour variants of the same handset stay distinct while exact repeats
/// observed through overlapping pages collapse.
fn build_product(raw: RawProduct) -> Product {
    let capacity_mb = raw
        .capacity_text
        .as_deref()
        .map(utils::capacity_to_mb)
        .unwrap_or(0);
    let price = raw
        .price_text
        .as_deref()
        .map(utils::parse_price)
        .unwrap_or(0.0);
    let availability_text = raw.availability_text.as_deref().map(utils::availability_text);
    let is_available = raw
        .availability_text
        .as_deref()
        .map(utils::is_available)
        .unwrap_or(false);
    let shipping_date = raw.shipping_text.as_deref().and_then(utils::shipping_date);

    let identifier = utils::product_identifier(
        raw.title.as_deref().unwrap_or(""),
        capacity_mb,
        raw.colour.as_deref().unwrap_or(""),
    );

    Product {
        identifier,
        title: raw.title,
        price,
        image_url: raw.image_url,
        capacity_mb,
        colour: raw.colour,
        availability_text,
        is_available,
        shipping_text: raw.shipping_text,
        shipping_date,
    }
}
