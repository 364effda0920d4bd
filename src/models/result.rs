//! Crawl result aggregate.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{CrawlStatus, Product};

/// Input and continuation options for a crawl.
///
/// One recognized option: the page to begin discovery from. A result whose
/// trailing-page detection fires carries a `CrawlConfig` pointing at the
/// next unvisited page so a future invocation can resume there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Page to begin discovery from
    pub page: u32,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self { page: 1 }
    }
}

/// Snapshot of the last HTTP response, populated on failure paths only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub status: u16,
    pub url: String,
    pub body: String,
}

/// Aggregate output of one crawl invocation.
///
/// Products are keyed by identifier in insertion order; key uniqueness is
/// enforced by the deduplicator before insertion, so `total_count` always
/// equals `products.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Final outcome classification
    pub status: CrawlStatus,

    /// Accumulated products, insertion order preserved
    pub products: IndexMap<String, Product>,

    /// Running count of inserted products
    pub total_count: usize,

    /// Continuation options, present iff `has_more_page`
    pub config: Option<CrawlConfig>,

    /// Pagination evidence beyond the discovered total was found
    pub has_more_page: bool,

    /// Last-response snapshot for diagnostics on failure paths
    pub response: Option<ResponseMeta>,
}

impl CrawlResult {
    /// Create an empty result with the given status.
    pub fn new(status: CrawlStatus) -> Self {
        Self {
            status,
            products: IndexMap::new(),
            total_count: 0,
            config: None,
            has_more_page: false,
            response: None,
        }
    }

    /// Insert a product under its identifier, incrementing the count.
    ///
    /// Callers check the deduplicator first; an identifier is never
    /// inserted twice within one crawl session.
    pub fn add_product(&mut self, product: Product) {
        self.products.insert(product.identifier.clone(), product);
        self.total_count += 1;
    }

    /// Attach a response snapshot.
    pub fn with_response(mut self, response: ResponseMeta) -> Self {
        self.response = Some(response);
        self
    }

    /// Mark that trailing pages exist and record where to resume.
    pub fn set_continuation(&mut self, config: CrawlConfig) {
        self.has_more_page = true;
        self.config = Some(config);
    }

    /// Products in insertion order, for serialization.
    pub fn products_in_order(&self) -> Vec<&Product> {
        self.products.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product(identifier: &str, title: &str) -> Product {
        Product {
            identifier: identifier.to_string(),
            title: Some(title.to_string()),
            price: 10.99,
            image_url: None,
            capacity_mb: 65536,
            colour: Some("red".to_string()),
            availability_text: Some("In Stock".to_string()),
            is_available: true,
            shipping_text: None,
            shipping_date: None,
        }
    }

    #[test]
    fn test_add_product_increments_count() {
        let mut result = CrawlResult::new(CrawlStatus::Completed);
        result.add_product(sample_product("1234", "Product 1"));
        result.add_product(sample_product("4568", "Product 2"));

        assert_eq!(result.total_count, 2);
        assert_eq!(result.products.len(), 2);
        assert!(result.products.contains_key("1234"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut result = CrawlResult::new(CrawlStatus::Completed);
        result.add_product(sample_product("b", "Second key first"));
        result.add_product(sample_product("a", "First key second"));

        let titles: Vec<_> = result
            .products_in_order()
            .iter()
            .map(|p| p.title.clone().unwrap())
            .collect();
        assert_eq!(titles, vec!["Second key first", "First key second"]);
    }

    #[test]
    fn test_continuation_sets_flag_and_config() {
        let mut result = CrawlResult::new(CrawlStatus::Completed);
        assert!(!result.has_more_page);
        assert!(result.config.is_none());

        result.set_continuation(CrawlConfig { page: 4 });
        assert!(result.has_more_page);
        assert_eq!(result.config, Some(CrawlConfig { page: 4 }));
    }

    #[test]
    fn test_new_result_is_empty() {
        let result = CrawlResult::new(CrawlStatus::Stopped);
        assert_eq!(result.total_count, 0);
        assert!(result.products.is_empty());
        assert!(result.response.is_none());
    }
}
