// src/services/extractor.rs

//! HTML extraction for the smartphone catalog markup.
//!
//! The crawler only sees the [`PageExtractor`] capability; the concrete
//! selectors live here so orchestration can be tested with a fake.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::RawProduct;
use crate::utils::resolve_url;

/// HTML query capability consumed by the crawler.
pub trait PageExtractor: Send + Sync {
    /// Total page count read from pagination markup.
    ///
    /// 0 means a single or missing pagination catalog.
    fn total_pages(&self, body: &str) -> usize;

    /// Raw field-sets for one page, one per colour variant per product block.
    fn extract(&self, body: &str, page: u32) -> Vec<RawProduct>;

    /// Heuristic signal that content exists beyond the listed pages.
    fn has_more_pages(&self, body: &str) -> bool;
}

/// Extractor for the smartphone catalog's listing markup.
pub struct SmartphoneExtractor {
    base_url: Url,
    pagination: Selector,
    product: Selector,
    name: Selector,
    price: Selector,
    image: Selector,
    capacity: Selector,
    centered_text: Selector,
    colour: Selector,
}

impl SmartphoneExtractor {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            pagination: parse_selector("#pages > div a")?,
            product: parse_selector(".product")?,
            name: parse_selector(".product-name")?,
            price: parse_selector(".my-8.text-lg")?,
            image: parse_selector("img")?,
            capacity: parse_selector(".product-capacity")?,
            centered_text: parse_selector(".my-4.text-sm.block.text-center")?,
            colour: parse_selector("span[data-colour]")?,
        })
    }

    /// Field-sets for one product block, one per colour variant.
    ///
    /// Blocks without a colour selector emit nothing.
    fn extract_block(&self, block: ElementRef) -> Vec<RawProduct> {
        let title = block.select(&self.name).next().map(text_of);
        let price_text = block.select(&self.price).next().map(text_of);
        let capacity_text = block.select(&self.capacity).next().map(text_of);
        let image_url = block
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| resolve_url(&self.base_url, src));

        // First centered line is availability, last is shipping; a single
        // line serves as both.
        let centered: Vec<String> = block.select(&self.centered_text).map(text_of).collect();
        let availability_text = centered.first().cloned();
        let shipping_text = centered.last().cloned();

        block
            .select(&self.colour)
            .filter_map(|span| span.value().attr("data-colour"))
            .map(|colour| RawProduct {
                title: title.clone(),
                price_text: price_text.clone(),
                capacity_text: capacity_text.clone(),
                availability_text: availability_text.clone(),
                shipping_text: shipping_text.clone(),
                image_url: image_url.clone(),
                colour: Some(colour.to_string()),
            })
            .collect()
    }
}

impl PageExtractor for SmartphoneExtractor {
    fn total_pages(&self, body: &str) -> usize {
        let document = Html::parse_document(body);
        document.select(&self.pagination).count()
    }

    fn extract(&self, body: &str, _page: u32) -> Vec<RawProduct> {
        let document = Html::parse_document(body);
        document
            .select(&self.product)
            .flat_map(|block| self.extract_block(block))
            .collect()
    }

    fn has_more_pages(&self, body: &str) -> bool {
        let document = Html::parse_document(body);
        let labels: Vec<usize> = document
            .select(&self.pagination)
            .filter_map(|anchor| text_of(anchor).parse().ok())
            .collect();

        // Pagination referencing a page number beyond the anchors listed
        // means the catalog has grown past the discovered total.
        let count = document.select(&self.pagination).count();
        labels.into_iter().any(|label| label > count)
    }
}

/// Collect an element's text with whitespace normalized.
fn text_of(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://example.com/developer-challenge/smartphones";

    fn extractor() -> SmartphoneExtractor {
        SmartphoneExtractor::new(BASE_URL).unwrap()
    }

    fn listing_page() -> String {
        r#"
        <html><body>
        <div class="product">
            <span class="product-name">iPhone 11 Pro</span>
            <img src="../images/iphone-11-pro.png">
            <span class="product-capacity">64GB</span>
            <div class="my-8 text-lg">£899.99</div>
            <span class="my-4 text-sm block text-center">Availability: In Stock</span>
            <span class="my-4 text-sm block text-center">Delivery from 22 Oct 2024</span>
            <span data-colour="gold"></span>
            <span data-colour="grey"></span>
        </div>
        <div class="product">
            <span class="product-name">Galaxy S20</span>
            <span class="product-capacity">128GB</span>
            <div class="my-8 text-lg">£799.00</div>
            <span class="my-4 text-sm block text-center">Availability: Out of Stock</span>
            <span data-colour="black"></span>
        </div>
        <div id="pages"><div>
            <a href="?page=1">1</a>
            <a href="?page=2">2</a>
            <a href="?page=3">3</a>
        </div></div>
        </body></html>
        "#
        .to_string()
    }

    #[test]
    fn test_total_pages_counts_anchors() {
        assert_eq!(extractor().total_pages(&listing_page()), 3);
    }

    #[test]
    fn test_total_pages_zero_without_pagination() {
        assert_eq!(extractor().total_pages("<html><body></body></html>"), 0);
    }

    #[test]
    fn test_extract_splits_colour_variants() {
        let records = extractor().extract(&listing_page(), 1);
        assert_eq!(records.len(), 3);

        let first = &records[0];
        assert_eq!(first.title.as_deref(), Some("iPhone 11 Pro"));
        assert_eq!(first.price_text.as_deref(), Some("£899.99"));
        assert_eq!(first.capacity_text.as_deref(), Some("64GB"));
        assert_eq!(first.colour.as_deref(), Some("gold"));
        assert_eq!(
            first.availability_text.as_deref(),
            Some("Availability: In Stock")
        );
        assert_eq!(
            first.shipping_text.as_deref(),
            Some("Delivery from 22 Oct 2024")
        );
        assert_eq!(records[1].colour.as_deref(), Some("grey"));
        assert_eq!(records[2].title.as_deref(), Some("Galaxy S20"));
    }

    #[test]
    fn test_extract_resolves_image_url() {
        let records = extractor().extract(&listing_page(), 1);
        assert_eq!(
            records[0].image_url.as_deref(),
            Some("https://example.com/images/iphone-11-pro.png")
        );
        // Second product has no image element.
        assert_eq!(records[2].image_url, None);
    }

    #[test]
    fn test_extract_single_centered_line_serves_both_fields() {
        let records = extractor().extract(&listing_page(), 1);
        let galaxy = &records[2];
        assert_eq!(
            galaxy.availability_text.as_deref(),
            Some("Availability: Out of Stock")
        );
        assert_eq!(
            galaxy.shipping_text.as_deref(),
            Some("Availability: Out of Stock")
        );
    }

    #[test]
    fn test_has_more_pages_when_label_exceeds_anchor_count() {
        let body = r#"
        <div id="pages"><div>
            <a href="?page=3">3</a>
            <a href="?page=4">4</a>
        </div></div>
        "#;
        assert!(extractor().has_more_pages(body));
    }

    #[test]
    fn test_has_more_pages_false_for_complete_listing() {
        assert!(!extractor().has_more_pages(&listing_page()));
        assert!(!extractor().has_more_pages(""));
    }
}
