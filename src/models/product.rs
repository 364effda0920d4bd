//! Product record structures.

use serde::{Deserialize, Serialize};

/// One extracted catalog entry, keyed by a content-derived identifier.
///
/// Constructed once per distinct (title, capacity, colour) triple observed
/// during a crawl; immutable after construction. Serialized field names
/// match the catalog output contract (camelCase), with the identifier kept
/// internal to the crawl session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Deterministic hash of normalized title + capacity + colour
    #[serde(skip)]
    pub identifier: String,

    /// Product title
    pub title: Option<String>,

    /// Parsed price, 0.0 if absent or unparseable
    pub price: f64,

    /// Resolved image URL
    pub image_url: Option<String>,

    /// Capacity in megabytes, 0 if absent or unparseable
    #[serde(rename = "capacityMB")]
    pub capacity_mb: i64,

    /// Colour code from the variant selector
    pub colour: Option<String>,

    /// Availability text with the known prefix stripped
    pub availability_text: Option<String>,

    /// Whether the availability text indicates stock
    pub is_available: bool,

    /// Raw shipping text as shown on the page
    pub shipping_text: Option<String>,

    /// Normalized ISO shipping date, when recognized
    pub shipping_date: Option<String>,
}

/// Unparsed field-set for one colour variant of one product block.
///
/// Carries raw text exactly as read from the page; normalization into a
/// [`Product`] happens in the crawler, which also computes the identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProduct {
    pub title: Option<String>,
    pub price_text: Option<String>,
    pub capacity_text: Option<String>,
    pub availability_text: Option<String>,
    pub shipping_text: Option<String>,
    /// Already resolved against the catalog base URL
    pub image_url: Option<String>,
    pub colour: Option<String>,
}
