//! Pure field normalization helpers and small shared utilities.
//!
//! Everything here is stateless: raw text in, normalized value out. The
//! crawler applies these to the extractor's raw field-sets when building
//! product records.

use chrono::{Days, Local, NaiveDate};
use sha2::{Digest, Sha256};
use url::Url;

/// Parse a currency amount, stripping the pound symbol and whitespace.
///
/// Unparseable input yields 0.0, matching the record's default price.
pub fn parse_price(price: &str) -> f64 {
    let cleaned: String = price
        .chars()
        .filter(|c| *c != '£' && !c.is_whitespace())
        .collect();

    leading_number(&cleaned).unwrap_or(0.0)
}

/// Parse the longest numeric prefix of a string as f64.
fn leading_number(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            end = i + c.len_utf8();
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    s[..end].parse().ok()
}

/// Convert a capacity string in GB or MB units to an integer MB value.
///
/// 1 GB = 1024 MB. Unparseable input yields 0.
pub fn capacity_to_mb(capacity: &str) -> i64 {
    if capacity.contains("GB") {
        let gb: i64 = capacity.replace("GB", "").trim().parse().unwrap_or(0);
        return gb * 1024;
    }

    capacity.replace("MB", "").trim().parse().unwrap_or(0)
}

/// Strip the known availability prefix from the text, if present.
pub fn availability_text(availability: &str) -> String {
    availability
        .strip_prefix("Availability: ")
        .unwrap_or(availability)
        .to_string()
}

/// Whether the availability text indicates stock.
pub fn is_available(availability: &str) -> bool {
    availability.contains("In Stock")
}

/// Extract a shipping date hint from free text, normalized to `YYYY-MM-DD`.
///
/// Recognizes a long date with optional ordinal suffix ("22 Oct 2024",
/// "25th September 2024"), an ISO date, or the literal word "tomorrow".
pub fn shipping_date(shipping_text: &str) -> Option<String> {
    let long_date = regex::Regex::new(r"(\d{1,2})(?:st|nd|rd|th)? ([A-Za-z]+) (\d{4})").ok()?;
    if let Some(caps) = long_date.captures(shipping_text) {
        let candidate = format!("{} {} {}", &caps[1], &caps[2], &caps[3]);
        for format in ["%d %b %Y", "%d %B %Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(&candidate, format) {
                return Some(date.format("%Y-%m-%d").to_string());
            }
        }
        return None;
    }

    let iso_date = regex::Regex::new(r"\d{4}-\d{2}-\d{2}").ok()?;
    if let Some(m) = iso_date.find(shipping_text) {
        return Some(m.as_str().to_string());
    }

    if shipping_text.to_lowercase().contains("tomorrow") {
        let tomorrow = Local::now().date_naive().checked_add_days(Days::new(1))?;
        return Some(tomorrow.format("%Y-%m-%d").to_string());
    }

    None
}

/// Content-derived identifier for a product variant.
///
/// Deterministic over normalized title, capacity, and colour; colour is part
/// of the hash, so same-title variants in different colours stay distinct.
pub fn product_identifier(title: &str, capacity_mb: i64, colour: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(capacity_mb.to_string().as_bytes());
    hasher.update(colour.as_bytes());
    hex::encode(hasher.finalize())
}

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("£ 20.50"), 20.50);
        assert_eq!(parse_price("£899.99"), 899.99);
        assert_eq!(parse_price("free"), 0.0);
        assert_eq!(parse_price(""), 0.0);
    }

    #[test]
    fn test_capacity_to_mb() {
        assert_eq!(capacity_to_mb("64GB"), 65536);
        assert_eq!(capacity_to_mb("512MB"), 512);
        assert_eq!(capacity_to_mb("64 GB"), 65536);
        assert_eq!(capacity_to_mb("unknown"), 0);
    }

    #[test]
    fn test_availability_text() {
        assert_eq!(availability_text("Availability: Out of Stock"), "Out of Stock");
        assert_eq!(availability_text("Availability: In Stock"), "In Stock");
        assert_eq!(availability_text("Sold Out"), "Sold Out");
    }

    #[test]
    fn test_is_available() {
        assert!(is_available("Availability: In Stock"));
        assert!(!is_available("Availability: Out of Stock"));
        assert!(!is_available("Unavailable"));
    }

    #[test]
    fn test_shipping_date_long_form() {
        assert_eq!(
            shipping_date("Delivery from 22 Oct 2024"),
            Some("2024-10-22".to_string())
        );
        assert_eq!(
            shipping_date("Delivers 25th September 2024"),
            Some("2024-09-25".to_string())
        );
    }

    #[test]
    fn test_shipping_date_iso_form() {
        assert_eq!(
            shipping_date("Delivery by 2024-09-20"),
            Some("2024-09-20".to_string())
        );
    }

    #[test]
    fn test_shipping_date_tomorrow() {
        let expected = Local::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap()
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(shipping_date("Delivers tomorrow"), Some(expected));
    }

    #[test]
    fn test_shipping_date_unrecognized() {
        assert_eq!(shipping_date("Free shipping"), None);
        assert_eq!(shipping_date(""), None);
    }

    #[test]
    fn test_product_identifier_deterministic() {
        let a = product_identifier("iPhone 11 Pro", 65536, "gold");
        let b = product_identifier("iPhone 11 Pro", 65536, "gold");
        assert_eq!(a, b);
    }

    #[test]
    fn test_product_identifier_colour_is_significant() {
        let gold = product_identifier("iPhone 11 Pro", 65536, "gold");
        let grey = product_identifier("iPhone 11 Pro", 65536, "grey");
        assert_ne!(gold, grey);
    }

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/catalog/phones").unwrap();
        assert_eq!(
            resolve_url(&base, "../images/a.png"),
            "https://example.com/images/a.png"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }
}
