//! Crawl status enumeration.

use serde::{Deserialize, Serialize};

/// Terminal and transient outcomes of a crawl attempt.
///
/// `Running` and `RateLimit` are transient progress markers; they are never
/// persisted as the final status of a crawl in this design. Rate limiting is
/// resolved inside the fetcher and, if retries are exhausted, degrades to a
/// synthetic forbidden response classified as `Blocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlStatus {
    /// Discovery fetch was refused (403)
    Blocked,
    /// Full page loop ran to the discovered total
    Completed,
    /// Discovery fetch returned 404 or another non-200 status
    Error,
    /// Rate limited by the source
    RateLimit,
    /// Crawl in progress
    Running,
    /// Discovery succeeded but the catalog reported no pages
    Stopped,
}

impl CrawlStatus {
    /// Human-readable label for display output.
    pub fn label(&self) -> &'static str {
        match self {
            CrawlStatus::Blocked => "Blocked",
            CrawlStatus::Completed => "Completed",
            CrawlStatus::Error => "Error",
            CrawlStatus::RateLimit => "Rate Limit",
            CrawlStatus::Running => "Running",
            CrawlStatus::Stopped => "Stopped",
        }
    }

    /// Serialized wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrawlStatus::Blocked => "blocked",
            CrawlStatus::Completed => "completed",
            CrawlStatus::Error => "error",
            CrawlStatus::RateLimit => "rate_limit",
            CrawlStatus::Running => "running",
            CrawlStatus::Stopped => "stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(CrawlStatus::RateLimit.as_str(), "rate_limit");
        assert_eq!(CrawlStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&CrawlStatus::RateLimit).unwrap();
        assert_eq!(json, "\"rate_limit\"");
        let status: CrawlStatus = serde_json::from_str("\"blocked\"").unwrap();
        assert_eq!(status, CrawlStatus::Blocked);
    }

    #[test]
    fn test_labels() {
        assert_eq!(CrawlStatus::RateLimit.label(), "Rate Limit");
        assert_eq!(CrawlStatus::Stopped.label(), "Stopped");
    }
}
