// src/services/dedup.rs

//! Identifier deduplication for one crawl session.

use std::collections::HashSet;

/// Seen-set of content-derived record identifiers.
///
/// Membership test and insertion are the only operations; no removal. The
/// set lives for exactly one crawl invocation and is never persisted, so
/// identifiers are scoped to a single run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this identifier has already been emitted during the session.
    pub fn seen(&self, identifier: &str) -> bool {
        self.seen.contains(identifier)
    }

    /// Register an identifier as emitted.
    pub fn mark_seen(&mut self, identifier: String) {
        self.seen.insert(identifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seen_after_marking() {
        let mut dedup = Deduplicator::new();
        assert!(!dedup.seen("abc"));

        dedup.mark_seen("abc".to_string());
        assert!(dedup.seen("abc"));
        assert!(!dedup.seen("def"));
    }

    #[test]
    fn test_marking_twice_is_idempotent() {
        let mut dedup = Deduplicator::new();
        dedup.mark_seen("abc".to_string());
        dedup.mark_seen("abc".to_string());
        assert!(dedup.seen("abc"));
    }
}
