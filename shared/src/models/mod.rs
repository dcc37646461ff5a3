//! Data models
//!
//! Wire shapes of the backend's business resources. IDs are UUID strings;
//! money is `Decimal` on the way in and out.

pub mod customer;
pub mod dashboard;
pub mod financial;
pub mod supplier;

// Re-exports
pub use customer::*;
pub use dashboard::*;
pub use financial::*;
pub use supplier::*;

use serde::{Deserialize, Serialize};

/// `skip`/`limit` paging accepted by every list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 100;

    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// Query string fragment, e.g. `skip=0&limit=100`
    pub fn query(&self) -> String {
        format!("skip={}&limit={}", self.skip, self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Generic `{"message": "..."}` body returned by delete endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Search box filter shared by the customer and supplier lists.
///
/// Name and email match case-insensitively; the document matches as a raw
/// substring, so both formatted and digits-only input work against what is
/// stored.
pub fn matches_search(name: &str, document: &str, email: Option<&str>, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    name.to_lowercase().contains(&needle)
        || document.contains(term)
        || email.is_some_and(|e| e.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query() {
        assert_eq!(Page::default().query(), "skip=0&limit=100");
        assert_eq!(Page::new(20, 10).query(), "skip=20&limit=10");
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search("Padaria Central", "11222333000181", None, ""));
        assert!(matches_search("Padaria Central", "11222333000181", None, "central"));
        assert!(matches_search("Padaria Central", "11222333000181", None, "222333"));
        assert!(matches_search("X", "1", Some("Contato@Padaria.com"), "padaria"));
        assert!(!matches_search("X", "1", None, "padaria"));
    }
}
