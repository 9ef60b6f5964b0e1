//! Directory fetch options and outcomes

use serde::{Deserialize, Serialize};

/// Which directory a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectorySource {
    Registrar,
    Deals,
}

impl std::fmt::Display for DirectorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registrar => write!(f, "registrar"),
            Self::Deals => write!(f, "deals"),
        }
    }
}

/// Which of the pages reported by a deal probe are fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageRangePolicy {
    /// Pages `1..total`; the last reported page is never requested.
    #[default]
    ExcludeLast,
    /// Pages `1..=total`.
    Inclusive,
}

impl PageRangePolicy {
    /// Page numbers to request for a reported page count, in order.
    #[must_use]
    pub fn pages(self, total_pages: u32) -> Vec<u32> {
        match self {
            Self::ExcludeLast => (1..total_pages).collect(),
            Self::Inclusive => (1..=total_pages).collect(),
        }
    }

    /// Number of pages [`pages`](Self::pages) yields.
    #[must_use]
    pub fn requested(self, total_pages: u32) -> u32 {
        match self {
            Self::ExcludeLast => total_pages.saturating_sub(1),
            Self::Inclusive => total_pages,
        }
    }
}

/// Options shared by the registrar and deal directory services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryOptions {
    /// Page size requested from the registrar.
    pub registrar_page_size: u32,
    /// Deal page range policy.
    pub deal_page_range: PageRangePolicy,
    /// Maximum number of page requests in flight; `1` is strictly sequential.
    pub fetch_concurrency: usize,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            registrar_page_size: 100,
            deal_page_range: PageRangePolicy::default(),
            fetch_concurrency: 1,
        }
    }
}

/// A page whose request or decoding failed and whose items are missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedPage {
    /// Directory the page belongs to.
    pub source: DirectorySource,
    /// Page number (1-indexed).
    pub page: u32,
    /// Error that caused the page to be skipped.
    pub reason: String,
}

/// Items collected by a paginated fetch, plus what was lost on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome<T> {
    /// Items of every successfully fetched page, in page order.
    pub items: Vec<T>,
    /// Page count reported by the probe request.
    pub total_pages: u32,
    /// Number of page requests issued after the probe.
    pub pages_requested: u32,
    /// Pages that failed and were left out of `items`.
    pub skipped_pages: Vec<SkippedPage>,
}

impl<T> FetchOutcome<T> {
    /// Whether every requested page made it into `items`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclude_last_drops_final_page() {
        assert_eq!(PageRangePolicy::ExcludeLast.pages(3), vec![1, 2]);
        assert_eq!(PageRangePolicy::ExcludeLast.pages(1), Vec::<u32>::new());
        assert_eq!(PageRangePolicy::ExcludeLast.pages(0), Vec::<u32>::new());
        assert_eq!(PageRangePolicy::ExcludeLast.requested(3), 2);
        assert_eq!(PageRangePolicy::ExcludeLast.requested(0), 0);
    }

    #[test]
    fn inclusive_requests_every_page() {
        assert_eq!(PageRangePolicy::Inclusive.pages(3), vec![1, 2, 3]);
        assert_eq!(PageRangePolicy::Inclusive.pages(0), Vec::<u32>::new());
    }

    #[test]
    fn default_options() {
        let options = DirectoryOptions::default();
        assert_eq!(options.registrar_page_size, 100);
        assert_eq!(options.deal_page_range, PageRangePolicy::ExcludeLast);
        assert_eq!(options.fetch_concurrency, 1);
    }
}
