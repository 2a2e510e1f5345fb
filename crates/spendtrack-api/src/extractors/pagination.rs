//! Pagination query parameter extractor.

use serde::Deserialize;

use spendtrack_core::types::pagination::PageRequest;

/// Pagination query parameters accepted by every list endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page. `limit` is accepted as an alias.
    #[serde(alias = "limit")]
    pub per_page: Option<u64>,
}

impl PaginationParams {
    /// Converts into a clamped [`PageRequest`].
    pub fn into_page_request(self) -> PageRequest {
        let default = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(default.page),
            self.per_page.unwrap_or(default.page_size),
        )
    }
}
