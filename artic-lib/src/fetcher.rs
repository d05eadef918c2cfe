//! Page fetcher seam between the navigation state and the network.

use async_trait::async_trait;

use crate::ArticClient;
use crate::error::Error;
use crate::error::ValidationError;
use crate::model::Page;

/// Which page to load, and at what size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageQuery {
    /// One-based page number.
    pub page: u32,
    /// Number of records per page.
    pub page_size: u32,
}

impl PageQuery {
    /// Creates a query, rejecting a zero page number or page size.
    pub fn new(page: u32, page_size: u32) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::NotPositive { field: "page" });
        }
        if page_size == 0 {
            return Err(ValidationError::NotPositive { field: "page size" });
        }
        Ok(Self { page, page_size })
    }

    /// Zero-based offset of the first record on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

/// Loads one page of artworks.
///
/// Implemented by [`ArticClient`] for the real API; tests provide their own.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page described by `query`.
    async fn fetch_page(&self, query: PageQuery) -> Result<Page, Error>;
}

#[async_trait]
impl PageFetcher for ArticClient {
    async fn fetch_page(&self, query: PageQuery) -> Result<Page, Error> {
        ArticClient::fetch_page(self, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(PageQuery::new(1, 12).unwrap().offset(), 0);
        assert_eq!(PageQuery::new(4, 25).unwrap().offset(), 75);
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(
            PageQuery::new(0, 12),
            Err(ValidationError::NotPositive { field: "page" })
        );
        assert_eq!(
            PageQuery::new(1, 0),
            Err(ValidationError::NotPositive { field: "page size" })
        );
    }
}
