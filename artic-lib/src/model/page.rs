//! Page type for paginated artwork results.

use serde::Deserialize;

use super::Artwork;
use super::ArtworkId;

/// Pagination metadata returned alongside each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Pagination {
    /// Total number of records in the collection.
    pub total: u64,
    /// Page size the server applied.
    pub limit: u32,
    /// Zero-based offset of the first record on this page.
    pub offset: u64,
    /// Total number of pages at this page size.
    pub total_pages: u32,
    /// One-based page number.
    pub current_page: u32,
}

/// One server page of artworks with its pagination metadata.
///
/// A page is replaced wholesale on navigation and never merged with another.
///
/// # Example
///
/// ```ignore
/// let page = client.fetch_page(PageQuery::new(1, 12)?).await?;
///
/// for artwork in page.records() {
///     println!("{:?}", artwork.title);
/// }
/// println!("{} of {}", page.pagination().current_page, page.pagination().total_pages);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    records: Vec<Artwork>,
    pagination: Pagination,
}

impl Page {
    /// Creates a new page.
    pub fn new(records: Vec<Artwork>, pagination: Pagination) -> Self {
        Self {
            records,
            pagination,
        }
    }

    /// Returns the records in page order.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Returns the pagination metadata.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Returns the ids of every record on this page, in page order.
    pub fn ids(&self) -> Vec<ArtworkId> {
        self.records.iter().map(|r| r.id).collect()
    }
}

/// Wire shape of `GET /artworks`.
#[derive(Debug, Deserialize)]
pub(crate) struct PageResponse {
    pub data: Vec<Artwork>,
    pub pagination: Pagination,
}

impl From<PageResponse> for Page {
    fn from(response: PageResponse) -> Self {
        Page::new(response.data, response.pagination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_ignores_extra_keys() {
        let json = r#"{
            "pagination": {
                "total": 129884,
                "limit": 12,
                "offset": 12,
                "total_pages": 10824,
                "current_page": 2,
                "next_url": "https://api.artic.edu/api/v1/artworks?page=3"
            },
            "data": [{"id": 1, "title": "One"}, {"id": 2, "title": null}],
            "info": {"license_text": "CC0"},
            "config": {"iiif_url": "https://www.artic.edu/iiif/2"}
        }"#;

        let page: Page = serde_json::from_str::<PageResponse>(json).unwrap().into();
        assert_eq!(page.ids(), vec![1, 2]);
        assert_eq!(page.pagination().total, 129884);
        assert_eq!(page.pagination().current_page, 2);
        assert_eq!(page.pagination().offset, 12);
    }
}
