//! Page navigation state machine.
//!
//! Every navigation bumps a generation counter and hands back a
//! [`PageRequest`] stamped with it. The caller performs the fetch however it
//! likes and reports back through [`NavigationController::resolve`]; only the
//! result for the latest generation is applied, so a slow response for a page
//! the user already left can never overwrite the page on screen.

use crate::error::Error;
use crate::error::ValidationError;
use crate::fetcher::PageQuery;
use crate::model::Artwork;
use crate::model::ArtworkId;
use crate::model::Page;

/// Load status of the page cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Loaded,
    /// The latest request failed; the previous page is still cached.
    Errored,
}

/// A fetch the caller should perform for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Generation this request belongs to.
    pub generation: u64,
    /// Page and size to load.
    pub query: PageQuery,
}

/// What [`NavigationController::resolve`] did with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The page replaced the cache.
    Committed,
    /// The error was recorded; the cache is unchanged.
    Failed,
    /// A newer navigation superseded this request; nothing changed.
    Stale,
}

/// Owns the current page number, page size and single-page cache.
#[derive(Debug, Clone)]
pub struct NavigationController {
    query: PageQuery,
    state: LoadState,
    page: Option<Page>,
    error: Option<String>,
    total_records: u64,
    total_pages: Option<u32>,
    generation: u64,
}

impl NavigationController {
    /// Creates an idle controller positioned on page 1.
    pub fn new(page_size: u32) -> Result<Self, ValidationError> {
        Ok(Self {
            query: PageQuery::new(1, page_size)?,
            state: LoadState::Idle,
            page: None,
            error: None,
            total_records: 0,
            total_pages: None,
            generation: 0,
        })
    }

    /// Navigates to `page` at `page_size`.
    ///
    /// A page size different from the current one resets to page 1, the first
    /// offset valid for the new size.
    pub fn navigate(&mut self, page: u32, page_size: u32) -> Result<PageRequest, ValidationError> {
        let query = if page_size != self.query.page_size {
            PageQuery::new(1, page_size)?
        } else {
            PageQuery::new(self.clamp(page), page_size)?
        };
        Ok(self.issue(query))
    }

    /// Navigates to `page` at the current size.
    pub fn go_to(&mut self, page: u32) -> Result<PageRequest, ValidationError> {
        self.navigate(page, self.query.page_size)
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<PageRequest, ValidationError> {
        let query = PageQuery::new(1, page_size)?;
        Ok(self.issue(query))
    }

    /// Re-requests the current page.
    pub fn reload(&mut self) -> PageRequest {
        self.issue(self.query)
    }

    /// Moves one page forward, unless already on the last known page.
    pub fn next(&mut self) -> Option<PageRequest> {
        let target = self.query.page.checked_add(1)?;
        if self.total_pages.is_some_and(|total| target > total) {
            return None;
        }
        Some(self.issue(PageQuery { page: target, ..self.query }))
    }

    /// Moves one page back, unless already on page 1.
    pub fn previous(&mut self) -> Option<PageRequest> {
        if self.query.page <= 1 {
            return None;
        }
        let target = self.query.page - 1;
        Some(self.issue(PageQuery { page: target, ..self.query }))
    }

    /// Jumps to page 1, unless already there.
    pub fn first(&mut self) -> Option<PageRequest> {
        if self.query.page == 1 {
            return None;
        }
        Some(self.issue(PageQuery { page: 1, ..self.query }))
    }

    /// Jumps to the last page once the page count is known.
    pub fn last(&mut self) -> Option<PageRequest> {
        let total = self.total_pages.filter(|&total| total > 0)?;
        if self.query.page == total {
            return None;
        }
        Some(self.issue(PageQuery { page: total, ..self.query }))
    }

    /// Applies the outcome of the fetch issued for `generation`.
    pub fn resolve(&mut self, generation: u64, result: Result<Page, Error>) -> Resolution {
        if generation != self.generation || self.state != LoadState::Loading {
            log::debug!(
                "discarding stale response for generation {} (latest {})",
                generation,
                self.generation
            );
            return Resolution::Stale;
        }

        match result {
            Ok(page) => {
                let pagination = *page.pagination();
                self.total_records = pagination.total;
                self.total_pages = Some(pagination.total_pages);
                self.page = Some(page);
                self.state = LoadState::Loaded;
                Resolution::Committed
            }
            Err(e) => {
                log::warn!("page {} failed: {}", self.query.page, e);
                self.error = Some(e.to_string());
                self.state = LoadState::Errored;
                Resolution::Failed
            }
        }
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Returns `true` while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Message of the latest failure, cleared on every navigation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The cached page, if one has been loaded.
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Records on the cached page, or an empty slice before the first load.
    pub fn records(&self) -> &[Artwork] {
        self.page.as_ref().map(Page::records).unwrap_or_default()
    }

    /// Ids on the cached page, in page order.
    pub fn page_ids(&self) -> Vec<ArtworkId> {
        self.records().iter().map(|r| r.id).collect()
    }

    /// Page number and size of the latest navigation.
    pub fn query(&self) -> PageQuery {
        self.query
    }

    /// Zero-based offset of the first row for the latest navigation.
    pub fn first_offset(&self) -> u64 {
        self.query.offset()
    }

    /// Total records reported by the last committed page.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Total pages reported by the last committed page.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Generation of the latest issued request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn clamp(&self, page: u32) -> u32 {
        match self.total_pages {
            Some(total) if total > 0 => page.min(total),
            _ => page,
        }
    }

    fn issue(&mut self, query: PageQuery) -> PageRequest {
        if query.page_size != self.query.page_size {
            // Page count from the old size no longer bounds navigation.
            self.total_pages = self.page.as_ref().map(|_| {
                let pages = self.total_records.div_ceil(u64::from(query.page_size));
                u32::try_from(pages).unwrap_or(u32::MAX)
            });
        }
        self.generation += 1;
        self.query = query;
        self.state = LoadState::Loading;
        self.error = None;
        log::debug!(
            "navigate to page {} (size {}), generation {}",
            query.page,
            query.page_size,
            self.generation
        );
        PageRequest {
            generation: self.generation,
            query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::model::Pagination;

    fn page_of(current_page: u32, ids: &[ArtworkId]) -> Page {
        Page::new(
            ids.iter().copied().map(Artwork::new).collect(),
            Pagination {
                total: 48,
                limit: 12,
                offset: u64::from(current_page - 1) * 12,
                total_pages: 4,
                current_page,
            },
        )
    }

    #[test]
    fn test_initial_load_commits() {
        let mut nav = NavigationController::new(12).unwrap();
        assert_eq!(nav.state(), LoadState::Idle);
        assert!(nav.records().is_empty());

        let request = nav.reload();
        assert_eq!(request.query, PageQuery { page: 1, page_size: 12 });
        assert!(nav.is_loading());

        let resolution = nav.resolve(request.generation, Ok(page_of(1, &[1, 2])));
        assert_eq!(resolution, Resolution::Committed);
        assert_eq!(nav.state(), LoadState::Loaded);
        assert_eq!(nav.page_ids(), vec![1, 2]);
        assert_eq!(nav.total_records(), 48);
        assert_eq!(nav.total_pages(), Some(4));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut nav = NavigationController::new(12).unwrap();
        let first = nav.reload();
        nav.resolve(first.generation, Ok(page_of(1, &[1])));

        let to_two = nav.go_to(2).unwrap();
        let to_three = nav.go_to(3).unwrap();

        assert_eq!(
            nav.resolve(to_three.generation, Ok(page_of(3, &[3]))),
            Resolution::Committed
        );
        assert_eq!(
            nav.resolve(to_two.generation, Ok(page_of(2, &[2]))),
            Resolution::Stale
        );
        assert_eq!(nav.page_ids(), vec![3]);
        assert_eq!(nav.query().page, 3);
    }

    #[test]
    fn test_stale_error_is_discarded() {
        let mut nav = NavigationController::new(12).unwrap();
        let old = nav.go_to(2).unwrap();
        let new = nav.go_to(3).unwrap();

        let err = Error::Api(ApiError::http(500, ""));
        assert_eq!(nav.resolve(old.generation, Err(err)), Resolution::Stale);
        assert!(nav.is_loading());
        assert_eq!(nav.error(), None);
        assert_eq!(nav.generation(), new.generation);
    }

    #[test]
    fn test_error_keeps_cached_page() {
        let mut nav = NavigationController::new(12).unwrap();
        let first = nav.reload();
        nav.resolve(first.generation, Ok(page_of(1, &[1, 2, 3])));

        let next = nav.next().unwrap();
        let err = Error::Api(ApiError::http(503, "unavailable"));
        assert_eq!(nav.resolve(next.generation, Err(err)), Resolution::Failed);

        assert_eq!(nav.state(), LoadState::Errored);
        assert_eq!(nav.error(), Some("Request failed: 503"));
        assert_eq!(nav.page_ids(), vec![1, 2, 3]);

        nav.reload();
        assert_eq!(nav.error(), None);
        assert!(nav.is_loading());
    }

    #[test]
    fn test_duplicate_resolution_is_stale() {
        let mut nav = NavigationController::new(12).unwrap();
        let request = nav.reload();
        nav.resolve(request.generation, Ok(page_of(1, &[1])));
        assert_eq!(
            nav.resolve(request.generation, Ok(page_of(1, &[9]))),
            Resolution::Stale
        );
        assert_eq!(nav.page_ids(), vec![1]);
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let mut nav = NavigationController::new(12).unwrap();
        nav.go_to(3).unwrap();
        assert_eq!(nav.first_offset(), 24);

        let request = nav.set_page_size(25).unwrap();
        assert_eq!(request.query, PageQuery { page: 1, page_size: 25 });
        assert_eq!(nav.first_offset(), 0);

        nav.go_to(2).unwrap();
        let request = nav.navigate(2, 50).unwrap();
        assert_eq!(request.query.page, 1);
    }

    #[test]
    fn test_page_size_change_rebounds_page_count() {
        let mut nav = NavigationController::new(12).unwrap();
        let request = nav.reload();
        nav.resolve(request.generation, Ok(page_of(1, &[1])));
        assert_eq!(nav.total_pages(), Some(4));

        nav.set_page_size(25).unwrap();
        assert_eq!(nav.total_pages(), Some(2));

        let last = nav.last().unwrap();
        assert_eq!(last.query, PageQuery { page: 2, page_size: 25 });
        assert_eq!(nav.first_offset(), 25);
        assert!(nav.next().is_none());
        assert_eq!(nav.go_to(9).unwrap().query.page, 2);
    }

    #[test]
    fn test_page_size_change_before_first_load_leaves_count_unknown() {
        let mut nav = NavigationController::new(12).unwrap();
        nav.set_page_size(25).unwrap();
        assert_eq!(nav.total_pages(), None);
        assert!(nav.last().is_none());
    }

    #[test]
    fn test_bounds() {
        let mut nav = NavigationController::new(12).unwrap();
        assert!(nav.previous().is_none());
        assert!(nav.first().is_none());
        assert!(nav.last().is_none());

        let request = nav.reload();
        nav.resolve(request.generation, Ok(page_of(1, &[1])));

        let last = nav.last().unwrap();
        assert_eq!(last.query.page, 4);
        nav.resolve(last.generation, Ok(page_of(4, &[4])));
        assert!(nav.next().is_none());
        assert_eq!(nav.go_to(99).unwrap().query.page, 4);

        assert_eq!(
            nav.go_to(0),
            Err(ValidationError::NotPositive { field: "page" })
        );
    }
}
