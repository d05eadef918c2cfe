//! Browsing session: navigation and selection behind named events.

use std::collections::HashSet;

use crate::error::Error;
use crate::error::ValidationError;
use crate::model::ArtworkId;
use crate::model::Page;
use crate::navigation::NavigationController;
use crate::navigation::Resolution;
use crate::selection::SelectionSet;
use crate::selection::parse_count;
use crate::view::TableView;

/// The whole mutable state of one table view.
///
/// Owned by a single task; every change goes through one of the methods
/// below, each corresponding to one user or network event.
#[derive(Debug, Clone)]
pub struct BrowseSession {
    navigation: NavigationController,
    selection: SelectionSet,
}

impl BrowseSession {
    /// Creates a session positioned on page 1 with nothing selected.
    pub fn new(page_size: u32) -> Result<Self, ValidationError> {
        Ok(Self {
            navigation: NavigationController::new(page_size)?,
            selection: SelectionSet::new(),
        })
    }

    /// Navigation state, for issuing page requests.
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Mutable navigation state, for issuing page requests.
    pub fn navigation_mut(&mut self) -> &mut NavigationController {
        &mut self.navigation
    }

    /// Selection across all visited pages.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// A fetch finished.
    pub fn page_resolved(&mut self, generation: u64, result: Result<Page, Error>) -> Resolution {
        self.navigation.resolve(generation, result)
    }

    /// The widget reports the full set of rows checked on the visible page.
    ///
    /// Returns `true` if the selection changed.
    pub fn page_selection_changed(&mut self, selected_on_page: &HashSet<ArtworkId>) -> bool {
        let page_ids = self.navigation.page_ids();
        self.selection.reconcile(&page_ids, selected_on_page)
    }

    /// Flips the checkbox of one visible row.
    ///
    /// Returns whether the row is selected afterwards.
    pub fn toggle(&mut self, id: ArtworkId) -> Result<bool, ValidationError> {
        if !self.navigation.records().iter().any(|r| r.id == id) {
            return Err(ValidationError::unknown_row(id));
        }

        let mut checked = self.checked_on_page();
        let now_selected = checked.insert(id) || !checked.remove(&id);
        self.page_selection_changed(&checked);
        Ok(now_selected)
    }

    /// Ticks every visible row.
    pub fn select_page(&mut self) -> bool {
        let all = self.navigation.page_ids().into_iter().collect();
        self.page_selection_changed(&all)
    }

    /// Unticks every visible row.
    pub fn deselect_page(&mut self) -> bool {
        self.page_selection_changed(&HashSet::new())
    }

    /// Adds the first `input` rows of the visible page.
    ///
    /// Returns how many ids were newly selected. Invalid input leaves the
    /// selection untouched.
    pub fn bulk_select(&mut self, input: &str) -> Result<usize, ValidationError> {
        let count = parse_count(input)?;
        Ok(self.selection.select_first(count, self.navigation.records()))
    }

    /// Drops every selection on every page.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> TableView {
        TableView::build(&self.navigation, &self.selection)
    }

    fn checked_on_page(&self) -> HashSet<ArtworkId> {
        self.selection
            .selected_on_page(self.navigation.records())
            .into_iter()
            .collect()
    }
}
