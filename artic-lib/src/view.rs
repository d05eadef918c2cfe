//! Render-ready snapshot of the table.

use crate::model::Artwork;
use crate::navigation::NavigationController;
use crate::selection::SelectionSet;

/// Header labels of the descriptive columns, in display order.
pub const COLUMNS: [&str; 6] = [
    "Title",
    "Place of Origin",
    "Artist Display",
    "Inscriptions",
    "Date Start",
    "Date End",
];

/// One visible row and whether its checkbox is ticked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub artwork: Artwork,
    pub selected: bool,
}

impl ViewRow {
    /// Cell text for each of [`COLUMNS`]; missing values render empty.
    pub fn cells(&self) -> [String; 6] {
        let a = &self.artwork;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let year = |v: Option<i32>| v.map(|y| y.to_string()).unwrap_or_default();
        [
            text(&a.title),
            text(&a.place_of_origin),
            text(&a.artist_display),
            text(&a.inscriptions),
            year(a.date_start),
            year(a.date_end),
        ]
    }
}

/// Everything the presentation layer needs to draw one frame.
///
/// Rows marked selected are exactly the cached page's records that appear in
/// the selection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<ViewRow>,
    pub loading: bool,
    pub error: Option<String>,
    /// Size of the selection across all visited pages.
    pub selected_count: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: Option<u32>,
    pub total_records: u64,
    /// Zero-based offset of the first row, `(page - 1) * page_size`.
    pub first_offset: u64,
}

impl TableView {
    /// Builds the snapshot from navigation and selection state.
    pub fn build(nav: &NavigationController, selection: &SelectionSet) -> Self {
        let query = nav.query();
        let rows = nav
            .records()
            .iter()
            .map(|artwork| ViewRow {
                selected: selection.is_selected(artwork.id),
                artwork: artwork.clone(),
            })
            .collect();

        Self {
            rows,
            loading: nav.is_loading(),
            error: nav.error().map(str::to_string),
            selected_count: selection.len(),
            page: query.page,
            page_size: query.page_size,
            total_pages: nav.total_pages(),
            total_records: nav.total_records(),
            first_offset: nav.first_offset(),
        }
    }

    /// Paginator report, e.g. `Showing 13 to 24 of 129884 entries`.
    pub fn report(&self) -> String {
        if self.rows.is_empty() {
            return format!("Showing 0 to 0 of {} entries", self.total_records);
        }
        let first = self.first_offset + 1;
        let last = (self.first_offset + self.rows.len() as u64).min(self.total_records.max(first));
        format!("Showing {} to {} of {} entries", first, last, self.total_records)
    }

    /// Number of visible rows with a ticked checkbox.
    pub fn selected_on_page(&self) -> usize {
        self.rows.iter().filter(|r| r.selected).count()
    }
}
