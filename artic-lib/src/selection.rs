//! Cross-page selection state.
//!
//! The table widget reports selection with replace semantics: every change
//! carries the full set of rows checked on the visible page, not a delta.
//! [`SelectionSet::reconcile`] folds such a report into the set of ids selected
//! across every page visited so far, touching only ids that belong to the
//! visible page.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::model::Artwork;
use crate::model::ArtworkId;

/// Persistent set of selected artwork ids.
///
/// May hold ids that are not on the currently loaded page; those were selected
/// on a page visited earlier and are left alone until that page is shown again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: HashSet<ArtworkId>,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the visible page's checked rows into the selection.
    ///
    /// Every id in `selected_on_page` is added, then every id in `page_ids`
    /// that is not in `selected_on_page` is removed. Ids from other pages are
    /// never touched. An empty `page_ids` (page still loading) is a no-op.
    ///
    /// Returns `true` if the selection changed.
    pub fn reconcile(&mut self, page_ids: &[ArtworkId], selected_on_page: &HashSet<ArtworkId>) -> bool {
        if page_ids.is_empty() {
            return false;
        }

        let before = self.selected.len();
        let mut changed = false;

        for id in selected_on_page {
            self.selected.insert(*id);
        }
        changed |= self.selected.len() != before;

        for id in page_ids {
            if !selected_on_page.contains(id) {
                changed |= self.selected.remove(id);
            }
        }

        changed
    }

    /// Adds the first `min(count, records.len())` records, in page order.
    ///
    /// Never removes anything. Returns the number of ids newly added.
    pub fn select_first(&mut self, count: usize, records: &[Artwork]) -> usize {
        records
            .iter()
            .take(count)
            .filter(|r| self.selected.insert(r.id))
            .count()
    }

    /// Ids of `records` that are selected, in page order.
    pub fn selected_on_page(&self, records: &[Artwork]) -> Vec<ArtworkId> {
        records
            .iter()
            .filter(|r| self.selected.contains(&r.id))
            .map(|r| r.id)
            .collect()
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selected.contains(&id)
    }

    /// Number of selected ids across all pages.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Get all selected ids, sorted ascending.
    pub fn sorted_ids(&self) -> Vec<ArtworkId> {
        let mut ids: Vec<_> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Parses the bulk-select row count typed by the user.
///
/// Reads an optional `+` followed by the leading run of digits, ignoring
/// anything after it, so `"2.5"` is 2 and `"3abc"` is 3. Counts too large for
/// `usize` saturate; the page length caps them anyway. No digits, or only
/// zeros, is rejected.
pub fn parse_count(input: &str) -> Result<usize, ValidationError> {
    let trimmed = input.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];

    if digits.is_empty() || digits.bytes().all(|b| b == b'0') {
        return Err(ValidationError::invalid_count(input));
    }

    Ok(digits.parse::<usize>().unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[ArtworkId]) -> HashSet<ArtworkId> {
        values.iter().copied().collect()
    }

    fn set_of(values: &[ArtworkId]) -> SelectionSet {
        let mut set = SelectionSet::new();
        set.reconcile(values, &ids(values));
        set
    }

    fn page(range: std::ops::RangeInclusive<ArtworkId>) -> Vec<Artwork> {
        range.map(Artwork::new).collect()
    }

    #[test]
    fn test_deselection_isolated_to_current_page() {
        let mut set = set_of(&[5, 6, 9]);
        let changed = set.reconcile(&[5, 6, 7, 8], &ids(&[6]));

        assert!(changed);
        assert_eq!(set.sorted_ids(), vec![6, 9]);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut set = set_of(&[1, 40]);
        set.reconcile(&[1, 2, 3], &ids(&[2, 3]));
        let once = set.clone();

        let changed = set.reconcile(&[1, 2, 3], &ids(&[2, 3]));
        assert!(!changed);
        assert_eq!(set, once);
        assert_eq!(set.sorted_ids(), vec![2, 3, 40]);
    }

    #[test]
    fn test_empty_page_is_noop() {
        let mut set = set_of(&[5, 6]);
        assert!(!set.reconcile(&[], &HashSet::new()));
        assert_eq!(set.sorted_ids(), vec![5, 6]);
    }

    #[test]
    fn test_uncheck_everything_on_page() {
        let mut set = set_of(&[1, 2, 100]);
        set.reconcile(&[1, 2, 3], &HashSet::new());
        assert_eq!(set.sorted_ids(), vec![100]);
    }

    #[test]
    fn test_select_first_adds_prefix_in_page_order() {
        let records = page(101..=112);
        let mut set = SelectionSet::new();

        assert_eq!(set.select_first(3, &records), 3);
        assert_eq!(set.sorted_ids(), vec![101, 102, 103]);
    }

    #[test]
    fn test_select_first_caps_at_page_length_and_keeps_existing() {
        let records = page(1..=4);
        let mut set = set_of(&[2, 77]);

        assert_eq!(set.select_first(10, &records), 3);
        assert_eq!(set.sorted_ids(), vec![1, 2, 3, 4, 77]);
    }

    #[test]
    fn test_selected_on_page_is_intersection() {
        let records = page(1..=4);
        let set = set_of(&[4, 2, 99]);
        assert_eq!(set.selected_on_page(&records), vec![2, 4]);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3"), Ok(3));
        assert_eq!(parse_count(" 12 "), Ok(12));
        assert_eq!(parse_count("+7"), Ok(7));
        for bad in ["-3", "abc", "", "0", "000", "   ", "+", "-0", ".5"] {
            assert_eq!(parse_count(bad), Err(ValidationError::invalid_count(bad)));
        }
    }

    #[test]
    fn test_parse_count_takes_leading_digits() {
        assert_eq!(parse_count("2.5"), Ok(2));
        assert_eq!(parse_count("3abc"), Ok(3));
        assert_eq!(parse_count("010"), Ok(10));
    }

    #[test]
    fn test_parse_count_saturates_huge_input() {
        assert_eq!(parse_count("99999999999999999999999"), Ok(usize::MAX));

        let records = page(1..=12);
        let mut set = SelectionSet::new();
        let count = parse_count("9999999999999999999999999").unwrap();
        assert_eq!(set.select_first(count, &records), 12);
        assert_eq!(set.len(), 12);
    }
}
