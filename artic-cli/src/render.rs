//! Plain-text rendering of a [`TableView`].

use artic_lib::view::COLUMNS;
use artic_lib::view::TableView;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const GAP: &str = "  ";
const POSITION_WIDTH: usize = 3;
const CHECKBOX_WIDTH: usize = 3;
const YEAR_WIDTH: usize = 10;
const MIN_TEXT_WIDTH: usize = 8;

/// Widths of the six descriptive columns for a terminal `width` wide.
fn column_widths(width: usize) -> [usize; 6] {
    let fixed = POSITION_WIDTH + CHECKBOX_WIDTH + 2 * YEAR_WIDTH + GAP.len() * 7;
    let text = (width.saturating_sub(fixed) / 4).max(MIN_TEXT_WIDTH);
    [text, text, text, text, YEAR_WIDTH, YEAR_WIDTH]
}

/// Pads or truncates `text` to exactly `width` terminal columns.
///
/// Newlines become spaces; truncated text ends in an ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    let flat: String = text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();

    if flat.width() <= width {
        let pad = width - flat.width();
        return format!("{}{}", flat, " ".repeat(pad));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

/// Header checkbox: ticked, partial or empty depending on the visible rows.
fn header_checkbox(view: &TableView) -> &'static str {
    let ticked = view.selected_on_page();
    if view.rows.is_empty() || ticked == 0 {
        "[ ]"
    } else if ticked == view.rows.len() {
        "[x]"
    } else {
        "[-]"
    }
}

/// Renders the header, a rule and one line per row.
pub fn render_table(view: &TableView, width: usize) -> Vec<String> {
    let widths = column_widths(width);
    let mut lines = Vec::with_capacity(view.rows.len() + 3);

    let mut header = format!("{:>POSITION_WIDTH$}{GAP}{}", "#", header_checkbox(view));
    for (label, w) in COLUMNS.iter().zip(widths) {
        header.push_str(GAP);
        header.push_str(&fit(label, w));
    }
    let rule = "-".repeat(header.width());
    lines.push(header);
    lines.push(rule);

    for (i, row) in view.rows.iter().enumerate() {
        let mut line = format!("{:>POSITION_WIDTH$}{GAP}{}", i + 1, checkbox(row.selected));
        for (cell, w) in row.cells().iter().zip(widths) {
            line.push_str(GAP);
            line.push_str(&fit(cell, w));
        }
        lines.push(line);
    }

    if view.rows.is_empty() {
        lines.push(if view.loading {
            "Loading…".to_string()
        } else {
            "No records found.".to_string()
        });
    }

    lines
}

/// Paginator line, e.g. `Showing 1 to 12 of 129884 entries  page 1/10824  12 rows`.
pub fn render_paginator(view: &TableView) -> String {
    let pages = view
        .total_pages
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!(
        "{}  page {}/{}  {} rows",
        view.report(),
        view.page,
        pages,
        view.page_size
    )
}
