//! Status classifier for marketplace listing pages
//!
//! This module turns raw page markup into a `UsernameStatus`. Classification
//! is pure and deterministic: the same markup and username always produce the
//! same status, and malformed or unexpected markup degrades to `NotFound`
//! rather than failing.
//!
//! Two page layouts are supported:
//! - `Table`: the search-results page, where each row of the results table
//!   describes one username. This is the primary layout.
//! - `SinglePage`: the direct username page, which carries a single status
//!   header element.

use crate::status::UsernameStatus;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

/// Page layout served by the marketplace
///
/// The layout selects both the lookup URL shape used by the fetcher and the
/// classification strategy applied to the returned markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Search-results page with one table row per username
    Table,

    /// Direct username page with a single status header
    SinglePage,
}

/// Classifies a fetched page into a username status
///
/// # Arguments
///
/// * `layout` - The page layout the marketplace served
/// * `html` - The raw page markup
/// * `username` - The normalized (lowercase) username being looked up
///
/// # Returns
///
/// The status parsed from the page. Absence of any expected structure yields
/// `UsernameStatus::NotFound`; this function never fails.
pub fn classify(layout: LayoutVariant, html: &str, username: &str) -> UsernameStatus {
    match layout {
        LayoutVariant::Table => classify_table(html, username),
        LayoutVariant::SinglePage => classify_single_page(html),
    }
}

/// Classifies the search-results table layout
///
/// Scans the results table for the row whose value cell matches the
/// sigil-prefixed username (`@name`, case-sensitive), then reads the row's
/// status markers:
///
/// 1. No matching row → `NotFound`
/// 2. Row flagged `js-auction-unavail` → `Unavailable` (wins over any status text)
/// 3. First `tm-status-*` element whose text matches a known label
/// 4. A `tm-timer` element whose text contains "left" → `OnAuction`
/// 5. Otherwise `NotFound`
fn classify_table(html: &str, username: &str) -> UsernameStatus {
    table_status(html, username).unwrap_or(UsernameStatus::NotFound)
}

fn table_status(html: &str, username: &str) -> Option<UsernameStatus> {
    let row_sel = Selector::parse("tbody.tm-high-cells tr.tm-row-selectable").ok()?;
    let value_sel = Selector::parse(".table-cell-value.tm-value").ok()?;
    let status_sel = Selector::parse(r#"[class*="tm-status-"]"#).ok()?;
    let timer_sel = Selector::parse(".tm-timer").ok()?;

    let document = Html::parse_document(html);
    let target = format!("@{}", username);

    let target_row = document.select(&row_sel).find(|row| {
        row.select(&value_sel)
            .next()
            .map(|cell| element_text(&cell) == target)
            .unwrap_or(false)
    })?;

    // The auction-unavailable row class wins over any status text in the row.
    if target_row
        .value()
        .classes()
        .any(|class| class == "js-auction-unavail")
    {
        return Some(UsernameStatus::Unavailable);
    }

    for status_el in target_row.select(&status_sel) {
        let text = element_text(&status_el).to_lowercase();

        if text.contains("available") {
            return Some(UsernameStatus::Available);
        } else if text.contains("for sale") {
            return Some(UsernameStatus::ForSale);
        } else if text == "sold" {
            return Some(UsernameStatus::Sold);
        } else if text == "taken" {
            return Some(UsernameStatus::Taken);
        } else if text.contains("unavailable") {
            return Some(UsernameStatus::Unavailable);
        }
    }

    let timer = target_row.select(&timer_sel).next()?;
    if element_text(&timer).to_lowercase().contains("left") {
        return Some(UsernameStatus::OnAuction);
    }

    None
}

/// Outcome of inspecting the single-page layout
///
/// An empty page (no status header at all) is kept distinct from a parsed
/// status so the boundary mapping stays explicit.
#[derive(Debug, PartialEq, Eq)]
enum SinglePageOutcome {
    Status(UsernameStatus),
    EmptyPage,
}

/// Classifies the direct username page layout
///
/// The output taxonomy carries no separate empty-page code, so an empty page
/// is surfaced as `NotFound`.
fn classify_single_page(html: &str) -> UsernameStatus {
    match single_page_outcome(html) {
        SinglePageOutcome::Status(status) => status,
        SinglePageOutcome::EmptyPage => UsernameStatus::NotFound,
    }
}

fn single_page_outcome(html: &str) -> SinglePageOutcome {
    let Ok(status_sel) = Selector::parse(".tm-section-header-status") else {
        return SinglePageOutcome::EmptyPage;
    };

    let document = Html::parse_document(html);
    let Some(status_el) = document.select(&status_sel).next() else {
        return SinglePageOutcome::EmptyPage;
    };

    let suffix = status_el
        .value()
        .classes()
        .find_map(|class| class.strip_prefix("tm-status-"));

    match suffix {
        Some("taken") => SinglePageOutcome::Status(UsernameStatus::Taken),
        Some("avail") => SinglePageOutcome::Status(UsernameStatus::ForSale),
        Some("unavail") => SinglePageOutcome::Status(UsernameStatus::Unavailable),
        _ => SinglePageOutcome::EmptyPage,
    }
}

/// Collects an element's text content, trimming each text node
fn element_text(element: &ElementRef) -> String {
    element.text().map(str::trim).collect()
}
