//! Catalog contract linting
//!
//! Validates listings against the attribute contract the renderer relies
//! on and emits one error row per issue, suitable for CI gating. A clean
//! catalog produces an empty set.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

use crate::core::catalog::{self, Listing};
use crate::core::model::{Row, RowError, RowSet};
use crate::core::render::{RenderConfig, Renderer};

/// Category tags double as CSS classes in the rendered markup, so they
/// must be class-name-like tokens.
static CATEGORY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("Invalid CATEGORY_RE regex")
});

fn issue(id: &str, code: &str, message: impl Into<String>) -> Row {
    Row::error(RowError::new(code, message)).with_id(id)
}

/// Lint a listing collection against the catalog contract
pub fn lint_listings(listings: &[Listing]) -> RowSet {
    let mut rows = RowSet::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for (index, listing) in listings.iter().enumerate() {
        let fallback = format!("#{}", index);
        let id = listing.id.as_deref().unwrap_or(&fallback);

        if let Some(listing_id) = listing.id.as_deref() {
            if !seen_ids.insert(listing_id) {
                rows.push(issue(
                    id,
                    "DUPLICATE_ID",
                    format!("listing id '{}' appears more than once", listing_id),
                ));
            }
        }

        if listing.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            rows.push(issue(id, "MISSING_NAME", "listing has no name"));
        }
        if listing
            .description
            .as_deref()
            .map_or(true, |d| d.trim().is_empty())
        {
            rows.push(issue(id, "MISSING_DESCRIPTION", "listing has no description"));
        }

        if let Some(raw) = listing.price_raw() {
            match listing.price() {
                None => rows.push(issue(
                    id,
                    "BAD_PRICE",
                    format!("price '{}' does not parse as a number", raw),
                )),
                Some(price) if price < 0.0 => rows.push(issue(
                    id,
                    "NEGATIVE_PRICE",
                    format!("price {} is negative", price),
                )),
                Some(_) => {}
            }
        }

        if let Some(raw) = listing.timestamp_raw() {
            if listing.timestamp().is_none() {
                rows.push(issue(
                    id,
                    "BAD_TIMESTAMP",
                    format!("timestamp '{}' does not parse", raw),
                ));
            }
        }

        for tag in &listing.categories {
            if !CATEGORY_RE.is_match(tag.trim()) {
                rows.push(issue(
                    id,
                    "BAD_CATEGORY",
                    format!("category '{}' is not a valid tag", tag),
                ));
            }
        }
    }

    rows
}

/// Run the lint command
pub fn run_lint(root: &Path, catalog_path: &Path, render_config: RenderConfig) -> Result<()> {
    let listings = catalog::load(root, catalog_path)?;
    let rows = lint_listings(&listings);

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&rows));

    Ok(())
}
