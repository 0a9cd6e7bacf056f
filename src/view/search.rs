//! Free-text search over listing names and descriptions
//!
//! Both the query and the listing fields are case-folded before the
//! substring test. A listing missing both fields never matches a
//! non-empty query; the pass never aborts.

use anyhow::Result;
use std::path::Path;

use crate::core::catalog::{self, Listing};
use crate::core::model::{Row, RowSet};
use crate::core::render::{RenderConfig, Renderer};

/// Whether a listing passes the query: empty queries match everything,
/// otherwise the case-folded query must be a substring of the name or
/// the description.
pub fn passes(query: &str, listing: &Listing) -> bool {
    let query = query.to_lowercase();
    if query.is_empty() {
        return true;
    }

    let name_hit = listing
        .name
        .as_deref()
        .map(|n| n.to_lowercase().contains(&query))
        .unwrap_or(false);
    let description_hit = listing
        .description
        .as_deref()
        .map(|d| d.to_lowercase().contains(&query))
        .unwrap_or(false);

    name_hit || description_hit
}

/// Build the searched row set for a freshly loaded collection
pub fn search_rows(query: &str, listings: &[Listing]) -> RowSet {
    listings
        .iter()
        .map(|l| Row::listing(l, passes(query, l)))
        .collect()
}

/// Run the search command
pub fn run_search(
    root: &Path,
    catalog_path: &Path,
    query: &str,
    render_config: RenderConfig,
) -> Result<()> {
    let listings = catalog::load(root, catalog_path)?;

    let rows = search_rows(query, &listings);

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&rows));

    Ok(())
}
