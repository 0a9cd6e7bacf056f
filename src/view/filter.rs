//! Category filter over the listing collection
//!
//! One token is in effect per invocation, so filter exclusivity is
//! structural: there is no sibling control state to clear.

use anyhow::Result;
use std::path::Path;

use crate::core::catalog::{self, Listing};
use crate::core::model::{Row, RowSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::view::state::FilterToken;

/// Whether a listing passes the filter token: `all` passes everything,
/// any other token requires the matching category tag.
pub fn passes(token: &FilterToken, listing: &Listing) -> bool {
    match token {
        FilterToken::All => true,
        FilterToken::Category(tag) => listing.has_category(tag),
    }
}

/// Build the filtered row set for a freshly loaded collection
pub fn filter_rows(token: &FilterToken, listings: &[Listing]) -> RowSet {
    listings
        .iter()
        .map(|l| Row::listing(l, passes(token, l)))
        .collect()
}

/// Run the filter command
pub fn run_filter(
    root: &Path,
    catalog_path: &Path,
    token: &str,
    render_config: RenderConfig,
) -> Result<()> {
    let listings = catalog::load(root, catalog_path)?;
    let token = FilterToken::from(token);

    let rows = filter_rows(&token, &listings);

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&rows));

    Ok(())
}
