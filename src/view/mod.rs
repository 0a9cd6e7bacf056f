//! View module - the marketplace listing controller
//!
//! Filter, search and sort are independent behaviors over one shared
//! listing collection. Each standalone command applies exactly one
//! predicate; the `view` command applies a full view-state and composes
//! the predicates.

use anyhow::Result;
use std::path::Path;

pub mod filter;
pub mod lint;
pub mod search;
pub mod sort;
pub mod state;
pub mod stats;

pub use state::{apply, FilterToken, SortKey, ViewSnapshot, ViewState};

use crate::core::catalog;
use crate::core::model::{Row, RowSet};
use crate::core::render::{RenderConfig, Renderer};

/// Build the row set for a view-state applied to a listing collection:
/// rows come out in container order, each carrying its composed
/// visibility flag.
pub fn view_rows(state: &ViewState, listings: &[catalog::Listing]) -> RowSet {
    let snapshot = apply(state, listings);
    snapshot
        .order
        .iter()
        .map(|&i| Row::listing(&listings[i], snapshot.visible[i]))
        .collect()
}

/// Run the show command: the default view-state (show-all, no sort)
pub fn run_show(root: &Path, catalog_path: &Path, render_config: RenderConfig) -> Result<()> {
    let listings = catalog::load(root, catalog_path)?;
    let rows = view_rows(&ViewState::default(), &listings);

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&rows));

    Ok(())
}

/// Run the view command: build a view-state from the flags and apply it
pub fn run_view(
    root: &Path,
    catalog_path: &Path,
    filter: Option<&str>,
    query: Option<&str>,
    sort: Option<&str>,
    render_config: RenderConfig,
) -> Result<()> {
    let listings = catalog::load(root, catalog_path)?;

    let state = ViewState {
        filter: filter.map(FilterToken::from).unwrap_or_default(),
        query: query.unwrap_or_default().to_string(),
        // Unrecognized keys degrade to "no reordering"
        sort: sort.and_then(|s| s.parse().ok()),
    };

    let rows = view_rows(&state, &listings);

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&rows));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Listing;

    fn scenario() -> Vec<Listing> {
        serde_json::from_str(
            r#"[
                {"id":"a","name":"Blockchain Dataset","description":"ledger",
                 "categories":["finance"],"price":"10","timestamp":"2024-01-01"},
                {"id":"b","name":"Weather CSV","description":"rainfall data",
                 "categories":["weather"],"price":"5","timestamp":"2024-02-01"},
                {"id":"c","name":"Health Survey","description":"on-chain trial data",
                 "categories":["finance","health"],"price":"20","timestamp":"2023-12-01"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_view_rows_order_and_visibility() {
        let state = ViewState {
            filter: FilterToken::Category("finance".to_string()),
            query: String::new(),
            sort: Some(SortKey::PriceLow),
        };
        let rows = view_rows(&state, &scenario());

        let ids: Vec<&str> = rows.items.iter().map(|r| r.id.as_deref().unwrap()).collect();
        assert_eq!(ids, ["b", "a", "c"]); // price order 5, 10, 20
        let visible: Vec<bool> = rows.items.iter().map(|r| r.visible.unwrap()).collect();
        assert_eq!(visible, [false, true, true]); // b is not finance
    }

    #[test]
    fn test_view_rows_composes_search_with_filter() {
        let state = ViewState {
            filter: FilterToken::Category("finance".to_string()),
            query: "chain".to_string(),
            sort: None,
        };
        let rows = view_rows(&state, &scenario());
        // "chain" matches both finance listings ("Blockchain", "on-chain")
        assert_eq!(rows.visible_count(), 2);
    }

    #[test]
    fn test_default_state_shows_all_in_input_order() {
        let rows = view_rows(&ViewState::default(), &scenario());
        assert_eq!(rows.visible_count(), 3);
        let ids: Vec<&str> = rows.items.iter().map(|r| r.id.as_deref().unwrap()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
