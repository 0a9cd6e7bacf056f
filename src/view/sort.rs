//! Stable sorting of the listing collection
//!
//! Sorting only permutes container order; it never hides a listing.
//! Malformed prices and timestamps sort last under every key, so the
//! ordering stays deterministic even on dirty catalogs.

use anyhow::Result;
use std::cmp::Ordering;
use std::path::Path;

use crate::core::catalog::{self, Listing};
use crate::core::model::{Row, RowSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::view::state::SortKey;

/// Compare two optional keys with missing values last. `descending`
/// reverses the ordering of present values only.
fn cmp_missing_last<T: PartialOrd>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare two listings under a sort key
pub fn compare(key: SortKey, a: &Listing, b: &Listing) -> Ordering {
    match key {
        SortKey::PriceLow => cmp_missing_last(a.price(), b.price(), false),
        SortKey::PriceHigh => cmp_missing_last(a.price(), b.price(), true),
        SortKey::DateNew => cmp_missing_last(a.timestamp(), b.timestamp(), true),
        SortKey::DateOld => cmp_missing_last(a.timestamp(), b.timestamp(), false),
    }
}

/// Compute the container order as a stable permutation of indices.
/// `None` (an unrecognized key) compares all listings equal, which leaves
/// the input order untouched.
pub fn order(key: Option<SortKey>, listings: &[Listing]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..listings.len()).collect();
    if let Some(key) = key {
        indices.sort_by(|&i, &j| compare(key, &listings[i], &listings[j]));
    }
    indices
}

/// Run the sort command. The key is parsed leniently: anything outside
/// the four known keys degrades to "no reordering" instead of erroring.
pub fn run_sort(
    root: &Path,
    catalog_path: &Path,
    key: &str,
    render_config: RenderConfig,
) -> Result<()> {
    let listings = catalog::load(root, catalog_path)?;
    let key: Option<SortKey> = key.parse().ok();

    let rows: RowSet = order(key, &listings)
        .into_iter()
        .map(|i| Row::listing(&listings[i], true))
        .collect();

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&rows));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Listing> {
        serde_json::from_str(
            r#"[
                {"id":"a","name":"A","price":"10","timestamp":"2024-01-01"},
                {"id":"b","name":"B","price":"5","timestamp":"2024-02-01"},
                {"id":"c","name":"C","price":"20","timestamp":"2023-12-01"}
            ]"#,
        )
        .unwrap()
    }

    fn names_in_order(key: Option<SortKey>, listings: &[Listing]) -> Vec<&str> {
        order(key, listings)
            .into_iter()
            .map(|i| listings[i].display_name())
            .collect()
    }

    #[test]
    fn test_price_low_is_nondecreasing() {
        let items = scenario();
        assert_eq!(names_in_order(Some(SortKey::PriceLow), &items), ["B", "A", "C"]);
    }

    #[test]
    fn test_price_high_is_nonincreasing() {
        let items = scenario();
        assert_eq!(names_in_order(Some(SortKey::PriceHigh), &items), ["C", "A", "B"]);
    }

    #[test]
    fn test_date_new_puts_recent_first() {
        let items = scenario();
        assert_eq!(names_in_order(Some(SortKey::DateNew), &items), ["B", "A", "C"]);
    }

    #[test]
    fn test_date_old_puts_oldest_first() {
        let items = scenario();
        assert_eq!(names_in_order(Some(SortKey::DateOld), &items), ["C", "A", "B"]);
    }

    #[test]
    fn test_no_key_keeps_input_order() {
        let items = scenario();
        assert_eq!(names_in_order(None, &items), ["A", "B", "C"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let items: Vec<Listing> = serde_json::from_str(
            r#"[
                {"name":"first","price":"10"},
                {"name":"second","price":"10"},
                {"name":"third","price":"5"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            names_in_order(Some(SortKey::PriceLow), &items),
            ["third", "first", "second"]
        );
    }

    #[test]
    fn test_malformed_price_sorts_last_in_both_directions() {
        let items: Vec<Listing> = serde_json::from_str(
            r#"[
                {"name":"broken","price":"n/a"},
                {"name":"cheap","price":"1"},
                {"name":"dear","price":"9"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            names_in_order(Some(SortKey::PriceLow), &items),
            ["cheap", "dear", "broken"]
        );
        assert_eq!(
            names_in_order(Some(SortKey::PriceHigh), &items),
            ["dear", "cheap", "broken"]
        );
    }

    #[test]
    fn test_missing_timestamp_sorts_last() {
        let items: Vec<Listing> = serde_json::from_str(
            r#"[
                {"name":"undated"},
                {"name":"old","timestamp":"2020-01-01"},
                {"name":"new","timestamp":"2024-01-01"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            names_in_order(Some(SortKey::DateNew), &items),
            ["new", "old", "undated"]
        );
        assert_eq!(
            names_in_order(Some(SortKey::DateOld), &items),
            ["old", "new", "undated"]
        );
    }

    #[test]
    fn test_resorting_is_idempotent() {
        let items = scenario();
        let once = order(Some(SortKey::PriceLow), &items);
        let twice = order(Some(SortKey::PriceLow), &items);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_collection_is_noop() {
        assert!(order(Some(SortKey::PriceLow), &[]).is_empty());
    }
}
