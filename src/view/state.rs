//! Explicit view-state for the marketplace listing controller
//!
//! The active filter, search query and sort key form one explicit,
//! serializable record, and applying it is a pure function from
//! (view-state, listing collection) to (visible set, order).

use serde::{Deserialize, Serialize};

use crate::core::catalog::Listing;
use crate::view::{filter, search, sort};

/// The reserved filter token that shows every listing
pub const FILTER_ALL: &str = "all";

/// A filter control token: the reserved `all`, or one category tag
/// out of an open set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterToken {
    #[default]
    All,
    Category(String),
}

impl FilterToken {
    pub fn as_str(&self) -> &str {
        match self {
            FilterToken::All => FILTER_ALL,
            FilterToken::Category(tag) => tag,
        }
    }
}

impl From<&str> for FilterToken {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case(FILTER_ALL) {
            FilterToken::All
        } else {
            FilterToken::Category(s.to_string())
        }
    }
}

impl std::str::FromStr for FilterToken {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FilterToken::from(s))
    }
}

impl Serialize for FilterToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilterToken {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FilterToken::from(s.as_str()))
    }
}

/// Sort ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending by numeric price
    PriceLow,
    /// Descending by numeric price
    PriceHigh,
    /// Descending by timestamp (most recent first)
    DateNew,
    /// Ascending by timestamp (oldest first)
    DateOld,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::DateNew => "date-new",
            SortKey::DateOld => "date-old",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "date-new" => Ok(SortKey::DateNew),
            "date-old" => Ok(SortKey::DateOld),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

impl Serialize for SortKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The combination of active filter, search query and sort key at a point
/// in time. Defaults to show-all, empty query, no sort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub filter: FilterToken,

    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub sort: Option<SortKey>,
}

/// The outcome of applying a view-state: per-listing visibility (indexed
/// like the input collection) and a permutation giving container order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub visible: Vec<bool>,
    pub order: Vec<usize>,
}

/// Apply a view-state to a listing collection.
///
/// Visibility is the conjunction of the filter and search predicates;
/// the order is a stable permutation under the sort key. Sorting never
/// affects visibility. Everything is recomputed from scratch on every
/// call - there is no incremental state to go stale.
pub fn apply(state: &ViewState, listings: &[Listing]) -> ViewSnapshot {
    let visible = listings
        .iter()
        .map(|l| filter::passes(&state.filter, l) && search::passes(&state.query, l))
        .collect();
    let order = sort::order(state.sort, listings);
    ViewSnapshot { visible, order }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings(json: &str) -> Vec<Listing> {
        serde_json::from_str(json).unwrap()
    }

    fn scenario() -> Vec<Listing> {
        listings(
            r#"[
                {"id":"a","name":"A","description":"alpha","categories":["finance"],
                 "price":"10","timestamp":"2024-01-01"},
                {"id":"b","name":"B","description":"beta","categories":["health"],
                 "price":"5","timestamp":"2024-02-01"},
                {"id":"c","name":"C","description":"gamma","categories":["finance","health"],
                 "price":"20","timestamp":"2023-12-01"}
            ]"#,
        )
    }

    #[test]
    fn test_filter_token_parsing() {
        assert_eq!(FilterToken::from("all"), FilterToken::All);
        assert_eq!(FilterToken::from("ALL"), FilterToken::All);
        assert_eq!(
            FilterToken::from(" finance "),
            FilterToken::Category("finance".to_string())
        );
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert_eq!("DATE-NEW".parse::<SortKey>().unwrap(), SortKey::DateNew);
        assert!("alphabetical".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_view_state_round_trip() {
        let state = ViewState {
            filter: FilterToken::Category("finance".to_string()),
            query: "chain".to_string(),
            sort: Some(SortKey::PriceHigh),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"filter\":\"finance\""));
        assert!(json.contains("\"sort\":\"price-high\""));
        let back: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.filter, state.filter);
        assert_eq!(back.query, "chain");
        assert_eq!(back.sort, Some(SortKey::PriceHigh));
    }

    #[test]
    fn test_view_state_default_is_show_all() {
        let state = ViewState::default();
        assert_eq!(state.filter, FilterToken::All);
        assert!(state.query.is_empty());
        assert!(state.sort.is_none());
    }

    #[test]
    fn test_apply_default_shows_everything_in_order() {
        let items = scenario();
        let snapshot = apply(&ViewState::default(), &items);
        assert_eq!(snapshot.visible, vec![true, true, true]);
        assert_eq!(snapshot.order, vec![0, 1, 2]);
    }

    #[test]
    fn test_apply_composes_filter_and_search() {
        let items = scenario();
        let state = ViewState {
            filter: FilterToken::Category("finance".to_string()),
            query: "gamma".to_string(),
            sort: None,
        };
        // Only C is both finance-tagged and matches "gamma"
        let snapshot = apply(&state, &items);
        assert_eq!(snapshot.visible, vec![false, false, true]);
    }

    #[test]
    fn test_apply_sort_does_not_change_visibility() {
        let items = scenario();
        let state = ViewState {
            filter: FilterToken::Category("finance".to_string()),
            query: String::new(),
            sort: Some(SortKey::PriceLow),
        };
        let snapshot = apply(&state, &items);
        assert_eq!(snapshot.visible, vec![true, false, true]);
        assert_eq!(snapshot.order, vec![1, 0, 2]); // B(5), A(10), C(20)
    }

    #[test]
    fn test_apply_is_idempotent() {
        let items = scenario();
        let state = ViewState {
            filter: FilterToken::All,
            query: "a".to_string(),
            sort: Some(SortKey::DateNew),
        };
        assert_eq!(apply(&state, &items), apply(&state, &items));
    }

    #[test]
    fn test_apply_empty_collection_is_noop() {
        let snapshot = apply(&ViewState::default(), &[]);
        assert!(snapshot.visible.is_empty());
        assert!(snapshot.order.is_empty());
    }
}
