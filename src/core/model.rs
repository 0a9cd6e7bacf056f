//! Unified Row Model
//!
//! All commands (listing views, previews, stats, lint) must map to this
//! unified Row Model before rendering output.

use serde::{Deserialize, Serialize};

use crate::core::catalog::Listing;

/// The kind of output row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Listing,
    Preview,
    Stats,
    Error,
}

/// Error information attached to a row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowError {
    pub code: String,
    pub message: String,
}

impl RowError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified output row that all commands must produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// The kind of this row
    pub kind: Kind,

    /// Listing id (or a synthetic position id when the catalog omits one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Display description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category tags carried by the listing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Raw price attribute as supplied by the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Raw timestamp attribute as supplied by the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Owner address, if the catalog carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Visibility under the applied view-state (listing rows only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    /// Structured payload for preview/stats rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RowError>,
}

impl Row {
    /// Create a listing row with its visibility under the current view
    pub fn listing(listing: &Listing, visible: bool) -> Self {
        Self {
            kind: Kind::Listing,
            id: listing.id.clone(),
            name: listing.name.clone(),
            description: listing.description.clone(),
            categories: listing.categories.clone(),
            price: listing.price_raw(),
            timestamp: listing.timestamp_raw(),
            owner: listing.owner.clone(),
            visible: Some(visible),
            data: None,
            errors: Vec::new(),
        }
    }

    /// Create a preview row for an upload candidate
    pub fn preview(label: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind: Kind::Preview,
            id: None,
            name: Some(label.into()),
            description: None,
            categories: Vec::new(),
            price: None,
            timestamp: None,
            owner: None,
            visible: None,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Create a stats row carrying catalog aggregates
    pub fn stats(data: serde_json::Value) -> Self {
        Self {
            kind: Kind::Stats,
            id: None,
            name: None,
            description: None,
            categories: Vec::new(),
            price: None,
            timestamp: None,
            owner: None,
            visible: None,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Create an error row
    pub fn error(error: RowError) -> Self {
        Self {
            kind: Kind::Error,
            id: None,
            name: None,
            description: None,
            categories: Vec::new(),
            price: None,
            timestamp: None,
            owner: None,
            visible: None,
            data: None,
            errors: vec![error],
        }
    }

    /// Attach the listing id an error row refers to
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether this row is a listing visible under the applied view
    pub fn is_visible_listing(&self) -> bool {
        self.kind == Kind::Listing && self.visible == Some(true)
    }
}

/// Row set containing the full output of one command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowSet {
    pub items: Vec<Row>,
}

impl RowSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: Row) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = Row>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count listing rows visible under the applied view
    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_visible_listing()).count()
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Row> for RowSet {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Listing;

    fn sample_listing() -> Listing {
        serde_json::from_str(
            r#"{"id":"d1","name":"Blockchain Dataset","description":"chain data",
                "categories":["finance"],"price":"10","timestamp":"2024-01-01"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_listing_row_carries_fields() {
        let row = Row::listing(&sample_listing(), true);
        assert_eq!(row.kind, Kind::Listing);
        assert_eq!(row.id.as_deref(), Some("d1"));
        assert_eq!(row.name.as_deref(), Some("Blockchain Dataset"));
        assert_eq!(row.categories, vec!["finance"]);
        assert_eq!(row.visible, Some(true));
    }

    #[test]
    fn test_error_row() {
        let row = Row::error(RowError::new("BAD_PRICE", "price does not parse")).with_id("d9");
        assert_eq!(row.kind, Kind::Error);
        assert_eq!(row.id.as_deref(), Some("d9"));
        assert_eq!(row.errors.len(), 1);
        assert_eq!(row.errors[0].code, "BAD_PRICE");
    }

    #[test]
    fn test_kind_serialization() {
        let row = Row::listing(&sample_listing(), false);
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"kind\":\"listing\""));
        assert!(json.contains("\"visible\":false"));
    }

    #[test]
    fn test_hidden_fields_are_skipped() {
        let row = Row::stats(serde_json::json!({"total": 0}));
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("\"price\""));
        assert!(!json.contains("\"errors\""));
        assert!(json.contains("\"data\""));
    }

    #[test]
    fn test_visible_count() {
        let mut set = RowSet::new();
        set.push(Row::listing(&sample_listing(), true));
        set.push(Row::listing(&sample_listing(), false));
        set.push(Row::stats(serde_json::json!({})));
        assert_eq!(set.len(), 3);
        assert_eq!(set.visible_count(), 1);
    }

    #[test]
    fn test_row_set_from_iter() {
        let set: RowSet = vec![
            Row::listing(&sample_listing(), true),
            Row::listing(&sample_listing(), true),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_row_deserialization() {
        let json = r#"{"kind":"listing","id":"d1","name":"n","visible":true}"#;
        let row: Row = serde_json::from_str(json).unwrap();
        assert_eq!(row.kind, Kind::Listing);
        assert!(row.categories.is_empty());
        assert_eq!(row.visible, Some(true));
    }
}
