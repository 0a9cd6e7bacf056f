//! Catalog loading and the typed listing accessor
//!
//! The catalog file holds the listing collection: a JSON array (or JSONL
//! stream) of listing objects. Loading is fresh on every call - commands
//! never cache the collection, so each invocation observes the live set,
//! including entries added or removed between runs.
//!
//! All attribute parsing (price, timestamp) is centralized here so that
//! malformed values are handled by one policy: the accessor returns `None`
//! and callers sort such listings last instead of failing the pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Millisecond epochs are this large; second epochs are not
const EPOCH_MILLIS_THRESHOLD: f64 = 100_000_000_000.0;

/// A price or timestamp attribute as it appears in the catalog:
/// either a JSON number or a string to be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Echo the attribute back as a raw string for output rows
    pub fn as_raw(&self) -> String {
        match self {
            Scalar::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Scalar::Text(s) => s.clone(),
        }
    }
}

/// One marketplace listing, read straight from the catalog file.
///
/// Every field except `categories` is optional: the catalog contract is
/// attribute-based, and a listing missing a field is degraded per policy
/// (no-match for search, sorts-last for ordering) rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Zero or more classification tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Scalar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Scalar>,

    /// Blockchain address of the listing owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Listing {
    /// Parsed price, or `None` when the attribute is absent or malformed
    pub fn price(&self) -> Option<f64> {
        match self.price.as_ref()? {
            Scalar::Number(n) => n.is_finite().then_some(*n),
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Parsed timestamp, or `None` when the attribute is absent or malformed
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self.timestamp.as_ref()? {
            Scalar::Number(n) => timestamp_from_epoch(*n),
            Scalar::Text(s) => parse_timestamp_text(s),
        }
    }

    /// Whether the listing carries the given category tag
    pub fn has_category(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.categories.iter().any(|c| c.trim() == tag)
    }

    /// Name for human-facing output, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("(unnamed)")
    }

    /// Raw price string for output rows
    pub fn price_raw(&self) -> Option<String> {
        self.price.as_ref().map(Scalar::as_raw)
    }

    /// Raw timestamp string for output rows
    pub fn timestamp_raw(&self) -> Option<String> {
        self.timestamp.as_ref().map(Scalar::as_raw)
    }
}

fn timestamp_from_epoch(n: f64) -> Option<DateTime<Utc>> {
    if !n.is_finite() {
        return None;
    }
    if n.abs() >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(n as i64)
    } else {
        DateTime::from_timestamp(n as i64, 0)
    }
}

/// Parse a textual timestamp: RFC 3339 first, then the date-only and
/// space-separated forms common in catalog exports, then a bare epoch.
fn parse_timestamp_text(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(ndt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc());
    }
    if let Ok(epoch) = s.parse::<f64>() {
        return timestamp_from_epoch(epoch);
    }
    None
}

/// Error loading a catalog file
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the catalog fresh from disk.
///
/// Accepts either a JSON array of listings or JSONL (one listing object
/// per line). An empty file is an empty, valid catalog.
pub fn load(root: &Path, path: &Path) -> Result<Vec<Listing>, CatalogError> {
    let full = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let display = full.display().to_string();

    let text = fs::read_to_string(&full).map_err(|source| CatalogError::Io {
        path: display.clone(),
        source,
    })?;

    parse_catalog(&text).map_err(|source| CatalogError::Parse {
        path: display,
        source,
    })
}

fn parse_catalog(text: &str) -> Result<Vec<Listing>, serde_json::Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<Listing>>(trimmed);
    }
    trimmed
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(serde_json::from_str::<Listing>)
        .collect()
}
