//! Catalog statistics
//!
//! Aggregates the live listing collection: per-category counts, price
//! bounds, and the time span the catalog covers.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::catalog::{self, Listing};
use crate::core::model::{Row, RowSet};
use crate::core::render::{RenderConfig, Renderer};

/// Catalog-wide statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Total listings in the catalog
    pub total: usize,
    /// Listing count by category tag (a listing counts once per tag)
    pub by_category: BTreeMap<String, usize>,
    /// Listings with a parseable price
    pub priced: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_mean: Option<f64>,
    /// Oldest parseable timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest: Option<DateTime<Utc>>,
    /// Newest parseable timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest: Option<DateTime<Utc>>,
}

/// Collect statistics over a listing collection
pub fn collect(listings: &[Listing]) -> CatalogStats {
    let mut stats = CatalogStats {
        total: listings.len(),
        ..Default::default()
    };

    let mut price_sum = 0.0;

    for listing in listings {
        for tag in &listing.categories {
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            *stats.by_category.entry(tag.to_string()).or_insert(0) += 1;
        }

        if let Some(price) = listing.price() {
            stats.priced += 1;
            price_sum += price;
            stats.price_min = Some(stats.price_min.map_or(price, |m: f64| m.min(price)));
            stats.price_max = Some(stats.price_max.map_or(price, |m: f64| m.max(price)));
        }

        if let Some(ts) = listing.timestamp() {
            stats.oldest = Some(stats.oldest.map_or(ts, |m| m.min(ts)));
            stats.newest = Some(stats.newest.map_or(ts, |m| m.max(ts)));
        }
    }

    if stats.priced > 0 {
        stats.price_mean = Some(price_sum / stats.priced as f64);
    }

    stats
}

/// Run the stats command
pub fn run_stats(root: &Path, catalog_path: &Path, render_config: RenderConfig) -> Result<()> {
    let listings = catalog::load(root, catalog_path)?;
    let stats = collect(&listings);

    let mut rows = RowSet::new();
    rows.push(Row::stats(serde_json::to_value(&stats)?));

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&rows));

    Ok(())
}
