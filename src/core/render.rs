//! Renderer module
//!
//! Renders a RowSet to different output formats: jsonl, json, md, table, raw

use colored::Colorize;

use crate::core::model::{Kind, Row, RowSet};
use crate::core::util::{format_address, truncate_string};
use std::io::Write;

/// Maximum description bytes shown in markdown output
const MD_DESCRIPTION_LIMIT: usize = 240;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Table,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "table" => Ok(OutputFormat::Table),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: false,
            color: true,
        }
    }
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Create a render config with pretty and color options
    pub fn with_options(format: OutputFormat, pretty: bool, color: bool) -> Self {
        Self {
            format,
            pretty,
            color,
        }
    }
}

/// Renderer for row sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a row set to a string
    pub fn render(&self, rows: &RowSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(rows),
            OutputFormat::Json => self.render_json(rows),
            OutputFormat::Markdown => self.render_markdown(rows),
            OutputFormat::Table => self.render_table(rows),
            OutputFormat::Raw => self.render_raw(rows),
        }
    }

    /// Render to a writer
    #[allow(dead_code)]
    pub fn render_to<W: Write>(&self, rows: &RowSet, mut writer: W) -> std::io::Result<()> {
        let output = self.render(rows);
        writer.write_all(output.as_bytes())
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, rows: &RowSet) -> String {
        rows.items
            .iter()
            .filter_map(|row| {
                if self.config.pretty {
                    serde_json::to_string_pretty(row).ok()
                } else {
                    serde_json::to_string(row).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, rows: &RowSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&rows.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&rows.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, rows: &RowSet) -> String {
        let mut output = String::new();

        let mut listings = Vec::new();
        let mut previews = Vec::new();
        let mut stats = Vec::new();
        let mut errors = Vec::new();

        for row in &rows.items {
            match row.kind {
                Kind::Listing => listings.push(row),
                Kind::Preview => previews.push(row),
                Kind::Stats => stats.push(row),
                Kind::Error => errors.push(row),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for row in errors {
                for error in &row.errors {
                    match &row.id {
                        Some(id) => output.push_str(&format!(
                            "- **{}** (`{}`): {}\n",
                            error.code, id, error.message
                        )),
                        None => {
                            output.push_str(&format!("- **{}**: {}\n", error.code, error.message))
                        }
                    }
                }
            }
            output.push('\n');
        }

        if !listings.is_empty() {
            output.push_str("## Listings\n\n");
            for row in listings {
                self.render_listing_md(&mut output, row);
            }
            output.push('\n');
        }

        if !previews.is_empty() {
            output.push_str("## Preview\n\n");
            for row in previews {
                if let Some(name) = &row.name {
                    output.push_str(&format!("### `{}`\n\n", name));
                }
                if let Some(data) = &row.data {
                    output.push_str("```json\n");
                    output.push_str(
                        &serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string()),
                    );
                    output.push_str("\n```\n\n");
                }
            }
        }

        if !stats.is_empty() {
            output.push_str("## Stats\n\n");
            for row in stats {
                if let Some(data) = &row.data {
                    output.push_str("```json\n");
                    output.push_str(
                        &serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string()),
                    );
                    output.push_str("\n```\n\n");
                }
            }
        }

        output
    }

    fn render_listing_md(&self, output: &mut String, row: &Row) {
        let mark = match row.visible {
            Some(true) => "[x]",
            Some(false) => "[ ]",
            None => "[x]",
        };
        let name = row.name.as_deref().or(row.id.as_deref()).unwrap_or("(unnamed)");
        output.push_str(&format!("- {} **{}**", mark, name));

        if !row.categories.is_empty() {
            output.push_str(&format!(" `{}`", row.categories.join("`, `")));
        }
        if let Some(price) = &row.price {
            output.push_str(&format!(" · price {}", price));
        }
        if let Some(ts) = &row.timestamp {
            output.push_str(&format!(" · {}", ts));
        }
        if let Some(owner) = &row.owner {
            output.push_str(&format!(" · owner `{}`", format_address(owner, 6, 4)));
        }
        output.push('\n');

        if let Some(description) = &row.description {
            let (excerpt, truncated) = truncate_string(description, MD_DESCRIPTION_LIMIT);
            output.push_str(&format!("  {}{}\n", excerpt, if truncated { "…" } else { "" }));
        }
    }

    /// Render listings as a box-drawing table (visible rows only)
    fn render_table(&self, rows: &RowSet) -> String {
        let listings: Vec<&Row> = rows
            .items
            .iter()
            .filter(|r| r.kind == Kind::Listing && r.visible != Some(false))
            .collect();

        let headers = ["Name", "Categories", "Price", "Timestamp", "Owner"];
        let mut cells: Vec<[String; 5]> = Vec::with_capacity(listings.len());
        for row in &listings {
            cells.push([
                row.name
                    .as_deref()
                    .or(row.id.as_deref())
                    .unwrap_or("(unnamed)")
                    .to_string(),
                row.categories.join(","),
                row.price.clone().unwrap_or_default(),
                row.timestamp.clone().unwrap_or_default(),
                row.owner
                    .as_deref()
                    .map(|o| format_address(o, 6, 4))
                    .unwrap_or_default(),
            ]);
        }

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut output = String::new();
        let edge = |l: &str, m: &str, r: &str| {
            let mut line = String::from(l);
            for (i, w) in widths.iter().enumerate() {
                line.push_str(&"─".repeat(w + 2));
                line.push_str(if i + 1 == widths.len() { r } else { m });
            }
            line.push('\n');
            line
        };

        output.push_str(&edge("┌", "┬", "┐"));
        output.push('│');
        for (i, h) in headers.iter().enumerate() {
            let padded = format!(" {:width$} ", h, width = widths[i]);
            if self.config.color {
                output.push_str(&padded.bold().to_string());
            } else {
                output.push_str(&padded);
            }
            output.push('│');
        }
        output.push('\n');
        output.push_str(&edge("├", "┼", "┤"));

        for row in &cells {
            output.push('│');
            for (i, cell) in row.iter().enumerate() {
                output.push_str(&format!(" {:width$} ", cell, width = widths[i]));
                output.push('│');
            }
            output.push('\n');
        }

        output.push_str(&edge("└", "┴", "┘"));
        output
    }

    /// Render as raw output: names of visible listings only
    fn render_raw(&self, rows: &RowSet) -> String {
        rows.items
            .iter()
            .filter(|r| r.is_visible_listing())
            .filter_map(|r| r.name.clone().or_else(|| r.id.clone()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
