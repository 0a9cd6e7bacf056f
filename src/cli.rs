//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};

/// marq - a CLI viewer for marketplace catalogs: filter, search and sort listings.
#[derive(Parser, Debug)]
#[command(name = "marq")]
#[command(
    author,
    version,
    about,
    long_about = r#"marq loads a catalog of marketplace listings and emits a unified,
machine-readable row model for every command.

A catalog is a JSON array (or JSONL stream) of listing objects with
optional id/name/description/categories/price/timestamp/owner fields.
Each command prints a RowSet in the selected format (default: jsonl);
listing rows carry a `visible` flag so the full collection stays
observable even when a filter or search hides part of it.

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- table: box-drawing table of visible listings
- raw: visible listing names only (unstable; intended for debugging)

Examples:
    marq show catalog.json
    marq filter catalog.json finance
    marq search catalog.json "blockchain"
    marq sort catalog.json price-low
    marq view catalog.json --filter finance --query chain --sort date-new
    marq preview upload/sample.csv
"#
)]
pub struct Cli {
    /// Root directory for all operations.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
Catalog and preview paths are interpreted relative to this root unless absolute."
    )]
    pub root: PathBuf,

    /// Output format (jsonl/json/md/table/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for the RowSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- table\n\
- raw\n\n\
Tip: Prefer jsonl when you want stable, line-oriented output for piping."
    )]
    pub format: String,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors. Only the table format uses color."
    )]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Reduce non-essential output. Note: machine-readable results are still\n\
printed to stdout unless a command explicitly suppresses them."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable more detailed diagnostics. This is intended for debugging and\n\
may increase stderr output."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
This is useful when manually inspecting results. Has no effect on md/table/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every listing in the catalog (default view-state).
    #[command(
        long_about = "Load the catalog and emit one listing row per entry in input order,\n\
all visible. This is the default view-state: filter 'all', empty query,\n\
no sort.\n\n\
Examples:\n\
  marq show catalog.json\n\
  marq show catalog.json --format table\n"
    )]
    Show {
        /// Catalog file (relative to ROOT unless absolute).
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,
    },

    /// Filter listings by category token.
    #[command(
        long_about = "Apply a single filter token to the catalog. The reserved token 'all'\n\
shows every listing; any other token shows only listings carrying that\n\
category tag. Every listing row is emitted with its visibility flag, so\n\
hidden listings remain observable.\n\n\
The filter is applied alone - it does not consult any search query. Use\n\
'view' to compose filter and search.\n\n\
Examples:\n\
  marq filter catalog.json finance\n\
  marq filter catalog.json all\n"
    )]
    Filter {
        /// Catalog file (relative to ROOT unless absolute).
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Filter token: 'all' or a category tag.
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// Search listings by name and description.
    #[command(
        long_about = "Case-insensitive substring search over each listing's name and\n\
description. An empty query matches everything. Listings missing both\n\
fields are skipped (they never match a non-empty query).\n\n\
The search is applied alone - it does not consult any filter token. Use\n\
'view' to compose filter and search.\n\n\
Examples:\n\
  marq search catalog.json blockchain\n\
  marq search catalog.json \"rainfall data\"\n"
    )]
    Search {
        /// Catalog file (relative to ROOT unless absolute).
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Free-text query.
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Sort listings by price or timestamp.
    #[command(
        long_about = "Reorder the catalog under one of the four sort keys:\n\
- price-low: ascending by numeric price\n\
- price-high: descending by numeric price\n\
- date-new: descending by timestamp (most recent first)\n\
- date-old: ascending by timestamp (oldest first)\n\n\
Sorting is stable (equal keys keep their relative order), never hides a\n\
listing, and puts malformed prices/timestamps last. An unrecognized key\n\
leaves the input order untouched.\n\n\
Examples:\n\
  marq sort catalog.json price-low\n\
  marq sort catalog.json date-new\n"
    )]
    Sort {
        /// Catalog file (relative to ROOT unless absolute).
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Sort key (price-low/price-high/date-new/date-old).
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Apply a full view-state: filter, query and sort together.
    #[command(
        long_about = "Build an explicit view-state from the flags and apply it in one pass.\n\
Unlike the standalone commands, 'view' composes the predicates: a listing\n\
is visible only if it passes BOTH the filter token and the search query.\n\
Rows are emitted in sorted container order.\n\n\
Examples:\n\
  marq view catalog.json --filter finance\n\
  marq view catalog.json --filter finance --query chain --sort price-high\n"
    )]
    View {
        /// Catalog file (relative to ROOT unless absolute).
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Filter token ('all' or a category tag).
        #[arg(long, value_name = "TOKEN")]
        filter: Option<String>,

        /// Free-text query.
        #[arg(long, value_name = "QUERY")]
        query: Option<String>,

        /// Sort key (price-low/price-high/date-new/date-old).
        #[arg(long, value_name = "KEY")]
        sort: Option<String>,
    },

    /// Catalog statistics: category counts, price bounds, time span.
    #[command(
        long_about = "Aggregate the catalog into a single stats row: total listings,\n\
per-category counts, priced-listing count with min/max/mean price, and the\n\
oldest/newest parseable timestamps.\n\n\
Example:\n\
  marq stats catalog.json\n"
    )]
    Stats {
        /// Catalog file (relative to ROOT unless absolute).
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,
    },

    /// Validate the catalog contract and report issues.
    #[command(
        long_about = "Check every listing against the attribute contract (name, description,\n\
parseable non-negative price, parseable timestamp, class-like category\n\
tags, unique ids) and emit one error row per issue with a stable code.\n\n\
This command emits issues as error rows, suitable for CI gating. A clean\n\
catalog produces an empty set.\n\n\
Example:\n\
  marq lint catalog.json\n"
    )]
    Lint {
        /// Catalog file (relative to ROOT unless absolute).
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,
    },

    /// Preview an upload candidate (file type tag or image data URI).
    #[command(
        long_about = "Mirror the upload form's file-input preview: the row label is the file\n\
name (or 'No file selected' when the path does not exist). Image files get\n\
an inline data:<mime>;base64 preview; everything else gets a coarse type\n\
tag among csv/json/excel/generic, derived from --mime first and the file\n\
extension second.\n\n\
Examples:\n\
  marq preview uploads/data.csv\n\
  marq preview uploads/chart.png\n\
  marq preview uploads/data.bin --mime text/csv\n"
    )]
    Preview {
        /// File to preview (relative to ROOT unless absolute).
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// MIME type reported for the file (takes precedence over the extension).
        #[arg(long, value_name = "MIME")]
        mime: Option<String>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_options(format, cli.pretty, !cli.no_color);

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    match cli.command {
        Commands::Show { catalog } => crate::view::run_show(&root, &catalog, render_config),

        Commands::Filter { catalog, token } => {
            crate::view::filter::run_filter(&root, &catalog, &token, render_config)
        }

        Commands::Search { catalog, query } => {
            crate::view::search::run_search(&root, &catalog, &query, render_config)
        }

        Commands::Sort { catalog, key } => {
            crate::view::sort::run_sort(&root, &catalog, &key, render_config)
        }

        Commands::View {
            catalog,
            filter,
            query,
            sort,
        } => crate::view::run_view(
            &root,
            &catalog,
            filter.as_deref(),
            query.as_deref(),
            sort.as_deref(),
            render_config,
        ),

        Commands::Stats { catalog } => crate::view::stats::run_stats(&root, &catalog, render_config),

        Commands::Lint { catalog } => crate::view::lint::run_lint(&root, &catalog, render_config),

        Commands::Preview { file, mime } => {
            crate::preview::run_preview(&root, &file, mime.as_deref(), render_config)
        }
    }
}
