//! CLI argument definitions for quotespan.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `prices` | Fetch open/close for every day in a range |
//! | `plan` | Show the year partition of a range without fetching |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | public stock search endpoint | Quote service URL |
//! | `--timeout-ms` | `3000` | Per-request HTTP timeout |
//! | `--task-timeout-ms` | `10000` | Per-year task limit, `0` disables |
//! | `--format` | `text` | Row format (text, ndjson) |
//! | `-v` | off | Raise log verbosity (stderr) |
//!
//! # Examples
//!
//! ```bash
//! quotespan prices 1-January-2000 11-January-2000
//! quotespan prices 28-December-1999 2-January-2000 --format ndjson --output prices.ndjson
//! quotespan plan 1-January-1996 31-December-2000
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use quotespan_core::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};

/// Daily open/close prices for a date range, fetched one year at a time.
#[derive(Debug, Parser)]
#[command(
    name = "quotespan",
    author,
    version,
    about = "Daily open/close prices for a date range"
)]
pub struct Cli {
    /// Quote service endpoint; `?date=<year>` is appended per request.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP timeout for one year request in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Upper bound for one year task in milliseconds (0 waits indefinitely).
    #[arg(long, global = true, default_value_t = 10_000)]
    pub task_timeout_ms: u64,

    /// Output format for rows.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<date> <open> <close>` per line.
    Text,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch open/close prices for every day between two dates.
    ///
    /// One request is issued per calendar year in the range, all in parallel.
    /// Rows of one year are printed in date order; years may interleave.
    Prices(PricesArgs),

    /// Print the years a range would fetch and how many days it covers.
    Plan(RangeArgs),
}

/// Inclusive date range in `d-Month-yyyy` form.
#[derive(Debug, Args)]
pub struct RangeArgs {
    /// First day, e.g. 1-January-2000.
    #[arg(default_value = "1-January-2000")]
    pub first_date: String,

    /// Last day, e.g. 11-January-2000.
    #[arg(default_value = "11-January-2000")]
    pub last_date: String,
}

#[derive(Debug, Args)]
pub struct PricesArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Write rows to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the per-year run report as JSON on stderr.
    #[arg(long, default_value_t = false)]
    pub summary: bool,
}
