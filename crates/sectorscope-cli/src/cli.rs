//! CLI argument definitions for sectorscope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Single-date snapshot or trailing-window trend report |
//! | `board` | Latest-date period momentum, sortable |
//! | `normalized` | Volume history rebased to 100 for chosen sectors |
//! | `sectors` | Sector directory |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--api-url` | env / built-in | Upstream base URL |
//! | `--timeout-ms` | env / `3000` | Request timeout in ms |
//! | `--input` | none | Read the feed from a saved JSON file |
//!
//! # Examples
//!
//! ```bash
//! # Trend report over the last 11 trading dates, ranked by 10-day gain
//! sectorscope analyze --rank-by ten-day --pretty
//!
//! # One sector with its full series and progression chart data
//! sectorscope analyze --sector Banks --ma-window 5
//!
//! # Snapshot of a single date from a saved payload
//! sectorscope --input history.json analyze --date 2024-03-01
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sectorscope_core::{
    BaseSelection, BoardColumn, EngineConfig, GapPolicy, Metric, MomentumHorizon,
    ValidationError,
};

/// Sector trend and momentum analytics over the daily sector feed.
#[derive(Debug, Parser)]
#[command(name = "sectorscope", author, version)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Upstream base URL; overrides SECTORSCOPE_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout budget in milliseconds; overrides SECTORSCOPE_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Read the feed from a saved `{"data": [...]}` file instead of the API.
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary for terminals.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Snapshot a single date, or report momentum over the trailing window.
    ///
    /// # Examples
    ///
    ///   sectorscope analyze
    ///   sectorscope analyze --date 2024-03-01
    ///   sectorscope analyze --sector Banks --metric turnover
    Analyze(AnalyzeArgs),

    /// Latest-date weekly, monthly and three-month momentum per sector.
    ///
    /// # Examples
    ///
    ///   sectorscope board --sort monthly-momentum --desc
    Board(BoardArgs),

    /// Volume history rebased to 100 for side-by-side comparison.
    ///
    /// # Examples
    ///
    ///   sectorscope normalized --sector Banks --sector Telecom
    Normalized(NormalizedArgs),

    /// List sectors and their symbols.
    Sectors,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Trading date (YYYY-MM-DD) to snapshot; omit for the trailing window.
    #[arg(long)]
    pub date: Option<String>,

    /// Attach the full series and bullish progression of this sector.
    #[arg(long)]
    pub sector: Option<String>,

    /// Order momentum summaries by this horizon, strongest first.
    #[arg(long, value_enum)]
    pub rank_by: Option<HorizonArg>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Tunables forwarded to the analytics engine.
#[derive(Debug, Args)]
pub struct EngineArgs {
    /// Distinct trading dates kept in the trailing window.
    #[arg(long, default_value_t = sectorscope_core::config::DEFAULT_LOOKBACK_DATES)]
    pub lookback_dates: usize,

    /// Extra simple moving average window reported on the series.
    #[arg(long)]
    pub ma_window: Option<usize>,

    /// Series metric.
    #[arg(long, value_enum, default_value_t = MetricArg::Volume)]
    pub metric: MetricArg,

    /// Walk momentum bases back past thin-volume days.
    #[arg(long, default_value_t = false)]
    pub robust_base: bool,

    /// Leave moving averages undefined when their window has a gap.
    #[arg(long, default_value_t = false)]
    pub strict_gaps: bool,
}

impl EngineArgs {
    pub fn to_config(&self) -> Result<EngineConfig, ValidationError> {
        let mut config = EngineConfig::default()
            .with_lookback_dates(self.lookback_dates)
            .with_metric(self.metric.into());
        if let Some(window) = self.ma_window {
            config = config.with_custom_window(window);
        }
        if self.robust_base {
            config = config.with_base_selection(BaseSelection::robust());
        }
        if self.strict_gaps {
            config = config.with_gap_policy(GapPolicy::Propagate);
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    Volume,
    Turnover,
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Volume => Metric::Volume,
            MetricArg::Turnover => Metric::Turnover,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HorizonArg {
    ThreeDay,
    FiveDay,
    TenDay,
}

impl From<HorizonArg> for MomentumHorizon {
    fn from(value: HorizonArg) -> Self {
        match value {
            HorizonArg::ThreeDay => MomentumHorizon::ThreeDay,
            HorizonArg::FiveDay => MomentumHorizon::FiveDay,
            HorizonArg::TenDay => MomentumHorizon::TenDay,
        }
    }
}

#[derive(Debug, Args)]
pub struct BoardArgs {
    /// Column to sort by.
    #[arg(long, value_enum, default_value_t = BoardSort::Sector)]
    pub sort: BoardSort,

    /// Sort descending; missing values stay last.
    #[arg(long, default_value_t = false)]
    pub desc: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoardSort {
    Sector,
    WeeklyMomentum,
    MonthlyMomentum,
    ThreeMonthMomentum,
}

impl From<BoardSort> for BoardColumn {
    fn from(value: BoardSort) -> Self {
        match value {
            BoardSort::Sector => BoardColumn::Sector,
            BoardSort::WeeklyMomentum => BoardColumn::WeeklyMomentum,
            BoardSort::MonthlyMomentum => BoardColumn::MonthlyMomentum,
            BoardSort::ThreeMonthMomentum => BoardColumn::ThreeMonthMomentum,
        }
    }
}

#[derive(Debug, Args)]
pub struct NormalizedArgs {
    /// Sector to include; repeat for several.
    #[arg(long = "sector", required = true, num_args = 1)]
    pub sectors: Vec<String>,

    /// Last trading date (YYYY-MM-DD) to include; defaults to the latest in the feed.
    #[arg(long)]
    pub end_date: Option<String>,
}
