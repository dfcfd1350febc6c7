//! # Sector Analytics Engine
//!
//! Pure, synchronous computation over an in-memory observation feed.
//!
//! ```text
//! feed ─▶ select_window ─▶ partition_by_sector ─▶ fold_daily ─┬─▶ SectorSeries
//!                                                             └─▶ SectorMomentumSummary
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`partition`] | Date-window selection, sector grouping, per-day folding |
//! | [`signals`] | Percent change, moving averages, z-scores |
//! | [`trend`] | Ordered rule table for trend labels |
//! | [`series`] | Per-sector series with derived arrays |
//! | [`momentum`] | Signal counting and multi-horizon gains |
//! | [`normalize`] | Rebased volume index for charts |
//! | [`views`] | Snapshot rows, bullish progression, momentum board |
//!
//! Nothing in here returns an error: undefined numbers are `None`.

pub mod momentum;
pub mod normalize;
pub mod partition;
pub mod series;
pub mod signals;
pub mod trend;
pub mod views;

use serde::Serialize;

pub use momentum::{
    rank_by_gain, BaseSelection, MomentumGains, MomentumHorizon, SectorMomentumSummary,
};
pub use normalize::{normalized_trend, NormalizedPoint, NormalizedSeries};
pub use partition::{fold_daily, partition_by_sector, select_window, DailyPoint, WindowSelection};
pub use series::{GapPolicy, Metric, SectorSeries, WindowedAverage};
pub use trend::{classify_trend, TrendLabel};
pub use views::{
    bullish_progression, momentum_board, snapshot_rows, BoardColumn, BoardRow, ProgressionPoint,
    SnapshotRow,
};

use crate::{DailyObservation, EngineConfig, TradingDate, ValidationError};

/// Request parameters accepted at the analysis boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Single-date mode when set; trailing-window mode otherwise.
    pub date: Option<TradingDate>,
    /// Sector whose full series and progression are attached in window mode.
    pub sector: Option<String>,
}

impl AnalysisRequest {
    pub fn for_date(date: TradingDate) -> Self {
        Self {
            date: Some(date),
            sector: None,
        }
    }

    pub fn trailing() -> Self {
        Self::default()
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Result<Self, ValidationError> {
        let sector = sector.into();
        if sector.trim().is_empty() {
            return Err(ValidationError::EmptySector);
        }
        self.sector = Some(sector);
        Ok(self)
    }
}

/// Window-mode result: per-sector summaries plus optional chart data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub window_dates: Vec<TradingDate>,
    pub rows: Vec<SnapshotRow>,
    pub momentum: Vec<SectorMomentumSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<SectorSeries>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub progression: Vec<ProgressionPoint>,
}

/// Outcome of [`SectorEngine::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Analysis {
    Snapshot { date: TradingDate, rows: Vec<SnapshotRow> },
    Trend(TrendReport),
}

/// Stateless analytics entry point; every call re-derives from its input.
#[derive(Debug, Clone, Default)]
pub struct SectorEngine {
    config: EngineConfig,
}

impl SectorEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn analyze(&self, observations: &[DailyObservation], request: &AnalysisRequest) -> Analysis {
        match &request.date {
            Some(date) => Analysis::Snapshot {
                date: date.clone(),
                rows: self.snapshot(observations, date),
            },
            None => Analysis::Trend(self.trend_report(observations, request.sector.as_deref())),
        }
    }

    /// Records of exactly one date, reduced to [`SnapshotRow`].
    pub fn snapshot(&self, observations: &[DailyObservation], date: &TradingDate) -> Vec<SnapshotRow> {
        let window = select_window(observations, &WindowSelection::Date(date.clone()));
        snapshot_rows(&window.observations)
    }

    /// Trailing-window momentum for every sector present in the window.
    pub fn trend_report(&self, observations: &[DailyObservation], sector: Option<&str>) -> TrendReport {
        let window = select_window(
            observations,
            &WindowSelection::Trailing(self.config.lookback_dates),
        );
        let groups = partition_by_sector(&window.observations);

        let mut series = None;
        let momentum: Vec<SectorMomentumSummary> = groups
            .iter()
            .map(|(name, records)| {
                let points = fold_daily(records);
                let sector_series = SectorSeries::from_points(name.as_str(), &points, &self.config);
                let summary = SectorMomentumSummary::summarize(
                    name.as_str(),
                    records,
                    &points,
                    &self.config.base_selection,
                )
                .with_latest_trend(sector_series.latest_trend());
                if sector == Some(name.as_str()) {
                    series = Some(sector_series);
                }
                summary
            })
            .collect();

        TrendReport {
            window_dates: window.dates,
            rows: snapshot_rows(&window.observations),
            momentum,
            series,
            progression: sector
                .map(|name| bullish_progression(observations, name))
                .unwrap_or_default(),
        }
    }
}
