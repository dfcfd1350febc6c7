//! Per-sector momentum aggregation.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::partition::DailyPoint;
use super::trend::TrendLabel;
use crate::DailyObservation;

/// Look-back horizon of a momentum gain, in trading days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumHorizon {
    ThreeDay,
    FiveDay,
    TenDay,
}

impl MomentumHorizon {
    pub const ALL: [Self; 3] = [Self::ThreeDay, Self::FiveDay, Self::TenDay];

    pub const fn days(self) -> usize {
        match self {
            Self::ThreeDay => 3,
            Self::FiveDay => 5,
            Self::TenDay => 10,
        }
    }
}

/// How the "h days prior" base point is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BaseSelection {
    /// The volume exactly `h` positions before the latest one.
    Fixed,
    /// Walk further back past thin-volume days.
    ///
    /// A base must trade at least `min_volume` and at least `median_floor`
    /// times the upper median of the positive volumes over the last
    /// `lookback` volumes.
    Robust {
        min_volume: f64,
        median_floor: f64,
        lookback: usize,
    },
}

impl BaseSelection {
    pub const fn robust() -> Self {
        Self::Robust {
            min_volume: 1_000.0,
            median_floor: 0.2,
            lookback: 20,
        }
    }
}

impl Default for BaseSelection {
    fn default() -> Self {
        Self::Fixed
    }
}

/// Percentage gains per horizon; `None` when history is insufficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MomentumGains {
    pub three_day: Option<f64>,
    pub five_day: Option<f64>,
    pub ten_day: Option<f64>,
}

impl MomentumGains {
    pub const fn get(&self, horizon: MomentumHorizon) -> Option<f64> {
        match horizon {
            MomentumHorizon::ThreeDay => self.three_day,
            MomentumHorizon::FiveDay => self.five_day,
            MomentumHorizon::TenDay => self.ten_day,
        }
    }
}

/// Momentum figures of one sector over the selected window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorMomentumSummary {
    pub sector: String,
    /// Latest day's volume.
    pub current_momentum: Option<f64>,
    pub gains: MomentumGains,
    /// Distinct symbols seen on signal-tagged records.
    pub bullish_symbols: BTreeSet<String>,
    /// Signal-tagged records, repeats included.
    pub signal_events: usize,
    /// Distinct trading days behind the series.
    pub observations: usize,
    pub total_symbols: Option<u64>,
    pub latest_trend: Option<TrendLabel>,
}

impl SectorMomentumSummary {
    /// Reduce one sector's window.
    ///
    /// `records` are the raw records (signal counting); `points` are the
    /// same records folded per date, ascending. Days without a volume drop
    /// out of the momentum figures, so horizons count volume-bearing days.
    pub fn summarize(
        sector: impl Into<String>,
        records: &[&DailyObservation],
        points: &[DailyPoint],
        base: &BaseSelection,
    ) -> Self {
        let (bullish_symbols, signal_events) = collect_signals(records);
        let latest = points.last();
        let volumes = volume_series(points);

        Self {
            sector: sector.into(),
            current_momentum: volumes.last().copied(),
            gains: MomentumGains {
                three_day: momentum_gain(&volumes, MomentumHorizon::ThreeDay.days(), base),
                five_day: momentum_gain(&volumes, MomentumHorizon::FiveDay.days(), base),
                ten_day: momentum_gain(&volumes, MomentumHorizon::TenDay.days(), base),
            },
            bullish_symbols,
            signal_events,
            observations: points.len(),
            total_symbols: latest.and_then(|point| point.total_symbols),
            latest_trend: None,
        }
    }

    pub fn with_latest_trend(mut self, trend: Option<TrendLabel>) -> Self {
        self.latest_trend = trend;
        self
    }
}

/// Union of symbols and count of records carrying a signal tag.
///
/// Records without a symbol list are skipped entirely.
pub fn collect_signals(records: &[&DailyObservation]) -> (BTreeSet<String>, usize) {
    let mut symbols = BTreeSet::new();
    let mut events = 0;
    for record in records {
        let Some(listed) = &record.symbols else {
            continue;
        };
        if record.is_signal() {
            symbols.extend(listed.iter().cloned());
            events += 1;
        }
    }
    (symbols, events)
}

/// Volumes of the days that have one, in date order.
pub fn volume_series(points: &[DailyPoint]) -> Vec<f64> {
    points.iter().filter_map(|point| point.volume).collect()
}

/// Volume change in percent between the latest volume and its base `horizon`
/// volume-bearing trading days back.
pub fn momentum_gain(volumes: &[f64], horizon: usize, base: &BaseSelection) -> Option<f64> {
    if volumes.len() < horizon + 1 {
        return None;
    }
    let current = *volumes.last()?;
    let base_volume = match base {
        BaseSelection::Fixed => volumes[volumes.len() - 1 - horizon],
        BaseSelection::Robust {
            min_volume,
            median_floor,
            lookback,
        } => robust_base(volumes, horizon, *min_volume, *median_floor, *lookback)?,
    };

    if base_volume == 0.0 {
        return None;
    }
    let gain = (current - base_volume) / base_volume * 100.0;
    gain.is_finite().then_some(gain)
}

fn robust_base(
    volumes: &[f64],
    horizon: usize,
    min_volume: f64,
    median_floor: f64,
    lookback: usize,
) -> Option<f64> {
    let start = volumes.len().saturating_sub(lookback);
    let mut recent: Vec<f64> = volumes[start..]
        .iter()
        .copied()
        .filter(|volume| *volume > 0.0)
        .collect();
    if recent.len() < 3 {
        return None;
    }
    recent.sort_by(f64::total_cmp);
    let median = recent[recent.len() / 2];

    volumes[..volumes.len() - horizon]
        .iter()
        .rev()
        .copied()
        .find(|volume| *volume >= min_volume && *volume >= median_floor * median)
}

/// Sort strongest first by the given horizon; missing gains go last.
pub fn rank_by_gain(summaries: &mut [SectorMomentumSummary], horizon: MomentumHorizon) {
    summaries.sort_by(|a, b| match (a.gains.get(horizon), b.gains.get(horizon)) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
