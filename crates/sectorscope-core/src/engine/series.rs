//! Per-sector time series with derived signals.

use serde::{Deserialize, Serialize};

use super::partition::DailyPoint;
use super::signals::{
    daily_percent_change, moving_average_ignoring_gaps, simple_moving_average, z_scores,
};
use super::trend::{classify_trend, TrendLabel};
use crate::{EngineConfig, TradingDate};

/// Which daily figure a series is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Volume,
    Turnover,
}

impl Metric {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Turnover => "turnover",
        }
    }

    fn read(self, point: &DailyPoint) -> Option<f64> {
        match self {
            Self::Volume => point.volume,
            Self::Turnover => point.turnover,
        }
    }
}

/// How moving averages over the metric treat missing days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Average the valid entries of each full window.
    #[default]
    Skip,
    /// Any missing entry makes the window's average missing.
    Propagate,
}

/// Moving average reported for an extra, caller-chosen window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowedAverage {
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

/// Time-ordered metric series of one sector plus its derived arrays.
///
/// Every array has one entry per date in `dates`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorSeries {
    pub sector: String,
    pub metric: Metric,
    pub dates: Vec<TradingDate>,
    pub values: Vec<Option<f64>>,
    pub pct_change: Vec<Option<f64>>,
    /// Gap-ignoring short-window average of `pct_change`.
    pub pct_change_ma: Vec<Option<f64>>,
    pub ma_short: Vec<Option<f64>>,
    pub ma_long: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_ma: Option<WindowedAverage>,
    pub z_scores: Vec<Option<f64>>,
    pub trends: Vec<Option<TrendLabel>>,
}

impl SectorSeries {
    pub fn from_points(sector: impl Into<String>, points: &[DailyPoint], config: &EngineConfig) -> Self {
        let metric = config.metric;
        let dates: Vec<TradingDate> = points.iter().map(|point| point.date.clone()).collect();
        let values: Vec<Option<f64>> = points.iter().map(|point| metric.read(point)).collect();

        let average = |window: usize| match config.gap_policy {
            GapPolicy::Skip => moving_average_ignoring_gaps(&values, window),
            GapPolicy::Propagate => simple_moving_average(&values, window),
        };

        let pct_change = daily_percent_change(&values);
        let pct_change_ma = moving_average_ignoring_gaps(&pct_change, config.short_window);
        let ma_short = average(config.short_window);
        let ma_long = average(config.long_window);
        let custom_ma = config.custom_window.map(|window| WindowedAverage {
            window,
            values: average(window),
        });
        let z_scores = z_scores(&values);

        let trends = z_scores
            .iter()
            .zip(ma_short.iter().zip(ma_long.iter()))
            .map(|(z, (short, long))| match (z, short, long) {
                (Some(z), Some(short), Some(long)) => Some(classify_trend(*z, *short, *long)),
                _ => None,
            })
            .collect();

        Self {
            sector: sector.into(),
            metric,
            dates,
            values,
            pct_change,
            pct_change_ma,
            ma_short,
            ma_long,
            custom_ma,
            z_scores,
            trends,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Label of the most recent day, when it could be classified.
    pub fn latest_trend(&self) -> Option<TrendLabel> {
        self.trends.last().copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::partition::fold_daily;
    use crate::DailyObservation;

    fn points(volumes: &[Option<f64>]) -> Vec<DailyPoint> {
        let feed: Vec<DailyObservation> = volumes
            .iter()
            .enumerate()
            .map(|(day, volume)| {
                let mut observation =
                    DailyObservation::new("Tech", format!("2024-01-{:02}", day + 1));
                observation.volume = *volume;
                observation.turnover = volume.map(|v| v * 2.0);
                observation
            })
            .collect();
        let refs: Vec<&DailyObservation> = feed.iter().collect();
        fold_daily(&refs)
    }

    #[test]
    fn arrays_share_the_series_length() {
        let series = SectorSeries::from_points(
            "Tech",
            &points(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            &EngineConfig::default().with_custom_window(2),
        );

        assert_eq!(series.len(), 4);
        for array in [
            &series.values,
            &series.pct_change,
            &series.pct_change_ma,
            &series.ma_short,
            &series.ma_long,
            &series.z_scores,
        ] {
            assert_eq!(array.len(), 4);
        }
        assert_eq!(series.trends.len(), 4);
        assert_eq!(series.custom_ma.as_ref().map(|ma| ma.values.len()), Some(4));
    }

    #[test]
    fn trends_need_a_long_window() {
        let volumes: Vec<Option<f64>> = (1..=9).map(|v| Some(v as f64)).collect();
        let series = SectorSeries::from_points("Tech", &points(&volumes), &EngineConfig::default());

        assert!(series.ma_long.iter().all(Option::is_none));
        assert!(series.trends.iter().all(Option::is_none));
        assert_eq!(series.latest_trend(), None);
    }

    #[test]
    fn rising_series_ends_in_strong_uptrend() {
        let volumes: Vec<Option<f64>> = (1..=12).map(|v| Some((v * v) as f64)).collect();
        let series = SectorSeries::from_points("Tech", &points(&volumes), &EngineConfig::default());

        assert_eq!(series.latest_trend(), Some(TrendLabel::StrongUptrend));
    }

    #[test]
    fn turnover_metric_reads_turnover() {
        let config = EngineConfig::default().with_metric(Metric::Turnover);
        let series = SectorSeries::from_points("Tech", &points(&[Some(1.0), Some(3.0)]), &config);
        assert_eq!(series.values, vec![Some(2.0), Some(6.0)]);
    }

    #[test]
    fn gap_policy_controls_value_averages() {
        let gappy = points(&[Some(2.0), None, Some(4.0)]);

        let skip = SectorSeries::from_points("Tech", &gappy, &EngineConfig::default());
        assert_eq!(skip.ma_short[2], Some(3.0));

        let strict = SectorSeries::from_points(
            "Tech",
            &gappy,
            &EngineConfig::default().with_gap_policy(GapPolicy::Propagate),
        );
        assert_eq!(strict.ma_short[2], None);
    }
}
