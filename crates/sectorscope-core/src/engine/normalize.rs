//! Volume index rebased to 100 for side-by-side sector charts.

use serde::Serialize;

use super::partition::{fold_daily, partition_by_sector};
use super::signals::median;
use crate::{DailyObservation, TradingDate};

const MIN_POINTS: usize = 5;
const ANOMALY_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub date: TradingDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    pub sector: String,
    pub base_volume: f64,
    pub points: Vec<NormalizedPoint>,
}

/// Rebase each requested sector's volume history to 100.
///
/// Days trading below half the sector's median volume are dropped as
/// anomalies. Sectors left with fewer than five points are omitted, as are
/// sectors that are not in the feed at all.
pub fn normalized_trend(
    observations: &[DailyObservation],
    sectors: &[String],
    end: Option<&TradingDate>,
) -> Vec<NormalizedSeries> {
    let Some(end) = end.or_else(|| observations.iter().map(|o| &o.date).max()) else {
        return Vec::new();
    };

    let in_range: Vec<&DailyObservation> = observations
        .iter()
        .filter(|o| &o.date <= end && sectors.contains(&o.sector))
        .collect();
    let groups = partition_by_sector(&in_range);

    sectors
        .iter()
        .filter_map(|sector| {
            let records = groups.get(sector)?;
            let history: Vec<(TradingDate, f64)> = fold_daily(records)
                .into_iter()
                .filter_map(|point| point.volume.map(|volume| (point.date, volume)))
                .collect();
            rebase(sector, history)
        })
        .collect()
}

fn rebase(sector: &str, history: Vec<(TradingDate, f64)>) -> Option<NormalizedSeries> {
    if history.len() < MIN_POINTS {
        return None;
    }
    let volumes: Vec<f64> = history.iter().map(|(_, volume)| *volume).collect();
    let floor = ANOMALY_FLOOR * median(&volumes)?;

    let kept: Vec<(TradingDate, f64)> = history
        .into_iter()
        .filter(|(_, volume)| *volume >= floor)
        .collect();
    if kept.len() < MIN_POINTS {
        return None;
    }

    let base_volume = kept[0].1;
    if base_volume == 0.0 {
        return None;
    }

    Some(NormalizedSeries {
        sector: sector.to_owned(),
        base_volume,
        points: kept
            .into_iter()
            .map(|(date, volume)| NormalizedPoint {
                date,
                value: volume / base_volume * 100.0,
            })
            .collect(),
    })
}
