//! Flat record views handed to presentation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{DailyObservation, TradingDate, VolumeAnalysis};

/// Minimally reduced per-record view, no derived signals attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRow {
    pub date: TradingDate,
    pub sector: String,
    pub volume: Option<f64>,
    pub turnover: Option<f64>,
    pub bullish_symbols: Option<u64>,
    pub total_symbols: Option<u64>,
}

impl From<&DailyObservation> for SnapshotRow {
    fn from(observation: &DailyObservation) -> Self {
        Self {
            date: observation.date.clone(),
            sector: observation.sector.clone(),
            volume: observation.volume,
            turnover: observation.turnover,
            bullish_symbols: observation.bullish_symbols,
            total_symbols: observation.total_symbols,
        }
    }
}

/// Snapshot rows ordered by date; same-day rows keep feed order.
pub fn snapshot_rows(observations: &[&DailyObservation]) -> Vec<SnapshotRow> {
    let mut rows: Vec<SnapshotRow> = observations.iter().map(|o| SnapshotRow::from(*o)).collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date));
    rows
}

/// One point of a sector's bullish-volume progression chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionPoint {
    pub date: TradingDate,
    pub volume: f64,
}

/// Raw volume of a sector's `Bullish Momentum` records, ascending by date.
pub fn bullish_progression(observations: &[DailyObservation], sector: &str) -> Vec<ProgressionPoint> {
    let mut points: Vec<ProgressionPoint> = observations
        .iter()
        .filter(|o| o.sector == sector && o.has_analysis(&VolumeAnalysis::BullishMomentum))
        .filter_map(|o| {
            o.volume.map(|volume| ProgressionPoint {
                date: o.date.clone(),
                volume,
            })
        })
        .collect();
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}

/// Column of the momentum board to order by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardColumn {
    #[default]
    Sector,
    WeeklyMomentum,
    MonthlyMomentum,
    ThreeMonthMomentum,
}

/// Latest-date period momentum of one sector record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardRow {
    pub date: TradingDate,
    pub sector: String,
    pub weekly_momentum: Option<f64>,
    pub monthly_momentum: Option<f64>,
    pub three_month_momentum: Option<f64>,
}

impl BoardRow {
    fn value(&self, column: BoardColumn) -> Option<f64> {
        match column {
            BoardColumn::Sector => None,
            BoardColumn::WeeklyMomentum => self.weekly_momentum,
            BoardColumn::MonthlyMomentum => self.monthly_momentum,
            BoardColumn::ThreeMonthMomentum => self.three_month_momentum,
        }
    }
}

/// Records of the greatest date in the feed, ordered by `column`.
///
/// Missing values sort last in either direction.
pub fn momentum_board(
    observations: &[DailyObservation],
    column: BoardColumn,
    descending: bool,
) -> Vec<BoardRow> {
    let Some(latest) = observations.iter().map(|o| &o.date).max() else {
        return Vec::new();
    };

    let mut rows: Vec<BoardRow> = observations
        .iter()
        .filter(|o| &o.date == latest)
        .map(|o| BoardRow {
            date: o.date.clone(),
            sector: o.sector.clone(),
            weekly_momentum: o.weekly_momentum,
            monthly_momentum: o.monthly_momentum,
            three_month_momentum: o.three_month_momentum,
        })
        .collect();

    rows.sort_by(|a, b| {
        if column == BoardColumn::Sector {
            let ordering = a.sector.cmp(&b.sector);
            return if descending { ordering.reverse() } else { ordering };
        }
        match (a.value(column), b.value(column)) {
            (Some(x), Some(y)) => {
                let ordering = x.total_cmp(&y);
                if descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    rows
}
