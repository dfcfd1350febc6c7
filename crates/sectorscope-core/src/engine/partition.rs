//! Date-window selection and per-sector grouping.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{DailyObservation, TradingDate};

/// Which slice of the feed a request looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowSelection {
    /// Exactly the records dated on this day.
    Date(TradingDate),
    /// Records on the most recent `n` distinct dates.
    Trailing(usize),
}

/// Observations chosen for one request.
#[derive(Debug, Clone)]
pub struct Window<'a> {
    /// Distinct dates in the window, ascending.
    pub dates: Vec<TradingDate>,
    pub observations: Vec<&'a DailyObservation>,
}

impl Window<'_> {
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

pub fn select_window<'a>(
    observations: &'a [DailyObservation],
    selection: &WindowSelection,
) -> Window<'a> {
    match selection {
        WindowSelection::Date(date) => {
            let selected: Vec<_> = observations.iter().filter(|o| &o.date == date).collect();
            let dates = if selected.is_empty() {
                Vec::new()
            } else {
                vec![date.clone()]
            };
            Window {
                dates,
                observations: selected,
            }
        }
        WindowSelection::Trailing(count) => {
            let distinct: BTreeSet<&TradingDate> = observations.iter().map(|o| &o.date).collect();
            let keep: BTreeSet<&TradingDate> = distinct.into_iter().rev().take(*count).collect();
            Window {
                dates: keep.iter().map(|date| (*date).clone()).collect(),
                observations: observations
                    .iter()
                    .filter(|o| keep.contains(&o.date))
                    .collect(),
            }
        }
    }
}

/// Group by sector, each group sorted ascending by date.
///
/// Records with a blank sector belong to no group. Sorting is stable, so
/// same-day records keep their feed order.
pub fn partition_by_sector<'a>(
    observations: &[&'a DailyObservation],
) -> BTreeMap<String, Vec<&'a DailyObservation>> {
    let mut groups: BTreeMap<String, Vec<&'a DailyObservation>> = BTreeMap::new();
    for &observation in observations {
        if observation.sector.trim().is_empty() {
            continue;
        }
        groups
            .entry(observation.sector.clone())
            .or_default()
            .push(observation);
    }

    for group in groups.values_mut() {
        group.sort_by(|a, b| a.date.cmp(&b.date));
    }
    groups
}

/// All records of one sector on one date, folded together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: TradingDate,
    pub volume: Option<f64>,
    pub turnover: Option<f64>,
    pub bullish_symbols: Option<u64>,
    pub total_symbols: Option<u64>,
    pub symbols: BTreeSet<String>,
    pub records: usize,
}

impl DailyPoint {
    fn empty(date: TradingDate) -> Self {
        Self {
            date,
            volume: None,
            turnover: None,
            bullish_symbols: None,
            total_symbols: None,
            symbols: BTreeSet::new(),
            records: 0,
        }
    }

    fn absorb(&mut self, observation: &DailyObservation) {
        self.volume = add_present(self.volume, observation.volume.filter(|v| v.is_finite()));
        self.turnover = add_present(
            self.turnover,
            observation.turnover.filter(|v| v.is_finite()),
        );
        self.bullish_symbols = add_count(self.bullish_symbols, observation.bullish_symbols);
        self.total_symbols = add_count(self.total_symbols, observation.total_symbols);
        if let Some(symbols) = &observation.symbols {
            self.symbols.extend(symbols.iter().cloned());
        }
        self.records += 1;
    }
}

/// Fold one sector's records into one point per distinct date, ascending.
pub fn fold_daily(observations: &[&DailyObservation]) -> Vec<DailyPoint> {
    let mut points: BTreeMap<&TradingDate, DailyPoint> = BTreeMap::new();
    for observation in observations {
        points
            .entry(&observation.date)
            .or_insert_with(|| DailyPoint::empty(observation.date.clone()))
            .absorb(observation);
    }
    points.into_values().collect()
}

fn add_present(total: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (total, value) {
        (Some(total), Some(value)) => Some(total + value),
        (None, value) => value,
        (total, None) => total,
    }
}

fn add_count(total: Option<u64>, value: Option<u64>) -> Option<u64> {
    match (total, value) {
        (Some(total), Some(value)) => Some(total.saturating_add(value)),
        (None, value) => value,
        (total, None) => total,
    }
}
