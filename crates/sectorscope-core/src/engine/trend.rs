//! Categorical trend classification.
//!
//! Rules are evaluated in table order; the first match wins and anything
//! unmatched is [`TrendLabel::Neutral`]. A z-score without moving-average
//! confirmation (e.g. `0 < z <= 1` with `ma_short <= ma_long`) is Neutral.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Trend category for one day of a sector series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendLabel {
    #[serde(rename = "Strong Uptrend")]
    StrongUptrend,
    #[serde(rename = "Weak Uptrend")]
    WeakUptrend,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Weak Downtrend")]
    WeakDowntrend,
    #[serde(rename = "Strong Downtrend")]
    StrongDowntrend,
}

impl TrendLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongUptrend => "Strong Uptrend",
            Self::WeakUptrend => "Weak Uptrend",
            Self::Neutral => "Neutral",
            Self::WeakDowntrend => "Weak Downtrend",
            Self::StrongDowntrend => "Strong Downtrend",
        }
    }
}

impl Display for TrendLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs of a single classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendInputs {
    pub z: f64,
    pub ma_short: f64,
    pub ma_long: f64,
}

impl TrendInputs {
    pub const fn new(z: f64, ma_short: f64, ma_long: f64) -> Self {
        Self {
            z,
            ma_short,
            ma_long,
        }
    }

    fn short_above_long(&self) -> bool {
        self.ma_short > self.ma_long
    }
}

/// One `(predicate, label)` entry of the classifier.
#[derive(Debug, Clone, Copy)]
pub struct TrendRule {
    pub label: TrendLabel,
    predicate: fn(&TrendInputs) -> bool,
}

impl TrendRule {
    pub fn matches(&self, inputs: &TrendInputs) -> bool {
        (self.predicate)(inputs)
    }
}

pub const TREND_RULES: [TrendRule; 5] = [
    TrendRule {
        label: TrendLabel::StrongUptrend,
        predicate: strong_uptrend,
    },
    TrendRule {
        label: TrendLabel::WeakUptrend,
        predicate: weak_uptrend,
    },
    TrendRule {
        label: TrendLabel::Neutral,
        predicate: neutral_band,
    },
    TrendRule {
        label: TrendLabel::WeakDowntrend,
        predicate: weak_downtrend,
    },
    TrendRule {
        label: TrendLabel::StrongDowntrend,
        predicate: strong_downtrend,
    },
];

fn strong_uptrend(i: &TrendInputs) -> bool {
    i.z > 1.0 && i.short_above_long()
}

fn weak_uptrend(i: &TrendInputs) -> bool {
    i.z > 0.0 && i.z <= 1.0 && i.short_above_long()
}

fn neutral_band(i: &TrendInputs) -> bool {
    (-0.5..=0.5).contains(&i.z)
}

fn weak_downtrend(i: &TrendInputs) -> bool {
    i.z >= -1.0 && i.z < -0.5 && i.ma_short <= i.ma_long
}

fn strong_downtrend(i: &TrendInputs) -> bool {
    i.z < -1.0 && i.ma_short <= i.ma_long
}

/// Index into [`TREND_RULES`] of the first rule that fires, if any.
pub fn matching_rule(inputs: &TrendInputs) -> Option<usize> {
    TREND_RULES.iter().position(|rule| rule.matches(inputs))
}

pub fn classify_trend(z: f64, ma_short: f64, ma_long: f64) -> TrendLabel {
    let inputs = TrendInputs::new(z, ma_short, ma_long);
    matching_rule(&inputs)
        .map(|index| TREND_RULES[index].label)
        .unwrap_or(TrendLabel::Neutral)
}
