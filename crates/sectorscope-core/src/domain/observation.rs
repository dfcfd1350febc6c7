use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::TradingDate;

/// Upstream volume-analysis tag attached to a sector record.
///
/// The tag set is open: values the engine does not know are preserved
/// verbatim and never contribute to an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VolumeAnalysis {
    HighBullishMomentum,
    EmergingBullishMomentum,
    BullishMomentum,
    Other(String),
}

impl VolumeAnalysis {
    pub fn as_str(&self) -> &str {
        match self {
            Self::HighBullishMomentum => "High Bullish Momentum",
            Self::EmergingBullishMomentum => "Emerging Bullish Momentum",
            Self::BullishMomentum => "Bullish Momentum",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Tags counted as momentum signal events.
    pub const fn is_signal(&self) -> bool {
        matches!(
            self,
            Self::HighBullishMomentum | Self::EmergingBullishMomentum
        )
    }
}

impl Display for VolumeAnalysis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for VolumeAnalysis {
    fn from(value: String) -> Self {
        match value.as_str() {
            "High Bullish Momentum" => Self::HighBullishMomentum,
            "Emerging Bullish Momentum" => Self::EmergingBullishMomentum,
            "Bullish Momentum" => Self::BullishMomentum,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for VolumeAnalysis {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<VolumeAnalysis> for String {
    fn from(value: VolumeAnalysis) -> Self {
        match value {
            VolumeAnalysis::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// One sector's record for one trading date, as delivered by the feed.
///
/// `(sector, date)` is not unique in the raw feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub sector: String,
    pub date: TradingDate,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub turnover: Option<f64>,
    #[serde(default)]
    pub symbols: Option<Vec<String>>,
    #[serde(default)]
    pub bullish_symbols: Option<u64>,
    #[serde(default)]
    pub total_symbols: Option<u64>,
    #[serde(default)]
    pub volume_analysis: Option<VolumeAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_momentum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_momentum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub three_month_momentum: Option<f64>,
}

impl DailyObservation {
    pub fn new(sector: impl Into<String>, date: impl Into<TradingDate>) -> Self {
        Self {
            sector: sector.into(),
            date: date.into(),
            volume: None,
            turnover: None,
            symbols: None,
            bullish_symbols: None,
            total_symbols: None,
            volume_analysis: None,
            closing_price: None,
            weekly_momentum: None,
            monthly_momentum: None,
            three_month_momentum: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_analysis(mut self, tag: impl Into<VolumeAnalysis>) -> Self {
        self.volume_analysis = Some(tag.into());
        self
    }

    pub fn with_counts(mut self, bullish_symbols: u64, total_symbols: u64) -> Self {
        self.bullish_symbols = Some(bullish_symbols);
        self.total_symbols = Some(total_symbols);
        self
    }

    pub fn with_period_momentum(
        mut self,
        weekly: Option<f64>,
        monthly: Option<f64>,
        three_month: Option<f64>,
    ) -> Self {
        self.weekly_momentum = weekly;
        self.monthly_momentum = monthly;
        self.three_month_momentum = three_month;
        self
    }

    /// True when the record carries one of the two signal tags.
    pub fn is_signal(&self) -> bool {
        self.volume_analysis
            .as_ref()
            .is_some_and(VolumeAnalysis::is_signal)
    }

    pub fn has_analysis(&self, tag: &VolumeAnalysis) -> bool {
        self.volume_analysis.as_ref() == Some(tag)
    }
}

/// Entry of the upstream sector directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorListing {
    pub sector: String,
    #[serde(default, alias = "symbols")]
    pub codes: Vec<String>,
}
