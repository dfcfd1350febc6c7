use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Trading-day date as delivered by the observation feed.
///
/// The engine keeps the raw text and orders it lexicographically, which is
/// chronological for ISO 8601 dates. Nothing on the computation path checks
/// calendar validity; [`TradingDate::parse_iso`] is for request boundaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradingDate(String);

impl TradingDate {
    /// Wrap a raw feed value without interpreting it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse a user-supplied `YYYY-MM-DD` date, rejecting anything else.
    pub fn parse_iso(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        Date::parse(trimmed, ISO_DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
            value: input.to_owned(),
        })?;

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TradingDate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TradingDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}
