//! # Domain Models
//!
//! Feed-level types consumed by the analytics engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DailyObservation`] | One sector's record for one trading date |
//! | [`VolumeAnalysis`] | Open set of upstream momentum tags |
//! | [`TradingDate`] | Raw ISO date, ordered lexicographically |
//! | [`SectorListing`] | Sector directory entry |
//!
//! Observations are value objects: the engine never mutates its input and
//! never validates calendar correctness of feed dates.

mod observation;
mod trading_date;

pub use observation::{DailyObservation, SectorListing, VolumeAnalysis};
pub use trading_date::TradingDate;
