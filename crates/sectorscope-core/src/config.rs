//! Engine and store configuration.
//!
//! | Variable | Default | Used by |
//! |----------|---------|---------|
//! | `SECTORSCOPE_API_URL` | [`DEFAULT_API_URL`] | [`StoreConfig::from_env`] |
//! | `SECTORSCOPE_TIMEOUT_MS` | `3000` | [`StoreConfig::from_env`] |
//! | `SECTORSCOPE_CACHE_TTL_SECS` | `300` | [`StoreConfig::from_env`] |

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::{BaseSelection, GapPolicy, Metric};
use crate::ValidationError;

pub const DEFAULT_API_URL: &str = "https://cse-maverick-be-platform.onrender.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Ten trading days plus the anchor day of the 10-day baseline.
pub const DEFAULT_LOOKBACK_DATES: usize = 11;

/// Tunables of the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub lookback_dates: usize,
    pub short_window: usize,
    pub long_window: usize,
    pub custom_window: Option<usize>,
    pub metric: Metric,
    pub gap_policy: GapPolicy,
    pub base_selection: BaseSelection,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookback_dates: DEFAULT_LOOKBACK_DATES,
            short_window: 3,
            long_window: 10,
            custom_window: None,
            metric: Metric::Volume,
            gap_policy: GapPolicy::Skip,
            base_selection: BaseSelection::Fixed,
        }
    }
}

impl EngineConfig {
    pub fn with_lookback_dates(mut self, lookback_dates: usize) -> Self {
        self.lookback_dates = lookback_dates;
        self
    }

    pub fn with_custom_window(mut self, window: usize) -> Self {
        self.custom_window = Some(window);
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = gap_policy;
        self
    }

    pub fn with_base_selection(mut self, base_selection: BaseSelection) -> Self {
        self.base_selection = base_selection;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lookback_dates == 0 {
            return Err(ValidationError::InvalidLookback);
        }
        let windows = [Some(self.short_window), Some(self.long_window), self.custom_window];
        if windows.into_iter().flatten().any(|window| window == 0) {
            return Err(ValidationError::InvalidWindow);
        }
        Ok(())
    }
}

/// Where and how the observation feed is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub api_url: String,
    pub timeout_ms: u64,
    pub cache_ttl: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: String::from(DEFAULT_API_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ValidationError> {
        let mut config = Self::default();

        if let Ok(url) = env::var("SECTORSCOPE_API_URL") {
            config = config.with_api_url(url)?;
        }
        if let Some(timeout_ms) = read_u64("SECTORSCOPE_TIMEOUT_MS")? {
            config.timeout_ms = timeout_ms;
        }
        if let Some(ttl_secs) = read_u64("SECTORSCOPE_CACHE_TTL_SECS")? {
            config.cache_ttl = Duration::from_secs(ttl_secs);
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ValidationError::InvalidApiUrl { value: url });
        }
        self.api_url = trimmed.to_owned();
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

fn read_u64(name: &'static str) -> Result<Option<u64>, ValidationError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ValidationError::InvalidEnvValue { name, value: raw }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lookback_dates, 11);
    }

    #[test]
    fn zero_windows_are_rejected() {
        let err = EngineConfig::default()
            .with_custom_window(0)
            .validate()
            .expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidWindow);

        let err = EngineConfig::default()
            .with_lookback_dates(0)
            .validate()
            .expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidLookback);
    }

    #[test]
    fn api_url_is_normalized() {
        let config = StoreConfig::default()
            .with_api_url("https://feed.example.test/")
            .expect("valid url");
        assert_eq!(
            config.endpoint("/sector-daily-history"),
            "https://feed.example.test/sector-daily-history"
        );
    }

    #[test]
    fn non_http_api_url_is_rejected() {
        let err = StoreConfig::default()
            .with_api_url("ftp://feed.example.test")
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidApiUrl { .. }));
    }
}
