//! Observation store trait and implementations.
//!
//! | Store | Source | Sector directory |
//! |-------|--------|------------------|
//! | [`HttpObservationStore`] | `GET {base}/sector-daily-history` | `GET {base}/sectors` |
//! | [`FileObservationStore`] | local JSON file | derived from history |
//! | [`InMemoryObservationStore`] | fixture records | explicit or derived |
//!
//! Every store speaks the same payload shape: `{"data": [record, ...]}`.
//! Records that fail to decode are skipped and counted, never fatal.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{CacheMode, CacheStore, DailyObservation, SectorListing, StoreConfig, ValidationError};

const HISTORY_PATH: &str = "/sector-daily-history";
const SECTORS_PATH: &str = "/sectors";

/// Failure classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    UpstreamFetchFailure,
    MalformedPayload,
}

/// Collaborator failure while fetching the feed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("upstream answered status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },
    #[error("transport failure: {message}")]
    Transport { message: String },
    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },
}

impl StoreError {
    pub const fn kind(&self) -> StoreErrorKind {
        match self {
            Self::UpstreamStatus { .. } | Self::Transport { .. } => {
                StoreErrorKind::UpstreamFetchFailure
            }
            Self::MalformedPayload { .. } => StoreErrorKind::MalformedPayload,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::UpstreamStatus { .. } => "store.upstream_failure",
            Self::Transport { .. } => "store.transport",
            Self::MalformedPayload { .. } => "store.malformed_payload",
        }
    }

    /// Whether retrying the same fetch later could succeed.
    pub const fn retryable(&self) -> bool {
        match self {
            Self::UpstreamStatus { status, .. } => *status >= 500 || *status == 429,
            Self::Transport { .. } => true,
            Self::MalformedPayload { .. } => false,
        }
    }

    fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }
}

/// Decoded feed plus bookkeeping about how it was obtained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedHistory {
    pub observations: Vec<DailyObservation>,
    /// Records present in the payload that could not be decoded.
    pub skipped_records: usize,
    pub cache_hit: bool,
}

/// Source of the daily sector feed.
pub trait ObservationStore: Send + Sync {
    /// Short label naming where data comes from, reported in envelope metadata.
    fn describe(&self) -> String;

    /// Fetch the full daily history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the source is unreachable, answers with a
    /// non-success status, or the payload has no `data` array.
    fn fetch_history<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedHistory, StoreError>> + Send + 'a>>;

    /// Fetch the sector directory.
    fn fetch_sectors<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SectorListing>, StoreError>> + Send + 'a>>;
}

/// Decode a `{"data": [...]}` history payload.
///
/// Returns the decoded records and the number of records skipped.
pub fn parse_history_payload(body: &str) -> Result<(Vec<DailyObservation>, usize), StoreError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| StoreError::malformed(format!("payload is not JSON: {e}")))?;
    let Value::Object(mut root) = root else {
        return Err(StoreError::malformed("payload is not a JSON object"));
    };
    let Some(Value::Array(records)) = root.remove("data") else {
        return Err(StoreError::malformed("payload has no `data` array"));
    };

    debug!(sample = ?records.iter().take(3).collect::<Vec<_>>(), "history payload sample");

    let total = records.len();
    let observations: Vec<DailyObservation> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect();
    let skipped = total - observations.len();
    if skipped > 0 {
        warn!(skipped, total, "skipped undecodable history records");
    }
    Ok((observations, skipped))
}

/// Decode a `{"sectors": [...]}` directory payload.
pub fn parse_sectors_payload(body: &str) -> Result<Vec<SectorListing>, StoreError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| StoreError::malformed(format!("payload is not JSON: {e}")))?;
    let Value::Object(mut root) = root else {
        return Err(StoreError::malformed("payload is not a JSON object"));
    };
    let Some(Value::Array(entries)) = root.remove("sectors") else {
        return Err(StoreError::malformed("payload has no `sectors` array"));
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// Sector directory reconstructed from the feed: every sector seen, with
/// the union of symbols listed on its records.
pub fn sectors_from_history(observations: &[DailyObservation]) -> Vec<SectorListing> {
    let mut directory: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for observation in observations {
        if observation.sector.trim().is_empty() {
            continue;
        }
        let codes = directory.entry(observation.sector.as_str()).or_default();
        if let Some(symbols) = &observation.symbols {
            codes.extend(symbols.iter().map(String::as_str));
        }
    }
    directory
        .into_iter()
        .map(|(sector, codes)| SectorListing {
            sector: sector.to_owned(),
            codes: codes.into_iter().map(str::to_owned).collect(),
        })
        .collect()
}

/// Store backed by the upstream REST API.
#[derive(Clone)]
pub struct HttpObservationStore {
    config: StoreConfig,
    http_client: Arc<dyn HttpClient>,
    cache: CacheStore,
    cache_mode: CacheMode,
}

impl std::fmt::Debug for HttpObservationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpObservationStore")
            .field("config", &self.config)
            .field("cache_mode", &self.cache_mode)
            .finish_non_exhaustive()
    }
}

impl HttpObservationStore {
    pub fn new(config: StoreConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let cache = CacheStore::new(config.cache_ttl);
        Self {
            config,
            http_client,
            cache,
            cache_mode: CacheMode::Use,
        }
    }

    /// Production store configured from `SECTORSCOPE_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Ok(Self::new(
            StoreConfig::from_env()?,
            Arc::new(ReqwestHttpClient::new()),
        ))
    }

    pub fn with_cache(mut self, cache: CacheStore) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_cache_mode(mut self, cache_mode: CacheMode) -> Self {
        self.cache_mode = cache_mode;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Body for `path`, from cache when allowed. Returns the URL, the body
    /// and whether it came from cache.
    async fn fetch_body(&self, path: &str) -> Result<(String, String, bool), StoreError> {
        let url = self.config.endpoint(path);

        if self.cache_mode.reads() {
            if let Some(body) = self.cache.get(&url).await {
                debug!(%url, "serving payload from cache");
                return Ok((url, body, true));
            }
        }

        let request = HttpRequest::get(url.as_str())
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| StoreError::Transport {
                message: e.message().to_owned(),
            })?;

        if !response.is_success() {
            warn!(%url, status = response.status, "upstream returned an error status");
            return Err(StoreError::UpstreamStatus {
                status: response.status,
                url,
            });
        }
        Ok((url, response.body, false))
    }

    /// Cache a payload that decoded successfully.
    async fn remember(&self, url: String, body: String, cache_hit: bool) {
        if !cache_hit && self.cache_mode.writes() {
            self.cache.put(url, body).await;
        }
    }
}

impl ObservationStore for HttpObservationStore {
    fn describe(&self) -> String {
        self.config.api_url.clone()
    }

    fn fetch_history<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedHistory, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            let (url, body, cache_hit) = self.fetch_body(HISTORY_PATH).await?;
            let (observations, skipped_records) = parse_history_payload(&body)?;
            self.remember(url, body, cache_hit).await;

            info!(
                records = observations.len(),
                skipped_records,
                cache_hit,
                "fetched sector history"
            );
            Ok(FetchedHistory {
                observations,
                skipped_records,
                cache_hit,
            })
        })
    }

    fn fetch_sectors<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SectorListing>, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            let (url, body, cache_hit) = self.fetch_body(SECTORS_PATH).await?;
            let sectors = parse_sectors_payload(&body)?;
            self.remember(url, body, cache_hit).await;
            info!(sectors = sectors.len(), cache_hit, "fetched sector directory");
            Ok(sectors)
        })
    }
}

/// Store reading a saved history payload from disk.
#[derive(Debug, Clone)]
pub struct FileObservationStore {
    path: PathBuf,
}

impl FileObservationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<(Vec<DailyObservation>, usize), StoreError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::Transport {
                message: format!("could not read '{}': {e}", self.path.display()),
            })?;
        parse_history_payload(&body)
    }
}

impl ObservationStore for FileObservationStore {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn fetch_history<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedHistory, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            let (observations, skipped_records) = self.read().await?;
            info!(
                path = %self.path.display(),
                records = observations.len(),
                skipped_records,
                "loaded sector history"
            );
            Ok(FetchedHistory {
                observations,
                skipped_records,
                cache_hit: false,
            })
        })
    }

    fn fetch_sectors<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SectorListing>, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            let (observations, _) = self.read().await?;
            Ok(sectors_from_history(&observations))
        })
    }
}

/// Fixture store holding records in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObservationStore {
    observations: Vec<DailyObservation>,
    sectors: Option<Vec<SectorListing>>,
}

impl InMemoryObservationStore {
    pub fn new(observations: Vec<DailyObservation>) -> Self {
        Self {
            observations,
            sectors: None,
        }
    }

    pub fn with_sectors(mut self, sectors: Vec<SectorListing>) -> Self {
        self.sectors = Some(sectors);
        self
    }
}

impl ObservationStore for InMemoryObservationStore {
    fn describe(&self) -> String {
        String::from("memory")
    }

    fn fetch_history<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedHistory, StoreError>> + Send + 'a>> {
        let history = FetchedHistory {
            observations: self.observations.clone(),
            skipped_records: 0,
            cache_hit: false,
        };
        Box::pin(async move { Ok(history) })
    }

    fn fetch_sectors<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SectorListing>, StoreError>> + Send + 'a>> {
        let sectors = self
            .sectors
            .clone()
            .unwrap_or_else(|| sectors_from_history(&self.observations));
        Box::pin(async move { Ok(sectors) })
    }
}
