mod analyze;
mod board;
mod normalized;
mod sectors;

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use sectorscope_core::{
    CacheStore, Envelope, EnvelopeError, EnvelopeMeta, FetchedHistory, FileObservationStore,
    HttpClient, HttpObservationStore, ObservationStore, ReqwestHttpClient, StoreConfig, StoreError,
};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
    pub cache_hit: bool,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            latency_ms: 0,
            cache_hit: false,
        }
    }

    /// Empty result carrying the store failure as an envelope error.
    pub fn store_failure(error: &StoreError, latency_ms: u64) -> Result<Self, CliError> {
        warn!(code = error.code(), %error, "feed fetch failed");
        let envelope_error =
            EnvelopeError::new(error.code(), error.to_string())?.with_retryable(error.retryable());
        Ok(Self::ok(Value::Null)
            .with_errors(vec![envelope_error])
            .with_latency(latency_ms))
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_cache_hit(mut self, cache_hit: bool) -> Self {
        self.cache_hit = cache_hit;
        self
    }

    /// Latency, cache flag and skipped-record warning of a history fetch.
    pub fn with_history(self, history: &FetchedHistory, latency_ms: u64) -> Self {
        let result = self
            .with_latency(latency_ms)
            .with_cache_hit(history.cache_hit);
        if history.skipped_records > 0 {
            result.with_warning(format!(
                "skipped {} feed records that could not be decoded",
                history.skipped_records
            ))
        } else {
            result
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let store = build_store(cli)?;
    run_with_store(cli, store.as_ref()).await
}

pub async fn run_with_store(
    cli: &Cli,
    store: &dyn ObservationStore,
) -> Result<Envelope<Value>, CliError> {
    debug!(upstream = %store.describe(), command = ?cli.command, "running command");

    let command_result = match &cli.command {
        Command::Analyze(args) => analyze::run(args, store).await?,
        Command::Board(args) => board::run(args, store).await?,
        Command::Normalized(args) => normalized::run(args, store).await?,
        Command::Sectors => sectors::run(store).await?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
        latency_ms,
        cache_hit,
    } = command_result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        store.describe(),
        latency_ms,
        cache_hit,
    )?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

fn build_store(cli: &Cli) -> Result<Box<dyn ObservationStore>, CliError> {
    if let Some(path) = &cli.input {
        return Ok(Box::new(FileObservationStore::new(path)));
    }

    let mut config = StoreConfig::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url)?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    Ok(Box::new(http_store(config, Arc::new(ReqwestHttpClient::new()))))
}

/// One fetch per process leaves nothing for a payload cache to reuse.
fn http_store(config: StoreConfig, client: Arc<dyn HttpClient>) -> HttpObservationStore {
    HttpObservationStore::new(config, client).with_cache(CacheStore::disabled())
}

/// Await a store call and report how long it took.
async fn timed<T, F>(fetch: F) -> (Result<T, StoreError>, u64)
where
    F: Future<Output = Result<T, StoreError>>,
{
    let started = Instant::now();
    let outcome = fetch.await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    (outcome, latency_ms)
}
