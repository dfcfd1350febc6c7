//! # Sectorscope Core
//!
//! Sector trend and momentum analytics over a daily per-sector feed.
//!
//! ## Overview
//!
//! - **Domain models** for raw feed records and the sector directory
//! - **Analytics engine** that windows, groups and reduces the feed into
//!   moving averages, z-scores, trend labels and multi-horizon momentum
//! - **Observation stores** that fetch the feed over HTTP, from a file or
//!   from memory
//! - **Response envelope** with metadata and structured errors
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | TTL cache for upstream payloads |
//! | [`config`] | Engine and store configuration |
//! | [`domain`] | Feed records, trading dates, analysis tags |
//! | [`engine`] | Windowing, series math, trend and momentum |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`store`] | Observation store trait and implementations |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ ObservationStore│────▶│ HttpClient       │
//! │ (http/file/mem) │     │ + CacheStore     │
//! └────────┬────────┘     └──────────────────┘
//!          │ Vec<DailyObservation>
//!          ▼
//! ┌─────────────────┐
//! │ SectorEngine    │
//! └────────┬────────┘
//!          │ Analysis / TrendReport
//!          ▼
//! ┌─────────────────┐
//! │ Envelope        │
//! └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sectorscope_core::{AnalysisRequest, HttpObservationStore, ObservationStore, SectorEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = HttpObservationStore::from_env()?;
//!     let history = store.fetch_history().await?;
//!
//!     let engine = SectorEngine::default();
//!     let analysis = engine.analyze(&history.observations, &AnalysisRequest::trailing());
//!     println!("{}", serde_json::to_string_pretty(&analysis)?);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod domain;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod store;

// Caching
pub use cache::{CacheMode, CacheStore};

// Configuration
pub use config::{EngineConfig, StoreConfig};

// Domain models
pub use domain::{DailyObservation, SectorListing, TradingDate, VolumeAnalysis};

// Engine
pub use engine::{
    bullish_progression, classify_trend, momentum_board, normalized_trend, rank_by_gain,
    Analysis, AnalysisRequest, BaseSelection, BoardColumn, BoardRow, DailyPoint, GapPolicy,
    Metric, MomentumGains, MomentumHorizon, NormalizedPoint, NormalizedSeries, ProgressionPoint,
    SectorEngine, SectorMomentumSummary, SectorSeries, SnapshotRow, TrendLabel, TrendReport,
    WindowSelection, WindowedAverage,
};

// Envelope types
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    StaticHttpClient,
};

// Stores
pub use store::{
    FetchedHistory, FileObservationStore, HttpObservationStore, InMemoryObservationStore,
    ObservationStore, StoreError, StoreErrorKind,
};
