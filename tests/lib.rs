//! Shared fixtures for sectorscope behaviour tests.

pub use sectorscope_core::{
    DailyObservation, FetchedHistory, HttpObservationStore, HttpResponse, ObservationStore,
    StaticHttpClient, StoreConfig, VolumeAnalysis,
};
pub use std::sync::Arc;

pub const FEED_BASE_URL: &str = "https://feed.example.test";

/// Fourteen consecutive "Tech" days, 2024-01-01 through 2024-01-14.
pub const TECH_VOLUMES: [f64; 14] = [
    100.0, 110.0, 121.0, 90.0, 95.0, 140.0, 150.0, 160.0, 130.0, 125.0, 170.0, 180.0, 190.0, 200.0,
];

pub fn daily_feed(sector: &str, volumes: &[f64]) -> Vec<DailyObservation> {
    volumes
        .iter()
        .enumerate()
        .map(|(day, volume)| {
            DailyObservation::new(sector, format!("2024-01-{:02}", day + 1)).with_volume(*volume)
        })
        .collect()
}

pub fn tech_feed() -> Vec<DailyObservation> {
    daily_feed("Tech", &TECH_VOLUMES)
}

/// Three "Banks" days, each tagged High Bullish Momentum listing {A, B}.
pub fn banks_signal_days() -> Vec<DailyObservation> {
    (12..=14)
        .map(|day| {
            DailyObservation::new("Banks", format!("2024-01-{day:02}"))
                .with_volume(1_000.0)
                .with_symbols(["A", "B"])
                .with_analysis(VolumeAnalysis::HighBullishMomentum)
        })
        .collect()
}

/// Serialize records into the upstream `{"data": [...]}` payload shape.
pub fn history_payload(observations: &[DailyObservation]) -> String {
    serde_json::json!({ "data": observations }).to_string()
}

pub fn history_url() -> String {
    format!("{FEED_BASE_URL}/sector-daily-history")
}

/// HTTP store wired to a canned transport.
pub fn http_store(client: StaticHttpClient) -> (HttpObservationStore, Arc<StaticHttpClient>) {
    let client = Arc::new(client);
    let config = StoreConfig::default()
        .with_api_url(FEED_BASE_URL)
        .expect("fixture url is valid");
    (HttpObservationStore::new(config, client.clone()), client)
}
