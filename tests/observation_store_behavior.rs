//! Behaviour-driven tests for fetching the sector feed.

use std::io::Write;

use sectorscope_core::{
    CacheMode, FileObservationStore, HttpError, SectorEngine, StoreError, StoreErrorKind,
};
use sectorscope_tests::{
    banks_signal_days, history_payload, history_url, http_store, tech_feed, HttpResponse,
    ObservationStore, StaticHttpClient, FEED_BASE_URL,
};

#[tokio::test]
async fn when_upstream_serves_the_feed_system_analyzes_it_end_to_end() {
    // Given: the upstream serves Tech and Banks history
    let mut feed = tech_feed();
    feed.extend(banks_signal_days());
    let (store, _) = http_store(
        StaticHttpClient::new().with_response(history_url(), HttpResponse::ok_json(history_payload(&feed))),
    );

    // When: the history is fetched and analyzed
    let history = store.fetch_history().await.expect("fetch succeeds");
    let report = SectorEngine::default().trend_report(&history.observations, None);

    // Then: both sectors are summarized from the decoded records
    assert_eq!(history.observations.len(), feed.len());
    assert_eq!(history.skipped_records, 0);
    let sectors: Vec<&str> = report.momentum.iter().map(|s| s.sector.as_str()).collect();
    assert_eq!(sectors, vec!["Banks", "Tech"]);
}

#[tokio::test]
async fn when_upstream_returns_an_error_status_system_surfaces_it() {
    // Given: the upstream answers 500
    let (store, _) = http_store(
        StaticHttpClient::new().with_response(history_url(), HttpResponse::with_status(500, "boom")),
    );

    // When: the history is fetched
    let err = store.fetch_history().await.expect_err("must fail");

    // Then: the failure carries the status, never an empty feed
    assert_eq!(err.kind(), StoreErrorKind::UpstreamFetchFailure);
    assert!(matches!(err, StoreError::UpstreamStatus { status: 500, .. }));
}

#[tokio::test]
async fn when_upstream_is_unreachable_system_reports_a_fetch_failure() {
    let (store, _) = http_store(
        StaticHttpClient::new().with_failure(history_url(), HttpError::new("connection refused")),
    );

    let err = store.fetch_history().await.expect_err("must fail");
    assert_eq!(err.kind(), StoreErrorKind::UpstreamFetchFailure);
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn when_payload_lacks_data_array_system_reports_malformed_payload() {
    // Given: a JSON payload without the `data` array
    let (store, _) = http_store(
        StaticHttpClient::new().with_response(history_url(), HttpResponse::ok_json(r#"{"rows":[]}"#)),
    );

    // When: the history is fetched
    let err = store.fetch_history().await.expect_err("must fail");

    // Then: it is distinguishable from an unreachable upstream
    assert_eq!(err.kind(), StoreErrorKind::MalformedPayload);
}

#[tokio::test]
async fn when_some_records_are_broken_system_skips_and_counts_them() {
    // Given: one good record, one without a sector, one with a text volume
    let body = r#"{"data":[
        {"sector":"Tech","date":"2024-01-01","volume":100,"symbols":null},
        {"date":"2024-01-01","volume":5},
        {"sector":"Banks","date":"2024-01-01","volume":"n/a"}
    ]}"#;
    let (store, _) =
        http_store(StaticHttpClient::new().with_response(history_url(), HttpResponse::ok_json(body)));

    // When: the history is fetched
    let history = store.fetch_history().await.expect("partial data still loads");

    // Then: only the good record survives and the rest are counted
    assert_eq!(history.observations.len(), 1);
    assert_eq!(history.skipped_records, 2);
}

#[tokio::test]
async fn when_cache_is_refreshed_system_refetches_but_keeps_the_payload() {
    // Given: a store that has already cached the feed
    let body = history_payload(&tech_feed());
    let (store, client) =
        http_store(StaticHttpClient::new().with_response(history_url(), HttpResponse::ok_json(body)));
    store.fetch_history().await.expect("warm the cache");

    // When: a refresh fetch runs, then a normal one
    let refreshed = store
        .clone()
        .with_cache_mode(CacheMode::Refresh)
        .fetch_history()
        .await
        .expect("refresh fetch");
    let cached = store.fetch_history().await.expect("cached fetch");

    // Then: the refresh hit upstream and the follow-up was served from cache
    assert!(!refreshed.cache_hit);
    assert!(cached.cache_hit);
    assert_eq!(client.calls().len(), 2);
}

#[tokio::test]
async fn when_the_directory_is_requested_system_reads_the_sectors_endpoint() {
    let body = r#"{"sectors":[{"sector":"Banks","symbols":["COMB.N0000","HNB.N0000"]}]}"#;
    let (store, _) = http_store(
        StaticHttpClient::new()
            .with_response(format!("{FEED_BASE_URL}/sectors"), HttpResponse::ok_json(body)),
    );

    let sectors = store.fetch_sectors().await.expect("directory fetch");

    assert_eq!(sectors.len(), 1);
    assert_eq!(sectors[0].codes, vec!["COMB.N0000", "HNB.N0000"]);
}

#[tokio::test]
async fn when_reading_a_saved_payload_system_behaves_like_upstream() {
    // Given: the Tech feed saved to disk
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(history_payload(&tech_feed()).as_bytes())
        .expect("write payload");
    let store = FileObservationStore::new(file.path());

    // When: the file is loaded and analyzed
    let history = store.fetch_history().await.expect("file fetch");
    let report = SectorEngine::default().trend_report(&history.observations, Some("Tech"));

    // Then: results match the in-memory feed
    assert_eq!(history.observations, tech_feed());
    assert_eq!(report.momentum[0].observations, 11);
    assert!(store.describe().starts_with("file:"));
}
