//! Behaviour-driven tests for sector trend and momentum analysis.
//!
//! These tests describe what a dashboard caller observes when it hands the
//! engine a feed, not how the engine computes it.

use sectorscope_core::{
    Analysis, AnalysisRequest, BaseSelection, EngineConfig, MomentumHorizon, SectorEngine,
    TradingDate, TrendLabel,
};
use sectorscope_tests::{banks_signal_days, daily_feed, tech_feed, DailyObservation};

fn trend_report(feed: &[DailyObservation], sector: Option<&str>) -> sectorscope_core::TrendReport {
    SectorEngine::default().trend_report(feed, sector)
}

// =============================================================================
// Momentum gains
// =============================================================================

#[test]
fn when_tech_has_fourteen_days_system_reports_ten_day_gain_from_window_base() {
    // Given: fourteen days of Tech volume ending at 200
    let feed = tech_feed();

    // When: the trailing-window report is produced
    let report = trend_report(&feed, None);

    // Then: the 10-day base is the oldest of the 11 kept dates (90)
    let tech = &report.momentum[0];
    assert_eq!(tech.sector, "Tech");
    assert_eq!(tech.observations, 11);
    let gain = tech.gains.ten_day.expect("eleven points cover the 10-day horizon");
    assert!((gain - (200.0 - 90.0) / 90.0 * 100.0).abs() < 1e-9);

    // And: shorter horizons use their own bases
    let three_day = tech.gains.three_day.expect("3-day gain");
    assert!((three_day - (200.0 - 170.0) / 170.0 * 100.0).abs() < 1e-9);
    let five_day = tech.gains.five_day.expect("5-day gain");
    assert!((five_day - (200.0 - 130.0) / 130.0 * 100.0).abs() < 1e-9);

    // And: current momentum is the latest day's volume
    assert_eq!(tech.current_momentum, Some(200.0));
}

#[test]
fn when_history_is_shorter_than_a_horizon_system_leaves_that_gain_null() {
    // Given: a sector with exactly four trading days
    let feed = daily_feed("Energy", &[10.0, 20.0, 30.0, 40.0]);

    // When: momentum is summarized
    let report = trend_report(&feed, None);

    // Then: only the 3-day horizon is computable
    let gains = report.momentum[0].gains;
    assert!(gains.get(MomentumHorizon::ThreeDay).is_some());
    assert!(gains.get(MomentumHorizon::FiveDay).is_none());
    assert!(gains.get(MomentumHorizon::TenDay).is_none());
}

#[test]
fn when_a_window_day_has_no_volume_system_counts_horizons_over_the_days_that_do() {
    // Given: Tech history where 2024-01-09 arrived without a volume
    let mut feed = tech_feed();
    feed[8] = DailyObservation::new("Tech", "2024-01-09");

    // When: the trailing-window report is produced
    let report = trend_report(&feed, None);

    // Then: the day still belongs to the window but not to the gain bases
    let tech = &report.momentum[0];
    assert_eq!(tech.observations, 11);
    let five_day = tech.gains.five_day.expect("ten volume-bearing days cover 5");
    assert!((five_day - (200.0 - 160.0) / 160.0 * 100.0).abs() < 1e-9);
    assert!(tech.gains.ten_day.is_none());
}

#[test]
fn when_the_latest_day_has_no_volume_system_still_reports_momentum() {
    // Given: Tech history whose newest record lacks a volume
    let mut feed = tech_feed();
    feed[13] = DailyObservation::new("Tech", "2024-01-14");

    // When: the trailing-window report is produced
    let report = trend_report(&feed, None);

    // Then: momentum is measured from the latest day that has one
    let tech = &report.momentum[0];
    assert_eq!(tech.current_momentum, Some(190.0));
    let three_day = tech.gains.three_day.expect("3-day gain");
    assert!((three_day - (190.0 - 125.0) / 125.0 * 100.0).abs() < 1e-9);
    assert!(tech.gains.five_day.is_some());
}

#[test]
fn when_robust_base_is_enabled_system_skips_thin_base_days() {
    // Given: a sector whose 3-day base traded almost nothing
    let feed = daily_feed("Tech", &[5_000.0, 4_000.0, 10.0, 6_000.0, 7_000.0, 8_000.0]);
    let config = EngineConfig::default().with_base_selection(BaseSelection::robust());
    let engine = SectorEngine::new(config).expect("valid config");

    // When: the report is produced
    let report = engine.trend_report(&feed, None);

    // Then: the base walks back to the 4,000 day
    let gain = report.momentum[0].gains.three_day.expect("robust base found");
    assert!((gain - 100.0).abs() < 1e-9);
}

// =============================================================================
// Signal aggregation
// =============================================================================

#[test]
fn when_banks_repeat_signal_days_system_counts_events_but_dedupes_symbols() {
    // Given: three Banks days tagged High Bullish Momentum, each listing {A, B}
    let feed = banks_signal_days();

    // When: the window is summarized
    let report = trend_report(&feed, None);

    // Then: every qualifying day is an event, but symbols appear once
    let banks = &report.momentum[0];
    assert_eq!(banks.signal_events, 3);
    let symbols: Vec<&str> = banks.bullish_symbols.iter().map(String::as_str).collect();
    assert_eq!(symbols, vec!["A", "B"]);
}

#[test]
fn when_signal_records_lack_symbol_lists_system_ignores_them_entirely() {
    // Given: a signal-tagged day without a symbols list
    let feed = vec![DailyObservation::new("Banks", "2024-01-01")
        .with_volume(10.0)
        .with_analysis("Emerging Bullish Momentum")];

    // When: the window is summarized
    let report = trend_report(&feed, None);

    // Then: it contributes neither symbols nor an event
    assert_eq!(report.momentum[0].signal_events, 0);
    assert!(report.momentum[0].bullish_symbols.is_empty());
}

// =============================================================================
// Window selection
// =============================================================================

#[test]
fn when_fifteen_dates_arrive_shuffled_system_keeps_the_eleven_most_recent() {
    // Given: fifteen distinct dates delivered newest-first
    let volumes: Vec<f64> = (1..=15).map(f64::from).collect();
    let mut feed = daily_feed("Tech", &volumes);
    feed.reverse();

    // When: the trailing window is selected
    let report = trend_report(&feed, None);

    // Then: exactly dates 5..=15 survive, ascending
    assert_eq!(report.window_dates.len(), 11);
    assert_eq!(report.window_dates[0].as_str(), "2024-01-05");
    assert_eq!(report.window_dates[10].as_str(), "2024-01-15");
    assert_eq!(report.rows.len(), 11);
    assert!(report.rows.windows(2).all(|pair| pair[0].date <= pair[1].date));
}

#[test]
fn when_a_date_matches_no_records_system_returns_an_empty_snapshot() {
    // Given: a feed with no records on the requested date
    let feed = tech_feed();
    let request = AnalysisRequest::for_date(TradingDate::new("2023-12-31"));

    // When: single-date mode runs
    let analysis = SectorEngine::default().analyze(&feed, &request);

    // Then: the result is empty, not an error
    let Analysis::Snapshot { rows, .. } = analysis else {
        panic!("dated requests produce snapshots");
    };
    assert!(rows.is_empty());
}

#[test]
fn when_sectors_are_absent_from_the_window_system_omits_them() {
    // Given: an old Energy record outside the trailing window
    let mut feed = tech_feed();
    feed.push(DailyObservation::new("Energy", "2023-12-01").with_volume(1.0));

    // When: the trailing report is produced
    let report = trend_report(&feed, None);

    // Then: Energy has no summary at all
    assert!(report.momentum.iter().all(|summary| summary.sector != "Energy"));
}

// =============================================================================
// Selected-sector series
// =============================================================================

#[test]
fn when_a_sector_is_selected_system_attaches_series_and_progression() {
    // Given: Tech history where two days are tagged plain Bullish Momentum
    let mut feed = tech_feed();
    feed[12] = feed[12].clone().with_analysis("Bullish Momentum");
    feed[5] = feed[5].clone().with_analysis("Bullish Momentum");

    // When: the report is requested for Tech
    let report = trend_report(&feed, Some("Tech"));

    // Then: the series spans the window and the latest day is classified
    let series = report.series.expect("selected sector has a series");
    assert_eq!(series.len(), 11);
    assert!(series.ma_long[8].is_none());
    assert!(series.ma_long[9].is_some());
    assert_eq!(report.momentum[0].latest_trend, series.latest_trend());
    assert_eq!(series.latest_trend(), Some(TrendLabel::StrongUptrend));

    // And: progression shows the bullish-tagged volumes ascending by date
    let volumes: Vec<f64> = report.progression.iter().map(|point| point.volume).collect();
    assert_eq!(volumes, vec![140.0, 190.0]);
}
