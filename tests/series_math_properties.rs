//! Property-style checks of the series math that charts rely on.

use sectorscope_core::engine::signals::{
    daily_percent_change, moving_average_ignoring_gaps, simple_moving_average, z_scores,
};
use sectorscope_core::engine::trend::{matching_rule, TrendInputs, TREND_RULES};
use sectorscope_core::{classify_trend, normalized_trend, TrendLabel};
use sectorscope_tests::daily_feed;

#[test]
fn when_history_is_shorter_than_the_window_system_never_emits_an_average() {
    // Given: four observations and windows longer than that
    let values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];

    for window in [5, 10] {
        // When: both moving-average flavours are computed
        let strict = simple_moving_average(&values, window);
        let lenient = moving_average_ignoring_gaps(&values, window);

        // Then: every index is undefined
        assert!(strict.iter().all(Option::is_none));
        assert!(lenient.iter().all(Option::is_none));
    }
}

#[test]
fn when_a_window_contains_a_gap_system_policies_diverge() {
    // Given: a gap in the middle of the series
    let values = vec![Some(3.0), None, Some(9.0)];

    // When: a 3-day average is taken
    let strict = simple_moving_average(&values, 3);
    let lenient = moving_average_ignoring_gaps(&values, 3);

    // Then: strict propagates the gap, lenient averages what is there
    assert_eq!(strict[2], None);
    assert_eq!(lenient[2], Some(6.0));
}

#[test]
fn when_values_are_identical_system_scores_every_z_as_zero() {
    // Given: a flat series with one gap
    let values = vec![Some(42.0), Some(42.0), None, Some(42.0)];

    // When: z-scores are computed
    let scores = z_scores(&values);

    // Then: valid points score zero and the gap stays a gap
    assert_eq!(scores, vec![Some(0.0), Some(0.0), None, Some(0.0)]);
}

#[test]
fn when_the_prior_day_is_zero_system_leaves_percent_change_undefined() {
    let changes = daily_percent_change(&[Some(0.0), Some(5.0), Some(10.0)]);
    assert_eq!(changes, vec![None, None, Some(1.0)]);
}

#[test]
fn when_any_triple_is_classified_system_returns_the_first_matching_rule() {
    // Given: a grid of z-scores and both MA orderings
    let zs = [-3.0, -1.0, -0.75, -0.5, -0.1, 0.0, 0.4, 0.5, 0.75, 1.0, 1.01, 4.0];
    let orderings = [(2.0, 1.0), (1.0, 2.0), (1.0, 1.0)];

    for z in zs {
        for (ma_short, ma_long) in orderings {
            // When: the rule table is consulted
            let inputs = TrendInputs::new(z, ma_short, ma_long);
            let label = classify_trend(z, ma_short, ma_long);

            // Then: the label comes from the first rule that fires, or is Neutral
            match matching_rule(&inputs) {
                Some(index) => {
                    assert_eq!(label, TREND_RULES[index].label, "z={z} short={ma_short} long={ma_long}");
                    assert!(
                        TREND_RULES[..index].iter().all(|rule| !rule.matches(&inputs)),
                        "an earlier rule also fires for z={z} short={ma_short} long={ma_long}"
                    );
                }
                None => {
                    assert!(TREND_RULES.iter().all(|rule| !rule.matches(&inputs)));
                    assert_eq!(label, TrendLabel::Neutral, "z={z} short={ma_short} long={ma_long}");
                }
            }
        }
    }
}

#[test]
fn when_rules_overlap_system_keeps_the_higher_priority_label() {
    // Given: a small positive z with short MA above long, inside the neutral band
    let inputs = TrendInputs::new(0.4, 2.0, 1.0);
    let firing: Vec<TrendLabel> = TREND_RULES
        .iter()
        .filter(|rule| rule.matches(&inputs))
        .map(|rule| rule.label)
        .collect();

    // Then: both rules fire, and the earlier one decides
    assert_eq!(firing, vec![TrendLabel::WeakUptrend, TrendLabel::Neutral]);
    assert_eq!(classify_trend(0.4, 2.0, 1.0), TrendLabel::WeakUptrend);
}

#[test]
fn when_z_lacks_moving_average_confirmation_system_falls_back_to_neutral() {
    // Given: a positive z-score while the short average trails the long one
    let label = classify_trend(0.8, 1.0, 2.0);

    // Then: no uptrend is reported
    assert_eq!(label, TrendLabel::Neutral);
    assert_eq!(classify_trend(-0.8, 2.0, 1.0), TrendLabel::Neutral);
}

#[test]
fn when_normalizing_system_rebases_every_sector_to_one_hundred() {
    // Given: two sectors with different volume scales
    let mut feed = daily_feed("Tech", &[100.0, 120.0, 110.0, 130.0, 150.0]);
    feed.extend(daily_feed("Banks", &[1_000.0, 1_100.0, 1_200.0, 900.0, 1_000.0]));
    let sectors = vec![String::from("Tech"), String::from("Banks")];

    // When: the normalized trend is built
    let series = normalized_trend(&feed, &sectors, None);

    // Then: each starts at 100 and keeps the requested order
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].sector, "Tech");
    for entry in &series {
        assert!((entry.points[0].value - 100.0).abs() < 1e-9);
    }
    assert!((series[0].points[4].value - 150.0).abs() < 1e-9);
    assert!((series[1].points[3].value - 90.0).abs() < 1e-9);
}
