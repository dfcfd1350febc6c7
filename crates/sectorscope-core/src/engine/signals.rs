//! Numeric series transforms over gap-aware values.
//!
//! Every series is `[Option<f64>]`: `None` is the "not computable" sentinel.
//! Non-finite inputs are treated as gaps. Sentinels propagate; nothing here
//! fails.

/// Day-over-day fractional change: `(v[i] - v[i-1]) / v[i-1]`.
///
/// Undefined at index 0 and wherever either value is missing or the prior
/// value is zero.
pub fn daily_percent_change(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, current)| {
            if index == 0 {
                return None;
            }
            let previous = finite(values[index - 1])?;
            let current = finite(*current)?;
            if previous == 0.0 {
                return None;
            }
            Some((current - previous) / previous)
        })
        .collect()
}

/// Trailing simple moving average; any gap inside the window yields a gap.
pub fn simple_moving_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    trailing_windows(values, window, |slice| {
        let mut sum = 0.0;
        for value in slice {
            sum += finite(*value)?;
        }
        Some(sum / window as f64)
    })
}

/// Trailing simple moving average over the valid entries of each window.
///
/// The window must still be full (`i + 1 >= window`); it is a gap only when
/// none of its entries is valid.
pub fn moving_average_ignoring_gaps(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    trailing_windows(values, window, |slice| {
        let valid: Vec<f64> = slice.iter().filter_map(|value| finite(*value)).collect();
        if valid.is_empty() {
            return None;
        }
        Some(valid.iter().sum::<f64>() / valid.len() as f64)
    })
}

/// Whole-series z-scores using the population standard deviation.
///
/// A zero deviation is replaced by 1, so a flat series scores 0 everywhere.
pub fn z_scores(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let valid: Vec<f64> = values.iter().filter_map(|value| finite(*value)).collect();
    if valid.is_empty() {
        return vec![None; values.len()];
    }

    let count = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / count;
    let variance = valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let std_dev = variance.sqrt();
    let std_dev = if std_dev > 0.0 { std_dev } else { 1.0 };

    values
        .iter()
        .map(|value| finite(*value).map(|v| (v - mean) / std_dev))
        .collect()
}

/// Median of a non-empty slice; averages the two middle values on even length.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

fn trailing_windows<F>(values: &[Option<f64>], window: usize, reduce: F) -> Vec<Option<f64>>
where
    F: Fn(&[Option<f64>]) -> Option<f64>,
{
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|index| {
            if index + 1 < window {
                None
            } else {
                reduce(&values[index + 1 - window..=index])
            }
        })
        .collect()
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
