use sectorscope_core::{normalized_trend, ObservationStore, TradingDate};
use serde::Serialize;

use crate::cli::NormalizedArgs;
use crate::error::CliError;

use super::{timed, CommandResult};

#[derive(Debug, Serialize)]
struct NormalizedResponseData {
    series: Vec<sectorscope_core::NormalizedSeries>,
}

pub async fn run(
    args: &NormalizedArgs,
    store: &dyn ObservationStore,
) -> Result<CommandResult, CliError> {
    let end_date = args
        .end_date
        .as_deref()
        .map(TradingDate::parse_iso)
        .transpose()?;

    let (fetched, latency_ms) = timed(store.fetch_history()).await;
    let history = match fetched {
        Ok(history) => history,
        Err(error) => return CommandResult::store_failure(&error, latency_ms),
    };

    let series = normalized_trend(&history.observations, &args.sectors, end_date.as_ref());
    let omitted: Vec<&str> = args
        .sectors
        .iter()
        .filter(|sector| !series.iter().any(|s| &s.sector == *sector))
        .map(String::as_str)
        .collect();

    let data = serde_json::to_value(NormalizedResponseData { series })?;
    let result = CommandResult::ok(data).with_history(&history, latency_ms);
    Ok(if omitted.is_empty() {
        result
    } else {
        result.with_warning(format!(
            "not enough consistent history to normalize: {}",
            omitted.join(", ")
        ))
    })
}
