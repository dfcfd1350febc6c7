use sectorscope_core::{ObservationStore, SectorListing};
use serde::Serialize;

use crate::error::CliError;

use super::{timed, CommandResult};

#[derive(Debug, Serialize)]
struct SectorsResponseData {
    sectors: Vec<SectorListing>,
}

pub async fn run(store: &dyn ObservationStore) -> Result<CommandResult, CliError> {
    let (fetched, latency_ms) = timed(store.fetch_sectors()).await;
    let sectors = match fetched {
        Ok(sectors) => sectors,
        Err(error) => return CommandResult::store_failure(&error, latency_ms),
    };

    let data = serde_json::to_value(SectorsResponseData { sectors })?;
    Ok(CommandResult::ok(data).with_latency(latency_ms))
}
