use sectorscope_core::{momentum_board, ObservationStore};
use serde::Serialize;

use crate::cli::BoardArgs;
use crate::error::CliError;

use super::{timed, CommandResult};

#[derive(Debug, Serialize)]
struct BoardResponseData {
    rows: Vec<sectorscope_core::BoardRow>,
}

pub async fn run(args: &BoardArgs, store: &dyn ObservationStore) -> Result<CommandResult, CliError> {
    let (fetched, latency_ms) = timed(store.fetch_history()).await;
    let history = match fetched {
        Ok(history) => history,
        Err(error) => return CommandResult::store_failure(&error, latency_ms),
    };

    let rows = momentum_board(&history.observations, args.sort.into(), args.desc);
    let data = serde_json::to_value(BoardResponseData { rows })?;
    Ok(CommandResult::ok(data).with_history(&history, latency_ms))
}
