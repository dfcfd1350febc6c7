use sectorscope_core::{
    rank_by_gain, Analysis, AnalysisRequest, ObservationStore, SectorEngine, TradingDate,
};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;

use super::{timed, CommandResult};

pub async fn run(args: &AnalyzeArgs, store: &dyn ObservationStore) -> Result<CommandResult, CliError> {
    let engine = SectorEngine::new(args.engine.to_config()?)?;
    let mut request = match &args.date {
        Some(raw) => AnalysisRequest::for_date(TradingDate::parse_iso(raw)?),
        None => AnalysisRequest::trailing(),
    };
    if let Some(sector) = &args.sector {
        request = request.with_sector(sector.as_str())?;
    }

    let (fetched, latency_ms) = timed(store.fetch_history()).await;
    let history = match fetched {
        Ok(history) => history,
        Err(error) => return CommandResult::store_failure(&error, latency_ms),
    };

    let mut analysis = engine.analyze(&history.observations, &request);
    let mut notes = Vec::new();
    match &mut analysis {
        Analysis::Snapshot { date, rows } => {
            if rows.is_empty() {
                notes.push(format!("no records for {date}"));
            }
        }
        Analysis::Trend(report) => {
            if let Some(horizon) = args.rank_by {
                rank_by_gain(&mut report.momentum, horizon.into());
            }
            if let (Some(sector), None) = (&request.sector, &report.series) {
                notes.push(format!("sector '{sector}' has no records in the trailing window"));
            }
        }
    }

    let data = serde_json::to_value(&analysis)?;
    Ok(notes.into_iter().fold(
        CommandResult::ok(data).with_history(&history, latency_ms),
        |result, note| result.with_warning(note),
    ))
}
