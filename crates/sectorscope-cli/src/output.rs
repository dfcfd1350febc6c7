use std::io::{self, Write};

use sectorscope_core::Envelope;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(envelope: &Envelope<Value>, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => render_table(&mut out, envelope)?,
    }
    Ok(())
}

pub fn render_table(out: &mut impl Write, envelope: &Envelope<Value>) -> Result<(), CliError> {
    let meta = &envelope.meta;
    writeln!(out, "request_id  : {}", meta.request_id)?;
    writeln!(out, "schema      : {}", meta.schema_version)?;
    let generated_at = meta
        .generated_at
        .format(&Rfc3339)
        .unwrap_or_else(|_| meta.generated_at.to_string());
    writeln!(out, "generated_at: {generated_at}")?;
    writeln!(out, "upstream    : {}", meta.upstream)?;
    writeln!(out, "latency_ms  : {}", meta.latency_ms)?;
    writeln!(out, "cache_hit   : {}", meta.cache_hit)?;

    if !meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    match &envelope.data {
        Value::Object(fields) => render_fields(out, fields)?,
        Value::Null => {}
        other => writeln!(out, "data: {other}")?,
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }
    Ok(())
}

/// Scalars as `key: value`, arrays of records as aligned tables, anything
/// else as indented JSON.
fn render_fields(out: &mut impl Write, fields: &Map<String, Value>) -> Result<(), CliError> {
    for (key, value) in fields {
        match value {
            Value::Array(items) if items.iter().all(Value::is_object) => {
                writeln!(out)?;
                writeln!(out, "{key} ({})", items.len())?;
                render_records(out, items)?;
            }
            Value::Array(items) => {
                let joined: Vec<String> = items.iter().map(cell).collect();
                writeln!(out, "{key}: {}", joined.join(", "))?;
            }
            Value::Object(_) => {
                writeln!(out)?;
                writeln!(out, "{key}:")?;
                for line in serde_json::to_string_pretty(value)?.lines() {
                    writeln!(out, "  {line}")?;
                }
            }
            scalar => writeln!(out, "{key}: {}", cell(scalar))?,
        }
    }
    Ok(())
}

fn render_records(out: &mut impl Write, records: &[Value]) -> Result<(), CliError> {
    let Some(Value::Object(first)) = records.first() else {
        return Ok(());
    };
    let columns: Vec<&str> = first
        .iter()
        .filter(|(_, value)| !value.is_object())
        .map(|(key, _)| key.as_str())
        .collect();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(*column).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .map(|row| row[index].len())
                .chain(std::iter::once(column.len()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{column:<width$}"))
        .collect();
    writeln!(out, "  {}", header.join("  "))?;
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect();
        writeln!(out, "  {}", line.join("  ").trim_end())?;
    }
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => format!("{float:.2}"),
            _ => number.to_string(),
        },
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
