use csv::StringRecord;
use tally_core::Source;

use crate::error::ReconcileError;

/// A parsed export: its header row plus every data record beneath it.
#[derive(Debug, Clone)]
pub struct CsvDocument {
    pub source: Source,
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl CsvDocument {
    pub fn parse(text: &str, source: Source) -> Result<Self, ReconcileError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        validate(text, source)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| decode_failure(source, e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            rows.push(result.map_err(|e| decode_failure(source, e))?);
        }

        Ok(CsvDocument {
            source,
            headers,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Cheap upload checks: the text is non-blank and its first line looks
/// comma-separated.
fn validate(text: &str, source: Source) -> Result<(), ReconcileError> {
    if text.trim().is_empty() {
        return Err(ReconcileError::EmptyFile(source));
    }
    let first_line = text.lines().next().unwrap_or_default();
    if !first_line.contains(',') {
        return Err(ReconcileError::NotCsv(source));
    }
    Ok(())
}

fn decode_failure(source: Source, err: csv::Error) -> ReconcileError {
    tracing::warn!("Failed to decode {source} CSV: {err}");
    ReconcileError::InvalidDataFormat
}
