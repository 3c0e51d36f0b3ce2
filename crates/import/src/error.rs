use tally_core::Source;
use thiserror::Error;

/// Batch-level failures. Individual bad rows are dropped, never reported here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("Empty file: {0} export has no content")]
    EmptyFile(Source),
    #[error("Not a CSV file: {0} export has no comma-separated header row")]
    NotCsv(Source),
    #[error(
        "invalid data format - please make sure your CSV files contain expected bank statement & budget ledger columns"
    )]
    InvalidDataFormat,
}
