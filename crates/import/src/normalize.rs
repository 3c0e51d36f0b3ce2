use csv::StringRecord;
use tally_core::{Money, Source, Transaction, TransactionType, TxDate};

use crate::columns::ColumnMap;

/// Output of one normalization pass.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub transactions: Vec<Transaction>,
    /// Rows with no date cell (trailers, spacer lines).
    pub skipped: usize,
    /// Dated rows rejected for an unparseable or zero amount.
    pub dropped: usize,
}

/// Converts raw records into canonical transactions for `source`.
///
/// Rows that cannot be used are discarded; the pass never fails.
pub fn normalize(rows: &[StringRecord], columns: &ColumnMap, source: Source) -> Normalized {
    let mut out = Normalized::default();

    for row in rows {
        let Some(raw_date) = cell(row, columns.date).filter(|s| !s.is_empty()) else {
            out.skipped += 1;
            continue;
        };

        match normalize_row(row, raw_date, columns, source) {
            Some(tx) => out.transactions.push(tx),
            None => out.dropped += 1,
        }
    }

    tracing::debug!(
        "Normalized {source} export: {} kept, {} dropped, {} skipped",
        out.transactions.len(),
        out.dropped,
        out.skipped
    );
    out
}

fn normalize_row(
    row: &StringRecord,
    raw_date: &str,
    columns: &ColumnMap,
    source: Source,
) -> Option<Transaction> {
    let debit = Money::parse_currency(cell(row, columns.debit).unwrap_or_default());
    let credit = Money::parse_currency(cell(row, columns.credit).unwrap_or_default());

    // A populated debit wins; an unparseable debit falls through to credit.
    let (amount, is_debit) = match debit {
        Some(d) if !d.is_zero() => (-d, true),
        _ => (credit?, false),
    };

    Transaction::new(
        TxDate::canonicalize(raw_date),
        amount,
        cell(row, columns.description).unwrap_or_default(),
        source,
        TransactionType::for_side(source, is_debit),
    )
}

fn cell(row: &StringRecord, column: Option<usize>) -> Option<&str> {
    column.and_then(|idx| row.get(idx))
}
