pub mod columns;
pub mod csv;
pub mod error;
pub mod match_engine;
pub mod normalize;
pub mod report;
pub mod schema;

pub use columns::{resolve_column, ColumnMap};
pub use crate::csv::CsvDocument;
pub use error::ReconcileError;
pub use match_engine::reconcile_days;
pub use normalize::{normalize, Normalized};
pub use report::{Reconciliation, ReconciliationTotals};
pub use schema::{SchemaError, SchemaSet, SourceSchema};

use tally_core::{Source, Transaction};

/// Reconciles a bank export against a budgeting-ledger export using the
/// built-in column aliases.
pub fn reconcile(bank_csv: &str, ledger_csv: &str) -> Result<Reconciliation, ReconcileError> {
    Reconciler::default().reconcile(bank_csv, ledger_csv)
}

/// Runs column mapping, normalization and daily matching with a chosen
/// alias schema. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    schemas: SchemaSet,
}

impl Reconciler {
    pub fn new(schemas: SchemaSet) -> Self {
        Self { schemas }
    }

    pub fn schemas(&self) -> &SchemaSet {
        &self.schemas
    }

    pub fn reconcile(
        &self,
        bank_csv: &str,
        ledger_csv: &str,
    ) -> Result<Reconciliation, ReconcileError> {
        let transactions = self.normalize_all(bank_csv, ledger_csv)?;
        let report = Reconciliation::new(reconcile_days(&transactions));

        let totals = report.totals();
        tracing::info!(
            "Reconciled {} transactions over {} days: {} matched, {} bank unmatched, {} ledger unmatched",
            transactions.len(),
            totals.days,
            totals.matched_count,
            totals.unmatched_bank_count,
            totals.unmatched_external_count
        );
        Ok(report)
    }

    /// Parses and normalizes both exports into one list, bank rows first.
    ///
    /// Fails when either export has no recognizable date column, or when
    /// data rows exist but none of them survive normalization.
    pub fn normalize_all(
        &self,
        bank_csv: &str,
        ledger_csv: &str,
    ) -> Result<Vec<Transaction>, ReconcileError> {
        let bank = self.normalize_source(bank_csv, Source::Bank)?;
        let ledger = self.normalize_source(ledger_csv, Source::Ledger)?;

        let had_rows = bank.rows > 0 || ledger.rows > 0;
        let mut transactions = bank.normalized.transactions;
        transactions.extend(ledger.normalized.transactions);

        if had_rows && transactions.is_empty() {
            tracing::warn!("No usable transactions in either export");
            return Err(ReconcileError::InvalidDataFormat);
        }
        Ok(transactions)
    }

    fn normalize_source(&self, text: &str, source: Source) -> Result<SourcePass, ReconcileError> {
        let doc = CsvDocument::parse(text, source)?;
        let columns = ColumnMap::resolve(doc.headers.as_slice(), self.schemas.get(doc.source));
        tracing::debug!("Resolved {} columns: {columns:?}", doc.source);

        if !columns.is_usable() {
            tracing::warn!("No date column found in {} headers: {:?}", doc.source, doc.headers);
            return Err(ReconcileError::InvalidDataFormat);
        }
        if columns.shares_amount_column() {
            tracing::debug!(
                "{} export uses one signed amount column for both debit and credit",
                doc.source
            );
        }

        Ok(SourcePass {
            rows: doc.row_count(),
            normalized: normalize(&doc.rows, &columns, doc.source),
        })
    }
}

struct SourcePass {
    rows: usize,
    normalized: Normalized,
}

/// Second stage on its own, for callers that already hold transactions.
pub fn reconcile_transactions(transactions: &[Transaction]) -> Reconciliation {
    Reconciliation::new(reconcile_days(transactions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Money, TransactionType};

    const LEDGER_HEADER: &str = "Date,Outflow,Inflow,Payee\n";

    // ── end-to-end scenarios ──────────────────────────────────────────────────

    #[test]
    fn signed_bank_amount_matches_ledger_inflow() {
        let bank = "Date,Amount,Description\n2024-01-05,-42.50,COFFEE SHOP\n";
        let ledger = "Date,Outflow,Inflow,Payee\n01/05/2024,,42.50,Coffee Shop\n";
        let report = reconcile(bank, ledger).unwrap();

        assert_eq!(report.days.len(), 1);
        let day = &report.days[0];
        assert_eq!(day.date.to_string(), "01/05/2024");
        assert_eq!(day.matched_count, 1);
        assert_eq!(day.unmatched_bank_count, 0);
        assert_eq!(day.unmatched_external_count, 0);
        // The shared "Amount" column is read through the debit role, so the
        // bank side flips sign and lines up with the ledger inflow.
        assert_eq!(day.total_bank, Money::from_cents(4250));
        assert_eq!(day.total_external, Money::from_cents(4250));
        assert_eq!(day.matched_pairs[0].bank.tx_type(), TransactionType::Withdrawal);
        assert_eq!(day.matched_pairs[0].external.tx_type(), TransactionType::Inflow);
    }

    #[test]
    fn duplicate_bank_withdrawal_left_over() {
        let bank = "Date,Withdrawal,Deposit,Description\n\
                    03/01/2024,$20.00,,ATM\n\
                    03/01/2024,$20.00,,ATM\n";
        let ledger = format!("{LEDGER_HEADER}03/01/2024,$20.00,,Cash\n");
        let report = reconcile(bank, &ledger).unwrap();

        let day = &report.days[0];
        assert_eq!(day.matched_count, 1);
        assert_eq!(day.unmatched_bank_count, 1);
        assert_eq!(day.unmatched_bank[0].amount(), Money::from_cents(-2000));
        assert_eq!(day.unmatched_external_count, 0);
        assert_eq!(day.total_bank, Money::from_cents(-4000));
    }

    #[test]
    fn header_only_exports_give_empty_result() {
        let report = reconcile("Date,Amount,Description\n", LEDGER_HEADER).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn unrecognized_date_header_is_invalid_format() {
        let bank = "When,Amount,Description\nyesterday,1.00,x\n";
        let ledger = "Day,Outflow,Inflow\nyesterday,1.00,\n";
        assert_eq!(reconcile(bank, ledger).unwrap_err(), ReconcileError::InvalidDataFormat);
    }

    #[test]
    fn one_side_missing_date_is_invalid_format() {
        let bank = "Date,Amount\n01/05/2024,1.00\n";
        let ledger = "Day,Outflow,Inflow\n01/05/2024,1.00,\n";
        assert_eq!(reconcile(bank, ledger).unwrap_err(), ReconcileError::InvalidDataFormat);
    }

    #[test]
    fn rows_present_but_none_usable_is_invalid_format() {
        let bank = "Date,Amount\n01/05/2024,0.00\n,5.00\n";
        let ledger = format!("{LEDGER_HEADER}01/05/2024,,\n");
        assert_eq!(reconcile(bank, &ledger).unwrap_err(), ReconcileError::InvalidDataFormat);
    }

    #[test]
    fn one_usable_side_is_enough() {
        let bank = "Date,Amount\n01/05/2024,9.99\n";
        let report = reconcile(bank, LEDGER_HEADER).unwrap();
        assert_eq!(report.days[0].unmatched_bank_count, 1);
        assert_eq!(report.totals().unmatched_bank_count, 1);
    }

    #[test]
    fn upload_checks_surface_per_source() {
        assert_eq!(reconcile("", LEDGER_HEADER).unwrap_err(), ReconcileError::EmptyFile(Source::Bank));
        assert_eq!(
            reconcile("Date,Amount\n", "just text\n").unwrap_err(),
            ReconcileError::NotCsv(Source::Ledger)
        );
    }

    #[test]
    fn trailer_rows_and_extra_columns_ignored() {
        let bank = "Account,Posted Date,Reference,Debit,Credit,Details\n\
                    CHK,01/10/2024,R1,15.00,,Lunch\n\
                    CHK,01/10/2024,R2,,200.00,Refund\n\
                    ,,,,,\n\
                    Total,,,15.00,200.00,\n";
        let ledger = format!(
            "{LEDGER_HEADER}01/10/2024,$15.00,,Deli\n01/10/2024,,$200.00,Store\n01/09/2024,$3.00,,Gum\n"
        );
        let report = reconcile(bank, &ledger).unwrap();
        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].date.to_string(), "01/10/2024");
        assert_eq!(report.days[0].matched_count, 2);
        assert!(report.days[0].is_reconciled());
        assert_eq!(report.days[1].unmatched_external_count, 1);
    }

    #[test]
    fn oversized_amounts_are_dropped_not_summed() {
        let bank = "Date,Withdrawal,Deposit\n\
                    01/05/2024,50000000000000000000000000000,\n\
                    01/05/2024,50000000000000000000000000000,\n\
                    01/05/2024,12.00,\n";
        let report = reconcile(bank, "Date,Outflow,Inflow\n").unwrap();
        assert_eq!(report.days.len(), 1);
        assert_eq!(report.days[0].unmatched_bank_count, 1);
        assert_eq!(report.days[0].total_bank, Money::from_cents(-1200));
    }

    #[test]
    fn only_oversized_amounts_is_invalid_format() {
        let bank = "Date,Withdrawal,Deposit\n01/05/2024,50000000000000000000000000000,\n";
        assert_eq!(
            reconcile(bank, "Date,Outflow,Inflow\n").unwrap_err(),
            ReconcileError::InvalidDataFormat
        );
    }

    #[test]
    fn timestamped_bank_date_pairs_with_plain_ledger_date() {
        let bank = "Date,Withdrawal,Deposit\n01/05/2024 13:45,5.00,\n";
        let ledger = format!("{LEDGER_HEADER}01/05/2024,5.00,,Snack\n");
        let report = reconcile(bank, &ledger).unwrap();
        assert_eq!(report.days.len(), 1);
        assert_eq!(report.days[0].date.to_string(), "01/05/2024");
        assert_eq!(report.days[0].matched_count, 1);
    }

    // ── configuration ─────────────────────────────────────────────────────────

    #[test]
    fn custom_schema_resolves_foreign_headers() {
        let schemas = SchemaSet::from_toml(
            r#"
            [bank]
            date = ["buchungstag"]
            debit = ["soll"]
            credit = ["haben"]
            description = ["verwendungszweck"]
            "#,
        )
        .unwrap();
        let bank = "Buchungstag,Verwendungszweck,Soll,Haben\n2024-04-02,Miete,800.00,\n";
        let ledger = format!("{LEDGER_HEADER}04/02/2024,800.00,,Rent\n");
        let report = Reconciler::new(schemas).reconcile(bank, &ledger).unwrap();
        assert_eq!(report.days[0].matched_count, 1);
        assert_eq!(report.days[0].matched_pairs[0].bank.description(), "Miete");
    }

    // ── invariants ────────────────────────────────────────────────────────────

    #[test]
    fn every_transaction_lands_in_exactly_one_bucket() {
        let bank = "Date,Withdrawal,Deposit,Description\n\
                    01/01/2024,10.00,,a\n01/01/2024,10.00,,b\n01/01/2024,,5.00,c\n\
                    01/02/2024,7.00,,d\n01/03/2024,,1.00,e\n";
        let ledger = format!(
            "{LEDGER_HEADER}01/01/2024,10.00,,x\n01/01/2024,,5.00,y\n01/01/2024,,5.00,z\n01/03/2024,2.00,,w\n"
        );
        let reconciler = Reconciler::default();
        let txs = reconciler.normalize_all(bank, &ledger).unwrap();
        let report = reconcile_transactions(&txs);

        let placed: usize = report.days.iter().map(|d| d.transaction_count()).sum();
        assert_eq!(placed, txs.len());
        for day in &report.days {
            let bank_on_day = txs
                .iter()
                .filter(|t| t.source() == Source::Bank && t.date() == &day.date)
                .count();
            let ledger_on_day = txs
                .iter()
                .filter(|t| t.source() == Source::Ledger && t.date() == &day.date)
                .count();
            assert_eq!(day.matched_count + day.unmatched_bank_count, bank_on_day);
            assert_eq!(day.matched_count + day.unmatched_external_count, ledger_on_day);
            assert_eq!(day.matched_count, day.matched_pairs.len());

            let bank_sum = Money::total(
                txs.iter()
                    .filter(|t| t.source() == Source::Bank && t.date() == &day.date)
                    .map(|t| t.amount()),
            );
            assert_eq!(day.total_bank, bank_sum);
        }
        assert!(report.days.windows(2).all(|w| w[0].date > w[1].date));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let bank = "Date,Amount\n01/05/2024,1.00\n01/04/2024,2.00\n";
        let ledger = format!("{LEDGER_HEADER}01/05/2024,1.00,,x\n");
        assert_eq!(reconcile(bank, &ledger).unwrap(), reconcile(bank, &ledger).unwrap());
    }
}
