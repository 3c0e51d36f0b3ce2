use serde::Serialize;

use super::date::TxDate;
use super::money::Money;
use super::transaction::Transaction;

/// A bank row and a ledger row on the same day with the same amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub bank: Transaction,
    pub external: Transaction,
}

/// Reconciliation outcome for one calendar day.
///
/// Totals cover every transaction on that side for the day, matched or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: TxDate,
    pub matched_pairs: Vec<MatchedPair>,
    pub unmatched_bank: Vec<Transaction>,
    pub unmatched_external: Vec<Transaction>,
    pub total_bank: Money,
    pub total_external: Money,
    pub matched_count: usize,
    pub unmatched_bank_count: usize,
    pub unmatched_external_count: usize,
}

impl DaySummary {
    pub fn new(
        date: TxDate,
        matched_pairs: Vec<MatchedPair>,
        unmatched_bank: Vec<Transaction>,
        unmatched_external: Vec<Transaction>,
        total_bank: Money,
        total_external: Money,
    ) -> Self {
        DaySummary {
            matched_count: matched_pairs.len(),
            unmatched_bank_count: unmatched_bank.len(),
            unmatched_external_count: unmatched_external.len(),
            date,
            matched_pairs,
            unmatched_bank,
            unmatched_external,
            total_bank: total_bank.round(),
            total_external: total_external.round(),
        }
    }

    pub fn bank_count(&self) -> usize {
        self.matched_count + self.unmatched_bank_count
    }

    pub fn external_count(&self) -> usize {
        self.matched_count + self.unmatched_external_count
    }

    pub fn transaction_count(&self) -> usize {
        self.bank_count() + self.external_count()
    }

    pub fn is_reconciled(&self) -> bool {
        self.unmatched_bank_count == 0 && self.unmatched_external_count == 0
    }
}
