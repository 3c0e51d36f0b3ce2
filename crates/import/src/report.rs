use serde::Serialize;
use tally_core::{DaySummary, TxDate};

/// The full result of one run: every day that had activity, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reconciliation {
    pub days: Vec<DaySummary>,
}

/// Counts summed across all days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationTotals {
    pub days: usize,
    pub matched_count: usize,
    pub unmatched_bank_count: usize,
    pub unmatched_external_count: usize,
}

impl Reconciliation {
    pub fn new(days: Vec<DaySummary>) -> Self {
        Reconciliation { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Distinct dates in display order, for a date picker.
    pub fn dates(&self) -> Vec<&TxDate> {
        self.days.iter().map(|d| &d.date).collect()
    }

    pub fn for_date(&self, date: &TxDate) -> Option<&DaySummary> {
        self.days.iter().find(|d| &d.date == date)
    }

    /// Days with at least one unmatched transaction.
    pub fn unreconciled_days(&self) -> impl Iterator<Item = &DaySummary> {
        self.days.iter().filter(|d| !d.is_reconciled())
    }

    pub fn totals(&self) -> ReconciliationTotals {
        self.days
            .iter()
            .fold(ReconciliationTotals::default(), |acc, d| ReconciliationTotals {
                days: acc.days + 1,
                matched_count: acc.matched_count + d.matched_count,
                unmatched_bank_count: acc.unmatched_bank_count + d.unmatched_bank_count,
                unmatched_external_count: acc.unmatched_external_count + d.unmatched_external_count,
            })
    }

    pub fn is_fully_reconciled(&self) -> bool {
        self.unreconciled_days().next().is_none()
    }
}

impl IntoIterator for Reconciliation {
    type Item = DaySummary;
    type IntoIter = std::vec::IntoIter<DaySummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.into_iter()
    }
}
