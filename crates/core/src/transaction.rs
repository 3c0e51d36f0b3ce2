use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::TxDate;
use super::money::Money;

/// Which export a transaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "bank")]
    Bank,
    #[serde(rename = "external-ledger")]
    Ledger,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Bank => write!(f, "bank"),
            Source::Ledger => write!(f, "external-ledger"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Withdrawal,
    Deposit,
    Outflow,
    Inflow,
}

impl TransactionType {
    /// The tag a source uses for the debit (`debit == true`) or credit side.
    pub fn for_side(source: Source, debit: bool) -> Self {
        match (source, debit) {
            (Source::Bank, true) => TransactionType::Withdrawal,
            (Source::Bank, false) => TransactionType::Deposit,
            (Source::Ledger, true) => TransactionType::Outflow,
            (Source::Ledger, false) => TransactionType::Inflow,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Withdrawal => write!(f, "withdrawal"),
            TransactionType::Deposit => write!(f, "deposit"),
            TransactionType::Outflow => write!(f, "outflow"),
            TransactionType::Inflow => write!(f, "inflow"),
        }
    }
}

/// One normalized ledger row. Never holds a zero amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    date: TxDate,
    amount: Money,
    description: String,
    source: Source,
    #[serde(rename = "type")]
    tx_type: TransactionType,
}

impl Transaction {
    /// Returns `None` for a zero amount. The amount is rounded to cents.
    pub fn new(
        date: TxDate,
        amount: Money,
        description: impl Into<String>,
        source: Source,
        tx_type: TransactionType,
    ) -> Option<Self> {
        let amount = amount.round();
        if amount.is_zero() {
            return None;
        }
        Some(Transaction {
            date,
            amount,
            description: description.into(),
            source,
            tx_type,
        })
    }

    pub fn date(&self) -> &TxDate {
        &self.date
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }
}
