use serde::{Deserialize, Serialize};
use tally_core::Source;
use thiserror::Error;

/// Alias lists, in priority order, for the four semantic columns of one
/// export. Matching is a case-insensitive substring test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSchema {
    pub date: Vec<String>,
    #[serde(default)]
    pub debit: Vec<String>,
    #[serde(default)]
    pub credit: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("No date aliases configured for {0}")]
    EmptyDateAliases(Source),
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl SourceSchema {
    /// Bank statements: separate withdrawal/deposit columns or one signed
    /// "amount" column that both sides resolve to.
    pub fn bank() -> Self {
        SourceSchema {
            date: aliases(&["date", "transaction date", "posted date"]),
            debit: aliases(&["withdrawal", "debit", "amount", "payment", "charge"]),
            credit: aliases(&["deposit", "credit", "amount"]),
            description: aliases(&["description", "payee", "memo", "details", "transaction", "name"]),
        }
    }

    /// Budgeting-tool register exports.
    pub fn ledger() -> Self {
        SourceSchema {
            date: aliases(&["date"]),
            debit: aliases(&["outflow"]),
            credit: aliases(&["inflow"]),
            description: aliases(&["payee", "memo", "description"]),
        }
    }

    pub fn for_source(source: Source) -> Self {
        match source {
            Source::Bank => SourceSchema::bank(),
            Source::Ledger => SourceSchema::ledger(),
        }
    }

    pub fn from_toml(toml_content: &str, source: Source) -> Result<Self, SchemaError> {
        let schema: SourceSchema = toml::from_str(toml_content)?;
        schema.validated(source)
    }

    fn validated(self, source: Source) -> Result<Self, SchemaError> {
        if self.date.iter().all(|a| a.trim().is_empty()) {
            return Err(SchemaError::EmptyDateAliases(source));
        }
        Ok(self)
    }
}

/// The pair of schemas one reconciliation run uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSet {
    #[serde(default = "SourceSchema::bank")]
    pub bank: SourceSchema,
    #[serde(default = "SourceSchema::ledger")]
    pub ledger: SourceSchema,
}

impl Default for SchemaSet {
    fn default() -> Self {
        SchemaSet {
            bank: SourceSchema::bank(),
            ledger: SourceSchema::ledger(),
        }
    }
}

impl SchemaSet {
    /// Reads `[bank]` and `[ledger]` tables; a missing table keeps the
    /// built-in aliases.
    pub fn from_toml(toml_content: &str) -> Result<Self, SchemaError> {
        let set: SchemaSet = toml::from_str(toml_content)?;
        Ok(SchemaSet {
            bank: set.bank.validated(Source::Bank)?,
            ledger: set.ledger.validated(Source::Ledger)?,
        })
    }

    pub fn get(&self, source: Source) -> &SourceSchema {
        match source {
            Source::Bank => &self.bank,
            Source::Ledger => &self.ledger,
        }
    }
}
