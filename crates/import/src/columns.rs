use serde::Serialize;

use crate::schema::SourceSchema;

/// Index of the first header (in header order) whose lowercase text contains
/// any of `aliases`. Absent when nothing matches.
pub fn resolve_column<S: AsRef<str>>(headers: &[S], aliases: &[String]) -> Option<usize> {
    let aliases: Vec<String> = aliases
        .iter()
        .map(|a| a.to_lowercase())
        .filter(|a| !a.is_empty())
        .collect();
    headers.iter().position(|header| {
        let header = header.as_ref().to_lowercase();
        aliases.iter().any(|alias| header.contains(alias.as_str()))
    })
}

/// Physical column positions for one export, resolved from its header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
    pub description: Option<usize>,
}

impl ColumnMap {
    pub fn resolve<S: AsRef<str>>(headers: &[S], schema: &SourceSchema) -> Self {
        ColumnMap {
            date: resolve_column(headers, &schema.date),
            debit: resolve_column(headers, &schema.debit),
            credit: resolve_column(headers, &schema.credit),
            description: resolve_column(headers, &schema.description),
        }
    }

    /// Rows can only be placed on a day when the date column is known.
    pub fn is_usable(&self) -> bool {
        self.date.is_some()
    }

    /// True when one physical column serves as both debit and credit.
    pub fn shares_amount_column(&self) -> bool {
        self.debit.is_some() && self.debit == self.credit
    }
}
