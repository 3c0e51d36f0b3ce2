use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Calendar-date formats tried in order. Month-first wins over day-first
/// when both would parse.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

/// The grouping key shared by both ledgers.
///
/// Two rows fall on the same day iff their `TxDate`s are equal. Text that no
/// known format accepts is carried through verbatim as `Raw`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TxDate {
    Calendar(NaiveDate),
    Raw(String),
}

impl TxDate {
    pub fn canonicalize(raw: &str) -> TxDate {
        let s = raw.trim();
        match parse_calendar(s) {
            Some(date) => TxDate::Calendar(date),
            None => TxDate::Raw(raw.to_string()),
        }
    }

    pub fn calendar(&self) -> Option<NaiveDate> {
        match self {
            TxDate::Calendar(d) => Some(*d),
            TxDate::Raw(_) => None,
        }
    }
}

fn parse_calendar(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

impl fmt::Display for TxDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxDate::Calendar(d) => write!(f, "{}", d.format("%m/%d/%Y")),
            TxDate::Raw(s) => f.write_str(s),
        }
    }
}

impl Ord for TxDate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TxDate::Calendar(a), TxDate::Calendar(b)) => a.cmp(b),
            (TxDate::Raw(a), TxDate::Raw(b)) => a.cmp(b),
            // Unparsed dates sink below every real one.
            (TxDate::Calendar(_), TxDate::Raw(_)) => Ordering::Greater,
            (TxDate::Raw(_), TxDate::Calendar(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for TxDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for TxDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
