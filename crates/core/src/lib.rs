pub mod date;
pub mod money;
pub mod summary;
pub mod transaction;

pub use date::TxDate;
pub use money::Money;
pub use summary::{DaySummary, MatchedPair};
pub use transaction::{Source, Transaction, TransactionType};
