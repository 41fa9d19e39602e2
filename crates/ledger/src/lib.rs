//! Ledger engine (personal income/expense ledger).
//!
//! Pure domain logic only: no IO, no rendering, no persistence concerns.

pub mod ledger;
pub mod summary;
pub mod transaction;

pub use ledger::Ledger;
pub use summary::Summary;
pub use transaction::{parse_date, Amount, NewTransaction, Transaction, TransactionKind};
