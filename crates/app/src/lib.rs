//! Presentation layer: session orchestration, display formatting, and the CLI.

pub mod cli;
pub mod form;
pub mod format;
pub mod notice;
pub mod session;
pub mod view;

pub use form::TransactionForm;
pub use notice::{Notice, NoticeLevel};
pub use session::{LedgerSession, Mutation, SessionError};
pub use view::{LedgerView, SummaryView, TransactionRow};
