//! Raw new-transaction input, as typed by the user.

use chrono::{Local, NaiveDate};

use pocketbook_core::DomainResult;
use pocketbook_ledger::{NewTransaction, TransactionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    /// ISO date; `None` or empty means "today".
    pub date: Option<String>,
    pub kind: String,
}

impl TransactionForm {
    /// The reset state: empty fields, dated `today`, marked as income.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            date: Some(today.format("%Y-%m-%d").to_string()),
            kind: TransactionKind::Income.label().to_string(),
        }
    }

    /// [`TransactionForm::blank`] for the current local date.
    pub fn reset() -> Self {
        Self::blank(Local::now().date_naive())
    }

    pub fn parse(&self) -> DomainResult<NewTransaction> {
        NewTransaction::parse(&self.description, &self.amount, self.date.as_deref(), &self.kind)
    }
}
