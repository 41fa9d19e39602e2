use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionKind};

/// Aggregate totals over a ledger.
///
/// `balance` may be negative; that is a valid state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

impl Summary {
    pub fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;

        // Amounts are capped at `Amount::MAX`, so these sums stay in range.
        for tx in transactions {
            match tx.kind() {
                TransactionKind::Income => total_income += tx.amount().value(),
                TransactionKind::Expense => total_expense += tx.amount().value(),
            }
        }

        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.balance < Decimal::ZERO
    }
}
