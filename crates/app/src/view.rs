//! Render-ready view of a ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use pocketbook_core::TransactionId;
use pocketbook_ledger::{Ledger, Summary, Transaction, TransactionKind};

use crate::format::{format_currency, format_date_long, BalanceTone};

pub const EMPTY_STATE_MESSAGE: &str = "Belum ada transaksi. Mulai tambahkan transaksi pertama Anda!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub date_display: String,
    pub description: String,
    pub amount: Decimal,
    pub amount_display: String,
    pub kind: TransactionKind,
    pub kind_label: &'static str,
    /// Badge style: `income` or `expense`.
    pub badge: &'static str,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        let badge = match tx.kind() {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        Self {
            id: tx.id(),
            date: tx.date(),
            date_display: format_date_long(tx.date()),
            description: tx.description().to_string(),
            amount: tx.amount().value(),
            amount_display: format_currency(tx.amount().value()),
            kind: tx.kind(),
            kind_label: tx.kind().label(),
            badge,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub total_income_display: String,
    pub total_expense_display: String,
    pub balance_display: String,
    pub balance_tone: BalanceTone,
}

impl From<Summary> for SummaryView {
    fn from(summary: Summary) -> Self {
        Self {
            total_income: summary.total_income,
            total_expense: summary.total_expense,
            balance: summary.balance,
            total_income_display: format_currency(summary.total_income),
            total_expense_display: format_currency(summary.total_expense),
            balance_display: format_currency(summary.balance),
            balance_tone: BalanceTone::of(summary.balance),
        }
    }
}

/// Rows newest first plus formatted totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    pub rows: Vec<TransactionRow>,
    pub summary: SummaryView,
}

impl LedgerView {
    pub fn build(ledger: &Ledger) -> Self {
        Self {
            rows: ledger
                .list_sorted_by_date_desc()
                .iter()
                .map(TransactionRow::from)
                .collect(),
            summary: ledger.summarize().into(),
        }
    }

    /// Whether the renderer should show [`EMPTY_STATE_MESSAGE`] instead of rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
