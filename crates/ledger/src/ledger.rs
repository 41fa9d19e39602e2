use std::collections::HashSet;

use chrono::{Local, NaiveDate};

use pocketbook_core::{DomainError, DomainResult, IdSequence, TransactionId};

use crate::summary::Summary;
use crate::transaction::{Amount, NewTransaction, Transaction};

/// In-memory collection of transactions, unique by id.
///
/// Owns no I/O. Callers load it through [`Ledger::from_transactions`], mutate it
/// with [`Ledger::add`] / [`Ledger::remove`], and persist the result of
/// [`Ledger::transactions`] themselves.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    ids: IdSequence,
}

impl Ledger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from previously stored transactions, keeping their order.
    ///
    /// A repeated id keeps its first occurrence. New ids continue above the
    /// largest loaded one.
    pub fn from_transactions(loaded: impl IntoIterator<Item = Transaction>) -> Self {
        let mut ids = IdSequence::new();
        let mut seen = HashSet::new();
        let mut transactions = Vec::new();

        for tx in loaded {
            if !seen.insert(tx.id()) {
                tracing::warn!(id = %tx.id(), "dropping transaction with duplicate id");
                continue;
            }
            ids.observe(tx.id());
            transactions.push(tx);
        }

        Self { transactions, ids }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id() == id)
    }

    /// Record a new transaction dated today (local time) unless the input says
    /// otherwise.
    pub fn add(&mut self, new: NewTransaction) -> DomainResult<Transaction> {
        self.add_on(new, Local::now().date_naive())
    }

    /// Like [`Ledger::add`], with an explicit "today" for undated input.
    pub fn add_on(&mut self, new: NewTransaction, today: NaiveDate) -> DomainResult<Transaction> {
        let amount = Amount::new(new.amount)?;
        let id = self.ids.next_id().ok_or(DomainError::IdsExhausted)?;
        let tx = Transaction::new(
            id,
            new.date.unwrap_or(today),
            new.description,
            amount,
            new.kind,
        );

        tracing::debug!(id = %id, kind = %tx.kind(), amount = %amount, "transaction added");
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id() != id);
        let removed = self.transactions.len() != before;

        tracing::debug!(id = %id, removed, "transaction remove requested");
        removed
    }

    /// Newest first. Equal dates keep insertion order.
    pub fn list_sorted_by_date_desc(&self) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by(|a, b| b.date().cmp(&a.date()));
        sorted
    }

    pub fn summarize(&self) -> Summary {
        Summary::of(&self.transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionKind;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(description: &str, amount: Decimal, on: NaiveDate) -> NewTransaction {
        NewTransaction::new(description, amount, TransactionKind::Income).on(on)
    }

    fn expense(description: &str, amount: Decimal, on: NaiveDate) -> NewTransaction {
        NewTransaction::new(description, amount, TransactionKind::Expense).on(on)
    }

    #[test]
    fn empty_ledger_has_zero_totals_and_no_rows() {
        let ledger = Ledger::new();
        assert_eq!(ledger.summarize(), Summary::default());
        assert!(ledger.list_sorted_by_date_desc().is_empty());
    }

    #[test]
    fn salary_and_groceries_scenario() {
        let mut ledger = Ledger::new();
        ledger.add(income("Salary", dec!(5000000), date(2024, 1, 10))).unwrap();
        ledger.add(expense("Groceries", dec!(150000), date(2024, 1, 12))).unwrap();

        let summary = ledger.summarize();
        assert_eq!(summary.total_income, dec!(5000000));
        assert_eq!(summary.total_expense, dec!(150000));
        assert_eq!(summary.balance, dec!(4850000));

        let listed: Vec<_> = ledger
            .list_sorted_by_date_desc()
            .iter()
            .map(|tx| tx.description().to_string())
            .collect();
        assert_eq!(listed, vec!["Groceries", "Salary"]);
    }

    #[test]
    fn negative_amount_is_rejected_and_ledger_unchanged() {
        let mut ledger = Ledger::new();
        let err = ledger.add(income("Gift", dec!(-100), date(2024, 2, 1))).unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn remove_drops_amount_from_the_right_bucket() {
        let mut ledger = Ledger::new();
        let first = ledger.add(expense("Rent", dec!(2000000), date(2024, 3, 1))).unwrap();
        ledger.add(income("Bonus", dec!(750000), date(2024, 3, 2))).unwrap();

        assert!(ledger.remove(first.id()));
        assert_eq!(ledger.len(), 1);

        let summary = ledger.summarize();
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.total_income, dec!(750000));
        assert!(!ledger.remove(first.id()));
    }

    #[test]
    fn undated_input_uses_today() {
        let mut ledger = Ledger::new();
        let today = date(2024, 5, 17);
        let tx = ledger
            .add_on(NewTransaction::new("Coffee", dec!(25000), TransactionKind::Expense), today)
            .unwrap();
        assert_eq!(tx.date(), today);
    }

    #[test]
    fn negative_balance_is_a_valid_state() {
        let mut ledger = Ledger::new();
        ledger.add(expense("Laptop", dec!(12000000), date(2024, 4, 1))).unwrap();
        let summary = ledger.summarize();
        assert_eq!(summary.balance, dec!(-12000000));
        assert!(summary.is_negative());
    }

    #[test]
    fn ids_continue_above_loaded_data_and_duplicates_are_dropped() {
        let legacy = |id: u64, description: &str| {
            Transaction::new(
                TransactionId::from_raw(id),
                date(2024, 1, 1),
                description,
                Amount::new(dec!(1000)).unwrap(),
                TransactionKind::Income,
            )
        };
        let mut ledger = Ledger::from_transactions(vec![
            legacy(1_704_067_200_000, "a"),
            legacy(1_704_067_200_500, "b"),
            legacy(1_704_067_200_000, "dup"),
        ]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(TransactionId::from_raw(1_704_067_200_000)).unwrap().description(), "a");

        let added = ledger.add(income("c", dec!(1), date(2024, 1, 2))).unwrap();
        assert_eq!(added.id(), TransactionId::from_raw(1_704_067_200_501));
    }

    #[test]
    fn add_fails_once_the_largest_id_is_taken() {
        let top = Transaction::new(
            TransactionId::from_raw(u64::MAX),
            date(2024, 1, 1),
            "top",
            Amount::new(dec!(1)).unwrap(),
            TransactionKind::Income,
        );
        let mut ledger = Ledger::from_transactions(vec![top]);

        let err = ledger.add(income("next", dec!(1), date(2024, 1, 2))).unwrap_err();
        assert_eq!(err, DomainError::IdsExhausted);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.remove(TransactionId::from_raw(u64::MAX)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn listing_does_not_reorder_internal_storage() {
        let mut ledger = Ledger::new();
        ledger.add(income("old", dec!(1), date(2023, 1, 1))).unwrap();
        ledger.add(income("new", dec!(1), date(2024, 1, 1))).unwrap();

        let _ = ledger.list_sorted_by_date_desc();
        let internal: Vec<_> = ledger.transactions().iter().map(|tx| tx.description()).collect();
        assert_eq!(internal, vec!["old", "new"]);
    }

    fn arb_entry() -> impl Strategy<Value = (u64, bool, u32)> {
        // (whole amount, is_income, day offset)
        (0u64..10_000_000u64, any::<bool>(), 0u32..60u32)
    }

    fn to_new(index: usize, (amount, is_income, offset): (u64, bool, u32)) -> NewTransaction {
        let kind = if is_income {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let on = date(2024, 1, 1) + chrono::Days::new(u64::from(offset));
        NewTransaction::new(format!("entry-{index}"), Decimal::from(amount), kind).on(on)
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: N valid adds give N transactions, all listed, with unique ids.
        #[test]
        fn size_after_n_adds_is_n(entries in prop::collection::vec(arb_entry(), 0..40)) {
            let mut ledger = Ledger::new();
            let mut added = Vec::new();
            for (i, entry) in entries.iter().enumerate() {
                added.push(ledger.add(to_new(i, *entry)).unwrap().id());
            }

            prop_assert_eq!(ledger.len(), entries.len());
            let listed: HashSet<_> = ledger.list_sorted_by_date_desc().iter().map(|tx| tx.id()).collect();
            prop_assert_eq!(listed.len(), added.len());
            for id in &added {
                prop_assert!(listed.contains(id));
            }
        }

        /// Property: totals depend only on the multiset of transactions.
        #[test]
        fn summary_ignores_insertion_order(
            entries in prop::collection::vec(arb_entry(), 0..40),
            seed in any::<u64>(),
        ) {
            let mut forward = Ledger::new();
            for (i, entry) in entries.iter().enumerate() {
                forward.add(to_new(i, *entry)).unwrap();
            }

            let mut shuffled: Vec<_> = entries.iter().copied().enumerate().collect();
            let len = shuffled.len().max(1) as u64;
            shuffled.rotate_left((seed % len) as usize);
            shuffled.reverse();

            let mut permuted = Ledger::new();
            for (i, entry) in shuffled {
                permuted.add(to_new(i, entry)).unwrap();
            }

            prop_assert_eq!(forward.summarize(), permuted.summarize());
            prop_assert_eq!(forward.summarize(), forward.summarize());
        }

        /// Property: entries sharing a date keep their insertion order.
        #[test]
        fn sort_is_stable_for_equal_dates(entries in prop::collection::vec(arb_entry(), 0..40)) {
            let mut ledger = Ledger::new();
            for (i, entry) in entries.iter().enumerate() {
                ledger.add(to_new(i, *entry)).unwrap();
            }

            let sorted = ledger.list_sorted_by_date_desc();
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].date() >= pair[1].date());
                if pair[0].date() == pair[1].date() {
                    prop_assert!(pair[0].id() < pair[1].id());
                }
            }
            prop_assert_eq!(sorted, ledger.list_sorted_by_date_desc());
        }

        /// Property: a removed id never comes back from the listing.
        #[test]
        fn removed_ids_stay_gone(
            entries in prop::collection::vec(arb_entry(), 1..20),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut ledger = Ledger::new();
            let mut ids = Vec::new();
            for (i, entry) in entries.iter().enumerate() {
                ids.push(ledger.add(to_new(i, *entry)).unwrap().id());
            }

            let victim = ids[pick.index(ids.len())];
            prop_assert!(ledger.remove(victim));
            prop_assert_eq!(ledger.len(), entries.len() - 1);
            prop_assert!(ledger.list_sorted_by_date_desc().iter().all(|tx| tx.id() != victim));
            prop_assert!(!ledger.remove(victim));
        }
    }
}
