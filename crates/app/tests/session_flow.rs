use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use pocketbook_app::{LedgerSession, NoticeLevel, SessionError, TransactionForm};
use pocketbook_core::TransactionId;
use pocketbook_infra::{
    FileStore, InMemoryStore, KeyValueLedgerRepository, KeyValueStore, LedgerRepository,
    PersistenceError, StoreError,
};
use pocketbook_ledger::{NewTransaction, TransactionKind};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

/// Store whose writes fail while `broken` is set (quota exceeded, disk gone).
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryStore,
    broken: AtomicBool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

#[test]
fn ledger_survives_reopen_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let salary_id;
    {
        let mut session = LedgerSession::open(KeyValueLedgerRepository::new(FileStore::new(dir.path())));
        salary_id = session
            .add(NewTransaction::new("Salary", dec!(5000000), TransactionKind::Income).on(day(10)))
            .unwrap()
            .into_result()
            .unwrap()
            .id();
        session
            .add(NewTransaction::new("Groceries", dec!(150000), TransactionKind::Expense).on(day(12)))
            .unwrap()
            .into_result()
            .unwrap();
    }

    let mut reopened = LedgerSession::open(KeyValueLedgerRepository::new(FileStore::new(dir.path())));
    assert!(reopened.startup_notice().is_none());

    let view = reopened.view();
    let names: Vec<_> = view.rows.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(names, vec!["Groceries", "Salary"]);
    assert_eq!(view.summary.balance, dec!(4850000));
    assert_eq!(view.summary.balance_display, "Rp 4.850.000");

    // New ids keep increasing past what was stored.
    let next = reopened
        .add(NewTransaction::new("Bonus", dec!(1), TransactionKind::Income).on(day(13)))
        .unwrap();
    assert!(next.value.id() > salary_id);

    assert!(reopened.remove(salary_id).value);
    let stored = KeyValueLedgerRepository::new(FileStore::new(dir.path())).load().unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|tx| tx.id() != salary_id));
}

#[test]
fn failed_save_keeps_in_memory_state_and_warns() {
    let store = FlakyStore::default();
    let mut session = LedgerSession::open(KeyValueLedgerRepository::new(&store));

    store.broken.store(true, Ordering::SeqCst);
    let outcome = session
        .submit(&TransactionForm {
            description: "Kopi".to_string(),
            amount: "25000".to_string(),
            date: Some("2024-01-15".to_string()),
            kind: "Pengeluaran".to_string(),
        })
        .unwrap();

    assert!(!outcome.is_persisted());
    assert_eq!(outcome.notices.len(), 2);
    assert_eq!(outcome.notices[0].level, NoticeLevel::Success);
    assert_eq!(outcome.notices[1].level, NoticeLevel::Warning);
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.view().summary.total_expense, dec!(25000));
    assert_eq!(store.get("transactions").unwrap(), None);

    let id = session.ledger().transactions()[0].id();
    let removal = session.remove(id);
    assert!(removal.value);
    assert!(matches!(
        removal.into_result(),
        Err(SessionError::Persistence(PersistenceError::Store(StoreError::Unavailable(_))))
    ));
    assert!(session.ledger().is_empty());

    // Once storage recovers, the next mutation writes the whole collection.
    store.broken.store(false, Ordering::SeqCst);
    session
        .add(NewTransaction::new("Gaji", dec!(1000), TransactionKind::Income).on(day(20)))
        .unwrap()
        .into_result()
        .unwrap();
    let stored = KeyValueLedgerRepository::new(&store).load().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].description(), "Gaji");
}

#[test]
fn removing_twice_reports_false_the_second_time() {
    let mut session = LedgerSession::open(KeyValueLedgerRepository::new(InMemoryStore::new()));
    let first = session
        .add(NewTransaction::new("A", dec!(10), TransactionKind::Income).on(day(1)))
        .unwrap()
        .value;
    session
        .add(NewTransaction::new("B", dec!(20), TransactionKind::Expense).on(day(1)))
        .unwrap();

    assert!(session.remove(first.id()).value);
    assert!(!session.remove(first.id()).value);
    assert!(!session.remove(TransactionId::from_raw(u64::MAX)).value);

    let summary = session.view().summary;
    assert_eq!(summary.total_income, dec!(0));
    assert_eq!(summary.total_expense, dec!(20));
    assert_eq!(summary.balance, dec!(-20));
}
