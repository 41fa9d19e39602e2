//! Ledger persistence adapter.
//!
//! The whole collection is serialized as one JSON array under a single key and
//! rewritten on every save; there is no incremental persistence.
//!
//! Record shape (compatible with data written by the original browser page):
//!
//! ```text
//! { "id": 1704844800000, "date": "2024-01-10", "description": "Salary",
//!   "amount": 5000000, "type": "Pemasukan" }
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};
use thiserror::Error;

use pocketbook_core::{DomainError, TransactionId};
use pocketbook_ledger::{parse_date, Amount, Transaction, TransactionKind};

use crate::store::{KeyValueStore, StoreError};

/// Well-known storage key for the transaction array.
pub const DEFAULT_STORAGE_KEY: &str = "transactions";

/// Persistence failure (load or save).
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("stored ledger is unreadable: {0}")]
    Decode(String),

    #[error("failed to encode ledger: {0}")]
    Encode(String),
}

/// Loads and saves the full transaction collection.
pub trait LedgerRepository {
    /// Stored transactions in stored order. Empty when nothing was stored.
    fn load(&self) -> Result<Vec<Transaction>, PersistenceError>;

    /// Overwrite the stored collection.
    fn save(&self, transactions: &[Transaction]) -> Result<(), PersistenceError>;
}

/// Serialized form of one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: u64,
    pub date: String,
    #[serde(default)]
    pub description: String,
    /// `null` in legacy data where the amount failed to parse.
    pub amount: Option<Number>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TransactionRecord {
    pub fn encode(tx: &Transaction) -> Result<Self, PersistenceError> {
        let amount = encode_amount(tx.amount()).ok_or_else(|| {
            PersistenceError::Encode(format!("amount {} of {} is not representable", tx.amount(), tx.id()))
        })?;

        Ok(Self {
            id: tx.id().as_u64(),
            date: tx.date().format("%Y-%m-%d").to_string(),
            description: tx.description().to_string(),
            amount: Some(amount),
            kind: tx.kind().label().to_string(),
        })
    }

    pub fn decode(&self) -> Result<Transaction, DomainError> {
        let kind = TransactionKind::from_label(&self.kind)
            .ok_or_else(|| DomainError::invalid_type(format!("unknown label '{}'", self.kind)))?;
        // Parsed from the number's exact text, never through f64.
        let amount = match self.amount {
            Some(ref number) => Amount::parse(&number.to_string())?,
            None => return Err(DomainError::invalid_amount("amount is missing")),
        };
        let date = parse_date(&self.date)?;

        Ok(Transaction::new(
            TransactionId::from_raw(self.id),
            date,
            self.description.clone(),
            amount,
            kind,
        ))
    }
}

/// Exact JSON number for an amount: `5000000`, `2500.5`.
fn encode_amount(amount: Amount) -> Option<Number> {
    Number::from_str(&amount.value().normalize().to_string()).ok()
}

/// Decode a stored document, skipping records that fail validation.
pub fn decode_document(raw: &str) -> Result<Vec<Transaction>, PersistenceError> {
    // A stored `null` reads as an empty ledger.
    let values: Vec<JsonValue> = serde_json::from_str::<Option<Vec<JsonValue>>>(raw)
        .map_err(|e| PersistenceError::Decode(e.to_string()))?
        .unwrap_or_default();

    let mut transactions = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let decoded = serde_json::from_value::<TransactionRecord>(value)
            .map_err(|e| DomainError::validation(e.to_string()))
            .and_then(|record| record.decode());

        match decoded {
            Ok(tx) => transactions.push(tx),
            Err(error) => {
                tracing::warn!(index, %error, "skipping unreadable stored transaction");
            }
        }
    }

    Ok(transactions)
}

/// Encode the collection as the stored JSON array.
pub fn encode_document(transactions: &[Transaction]) -> Result<String, PersistenceError> {
    let records = transactions
        .iter()
        .map(TransactionRecord::encode)
        .collect::<Result<Vec<_>, _>>()?;
    serde_json::to_string(&records).map_err(|e| PersistenceError::Encode(e.to_string()))
}

/// [`LedgerRepository`] over any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct KeyValueLedgerRepository<S> {
    store: S,
    key: String,
}

impl<S> KeyValueLedgerRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> LedgerRepository for KeyValueLedgerRepository<S>
where
    S: KeyValueStore,
{
    fn load(&self) -> Result<Vec<Transaction>, PersistenceError> {
        let Some(raw) = self.store.get(&self.key)? else {
            tracing::debug!(key = %self.key, "no stored ledger; starting empty");
            return Ok(Vec::new());
        };

        let transactions = decode_document(&raw)?;
        tracing::debug!(key = %self.key, count = transactions.len(), "ledger loaded");
        Ok(transactions)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), PersistenceError> {
        let document = encode_document(transactions)?;
        self.store.set(&self.key, &document)?;
        tracing::debug!(key = %self.key, count = transactions.len(), "ledger saved");
        Ok(())
    }
}

impl<R> LedgerRepository for &R
where
    R: LedgerRepository + ?Sized,
{
    fn load(&self) -> Result<Vec<Transaction>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), PersistenceError> {
        (**self).save(transactions)
    }
}
