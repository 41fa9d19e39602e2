//! Infrastructure layer: key-value storage, ledger persistence, config.

pub mod config;
pub mod repository;
pub mod store;

pub use config::{Config, ConfigError, LogFormat};
pub use repository::{
    KeyValueLedgerRepository, LedgerRepository, PersistenceError, TransactionRecord,
    DEFAULT_STORAGE_KEY,
};
pub use store::{FileStore, InMemoryStore, KeyValueStore, StoreError};
