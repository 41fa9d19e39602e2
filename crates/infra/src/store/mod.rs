//! String-keyed persistent storage boundary.
//!
//! Mirrors a browser's local key-value storage: whole string values under
//! string keys, each `set` a single overwrite.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileStore;
pub use in_memory::InMemoryStore;
pub use r#trait::{KeyValueStore, StoreError};
