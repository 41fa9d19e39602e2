//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a recorded transaction.
///
/// Stored as a plain integer so ledgers written with millisecond-timestamp ids
/// load unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for TransactionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<TransactionId> for u64 {
    fn from(value: TransactionId) -> Self {
        value.0
    }
}

impl FromStr for TransactionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("TransactionId: {e}")))?;
        Ok(Self(raw))
    }
}

/// Monotonic identifier source.
///
/// Ids are handed out strictly increasing regardless of call timing. After
/// loading existing data, call [`IdSequence::observe`] for each loaded id so
/// the sequence resumes above them. Once `u64::MAX` has been used or observed
/// the sequence is exhausted and hands out nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: Option<u64>,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Make sure future ids are strictly greater than `seen`.
    pub fn observe(&mut self, seen: TransactionId) {
        if self.next.is_some_and(|next| seen.0 >= next) {
            self.next = seen.0.checked_add(1);
        }
    }

    /// Next unused id, or `None` when the id space is exhausted.
    pub fn next_id(&mut self) -> Option<TransactionId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(TransactionId(id))
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
