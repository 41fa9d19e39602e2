//! Session orchestration: ledger engine + persistence.
//!
//! ```text
//! open(repository)      load → Ledger (empty on failure, with a warning notice)
//! add / submit / remove mutate in memory → save whole collection → notices
//! view()                fresh sorted rows + totals
//! ```
//!
//! The in-memory ledger is the source of truth for the session. A failed save
//! never rolls back the mutation that triggered it; the failure is reported on
//! the returned [`Mutation`] so callers that need durability can check it.

use thiserror::Error;

use pocketbook_core::{DomainError, TransactionId};
use pocketbook_infra::{LedgerRepository, PersistenceError};
use pocketbook_ledger::{Ledger, NewTransaction, Transaction};

use crate::form::TransactionForm;
use crate::notice::Notice;
use crate::view::LedgerView;

/// Single error type for callers that want to treat persistence as fatal.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Outcome of a mutating session operation.
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    /// Result of the save that followed the mutation (`Ok` when no save was
    /// needed).
    pub persisted: Result<(), PersistenceError>,
    pub notices: Vec<Notice>,
}

impl<T> Mutation<T> {
    pub fn is_persisted(&self) -> bool {
        self.persisted.is_ok()
    }

    /// Treat a failed save as an error.
    pub fn into_result(self) -> Result<T, SessionError> {
        self.persisted?;
        Ok(self.value)
    }
}

/// An open ledger bound to its persistence adapter.
#[derive(Debug)]
pub struct LedgerSession<R> {
    ledger: Ledger,
    repository: R,
    startup_notice: Option<Notice>,
}

impl<R> LedgerSession<R>
where
    R: LedgerRepository,
{
    /// Load the stored ledger. An unreadable store yields an empty ledger and
    /// a startup notice instead of an error.
    pub fn open(repository: R) -> Self {
        match repository.load() {
            Ok(loaded) => {
                let ledger = Ledger::from_transactions(loaded);
                tracing::info!(count = ledger.len(), "ledger opened");
                Self {
                    ledger,
                    repository,
                    startup_notice: None,
                }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to load ledger; starting empty");
                Self {
                    ledger: Ledger::new(),
                    repository,
                    startup_notice: Some(Notice::load_failed(&error)),
                }
            }
        }
    }

    /// Load the stored ledger, failing if it cannot be read.
    pub fn try_open(repository: R) -> Result<Self, SessionError> {
        let ledger = Ledger::from_transactions(repository.load()?);
        Ok(Self {
            ledger,
            repository,
            startup_notice: None,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Warning raised while opening, if any.
    pub fn startup_notice(&self) -> Option<&Notice> {
        self.startup_notice.as_ref()
    }

    pub fn add(&mut self, new: NewTransaction) -> Result<Mutation<Transaction>, DomainError> {
        let tx = self.ledger.add(new)?;
        Ok(self.persist(tx, Notice::added()))
    }

    /// Parse raw form input and add it. Invalid input never reaches the ledger.
    pub fn submit(&mut self, form: &TransactionForm) -> Result<Mutation<Transaction>, DomainError> {
        let new = form.parse()?;
        self.add(new)
    }

    /// Remove by id. Nothing is saved when the id was unknown.
    pub fn remove(&mut self, id: TransactionId) -> Mutation<bool> {
        if !self.ledger.remove(id) {
            return Mutation {
                value: false,
                persisted: Ok(()),
                notices: Vec::new(),
            };
        }
        self.persist(true, Notice::removed())
    }

    pub fn view(&self) -> LedgerView {
        LedgerView::build(&self.ledger)
    }

    fn persist<T>(&self, value: T, success: Notice) -> Mutation<T> {
        let persisted = self.repository.save(self.ledger.transactions());

        let mut notices = vec![success];
        if let Err(error) = &persisted {
            tracing::error!(%error, "failed to persist ledger; keeping in-memory state");
            notices.push(Notice::save_failed(error));
        }

        Mutation {
            value,
            persisted,
            notices,
        }
    }
}
