use std::mem;

use tracing::{debug, warn};

use crate::models::{Transaction, TransactionDraft};
use crate::session::errors::SessionError;
use crate::storage::TransactionStore;
use crate::types::TransactionId;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Closed,
    Viewing {
        id: TransactionId
    },
    Editing {
        id: TransactionId,
        draft: TransactionDraft
    },
    /// The draft has been handed to the store and the outcome is pending.
    Saving {
        id: TransactionId,
        draft: TransactionDraft
    }
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Closed => "closed",
            SessionState::Viewing { .. } => "viewing",
            SessionState::Editing { .. } => "editing",
            SessionState::Saving { .. } => "saving"
        }
    }
}

/// View/edit lifecycle for a single transaction.
///
/// Edits happen on a draft copy. The collection the session was opened
/// against is only touched once the store confirms the update, and a failed
/// save drops back to editing with the draft intact.
#[derive(Debug)]
pub struct EditSession {
    state: SessionState
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Closed
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Closed -> Viewing.
    pub fn open(&mut self, id: &str, transactions: &[Transaction]) -> Result<(), SessionError> {
        self.expect_state("open a transaction", matches!(self.state, SessionState::Closed))?;

        if !transactions.iter().any(|transaction| transaction.id == id) {
            return Err(SessionError::NotFound(id.to_string()));
        }

        self.state = SessionState::Viewing { id: id.to_string() };

        Ok(())
    }

    /// Viewing -> Closed.
    pub fn close(&mut self) -> Result<(), SessionError> {
        self.expect_state("close", matches!(self.state, SessionState::Viewing { .. }))?;
        self.state = SessionState::Closed;

        Ok(())
    }

    /// Viewing -> Editing, seeding the draft from the current record.
    pub fn begin_edit(&mut self, transactions: &[Transaction]) -> Result<(), SessionError> {
        let SessionState::Viewing { id } = &self.state else {
            return Err(self.invalid("start editing"));
        };

        let transaction = transactions.iter()
            .find(|transaction| transaction.id == *id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;

        self.state = SessionState::Editing {
            id: transaction.id.clone(),
            draft: TransactionDraft::from_transaction(transaction)
        };

        Ok(())
    }

    pub fn draft_mut(&mut self) -> Option<&mut TransactionDraft> {
        match &mut self.state {
            SessionState::Editing { draft, .. } => Some(draft),
            _ => None
        }
    }

    /// Editing -> Closed, discarding the draft.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.expect_state("cancel", matches!(self.state, SessionState::Editing { .. }))?;
        self.state = SessionState::Closed;

        Ok(())
    }

    /// Editing -> Saving -> Closed.
    ///
    /// On success the stored version replaces the matching entry in
    /// `transactions` and is returned. On any failure the session is back in
    /// Editing with the same draft and `transactions` is untouched.
    pub async fn save<S: TransactionStore>(&mut self, store: &S, transactions: &mut [Transaction]) -> Result<Transaction, SessionError> {
        let (id, draft) = match mem::replace(&mut self.state, SessionState::Closed) {
            SessionState::Editing { id, draft } => (id, draft),
            other => {
                self.state = other;
                return Err(self.invalid("save"));
            }
        };

        if let Err(error) = draft.validate() {
            self.state = SessionState::Editing { id, draft };
            return Err(error.into());
        }

        self.state = SessionState::Saving { id: id.clone(), draft: draft.clone() };

        match store.update(&id, draft.clone()).await {
            Ok(updated) => {
                match transactions.iter_mut().find(|transaction| transaction.id == updated.id) {
                    Some(entry) => *entry = updated.clone(),
                    None => warn!("Saved transaction [{}] is no longer in the local collection", updated.id)
                }

                debug!("Transaction [{}] saved", updated.id);
                self.state = SessionState::Closed;

                Ok(updated)
            }
            Err(error) => {
                warn!("Saving transaction [{id}] failed: {error}");
                self.state = SessionState::Editing { id, draft };

                Err(error.into())
            }
        }
    }

    fn expect_state(&self, action: &'static str, allowed: bool) -> Result<(), SessionError> {
        if allowed {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.state.name()
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
