//! Confirmation gate in front of DELETE calls.
//!
//! `Idle -> ConfirmPending -> Deleting -> (Idle | ErrorShown)`

use crate::error::AdminError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState<K> {
    Idle,
    ConfirmPending { target: K },
    Deleting { target: K },
    ErrorShown { target: K, error: String },
}

#[derive(Debug, Clone)]
pub struct DeleteFlow<K> {
    state: DeleteState<K>,
}

impl<K> Default for DeleteFlow<K> {
    fn default() -> Self {
        Self {
            state: DeleteState::Idle,
        }
    }
}

impl<K: Clone + PartialEq + std::fmt::Debug> DeleteFlow<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeleteState<K> {
        &self.state
    }

    /// Whether the confirmation dialog is showing.
    pub fn is_open(&self) -> bool {
        !matches!(self.state, DeleteState::Idle)
    }

    pub fn target(&self) -> Option<&K> {
        match &self.state {
            DeleteState::Idle => None,
            DeleteState::ConfirmPending { target }
            | DeleteState::Deleting { target }
            | DeleteState::ErrorShown { target, .. } => Some(target),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            DeleteState::ErrorShown { error, .. } => Some(error),
            _ => None,
        }
    }

    /// User clicked delete. Ignored while a delete is in flight.
    pub fn request(&mut self, target: K) -> bool {
        if matches!(self.state, DeleteState::Deleting { .. }) {
            return false;
        }
        self.state = DeleteState::ConfirmPending { target };
        true
    }

    /// Close the dialog. Not possible while deleting.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.state, DeleteState::Deleting { .. }) {
            return false;
        }
        self.state = DeleteState::Idle;
        true
    }

    /// User confirmed; returns the target to delete. Confirming again from
    /// the error state is a manual retry.
    pub fn confirm(&mut self) -> Option<K> {
        let target = match &self.state {
            DeleteState::ConfirmPending { target } | DeleteState::ErrorShown { target, .. } => {
                target.clone()
            }
            DeleteState::Idle | DeleteState::Deleting { .. } => return None,
        };
        self.state = DeleteState::Deleting {
            target: target.clone(),
        };
        Some(target)
    }

    /// Outcome of the DELETE call. Returns the target on success so the
    /// caller can drop it from the visible list.
    pub fn resolve(&mut self, result: Result<(), AdminError>) -> Option<K> {
        let target = match &self.state {
            DeleteState::Deleting { target } => target.clone(),
            other => {
                tracing::debug!(state = ?other, "delete resolved outside of Deleting state");
                return None;
            }
        };

        match result {
            Ok(()) => {
                self.state = DeleteState::Idle;
                Some(target)
            }
            Err(e) => {
                tracing::warn!(key = ?target, error = %e, "delete failed");
                self.state = DeleteState::ErrorShown {
                    target,
                    error: e.user_message(),
                };
                None
            }
        }
    }
}
