//! Session-scoped interaction state.
//!
//! A [`Session`] holds what one user's interaction needs between requests:
//! whether the password gate was passed, the current search text, and the
//! delete-confirmation state. It lives outside the [`Reconciler`] and is
//! passed in where the engine needs it.
//!
//! # Lifecycle
//!
//! A new session starts unauthenticated with no pending delete and an empty
//! search. [`Session::logout`] returns it to exactly that state.
//!
//! # Delete confirmation
//!
//! ```text
//! Idle ──request(non-empty)──▶ PendingConfirmation{selection}
//!   ▲                               │
//!   └──────── confirm / cancel ─────┘
//! ```
//!
//! `confirm` deletes the selection captured at request time. Changing the
//! grid selection while a delete is pending does not cancel it; the captured
//! selection is what gets deleted.

use std::collections::BTreeSet;

use glasstock_sheet::SheetStore;
use tracing::{debug, info};

use crate::error::InventoryError;
use crate::model::{RecordId, Table};
use crate::reconcile::Reconciler;

// ---------------------------------------------------------------------------
// PasswordGate
// ---------------------------------------------------------------------------

/// Fixed shared-secret gate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordGate {
    secret: Option<String>,
}

impl PasswordGate {
    /// A gate requiring `secret`. `None` lets everyone in.
    #[must_use]
    pub const fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    /// Whether a password is required at all.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.secret.is_none()
    }

    /// Check an attempt against the secret.
    #[must_use]
    pub fn check(&self, attempt: &str) -> bool {
        self.secret.as_deref().is_none_or(|secret| secret == attempt)
    }
}

// ---------------------------------------------------------------------------
// DeleteFlow
// ---------------------------------------------------------------------------

/// The delete-confirmation state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DeleteFlow {
    /// No delete requested.
    #[default]
    Idle,
    /// A delete was requested and awaits confirmation.
    PendingConfirmation {
        /// The ids selected when the delete was requested.
        selection: BTreeSet<RecordId>,
    },
}

/// Result of [`DeleteFlow::request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The selection was captured; confirmation is pending.
    AwaitingConfirmation,
    /// The selection was empty; nothing is pending.
    NothingSelected,
}

impl DeleteFlow {
    /// `true` while a delete awaits confirmation.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::PendingConfirmation { .. })
    }

    /// The captured selection, if a delete is pending.
    #[must_use]
    pub const fn selection(&self) -> Option<&BTreeSet<RecordId>> {
        match self {
            Self::Idle => None,
            Self::PendingConfirmation { selection } => Some(selection),
        }
    }

    /// Ask to delete `selection`. An empty selection leaves the state as it is.
    ///
    /// A second request while one is pending replaces the captured selection.
    pub fn request(&mut self, selection: BTreeSet<RecordId>) -> RequestOutcome {
        if selection.is_empty() {
            return RequestOutcome::NothingSelected;
        }
        debug!(selected = selection.len(), "delete requested");
        *self = Self::PendingConfirmation { selection };
        RequestOutcome::AwaitingConfirmation
    }

    /// Confirm the pending delete and perform it.
    ///
    /// The flow returns to `Idle` before the delete runs, so a failed
    /// delete is not retried by a second confirm. Returns `None` when no
    /// delete was pending.
    ///
    /// # Errors
    /// Returns the delete's storage error.
    pub fn confirm<S: SheetStore>(
        &mut self,
        reconciler: &Reconciler<S>,
    ) -> Result<Option<Table>, InventoryError> {
        match std::mem::take(self) {
            Self::Idle => Ok(None),
            Self::PendingConfirmation { selection } => {
                info!(selected = selection.len(), "delete confirmed");
                reconciler.delete(&selection).map(Some)
            }
        }
    }

    /// Drop the pending delete without touching the inventory.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            debug!("delete cancelled");
        }
        *self = Self::Idle;
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One user's interaction state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
    pending_delete: DeleteFlow,
    /// Current search text of the grid.
    pub search: String,
}

impl Session {
    /// A fresh, unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the password gate was passed.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Try to pass the gate. Returns whether the session is now authenticated.
    pub fn login(&mut self, gate: &PasswordGate, attempt: &str) -> bool {
        self.authenticated = gate.check(attempt);
        if !self.authenticated {
            debug!("login rejected");
        }
        self.authenticated
    }

    /// Reset the session to its initial state.
    pub fn logout(&mut self) {
        *self = Self::new();
    }

    /// Fail with [`InventoryError::AccessDenied`] unless authenticated.
    ///
    /// # Errors
    /// Returns `AccessDenied` when the gate has not been passed.
    pub const fn require_auth(&self) -> Result<(), InventoryError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(InventoryError::AccessDenied)
        }
    }

    /// Current delete-confirmation state.
    #[must_use]
    pub const fn pending_delete(&self) -> &DeleteFlow {
        &self.pending_delete
    }

    /// See [`DeleteFlow::request`].
    pub fn request_delete(&mut self, selection: BTreeSet<RecordId>) -> RequestOutcome {
        self.pending_delete.request(selection)
    }

    /// See [`DeleteFlow::confirm`]. The session must be authenticated.
    ///
    /// # Errors
    /// Returns `AccessDenied` for an unauthenticated session (the pending
    /// delete is kept), or the delete's storage error.
    pub fn confirm_delete<S: SheetStore>(
        &mut self,
        reconciler: &Reconciler<S>,
    ) -> Result<Option<Table>, InventoryError> {
        self.require_auth()?;
        self.pending_delete.confirm(reconciler)
    }

    /// See [`DeleteFlow::cancel`].
    pub fn cancel_delete(&mut self) {
        self.pending_delete.cancel();
    }
}
