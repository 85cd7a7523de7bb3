//! Two-phase confirmation of destructive actions
//!
//! At most one action is pending. A new request replaces the previous one,
//! which is dropped without running.

use parking_lot::Mutex;
use std::fmt::{self, Debug, Formatter};

type Action = Box<dyn FnOnce() + Send>;

struct Pending {
    title: String,
    message: String,
    action: Action,
}

/// What the user is being asked to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    /// Dialog title
    pub title: String,
    /// Dialog body
    pub message: String,
}

/// Holds one deferred action until it is confirmed or cancelled
#[derive(Default)]
pub struct ConfirmationGate {
    pending: Mutex<Option<Pending>>,
}

impl ConfirmationGate {
    /// Gate with nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for confirmation of `action`, replacing any pending request
    pub fn request(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        action: impl FnOnce() + Send + 'static,
    ) {
        let title = title.into();
        tracing::debug!(%title, "confirmation requested");
        let previous = self.pending.lock().replace(Pending {
            title,
            message: message.into(),
            action: Box::new(action),
        });
        if let Some(previous) = previous {
            tracing::debug!(title = %previous.title, "pending confirmation superseded");
        }
    }

    /// Run the pending action, if any
    ///
    /// Returns whether an action ran. The gate is closed before the action
    /// runs, so the action may itself issue a new request.
    pub fn confirm(&self) -> bool {
        let Some(pending) = self.pending.lock().take() else {
            return false;
        };
        tracing::debug!(title = %pending.title, "confirmed");
        (pending.action)();
        true
    }

    /// Discard the pending action, returning whether there was one
    pub fn cancel(&self) -> bool {
        let cancelled = self.pending.lock().take();
        if let Some(pending) = &cancelled {
            tracing::debug!(title = %pending.title, "confirmation cancelled");
        }
        cancelled.is_some()
    }

    /// Current request, if any
    #[must_use]
    pub fn pending(&self) -> Option<PendingConfirmation> {
        self.pending.lock().as_ref().map(|p| PendingConfirmation {
            title: p.title.clone(),
            message: p.message.clone(),
        })
    }

    /// Whether a request is awaiting an answer
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending.lock().is_some()
    }
}

impl Debug for ConfirmationGate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationGate")
            .field("pending", &self.pending())
            .finish()
    }
}
