//! Debounced, latest-wins remote uniqueness check for product ids.
//!
//! Every new input value takes a [`CheckTicket`] carrying a generation number. A ticket
//! stops being current as soon as a newer one is issued (or the check is cancelled):
//! - a stale ticket never reaches the store if it goes stale during the debounce window;
//! - a stale ticket's store answer is discarded and reported as `Superseded`.
//!
//! Transport failures resolve to `Valid` (fail-open): an inconclusive check never
//! blocks submission.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::store::ProductStore;

/// Result of resolving a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The id is free (or could not be checked).
    Valid,
    /// The id is already registered.
    Duplicate,
    /// A newer value was entered; this result must not be applied.
    Superseded,
}

/// One input value awaiting a uniqueness verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTicket {
    generation: u64,
    id: String,
}

impl CheckTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Remote existence check for the id field of one form.
pub struct UniquenessChecker<S: ProductStore> {
    store: Arc<S>,
    debounce: Duration,
    latest: AtomicU64,
}

impl<S: ProductStore> UniquenessChecker<S> {
    pub fn new(store: Arc<S>, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            latest: AtomicU64::new(0),
        }
    }

    /// Register a new input value. Every earlier ticket becomes stale.
    pub fn begin(&self, id: impl Into<String>) -> CheckTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        CheckTicket {
            generation,
            id: id.into(),
        }
    }

    /// Invalidate every outstanding ticket without issuing a new one.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: &CheckTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }

    /// Wait out the debounce window, then ask the store about `ticket`'s id.
    ///
    /// `current_id` is the id of the product being edited, if any; matching it is never
    /// a conflict.
    pub async fn resolve(&self, ticket: &CheckTicket, current_id: Option<&str>) -> CheckOutcome {
        if ticket.id.is_empty() || current_id == Some(ticket.id.as_str()) {
            return CheckOutcome::Valid;
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(ticket) {
            tracing::debug!(id = %ticket.id, "uniqueness check superseded during debounce");
            return CheckOutcome::Superseded;
        }

        let result = self.store.verify_exists(&ticket.id).await;
        if !self.is_current(ticket) {
            tracing::debug!(id = %ticket.id, "discarding stale uniqueness result");
            return CheckOutcome::Superseded;
        }

        match result {
            Ok(true) => CheckOutcome::Duplicate,
            Ok(false) => CheckOutcome::Valid,
            Err(err) => {
                tracing::warn!(id = %ticket.id, error = %err, "uniqueness check failed; treating id as free");
                CheckOutcome::Valid
            }
        }
    }

    /// Issue a ticket for `id` and resolve it.
    pub async fn check(&self, id: &str, current_id: Option<&str>) -> CheckOutcome {
        let ticket = self.begin(id);
        self.resolve(&ticket, current_id).await
    }
}
