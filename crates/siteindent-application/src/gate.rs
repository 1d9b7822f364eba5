//! Single-flight guard for user actions.

use siteindent_core::{Result, SiteIndentError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Refuses to start an action while the same action is still in flight.
///
/// Approvals, rejections and creations are not idempotent on the backend,
/// so a double tap must not send two requests.
#[derive(Debug, Clone, Default)]
pub struct ActionGate {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key` until the returned permit is dropped.
    pub fn try_begin(&self, key: impl Into<String>) -> Result<ActionPermit> {
        let key = key.into();
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| SiteIndentError::internal("action gate poisoned"))?;

        if !in_flight.insert(key.clone()) {
            return Err(SiteIndentError::Busy(key));
        }

        Ok(ActionPermit {
            key,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight
            .lock()
            .map(|in_flight| in_flight.contains(key))
            .unwrap_or(false)
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct ActionPermit {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for ActionPermit {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.remove(&self.key);
        }
    }
}
