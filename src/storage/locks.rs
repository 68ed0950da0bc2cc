//! Named Lock Coordination
//!
//! In-process advisory locking keyed by logical name (typically a domain),
//! used to keep two tasks in the same process from issuing a certificate for
//! the same name concurrently. Per name the state machine is
//! Unclaimed -> Claimed -> Unclaimed; at most one outstanding claim exists
//! at any time.
//!
//! `try_lock` never blocks: either the caller acquires the claim, or it gets
//! a [`Waiter`] it may block on until the current holder releases. The
//! check-and-insert is a single atomic step under the table mutex, which is
//! held only for the map operation, never across an await.
//!
//! This is advisory and process-local only. It does not prevent two separate
//! processes from issuing for the same domain; cross-process coordination is
//! out of scope for this layer.

use crate::storage::error::StorageError;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::watch;

/// Handle for waiting on another caller's claim to be released.
///
/// Resolving does not grant the lock; the waiter is expected to call
/// [`LockTable::try_lock`] again afterwards (or treat the wait as purely
/// informational).
#[derive(Debug)]
pub struct Waiter {
    released: watch::Receiver<bool>,
}

impl Waiter {
    /// Wait until the claim this waiter observed is released.
    pub async fn wait(mut self) {
        // A dropped sender means the claim is gone too.
        let _ = self.released.wait_for(|released| *released).await;
    }
}

/// Table of outstanding named claims.
///
/// Owned by the storage facade instance; not a process global.
#[derive(Debug, Default)]
pub struct LockTable {
    claims: Mutex<HashMap<String, watch::Sender<bool>>>,
}

impl LockTable {
    /// Create an empty lock table.
    pub fn new() -> Self {
        LockTable {
            claims: Mutex::new(HashMap::new()),
        }
    }

    /// Attempt to claim `name`.
    ///
    /// Returns `None` if the caller now holds the claim, or `Some(Waiter)`
    /// on the existing claim without acquiring it. Returns immediately in
    /// both cases.
    pub fn try_lock(&self, name: &str) -> Option<Waiter> {
        let mut claims = self.claims.lock();
        match claims.entry(name.to_string()) {
            Entry::Occupied(entry) => Some(Waiter {
                released: entry.get().subscribe(),
            }),
            Entry::Vacant(entry) => {
                let (tx, _rx) = watch::channel(false);
                entry.insert(tx);
                None
            }
        }
    }

    /// Release the claim on `name` and wake all waiters.
    ///
    /// Fails with [`StorageError::NoSuchLock`] if `name` holds no claim;
    /// that is a caller-contract violation, not a transient condition.
    pub fn unlock(&self, name: &str) -> Result<(), StorageError> {
        let mut claims = self.claims.lock();
        match claims.remove(name) {
            Some(tx) => {
                let _ = tx.send(true);
                Ok(())
            }
            None => Err(StorageError::NoSuchLock(name.to_string())),
        }
    }

    /// Number of outstanding claims (for testing).
    pub fn claimed_count(&self) -> usize {
        self.claims.lock().len()
    }
}
