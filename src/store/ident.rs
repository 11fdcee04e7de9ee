//! Backend Identifier Generation
//!
//! Produces the unique keys that records are updated and deleted by.
//! Identifiers combine a coarse wall-clock component with a strictly
//! increasing in-process counter, so they are roughly ordered by creation
//! time while the counter alone guarantees uniqueness within a millisecond.
//! No cross-process uniqueness is provided.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Generates backend identifiers of the form `b-<millis>-<counter>`.
///
/// Safe to call from concurrent callers; within one process instance the
/// same identifier is never handed out twice.
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("b-{}-{}", now_ms(), seq)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub(crate) fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
