//! Opaque identifiers for accounts and acts.
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const SUFFIX_LEN: usize = 4;

/// Build an ID from a sequence number and a random suffix.
/// Format: `<sequence>_<hex suffix>`, e.g. `17_9f3a`.
///
/// The sequence number alone makes IDs unique within a collection; the suffix
/// keeps them from being guessable. Only `[0-9a-f_]` is used, so IDs can be
/// embedded in a URL path segment as-is.
pub fn generate_id(sequence: u64) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();
    format!("{}_{}", sequence, suffix)
}

/// Monotonic in-process counter backing ID generation for the memory backend.
#[derive(Debug, Default)]
pub struct IdSequence {
    last: AtomicU64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically increment the counter and mint an ID from the new value.
    pub fn next_id(&self) -> String {
        let sequence = self.last.fetch_add(1, Ordering::SeqCst) + 1;
        generate_id(sequence)
    }
}
