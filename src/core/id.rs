/*!
 * ID Generation
 * Sequential identifiers for registered tasks and history entries
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generic ID generator interface
pub trait IdGenerator<T> {
    /// Generate next ID
    fn next(&self) -> T;

    /// Get current counter value (the ID `next` would return)
    fn current(&self) -> T;
}

/// Atomic counter shared between clones
///
/// IDs are never reused: registry and history IDs must stay stable for
/// clients holding them after a delete.
#[repr(C, align(64))]
pub struct AtomicGenerator {
    counter: Arc<AtomicU64>,
}

impl AtomicGenerator {
    /// Create new generator starting at given value
    #[inline]
    pub fn new(start: u64) -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Create new generator starting at 1
    #[inline]
    pub fn default_start() -> Self {
        Self::new(1)
    }

    /// Move the counter past `seen` (used when restoring persisted entries)
    pub fn advance_past(&self, seen: u64) {
        self.counter.fetch_max(seen.saturating_add(1), Ordering::SeqCst);
    }
}

impl Clone for AtomicGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: Arc::clone(&self.counter),
        }
    }
}

impl Default for AtomicGenerator {
    fn default() -> Self {
        Self::default_start()
    }
}

impl IdGenerator<u64> for AtomicGenerator {
    #[inline]
    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    #[inline]
    fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}
