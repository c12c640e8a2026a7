/*!
 * Ready Queue Entries
 * Composite ordering key for the priority discipline
 */

use super::task::Task;
use crate::core::types::{Priority, Tick};
use std::cmp::Ordering;

/// Task waiting in the priority ready set
///
/// Ordered by (priority, arrival, admission sequence), smallest first.
#[derive(Debug, Clone)]
pub(super) struct ReadyEntry {
    pub priority: Priority,
    pub arrival: Tick,
    pub sequence: u64,
    pub task: Task,
}

impl ReadyEntry {
    pub fn new(task: Task, sequence: u64) -> Self {
        Self {
            priority: task.effective_priority(),
            arrival: task.arrival(),
            sequence,
            task,
        }
    }

    #[inline]
    fn key(&self) -> (Priority, Tick, u64) {
        (self.priority, self.arrival, self.sequence)
    }
}

impl PartialEq for ReadyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ReadyEntry {}

impl Ord for ReadyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so the smallest key must compare greatest
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for ReadyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
