/*!
 * Task Registry
 * In-memory store assigning sequential identifiers to submitted tasks
 */

use crate::core::id::{AtomicGenerator, IdGenerator};
use crate::core::limits::MAX_REGISTERED_TASKS;
use crate::core::types::TaskId;
use crate::scheduler::Task;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// A task together with its registry identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredTask {
    pub id: TaskId,
    #[serde(flatten)]
    pub task: Task,
}

/// Registry of every task submitted to the service
///
/// Identifiers start at 1 and are never reused, even after `clear`.
/// Once `capacity` tasks are held, each new task evicts the oldest one.
#[derive(Clone)]
pub struct TaskRegistry {
    ids: AtomicGenerator,
    tasks: Arc<RwLock<VecDeque<RegisteredTask>>>,
    capacity: usize,
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::with_capacity(MAX_REGISTERED_TASKS)
    }
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: AtomicGenerator::default(),
            tasks: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a task and return it with its new id
    pub fn add(&self, task: Task) -> RegisteredTask {
        let entry = RegisteredTask {
            id: self.ids.next(),
            task,
        };
        let evicted = {
            let mut tasks = self.tasks.write();
            tasks.push_back(entry.clone());
            let excess = tasks.len().saturating_sub(self.capacity);
            tasks.drain(..excess).count()
        };
        debug!(id = entry.id, pid = entry.task.pid(), evicted, "Task registered");
        entry
    }

    /// Register a batch, preserving order
    pub fn add_all(&self, tasks: impl IntoIterator<Item = Task>) -> Vec<RegisteredTask> {
        tasks.into_iter().map(|task| self.add(task)).collect()
    }

    pub fn all(&self) -> Vec<RegisteredTask> {
        self.tasks.read().iter().cloned().collect()
    }

    pub fn get(&self, id: TaskId) -> Option<RegisteredTask> {
        self.tasks.read().iter().find(|t| t.id == id).cloned()
    }

    /// Replace the task stored under `id`
    pub fn update(&self, id: TaskId, task: Task) -> Option<RegisteredTask> {
        let mut tasks = self.tasks.write();
        let slot = tasks.iter_mut().find(|t| t.id == id)?;
        slot.task = task;
        Some(slot.clone())
    }

    pub fn remove(&self, id: TaskId) -> bool {
        let mut tasks = self.tasks.write();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        tasks.len() < before
    }

    pub fn clear(&self) {
        self.tasks.write().clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
