/*!
 * Task Records
 * Caller-supplied process descriptions and their run-local state
 */

use super::result::TaskResult;
use super::types::SchedulerResult;
use crate::core::errors::SchedulerError;
use crate::core::limits::DEFAULT_PRIORITY;
use crate::core::types::{Pid, Priority, Tick};
use serde::Serialize;

/// One CPU-bound process description
///
/// Immutable once built. Algorithms copy tasks into [`RunTask`] before
/// simulating, so the caller's slice is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "processId")]
    pid: Pid,
    arrival_time: Tick,
    burst_time: Tick,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
}

impl Task {
    /// Create a task; a zero burst is rejected
    pub fn new(pid: Pid, arrival_time: Tick, burst_time: Tick) -> SchedulerResult<Self> {
        if burst_time == 0 {
            return Err(SchedulerError::InvalidTask {
                pid,
                reason: "burst time must be greater than 0".into(),
            });
        }
        Ok(Self {
            pid,
            arrival_time,
            burst_time,
            priority: None,
        })
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn arrival(&self) -> Tick {
        self.arrival_time
    }

    #[inline]
    pub fn burst(&self) -> Tick {
        self.burst_time
    }

    #[inline]
    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Priority used for ordering; tasks without one get the default
    #[inline]
    pub fn effective_priority(&self) -> Priority {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }
}

/// Mutable per-run copy of a task, owned by the running algorithm
#[derive(Debug, Clone)]
pub(crate) struct RunTask {
    task: Task,
    remaining: Tick,
    first_start: Option<Tick>,
}

impl RunTask {
    pub fn new(task: Task) -> Self {
        let remaining = task.burst();
        Self {
            task,
            remaining,
            first_start: None,
        }
    }

    #[inline]
    pub fn task(&self) -> &Task {
        &self.task
    }

    #[inline]
    pub fn remaining(&self) -> Tick {
        self.remaining
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Account for a slice of `ticks` starting at `start`
    ///
    /// Only the first slice sets the start time.
    pub fn run(&mut self, start: Tick, ticks: Tick) {
        debug_assert!(ticks > 0 && ticks <= self.remaining);
        self.first_start.get_or_insert(start);
        self.remaining -= ticks;
    }

    /// Consume the run state into its final report
    pub fn complete(self, completion: Tick) -> TaskResult {
        debug_assert!(self.is_finished());
        let start = self.first_start.unwrap_or(completion);
        TaskResult::completed(&self.task, start, completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_burst_rejected() {
        let err = Task::new(4, 0, 0).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidTask { pid: 4, .. }));
    }

    #[test]
    fn test_effective_priority_defaults() {
        let task = Task::new(1, 0, 3).unwrap();
        assert_eq!(task.priority(), None);
        assert_eq!(task.effective_priority(), DEFAULT_PRIORITY);
        assert_eq!(task.with_priority(7).effective_priority(), 7);
    }

    #[test]
    fn test_run_task_keeps_first_start() {
        let mut run = RunTask::new(Task::new(1, 0, 5).unwrap());
        run.run(0, 2);
        run.run(6, 2);
        run.run(10, 1);
        assert!(run.is_finished());

        let result = run.complete(11);
        assert_eq!(result.start_time, 0);
        assert_eq!(result.completion_time, 11);
        assert_eq!(result.remaining_time, 0);
        assert_eq!(result.waiting_time, 6);
    }

    #[test]
    fn test_task_serialization_omits_missing_priority() {
        let json = serde_json::to_string(&Task::new(2, 1, 3).unwrap()).unwrap();
        assert_eq!(json, r#"{"processId":2,"arrivalTime":1,"burstTime":3}"#);
    }
}
