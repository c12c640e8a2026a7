/*!
 * Round-Robin Scheduling
 * Preemptive FIFO rotation with a fixed time quantum
 */

use super::result::SimulationResult;
use super::task::{RunTask, Task};
use super::timeline::Timeline;
use super::traits::Scheduler;
use super::types::{Algorithm, SchedulerResult, TimeQuantum};
use crate::core::types::Tick;
use std::collections::VecDeque;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: TimeQuantum,
}

impl RoundRobin {
    pub fn new(quantum: TimeQuantum) -> Self {
        Self { quantum }
    }

    /// Build from a raw quantum; `quantum <= 0` fails before any state exists
    pub fn with_quantum(quantum: i64) -> SchedulerResult<Self> {
        Ok(Self::new(TimeQuantum::new(quantum)?))
    }

    pub fn quantum(&self) -> TimeQuantum {
        self.quantum
    }
}

/// Move every task that has arrived by `now` to the back of the ready queue
fn admit(pending: &mut VecDeque<RunTask>, ready: &mut VecDeque<RunTask>, now: Tick) {
    while pending.front().is_some_and(|t| t.task().arrival() <= now) {
        if let Some(task) = pending.pop_front() {
            ready.push_back(task);
        }
    }
}

impl Scheduler for RoundRobin {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    #[instrument(
        name = "round_robin",
        level = "debug",
        skip_all,
        fields(tasks = tasks.len(), quantum = self.quantum.as_ticks())
    )]
    fn simulate(&self, tasks: &[Task]) -> SimulationResult {
        let quantum = self.quantum.as_ticks();

        let mut sorted = tasks.to_vec();
        sorted.sort_by_key(Task::arrival);
        let mut pending: VecDeque<RunTask> = sorted.into_iter().map(RunTask::new).collect();

        let mut ready: VecDeque<RunTask> = VecDeque::with_capacity(pending.len());
        let mut timeline = Timeline::new();
        let mut results = Vec::with_capacity(pending.len());

        loop {
            admit(&mut pending, &mut ready, timeline.now());

            let Some(mut current) = ready.pop_front() else {
                match pending.front() {
                    Some(next) => {
                        timeline.idle_until(next.task().arrival());
                        continue;
                    }
                    None => break,
                }
            };

            let pid = current.task().pid();
            let slice = current.remaining().min(quantum);
            let start = timeline.execute(pid, slice);
            current.run(start, slice);
            debug!(pid, start, end = timeline.now(), remaining = current.remaining(), "slice");

            // Arrivals during the slice queue up ahead of the preempted task
            admit(&mut pending, &mut ready, timeline.now());

            if current.is_finished() {
                results.push(current.complete(timeline.now()));
            } else {
                ready.push_back(current);
            }
        }

        SimulationResult::assemble(self.algorithm(), results, timeline)
    }
}
