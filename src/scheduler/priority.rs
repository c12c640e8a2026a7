/*!
 * Static Priority Scheduling
 * Non-preemptive: priority is consulted only at dispatch boundaries
 */

use super::entry::ReadyEntry;
use super::result::{SimulationResult, TaskResult};
use super::task::Task;
use super::timeline::Timeline;
use super::traits::Scheduler;
use super::types::Algorithm;
use std::collections::{BinaryHeap, VecDeque};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Priority
    }

    #[instrument(name = "priority", level = "debug", skip_all, fields(tasks = tasks.len()))]
    fn simulate(&self, tasks: &[Task]) -> SimulationResult {
        let mut sorted = tasks.to_vec();
        sorted.sort_by_key(Task::arrival);
        let mut pending: VecDeque<Task> = sorted.into();

        let mut ready = BinaryHeap::with_capacity(pending.len());
        let mut sequence = 0u64;
        let mut timeline = Timeline::new();
        let mut results = Vec::with_capacity(pending.len());

        loop {
            while pending
                .front()
                .is_some_and(|t| t.arrival() <= timeline.now())
            {
                if let Some(task) = pending.pop_front() {
                    ready.push(ReadyEntry::new(task, sequence));
                    sequence += 1;
                }
            }

            match ready.pop() {
                Some(ReadyEntry { task, priority, .. }) => {
                    let start = timeline.execute(task.pid(), task.burst());
                    debug!(
                        pid = task.pid(),
                        priority,
                        start,
                        end = timeline.now(),
                        "dispatched"
                    );
                    results.push(
                        TaskResult::completed(&task, start, timeline.now()).with_priority(priority),
                    );
                }
                None => match pending.front() {
                    Some(next) => {
                        timeline.idle_until(next.arrival());
                    }
                    None => break,
                },
            }
        }

        SimulationResult::assemble(self.algorithm(), results, timeline)
    }
}
