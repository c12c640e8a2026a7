/*!
 * First-Come-First-Served
 * Non-preemptive dispatch in arrival order
 */

use super::result::{SimulationResult, TaskResult};
use super::task::Task;
use super::timeline::Timeline;
use super::traits::Scheduler;
use super::types::Algorithm;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    #[instrument(name = "fcfs", level = "debug", skip_all, fields(tasks = tasks.len()))]
    fn simulate(&self, tasks: &[Task]) -> SimulationResult {
        // Stable: equal arrivals keep input order
        let mut queue = tasks.to_vec();
        queue.sort_by_key(Task::arrival);

        let mut timeline = Timeline::new();
        let mut results = Vec::with_capacity(queue.len());

        for task in &queue {
            timeline.idle_until(task.arrival());
            let start = timeline.execute(task.pid(), task.burst());
            debug!(pid = task.pid(), start, end = timeline.now(), "dispatched");
            results.push(TaskResult::completed(task, start, timeline.now()));
        }

        SimulationResult::assemble(self.algorithm(), results, timeline)
    }
}
