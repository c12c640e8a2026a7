/*!
 * Shortest Job First
 * Non-preemptive: the shortest arrived job runs to completion
 */

use super::result::{SimulationResult, TaskResult};
use super::task::Task;
use super::timeline::Timeline;
use super::traits::Scheduler;
use super::types::Algorithm;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJobFirst;

impl Scheduler for ShortestJobFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }

    #[instrument(name = "sjf", level = "debug", skip_all, fields(tasks = tasks.len()))]
    fn simulate(&self, tasks: &[Task]) -> SimulationResult {
        let mut pending = tasks.to_vec();
        pending.sort_by_key(Task::arrival);

        let mut timeline = Timeline::new();
        let mut results = Vec::with_capacity(pending.len());

        while let Some(earliest) = pending.first().map(Task::arrival) {
            let now = timeline.now();

            // Shortest burst, then earliest arrival, then input order
            let next = pending
                .iter()
                .enumerate()
                .filter(|(_, t)| t.arrival() <= now)
                .min_by_key(|(index, t)| (t.burst(), t.arrival(), *index))
                .map(|(index, _)| index);

            match next {
                Some(index) => {
                    let task = pending.remove(index);
                    let start = timeline.execute(task.pid(), task.burst());
                    debug!(pid = task.pid(), start, end = timeline.now(), "dispatched");
                    results.push(TaskResult::completed(&task, start, timeline.now()));
                }
                None => {
                    // Nothing has arrived; pending is arrival-sorted
                    timeline.idle_until(earliest);
                }
            }
        }

        SimulationResult::assemble(self.algorithm(), results, timeline)
    }
}
