/*!
 * Scheduler Module
 * Offline uniprocessor scheduling: FCFS, SJF, Priority and Round-Robin
 */

mod entry;
pub mod fcfs;
pub mod priority;
pub mod result;
pub mod round_robin;
pub mod sjf;
pub mod stats;
pub mod task;
pub mod timeline;
pub mod traits;
pub mod types;

// Re-export public API
pub use fcfs::Fcfs;
pub use priority::PriorityScheduler;
pub use result::{SimulationResult, TaskResult};
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;
pub use stats::{rounded_mean, Averages};
pub use task::Task;
pub use timeline::{Interval, Occupant, Timeline};
pub use traits::Scheduler;
pub use types::{Algorithm, Policy, SchedulerResult, TimeQuantum};

impl Policy {
    /// Run this policy over `tasks`
    pub fn simulate(&self, tasks: &[Task]) -> SimulationResult {
        match *self {
            Policy::Fcfs => Fcfs.simulate(tasks),
            Policy::Sjf => ShortestJobFirst.simulate(tasks),
            Policy::Priority => PriorityScheduler.simulate(tasks),
            Policy::RoundRobin { quantum } => RoundRobin::new(quantum).simulate(tasks),
        }
    }
}

/// Run `policy` over `tasks`
///
/// Pure function of its inputs; the caller's tasks are never modified.
pub fn schedule(policy: Policy, tasks: &[Task]) -> SimulationResult {
    policy.simulate(tasks)
}
