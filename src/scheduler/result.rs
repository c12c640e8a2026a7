/*!
 * Simulation Results
 * Per-task reports and the aggregate returned by every algorithm
 */

use super::stats::Averages;
use super::task::Task;
use super::timeline::{Interval, Timeline};
use super::types::Algorithm;
use crate::core::types::{Pid, Priority, Tick};
use serde::{Deserialize, Serialize};

/// Per-task report
///
/// One shape for every algorithm; `priority` is only present for the
/// priority discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    #[serde(rename = "id")]
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    /// First dispatch time
    pub start_time: Tick,
    pub completion_time: Tick,
    pub turnaround_time: Tick,
    pub waiting_time: Tick,
    pub remaining_time: Tick,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TaskResult {
    /// Report for a task that finished at `completion_time`
    pub fn completed(task: &Task, start_time: Tick, completion_time: Tick) -> Self {
        debug_assert!(completion_time >= task.arrival() + task.burst());
        let turnaround_time = completion_time - task.arrival();
        Self {
            pid: task.pid(),
            arrival_time: task.arrival(),
            burst_time: task.burst(),
            start_time,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - task.burst(),
            remaining_time: 0,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Aggregate result of one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Sorted by process id, regardless of execution order
    #[serde(rename = "scheduledTasks")]
    pub scheduled_tasks: Vec<TaskResult>,
    #[serde(rename = "ganttChart")]
    pub gantt_chart: Vec<Interval>,
    #[serde(rename = "averageTAT")]
    pub average_turnaround: f64,
    #[serde(rename = "averageWT")]
    pub average_waiting: f64,
}

impl SimulationResult {
    /// Sort results by pid and compute the averages at the algorithm's precision
    pub(crate) fn assemble(
        algorithm: Algorithm,
        mut scheduled_tasks: Vec<TaskResult>,
        timeline: Timeline,
    ) -> Self {
        scheduled_tasks.sort_by_key(|r| r.pid);
        let averages = Averages::compute(&scheduled_tasks, algorithm.precision());
        Self {
            scheduled_tasks,
            gantt_chart: timeline.into_intervals(),
            average_turnaround: averages.turnaround,
            average_waiting: averages.waiting,
        }
    }

    /// Result for an empty task set
    pub fn empty() -> Self {
        Self {
            scheduled_tasks: Vec::new(),
            gantt_chart: Vec::new(),
            average_turnaround: 0.0,
            average_waiting: 0.0,
        }
    }

    /// Latest completion time, or 0 when nothing ran
    pub fn makespan(&self) -> Tick {
        self.gantt_chart.last().map_or(0, |i| i.end_time)
    }

    pub fn task(&self, pid: Pid) -> Option<&TaskResult> {
        self.scheduled_tasks.iter().find(|r| r.pid == pid)
    }

    /// Intervals executed on behalf of `pid`, in order
    pub fn slices(&self, pid: Pid) -> impl Iterator<Item = &Interval> + '_ {
        self.gantt_chart
            .iter()
            .filter(move |i| i.pid() == Some(pid))
    }
}
