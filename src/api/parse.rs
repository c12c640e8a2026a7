/*!
 * Request Parsing
 * Turns whitespace-separated input lists into validated tasks
 */

use super::types::{ApiError, ApiResult, ScheduleRequest};
use crate::core::errors::SchedulerError;
use crate::core::limits::{
    MAX_DISPATCHES_PER_REQUEST, MAX_SIMULATION_TICKS, MAX_TASKS_PER_REQUEST,
};
use crate::core::types::{Pid, Priority};
use crate::scheduler::{Algorithm, Policy, Task};
use tracing::trace;

/// Parse a whitespace-separated list of integers
pub fn parse_list(field: &str, raw: &str) -> ApiResult<Vec<i64>> {
    raw.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token.parse::<i64>().map_err(|_| {
                ApiError::InvalidRequest(format!(
                    "{}: value #{} ({:?}) is not an integer",
                    field,
                    i + 1,
                    token
                ))
            })
        })
        .collect()
}

/// Resolve the policy for `algorithm`, validating the quantum for round-robin
pub fn build_policy(algorithm: Algorithm, request: &ScheduleRequest) -> ApiResult<Policy> {
    Ok(match algorithm {
        Algorithm::Fcfs => Policy::Fcfs,
        Algorithm::Sjf => Policy::Sjf,
        Algorithm::Priority => Policy::Priority,
        Algorithm::RoundRobin => {
            let quantum = request
                .quantum
                .as_ref()
                .ok_or_else(|| {
                    ApiError::InvalidRequest("quantum is required for round-robin".into())
                })?
                .resolve()?;
            Policy::round_robin(quantum)?
        }
    })
}

/// Build tasks with pids `1..=n` from the request lists
pub fn build_tasks(algorithm: Algorithm, request: &ScheduleRequest) -> ApiResult<Vec<Task>> {
    let arrivals = parse_list("arrivalTimes", &request.arrival_times)?;
    let bursts = parse_list("burstTimes", &request.burst_times)?;

    if arrivals.len() != bursts.len() {
        return Err(ApiError::InvalidRequest(format!(
            "arrivalTimes has {} values but burstTimes has {}",
            arrivals.len(),
            bursts.len()
        )));
    }
    if arrivals.len() > MAX_TASKS_PER_REQUEST {
        return Err(ApiError::InvalidRequest(format!(
            "at most {} tasks per request, got {}",
            MAX_TASKS_PER_REQUEST,
            arrivals.len()
        )));
    }

    let priorities = match request.priorities.as_deref() {
        Some(raw) => {
            let values = parse_list("priorities", raw)?;
            if values.len() != arrivals.len() {
                return Err(ApiError::InvalidRequest(format!(
                    "priorities has {} values but there are {} tasks",
                    values.len(),
                    arrivals.len()
                )));
            }
            Some(values)
        }
        None if algorithm == Algorithm::Priority => {
            return Err(ApiError::InvalidRequest(
                "priorities are required for the priority algorithm".into(),
            ));
        }
        None => None,
    };

    arrivals
        .iter()
        .zip(&bursts)
        .enumerate()
        .map(|(i, (&arrival, &burst))| -> ApiResult<Task> {
            let pid = Pid::try_from(i + 1)
                .map_err(|_| ApiError::InvalidRequest("too many tasks".into()))?;
            let arrival =
                u64::try_from(arrival).map_err(|_| invalid(pid, "arrival time must be >= 0"))?;
            let burst =
                u64::try_from(burst).map_err(|_| invalid(pid, "burst time must be greater than 0"))?;

            let mut task = Task::new(pid, arrival, burst)
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
            if let Some(values) = &priorities {
                let priority = Priority::try_from(values[i])
                    .map_err(|_| invalid(pid, "priority out of range"))?;
                task = task.with_priority(priority);
            }
            Ok(task)
        })
        .collect()
}

/// Reject workloads whose timeline would exceed the simulation bounds
///
/// The makespan never exceeds the latest arrival plus the total burst, and
/// the timeline holds at most one idle gap per task plus one interval per
/// dispatch (`ceil(burst / quantum)` under round-robin).
pub fn check_workload(policy: Policy, tasks: &[Task]) -> ApiResult<()> {
    let latest_arrival = tasks.iter().map(Task::arrival).max().unwrap_or(0);
    let horizon = tasks
        .iter()
        .try_fold(latest_arrival, |acc, t| acc.checked_add(t.burst()))
        .filter(|&ticks| ticks <= MAX_SIMULATION_TICKS)
        .ok_or_else(|| {
            ApiError::InvalidRequest(format!(
                "latest arrival plus total burst must not exceed {} ticks",
                MAX_SIMULATION_TICKS
            ))
        })?;

    let slices: u64 = match policy.quantum() {
        Some(quantum) => {
            let q = quantum.as_ticks();
            tasks.iter().map(|t| t.burst().div_ceil(q)).sum()
        }
        None => tasks.len() as u64,
    };
    let dispatches = slices + tasks.len() as u64;
    if dispatches > MAX_DISPATCHES_PER_REQUEST {
        return Err(ApiError::InvalidRequest(format!(
            "workload needs up to {} timeline intervals, limit is {}",
            dispatches, MAX_DISPATCHES_PER_REQUEST
        )));
    }

    trace!(horizon, dispatches, "Workload within bounds");
    Ok(())
}

fn invalid(pid: Pid, reason: &str) -> ApiError {
    ApiError::InvalidRequest(
        SchedulerError::InvalidTask {
            pid,
            reason: reason.into(),
        }
        .to_string(),
    )
}
