/*!
 * Scheduling Property Tests
 * Invariants every discipline must uphold on arbitrary workloads
 */

use cpu_scheduler::scheduler::{schedule, Policy, SimulationResult, Task};
use proptest::prelude::*;
use std::collections::HashMap;

fn workload() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((0u64..20, 1u64..10, -5i32..5), 0..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, priority))| {
                Task::new(i as u32 + 1, arrival, burst)
                    .unwrap()
                    .with_priority(priority)
            })
            .collect()
    })
}

fn policy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(Policy::Fcfs),
        Just(Policy::Sjf),
        Just(Policy::Priority),
        (1i64..6).prop_map(|q| Policy::round_robin(q).unwrap()),
    ]
}

/// Digits after the decimal point in the shortest representation of `value`
fn decimals(value: f64) -> usize {
    let text = value.to_string();
    text.split_once('.').map_or(0, |(_, frac)| frac.len())
}

fn check_timeline(tasks: &[Task], result: &SimulationResult) {
    let chart = &result.gantt_chart;
    if tasks.is_empty() {
        assert!(chart.is_empty());
        return;
    }

    // Contiguous from zero, every interval non-empty
    assert_eq!(chart[0].start_time, 0);
    for pair in chart.windows(2) {
        assert_eq!(pair[0].end_time, pair[1].start_time);
    }
    assert!(chart.iter().all(|i| i.end_time > i.start_time));

    // Idle time only ever ends at an arrival
    let arrivals: Vec<u64> = tasks.iter().map(Task::arrival).collect();
    for idle in chart.iter().filter(|i| i.is_idle()) {
        assert!(arrivals.contains(&idle.end_time));
    }

    let mut busy: HashMap<u32, u64> = HashMap::new();
    for slice in chart.iter().filter(|i| !i.is_idle()) {
        *busy.entry(slice.pid().unwrap()).or_default() += slice.duration();
    }
    for task in tasks {
        assert_eq!(busy.get(&task.pid()), Some(&task.burst()));
    }
}

fn check_metrics(tasks: &[Task], result: &SimulationResult) {
    assert_eq!(result.scheduled_tasks.len(), tasks.len());
    let pids: Vec<u32> = result.scheduled_tasks.iter().map(|r| r.pid).collect();
    let mut sorted = pids.clone();
    sorted.sort_unstable();
    assert_eq!(pids, sorted);

    for r in &result.scheduled_tasks {
        let first = result.slices(r.pid).next().unwrap();
        let last = result.slices(r.pid).last().unwrap();
        assert_eq!(r.start_time, first.start_time);
        assert_eq!(r.completion_time, last.end_time);
        assert!(r.start_time >= r.arrival_time);
        assert_eq!(r.turnaround_time, r.completion_time - r.arrival_time);
        assert_eq!(r.waiting_time, r.turnaround_time - r.burst_time);
        assert_eq!(r.remaining_time, 0);
    }
}

proptest! {
    #[test]
    fn prop_timeline_covers_all_work(tasks in workload(), policy in policy()) {
        let result = schedule(policy, &tasks);
        check_timeline(&tasks, &result);
        check_metrics(&tasks, &result);
    }

    #[test]
    fn prop_deterministic(tasks in workload(), policy in policy()) {
        prop_assert_eq!(schedule(policy, &tasks), schedule(policy, &tasks));
    }

    #[test]
    fn prop_non_preemptive_runs_once(tasks in workload()) {
        for policy in [Policy::Fcfs, Policy::Sjf, Policy::Priority] {
            let result = schedule(policy, &tasks);
            for task in &tasks {
                let slices: Vec<_> = result.slices(task.pid()).collect();
                prop_assert_eq!(slices.len(), 1);
                prop_assert_eq!(slices[0].duration(), task.burst());
            }
        }
    }

    #[test]
    fn prop_round_robin_slice_count(tasks in workload(), quantum in 1u64..6) {
        let result = schedule(Policy::round_robin(quantum as i64).unwrap(), &tasks);
        for task in &tasks {
            let slices: Vec<_> = result.slices(task.pid()).collect();
            prop_assert_eq!(slices.len() as u64, task.burst().div_ceil(quantum));
            prop_assert!(slices.iter().all(|s| s.duration() <= quantum));
        }
    }

    #[test]
    fn prop_averages_rounded_to_algorithm_precision(tasks in workload(), policy in policy()) {
        let result = schedule(policy, &tasks);
        let places = policy.algorithm().precision() as usize;
        prop_assert!(decimals(result.average_turnaround) <= places);
        prop_assert!(decimals(result.average_waiting) <= places);

        if !tasks.is_empty() {
            let n = tasks.len() as f64;
            let tat: u64 = result.scheduled_tasks.iter().map(|r| r.turnaround_time).sum();
            let tolerance = 0.5 * 10f64.powi(-(places as i32)) + 1e-9;
            prop_assert!((result.average_turnaround - tat as f64 / n).abs() <= tolerance);
        }
    }
}
