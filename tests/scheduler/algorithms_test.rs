/*!
 * Algorithm Tests
 * Worked scenarios for each scheduling discipline
 */

use cpu_scheduler::scheduler::{schedule, Interval, Occupant, Policy, SimulationResult, Task};
use pretty_assertions::assert_eq;

fn tasks(arrivals: &[u64], bursts: &[u64]) -> Vec<Task> {
    arrivals
        .iter()
        .zip(bursts)
        .enumerate()
        .map(|(i, (&a, &b))| Task::new(i as u32 + 1, a, b).unwrap())
        .collect()
}

fn with_priorities(tasks: Vec<Task>, priorities: &[i32]) -> Vec<Task> {
    tasks
        .into_iter()
        .zip(priorities)
        .map(|(t, &p)| t.with_priority(p))
        .collect()
}

fn interval(start_time: u64, end_time: u64, pid: Option<u32>) -> Interval {
    Interval {
        start_time,
        end_time,
        occupant: pid.map_or(Occupant::Idle, Occupant::Process),
    }
}

fn completions(result: &SimulationResult) -> Vec<u64> {
    result
        .scheduled_tasks
        .iter()
        .map(|r| r.completion_time)
        .collect()
}

#[test]
fn test_fcfs_basic() {
    let result = schedule(Policy::Fcfs, &tasks(&[0, 1, 2], &[5, 3, 8]));

    assert_eq!(
        result.gantt_chart,
        vec![
            interval(0, 5, Some(1)),
            interval(5, 8, Some(2)),
            interval(8, 16, Some(3)),
        ]
    );
    assert_eq!(completions(&result), vec![5, 8, 16]);
    assert_eq!(result.average_turnaround, 8.67);
    assert_eq!(result.average_waiting, 3.33);
}

#[test]
fn test_fcfs_idle_gap_and_pid_order() {
    let result = schedule(Policy::Fcfs, &tasks(&[3, 0], &[2, 2]));

    assert_eq!(
        result.gantt_chart,
        vec![
            interval(0, 2, Some(2)),
            interval(2, 3, None),
            interval(3, 5, Some(1)),
        ]
    );
    // Results are reported in pid order regardless of dispatch order
    let pids: Vec<_> = result.scheduled_tasks.iter().map(|r| r.pid).collect();
    assert_eq!(pids, vec![1, 2]);
    assert_eq!(result.scheduled_tasks[0].start_time, 3);
    assert_eq!(result.average_turnaround, 2.0);
    assert_eq!(result.average_waiting, 0.0);
}

#[test]
fn test_fcfs_equal_arrivals_keep_input_order() {
    let result = schedule(Policy::Fcfs, &tasks(&[0, 0], &[3, 1]));
    assert_eq!(result.gantt_chart[0].pid(), Some(1));
    assert_eq!(completions(&result), vec![3, 4]);
}

#[test]
fn test_sjf_picks_shortest_ready() {
    let result = schedule(Policy::Sjf, &tasks(&[0, 1, 2, 3], &[8, 4, 9, 5]));

    let order: Vec<_> = result.gantt_chart.iter().filter_map(Interval::pid).collect();
    assert_eq!(order, vec![1, 2, 4, 3]);
    assert_eq!(completions(&result), vec![8, 12, 26, 17]);
    // 57 / 4 = 14.25 and 31 / 4 = 7.75, one decimal
    assert_eq!(result.average_turnaround, 14.3);
    assert_eq!(result.average_waiting, 7.8);
}

#[test]
fn test_sjf_burst_tie_prefers_earlier_arrival() {
    let result = schedule(Policy::Sjf, &tasks(&[0, 2, 1], &[10, 3, 3]));
    let order: Vec<_> = result.gantt_chart.iter().filter_map(Interval::pid).collect();
    assert_eq!(order, vec![1, 3, 2]);
}

#[test]
fn test_priority_lower_value_first() {
    let input = with_priorities(tasks(&[0, 1, 2, 3], &[5, 3, 1, 2]), &[2, 1, 3, 1]);
    let result = schedule(Policy::Priority, &input);

    let order: Vec<_> = result.gantt_chart.iter().filter_map(Interval::pid).collect();
    assert_eq!(order, vec![1, 2, 4, 3]);
    assert_eq!(completions(&result), vec![5, 8, 11, 10]);
    assert_eq!(result.average_turnaround, 7.0);
    assert_eq!(result.average_waiting, 4.3);

    let priorities: Vec<_> = result.scheduled_tasks.iter().map(|r| r.priority).collect();
    assert_eq!(priorities, vec![Some(2), Some(1), Some(3), Some(1)]);
}

#[test]
fn test_priority_missing_value_defaults_to_zero() {
    // Task 2 has no explicit priority, so it outranks task 3 (priority 1)
    let mut input = tasks(&[0, 1, 1], &[2, 2, 2]);
    input[0] = input[0].clone().with_priority(5);
    input[2] = input[2].clone().with_priority(1);

    let result = schedule(Policy::Priority, &input);
    let order: Vec<_> = result.gantt_chart.iter().filter_map(Interval::pid).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(result.scheduled_tasks[1].priority, Some(0));
}

#[test]
fn test_round_robin_rotation() {
    let policy = Policy::round_robin(2).unwrap();
    let result = schedule(policy, &tasks(&[0, 0, 0], &[5, 3, 1]));

    assert_eq!(
        result.gantt_chart,
        vec![
            interval(0, 2, Some(1)),
            interval(2, 4, Some(2)),
            interval(4, 5, Some(3)),
            interval(5, 7, Some(1)),
            interval(7, 8, Some(2)),
            interval(8, 9, Some(1)),
        ]
    );
    assert_eq!(completions(&result), vec![9, 8, 5]);
    assert_eq!(result.average_turnaround, 7.33);
    assert_eq!(result.average_waiting, 4.33);

    let starts: Vec<_> = result.scheduled_tasks.iter().map(|r| r.start_time).collect();
    assert_eq!(starts, vec![0, 2, 4]);
}

#[test]
fn test_round_robin_slices_per_task() {
    let policy = Policy::round_robin(2).unwrap();
    let result = schedule(policy, &tasks(&[0, 1, 2], &[5, 3, 8]));

    let counts: Vec<_> = (1..=3).map(|pid| result.slices(pid).count()).collect();
    assert_eq!(counts, vec![3, 2, 4]);
    assert_eq!(result.makespan(), 16);
}

#[test]
fn test_round_robin_single_task_keeps_slices() {
    let policy = Policy::round_robin(2).unwrap();
    let result = schedule(policy, &tasks(&[1], &[5]));

    assert_eq!(
        result.gantt_chart,
        vec![
            interval(0, 1, None),
            interval(1, 3, Some(1)),
            interval(3, 5, Some(1)),
            interval(5, 6, Some(1)),
        ]
    );
    assert_eq!(result.scheduled_tasks[0].remaining_time, 0);
}

#[test]
fn test_round_robin_rejects_non_positive_quantum() {
    assert!(Policy::round_robin(0).is_err());
    assert!(Policy::round_robin(-3).is_err());
}

#[test]
fn test_wire_shape() {
    let result = schedule(Policy::Fcfs, &tasks(&[1], &[2]));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "scheduledTasks": [{
                "id": 1,
                "arrivalTime": 1,
                "burstTime": 2,
                "startTime": 1,
                "completionTime": 3,
                "turnaroundTime": 2,
                "waitingTime": 0,
                "remainingTime": 0
            }],
            "ganttChart": [
                {"startTime": 0, "endTime": 1, "id": null},
                {"startTime": 1, "endTime": 3, "id": 1}
            ],
            "averageTAT": 2.0,
            "averageWT": 0.0
        })
    );
}
