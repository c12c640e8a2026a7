/*!
 * Scheduler Statistics
 * Mean turnaround / waiting time with deterministic decimal rounding
 */

use super::result::TaskResult;
use crate::core::types::Tick;

/// Mean of `sum / count` rounded half-up to `places` decimals
///
/// Computed on integers so ties like `x.x5` always round away from zero,
/// independent of binary floating-point representation. An empty set
/// averages to `0.0`.
pub fn rounded_mean(sum: Tick, count: usize, places: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let scale = 10u128.pow(places);
    let count = count as u128;
    let scaled = (2 * sum as u128 * scale + count) / (2 * count);
    scaled as f64 / scale as f64
}

/// Averages reported with a simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub turnaround: f64,
    pub waiting: f64,
}

impl Averages {
    pub fn compute(results: &[TaskResult], places: u32) -> Self {
        let turnaround: Tick = results.iter().map(|r| r.turnaround_time).sum();
        let waiting: Tick = results.iter().map(|r| r.waiting_time).sum();
        Self {
            turnaround: rounded_mean(turnaround, results.len(), places),
            waiting: rounded_mean(waiting, results.len(), places),
        }
    }
}
