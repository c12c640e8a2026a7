/*!
 * Timeline
 * Gantt chart construction shared by every algorithm
 */

use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Serialize};

/// Who holds the CPU during an interval
///
/// Serialized as the process id, or `null` while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Pid>", into = "Option<Pid>")]
pub enum Occupant {
    Idle,
    Process(Pid),
}

impl From<Option<Pid>> for Occupant {
    fn from(pid: Option<Pid>) -> Self {
        pid.map_or(Occupant::Idle, Occupant::Process)
    }
}

impl From<Occupant> for Option<Pid> {
    fn from(occupant: Occupant) -> Self {
        match occupant {
            Occupant::Idle => None,
            Occupant::Process(pid) => Some(pid),
        }
    }
}

/// One contiguous span of CPU time, `[start_time, end_time)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub start_time: Tick,
    pub end_time: Tick,
    #[serde(rename = "id")]
    pub occupant: Occupant,
}

impl Interval {
    #[inline]
    pub fn duration(&self) -> Tick {
        self.end_time - self.start_time
    }

    #[inline]
    pub fn pid(&self) -> Option<Pid> {
        self.occupant.into()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.occupant == Occupant::Idle
    }
}

/// Append-only timeline with a monotonic clock
///
/// Every dispatch appends exactly one interval; adjacent intervals of the
/// same occupant are not merged.
#[derive(Debug, Default)]
pub struct Timeline {
    intervals: Vec<Interval>,
    now: Tick,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Insert an idle interval up to `at` if the clock is behind it
    pub fn idle_until(&mut self, at: Tick) -> bool {
        if self.now >= at {
            return false;
        }
        self.push(Occupant::Idle, at - self.now);
        true
    }

    /// Run `pid` for `ticks`, returning the slice start time
    pub fn execute(&mut self, pid: Pid, ticks: Tick) -> Tick {
        let start = self.now;
        self.push(Occupant::Process(pid), ticks);
        start
    }

    fn push(&mut self, occupant: Occupant, ticks: Tick) {
        debug_assert!(ticks > 0, "zero-length interval");
        let start_time = self.now;
        self.now += ticks;
        self.intervals.push(Interval {
            start_time,
            end_time: self.now,
            occupant,
        });
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn into_intervals(self) -> Vec<Interval> {
        self.intervals
    }
}
