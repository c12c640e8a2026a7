/*!
 * Scheduler Types
 * Algorithm selectors, quantum validation, and scheduling policies
 */

use crate::core::errors::SchedulerError;
use crate::core::limits::{NARROW_PRECISION, WIDE_PRECISION};
use crate::core::types::Tick;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Result type for scheduling engine operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduling algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// First-come-first-served
    Fcfs,
    /// Shortest job first (non-preemptive)
    Sjf,
    /// Static priority (non-preemptive)
    Priority,
    /// Round-robin with a fixed quantum
    RoundRobin,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// Convert to the wire name
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Priority => "priority",
            Self::RoundRobin => "rr",
        }
    }

    /// Decimal places kept in the reported averages
    ///
    /// SJF and Priority report one decimal, FCFS and Round-Robin two.
    #[inline]
    pub const fn precision(&self) -> u32 {
        match self {
            Self::Fcfs | Self::RoundRobin => WIDE_PRECISION,
            Self::Sjf | Self::Priority => NARROW_PRECISION,
        }
    }

    /// Whether results carry the task priority
    #[inline]
    pub const fn reports_priority(&self) -> bool {
        matches!(self, Self::Priority)
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "priority" => Ok(Self::Priority),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(format!(
                "Unsupported scheduling algorithm '{}'. Valid: fcfs, sjf, priority, rr",
                s
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Round-robin time quantum in ticks (always > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum(Tick);

impl TimeQuantum {
    /// Validate a raw quantum; zero and negative values are rejected, never clamped
    pub fn new(ticks: i64) -> SchedulerResult<Self> {
        if ticks <= 0 {
            return Err(SchedulerError::InvalidQuantum(ticks));
        }
        Ok(Self(ticks as Tick))
    }

    #[inline(always)]
    pub const fn as_ticks(&self) -> Tick {
        self.0
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = i64::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}

/// A fully parameterized scheduling discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin { quantum: TimeQuantum },
}

impl Policy {
    /// Round-robin policy from a raw quantum
    pub fn round_robin(quantum: i64) -> SchedulerResult<Self> {
        Ok(Self::RoundRobin {
            quantum: TimeQuantum::new(quantum)?,
        })
    }

    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Fcfs => Algorithm::Fcfs,
            Self::Sjf => Algorithm::Sjf,
            Self::Priority => Algorithm::Priority,
            Self::RoundRobin { .. } => Algorithm::RoundRobin,
        }
    }

    /// Quantum for round-robin, `None` for the non-preemptive disciplines
    pub const fn quantum(&self) -> Option<TimeQuantum> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }
}
