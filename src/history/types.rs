/*!
 * History Types
 * Archived simulation records and their response views
 */

use crate::core::errors::HistoryError;
use crate::core::limits::{HISTORY_MAX_AGE, HISTORY_MAX_PER_SESSION};
use crate::core::types::HistoryId;
use crate::scheduler::{Algorithm, Interval, SimulationResult, TaskResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// One archived simulation
///
/// The timeline and per-task results are stored as JSON text, exactly as
/// they were returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: HistoryId,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub algorithm: Algorithm,
    pub arrival_times: String,
    pub burst_times: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<i64>,
    #[serde(rename = "averageTAT")]
    pub average_turnaround: f64,
    #[serde(rename = "averageWT")]
    pub average_waiting: f64,
    pub gantt_chart: String,
    pub results: String,
    pub session_id: String,
}

/// Input for archiving a finished simulation
#[derive(Debug, Clone)]
pub struct NewSimulation<'a> {
    pub session_id: &'a str,
    pub algorithm: Algorithm,
    pub arrival_times: &'a str,
    pub burst_times: &'a str,
    pub priorities: Option<&'a str>,
    pub quantum: Option<i64>,
    pub result: &'a SimulationResult,
}

/// Client-facing view of an entry, with the stored JSON parsed back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub id: HistoryId,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub algorithm: Algorithm,
    pub arrival_times: String,
    pub burst_times: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<i64>,
    #[serde(rename = "averageTAT")]
    pub average_turnaround: f64,
    #[serde(rename = "averageWT")]
    pub average_waiting: f64,
    pub gantt_chart: Vec<Interval>,
    pub results: Vec<TaskResult>,
}

impl TryFrom<&HistoryEntry> for HistoryView {
    type Error = HistoryError;

    fn try_from(entry: &HistoryEntry) -> HistoryResult<Self> {
        Ok(Self {
            id: entry.id,
            timestamp: entry.timestamp,
            algorithm: entry.algorithm,
            arrival_times: entry.arrival_times.clone(),
            burst_times: entry.burst_times.clone(),
            priorities: entry.priorities.clone(),
            quantum: entry.quantum,
            average_turnaround: entry.average_turnaround,
            average_waiting: entry.average_waiting,
            gantt_chart: serde_json::from_str(&entry.gantt_chart)?,
            results: serde_json::from_str(&entry.results)?,
        })
    }
}

/// Retention limits applied on every insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Most recent entries kept per session
    pub max_per_session: usize,
    /// Entries older than this are purged
    pub max_age: Duration,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_per_session: HISTORY_MAX_PER_SESSION,
            max_age: HISTORY_MAX_AGE,
        }
    }
}
