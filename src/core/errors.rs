/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{HistoryId, Pid};

// Re-export ApiError from the request layer
pub use crate::api::types::ApiError;

/// Scheduling engine errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid time quantum {0}: must be a positive number of ticks")]
    #[diagnostic(
        code(scheduler::invalid_quantum),
        help("Round-robin needs a quantum of at least 1 tick.")
    )]
    InvalidQuantum(i64),

    #[error("Invalid task {pid}: {reason}")]
    #[diagnostic(
        code(scheduler::invalid_task),
        help("Arrival times must be >= 0 and burst times must be > 0.")
    )]
    InvalidTask { pid: Pid, reason: String },
}

/// Simulation history errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum HistoryError {
    #[error("History entry {0} not found")]
    #[diagnostic(
        code(history::not_found),
        help("The entry may have been purged by the retention policy or deleted.")
    )]
    NotFound(HistoryId),

    #[error("Failed to serialize simulation data: {0}")]
    #[diagnostic(code(history::serialization))]
    Serialization(String),

    #[error("History snapshot I/O failed: {0}")]
    #[diagnostic(
        code(history::io),
        help("Check that the snapshot path is writable.")
    )]
    Io(String),
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for HistoryError {
    fn from(err: std::io::Error) -> Self {
        HistoryError::Io(err.to_string())
    }
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimulatorError {
    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("History error: {0}")]
    #[diagnostic(transparent)]
    History(#[from] HistoryError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(simulator::io_error),
        help("Socket or filesystem operation failed.")
    )]
    Io(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(simulator::configuration_error),
        help("Review the SCHEDULER_* environment variables.")
    )]
    Configuration(String),
}

impl From<std::io::Error> for SimulatorError {
    fn from(err: std::io::Error) -> Self {
        SimulatorError::Io(err.to_string())
    }
}

/// Serializable error representation for API responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SerializableError {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SerializableError {
    /// Create a new serializable error
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a new serializable error with details
    pub fn with_details(
        error_type: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

impl From<SchedulerError> for SerializableError {
    fn from(err: SchedulerError) -> Self {
        SerializableError::new("scheduler_error", err.to_string())
    }
}

impl From<HistoryError> for SerializableError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NotFound(_) => SerializableError::new("not_found", err.to_string()),
            other => SerializableError::new("history_error", other.to_string()),
        }
    }
}

impl From<SimulatorError> for SerializableError {
    fn from(err: SimulatorError) -> Self {
        match err {
            SimulatorError::Scheduler(e) => e.into(),
            SimulatorError::History(e) => e.into(),
            SimulatorError::Api(e) => e.into(),
            SimulatorError::Io(_) => SerializableError::new("io_error", err.to_string()),
            SimulatorError::Configuration(_) => {
                SerializableError::new("configuration_error", err.to_string())
            }
        }
    }
}
