/*!
 * API Types
 * Wire types, configuration and errors for the request layer
 */

use crate::core::errors::{HistoryError, SchedulerError, SerializableError, SimulatorError};
use crate::core::limits::{DEFAULT_BIND_ADDR, DEFAULT_REQUEST_TIMEOUT, HISTORY_PURGE_INTERVAL};
use crate::core::types::{HistoryId, SimulatorResult};
use crate::history::RetentionPolicy;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// API operation result
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ApiError {
    /// Malformed or inconsistent request
    #[error("Invalid request: {0}")]
    #[diagnostic(code(api::invalid_request))]
    InvalidRequest(String),

    #[error("Unknown algorithm '{0}'")]
    #[diagnostic(
        code(api::unknown_algorithm),
        help("Valid algorithms: fcfs, sjf, priority, rr")
    )]
    UnknownAlgorithm(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    History(#[from] HistoryError),

    #[error("Not found: {0}")]
    #[diagnostic(code(api::not_found))]
    NotFound(String),

    /// Request exceeded the configured deadline
    #[error("Timeout: {0}")]
    #[diagnostic(code(api::timeout))]
    Timeout(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(api::internal))]
    Internal(String),
}

impl From<ApiError> for SerializableError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidRequest(_) => SerializableError::new("invalid_request", err.to_string()),
            ApiError::UnknownAlgorithm(ref name) => SerializableError::with_details(
                "unknown_algorithm",
                err.to_string(),
                name.clone(),
            ),
            // A rejected quantum is still a caller input error
            ApiError::Scheduler(e) => SerializableError::new("invalid_request", e.to_string()),
            ApiError::History(e) => e.into(),
            ApiError::NotFound(_) => SerializableError::new("not_found", err.to_string()),
            ApiError::Timeout(_) => SerializableError::new("timeout", err.to_string()),
            ApiError::Internal(_) => SerializableError::new("internal_error", err.to_string()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub request_timeout: Duration,
    /// JSON snapshot of the history store, loaded at startup and written on shutdown
    pub history_path: Option<PathBuf>,
    pub retention: RetentionPolicy,
    pub purge_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_BIND_ADDR,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            history_path: None,
            retention: RetentionPolicy::default(),
            purge_interval: HISTORY_PURGE_INTERVAL,
        }
    }
}

impl ServerConfig {
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            ..Default::default()
        }
    }

    /// Defaults overridden by `SCHEDULER_*` environment variables
    pub fn from_env() -> SimulatorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SimulatorResult<Self> {
        let mut config = Self::default();

        if let Some(address) = parse_var::<SocketAddr>(&lookup, "SCHEDULER_ADDR")? {
            config.address = address;
        }
        if let Some(secs) = positive_var(&lookup, "SCHEDULER_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(path) = lookup("SCHEDULER_HISTORY_PATH").filter(|p| !p.trim().is_empty()) {
            config.history_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(max) = positive_var(&lookup, "SCHEDULER_HISTORY_MAX_PER_SESSION")? {
            config.retention.max_per_session = usize::try_from(max).map_err(|_| {
                SimulatorError::Configuration(format!(
                    "SCHEDULER_HISTORY_MAX_PER_SESSION out of range: {}",
                    max
                ))
            })?;
        }
        if let Some(days) = positive_var(&lookup, "SCHEDULER_HISTORY_MAX_AGE_DAYS")? {
            let secs = days.checked_mul(24 * 60 * 60).ok_or_else(|| {
                SimulatorError::Configuration(format!(
                    "SCHEDULER_HISTORY_MAX_AGE_DAYS out of range: {}",
                    days
                ))
            })?;
            config.retention.max_age = Duration::from_secs(secs);
        }
        if let Some(secs) = positive_var(&lookup, "SCHEDULER_PURGE_INTERVAL_SECS")? {
            config.purge_interval = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_address(mut self, address: SocketAddr) -> Self {
        self.address = address;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_purge_interval(mut self, interval: Duration) -> Self {
        self.purge_interval = interval;
        self
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> SimulatorResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            SimulatorError::Configuration(format!("{}={:?} is invalid: {}", key, raw, e))
        }),
    }
}

fn positive_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> SimulatorResult<Option<u64>> {
    match parse_var::<u64>(lookup, key)? {
        Some(0) => Err(SimulatorError::Configuration(format!(
            "{} must be greater than 0",
            key
        ))),
        other => Ok(other),
    }
}

/// Time quantum as sent by clients: either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantumInput {
    Number(i64),
    Text(String),
}

impl QuantumInput {
    pub fn resolve(&self) -> ApiResult<i64> {
        match self {
            QuantumInput::Number(n) => Ok(*n),
            QuantumInput::Text(s) => s.trim().parse().map_err(|_| {
                ApiError::InvalidRequest(format!("quantum must be an integer, got {:?}", s))
            }),
        }
    }
}

impl From<i64> for QuantumInput {
    fn from(value: i64) -> Self {
        QuantumInput::Number(value)
    }
}

/// Body of a scheduling request
///
/// Lists are whitespace-separated integers; task `i` (1-based) takes the
/// i-th value of each list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub arrival_times: String,
    pub burst_times: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<QuantumInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ScheduleRequest {
    pub fn new(arrival_times: impl Into<String>, burst_times: impl Into<String>) -> Self {
        Self {
            arrival_times: arrival_times.into(),
            burst_times: burst_times.into(),
            ..Default::default()
        }
    }

    pub fn with_priorities(mut self, priorities: impl Into<String>) -> Self {
        self.priorities = Some(priorities.into());
        self
    }

    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(QuantumInput::Number(quantum));
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// One request line, tagged by `method`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Request {
    Schedule {
        algorithm: String,
        #[serde(flatten)]
        request: ScheduleRequest,
    },
    Health,
    ListHistory {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    GetHistory {
        id: HistoryId,
    },
    HistoryByAlgorithm {
        algorithm: String,
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    RecentHistory {
        limit: i64,
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    DeleteHistory {
        id: HistoryId,
    },
    ClearHistory {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
}

impl Request {
    /// Method name as it appears on the wire
    pub fn method(&self) -> &'static str {
        match self {
            Request::Schedule { .. } => "schedule",
            Request::Health => "health",
            Request::ListHistory { .. } => "list_history",
            Request::GetHistory { .. } => "get_history",
            Request::HistoryByAlgorithm { .. } => "history_by_algorithm",
            Request::RecentHistory { .. } => "recent_history",
            Request::DeleteHistory { .. } => "delete_history",
            Request::ClearHistory { .. } => "clear_history",
        }
    }
}

/// Reply envelope written back for every request line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SerializableError>,
}

impl Response {
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<SerializableError>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn from_result<T: Serialize>(result: ApiResult<T>) -> Self {
        match result.and_then(|value| {
            serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
        }) {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(e),
        }
    }

    pub fn error_type(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.error_type.as_str())
    }
}

/// Liveness reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

impl HealthStatus {
    pub fn up() -> Self {
        Self {
            status: "UP".into(),
            service: "CPU Scheduler".into(),
        }
    }
}

/// Count of history entries removed by a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: usize,
}
