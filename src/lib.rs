/*!
 * CPU Scheduler Simulator Library
 * Offline scheduling simulations with session history and a JSON-over-TCP server
 */

pub mod api;
pub mod core;
pub mod history;
pub mod monitoring;
pub mod registry;
pub mod scheduler;

// Re-exports
pub use api::{
    ApiError, ApiResult, Request, Response, ScheduleRequest, SchedulerService, ServerConfig,
    ServerLifecycle, SimulationServer,
};
pub use crate::core::{HistoryError, SchedulerError, SerializableError, SimulatorError, SimulatorResult};
pub use history::{HistoryEntry, HistoryStore, HistoryView, RetentionPolicy};
pub use monitoring::init_tracing;
pub use registry::{RegisteredTask, TaskRegistry};
pub use scheduler::{
    schedule, Algorithm, Interval, Occupant, Policy, Scheduler, SimulationResult, Task,
    TaskResult, TimeQuantum,
};
