/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (assigned by the caller, 1-based)
pub type Pid = u32;

/// Simulated time in abstract ticks
pub type Tick = u64;

/// Static priority (lower value is served first)
pub type Priority = i32;

/// Identifier of a simulation history entry
pub type HistoryId = u64;

/// Identifier handed out by the task registry
pub type TaskId = u64;

/// Common result type for simulator operations
pub type SimulatorResult<T> = Result<T, super::errors::SimulatorError>;
