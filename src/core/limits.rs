/*!
 * System Limits and Constants
 *
 * Centralized location for limits, defaults, and retention thresholds.
 * Organized by domain for maintainability and discoverability.
 */

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Priority assigned to tasks submitted without one
pub const DEFAULT_PRIORITY: i32 = 0;

/// Upper bound on tasks accepted in a single scheduling request
/// Keeps a single simulation from monopolizing the blocking pool
pub const MAX_TASKS_PER_REQUEST: usize = 10_000;

/// Latest tick a single simulation may reach (latest arrival plus total burst)
/// Keeps per-task times and their sums within `Tick`
pub const MAX_SIMULATION_TICKS: u64 = 1_000_000_000_000;

/// Upper bound on timeline intervals produced by one request
/// Each round-robin slice and each idle gap counts as one interval
pub const MAX_DISPATCHES_PER_REQUEST: u64 = 1_000_000;

/// Registered tasks retained before the oldest are evicted
pub const MAX_REGISTERED_TASKS: usize = 100_000;

/// Decimal places used by FCFS and Round-Robin averages
pub const WIDE_PRECISION: u32 = 2;

/// Decimal places used by SJF and Priority averages
pub const NARROW_PRECISION: u32 = 1;

// =============================================================================
// SIMULATION HISTORY
// =============================================================================

/// Most recent entries kept per session
pub const HISTORY_MAX_PER_SESSION: usize = 10;

/// Entries older than this are purged (5 days)
pub const HISTORY_MAX_AGE: Duration = Duration::from_secs(5 * 24 * 60 * 60);

/// Interval of the background retention sweep (1 hour)
pub const HISTORY_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

// =============================================================================
// SERVER
// =============================================================================

/// Default listen address
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8085));

/// Per-request deadline enforced by the server
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest request line accepted from a client (1MB)
/// [SECURITY] Bounds memory used by a single connection
pub const MAX_REQUEST_LINE_BYTES: usize = 1024 * 1024;
