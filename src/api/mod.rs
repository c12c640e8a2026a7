/*!
 * API Module
 * Request parsing, the scheduler service and its TCP server
 */

pub mod handlers;
pub mod parse;
pub mod server;
pub mod service;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use server::SimulationServer;
pub use service::SchedulerService;
pub use traits::*;
pub use types::*;
