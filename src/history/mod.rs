/*!
 * Simulation History
 * Per-session archive of past simulations with a retention policy
 */

pub mod store;
pub mod types;

pub use store::HistoryStore;
pub use types::{HistoryEntry, HistoryResult, HistoryView, NewSimulation, RetentionPolicy};
