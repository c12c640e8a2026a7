/*!
 * Scheduler Traits
 * Interface shared by the scheduling disciplines
 */

use super::result::SimulationResult;
use super::task::Task;
use super::types::Algorithm;

/// A uniprocessor scheduling discipline
///
/// Implementations are pure: `simulate` copies the tasks it is given and
/// returns a fully resolved timeline. Independent calls may run
/// concurrently.
pub trait Scheduler: Send + Sync {
    /// Which algorithm this discipline implements
    fn algorithm(&self) -> Algorithm;

    /// Run the discipline over `tasks` to completion
    fn simulate(&self, tasks: &[Task]) -> SimulationResult;
}
