/*!
 * Scheduler Service
 * Request-level operations over the engine, task registry and history
 */

use super::parse::{build_policy, build_tasks, check_workload};
use super::types::{ApiError, ApiResult, Deleted, HealthStatus, ScheduleRequest};
use crate::core::types::HistoryId;
use crate::history::{HistoryEntry, HistoryStore, HistoryView, NewSimulation};
use crate::registry::TaskRegistry;
use crate::scheduler::{Algorithm, SimulationResult};
use tracing::{info, warn};

/// Stateless apart from the shared registry and history handles; cheap to clone
#[derive(Clone, Default)]
pub struct SchedulerService {
    registry: TaskRegistry,
    history: HistoryStore,
}

impl SchedulerService {
    pub fn new(registry: TaskRegistry, history: HistoryStore) -> Self {
        Self { registry, history }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Validate, simulate and (when a session is given) archive one request
    pub fn schedule(
        &self,
        algorithm_name: &str,
        request: &ScheduleRequest,
    ) -> ApiResult<SimulationResult> {
        let algorithm = resolve_algorithm(algorithm_name)?;
        let policy = build_policy(algorithm, request)?;
        let tasks = build_tasks(algorithm, request)?;
        check_workload(policy, &tasks)?;

        self.registry.add_all(tasks.iter().cloned());
        let result = policy.simulate(&tasks);

        info!(
            algorithm = %algorithm,
            tasks = tasks.len(),
            makespan = result.makespan(),
            average_tat = result.average_turnaround,
            average_wt = result.average_waiting,
            "Simulation completed"
        );

        if let Some(session_id) = request.session_id.as_deref() {
            let quantum = policy.quantum().map(|q| q.as_ticks() as i64);
            let archived = self.history.record(NewSimulation {
                session_id,
                algorithm,
                arrival_times: &request.arrival_times,
                burst_times: &request.burst_times,
                priorities: request.priorities.as_deref(),
                quantum,
                result: &result,
            });
            if let Err(e) = archived {
                warn!(session = session_id, error = %e, "Failed to archive simulation");
            }
        }

        Ok(result)
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus::up()
    }

    pub fn list_history(&self, session_id: &str) -> ApiResult<Vec<HistoryView>> {
        views(&self.history.list(session_id))
    }

    pub fn get_history(&self, id: HistoryId) -> ApiResult<HistoryView> {
        let entry = self
            .history
            .get(id)
            .ok_or_else(|| ApiError::NotFound(format!("history entry {}", id)))?;
        Ok(HistoryView::try_from(&entry)?)
    }

    pub fn history_by_algorithm(
        &self,
        algorithm_name: &str,
        session_id: &str,
    ) -> ApiResult<Vec<HistoryView>> {
        let algorithm = resolve_algorithm(algorithm_name)?;
        views(&self.history.by_algorithm(algorithm, session_id))
    }

    pub fn recent_history(&self, limit: i64, session_id: &str) -> ApiResult<Vec<HistoryView>> {
        views(&self.history.recent(limit, session_id))
    }

    pub fn delete_history(&self, id: HistoryId) -> ApiResult<Deleted> {
        self.history.remove(id)?;
        Ok(Deleted { deleted: 1 })
    }

    pub fn clear_history(&self, session_id: &str) -> Deleted {
        Deleted {
            deleted: self.history.clear_session(session_id),
        }
    }
}

fn resolve_algorithm(name: &str) -> ApiResult<Algorithm> {
    name.parse()
        .map_err(|_| ApiError::UnknownAlgorithm(name.trim().to_string()))
}

fn views(entries: &[HistoryEntry]) -> ApiResult<Vec<HistoryView>> {
    entries
        .iter()
        .map(|e| HistoryView::try_from(e).map_err(ApiError::from))
        .collect()
}
