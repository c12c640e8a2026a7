/*!
 * History Store
 * Session-scoped simulation archive with retention
 */

use super::types::{HistoryEntry, HistoryResult, NewSimulation, RetentionPolicy};
use crate::core::errors::HistoryError;
use crate::core::id::{AtomicGenerator, IdGenerator};
use crate::core::types::HistoryId;
use crate::scheduler::Algorithm;
use dashmap::DashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Simulation history keyed by session
///
/// Each session's entries are kept newest first.
#[derive(Clone)]
pub struct HistoryStore {
    ids: AtomicGenerator,
    sessions: Arc<DashMap<String, Vec<HistoryEntry>>>,
    // Entry id -> owning session, for O(1) lookup by id
    locations: Arc<DashMap<HistoryId, String>>,
    policy: RetentionPolicy,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_policy(RetentionPolicy::default())
    }

    pub fn with_policy(policy: RetentionPolicy) -> Self {
        Self {
            ids: AtomicGenerator::default_start(),
            sessions: Arc::new(DashMap::new()),
            locations: Arc::new(DashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Archive a simulation now
    pub fn record(&self, new: NewSimulation<'_>) -> HistoryResult<HistoryEntry> {
        self.record_at(new, OffsetDateTime::now_utc())
    }

    /// Archive a simulation with an explicit timestamp
    ///
    /// Expired entries are purged first; afterwards the session is trimmed
    /// to its most recent `max_per_session` entries.
    pub fn record_at(
        &self,
        new: NewSimulation<'_>,
        now: OffsetDateTime,
    ) -> HistoryResult<HistoryEntry> {
        self.purge_expired(now);

        let gantt_chart = serde_json::to_string(&new.result.gantt_chart)?;
        let results = serde_json::to_string(&new.result.scheduled_tasks)?;

        let entry = HistoryEntry {
            id: self.ids.next(),
            timestamp: now,
            algorithm: new.algorithm,
            arrival_times: new.arrival_times.to_string(),
            burst_times: new.burst_times.to_string(),
            priorities: new.priorities.map(str::to_string),
            quantum: new.quantum,
            average_turnaround: new.result.average_turnaround,
            average_waiting: new.result.average_waiting,
            gantt_chart,
            results,
            session_id: new.session_id.to_string(),
        };

        let evicted = {
            let mut session = self.sessions.entry(entry.session_id.clone()).or_default();
            session.insert(0, entry.clone());
            // Index only once the entry is reachable through its session
            self.locations.insert(entry.id, entry.session_id.clone());
            if session.len() > self.policy.max_per_session {
                session.split_off(self.policy.max_per_session)
            } else {
                Vec::new()
            }
        };
        for old in &evicted {
            self.locations.remove(&old.id);
        }

        debug!(
            id = entry.id,
            session = %entry.session_id,
            algorithm = %entry.algorithm,
            evicted = evicted.len(),
            "Simulation archived"
        );
        Ok(entry)
    }

    /// Entries for a session, newest first
    pub fn list(&self, session_id: &str) -> Vec<HistoryEntry> {
        self.sessions
            .get(session_id)
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, id: HistoryId) -> Option<HistoryEntry> {
        let session = self.locations.get(&id)?.value().clone();
        let entries = self.sessions.get(&session)?;
        entries.iter().find(|e| e.id == id).cloned()
    }

    pub fn by_algorithm(&self, algorithm: Algorithm, session_id: &str) -> Vec<HistoryEntry> {
        self.sessions
            .get(session_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.algorithm == algorithm)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// At most `limit` newest entries; a non-positive limit yields nothing
    pub fn recent(&self, limit: i64, session_id: &str) -> Vec<HistoryEntry> {
        if limit <= 0 {
            return Vec::new();
        }
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        self.sessions
            .get(session_id)
            .map(|entries| entries.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    pub fn remove(&self, id: HistoryId) -> HistoryResult<HistoryEntry> {
        let (_, session) = self
            .locations
            .remove(&id)
            .ok_or(HistoryError::NotFound(id))?;

        let removed = self.sessions.get_mut(&session).and_then(|mut entries| {
            let pos = entries.iter().position(|e| e.id == id)?;
            Some(entries.remove(pos))
        });
        self.sessions.remove_if(&session, |_, entries| entries.is_empty());

        removed.ok_or(HistoryError::NotFound(id))
    }

    /// Drop every entry of a session, returning how many were removed
    pub fn clear_session(&self, session_id: &str) -> usize {
        let Some((_, entries)) = self.sessions.remove(session_id) else {
            return 0;
        };
        for entry in &entries {
            self.locations.remove(&entry.id);
        }
        entries.len()
    }

    /// Remove entries older than the retention age, across all sessions
    pub fn purge_expired(&self, now: OffsetDateTime) -> usize {
        let cutoff = now - self.policy.max_age;
        let mut expired = Vec::new();

        for mut session in self.sessions.iter_mut() {
            session.retain(|e| {
                let keep = e.timestamp >= cutoff;
                if !keep {
                    expired.push(e.id);
                }
                keep
            });
        }
        self.sessions.retain(|_, entries| !entries.is_empty());

        for id in &expired {
            self.locations.remove(id);
        }
        if !expired.is_empty() {
            info!(purged = expired.len(), "Expired simulation history purged");
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.iter().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write every entry to `path` as pretty JSON, replacing the file atomically
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> HistoryResult<usize> {
        let path = path.as_ref();
        let mut entries: Vec<HistoryEntry> = self
            .sessions
            .iter()
            .flat_map(|s| s.value().clone())
            .collect();
        entries.sort_by_key(|e| e.id);

        let tmp = path.with_extension("tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, &entries)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp, path)?;

        info!(path = %path.display(), entries = entries.len(), "History snapshot saved");
        Ok(entries.len())
    }

    /// Restore a store from a snapshot, applying `policy` to what was read
    pub fn load_snapshot(path: impl AsRef<Path>, policy: RetentionPolicy) -> HistoryResult<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let mut entries: Vec<HistoryEntry> = serde_json::from_reader(reader)?;

        let store = Self::with_policy(policy);
        if let Some(max_id) = entries.iter().map(|e| e.id).max() {
            store.ids.advance_past(max_id);
        }

        // Newest first within each session
        entries.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        for entry in entries {
            let mut session = store.sessions.entry(entry.session_id.clone()).or_default();
            if session.len() < policy.max_per_session {
                store.locations.insert(entry.id, entry.session_id.clone());
                session.push(entry);
            }
        }
        store.purge_expired(OffsetDateTime::now_utc());

        info!(path = %path.display(), entries = store.len(), "History snapshot loaded");
        Ok(store)
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
