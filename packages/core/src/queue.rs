//! The pending-job backlog and the orchestrator status machine.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{JobId, RunId};

/// Errors raised by [`JobQueue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("job queue is empty")]
    EmptyQueue,
}

/// Ordered, duplicate-free backlog of document identifiers.
///
/// Order is strict FIFO by first insertion. An id that is already queued is
/// never queued a second time, so re-adding it keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct JobQueue {
    order: VecDeque<JobId>,
    members: HashSet<JobId>,
}

impl JobQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `job` at the tail. Returns `false` when it was already queued.
    pub fn add(&mut self, job: JobId) -> bool {
        if !self.members.insert(job.clone()) {
            return false;
        }
        self.order.push_back(job);
        true
    }

    /// Queue every id in `jobs`, in order, skipping ids that are already
    /// queued or repeated in the input. Returns the number of new entries.
    pub fn bulk_add<I>(&mut self, jobs: I) -> usize
    where
        I: IntoIterator<Item = JobId>,
    {
        jobs.into_iter().filter(|job| self.add(job.clone())).count()
    }

    /// Remove `job` wherever it sits. Returns `false` when it was not queued.
    pub fn remove(&mut self, job: &JobId) -> bool {
        if !self.members.remove(job) {
            return false;
        }
        self.order.retain(|queued| queued != job);
        true
    }

    /// Pop the oldest job.
    pub fn get_first_job(&mut self) -> Result<JobId, QueueError> {
        let job = self.order.pop_front().ok_or(QueueError::EmptyQueue)?;
        self.members.remove(&job);
        Ok(job)
    }

    /// Number of pending jobs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, job: &JobId) -> bool {
        self.members.contains(job)
    }

    /// Ordered snapshot of the pending jobs, oldest first.
    pub fn list(&self) -> Vec<JobId> {
        self.order.iter().cloned().collect()
    }
}

/// Operational status of the orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestratorStatus {
    /// Jobs may be queued but nothing is drained.
    #[default]
    Paused,
    /// Drains are allowed.
    Running,
    /// Terminal. Nothing is queued or drained any more.
    Stopped,
}

/// Rejected status transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("cannot move orchestrator from {from} to {to}")]
    InvalidTransition {
        from: OrchestratorStatus,
        to: OrchestratorStatus,
    },
}

impl OrchestratorStatus {
    /// Whether a drain may execute in this status.
    pub fn can_drain(&self) -> bool {
        matches!(self, OrchestratorStatus::Running)
    }

    /// Whether the backlog may still be changed.
    pub fn accepts_jobs(&self) -> bool {
        !matches!(self, OrchestratorStatus::Stopped)
    }

    /// Validate a move to `to`, returning the resulting status.
    ///
    /// Staying in the same status is always allowed. `Stopped` is terminal.
    pub fn transition(self, to: OrchestratorStatus) -> Result<OrchestratorStatus, StateError> {
        match (self, to) {
            (from, to) if from == to => Ok(to),
            (OrchestratorStatus::Stopped, to) => Err(StateError::InvalidTransition {
                from: OrchestratorStatus::Stopped,
                to,
            }),
            (_, to) => Ok(to),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrchestratorStatus::Paused => "paused",
            OrchestratorStatus::Running => "running",
            OrchestratorStatus::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for OrchestratorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one drain of the backlog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrainReport {
    pub run_id: RunId,
    /// Jobs that completed fetch, extraction and persistence.
    pub processed: u64,
    /// Jobs dropped after a failure.
    pub failed: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DrainReport {
    /// Total jobs popped during the drain.
    pub fn attempted(&self) -> u64 {
        self.processed + self.failed
    }

    /// Success rate as a percentage.
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.attempted();
        if total == 0 {
            None
        } else {
            Some((self.processed as f64 / total as f64) * 100.0)
        }
    }

    pub fn duration_ms(&self) -> u64 {
        (self.finished_at - self.started_at).num_milliseconds().max(0) as u64
    }
}
