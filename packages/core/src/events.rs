//! Event types for observing the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{JobId, OrchestratorStatus, RunId};

/// Events emitted by the orchestrator while it manages the backlog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum KeywordEvent {
    /// New ids were appended to the backlog.
    JobsQueued {
        added: usize,
        pending: usize,
        timestamp: DateTime<Utc>,
    },
    /// A job was popped and is being processed.
    JobStarted {
        job_id: JobId,
        run_id: RunId,
        timestamp: DateTime<Utc>,
    },
    /// A job's keywords were persisted.
    JobCompleted {
        job_id: JobId,
        run_id: RunId,
        keywords_written: usize,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },
    /// A job failed and was dropped.
    JobFailed {
        job_id: JobId,
        run_id: RunId,
        error: String,
        timestamp: DateTime<Utc>,
    },
    /// A pipeline stage degraded to an empty result.
    StageDegraded {
        job_id: JobId,
        stage: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    /// The orchestrator status changed.
    StatusChanged {
        old_status: OrchestratorStatus,
        new_status: OrchestratorStatus,
        timestamp: DateTime<Utc>,
    },
}

impl KeywordEvent {
    /// Get the timestamp of the event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            KeywordEvent::JobsQueued { timestamp, .. } => *timestamp,
            KeywordEvent::JobStarted { timestamp, .. } => *timestamp,
            KeywordEvent::JobCompleted { timestamp, .. } => *timestamp,
            KeywordEvent::JobFailed { timestamp, .. } => *timestamp,
            KeywordEvent::StageDegraded { timestamp, .. } => *timestamp,
            KeywordEvent::StatusChanged { timestamp, .. } => *timestamp,
        }
    }

    /// Get the job ID associated with this event, if any.
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            KeywordEvent::JobStarted { job_id, .. } => Some(job_id),
            KeywordEvent::JobCompleted { job_id, .. } => Some(job_id),
            KeywordEvent::JobFailed { job_id, .. } => Some(job_id),
            KeywordEvent::StageDegraded { job_id, .. } => Some(job_id),
            _ => None,
        }
    }

    /// Get a short description of this event for logging.
    pub fn description(&self) -> String {
        match self {
            KeywordEvent::JobsQueued { added, pending, .. } => {
                format!("{} jobs queued ({} pending)", added, pending)
            }
            KeywordEvent::JobStarted { job_id, .. } => format!("Job {} started", job_id),
            KeywordEvent::JobCompleted {
                job_id,
                keywords_written,
                duration_ms,
                ..
            } => format!(
                "Job {} complete: {} keywords in {}ms",
                job_id, keywords_written, duration_ms
            ),
            KeywordEvent::JobFailed { job_id, error, .. } => {
                format!("Job {} failed: {}", job_id, error)
            }
            KeywordEvent::StageDegraded {
                job_id,
                stage,
                reason,
                ..
            } => format!("Job {} stage {} degraded: {}", job_id, stage, reason),
            KeywordEvent::StatusChanged { new_status, .. } => {
                format!("Orchestrator -> {}", new_status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_in_snake_case() {
        let event = KeywordEvent::JobFailed {
            job_id: JobId::from("7"),
            run_id: RunId::new(),
            error: "not found: 7".into(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(json["event"], "job_failed");
        assert_eq!(event.job_id(), Some(&JobId::from("7")));
        assert_eq!(event.description(), "Job 7 failed: not found: 7");
    }
}
