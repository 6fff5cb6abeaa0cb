//! Message types for actor communication.

use keyword_core::{DrainReport, JobId, KeywordEvent, OrchestratorStatus};
use nlp::KeywordExtraction;
use ractor::RpcReplyPort;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Reply to [`OrchestratorMessage::AddJob`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAdded {
    /// Whether the job was newly queued.
    pub added: bool,
    /// Report of the drain that followed, when one was requested and allowed.
    pub drain: Option<DrainReport>,
}

/// Reply to [`OrchestratorMessage::RefreshBacklog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklogRefreshed {
    /// Ids newly queued by the refresh.
    pub queued: usize,
    /// Report of the drain that followed, when one was requested and allowed.
    pub drain: Option<DrainReport>,
}

/// Messages for the OrchestratorActor.
#[derive(Debug)]
pub enum OrchestratorMessage {
    /// Queue one job, optionally draining right after.
    AddJob {
        job: JobId,
        run: bool,
        reply: RpcReplyPort<Result<JobAdded, String>>,
    },

    /// Queue several jobs in order.
    AddJobs {
        jobs: Vec<JobId>,
        reply: RpcReplyPort<Result<usize, String>>,
    },

    /// Remove a pending job.
    RemoveJob {
        job: JobId,
        reply: RpcReplyPort<Result<bool, String>>,
    },

    /// List pending jobs, oldest first.
    ListJobs { reply: RpcReplyPort<Vec<JobId>> },

    /// Number of pending jobs.
    QueueSize { reply: RpcReplyPort<usize> },

    /// Queue unannotated documents, optionally draining right after.
    RefreshBacklog {
        run: bool,
        reply: RpcReplyPort<Result<BacklogRefreshed, String>>,
    },

    /// Drain the backlog.
    Drain {
        reply: RpcReplyPort<Result<DrainReport, String>>,
    },

    /// Allow drains.
    Start {
        reply: RpcReplyPort<Result<OrchestratorStatus, String>>,
    },

    /// Hold drains, keep accepting jobs.
    Pause {
        reply: RpcReplyPort<Result<OrchestratorStatus, String>>,
    },

    /// Stop for good.
    Stop {
        reply: RpcReplyPort<Result<OrchestratorStatus, String>>,
    },

    /// Get the current status.
    GetStatus { reply: RpcReplyPort<OrchestratorStatus> },

    /// Extract keywords for a document without persisting them.
    Preview {
        job: JobId,
        reply: RpcReplyPort<Result<KeywordExtraction, String>>,
    },

    /// Subscribe to events.
    Subscribe {
        reply: RpcReplyPort<broadcast::Receiver<KeywordEvent>>,
    },

    /// Periodic refresh-and-run.
    Tick,

    /// Stop the actor.
    Shutdown,
}
