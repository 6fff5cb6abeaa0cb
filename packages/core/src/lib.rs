//! Core domain types for the keyword annotator.
//!
//! This crate contains shared types used across all packages:
//! - JobId, Document and the JobQueue backlog
//! - KeywordResult and WordClass for ranked keyword sets
//! - OrchestratorStatus and drain reports
//! - Events for observing the orchestrator
//! - Collaborator traits for the document source and keyword graph

mod collaborators;
mod events;
mod job;
mod keywords;
mod queue;

pub use collaborators::{CollabFuture, CollaboratorError, DocumentSource, KeywordStore, UpsertAck};
pub use events::KeywordEvent;
pub use job::{Document, JobId, RunId};
pub use keywords::{DEFAULT_TOP_N, KeywordCount, KeywordResult, WordClass};
pub use queue::{DrainReport, JobQueue, OrchestratorStatus, QueueError, StateError};
