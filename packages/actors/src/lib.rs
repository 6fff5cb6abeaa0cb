//! Actor system for the keyword annotator.
//!
//! This crate provides the Ractor-based orchestrator that drains the
//! keyword backlog, and the writer that persists keyword sets.
//!
//! # Architecture
//!
//! - `OrchestratorActor` - Owns the backlog; serializes every trigger
//! - `Orchestrator` - Queue, status machine and the drain loop
//! - `KeywordGraphWriter` - Idempotent keyword edge upserts
//!
//! # Usage
//!
//! ```ignore
//! use actors::{Orchestrator, OrchestratorConfig, OrchestratorMessage, start_orchestrator};
//!
//! let orchestrator = Orchestrator::new(source, store, pipeline);
//! let (actor, handle) = start_orchestrator(orchestrator, OrchestratorConfig::default()).await?;
//!
//! actor.send_message(OrchestratorMessage::Tick)?;
//! ```

mod messages;
mod orchestrator;
mod orchestrator_actor;
pub mod registry;
mod writer;

pub use messages::{BacklogRefreshed, JobAdded, OrchestratorMessage};
pub use orchestrator::{Orchestrator, OrchestratorError};
pub use orchestrator_actor::{
    OrchestratorActor, OrchestratorArgs, OrchestratorConfig, start_orchestrator,
};
pub use registry::{ActorRegistry, global_registry};
pub use writer::{KeywordGraphWriter, PersistReport};

/// Re-export ractor types for convenience.
pub use ractor::{Actor, ActorRef, RpcReplyPort, concurrency};
