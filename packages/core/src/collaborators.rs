//! Contracts for the stores the orchestrator talks to.
//!
//! The document source and the keyword graph live outside the core. Both are
//! object-safe so the orchestrator can hold them as `Arc<dyn ...>`.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::{Document, JobId, WordClass};

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store error: {0}")]
    Store(String),
}

impl CollaboratorError {
    /// Whether the store could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CollaboratorError::Unavailable(_))
    }
}

/// Future type returned by collaborator calls.
pub type CollabFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CollaboratorError>> + Send + 'a>>;

/// Where documents and their annotation state come from.
pub trait DocumentSource: Send + Sync + 'static {
    /// Fetch the document behind a job id.
    fn fetch_document<'a>(&'a self, id: &'a JobId) -> CollabFuture<'a, Document>;

    /// Every known document id, in the order the source enumerates them.
    fn list_all_document_ids(&self) -> CollabFuture<'_, Vec<JobId>>;

    /// Ids that already carry at least one keyword relationship.
    fn list_annotated_document_ids(&self) -> CollabFuture<'_, HashSet<JobId>>;
}

/// Outcome of a single keyword edge upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAck {
    /// The keyword node and edge now exist with the given properties.
    Written,
    /// No document node matches the id, so nothing was written.
    DocumentMissing,
}

/// Graph store receiving keyword edges.
pub trait KeywordStore: Send + Sync + 'static {
    /// Match-or-create the keyword node for `word` and the edge from the
    /// document to it, overwriting `frequency` when the edge already exists.
    fn upsert<'a>(
        &'a self,
        document_id: &'a JobId,
        word: &'a str,
        frequency: u32,
        word_class: WordClass,
    ) -> CollabFuture<'a, UpsertAck>;
}
