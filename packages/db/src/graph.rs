//! Collaborator implementations backed by the SurrealDB graph.

use std::collections::HashSet;

use keyword_core::{
    CollabFuture, CollaboratorError, Document, DocumentSource, JobId, KeywordStore, UpsertAck,
    WordClass,
};

use crate::DbError;
use crate::repositories::{DocumentRepository, KeywordRepository};

/// Document source and keyword store over the global database connection.
///
/// The database must be initialized with [`crate::init`] before use; until
/// then every call reports the store as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurrealGraph;

impl SurrealGraph {
    pub fn new() -> Self {
        Self
    }
}

impl From<DbError> for CollaboratorError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(what) => CollaboratorError::NotFound(what),
            e if e.is_unavailable() => CollaboratorError::Unavailable(e.to_string()),
            e => CollaboratorError::Store(e.to_string()),
        }
    }
}

impl DocumentSource for SurrealGraph {
    fn fetch_document<'a>(&'a self, id: &'a JobId) -> CollabFuture<'a, Document> {
        Box::pin(async move { Ok(DocumentRepository::get(id).await?) })
    }

    fn list_all_document_ids(&self) -> CollabFuture<'_, Vec<JobId>> {
        Box::pin(async move { Ok(DocumentRepository::list_ids().await?) })
    }

    fn list_annotated_document_ids(&self) -> CollabFuture<'_, HashSet<JobId>> {
        Box::pin(async move {
            let ids = DocumentRepository::list_annotated_ids().await?;
            Ok(ids.into_iter().collect())
        })
    }
}

impl KeywordStore for SurrealGraph {
    fn upsert<'a>(
        &'a self,
        document_id: &'a JobId,
        word: &'a str,
        frequency: u32,
        word_class: WordClass,
    ) -> CollabFuture<'a, UpsertAck> {
        Box::pin(async move {
            Ok(KeywordRepository::upsert_edge(document_id, word, frequency, word_class).await?)
        })
    }
}

#[cfg(test)]
mod tests {
    use surrealdb::error::Api;

    use super::*;

    #[test]
    fn query_failures_become_store_errors() {
        let err = CollaboratorError::from(DbError::Connection(Api::Query("assertion failed".into()).into()));
        assert!(matches!(err, CollaboratorError::Store(_)));

        let err = CollaboratorError::from(DbError::Connection(Api::Http("refused".into()).into()));
        assert!(matches!(err, CollaboratorError::Unavailable(_)));

        let err = CollaboratorError::from(DbError::NotFound("doc".into()));
        assert_eq!(err, CollaboratorError::NotFound("doc".into()));
    }
}
