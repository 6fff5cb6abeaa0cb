//! Document repository.

use keyword_core::{Document, JobId};
use serde::Deserialize;

use crate::{DbError, get_db};

/// Repository for document nodes.
///
/// Documents are stored under the record id `document:<page_id>`.
pub struct DocumentRepository;

/// Internal record type for SurrealDB reads.
#[derive(Debug, Deserialize)]
struct DocumentRecord {
    page_id: String,
    text: String,
}

impl From<DocumentRecord> for Document {
    fn from(record: DocumentRecord) -> Self {
        Document::new(record.page_id, record.text)
    }
}

#[derive(Debug, Deserialize)]
struct PageIdRecord {
    page_id: String,
}

impl DocumentRepository {
    /// Create the document or replace its text.
    pub async fn upsert(document: &Document) -> Result<(), DbError> {
        let db = get_db()?;

        db.query("UPSERT type::thing('document', $page_id) SET page_id = $page_id, text = $text")
            .bind(("page_id", document.id.to_string()))
            .bind(("text", document.text.clone()))
            .await?
            .check()?;

        Ok(())
    }

    /// Get a document by page id.
    pub async fn get(id: &JobId) -> Result<Document, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT page_id, text FROM type::thing('document', $page_id)")
            .bind(("page_id", id.to_string()))
            .await?;

        let records: Vec<DocumentRecord> = result.take(0)?;

        records
            .into_iter()
            .next()
            .map(Document::from)
            .ok_or_else(|| DbError::NotFound(format!("Document not found: {}", id)))
    }

    /// Check whether a document node exists.
    pub async fn exists(id: &JobId) -> Result<bool, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT page_id FROM type::thing('document', $page_id)")
            .bind(("page_id", id.to_string()))
            .await?;

        let records: Vec<PageIdRecord> = result.take(0)?;
        Ok(!records.is_empty())
    }

    /// All document ids, ordered by page id.
    pub async fn list_ids() -> Result<Vec<JobId>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT page_id FROM document ORDER BY page_id ASC")
            .await?;

        let records: Vec<PageIdRecord> = result.take(0)?;
        Ok(records.into_iter().map(|r| JobId::new(r.page_id)).collect())
    }

    /// Ids of documents with at least one keyword edge.
    pub async fn list_annotated_ids() -> Result<Vec<JobId>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT VALUE in.page_id FROM has_keyword")
            .await?;

        let mut ids: Vec<String> = result.take(0)?;
        ids.sort();
        ids.dedup();
        Ok(ids.into_iter().map(JobId::new).collect())
    }

    /// Delete a document and its keyword edges.
    pub async fn delete(id: &JobId) -> Result<(), DbError> {
        let db = get_db()?;

        db.query(
            "LET $doc = type::thing('document', $page_id);
             DELETE has_keyword WHERE in = $doc;
             DELETE $doc;",
        )
        .bind(("page_id", id.to_string()))
        .await?
        .check()?;

        Ok(())
    }
}
