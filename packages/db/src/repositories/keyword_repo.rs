//! Keyword repository for nodes and document edges.

use keyword_core::{JobId, UpsertAck, WordClass};
use serde::{Deserialize, Serialize};

use crate::repositories::DocumentRepository;
use crate::{DbError, get_db};

/// Repository for keyword nodes and `has_keyword` edges.
pub struct KeywordRepository;

/// A keyword edge as read back from the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEdge {
    pub word: String,
    pub frequency: u32,
    pub word_class: WordClass,
}

#[derive(Debug, Deserialize)]
struct CountRecord {
    count: usize,
}

/// Match-or-create the keyword and replace the edge for this word class in
/// one transaction.
const UPSERT_EDGE: &str = r#"
BEGIN TRANSACTION;
LET $doc = type::thing('document', $page_id);
LET $kw = type::thing('keyword', $word);
UPSERT $kw SET word = $word;
DELETE has_keyword WHERE in = $doc AND out = $kw AND word_class = $word_class;
RELATE $doc->has_keyword->$kw SET frequency = $frequency, word_class = $word_class, updated_at = time::now();
COMMIT TRANSACTION;
"#;

impl KeywordRepository {
    /// Write one keyword edge for a document.
    ///
    /// The document node is matched, never created. A re-upsert of the same
    /// (document, word, class) overwrites the frequency.
    pub async fn upsert_edge(
        document_id: &JobId,
        word: &str,
        frequency: u32,
        word_class: WordClass,
    ) -> Result<UpsertAck, DbError> {
        if !DocumentRepository::exists(document_id).await? {
            return Ok(UpsertAck::DocumentMissing);
        }

        let db = get_db()?;
        db.query(UPSERT_EDGE)
            .bind(("page_id", document_id.to_string()))
            .bind(("word", word.to_string()))
            .bind(("frequency", frequency))
            .bind(("word_class", word_class.as_str()))
            .await?
            .check()?;

        Ok(UpsertAck::Written)
    }

    /// Edges of a document, grouped by class and ranked by frequency.
    pub async fn list_for_document(document_id: &JobId) -> Result<Vec<KeywordEdge>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query(
                "SELECT out.word AS word, frequency, word_class FROM has_keyword \
                 WHERE in = type::thing('document', $page_id) \
                 ORDER BY word_class ASC, frequency DESC, word ASC",
            )
            .bind(("page_id", document_id.to_string()))
            .await?;

        let edges: Vec<KeywordEdge> = result.take(0)?;
        Ok(edges)
    }

    /// Total number of keyword edges.
    pub async fn count_edges() -> Result<usize, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT count() FROM has_keyword GROUP ALL")
            .await?;

        let count: Option<CountRecord> = result.take(0)?;
        Ok(count.map(|c| c.count).unwrap_or(0))
    }

    /// Total number of keyword nodes.
    pub async fn count_keywords() -> Result<usize, DbError> {
        let db = get_db()?;

        let mut result = db.query("SELECT count() FROM keyword GROUP ALL").await?;

        let count: Option<CountRecord> = result.take(0)?;
        Ok(count.map(|c| c.count).unwrap_or(0))
    }
}
