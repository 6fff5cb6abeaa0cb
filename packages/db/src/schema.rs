//! Database schema definitions using SurrealQL.

use crate::{DbError, get_db};

/// Initialize the database schema.
///
/// This creates all necessary tables, fields, and indexes.
pub async fn init_schema() -> Result<(), DbError> {
    let db = get_db()?;

    tracing::info!("Initializing database schema...");

    db.query(DOCUMENT_SCHEMA).await?.check()?;
    db.query(KEYWORD_SCHEMA).await?.check()?;
    db.query(HAS_KEYWORD_SCHEMA).await?.check()?;

    tracing::info!("Database schema initialized");

    Ok(())
}

/// Document nodes, keyed by page id.
const DOCUMENT_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS document SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS page_id ON document TYPE string;
DEFINE FIELD IF NOT EXISTS text ON document TYPE string;
DEFINE FIELD IF NOT EXISTS created_at ON document TYPE datetime DEFAULT time::now();

DEFINE INDEX IF NOT EXISTS document_page_id ON document FIELDS page_id UNIQUE;
"#;

/// Keyword nodes, shared across documents and keyed by word.
const KEYWORD_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS keyword SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS word ON keyword TYPE string;

DEFINE INDEX IF NOT EXISTS keyword_word ON keyword FIELDS word UNIQUE;
"#;

/// Document -> keyword edges.
const HAS_KEYWORD_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS has_keyword SCHEMAFULL TYPE RELATION IN document OUT keyword;

DEFINE FIELD IF NOT EXISTS frequency ON has_keyword TYPE int;
DEFINE FIELD IF NOT EXISTS word_class ON has_keyword TYPE string
    ASSERT $value IN ["Noun", "Verb", "All"];
DEFINE FIELD IF NOT EXISTS updated_at ON has_keyword TYPE datetime DEFAULT time::now();

-- One edge per (document, keyword, word class)
DEFINE INDEX IF NOT EXISTS has_keyword_unique ON has_keyword FIELDS in, out, word_class UNIQUE;
DEFINE INDEX IF NOT EXISTS has_keyword_in ON has_keyword FIELDS in;
"#;
