use std::sync::{Arc, LazyLock};

use tokio::sync::{Mutex, MutexGuard};

use actors::Orchestrator;
use db::{DbConfig, DbError, SurrealGraph};
use keyword_core::Document;
use nlp::KeywordPipeline;

static TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn setup_db() -> Result<MutexGuard<'static, ()>, DbError> {
    let guard = TEST_LOCK.lock().await;
    db::init(DbConfig::memory()).await?;
    reset().await?;
    Ok(guard)
}

/// Empty every table.
pub async fn reset() -> Result<(), DbError> {
    let db_conn = db::get_db()?;
    db_conn
        .query("DELETE has_keyword; DELETE keyword; DELETE document;")
        .await?
        .check()?;
    Ok(())
}

pub async fn seed(docs: &[(&str, &str)]) -> Result<(), DbError> {
    for (id, text) in docs {
        db::repositories::DocumentRepository::upsert(&Document::new(*id, *text)).await?;
    }
    Ok(())
}

pub fn graph_orchestrator() -> Orchestrator {
    let graph = Arc::new(SurrealGraph::new());
    Orchestrator::new(graph.clone(), graph, Arc::new(KeywordPipeline::default()))
}
