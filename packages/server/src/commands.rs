//! Subcommand implementations.

use std::io::BufRead;
use std::path::Path;

use actors::{OrchestratorConfig, OrchestratorMessage, global_registry};
use anyhow::Context;
use db::repositories::{DocumentRepository, KeywordRepository};
use keyword_core::{Document, DrainReport, JobId};
use nlp::{KeywordPipeline, SAMPLE_TEXT};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::cli::{Cli, RunArgs};
use crate::client::{ask, orchestrator, try_ask};
use crate::init::{init_graph, init_orchestrator};

/// One line of a documents file.
#[derive(Debug, Deserialize)]
struct DocumentRecord {
    #[serde(alias = "pageId")]
    id: String,
    text: String,
}

/// Run the orchestrator until Ctrl-C.
pub async fn run(cli: &Cli, args: RunArgs) -> anyhow::Result<()> {
    let handle = init_orchestrator(
        cli.db.config(),
        cli.pipeline_config(),
        args.orchestrator_config(),
    )
    .await?;

    if let Some(path) = &args.seed {
        let loaded = load_documents(path).await?;
        tracing::info!("Seeded {} documents from {}", loaded, path.display());
    }

    let events = log_events().await?;

    let refreshed = try_ask(|reply| OrchestratorMessage::RefreshBacklog {
        run: true,
        reply,
    })
    .await?;
    match refreshed.drain {
        Some(report) => tracing::info!(
            "Initial drain: {} processed, {} failed",
            report.processed,
            report.failed
        ),
        None => tracing::info!(
            "Queued {} documents, waiting for start",
            refreshed.queued
        ),
    }

    tracing::info!("Running, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    shutdown(handle).await?;
    events.abort();
    Ok(())
}

/// Queue every unannotated document and drain once.
pub async fn refresh(cli: &Cli) -> anyhow::Result<()> {
    let handle = one_shot(cli).await?;
    let result = try_ask(|reply| OrchestratorMessage::RefreshBacklog {
        run: true,
        reply,
    })
    .await;
    shutdown(handle).await?;
    print_json(&result?)
}

/// Queue the given documents in order and drain once.
pub async fn annotate(cli: &Cli, ids: Vec<String>) -> anyhow::Result<()> {
    let handle = one_shot(cli).await?;
    let jobs: Vec<JobId> = ids.into_iter().map(JobId::from).collect();
    let result: anyhow::Result<DrainReport> = async {
        try_ask(|reply| OrchestratorMessage::AddJobs { jobs, reply }).await?;
        try_ask(|reply| OrchestratorMessage::Drain { reply }).await
    }
    .await;
    shutdown(handle).await?;
    print_json(&result?)
}

/// Print what a document would be annotated with.
pub async fn preview(cli: &Cli, id: String) -> anyhow::Result<()> {
    let handle = one_shot(cli).await?;
    let result = try_ask(|reply| OrchestratorMessage::Preview {
        job: JobId::from(id),
        reply,
    })
    .await;
    shutdown(handle).await?;
    print_json(&result?)
}

/// Print the keywords of the built-in sample text.
pub fn sample(cli: &Cli) -> anyhow::Result<()> {
    let pipeline = KeywordPipeline::new(cli.pipeline_config());
    let extraction = pipeline.extract_text(JobId::new("sample"), SAMPLE_TEXT);
    print_json(&extraction)
}

/// Print the keyword edges stored for a document.
pub async fn keywords(cli: &Cli, id: String) -> anyhow::Result<()> {
    init_graph(cli.db.config()).await?;
    let edges = KeywordRepository::list_for_document(&JobId::from(id)).await?;
    print_json(&edges)
}

/// Load a documents file into the graph.
pub async fn load(cli: &Cli, path: &Path) -> anyhow::Result<()> {
    init_graph(cli.db.config()).await?;
    let loaded = load_documents(path).await?;
    println!("{}", loaded);
    Ok(())
}

async fn one_shot(cli: &Cli) -> anyhow::Result<JoinHandle<()>> {
    init_orchestrator(
        cli.db.config(),
        cli.pipeline_config(),
        OrchestratorConfig::default().with_autostart(true),
    )
    .await
}

async fn shutdown(handle: JoinHandle<()>) -> anyhow::Result<()> {
    if let Err(e) = try_ask(|reply| OrchestratorMessage::Stop { reply }).await {
        tracing::warn!("Failed to stop orchestrator: {}", e);
    }
    orchestrator()?
        .send_message(OrchestratorMessage::Shutdown)
        .map_err(|e| anyhow::anyhow!("Failed to send shutdown: {}", e))?;
    handle.await.context("Orchestrator task panicked")?;
    global_registry().unregister_orchestrator();
    Ok(())
}

/// Forward orchestrator events to the log.
async fn log_events() -> anyhow::Result<JoinHandle<()>> {
    let mut rx = ask(|reply| OrchestratorMessage::Subscribe { reply }).await?;
    Ok(tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => tracing::debug!("{}", event.description()),
                Err(RecvError::Lagged(n)) => tracing::warn!("Event log lagged, {} events lost", n),
                Err(RecvError::Closed) => break,
            }
        }
    }))
}

async fn load_documents(path: &Path) -> anyhow::Result<usize> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let documents = parse_documents(std::io::BufReader::new(file))?;
    for document in &documents {
        DocumentRepository::upsert(document).await?;
    }
    Ok(documents.len())
}

/// Parse JSON lines of `{"id", "text"}`, skipping blank lines.
fn parse_documents(reader: impl BufRead) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: DocumentRecord = serde_json::from_str(&line)
            .with_context(|| format!("Invalid document on line {}", n + 1))?;
        documents.push(Document::new(record.id, record.text));
    }
    Ok(documents)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_document_lines() {
        let input = r#"{"id": "a", "text": "The dog ran."}

{"pageId": "b", "text": "Riders crashed."}
"#;
        let documents = parse_documents(input.as_bytes()).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(
            documents,
            vec![
                Document::new("a", "The dog ran."),
                Document::new("b", "Riders crashed."),
            ]
        );
    }

    #[test]
    fn reports_bad_line_number() {
        let input = "{\"id\": \"a\", \"text\": \"ok\"}\n{\"id\": \"b\"}\n";
        let err = parse_documents(input.as_bytes())
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert_eq!(err, "Invalid document on line 2");
    }
}
