//! Startup for the keyword annotator.

use std::sync::Arc;

use actors::{Orchestrator, OrchestratorConfig, start_orchestrator};
use db::{DbConfig, SurrealGraph};
use nlp::{KeywordPipeline, PipelineConfig};
use tokio::task::JoinHandle;

/// Connect to the graph, spawn the orchestrator actor and register it globally.
///
/// Should be called once before any message is sent to the orchestrator.
/// Returns the actor's task handle.
pub async fn init_orchestrator(
    db_config: DbConfig,
    pipeline_config: PipelineConfig,
    config: OrchestratorConfig,
) -> anyhow::Result<JoinHandle<()>> {
    tracing::info!("Initializing keyword annotator...");

    init_graph(db_config).await?;

    let graph = Arc::new(SurrealGraph::new());
    let pipeline = Arc::new(KeywordPipeline::new(pipeline_config));
    let orchestrator = Orchestrator::new(graph.clone(), graph, pipeline);

    let (_actor, handle) = start_orchestrator(orchestrator, config).await?;

    tracing::info!("Keyword annotator initialized");
    Ok(handle)
}

/// Connect to the graph and apply the schema.
pub async fn init_graph(db_config: DbConfig) -> anyhow::Result<()> {
    tracing::debug!("Connecting to {}", db_config.endpoint);
    db::init(db_config).await?;
    Ok(())
}
