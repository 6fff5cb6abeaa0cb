//! Request/reply helpers for talking to the orchestrator actor.

use actors::{ActorRef, OrchestratorMessage, RpcReplyPort, concurrency, global_registry};
use anyhow::anyhow;

/// The registered orchestrator.
pub fn orchestrator() -> anyhow::Result<ActorRef<OrchestratorMessage>> {
    global_registry()
        .get_orchestrator()
        .ok_or_else(|| anyhow!("Orchestrator not available"))
}

/// Send a message built around a reply port and wait for the answer.
pub async fn ask<T, F>(build: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce(RpcReplyPort<T>) -> OrchestratorMessage,
{
    let orchestrator = orchestrator()?;
    let (tx, rx) = concurrency::oneshot();
    orchestrator
        .send_message(build(tx.into()))
        .map_err(|e| anyhow!("Failed to send message: {}", e))?;
    rx.await
        .map_err(|_| anyhow!("Orchestrator dropped the reply"))
}

/// Like [`ask`], for replies carrying the orchestrator's own error.
pub async fn try_ask<T, F>(build: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce(RpcReplyPort<Result<T, String>>) -> OrchestratorMessage,
{
    ask(build).await?.map_err(|e| anyhow!(e))
}
