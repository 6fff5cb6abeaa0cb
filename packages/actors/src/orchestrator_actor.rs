//! Actor that owns the orchestrator.

use std::time::Duration;

use keyword_core::DrainReport;
use ractor::{Actor, ActorProcessingErr, ActorRef};
use tokio::task::JoinHandle;

use crate::messages::{BacklogRefreshed, JobAdded, OrchestratorMessage};
use crate::orchestrator::{Orchestrator, OrchestratorError};
use crate::registry::global_registry;

/// Settings for the orchestrator actor.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Refresh and drain the backlog on this interval.
    pub refresh_interval: Option<Duration>,
    /// Start in `Running` instead of `Paused`.
    pub autostart: bool,
}

impl OrchestratorConfig {
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }
}

/// Arguments for spawning the orchestrator actor.
pub struct OrchestratorArgs {
    pub orchestrator: Orchestrator,
    pub config: OrchestratorConfig,
}

/// State for the orchestrator actor.
pub struct OrchestratorActorState {
    orchestrator: Orchestrator,
    ticker: Option<JoinHandle<()>>,
}

impl OrchestratorActorState {
    /// Drain if the orchestrator is running; otherwise skip quietly.
    async fn drain_if_running(&mut self) -> Result<Option<DrainReport>, OrchestratorError> {
        if !self.orchestrator.status().can_drain() {
            tracing::debug!(
                "Skipping drain, orchestrator is {}",
                self.orchestrator.status()
            );
            return Ok(None);
        }
        self.orchestrator.drain().await.map(Some)
    }
}

/// Actor serializing every trigger on the orchestrator.
///
/// A drain runs inside one `handle` call, so control messages sent during a
/// drain take effect after it finishes.
pub struct OrchestratorActor;

impl Actor for OrchestratorActor {
    type Msg = OrchestratorMessage;
    type State = OrchestratorActorState;
    type Arguments = OrchestratorArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!("Starting keyword orchestrator");

        let mut orchestrator = args.orchestrator;
        if args.config.autostart {
            orchestrator
                .start()
                .map_err(|e| ActorProcessingErr::from(format!("Failed to start: {}", e)))?;
        }

        // Start periodic tick
        let ticker = args.config.refresh_interval.map(|period| {
            let myself_clone = myself.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.tick().await;
                loop {
                    interval.tick().await;
                    if myself_clone.send_message(OrchestratorMessage::Tick).is_err() {
                        break;
                    }
                }
            })
        });

        Ok(OrchestratorActorState {
            orchestrator,
            ticker,
        })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        if let Some(ticker) = state.ticker.take() {
            ticker.abort();
        }
        tracing::info!("Keyword orchestrator stopped");
        Ok(())
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            OrchestratorMessage::AddJob { job, run, reply } => {
                let added = match state.orchestrator.add(job) {
                    Ok(added) => added,
                    Err(e) => {
                        let _ = reply.send(Err(e.to_string()));
                        return Ok(());
                    }
                };
                let drain = if run {
                    match state.drain_if_running().await {
                        Ok(drain) => drain,
                        Err(e) => {
                            let _ = reply.send(Err(e.to_string()));
                            return Ok(());
                        }
                    }
                } else {
                    None
                };
                let _ = reply.send(Ok(JobAdded { added, drain }));
            }

            OrchestratorMessage::AddJobs { jobs, reply } => {
                let _ = reply.send(state.orchestrator.bulk_add(jobs).map_err(|e| e.to_string()));
            }

            OrchestratorMessage::RemoveJob { job, reply } => {
                let _ = reply.send(state.orchestrator.remove(&job).map_err(|e| e.to_string()));
            }

            OrchestratorMessage::ListJobs { reply } => {
                let _ = reply.send(state.orchestrator.list());
            }

            OrchestratorMessage::QueueSize { reply } => {
                let _ = reply.send(state.orchestrator.size());
            }

            OrchestratorMessage::RefreshBacklog { run, reply } => {
                let queued = match state.orchestrator.refresh_backlog().await {
                    Ok(queued) => queued,
                    Err(e) => {
                        tracing::warn!("Failed to refresh backlog: {}", e);
                        let _ = reply.send(Err(e.to_string()));
                        return Ok(());
                    }
                };
                let drain = if run {
                    match state.drain_if_running().await {
                        Ok(drain) => drain,
                        Err(e) => {
                            let _ = reply.send(Err(e.to_string()));
                            return Ok(());
                        }
                    }
                } else {
                    None
                };
                let _ = reply.send(Ok(BacklogRefreshed { queued, drain }));
            }

            OrchestratorMessage::Drain { reply } => {
                let result = state.orchestrator.drain().await;
                let _ = reply.send(result.map_err(|e| e.to_string()));
            }

            OrchestratorMessage::Start { reply } => {
                let _ = reply.send(state.orchestrator.start().map_err(|e| e.to_string()));
            }

            OrchestratorMessage::Pause { reply } => {
                let _ = reply.send(state.orchestrator.pause().map_err(|e| e.to_string()));
            }

            OrchestratorMessage::Stop { reply } => {
                let _ = reply.send(state.orchestrator.stop().map_err(|e| e.to_string()));
            }

            OrchestratorMessage::GetStatus { reply } => {
                let _ = reply.send(state.orchestrator.status());
            }

            OrchestratorMessage::Preview { job, reply } => {
                let result = state.orchestrator.preview(&job).await;
                let _ = reply.send(result.map_err(|e| e.to_string()));
            }

            OrchestratorMessage::Subscribe { reply } => {
                let _ = reply.send(state.orchestrator.subscribe());
            }

            OrchestratorMessage::Tick => {
                if !state.orchestrator.status().can_drain() {
                    return Ok(());
                }
                match state.orchestrator.refresh_backlog().await {
                    Ok(_) => {
                        if let Err(e) = state.orchestrator.drain().await {
                            tracing::warn!("Scheduled drain failed: {}", e);
                        }
                    }
                    Err(e) => tracing::warn!("Scheduled refresh failed: {}", e),
                }
            }

            OrchestratorMessage::Shutdown => {
                tracing::info!("Shutting down keyword orchestrator");
                myself.stop(None);
                return Ok(());
            }
        }

        Ok(())
    }
}

/// Spawn the orchestrator actor and register it globally.
pub async fn start_orchestrator(
    orchestrator: Orchestrator,
    config: OrchestratorConfig,
) -> Result<(ActorRef<OrchestratorMessage>, JoinHandle<()>), ractor::SpawnErr> {
    let (actor, handle) = Actor::spawn(
        Some("keyword-orchestrator".to_string()),
        OrchestratorActor,
        OrchestratorArgs {
            orchestrator,
            config,
        },
    )
    .await?;

    global_registry().register_orchestrator(actor.clone());

    Ok((actor, handle))
}
