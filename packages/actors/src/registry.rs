//! Actor registry for discovering actors by name.

use std::sync::RwLock;

use ractor::ActorRef;

use crate::messages::OrchestratorMessage;

/// Global actor registry for discovering actors.
///
/// This provides a way to look up the orchestrator without passing
/// references through the entire call stack.
pub struct ActorRegistry {
    orchestrator: RwLock<Option<ActorRef<OrchestratorMessage>>>,
}

impl ActorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            orchestrator: RwLock::new(None),
        }
    }

    /// Register the orchestrator.
    pub fn register_orchestrator(&self, orchestrator: ActorRef<OrchestratorMessage>) {
        let mut slot = self.orchestrator.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(orchestrator);
    }

    /// Get the orchestrator.
    pub fn get_orchestrator(&self) -> Option<ActorRef<OrchestratorMessage>> {
        self.orchestrator
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Forget the orchestrator, e.g. after it stopped.
    pub fn unregister_orchestrator(&self) {
        let mut slot = self.orchestrator.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl Default for ActorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry instance.
static REGISTRY: std::sync::LazyLock<ActorRegistry> = std::sync::LazyLock::new(ActorRegistry::new);

/// Get the global actor registry.
pub fn global_registry() -> &'static ActorRegistry {
    &REGISTRY
}
