use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::VisionBackend;
use crate::domain::ProviderId;

/// Backends available to the dispatcher, keyed by the provider they serve.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: HashMap<ProviderId, Arc<dyn VisionBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `backend`, replacing any earlier one for the same provider.
    pub fn register(&mut self, backend: Arc<dyn VisionBackend>) -> &mut Self {
        let provider = backend.provider();
        if self.backends.insert(provider, backend).is_some() {
            tracing::warn!(%provider, "Replacing previously registered vision backend");
        }
        self
    }

    pub fn with(mut self, backend: Arc<dyn VisionBackend>) -> Self {
        self.register(backend);
        self
    }

    pub fn get(&self, provider: ProviderId) -> Option<Arc<dyn VisionBackend>> {
        self.backends.get(&provider).cloned()
    }

    pub fn providers(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.backends.contains_key(id))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
