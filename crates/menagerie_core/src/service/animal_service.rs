//! Unified animal service.
//!
//! # Responsibility
//! - Single entry point for callers; hides the registry.
//! - Resolve the handler by kind and forward the call unchanged.
//!
//! # Invariants
//! - No business logic beyond resolve-and-forward.
//! - `create` stamps the requested kind onto the draft.

use crate::config::CoreConfig;
use crate::handler::{AnimalHandler, AnimalResult};
use crate::model::animal::{AnimalDraft, AnimalKind, AnimalPatch, AnimalRecord};
use crate::repo::animal_store::AnimalStore;
use crate::service::registry::HandlerRegistry;
use std::sync::Arc;

/// Kind-dispatching CRUD façade. Cheap to clone and share across threads.
#[derive(Clone)]
pub struct AnimalService {
    registry: Arc<HandlerRegistry>,
}

impl AnimalService {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    /// Builds a registry over `store` and wraps it.
    pub fn with_store(store: Arc<dyn AnimalStore>, config: &CoreConfig) -> Self {
        Self::new(Arc::new(HandlerRegistry::with_config(store, config)))
    }

    pub fn create(&self, kind: AnimalKind, draft: AnimalDraft) -> AnimalResult<AnimalRecord> {
        self.registry.resolve(kind).create(&draft.tagged(kind))
    }

    pub fn read(&self, kind: AnimalKind, id: &str) -> AnimalResult<Option<AnimalRecord>> {
        self.registry.resolve(kind).read(id)
    }

    pub fn update(
        &self,
        kind: AnimalKind,
        id: &str,
        patch: &AnimalPatch,
    ) -> AnimalResult<Option<AnimalRecord>> {
        self.registry.resolve(kind).update(id, patch)
    }

    pub fn delete(&self, kind: AnimalKind, id: &str) -> AnimalResult<bool> {
        self.registry.resolve(kind).delete(id)
    }

    pub fn list(&self, kind: AnimalKind) -> AnimalResult<Vec<AnimalRecord>> {
        self.registry.resolve(kind).list()
    }
}
