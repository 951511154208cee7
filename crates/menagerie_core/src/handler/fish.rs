//! Fish handler: no subtype-specific hooks.

use crate::handler::{AnimalHandler, AnimalResult, KindScope};
use crate::model::animal::{AnimalDraft, AnimalKind, AnimalPatch, AnimalRecord};
use crate::repo::animal_store::AnimalStore;
use std::sync::Arc;

pub struct FishHandler {
    scope: KindScope,
}

impl FishHandler {
    pub fn new(store: Arc<dyn AnimalStore>) -> Self {
        Self {
            scope: KindScope::new(AnimalKind::Fish, store),
        }
    }
}

impl AnimalHandler for FishHandler {
    fn kind(&self) -> AnimalKind {
        self.scope.kind()
    }

    fn create(&self, draft: &AnimalDraft) -> AnimalResult<AnimalRecord> {
        self.scope.create(draft)
    }

    fn read(&self, id: &str) -> AnimalResult<Option<AnimalRecord>> {
        self.scope.read(id)
    }

    fn update(&self, id: &str, patch: &AnimalPatch) -> AnimalResult<Option<AnimalRecord>> {
        self.scope.update(id, patch)
    }

    fn delete(&self, id: &str) -> AnimalResult<bool> {
        self.scope.delete(id)
    }

    fn list(&self) -> AnimalResult<Vec<AnimalRecord>> {
        self.scope.list()
    }
}
