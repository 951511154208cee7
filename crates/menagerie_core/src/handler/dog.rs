//! Dog handler: runs custom pre-create logic, otherwise plain CRUD.

use crate::handler::{AnimalHandler, AnimalResult, KindScope};
use crate::model::animal::{AnimalDraft, AnimalKind, AnimalPatch, AnimalRecord};
use crate::repo::animal_store::AnimalStore;
use log::info;
use std::sync::Arc;

pub struct DogHandler {
    scope: KindScope,
}

impl DogHandler {
    pub fn new(store: Arc<dyn AnimalStore>) -> Self {
        Self {
            scope: KindScope::new(AnimalKind::Dog, store),
        }
    }
}

impl AnimalHandler for DogHandler {
    fn kind(&self) -> AnimalKind {
        self.scope.kind()
    }

    fn create(&self, draft: &AnimalDraft) -> AnimalResult<AnimalRecord> {
        info!("event=animal_create_hook module=handler status=start kind=Dog hook=custom_logic");
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
