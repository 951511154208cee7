//! Cat handler.
//!
//! Creation goes through a simulated remote API call: a fixed delay before
//! the store write. The delay affects latency only; the stored record is the
//! same as for any other handler.

use crate::handler::{AnimalHandler, AnimalResult, KindScope};
use crate::model::animal::{AnimalDraft, AnimalKind, AnimalPatch, AnimalRecord};
use crate::repo::animal_store::AnimalStore;
use log::info;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct CatHandler {
    scope: KindScope,
    create_delay: Duration,
}

impl CatHandler {
    pub fn new(store: Arc<dyn AnimalStore>, create_delay: Duration) -> Self {
        Self {
            scope: KindScope::new(AnimalKind::Cat, store),
            create_delay,
        }
    }

    /// Latency added to every `create`.
    pub fn create_delay(&self) -> Duration {
        self.create_delay
    }

    fn call_remote_api(&self) {
        info!(
            "event=animal_create_hook module=handler status=start kind=Cat hook=remote_api delay_ms={}",
            self.create_delay.as_millis()
        );
        if !self.create_delay.is_zero() {
            thread::sleep(self.create_delay);
        }
    }
}

impl AnimalHandler for CatHandler {
    fn kind(&self) -> AnimalKind {
        self.scope.kind()
    }

    fn create(&self, draft: &AnimalDraft) -> AnimalResult<AnimalRecord> {
        self.call_remote_api();
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
