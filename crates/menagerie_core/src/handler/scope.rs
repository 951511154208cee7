//! Kind-bound store access shared by all handlers.
//!
//! # Invariants
//! - Every store call carries the bound kind; callers cannot override it.
//! - Log events carry kind/id/duration only, never animal names.

use crate::handler::AnimalResult;
use crate::model::animal::{AnimalDraft, AnimalKind, AnimalPatch, AnimalRecord};
use crate::repo::animal_store::{AnimalStore, StoreResult};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Instant;

/// Store handle bound to one animal kind.
#[derive(Clone)]
pub(crate) struct KindScope {
    kind: AnimalKind,
    store: Arc<dyn AnimalStore>,
}

impl KindScope {
    pub(crate) fn new(kind: AnimalKind, store: Arc<dyn AnimalStore>) -> Self {
        Self { kind, store }
    }

    pub(crate) fn kind(&self) -> AnimalKind {
        self.kind
    }

    pub(crate) fn create(&self, draft: &AnimalDraft) -> AnimalResult<AnimalRecord> {
        let started_at = Instant::now();
        let created = self.logged(
            "animal_create",
            self.store.save(self.kind, draft),
            started_at,
        )?;
        info!(
            "event=animal_create module=handler status=ok kind={} id={} duration_ms={}",
            self.kind,
            created.id,
            started_at.elapsed().as_millis()
        );
        Ok(created)
    }

    pub(crate) fn read(&self, id: &str) -> AnimalResult<Option<AnimalRecord>> {
        let started_at = Instant::now();
        let found = self.logged("animal_read", self.store.find_one(id, self.kind), started_at)?;
        debug!(
            "event=animal_read module=handler status=ok kind={} id={id} found={} duration_ms={}",
            self.kind,
            found.is_some(),
            started_at.elapsed().as_millis()
        );
        Ok(found)
    }

    pub(crate) fn update(&self, id: &str, patch: &AnimalPatch) -> AnimalResult<Option<AnimalRecord>> {
        let started_at = Instant::now();
        self.logged(
            "animal_update",
            self.store.update_where(id, self.kind, patch),
            started_at,
        )?;
        let updated = self.logged(
            "animal_update",
            self.store.find_one(id, self.kind),
            started_at,
        )?;
        info!(
            "event=animal_update module=handler status=ok kind={} id={id} found={} duration_ms={}",
            self.kind,
            updated.is_some(),
            started_at.elapsed().as_millis()
        );
        Ok(updated)
    }

    pub(crate) fn delete(&self, id: &str) -> AnimalResult<bool> {
        let started_at = Instant::now();
        let affected = self.logged(
            "animal_delete",
            self.store.delete_where(id, self.kind),
            started_at,
        )?;
        info!(
            "event=animal_delete module=handler status=ok kind={} id={id} removed={} duration_ms={}",
            self.kind,
            affected > 0,
            started_at.elapsed().as_millis()
        );
        Ok(affected > 0)
    }

    pub(crate) fn list(&self) -> AnimalResult<Vec<AnimalRecord>> {
        let started_at = Instant::now();
        let animals = self.logged("animal_list", self.store.find_many(self.kind), started_at)?;
        debug!(
            "event=animal_list module=handler status=ok kind={} count={} duration_ms={}",
            self.kind,
            animals.len(),
            started_at.elapsed().as_millis()
        );
        Ok(animals)
    }

    fn logged<T>(
        &self,
        event: &'static str,
        result: StoreResult<T>,
        started_at: Instant,
    ) -> AnimalResult<T> {
        result.map_err(|err| {
            error!(
                "event={event} module=handler status=error kind={} duration_ms={} error={err}",
                self.kind,
                started_at.elapsed().as_millis()
            );
            err.into()
        })
    }
}
