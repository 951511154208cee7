//! Handler registry: maps each animal kind to its pre-built handler.
//!
//! # Invariants
//! - Exactly one handler per kind, constructed once, never replaced.
//! - `resolve` is total over `AnimalKind`; raw tags are validated only in
//!   `resolve_name`.

use crate::config::CoreConfig;
use crate::handler::{
    AnimalError, AnimalHandler, AnimalResult, CatHandler, DogHandler, FishHandler,
};
use crate::model::animal::AnimalKind;
use crate::repo::animal_store::AnimalStore;
use log::warn;
use std::sync::Arc;

/// Immutable kind-to-handler table.
pub struct HandlerRegistry {
    dog: DogHandler,
    cat: CatHandler,
    fish: FishHandler,
}

impl HandlerRegistry {
    /// Builds all handlers over one shared store with default settings.
    pub fn new(store: Arc<dyn AnimalStore>) -> Self {
        Self::with_config(store, &CoreConfig::default())
    }

    pub fn with_config(store: Arc<dyn AnimalStore>, config: &CoreConfig) -> Self {
        Self {
            dog: DogHandler::new(Arc::clone(&store)),
            cat: CatHandler::new(Arc::clone(&store), config.cat_create_delay()),
            fish: FishHandler::new(store),
        }
    }

    /// Returns the handler bound to `kind`.
    pub fn resolve(&self, kind: AnimalKind) -> &dyn AnimalHandler {
        match kind {
            AnimalKind::Dog => &self.dog,
            AnimalKind::Cat => &self.cat,
            AnimalKind::Fish => &self.fish,
        }
    }

    /// Parses a raw tag and resolves its handler.
    ///
    /// # Errors
    /// - `UnknownSubtype` when `raw` names no known kind.
    pub fn resolve_name(&self, raw: &str) -> AnimalResult<&dyn AnimalHandler> {
        match raw.parse::<AnimalKind>() {
            Ok(kind) => Ok(self.resolve(kind)),
            Err(err) => {
                warn!("event=handler_resolve module=registry status=error error_code=unknown_subtype");
                Err(AnimalError::from(err))
            }
        }
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> &'static [AnimalKind] {
        &AnimalKind::ALL
    }
}
