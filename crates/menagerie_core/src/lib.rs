//! Kind-dispatched CRUD core for the animal resource.
//!
//! Callers talk to [`AnimalService`]; it resolves a per-kind handler through
//! [`HandlerRegistry`], and handlers reach storage only through
//! [`AnimalStore`].

pub mod config;
pub mod db;
pub mod handler;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use handler::{
    AnimalError, AnimalHandler, AnimalResult, CatHandler, DogHandler, FishHandler,
};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::animal::{
    AnimalDraft, AnimalId, AnimalKind, AnimalPatch, AnimalRecord, UnknownKindError,
};
pub use repo::animal_store::{AnimalStore, SqliteAnimalStore, StoreError, StoreResult};
pub use service::animal_service::AnimalService;
pub use service::registry::HandlerRegistry;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
