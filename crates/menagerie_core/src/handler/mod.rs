//! Per-subtype CRUD handlers.
//!
//! # Responsibility
//! - Define the uniform contract every subtype handler satisfies.
//! - Host the Dog/Cat/Fish variants and their subtype-specific hooks.
//!
//! # Invariants
//! - A handler only ever reads or writes rows of its own bound kind.
//! - Hooks may change timing and logging, never the stored result.
//! - Absence is a value (`None` / `false`), not an error.

mod cat;
mod dog;
mod fish;
mod scope;

pub use cat::CatHandler;
pub use dog::DogHandler;
pub use fish::FishHandler;
pub(crate) use scope::KindScope;

use crate::model::animal::{
    AnimalDraft, AnimalId, AnimalKind, AnimalPatch, AnimalRecord, UnknownKindError,
};
use crate::repo::animal_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AnimalResult<T> = Result<T, AnimalError>;

/// Errors surfaced to callers of handlers and the dispatching service.
#[derive(Debug)]
pub enum AnimalError {
    /// Tag outside the closed Dog/Cat/Fish set.
    UnknownSubtype(String),
    /// Create with a caller-supplied ID that is already taken.
    DuplicateId(AnimalId),
    /// The store could not complete the operation. Not retried.
    PersistenceUnavailable(StoreError),
}

impl Display for AnimalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSubtype(value) => {
                write!(f, "unknown animal type `{value}`; expected Dog|Cat|Fish")
            }
            Self::DuplicateId(id) => write!(f, "animal id already exists: {id}"),
            Self::PersistenceUnavailable(err) => write!(f, "persistence unavailable: {err}"),
        }
    }
}

impl Error for AnimalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PersistenceUnavailable(err) => Some(err),
            Self::UnknownSubtype(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<StoreError> for AnimalError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateId(id) => Self::DuplicateId(id),
            other => Self::PersistenceUnavailable(other),
        }
    }
}

impl From<UnknownKindError> for AnimalError {
    fn from(value: UnknownKindError) -> Self {
        Self::UnknownSubtype(value.0)
    }
}

/// Uniform CRUD contract implemented once per subtype.
///
/// Every operation is implicitly scoped to [`AnimalHandler::kind`]. Store
/// access stays private to each variant, so callers always go through its
/// hooks.
pub trait AnimalHandler: Send + Sync {
    fn kind(&self) -> AnimalKind;

    /// Stores a new record tagged with this handler's kind.
    fn create(&self, draft: &AnimalDraft) -> AnimalResult<AnimalRecord>;

    fn read(&self, id: &str) -> AnimalResult<Option<AnimalRecord>>;

    /// Applies `patch` and returns the re-read record, or `None` when no
    /// record of this kind has `id`.
    fn update(&self, id: &str, patch: &AnimalPatch) -> AnimalResult<Option<AnimalRecord>>;

    /// Returns whether a record was actually removed.
    fn delete(&self, id: &str) -> AnimalResult<bool>;

    fn list(&self) -> AnimalResult<Vec<AnimalRecord>>;
}
