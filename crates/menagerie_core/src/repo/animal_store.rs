//! Persistence contract consumed by animal handlers, plus the SQLite store.
//!
//! # Responsibility
//! - Define the narrow store interface handlers call (`AnimalStore`).
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every lookup/mutation filters by `(id, kind)`; no path touches a row of
//!   another kind.
//! - Read paths reject undecodable rows instead of masking them.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::animal::{AnimalDraft, AnimalId, AnimalKind, AnimalPatch, AnimalRecord};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const ANIMAL_SELECT_SQL: &str = "SELECT id, kind, name, age FROM animals";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-side failure for animal persistence.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// A record with this ID already exists.
    DuplicateId(AnimalId),
    /// Connection opened without the expected schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
    /// The backing connection cannot be used any more.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "animal id already exists: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted animal data: {message}"),
            Self::Unavailable(message) => write!(f, "animal store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence collaborator for animal records.
///
/// Implementations own all mutable state and their own concurrency policy;
/// callers share one instance across threads.
pub trait AnimalStore: Send + Sync {
    /// Persists a new record of `kind`. Assigns an ID when `draft.id` is
    /// `None`. `draft.kind` is ignored.
    fn save(&self, kind: AnimalKind, draft: &AnimalDraft) -> StoreResult<AnimalRecord>;
    fn find_one(&self, id: &str, kind: AnimalKind) -> StoreResult<Option<AnimalRecord>>;
    fn find_many(&self, kind: AnimalKind) -> StoreResult<Vec<AnimalRecord>>;
    /// Applies `patch` to the row matching `(id, kind)`; no-op when none does.
    fn update_where(&self, id: &str, kind: AnimalKind, patch: &AnimalPatch) -> StoreResult<()>;
    /// Removes the row matching `(id, kind)`; returns the affected count.
    fn delete_where(&self, id: &str, kind: AnimalKind) -> StoreResult<usize>;
}

/// SQLite-backed animal store.
///
/// One connection, serialized behind a mutex.
pub struct SqliteAnimalStore {
    conn: Mutex<Connection>,
}

impl SqliteAnimalStore {
    /// Wraps an already-migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version = schema_version(&conn)?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a database file, migrating it if needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))
    }
}

impl AnimalStore for SqliteAnimalStore {
    fn save(&self, kind: AnimalKind, draft: &AnimalDraft) -> StoreResult<AnimalRecord> {
        let id = draft
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let record = AnimalRecord::new(id, kind, draft.name.as_str(), draft.age);

        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO animals (id, kind, name, age) VALUES (?1, ?2, ?3, ?4);",
            params![
                record.id.as_str(),
                kind_to_db(kind),
                record.name.as_str(),
                i64::from(record.age),
            ],
        );
        match inserted {
            Ok(_) => Ok(record),
            Err(err) if is_primary_key_violation(&err) => Err(StoreError::DuplicateId(record.id)),
            Err(err) => Err(err.into()),
        }
    }

    fn find_one(&self, id: &str, kind: AnimalKind) -> StoreResult<Option<AnimalRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{ANIMAL_SELECT_SQL} WHERE id = ?1 AND kind = ?2;"
        ))?;

        let mut rows = stmt.query(params![id, kind_to_db(kind)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_animal_row(row)?));
        }

        Ok(None)
    }

    fn find_many(&self, kind: AnimalKind) -> StoreResult<Vec<AnimalRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{ANIMAL_SELECT_SQL} WHERE kind = ?1 ORDER BY created_at ASC, rowid ASC;"
        ))?;

        let mut rows = stmt.query([kind_to_db(kind)])?;
        let mut animals = Vec::new();
        while let Some(row) = rows.next()? {
            animals.push(parse_animal_row(row)?);
        }

        Ok(animals)
    }

    fn update_where(&self, id: &str, kind: AnimalKind, patch: &AnimalPatch) -> StoreResult<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(name) = &patch.name {
            assignments.push("name = ?");
            bind_values.push(Value::Text(name.clone()));
        }
        if let Some(age) = patch.age {
            assignments.push("age = ?");
            bind_values.push(Value::Integer(i64::from(age)));
        }
        bind_values.push(Value::Text(id.to_string()));
        bind_values.push(Value::Text(kind_to_db(kind).to_string()));

        let sql = format!(
            "UPDATE animals SET {} WHERE id = ? AND kind = ?;",
            assignments.join(", ")
        );
        self.conn()?.execute(&sql, params_from_iter(bind_values))?;
        Ok(())
    }

    fn delete_where(&self, id: &str, kind: AnimalKind) -> StoreResult<usize> {
        let changed = self.conn()?.execute(
            "DELETE FROM animals WHERE id = ?1 AND kind = ?2;",
            params![id, kind_to_db(kind)],
        )?;
        Ok(changed)
    }
}

fn parse_animal_row(row: &Row<'_>) -> StoreResult<AnimalRecord> {
    let kind_text: String = row.get("kind")?;
    let kind = parse_kind(&kind_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid animal kind `{kind_text}` in animals.kind"))
    })?;

    let raw_age: i64 = row.get("age")?;
    let age = u32::try_from(raw_age).map_err(|_| {
        StoreError::InvalidData(format!("invalid age `{raw_age}` in animals.age"))
    })?;

    Ok(AnimalRecord {
        id: row.get("id")?,
        kind,
        name: row.get("name")?,
        age,
    })
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn kind_to_db(kind: AnimalKind) -> &'static str {
    match kind {
        AnimalKind::Dog => "dog",
        AnimalKind::Cat => "cat",
        AnimalKind::Fish => "fish",
    }
}

fn parse_kind(value: &str) -> Option<AnimalKind> {
    match value {
        "dog" => Some(AnimalKind::Dog),
        "cat" => Some(AnimalKind::Cat),
        "fish" => Some(AnimalKind::Fish),
        _ => None,
    }
}
