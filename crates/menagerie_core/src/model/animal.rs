//! Animal domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by every animal subtype.
//! - Define the create/update payload shapes accepted by the core.
//!
//! # Invariants
//! - `id` is stable and never reused for another animal.
//! - `kind` is fixed at creation; no payload can change it.
//! - `age` is non-negative by construction (`u32`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable identifier for a stored animal.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AnimalId = String;

/// Closed set of animal subtypes.
///
/// Adding a subtype means adding a handler and a registry entry as well.
/// Deserialization accepts the same spellings as [`str::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AnimalKind {
    Dog,
    Cat,
    Fish,
}

impl AnimalKind {
    /// All subtypes in declaration order.
    pub const ALL: [AnimalKind; 3] = [AnimalKind::Dog, AnimalKind::Cat, AnimalKind::Fish];

    /// External display name (`Dog|Cat|Fish`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Fish => "Fish",
        }
    }
}

impl Display for AnimalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AnimalKind {
    type Error = UnknownKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raised when a raw tag does not name a known subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKindError(pub String);

impl Display for UnknownKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown animal type `{}`; expected Dog|Cat|Fish", self.0)
    }
}

impl Error for UnknownKindError {}

impl FromStr for AnimalKind {
    type Err = UnknownKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dog" => Ok(Self::Dog),
            "cat" => Ok(Self::Cat),
            "fish" => Ok(Self::Fish),
            _ => Err(UnknownKindError(value.to_string())),
        }
    }
}

/// Canonical persisted animal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub id: AnimalId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: AnimalKind,
    pub name: String,
    pub age: u32,
}

impl AnimalRecord {
    /// Builds a record with a caller-provided stable ID.
    pub fn new(
        id: impl Into<AnimalId>,
        kind: AnimalKind,
        name: impl Into<String>,
        age: u32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            age,
        }
    }

    /// Applies patch fields in place. `id` and `kind` are untouched.
    pub fn apply(&mut self, patch: &AnimalPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
    }
}

/// Create payload accepted at the API boundary.
///
/// `kind` may be omitted by callers; the dispatching service stamps it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimalDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AnimalId>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnimalKind>,
    pub name: String,
    pub age: u32,
}

impl AnimalDraft {
    /// Draft without a preassigned ID; the store assigns one.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            id: None,
            kind: None,
            name: name.into(),
            age,
        }
    }

    /// Preassigns a stable ID (import paths, fixtures).
    pub fn with_id(mut self, id: impl Into<AnimalId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns a copy tagged with `kind`.
    pub fn tagged(mut self, kind: AnimalKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Partial update payload. Only `name` and `age` are mutable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimalPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl AnimalPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            age: None,
        }
    }

    pub fn age(age: u32) -> Self {
        Self {
            name: None,
            age: Some(age),
        }
    }

    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimalDraft, AnimalKind, AnimalPatch, AnimalRecord};

    #[test]
    fn kind_parses_case_insensitively_and_trims() {
        assert_eq!(" dog ".parse::<AnimalKind>().unwrap(), AnimalKind::Dog);
        assert_eq!("CAT".parse::<AnimalKind>().unwrap(), AnimalKind::Cat);
        assert_eq!("Fish".parse::<AnimalKind>().unwrap(), AnimalKind::Fish);
    }

    #[test]
    fn kind_rejects_values_outside_enumeration() {
        let err = "Bird".parse::<AnimalKind>().unwrap_err();
        assert_eq!(err.0, "Bird");
        assert!(err.to_string().contains("Dog|Cat|Fish"));
    }

    #[test]
    fn apply_patch_keeps_identity_fields() {
        let mut record = AnimalRecord::new("d1", AnimalKind::Dog, "Rex", 3);
        record.apply(&AnimalPatch::age(5));
        assert_eq!(record, AnimalRecord::new("d1", AnimalKind::Dog, "Rex", 5));

        record.apply(&AnimalPatch::name("Max"));
        assert_eq!(record.name, "Max");
        assert_eq!(record.age, 5);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(AnimalPatch::default().is_empty());
        assert!(!AnimalPatch::age(1).is_empty());
    }

    #[test]
    fn payload_type_tag_deserializes_like_parse() {
        let draft: AnimalDraft =
            serde_json::from_str(r#"{"name":"Rex","age":3,"type":"dog"}"#).unwrap();
        assert_eq!(draft.kind, Some(AnimalKind::Dog));

        let record: AnimalRecord =
            serde_json::from_str(r#"{"id":"c1","type":" CAT ","name":"Mia","age":2}"#).unwrap();
        assert_eq!(record.kind, AnimalKind::Cat);

        let err = serde_json::from_str::<AnimalKind>(r#""Bird""#).unwrap_err();
        assert!(err.to_string().contains("unknown animal type `Bird`"));
    }
}
