//! Domain model for the animal resource and its subtypes.
//!
//! # Responsibility
//! - Define canonical data structures shared by handlers, service and store.
//!
//! # Invariants
//! - Every stored animal is identified by a stable `AnimalId`.
//! - Deletion is permanent; there are no tombstones.

pub mod animal;
