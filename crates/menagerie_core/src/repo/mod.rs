//! Persistence boundary for animal records.
//!
//! # Responsibility
//! - Define the store contract handlers depend on.
//! - Isolate SQLite query details from dispatch and handler logic.
//!
//! # Invariants
//! - Store APIs report absence as `None` / zero affected rows, never as an
//!   error.

pub mod animal_store;
