//! Dispatch layer between callers and subtype handlers.
//!
//! # Responsibility
//! - Resolve an animal kind to its handler (`HandlerRegistry`).
//! - Expose one uniform CRUD surface over all kinds (`AnimalService`).

pub mod animal_service;
pub mod registry;
