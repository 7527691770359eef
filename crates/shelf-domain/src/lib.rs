//! Domain types shared across all Shelf services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; adapters convert at their edge.

pub mod book;
pub mod id;
pub mod status;
