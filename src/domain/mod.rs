//! Domain layer - Pure catalog abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Entities, their derived display fields, repository traits and error types.

pub mod derived;
pub mod entities;
pub mod errors;
pub mod repositories;

pub use derived::*;
pub use entities::*;
pub use errors::DomainError;
pub use repositories::*;
