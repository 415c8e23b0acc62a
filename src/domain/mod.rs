//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum) beyond
//! the `DbErr` conversion. Only trait definitions, field tables and domain
//! error types.

pub mod errors;
pub mod fields;
pub mod repositories;

pub use errors::{DomainError, FieldErrors};
pub use fields::{FieldKind, FieldSpec};
pub use repositories::*;
