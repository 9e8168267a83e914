//! `finprod-core`: shared building blocks for the product catalog.
//!
//! This crate contains **pure** primitives (no IO): the error taxonomy every other
//! crate speaks, and the entity trait used to look records up by identity.

pub mod entity;
pub mod error;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, OperationErrorKind, StoreError, StoreResult};
