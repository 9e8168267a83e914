//! Products domain module.
//!
//! This crate contains the business rules for catalog entries, implemented purely as
//! deterministic domain logic (no IO, no timers, no storage):
//! - [`product`]: the `Product` value entity and its field names.
//! - [`rules`]: per-field synchronous validation (required + length bounds).
//! - [`dates`]: release/revision date rules (date-only comparison, one-year derivation).

pub mod dates;
pub mod product;
pub mod rules;

pub use dates::{derive_revision, format_date, min_date_error, parse_date, revision_error, revision_matches};
pub use product::{Product, ProductField};
pub use rules::{LengthBounds, ValidationErrorKind, ValidationErrors, validate};
