//! Per-field synchronous validation rules.
//!
//! | field         | required | length      |
//! |---------------|----------|-------------|
//! | id            | yes      | 3..=10      |
//! | name          | yes      | 5..=100     |
//! | description   | yes      | 10..=200    |
//! | logo          | yes      | -           |
//! | date_release  | yes      | -           |
//! | date_revision | yes      | -           |
//!
//! Length is counted in characters, not bytes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::product::ProductField;

/// Why a field value is rejected.
///
/// Variant order is the display precedence: when a field carries several kinds,
/// the smallest one is the one shown (`Required` first, field-specific kinds last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ValidationErrorKind {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    DuplicateId,
    MinDate,
    InvalidRevisionDate,
}

/// Complete set of violated rules for one field, ordered by display precedence.
pub type ValidationErrors = BTreeSet<ValidationErrorKind>;

/// Inclusive character-count bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

pub const ID_LENGTH: LengthBounds = LengthBounds { min: 3, max: 10 };
pub const NAME_LENGTH: LengthBounds = LengthBounds { min: 5, max: 100 };
pub const DESCRIPTION_LENGTH: LengthBounds = LengthBounds { min: 10, max: 200 };

impl LengthBounds {
    fn check(&self, value: &str, errors: &mut ValidationErrors) {
        let len = value.chars().count();
        if len < self.min {
            errors.insert(ValidationErrorKind::TooShort { min: self.min });
        }
        if len > self.max {
            errors.insert(ValidationErrorKind::TooLong { max: self.max });
        }
    }
}

/// Length bounds for `field`, if it has any.
pub fn length_bounds(field: ProductField) -> Option<LengthBounds> {
    match field {
        ProductField::Id => Some(ID_LENGTH),
        ProductField::Name => Some(NAME_LENGTH),
        ProductField::Description => Some(DESCRIPTION_LENGTH),
        ProductField::Logo | ProductField::DateRelease | ProductField::DateRevision => None,
    }
}

/// Evaluate the synchronous rules for `field`.
///
/// Returns every violated kind. An empty value yields only `Required`; length rules are
/// not evaluated for it.
pub fn validate(field: ProductField, value: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if value.is_empty() {
        errors.insert(ValidationErrorKind::Required);
        return errors;
    }

    if let Some(bounds) = length_bounds(field) {
        bounds.check(value, &mut errors);
    }

    errors
}

/// The single kind to display for a set of errors.
pub fn primary(errors: &ValidationErrors) -> Option<ValidationErrorKind> {
    errors.first().copied()
}
