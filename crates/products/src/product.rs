use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use finprod_core::{DomainError, DomainResult, Entity};

use crate::dates;

/// Names of the editable product fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Id,
    Name,
    Description,
    Logo,
    DateRelease,
    DateRevision,
}

impl ProductField {
    pub const ALL: [ProductField; 6] = [
        ProductField::Id,
        ProductField::Name,
        ProductField::Description,
        ProductField::Logo,
        ProductField::DateRelease,
        ProductField::DateRevision,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Logo => "logo",
            ProductField::DateRelease => "date_release",
            ProductField::DateRevision => "date_revision",
        }
    }
}

impl core::fmt::Display for ProductField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered financial product.
///
/// Field names match the store's wire format; dates serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub date_release: NaiveDate,
    pub date_revision: NaiveDate,
}

impl Product {
    /// Build a product whose revision date is derived from the release date.
    pub fn with_derived_revision(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        logo: impl Into<String>,
        date_release: NaiveDate,
    ) -> DomainResult<Self> {
        let date_revision = dates::derive_revision(date_release)
            .ok_or_else(|| DomainError::invariant("release date has no representable revision date"))?;

        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            logo: logo.into(),
            date_release,
            date_revision,
        })
    }

    /// Whether `date_revision` is exactly one calendar year after `date_release`.
    pub fn revision_is_valid(&self) -> bool {
        dates::revision_matches(self.date_release, self.date_revision)
    }

    /// Current value of `field` rendered the way a form holds it.
    pub fn field_value(&self, field: ProductField) -> String {
        match field {
            ProductField::Id => self.id.clone(),
            ProductField::Name => self.name.clone(),
            ProductField::Description => self.description.clone(),
            ProductField::Logo => self.logo.clone(),
            ProductField::DateRelease => dates::format_date(self.date_release),
            ProductField::DateRevision => dates::format_date(self.date_revision),
        }
    }

    /// Case-insensitive substring match over `id`, `name` and `description`.
    ///
    /// `needle` must already be trimmed and lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
    }
}

impl Entity for Product {
    type Id = str;

    fn id(&self) -> &str {
        &self.id
    }
}
