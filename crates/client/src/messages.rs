//! User-facing text.
//!
//! Controllers pick *what* went wrong (a `ValidationErrorKind` or a `StoreError`); a
//! [`MessageCatalog`] decides how it reads.

use finprod_core::StoreError;
use finprod_products::{ProductField, ValidationErrorKind};

/// Source of localized message text.
pub trait MessageCatalog: Send + Sync {
    /// Text for a validation failure on `field`.
    fn validation(&self, field: ProductField, kind: ValidationErrorKind) -> String;

    fn product_created(&self) -> String;
    fn product_updated(&self) -> String;
    fn product_deleted(&self) -> String;

    fn generic_error(&self) -> String;
    fn network_error(&self) -> String;
    fn not_found(&self) -> String;

    /// Text for a failed store operation.
    ///
    /// A message supplied by the store is passed through verbatim.
    fn store_error(&self, error: &StoreError) -> String {
        match error {
            StoreError::Network(_) => self.network_error(),
            StoreError::NotFound => self.not_found(),
            other => other
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| self.generic_error()),
        }
    }
}

/// The catalog the product portal ships with (Spanish).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl DefaultCatalog {
    fn label(field: ProductField) -> &'static str {
        match field {
            ProductField::Id => "ID",
            ProductField::Name => "Nombre",
            ProductField::Description => "Descripción",
            ProductField::Logo => "Logo",
            ProductField::DateRelease => "Fecha de liberación",
            ProductField::DateRevision => "Fecha de revisión",
        }
    }

    fn required_suffix(field: ProductField) -> &'static str {
        match field {
            ProductField::Description | ProductField::DateRelease | ProductField::DateRevision => {
                "requerida"
            }
            _ => "requerido",
        }
    }
}

impl MessageCatalog for DefaultCatalog {
    fn validation(&self, field: ProductField, kind: ValidationErrorKind) -> String {
        let label = Self::label(field);
        match kind {
            ValidationErrorKind::Required => {
                format!("{label} es {}!", Self::required_suffix(field))
            }
            ValidationErrorKind::TooShort { min } => {
                format!("{label} debe tener mínimo {min} caracteres!")
            }
            ValidationErrorKind::TooLong { max } => {
                format!("{label} debe tener máximo {max} caracteres!")
            }
            ValidationErrorKind::DuplicateId => "Este ID ya existe!".to_string(),
            ValidationErrorKind::MinDate => {
                format!("{label} debe ser igual o mayor a la fecha actual!")
            }
            ValidationErrorKind::InvalidRevisionDate => format!(
                "{label} debe ser exactamente un año posterior a la fecha de liberación!"
            ),
        }
    }

    fn product_created(&self) -> String {
        "Producto creado exitosamente".to_string()
    }

    fn product_updated(&self) -> String {
        "Producto actualizado exitosamente".to_string()
    }

    fn product_deleted(&self) -> String {
        "Producto eliminado exitosamente".to_string()
    }

    fn generic_error(&self) -> String {
        "Ha ocurrido un error. Por favor intente nuevamente.".to_string()
    }

    fn network_error(&self) -> String {
        "Error de conexión. Verifique su conexión a internet.".to_string()
    }

    fn not_found(&self) -> String {
        "Producto no encontrado".to_string()
    }
}
