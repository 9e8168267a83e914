//! Client-side controllers for the financial products catalog.
//!
//! Everything here talks to the backend through [`store::ProductStore`]; the HTTP
//! implementation lives behind the `http` feature.

pub mod config;
pub mod form;
#[cfg(feature = "http")]
pub mod http;
pub mod list;
pub mod menu;
pub mod messages;
pub mod pagination;
pub mod store;
pub mod uniqueness;

pub use config::ClientConfig;
pub use form::{FormError, FormMode, FormPhase, ProductFormController, SubmitOutcome};
#[cfg(feature = "http")]
pub use http::HttpProductStore;
pub use list::{DeleteOutcome, Deletion, ProductListController};
pub use messages::{DefaultCatalog, MessageCatalog};
pub use pagination::{PageSize, Pagination};
pub use store::{InMemoryProductStore, ProductStore};
pub use uniqueness::{CheckOutcome, CheckTicket, UniquenessChecker};
