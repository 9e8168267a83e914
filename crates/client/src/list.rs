//! Product list controller: search, pagination, row menus and the delete workflow.
//!
//! `products` is the local copy of the store's catalog. `filtered_products` is derived
//! from it by the search term and `paginated_products` is the visible slice of that.
//! Deletions are applied to the local copy directly (no re-fetch); the copy is only as
//! fresh as the last successful load or mutation.

use std::sync::Arc;

use finprod_core::Entity;
use finprod_products::Product;

use crate::config::ClientConfig;
use crate::menu::{Point, Rect, RegionKind, RowMenu};
use crate::messages::{DefaultCatalog, MessageCatalog};
use crate::pagination::{PageSize, Pagination};
use crate::store::ProductStore;

/// Delete confirmation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Deletion {
    #[default]
    Idle,
    /// Waiting for the user to confirm deleting this id.
    ConfirmPending(String),
    /// The store call for this id is outstanding.
    Deleting(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Nothing was awaiting confirmation.
    Ignored,
    Deleted { id: String, message: String },
    Failed { message: String },
}

/// Controller behind the product list page.
pub struct ProductListController<S: ProductStore> {
    store: Arc<S>,
    catalog: Arc<dyn MessageCatalog>,
    products: Vec<Product>,
    filtered: Vec<Product>,
    paginated: Vec<Product>,
    search_term: String,
    pagination: Pagination,
    deletion: Deletion,
    menu: RowMenu,
    is_loading: bool,
    error_message: Option<String>,
}

impl<S: ProductStore> ProductListController<S> {
    pub fn new(store: Arc<S>, config: &ClientConfig) -> Self {
        Self {
            store,
            catalog: Arc::new(DefaultCatalog),
            products: Vec::new(),
            filtered: Vec::new(),
            paginated: Vec::new(),
            search_term: String::new(),
            pagination: Pagination::new(config.default_page_size),
            deletion: Deletion::Idle,
            menu: RowMenu::new(),
            is_loading: false,
            error_message: None,
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn MessageCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered
    }

    pub fn paginated_products(&self) -> &[Product] {
        &self.paginated
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages()
    }

    pub fn page_size(&self) -> PageSize {
        self.pagination.page_size()
    }

    pub fn page_size_options(&self) -> [PageSize; 3] {
        PageSize::OPTIONS
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn deletion(&self) -> &Deletion {
        &self.deletion
    }

    /// Fetch the catalog from the store.
    ///
    /// Success shows the whole catalog again, whatever the search term. On failure the
    /// error message is set and the current lists are kept.
    pub async fn load(&mut self) {
        self.is_loading = true;
        self.error_message = None;

        match self.store.list().await {
            Ok(products) => {
                tracing::info!(count = products.len(), "products loaded");
                self.filtered = products.clone();
                self.products = products;
                self.pagination.reset_page();
                self.refresh_page();
            }
            Err(err) => {
                tracing::warn!(error = %err, "loading products failed");
                self.error_message = Some(self.catalog.store_error(&err));
            }
        }

        self.is_loading = false;
    }

    /// Filter by `term` (trimmed, case-insensitive) over id, name and description.
    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.filtered = self.apply_filter();
        self.pagination.reset_page();
        self.refresh_page();
    }

    pub fn clear_search(&mut self) {
        self.search("");
    }

    fn apply_filter(&self) -> Vec<Product> {
        let needle = self.search_term.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.clone();
        }
        self.products
            .iter()
            .filter(|p| p.matches_search(&needle))
            .cloned()
            .collect()
    }

    fn refresh_page(&mut self) {
        self.pagination.recompute(self.filtered.len());
        self.paginated = self.filtered[self.pagination.range()].to_vec();
    }

    /// Change rows per page and return to the first page.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.pagination.set_page_size(size);
        self.refresh_page();
    }

    pub fn go_to_page(&mut self, page: usize) {
        if self.pagination.go_to(page) {
            self.refresh_page();
        }
    }

    pub fn go_to_next_page(&mut self) {
        if self.pagination.next() {
            self.refresh_page();
        }
    }

    pub fn go_to_previous_page(&mut self) {
        if self.pagination.previous() {
            self.refresh_page();
        }
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        self.pagination.page_numbers()
    }

    /// 1-based `(first, last, total)` of the visible rows.
    pub fn showing_range(&self) -> Option<(usize, usize, usize)> {
        self.pagination.showing_range()
    }

    pub fn open_menu_id(&self) -> Option<&str> {
        self.menu.open_id()
    }

    pub fn toggle_menu(&mut self, id: &str) {
        self.menu.toggle(id);
    }

    pub fn register_menu_region(&mut self, kind: RegionKind, row_id: &str, rect: Rect) {
        self.menu.register_region(kind, row_id, rect);
    }

    /// Global pointer handler; see [`RowMenu::on_pointer_down`].
    pub fn on_pointer_down(&mut self, point: Point) -> bool {
        self.menu.on_pointer_down(point)
    }

    /// Close the row menu and hand back the id to open in the edit form.
    pub fn edit_product(&mut self, id: &str) -> Option<String> {
        self.menu.close();
        self.find(id).map(|p| p.id.clone())
    }

    fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.has_id(id))
    }

    /// Ask for confirmation before deleting `id`. Unknown ids change nothing.
    pub fn delete_product(&mut self, id: &str) {
        if self.find(id).is_none() {
            return;
        }
        self.menu.close();
        self.deletion = Deletion::ConfirmPending(id.to_string());
    }

    /// Product awaiting confirmation (or being deleted).
    pub fn deletion_target(&self) -> Option<&Product> {
        match &self.deletion {
            Deletion::ConfirmPending(id) | Deletion::Deleting(id) => self.find(id),
            Deletion::Idle => None,
        }
    }

    pub fn is_modal_open(&self) -> bool {
        self.deletion != Deletion::Idle
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self.deletion, Deletion::Deleting(_))
    }

    /// Delete the product awaiting confirmation.
    ///
    /// The workflow returns to `Idle` whether or not the store call succeeds.
    pub async fn on_confirm_delete(&mut self) -> DeleteOutcome {
        let Deletion::ConfirmPending(id) = std::mem::take(&mut self.deletion) else {
            return DeleteOutcome::Ignored;
        };
        self.deletion = Deletion::Deleting(id.clone());

        let result = self.store.delete(&id).await;
        self.deletion = Deletion::Idle;

        match result {
            Ok(store_message) => {
                tracing::info!(id = %id, store_message = %store_message, "product deleted");
                self.products.retain(|p| !p.has_id(&id));
                self.filtered.retain(|p| !p.has_id(&id));
                self.menu.unregister_row(&id);
                self.refresh_page();
                DeleteOutcome::Deleted {
                    id,
                    message: self.catalog.product_deleted(),
                }
            }
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "deleting product failed");
                let message = self.catalog.store_error(&err);
                self.error_message = Some(message.clone());
                DeleteOutcome::Failed { message }
            }
        }
    }

    /// Dismiss the confirmation without deleting. Ignored while the delete is in flight.
    pub fn on_cancel_delete(&mut self) {
        if let Deletion::ConfirmPending(_) = self.deletion {
            self.deletion = Deletion::Idle;
        }
    }
}
