//! Product store contract and an in-memory implementation.

use std::sync::{Mutex, RwLock};
use std::time::Duration;

use finprod_core::{Entity, StoreError, StoreResult};
use finprod_products::Product;

/// Remote CRUD + existence check consumed by the controllers.
///
/// The store is the source of truth; controllers keep a local copy that is only as
/// fresh as the last successful call.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// All registered products.
    async fn list(&self) -> StoreResult<Vec<Product>>;

    /// Register a new product. Fails with `Conflict` when the id is taken.
    async fn create(&self, product: Product) -> StoreResult<Product>;

    /// Replace the product registered under `id`.
    async fn update(&self, id: &str, product: Product) -> StoreResult<Product>;

    /// Remove the product registered under `id`, returning the store's confirmation text.
    async fn delete(&self, id: &str) -> StoreResult<String>;

    /// Whether `id` is already registered.
    async fn verify_exists(&self, id: &str) -> StoreResult<bool>;
}

/// Number of calls an [`InMemoryProductStore`] has served, per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub list: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub verify_exists: usize,
}

#[derive(Debug, Clone, Copy)]
enum Op {
    List,
    Create,
    Update,
    Delete,
    VerifyExists,
}

/// In-memory product store.
///
/// Intended for tests/dev. Supports artificial latency and failure injection so
/// controllers can be exercised against slow or broken transports.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
    failure: RwLock<Option<StoreError>>,
    calls: Mutex<StoreCalls>,
    latency: Duration,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Delay every operation by `latency` (uses the tokio clock).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every subsequent call fail with `error` until cleared with `None`.
    pub fn fail_with(&self, error: Option<StoreError>) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = error;
        }
    }

    pub fn calls(&self) -> StoreCalls {
        self.calls.lock().map(|c| *c).unwrap_or_default()
    }

    /// Snapshot of the stored products.
    pub fn snapshot(&self) -> Vec<Product> {
        self.products.read().map(|p| p.clone()).unwrap_or_default()
    }

    async fn enter(&self, op: Op) -> StoreResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            match op {
                Op::List => calls.list += 1,
                Op::Create => calls.create += 1,
                Op::Update => calls.update += 1,
                Op::Delete => calls.delete += 1,
                Op::VerifyExists => calls.verify_exists += 1,
            }
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let failure = self
            .failure
            .read()
            .map_err(|_| StoreError::unknown("lock poisoned"))?;
        match failure.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Vec<Product>>> {
        self.products
            .read()
            .map_err(|_| StoreError::unknown("lock poisoned"))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Vec<Product>>> {
        self.products
            .write()
            .map_err(|_| StoreError::unknown("lock poisoned"))
    }
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.enter(Op::List).await?;
        Ok(self.read()?.clone())
    }

    async fn create(&self, product: Product) -> StoreResult<Product> {
        self.enter(Op::Create).await?;
        let mut products = self.write()?;
        if products.iter().any(|p| p.has_id(&product.id)) {
            return Err(StoreError::conflict(format!(
                "Duplicate identifier found in the database: {}",
                product.id
            )));
        }
        products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, mut product: Product) -> StoreResult<Product> {
        self.enter(Op::Update).await?;
        let mut products = self.write()?;
        let slot = products
            .iter_mut()
            .find(|p| p.has_id(id))
            .ok_or(StoreError::NotFound)?;
        // Identifiers are immutable once registered.
        product.id = id.to_string();
        *slot = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: &str) -> StoreResult<String> {
        self.enter(Op::Delete).await?;
        let mut products = self.write()?;
        let before = products.len();
        products.retain(|p| !p.has_id(id));
        if products.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok("Product removed successfully".to_string())
    }

    async fn verify_exists(&self, id: &str) -> StoreResult<bool> {
        self.enter(Op::VerifyExists).await?;
        Ok(self.read()?.iter().any(|p| p.has_id(id)))
    }
}
