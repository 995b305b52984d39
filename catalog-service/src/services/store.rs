use crate::models::Product;
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Operations the catalog needs from its document store.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch at most `limit` products in the store's natural order.
    async fn list_products(&self, limit: i64) -> Result<Vec<Product>, AppError>;
    async fn create_product(&self, product: Product) -> Result<(), AppError>;
}

/// In-memory store for tests and store-less local runs.
///
/// `set_failing(true)` makes every operation return a database error, which
/// mimics an unreachable or rejecting backend.
pub struct MockProductStore {
    products: Mutex<Vec<Product>>,
    failing: AtomicBool,
}

impl Default for MockProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProductStore {
    pub fn new() -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of everything written so far, in insertion order.
    pub fn products(&self) -> Vec<Product> {
        self.products
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "mock store unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MockProductStore {
    async fn list_products(&self, limit: i64) -> Result<Vec<Product>, AppError> {
        self.check_available()?;
        let products = self
            .products
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock store mutex poisoned: {}", e))?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(products.iter().take(limit).cloned().collect())
    }

    async fn create_product(&self, product: Product) -> Result<(), AppError> {
        self.check_available()?;
        let mut products = self
            .products
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock store mutex poisoned: {}", e))?;
        if products.iter().any(|p| p.id == product.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: {}",
                product.id
            )));
        }
        products.push(product);
        Ok(())
    }
}
