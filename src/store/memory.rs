use super::ProductStore;
use crate::error::AppError;
use crate::filter::ProductFilter;
use crate::model::{Product, ProductInput};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local store keyed by id. Ids are `<prefix><n>` with n counting from 1.
pub struct MemoryProductStore {
    products: RwLock<BTreeMap<String, Product>>,
    next_id: AtomicU64,
    id_prefix: String,
}

impl MemoryProductStore {
    pub fn new(id_prefix: impl Into<String>) -> Self {
        MemoryProductStore {
            products: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            id_prefix: id_prefix.into(),
        }
    }

    /// Seed with existing products, keeping their ids.
    pub fn with_products(id_prefix: impl Into<String>, products: impl IntoIterator<Item = Product>) -> Self {
        let store = Self::new(id_prefix);
        if let Ok(mut map) = store.products.write() {
            for p in products {
                map.insert(p.product_id.clone(), p);
            }
        }
        store
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Product>>, AppError> {
        self.products
            .read()
            .map_err(|_| AppError::Store("product map lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Product>>, AppError> {
        self.products
            .write()
            .map_err(|_| AppError::Store("product map lock poisoned".into()))
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new("p")
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn find_all_matching(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        Ok(self
            .read()?
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn create(&self, input: ProductInput) -> Result<Product, AppError> {
        let mut map = self.write()?;
        // Skip ids already taken by seeded products.
        let id = loop {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{}{}", self.id_prefix, n);
            if !map.contains_key(&candidate) {
                break candidate;
            }
        };
        let product = input.into_product(id);
        map.insert(product.product_id.clone(), product.clone());
        Ok(product)
    }

    async fn save(&self, product: &Product) -> Result<Option<Product>, AppError> {
        let mut map = self.write()?;
        match map.get_mut(&product.product_id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(Some(product.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, product: &Product) -> Result<bool, AppError> {
        Ok(self.write()?.remove(&product.product_id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductStatus;

    fn product(id: &str, status: ProductStatus, fc: &str) -> Product {
        Product {
            product_id: id.into(),
            status: Some(status),
            fulfillment_center: Some(fc.into()),
            quantity: Some(1),
            value: Some(1.0),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_skipping_seeded() {
        let store = MemoryProductStore::with_products("p", [product("p1", ProductStatus::Sellable, "fc1")]);
        let created = store.create(ProductInput::default()).await.unwrap();
        assert_eq!(created.product_id, "p2");
        let created = store.create(ProductInput::default()).await.unwrap();
        assert_eq!(created.product_id, "p3");
        assert_eq!(store.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn save_only_touches_existing_rows() {
        let store = MemoryProductStore::with_products("p", [product("p1", ProductStatus::Sellable, "fc1")]);
        let mut changed = product("p1", ProductStatus::Inbound, "fc2");
        changed.quantity = None;
        assert_eq!(store.save(&changed).await.unwrap(), Some(changed.clone()));
        assert_eq!(store.find_by_id("p1").await.unwrap(), Some(changed));

        let missing = product("p9", ProductStatus::Inbound, "fc2");
        assert_eq!(store.save(&missing).await.unwrap(), None);
        assert_eq!(store.find_by_id("p9").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let p = product("p1", ProductStatus::Sellable, "fc1");
        let store = MemoryProductStore::with_products("p", [p.clone()]);
        assert!(store.delete(&p).await.unwrap());
        assert!(!store.delete(&p).await.unwrap());
    }

    #[tokio::test]
    async fn matching_applies_the_filter() {
        let store = MemoryProductStore::with_products(
            "p",
            [
                product("p1", ProductStatus::Sellable, "fc1"),
                product("p2", ProductStatus::Inbound, "fc1"),
                product("p4", ProductStatus::Sellable, "fc1"),
            ],
        );
        let mut filter = ProductFilter::default();
        filter.example.status = Some(ProductStatus::Sellable);
        let ids: Vec<_> = store
            .find_all_matching(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.product_id)
            .collect();
        assert_eq!(ids, ["p1", "p4"]);
    }
}
