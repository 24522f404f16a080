//! Product persistence: the store trait and its PostgreSQL and in-memory backends.

mod memory;
mod postgres;
pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

use crate::error::AppError;
use crate::filter::ProductFilter;
use crate::model::{Product, ProductInput};
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by id.
    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    /// Products matching every set field of the filter, ordered by id.
    async fn find_all_matching(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError>;

    /// Persist a new product under a store-generated id.
    async fn create(&self, input: ProductInput) -> Result<Product, AppError>;

    /// Overwrite an existing product. `None` when no row has its id.
    async fn save(&self, product: &Product) -> Result<Option<Product>, AppError>;

    /// Remove a product. `false` when no row had its id.
    async fn delete(&self, product: &Product) -> Result<bool, AppError>;

    /// Cheap round trip to the backend, used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}
