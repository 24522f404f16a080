//! Product service: REST backend for the Product resource.

pub mod case;
pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreBackend};
pub use error::{AppError, ConfigError, FilterError};
pub use filter::{FieldValue, ProductExample, ProductFilter};
pub use migration::{apply_migrations, ensure_database_exists};
pub use model::{Product, ProductInput, ProductStatus};
pub use routes::{app, common_routes, product_routes};
pub use service::ProductService;
pub use state::AppState;
pub use store::{MemoryProductStore, PgProductStore, ProductStore};
