//! Product domain types.

mod product;
pub use product::{Product, ProductInput, ProductStatus};
