//! ProductService: product operations over a `ProductStore`.

mod product;
pub use product::{merge_update, sum_values, ProductService};
