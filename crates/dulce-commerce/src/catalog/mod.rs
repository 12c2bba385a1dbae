//! Product catalog module.
//!
//! Contains product types and the bundled bakery catalog.

mod product;
mod seed;

pub use product::{Category, Product, ProductId};
pub use seed::Catalog;
