//! Storefront domain types and logic for Dulce Hogar.
//!
//! - **Money**: whole-peso amounts and the `$1.234` display price format
//! - **Cart**: line items, the persisted cart store, rendering, checkout
//! - **Catalog**: products and the bundled bakery catalog
//! - **Search**: filters, sorting, pagination, live text search
//!
//! # Example
//!
//! ```rust
//! use dulce_cache::MemoryStore;
//! use dulce_commerce::prelude::*;
//!
//! let (store, _) = CartStore::open(MemoryStore::new()).unwrap();
//! let mut cart = CartController::new(store, NavBadge::new()).unwrap();
//!
//! cart.add("Pan Campesino", "$2.500").unwrap();
//! cart.add("Pan Campesino", "$2.500").unwrap();
//!
//! assert_eq!(cart.renderer().tooltip, "2 items - $5.000");
//! ```

pub mod error;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use money::{Money, PriceParseError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::money::{Money, PriceParseError};

    // Cart
    pub use crate::cart::{
        AddOutcome, Cart, CartController, CartRenderer, CartStore, CartView, Decrease, Hydration,
        LineItem, NavBadge, Receipt, TextRenderer,
    };

    // Catalog
    pub use crate::catalog::{Catalog, Category, Product, ProductId};

    // Search
    pub use crate::search::{
        CatalogBrowser, CatalogQuery, Filter, Pagination, PriceBand, SearchResults, Selection,
        SortOption, TextSearch,
    };
}
