//! Shopping cart module.
//!
//! Contains the cart itself, its persisted store, rendering, the controller
//! that ties them together, and checkout.

mod cart;
mod checkout;
mod controller;
mod render;
mod store;

pub use cart::{AddOutcome, Cart, Decrease, LineItem, LineItemRecord, MAX_QUANTITY_PER_ITEM};
pub use checkout::Receipt;
pub use controller::CartController;
pub use render::{
    BadgeState, CartLineView, CartRenderer, CartView, NavBadge, NullRenderer, TextRenderer,
    EMPTY_CART_MESSAGE,
};
pub use store::{CartStore, Hydration, CART_SCHEMA_VERSION, CART_STORAGE_KEY};
