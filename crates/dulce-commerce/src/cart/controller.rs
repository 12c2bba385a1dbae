//! Cart controller: store mutations followed by a re-render.

use dulce_cache::KvStore;
use tracing::{info, warn};

use super::cart::{AddOutcome, Decrease, LineItem};
use super::checkout::Receipt;
use super::render::{CartRenderer, CartView};
use super::store::CartStore;
use crate::catalog::Product;
use crate::error::CommerceError;

/// Drives a [`CartStore`] and keeps a [`CartRenderer`] in step with it.
///
/// Every operation renders after it runs, whether or not it succeeded, so the
/// display always reflects the in-memory cart.
#[derive(Debug)]
pub struct CartController<S, R> {
    store: CartStore<S>,
    renderer: R,
}

impl<S: KvStore, R: CartRenderer> CartController<S, R> {
    /// Wrap a store and draw the initial state.
    pub fn new(store: CartStore<S>, renderer: R) -> Result<Self, CommerceError> {
        let mut controller = Self { store, renderer };
        controller.refresh()?;
        Ok(controller)
    }

    /// Add one unit of `name` at `display_price`.
    pub fn add(&mut self, name: &str, display_price: &str) -> Result<AddOutcome, CommerceError> {
        let result = self.store.add(name, display_price);
        self.commit(result)
    }

    /// Add one unit of a catalog product.
    pub fn add_product(&mut self, product: &Product) -> Result<AddOutcome, CommerceError> {
        self.add(&product.name, &product.price)
    }

    /// Increment the line at `index`.
    pub fn increase(&mut self, index: usize) -> Result<u32, CommerceError> {
        let result = self.store.increase(index);
        self.commit(result)
    }

    /// Decrement the line at `index`, removing it at quantity 1.
    pub fn decrease(&mut self, index: usize) -> Result<Decrease, CommerceError> {
        let result = self.store.decrease(index);
        self.commit(result)
    }

    /// Remove the line at `index`.
    pub fn remove(&mut self, index: usize) -> Result<LineItem, CommerceError> {
        let result = self.store.remove(index);
        self.commit(result)
    }

    /// Place the order: snapshot the cart, clear it and persist the empty state.
    pub fn checkout(&mut self) -> Result<Receipt, CommerceError> {
        if self.store.cart().is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let receipt = Receipt::from_view(CartView::project(self.store.cart())?);
        let result = self.store.clear().map(|()| receipt);
        let receipt = self.commit(result)?;

        info!(
            items = receipt.item_count,
            total = %receipt.total,
            "checkout complete"
        );
        Ok(receipt)
    }

    /// Redraw from the current store state.
    pub fn refresh(&mut self) -> Result<(), CommerceError> {
        let view = CartView::project(self.store.cart())?;
        self.renderer.render(&view);
        Ok(())
    }

    /// Current render projection.
    pub fn view(&self) -> Result<CartView, CommerceError> {
        CartView::project(self.store.cart())
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn commit<T>(&mut self, result: Result<T, CommerceError>) -> Result<T, CommerceError> {
        let rendered = self.refresh();
        if let Err(e) = &result {
            warn!(error = %e, "cart operation failed");
        }
        let value = result?;
        rendered?;
        Ok(value)
    }
}
