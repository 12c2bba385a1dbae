//! Cart store: the cart plus its storage slot.

use dulce_cache::{KvStore, Slot};
use tracing::{debug, info, warn};

use super::cart::{AddOutcome, Cart, Decrease, LineItem, LineItemRecord};
use crate::error::CommerceError;
use crate::money::Money;

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "dulceHogarCart";

/// Schema version written to the cart slot.
pub const CART_SCHEMA_VERSION: u32 = 1;

/// How a store came up when it was opened.
#[derive(Debug)]
pub enum Hydration {
    /// Nothing was stored; the cart starts empty.
    Fresh,
    /// Stored lines were loaded.
    Restored {
        /// Number of lines restored.
        lines: usize,
        /// Data was in the unversioned layout and will be rewritten on the next persist.
        legacy: bool,
    },
    /// Stored data could not be read; the cart starts empty.
    Recovered(CommerceError),
}

impl Hydration {
    /// Whether stored data was discarded.
    pub fn is_recovered(&self) -> bool {
        matches!(self, Hydration::Recovered(_))
    }
}

/// The page's cart, kept in sync with a durable slot.
///
/// Every mutation is applied in memory first and then persisted. When the
/// write fails the in-memory change stands and the storage error is returned,
/// so the next successful persist catches the slot up.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    slot: Slot<S, Vec<LineItemRecord>>,
}

impl<S: KvStore> CartStore<S> {
    /// Create an empty store over `store` at the default key, without reading it.
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Create an empty store over `store` at `key`, without reading it.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cart: Cart::new(),
            slot: Slot::new(store, key, CART_SCHEMA_VERSION),
        }
    }

    /// Open the cart at the default key, hydrating from storage.
    ///
    /// Malformed stored data does not fail the open: the cart starts empty
    /// and the error is handed back as [`Hydration::Recovered`]. Errors from
    /// the storage backend itself are still returned.
    pub fn open(store: S) -> Result<(Self, Hydration), CommerceError> {
        Self::open_with_key(store, CART_STORAGE_KEY)
    }

    /// Open the cart at `key`, hydrating from storage.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Result<(Self, Hydration), CommerceError> {
        let mut this = Self::with_key(store, key);
        match this.restore() {
            Ok(hydration) => Ok((this, hydration)),
            Err(e) if e.is_corrupt_data() => {
                warn!(key = %this.slot.key(), error = %e, "discarding unreadable cart");
                Ok((this, Hydration::Recovered(e)))
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the in-memory cart with what is stored.
    ///
    /// Fails on malformed data, leaving the current cart untouched.
    pub fn restore(&mut self) -> Result<Hydration, CommerceError> {
        let Some(loaded) = self.slot.load()? else {
            debug!(key = %self.slot.key(), "no stored cart");
            self.cart = Cart::new();
            return Ok(Hydration::Fresh);
        };

        let legacy = loaded.is_legacy();
        let cart = Cart::from_records(loaded.data)?;
        let lines = cart.len();
        self.cart = cart;

        info!(key = %self.slot.key(), lines, legacy, "cart restored");
        Ok(Hydration::Restored { lines, legacy })
    }

    /// Write the current cart to the slot.
    pub fn persist(&self) -> Result<(), CommerceError> {
        self.slot.save(&self.cart.to_records())?;
        debug!(
            key = %self.slot.key(),
            lines = self.cart.len(),
            "cart persisted"
        );
        Ok(())
    }

    /// Add one unit of a product and persist.
    pub fn add(&mut self, name: &str, display_price: &str) -> Result<AddOutcome, CommerceError> {
        let outcome = self.cart.add(name, display_price)?;
        debug!(
            name,
            index = outcome.index,
            quantity = outcome.quantity,
            "added to cart"
        );
        self.persist()?;
        Ok(outcome)
    }

    /// Increment the line at `index` and persist.
    pub fn increase(&mut self, index: usize) -> Result<u32, CommerceError> {
        let quantity = self.cart.increase(index)?;
        debug!(index, quantity, "cart line increased");
        self.persist()?;
        Ok(quantity)
    }

    /// Decrement the line at `index` (removing it at quantity 1) and persist.
    pub fn decrease(&mut self, index: usize) -> Result<Decrease, CommerceError> {
        let outcome = self.cart.decrease(index)?;
        debug!(index, ?outcome, "cart line decreased");
        self.persist()?;
        Ok(outcome)
    }

    /// Remove the line at `index` and persist.
    pub fn remove(&mut self, index: usize) -> Result<LineItem, CommerceError> {
        let item = self.cart.remove(index)?;
        debug!(index, name = %item.name, "cart line removed");
        self.persist()?;
        Ok(item)
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.cart.clear();
        self.persist()
    }

    /// Sum of quantities.
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Sum of line totals.
    pub fn total_amount(&self) -> Result<Money, CommerceError> {
        self.cart.total_amount()
    }

    /// The in-memory cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        self.slot.key()
    }

    /// The backing store.
    pub fn backend(&self) -> &S {
        self.slot.store()
    }
}
