//! Commerce error types.

use thiserror::Error;

use crate::money::PriceParseError;

/// Errors that can occur in storefront commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Display price does not follow the `$1.234` layout.
    #[error("Invalid price {input:?}: {source}")]
    InvalidPrice {
        input: String,
        #[source]
        source: PriceParseError,
    },

    /// Cart position does not exist.
    #[error("No cart line at index {index} (cart has {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Checkout attempted with nothing in the cart.
    #[error("Tu carrito está vacío")]
    EmptyCart,

    /// Persisted cart data violates cart invariants.
    #[error("Corrupt cart data: {0}")]
    CorruptCart(String),

    /// Unknown filter or sort value.
    #[error("Invalid {kind}: {value:?}")]
    InvalidOption { kind: &'static str, value: String },

    /// Storage slot error.
    #[error("Storage error: {0}")]
    Storage(#[from] dulce_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// Build an [`CommerceError::InvalidPrice`] for `input`.
    pub fn invalid_price(input: impl Into<String>, source: PriceParseError) -> Self {
        CommerceError::InvalidPrice {
            input: input.into(),
            source,
        }
    }

    /// Whether the error came from bad stored data rather than a caller mistake.
    pub fn is_corrupt_data(&self) -> bool {
        match self {
            CommerceError::CorruptCart(_) | CommerceError::SerializationError(_) => true,
            CommerceError::Storage(e) => e.is_corrupt_data(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
