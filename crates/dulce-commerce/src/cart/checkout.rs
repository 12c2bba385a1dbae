//! Checkout.

use serde::Serialize;

use super::render::{CartLineView, CartView};
use crate::money::Money;

/// Snapshot of a cart taken at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Lines as they were when the order was placed.
    pub lines: Vec<CartLineView>,
    /// Units purchased.
    pub item_count: u64,
    /// Amount charged.
    pub total: Money,
}

impl Receipt {
    pub(crate) fn from_view(view: CartView) -> Self {
        Self {
            lines: view.lines,
            item_count: view.item_count,
            total: view.total,
        }
    }

    /// Confirmation shown to the shopper.
    pub fn confirmation_message(&self) -> String {
        format!("¡Gracias por tu compra! Total: {}", self.total.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;

    #[test]
    fn test_confirmation_message() {
        let mut cart = Cart::new();
        cart.add("Pastel de Vainilla", "$10.500").unwrap();
        cart.add("Pastel de Vainilla", "$10.500").unwrap();

        let receipt = Receipt::from_view(CartView::project(&cart).unwrap());
        assert_eq!(receipt.item_count, 2);
        assert_eq!(
            receipt.confirmation_message(),
            "¡Gracias por tu compra! Total: $21.000"
        );
    }
}
