//! Cart rendering.
//!
//! Renderers never read the store directly; they receive a [`CartView`]
//! projection after every mutation.

use serde::Serialize;

use super::cart::Cart;
use crate::error::CommerceError;
use crate::money::Money;

/// Message shown in place of the line list when the cart has nothing in it.
pub const EMPTY_CART_MESSAGE: &str = "Tu carrito está vacío";

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    /// Zero-based position, the handle passed back to increase/decrease/remove.
    pub index: usize,
    pub name: String,
    pub price_label: String,
    pub quantity: u32,
    pub line_total: Money,
}

/// Render-ready snapshot of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub total: Money,
}

impl CartView {
    /// Project a cart into a view.
    pub fn project(cart: &Cart) -> Result<Self, CommerceError> {
        let lines = cart
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Ok(CartLineView {
                    index,
                    name: item.name.clone(),
                    price_label: item.price_label.clone(),
                    quantity: item.quantity,
                    line_total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(Self {
            lines,
            item_count: cart.total_item_count(),
            total: cart.total_amount()?,
        })
    }

    /// Whether there is nothing to list.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Something that displays the cart.
pub trait CartRenderer {
    /// Redraw from `view`. Called synchronously after every mutation.
    fn render(&mut self, view: &CartView);
}

impl<R: CartRenderer + ?Sized> CartRenderer for &mut R {
    fn render(&mut self, view: &CartView) {
        (**self).render(view)
    }
}

impl<R: CartRenderer + ?Sized> CartRenderer for Box<R> {
    fn render(&mut self, view: &CartView) {
        (**self).render(view)
    }
}

impl<A: CartRenderer, B: CartRenderer> CartRenderer for (A, B) {
    fn render(&mut self, view: &CartView) {
        self.0.render(view);
        self.1.render(view);
    }
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl CartRenderer for NullRenderer {
    fn render(&mut self, _view: &CartView) {}
}

/// Plain-text cart modal: one line per item plus the total.
#[derive(Debug, Default, Clone)]
pub struct TextRenderer {
    lines: Vec<String>,
    total: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered rows, or the empty-cart message.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Rendered total, e.g. `"$5.000"`.
    pub fn total(&self) -> &str {
        &self.total
    }

    /// Everything as one block of text.
    pub fn output(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push_str(&format!("\nTotal: {}", self.total));
        out
    }
}

impl CartRenderer for TextRenderer {
    fn render(&mut self, view: &CartView) {
        self.total = view.total.display();
        if view.is_empty() {
            self.lines = vec![EMPTY_CART_MESSAGE.to_string()];
            return;
        }
        self.lines = view
            .lines
            .iter()
            .map(|line| {
                format!(
                    "{}. {} {} x{} = {}",
                    line.index + 1,
                    line.name,
                    line.price_label,
                    line.quantity,
                    line.line_total.display()
                )
            })
            .collect();
    }
}

/// Visual state of the nav cart badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeState {
    #[default]
    Empty,
    HasItems,
}

impl BadgeState {
    /// CSS class used by the storefront.
    pub fn as_class(&self) -> &'static str {
        match self {
            BadgeState::Empty => "empty",
            BadgeState::HasItems => "has-items",
        }
    }
}

/// Cart icon in the navigation bar: counter, state and tooltip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavBadge {
    pub count: u64,
    pub state: BadgeState,
    pub tooltip: String,
}

impl NavBadge {
    pub fn new() -> Self {
        Self {
            tooltip: "Carrito vacío".to_string(),
            ..Self::default()
        }
    }
}

impl CartRenderer for NavBadge {
    fn render(&mut self, view: &CartView) {
        self.count = view.item_count;
        if view.item_count == 0 {
            self.state = BadgeState::Empty;
            self.tooltip = "Carrito vacío".to_string();
        } else {
            self.state = BadgeState::HasItems;
            self.tooltip = format!("{} items - {}", view.item_count, view.total.display());
        }
    }
}
