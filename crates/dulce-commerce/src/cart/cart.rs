//! Cart and line item types.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// One distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Product display name. Unique within a cart.
    pub name: String,
    /// Display price exactly as shown on the product card.
    pub price_label: String,
    /// Parsed unit price.
    pub unit_price: Money,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with quantity 1 from a product card's name and price.
    pub fn new(name: impl Into<String>, price_label: impl Into<String>) -> Result<Self, CommerceError> {
        let price_label = price_label.into();
        let unit_price = Money::parse_display(&price_label)
            .map_err(|e| CommerceError::invalid_price(price_label.clone(), e))?;
        Ok(Self {
            name: name.into(),
            price_label,
            unit_price,
            quantity: 1,
        })
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

/// Persisted shape of a line item: `{name, price, quantity}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRecord {
    pub name: String,
    pub price: String,
    pub quantity: u32,
}

impl From<&LineItem> for LineItemRecord {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price_label.clone(),
            quantity: item.quantity,
        }
    }
}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = CommerceError;

    fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
        if record.quantity == 0 {
            return Err(CommerceError::CorruptCart(format!(
                "{:?} has quantity 0",
                record.name
            )));
        }
        if record.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                record.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        let mut item = LineItem::new(record.name, record.price)?;
        item.quantity = record.quantity;
        Ok(item)
    }
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// Position of the line that was created or bumped.
    pub index: usize,
    /// Quantity of that line after the add.
    pub quantity: u32,
    /// Whether a new line was appended.
    pub new_line: bool,
}

/// What [`Cart::decrease`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decrease {
    /// Quantity went down and the line stays.
    Decremented { quantity: u32 },
    /// The line was at quantity 1 and has been removed.
    Removed(LineItem),
}

/// An ordered shopping cart.
///
/// Lines keep insertion order and are addressed by position, the way the cart
/// modal lists them. A product name appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted records, enforcing cart invariants.
    pub fn from_records(records: Vec<LineItemRecord>) -> Result<Self, CommerceError> {
        let mut cart = Cart::new();
        for (i, record) in records.into_iter().enumerate() {
            if cart.position(&record.name).is_some() {
                return Err(CommerceError::CorruptCart(format!(
                    "duplicate line for {:?}",
                    record.name
                )));
            }
            let item = LineItem::try_from(record).map_err(|e| match e {
                CommerceError::CorruptCart(_) => e,
                other => CommerceError::CorruptCart(format!("line {}: {}", i, other)),
            })?;
            cart.items.push(item);
        }
        Ok(cart)
    }

    /// Snapshot the cart as persisted records.
    pub fn to_records(&self) -> Vec<LineItemRecord> {
        self.items.iter().map(LineItemRecord::from).collect()
    }

    /// Add one unit of a product.
    ///
    /// An existing line with the same name gets its quantity bumped and keeps
    /// the price it was first added with. Otherwise a new line with quantity 1
    /// is appended. The price is validated either way.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        display_price: impl Into<String>,
    ) -> Result<AddOutcome, CommerceError> {
        let candidate = LineItem::new(name, display_price)?;

        if let Some(index) = self.position(&candidate.name) {
            let quantity = self.increase(index)?;
            return Ok(AddOutcome {
                index,
                quantity,
                new_line: false,
            });
        }

        self.items.push(candidate);
        Ok(AddOutcome {
            index: self.items.len() - 1,
            quantity: 1,
            new_line: true,
        })
    }

    /// Increment the quantity at `index`, returning the new quantity.
    pub fn increase(&mut self, index: usize) -> Result<u32, CommerceError> {
        let item = self.item_mut(index)?;
        let quantity = item.quantity.checked_add(1).ok_or(CommerceError::Overflow)?;
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        item.quantity = quantity;
        Ok(quantity)
    }

    /// Decrement the quantity at `index`; a line at quantity 1 is removed.
    pub fn decrease(&mut self, index: usize) -> Result<Decrease, CommerceError> {
        let item = self.item_mut(index)?;
        if item.quantity > 1 {
            item.quantity -= 1;
            return Ok(Decrease::Decremented {
                quantity: item.quantity,
            });
        }
        self.remove(index).map(Decrease::Removed)
    }

    /// Remove the line at `index`, shifting later lines down.
    pub fn remove(&mut self, index: usize) -> Result<LineItem, CommerceError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over every line.
    pub fn total_amount(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            acc.try_add(&item.line_total()?).ok_or(CommerceError::Overflow)
        })
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the line at `index`.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Position of the line for `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name == name)
    }

    /// Get number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), CommerceError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(CommerceError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut LineItem, CommerceError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CommerceError::IndexOutOfBounds { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bakery_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add("Pan Campesino", "$2.500").unwrap();
        cart.add("Medialunas", "$3.500").unwrap();
        cart.add("Pastel de Chocolate", "$12.000").unwrap();
        cart
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_amount().unwrap(), Money::zero());
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let first = cart.add("Pan Campesino", "$2.500").unwrap();
        let second = cart.add("Pan Campesino", "$2.500").unwrap();

        assert!(first.new_line);
        assert!(!second.new_line);
        assert_eq!(second.index, 0);
        assert_eq!(second.quantity, 2);

        assert_eq!(cart.len(), 1);
        let item = cart.get(0).unwrap();
        assert_eq!(item.name, "Pan Campesino");
        assert_eq!(item.unit_price, Money::new(2500));
        assert_eq!(item.quantity, 2);
        assert_eq!(cart.total_amount().unwrap(), Money::new(5000));
    }

    #[test]
    fn test_add_keeps_first_price() {
        let mut cart = Cart::new();
        cart.add("Medialunas", "$3.500").unwrap();
        cart.add("Medialunas", "$9.999").unwrap();
        assert_eq!(cart.get(0).unwrap().price_label, "$3.500");
        assert_eq!(cart.total_amount().unwrap(), Money::new(7000));
    }

    #[test]
    fn test_add_rejects_malformed_price() {
        let mut cart = Cart::new();
        let err = cart.add("Medialunas", "3500").unwrap_err();
        assert!(matches!(err, CommerceError::InvalidPrice { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order() {
        let cart = bakery_cart();
        let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Pan Campesino", "Medialunas", "Pastel de Chocolate"]);
    }

    #[test]
    fn test_increase() {
        let mut cart = bakery_cart();
        assert_eq!(cart.increase(1).unwrap(), 2);
        assert_eq!(cart.total_item_count(), 4);
    }

    #[test]
    fn test_decrease_then_remove() {
        let mut cart = bakery_cart();
        cart.increase(0).unwrap();

        assert_eq!(
            cart.decrease(0).unwrap(),
            Decrease::Decremented { quantity: 1 }
        );
        match cart.decrease(0).unwrap() {
            Decrease::Removed(item) => assert_eq!(item.name, "Pan Campesino"),
            other => panic!("expected removal, got {:?}", other),
        }
        assert!(cart.position("Pan Campesino").is_none());
        assert_eq!(cart.get(0).unwrap().name, "Medialunas");
    }

    #[test]
    fn test_remove_shifts_lines() {
        let mut cart = bakery_cart();
        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.name, "Medialunas");
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(1).unwrap().name, "Pastel de Chocolate");
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut cart = bakery_cart();
        let before = cart.clone();

        for result in [
            cart.increase(3).map(|_| ()),
            cart.decrease(3).map(|_| ()),
            cart.remove(7).map(|_| ()),
        ] {
            match result {
                Err(CommerceError::IndexOutOfBounds { len, .. }) => assert_eq!(len, 3),
                other => panic!("expected IndexOutOfBounds, got {:?}", other),
            }
        }
        assert_eq!(cart, before);
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        cart.add("Medialunas", "$3.500").unwrap();
        cart.items[0].quantity = MAX_QUANTITY_PER_ITEM;

        let err = cart.increase(0).unwrap_err();
        assert!(matches!(err, CommerceError::QuantityExceedsLimit(10000, 9999)));
        assert_eq!(cart.get(0).unwrap().quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_total_matches_line_sum() {
        let mut cart = bakery_cart();
        cart.increase(0).unwrap();
        cart.increase(2).unwrap();
        cart.decrease(1).unwrap();
        cart.add("Alfajores Artesanales", "$5.200").unwrap();

        let expected: i64 = cart
            .items()
            .iter()
            .map(|i| i.unit_price.amount * i64::from(i.quantity))
            .sum();
        assert_eq!(cart.total_amount().unwrap().amount, expected);
        assert_eq!(expected, 2 * 2500 + 2 * 12000 + 5200);
    }

    #[test]
    fn test_total_matches_line_sum_over_generated_sequences() {
        const MENU: [(&str, &str); 4] = [
            ("Pan Campesino", "$2.500"),
            ("Medialunas", "$3.500"),
            ("Pastel de Chocolate", "$12.000"),
            ("Facturas Surteras", "$4.800"),
        ];

        // xorshift64, seeded per sequence
        fn next(state: &mut u64) -> u64 {
            *state ^= *state << 13;
            *state ^= *state >> 7;
            *state ^= *state << 17;
            *state
        }

        for seed in 1..=200u64 {
            let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15);
            let mut cart = Cart::new();

            for _ in 0..40 {
                let roll = next(&mut state);
                // One past the end so out-of-bounds indices get exercised too.
                let index = (roll >> 8) as usize % (cart.len() + 1);
                let _ = match roll % 4 {
                    0 => {
                        let (name, price) = MENU[(roll >> 16) as usize % MENU.len()];
                        cart.add(name, price).map(|_| ())
                    }
                    1 => cart.increase(index).map(|_| ()),
                    2 => cart.decrease(index).map(|_| ()),
                    _ => cart.remove(index).map(|_| ()),
                };

                let expected: i64 = cart
                    .items()
                    .iter()
                    .map(|i| i.unit_price.amount * i64::from(i.quantity))
                    .sum();
                let count: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
                assert_eq!(cart.total_amount().unwrap().amount, expected, "seed {seed}");
                assert_eq!(cart.total_item_count(), count, "seed {seed}");
                assert!(cart.items().iter().all(|i| i.quantity >= 1), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_records_roundtrip() {
        let mut cart = bakery_cart();
        cart.increase(2).unwrap();

        let rebuilt = Cart::from_records(cart.to_records()).unwrap();
        assert_eq!(rebuilt, cart);
    }

    #[test]
    fn test_from_records_rejects_broken_invariants() {
        let record = |name: &str, quantity| LineItemRecord {
            name: name.to_string(),
            price: "$2.500".to_string(),
            quantity,
        };

        let dupes = vec![record("Pan", 1), record("Pan", 2)];
        assert!(matches!(
            Cart::from_records(dupes),
            Err(CommerceError::CorruptCart(_))
        ));

        let zero = vec![record("Pan", 0)];
        assert!(matches!(
            Cart::from_records(zero),
            Err(CommerceError::CorruptCart(_))
        ));
    }
}
