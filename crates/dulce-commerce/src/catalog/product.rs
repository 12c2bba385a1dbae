//! Product types.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric product identifier, as carried on the "add to cart" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Bakery product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Breads.
    Pan,
    /// Cakes.
    Pastel,
    /// Pastries.
    Factura,
    /// Sweets.
    Dulce,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 4] = [
        Category::Pan,
        Category::Pastel,
        Category::Factura,
        Category::Dulce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pan => "pan",
            Category::Pastel => "pastel",
            Category::Factura => "factura",
            Category::Dulce => "dulce",
        }
    }

    /// Menu label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Pan => "Panes",
            Category::Pastel => "Pasteles",
            Category::Factura => "Facturas",
            Category::Dulce => "Dulces",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pan" => Ok(Category::Pan),
            "pastel" => Ok(Category::Pastel),
            "factura" => Ok(Category::Factura),
            "dulce" => Ok(Category::Dulce),
            _ => Err(CommerceError::InvalidOption {
                kind: "category",
                value: s.to_string(),
            }),
        }
    }
}

/// A product in the catalog.
///
/// `price` is the display string shown on the card and passed to the cart;
/// `unit_price` is the same value parsed once at load time, so a product with
/// a malformed price never makes it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub unit_price: Money,
    pub category: Category,
    /// Image path on the storefront.
    pub image: String,
    pub featured: bool,
    /// Card badge such as "⭐ Destacado".
    pub badge: Option<String>,
}

impl Product {
    /// Create a product, validating its display price.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: impl Into<String>,
        category: Category,
    ) -> Result<Self, CommerceError> {
        let price = price.into();
        let unit_price = Money::parse_display(&price)
            .map_err(|e| CommerceError::invalid_price(price.clone(), e))?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            unit_price,
            category,
            image: String::new(),
            featured: false,
            badge: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Mark as featured with an optional badge.
    pub fn featured(mut self, badge: Option<&str>) -> Self {
        self.featured = true;
        self.badge = badge.map(str::to_string);
        self
    }
}

/// Serialized product layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: String,
    price: String,
    category: Category,
    #[serde(default)]
    image: String,
    #[serde(default)]
    featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    badge: Option<String>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CommerceError;

    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        let mut product = Product::new(r.id, r.name, r.price, r.category)?
            .with_description(r.description)
            .with_image(r.image);
        product.featured = r.featured;
        product.badge = r.badge;
        Ok(product)
    }
}

impl From<Product> for ProductRecord {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            category: p.category,
            image: p.image,
            featured: p.featured,
            badge: p.badge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("Pastel".parse::<Category>().unwrap(), Category::Pastel);
        assert_eq!(" dulce ".parse::<Category>().unwrap(), Category::Dulce);
        assert!(matches!(
            "pizza".parse::<Category>(),
            Err(CommerceError::InvalidOption { kind: "category", .. })
        ));
    }

    #[test]
    fn test_product_parses_price() {
        let p = Product::new(1, "Pan Campesino", "$2.500", Category::Pan).unwrap();
        assert_eq!(p.unit_price, Money::new(2500));
        assert!(!p.featured);

        let err = Product::new(2, "Broken", "2500", Category::Pan).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidPrice { .. }));
    }

    #[test]
    fn test_product_json() {
        let json = r#"{
            "id": 3,
            "name": "Facturas Surteras",
            "price": "$4.800",
            "category": "factura",
            "featured": true,
            "badge": "🆕 Nuevo"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, ProductId(3));
        assert_eq!(p.unit_price.amount, 4800);
        assert_eq!(p.badge.as_deref(), Some("🆕 Nuevo"));

        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["price"], "$4.800");
        assert!(value.get("unit_price").is_none());

        let bad = r#"{"id": 4, "name": "X", "price": "$1,00", "category": "pan"}"#;
        assert!(serde_json::from_str::<Product>(bad).is_err());
    }
}
