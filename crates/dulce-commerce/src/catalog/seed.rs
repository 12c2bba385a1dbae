//! The product catalog and its bundled seed data.

use std::collections::HashSet;

use tracing::debug;

use super::product::{Category, Product, ProductId};
use crate::error::CommerceError;

const BAKERY_PRODUCTS: &str = include_str!("../../data/products.json");

/// An ordered, read-only list of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        for p in &products {
            if !seen.insert(p.id) {
                return Err(CommerceError::SerializationError(format!(
                    "duplicate product id {}",
                    p.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// The storefront's nine products.
    pub fn bakery() -> Result<Self, CommerceError> {
        Self::from_json(BAKERY_PRODUCTS)
    }

    /// Load a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        debug!(count = products.len(), "catalog loaded");
        Self::new(products)
    }

    /// Look up by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up by name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let needle = name.trim().to_lowercase();
        self.products.iter().find(|p| p.name.to_lowercase() == needle)
    }

    /// Resolve a product reference: a numeric id or a product name.
    pub fn resolve(&self, reference: &str) -> Result<&Product, CommerceError> {
        let found = match reference.trim().parse::<u32>() {
            Ok(id) => self.get(ProductId(id)),
            Err(_) => self.find_by_name(reference),
        };
        found.ok_or_else(|| CommerceError::ProductNotFound(reference.to_string()))
    }

    /// Products in one category.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Featured products, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
