//! Catalog filter types.

use crate::catalog::{Category, Product};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value the filter menus use for "no restriction".
pub const ALL: &str = "all";

/// Price bands offered by the price menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBand {
    /// Up to $5.000 inclusive.
    #[serde(rename = "0-5000")]
    UpTo5000,
    /// Over $5.000 up to $10.000 inclusive.
    #[serde(rename = "5000-10000")]
    From5000To10000,
    /// Over $10.000.
    #[serde(rename = "10000+")]
    Over10000,
}

impl PriceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBand::UpTo5000 => "0-5000",
            PriceBand::From5000To10000 => "5000-10000",
            PriceBand::Over10000 => "10000+",
        }
    }

    /// Whether `price` falls in the band.
    pub fn contains(&self, price: Money) -> bool {
        match self {
            PriceBand::UpTo5000 => price.amount <= 5000,
            PriceBand::From5000To10000 => price.amount > 5000 && price.amount <= 10000,
            PriceBand::Over10000 => price.amount > 10000,
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceBand {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0-5000" => Ok(PriceBand::UpTo5000),
            "5000-10000" => Ok(PriceBand::From5000To10000),
            "10000+" => Ok(PriceBand::Over10000),
            _ => Err(CommerceError::InvalidOption {
                kind: "price range",
                value: s.to_string(),
            }),
        }
    }
}

/// Parse a filter menu value, where `"all"` means no restriction.
pub fn parse_menu<T>(value: &str) -> Result<Option<T>, CommerceError>
where
    T: FromStr<Err = CommerceError>,
{
    if value.trim().eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }
    value.parse().map(Some)
}

/// A catalog filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Filter {
    /// Filter by category.
    Category(Category),
    /// Filter by price band.
    PriceBand(PriceBand),
    /// Name or description contains the text, ignoring case.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn category(category: Category) -> Self {
        Filter::Category(category)
    }

    /// Create a price band filter.
    pub fn price_band(band: PriceBand) -> Self {
        Filter::PriceBand(band)
    }

    /// Create a text filter. The term is trimmed and lower-cased.
    pub fn text(term: impl AsRef<str>) -> Self {
        Filter::Text(term.as_ref().trim().to_lowercase())
    }


    /// Check whether `product` passes.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(c) => product.category == *c,
            Filter::PriceBand(band) => band.contains(product.unit_price),
            Filter::Text(term) => {
                term.is_empty()
                    || product.name.to_lowercase().contains(term.as_str())
                    || product.description.to_lowercase().contains(term.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: &str) -> Product {
        Product::new(1, "Pan Campesino", price, Category::Pan)
            .unwrap()
            .with_description("Pan artesanal de masa madre")
    }

    #[test]
    fn test_price_band_edges() {
        let low: PriceBand = "0-5000".parse().unwrap();
        let mid: PriceBand = "5000-10000".parse().unwrap();
        let high: PriceBand = "10000+".parse().unwrap();

        assert!(low.contains(Money::new(5000)));
        assert!(!mid.contains(Money::new(5000)));
        assert!(mid.contains(Money::new(5001)));
        assert!(mid.contains(Money::new(10000)));
        assert!(!high.contains(Money::new(10000)));
        assert!(high.contains(Money::new(10001)));

        assert!("cheap".parse::<PriceBand>().is_err());
    }

    #[test]
    fn test_all_means_no_filter() {
        assert_eq!(parse_menu::<Category>("all").unwrap(), None);
        assert_eq!(parse_menu::<PriceBand>("ALL").unwrap(), None);
        assert_eq!(parse_menu::<Category>("pan").unwrap(), Some(Category::Pan));
        assert_eq!(
            parse_menu::<PriceBand>("10000+").unwrap(),
            Some(PriceBand::Over10000)
        );
        assert!(parse_menu::<PriceBand>("1-2").is_err());
    }

    #[test]
    fn test_text_filter() {
        let p = product("$2.500");
        assert!(Filter::text("CAMPESINO").matches(&p));
        assert!(Filter::text("  masa madre ").matches(&p));
        assert!(Filter::text("").matches(&p));
        assert!(!Filter::text("chocolate").matches(&p));
    }

    #[test]
    fn test_category_and_band_filters() {
        let p = product("$2.500");
        assert!(Filter::category(Category::Pan).matches(&p));
        assert!(!Filter::category(Category::Dulce).matches(&p));
        assert!(Filter::price_band(PriceBand::UpTo5000).matches(&p));
        assert!(!Filter::price_band(PriceBand::Over10000).matches(&p));
    }
}
