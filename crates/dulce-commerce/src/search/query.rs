//! Catalog query builder.

use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;
use crate::search::{Filter, Pagination, SearchResults, DEFAULT_PER_PAGE};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Sort options offered by the sort menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Default,
    /// Sort by name A-Z.
    Name,
    /// Sort by price, low to high.
    PriceLow,
    /// Sort by price, high to low.
    PriceHigh,
    /// Featured products first, otherwise catalog order.
    Featured,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::Name => "name",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Featured => "featured",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Default => "Predeterminado",
            SortOption::Name => "Nombre A-Z",
            SortOption::PriceLow => "Precio: menor a mayor",
            SortOption::PriceHigh => "Precio: mayor a menor",
            SortOption::Featured => "Destacados",
        }
    }

    /// Sort in place. Ties keep their existing order.
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            SortOption::Default => {}
            SortOption::Name => products.sort_by_cached_key(|p| p.name.to_lowercase()),
            SortOption::PriceLow => products.sort_by_key(|p| p.unit_price),
            SortOption::PriceHigh => products.sort_by_key(|p| Reverse(p.unit_price)),
            SortOption::Featured => products.sort_by_key(|p| !p.featured),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "" => Ok(SortOption::Default),
            "name" => Ok(SortOption::Name),
            "price-low" => Ok(SortOption::PriceLow),
            "price-high" => Ok(SortOption::PriceHigh),
            "featured" => Ok(SortOption::Featured),
            _ => Err(CommerceError::InvalidOption {
                kind: "sort",
                value: s.to_string(),
            }),
        }
    }
}

/// A catalog query: filters, sort and page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Filters to apply (all must match).
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogQuery {
    /// Create a query for the first page of everything.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: SortOption::Default,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a filter if present.
    pub fn with_optional_filter(mut self, filter: Option<Filter>) -> Self {
        self.filters.extend(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: usize, per_page: usize) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.max(1);
        self
    }

    /// Set the page, keeping the page size.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Every product that passes the filters, sorted.
    pub fn matching<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| self.filters.iter().all(|f| f.matches(p)))
            .collect();
        self.sort.apply(&mut matched);
        matched
    }

    /// Run against `catalog` and cut out the requested page.
    pub fn run<'a>(&self, catalog: &'a Catalog) -> SearchResults<&'a Product> {
        let matched = self.matching(catalog);
        let pagination = Pagination::new(self.page, self.per_page, matched.len());
        let items: Vec<&Product> = matched
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .collect();

        debug!(
            filters = self.filters.len(),
            sort = %self.sort,
            page = pagination.page,
            total = pagination.total,
            "catalog query"
        );
        SearchResults::new(items, pagination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::search::PriceBand;

    fn names(results: &[&Product]) -> Vec<String> {
        results.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_default_query_pages_catalog() {
        let catalog = Catalog::bakery().unwrap();
        let first = CatalogQuery::new().run(&catalog);
        assert_eq!(first.len(), 6);
        assert_eq!(first.pagination.total_pages, 2);
        assert!(first.pagination.has_next);

        let second = CatalogQuery::new().with_page(2).run(&catalog);
        assert_eq!(second.len(), 3);
        assert_eq!(second.items[0].name, "Alfajores Artesanales");
        assert!(!second.pagination.has_next);
    }

    #[test]
    fn test_category_and_price_filters() {
        let catalog = Catalog::bakery().unwrap();
        let results = CatalogQuery::new()
            .with_filter(Filter::category(Category::Pan))
            .with_filter(Filter::price_band(PriceBand::UpTo5000))
            .run(&catalog);
        assert_eq!(
            names(&results.items),
            vec!["Pan Campesino", "Pan de Centeno", "Pan Brioche"]
        );

        let pricey = CatalogQuery::new()
            .with_filter(Filter::price_band(PriceBand::Over10000))
            .matching(&catalog);
        assert_eq!(
            names(&pricey),
            vec!["Pastel de Chocolate", "Pastel de Vainilla", "Torta de Zanahoria"]
        );

        let mid = CatalogQuery::new()
            .with_filter(Filter::price_band(PriceBand::From5000To10000))
            .matching(&catalog);
        assert_eq!(names(&mid), vec!["Alfajores Artesanales"]);
    }

    #[test]
    fn test_sorts() {
        let catalog = Catalog::bakery().unwrap();
        let by = |sort: SortOption| names(&CatalogQuery::new().with_sort(sort).matching(&catalog));

        assert_eq!(by(SortOption::PriceLow)[0], "Pan Campesino");
        assert_eq!(by(SortOption::PriceHigh)[0], "Pastel de Chocolate");
        assert_eq!(by(SortOption::Name)[0], "Alfajores Artesanales");
        assert_eq!(by(SortOption::Name)[8], "Torta de Zanahoria");

        let featured = by(SortOption::Featured);
        assert_eq!(
            &featured[..4],
            &["Pan Campesino", "Pastel de Chocolate", "Facturas Surteras", "Pan de Centeno"]
        );
    }

    #[test]
    fn test_no_matches() {
        let catalog = Catalog::bakery().unwrap();
        let results = CatalogQuery::new()
            .with_filter(Filter::category(Category::Dulce))
            .with_filter(Filter::price_band(PriceBand::Over10000))
            .run(&catalog);
        assert!(results.is_empty());
        assert_eq!(results.pagination.label(), "Página 1 de 1");
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("price-low".parse::<SortOption>().unwrap(), SortOption::PriceLow);
        assert_eq!("".parse::<SortOption>().unwrap(), SortOption::Default);
        assert!("random".parse::<SortOption>().is_err());
    }
}
