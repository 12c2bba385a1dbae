//! Stateful catalog browsing: the products page.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Category, Product};
use crate::search::{CatalogQuery, Filter, PriceBand, SearchResults, SortOption};

/// Current menu selections on the products page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// `None` is "all".
    pub category: Option<Category>,
    /// `None` is "all".
    pub price: Option<PriceBand>,
    pub sort: SortOption,
}

impl Selection {
    fn query(&self, page: usize, per_page: usize) -> CatalogQuery {
        CatalogQuery::new()
            .with_optional_filter(self.category.map(Filter::Category))
            .with_optional_filter(self.price.map(Filter::PriceBand))
            .with_sort(self.sort)
            .with_pagination(page, per_page)
    }
}

/// Holds the filter menus and current page over a catalog.
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    catalog: Catalog,
    selection: Selection,
    page: usize,
    per_page: usize,
}

impl CatalogBrowser {
    /// Browse `catalog`, `per_page` products at a time.
    pub fn new(catalog: Catalog, per_page: usize) -> Self {
        Self {
            catalog,
            selection: Selection::default(),
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Change the menus. Always returns to page 1.
    pub fn apply(&mut self, selection: Selection) {
        debug!(?selection, "filters applied");
        self.selection = selection;
        self.page = 1;
    }

    /// The page currently shown.
    pub fn current(&self) -> SearchResults<&Product> {
        self.selection.query(self.page, self.per_page).run(&self.catalog)
    }

    /// Move forward a page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.current().pagination.has_next {
            return false;
        }
        self.page += 1;
        true
    }

    /// Move back a page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Jump to `page`, clamped to the available pages.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
        self.page = self.current().pagination.page;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser() -> CatalogBrowser {
        CatalogBrowser::new(Catalog::bakery().unwrap(), 6)
    }

    #[test]
    fn test_paging() {
        let mut b = browser();
        assert!(!b.prev_page());
        assert!(b.next_page());
        assert_eq!(b.current().pagination.label(), "Página 2 de 2");
        assert!(!b.next_page());
        assert!(b.prev_page());
        assert_eq!(b.page(), 1);
    }

    #[test]
    fn test_apply_resets_page() {
        let mut b = browser();
        b.next_page();
        b.apply(Selection {
            category: Some(Category::Pastel),
            sort: SortOption::PriceHigh,
            ..Selection::default()
        });
        assert_eq!(b.page(), 1);

        let results = b.current();
        assert_eq!(results.len(), 3);
        assert_eq!(results.items[0].name, "Pastel de Chocolate");
        assert_eq!(results.items[2].name, "Pastel de Vainilla");
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut b = browser();
        b.go_to_page(9);
        assert_eq!(b.page(), 2);
        b.go_to_page(0);
        assert_eq!(b.page(), 1);
    }
}
