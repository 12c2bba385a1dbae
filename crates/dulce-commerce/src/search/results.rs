//! Search results and pagination.

use serde::{Deserialize, Serialize};

/// Products shown per catalog page.
pub const DEFAULT_PER_PAGE: usize = 6;

/// Headline shown when a page has no products.
pub const NO_PRODUCTS_MESSAGE: &str = "No se encontraron productos";

/// Hint shown under [`NO_PRODUCTS_MESSAGE`].
pub const NO_PRODUCTS_HINT: &str = "Intenta con otros filtros o términos de búsqueda";

/// Where a page sits among the matching products.
///
/// There is always at least one page, so an empty result reads
/// "Página 1 de 1".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based, always within `1..=total_pages`.
    pub page: usize,
    pub per_page: usize,
    /// Matching products across all pages.
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Lay out `total` products `per_page` at a time and settle on `page`,
    /// clamped into range.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Position of this page's first product in the full list.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Page indicator, e.g. "Página 1 de 2".
    pub fn label(&self) -> String {
        format!("Página {} de {}", self.page, self.total_pages)
    }
}

/// The products on one page plus where that page sits.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> SearchResults<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
