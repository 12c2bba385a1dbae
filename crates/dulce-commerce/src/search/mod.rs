//! Search module.
//!
//! Contains catalog filters, sorting, pagination, the products-page browser,
//! and live text search.

mod browser;
mod filter;
mod query;
mod results;
mod text;

pub use browser::{CatalogBrowser, Selection};
pub use filter::{parse_menu, Filter, PriceBand, ALL};
pub use query::{CatalogQuery, SortOption};
pub use results::{
    Pagination, SearchResults, DEFAULT_PER_PAGE, NO_PRODUCTS_HINT, NO_PRODUCTS_MESSAGE,
};
pub use text::{
    highlight, match_spans, results_summary, SearchHit, SearchOutcome, TextSearch,
    NO_RESULTS_HINT, NO_RESULTS_TITLE,
};
