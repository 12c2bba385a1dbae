//! Live text search over the catalog.
//!
//! Matching is literal and case-insensitive: the term is never interpreted as
//! a pattern, so `(6` or `.*` search for those characters.

use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Product};
use crate::search::Filter;

/// Headline shown when a non-empty term matches nothing.
pub const NO_RESULTS_TITLE: &str = "No encontramos productos";

/// Suggestion shown under [`NO_RESULTS_TITLE`].
pub const NO_RESULTS_HINT: &str = "Intenta con otros términos como \"pan\", \"pastel\" o \"facturas\"";

/// A product that matched, with the spans to highlight.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub product: &'a Product,
    /// Byte ranges in `product.name`.
    pub name_spans: Vec<Range<usize>>,
    /// Byte ranges in `product.description`.
    pub description_spans: Vec<Range<usize>>,
}

/// Result of one search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome<'a> {
    /// Normalized term (trimmed, lower-cased).
    pub term: String,
    pub hits: Vec<SearchHit<'a>>,
}

impl SearchOutcome<'_> {
    /// Whether the search box is effectively empty.
    pub fn is_blank(&self) -> bool {
        self.term.is_empty()
    }

    /// Result counter, or `None` for an empty term.
    pub fn summary(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(results_summary(self.hits.len()))
    }

    /// Whether the no-results hint should be shown.
    pub fn show_no_results(&self) -> bool {
        !self.is_blank() && self.hits.is_empty()
    }
}

/// Counter text with plural agreement, e.g. "1 producto encontrado".
pub fn results_summary(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} producto{plural} encontrado{plural}")
}

/// Searches a catalog by name and description.
#[derive(Debug, Clone, Copy)]
pub struct TextSearch<'a> {
    catalog: &'a Catalog,
}

impl<'a> TextSearch<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Run a search. An empty term returns every product without spans.
    pub fn search(&self, term: &str) -> SearchOutcome<'a> {
        let term = term.trim().to_lowercase();
        let filter = Filter::Text(term.clone());

        let hits: Vec<SearchHit<'a>> = self
            .catalog
            .products()
            .iter()
            .filter(|p| filter.matches(p))
            .map(|product| SearchHit {
                product,
                name_spans: match_spans(&product.name, &term),
                description_spans: match_spans(&product.description, &term),
            })
            .collect();

        debug!(term = %term, hits = hits.len(), "text search");
        SearchOutcome { term, hits }
    }
}

/// Byte ranges of every non-overlapping, case-insensitive occurrence of
/// `term` in `text`.
pub fn match_spans(text: &str, term: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut resume = 0;
    for (start, _) in text.char_indices() {
        if start < resume {
            continue;
        }
        if let Some(end) = match_at(text, start, &needle) {
            spans.push(start..end);
            resume = end;
        }
    }
    spans
}

fn match_at(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in text[start..].char_indices() {
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(start + offset + ch.len_utf8());
        }
    }
    None
}

/// Wrap each span of `text` in `open`/`close`.
pub fn highlight(text: &str, spans: &[Range<usize>], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * (open.len() + close.len()));
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(open);
        out.push_str(&text[span.clone()]);
        out.push_str(close);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
