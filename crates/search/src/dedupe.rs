//! Title-based deduplication

use std::collections::HashSet;

use shopchat_core::Product;

/// Collapse candidates with identical normalized (trimmed, lowercased)
/// titles. The first occurrence wins and order is otherwise preserved;
/// items with a blank normalized title are dropped entirely.
pub fn dedupe_by_title(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(products.len());
    for product in products {
        let key = product.title.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        if seen.insert(key) {
            out.push(product);
        }
    }
    out
}
