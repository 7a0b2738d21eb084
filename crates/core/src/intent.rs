//! Parsed intent types
//!
//! An [`Intent`] is constructed fresh per request from raw chat text,
//! mutated exactly once by term expansion, and never persisted.

use serde::{Deserialize, Serialize};

/// Maximum query terms before lexicon expansion
pub const MAX_BASE_TERMS: usize = 8;
/// Maximum query terms after lexicon expansion
pub const MAX_EXPANDED_TERMS: usize = 24;

/// Requested result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Popular,
    New,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Parse a wire value, coercing anything unrecognized to `Popular`
    pub fn parse(s: &str) -> Self {
        match s {
            "NEW" => Self::New,
            "PRICE_ASC" => Self::PriceAsc,
            "PRICE_DESC" => Self::PriceDesc,
            _ => Self::Popular,
        }
    }
}

/// Conversation turn classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Shop,
    Help,
    Chat,
}

/// Structured representation of a parsed chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Intent {
    /// Lowercase query tokens, ordered, deduplicated
    pub query_terms: Vec<String>,
    /// Tags that must be present, `namespace:value` form
    pub include_tags: Vec<String>,
    /// Tags that must be absent
    pub exclude_tags: Vec<String>,
    /// Lower price bound (currency-less)
    pub min_price: Option<f64>,
    /// Upper price bound (currency-less)
    pub max_price: Option<f64>,
    /// Requested ordering
    pub sort: SortOrder,
    /// Advisory classification confidence in [0, 1]
    pub mode_confidence: f32,
}

impl Default for Intent {
    fn default() -> Self {
        Self {
            query_terms: Vec::new(),
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
            min_price: None,
            max_price: None,
            sort: SortOrder::Popular,
            mode_confidence: 0.5,
        }
    }
}

impl Intent {
    /// Whether the intent carries any filter: terms, tags, or a price bound
    pub fn has_filters(&self) -> bool {
        !self.query_terms.is_empty()
            || !self.include_tags.is_empty()
            || !self.exclude_tags.is_empty()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }

    /// Enforce structural invariants after parsing or augmenter merge.
    ///
    /// - terms are lowercased, deduplicated in first-seen order, and capped
    ///   at [`MAX_BASE_TERMS`] (expansion applies its own larger cap later)
    /// - swapped price bounds are corrected so `min_price <= max_price`
    /// - `mode_confidence` is clamped to [0, 1] and NaN falls back to 0.5
    pub fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let mut terms = Vec::new();
        for t in self.query_terms.drain(..) {
            let t = t.trim().to_lowercase();
            if t.is_empty() || !seen.insert(t.clone()) {
                continue;
            }
            terms.push(t);
            if terms.len() >= MAX_BASE_TERMS {
                break;
            }
        }
        self.query_terms = terms;

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                self.min_price = Some(max);
                self.max_price = Some(min);
            }
        }

        if self.mode_confidence.is_nan() {
            self.mode_confidence = 0.5;
        } else {
            self.mode_confidence = self.mode_confidence.clamp(0.0, 1.0);
        }
    }
}
