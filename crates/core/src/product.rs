//! Catalog product types
//!
//! Products are owned by the external catalog collaborator; the core never
//! mutates them. During ranking they are only read to derive an ephemeral
//! scoring tuple.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchasable variant of a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Variant {
    pub title: String,
    pub sku: String,
    /// Currency-less price; `None` when the collaborator could not resolve one
    pub price: Option<f64>,
    pub available_for_sale: bool,
}

/// A catalog product as returned by the search collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub vendor: String,
    pub product_type: String,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub variants: Vec<Variant>,
}

impl Product {
    /// Minimum finite variant price, if any variant carries one
    pub fn min_variant_price(&self) -> Option<f64> {
        self.variants
            .iter()
            .filter_map(|v| v.price)
            .filter(|p| p.is_finite())
            .fold(None, |acc, p| match acc {
                Some(min) if min <= p => Some(min),
                _ => Some(p),
            })
    }

    /// Whether any variant can currently be purchased
    pub fn any_available(&self) -> bool {
        self.variants.iter().any(|v| v.available_for_sale)
    }

    /// Age in days relative to `now`, from the most reliable timestamp:
    /// published_at, then created_at, then `now` itself. Never below 1.
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        let reference = self.published_at.or(self.created_at).unwrap_or(now);
        let age = (now - reference).num_milliseconds() as f64 / 86_400_000.0;
        age.max(1.0)
    }
}
