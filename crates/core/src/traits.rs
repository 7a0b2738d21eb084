//! Collaborator traits
//!
//! The external catalog search is consumed through a narrow interface so the
//! parsing and ranking pipeline stays pure and testable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::product::Product;

/// Sort key understood by the external catalog search.
///
/// The collaborator cannot sort by price natively; explicit price ordering
/// is applied locally by the ranker after retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    #[default]
    Relevance,
    PublishedAt,
}

/// External catalog search collaborator
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Run a compiled query and return matching products
    async fn search(
        &self,
        query: &str,
        sort_key: SortKey,
        reverse: bool,
        first: usize,
    ) -> Result<Vec<Product>>;

    /// Return a bounded sample of the most recently published products,
    /// used to learn the per-shop lexicon
    async fn recent_sample(&self, first: usize) -> Result<Vec<Product>>;
}
