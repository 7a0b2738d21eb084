//! Per-shop auto-learned lexicon
//!
//! A lexicon is a vocabulary snapshot derived from a bounded sample of a
//! shop's most recent products. Snapshots live in a process-wide cache keyed
//! by shop; entries are replaced, never mutated in place, and staleness
//! (a fixed TTL) is the only eviction signal.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use shopchat_core::{CatalogSearch, Product, Result};
use shopchat_nlp::tokenize;

/// Lexicon cache configuration
#[derive(Debug, Clone)]
pub struct LexiconConfig {
    /// How long a snapshot stays fresh
    pub ttl: Duration,
    /// How many recent products to sample per rebuild
    pub sample_size: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            sample_size: 200,
        }
    }
}

/// Per-shop vocabulary snapshot.
///
/// `BTreeSet` keeps iteration order deterministic so term expansion (and
/// therefore ranking) is reproducible run-to-run.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub vendors: BTreeSet<String>,
    pub types: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub tokens: BTreeSet<String>,
    pub built_at: Instant,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            vendors: BTreeSet::new(),
            types: BTreeSet::new(),
            tags: BTreeSet::new(),
            tokens: BTreeSet::new(),
            built_at: Instant::now(),
        }
    }
}

impl Lexicon {
    /// Derive the four lowercase vocabularies from a catalog sample
    pub fn from_products(products: &[Product]) -> Self {
        let mut lexicon = Self::default();

        for product in products {
            if !product.vendor.is_empty() {
                lexicon.vendors.insert(product.vendor.to_lowercase());
            }
            if !product.product_type.is_empty() {
                lexicon.types.insert(product.product_type.to_lowercase());
            }
            for tag in &product.tags {
                lexicon.tags.insert(tag.to_lowercase());
            }

            lexicon.tokens.extend(tokenize(&product.title));
            for variant in &product.variants {
                lexicon.tokens.extend(tokenize(&variant.title));
                lexicon.tokens.extend(tokenize(&variant.sku));
            }
        }

        lexicon
    }

    /// Whether this snapshot is still within its TTL
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.built_at.elapsed() < ttl
    }

    /// Union pool of all four vocabularies, in deterministic order
    pub fn pool(&self) -> BTreeSet<&str> {
        self.vendors
            .iter()
            .chain(self.types.iter())
            .chain(self.tags.iter())
            .chain(self.tokens.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Process-wide lexicon cache keyed by shop identifier.
///
/// Concurrent requests for the same cold shop may both rebuild; the later
/// write simply replaces the earlier one, which is harmless (the snapshots
/// are equivalent). Growth is bounded by the number of active shops.
pub struct LexiconCache {
    config: LexiconConfig,
    entries: RwLock<HashMap<String, Arc<Lexicon>>>,
}

impl Default for LexiconCache {
    fn default() -> Self {
        Self::new(LexiconConfig::default())
    }
}

impl LexiconCache {
    pub fn new(config: LexiconConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the shop's lexicon, rebuilding from the catalog when missing
    /// or stale. A catalog fetch failure propagates to the caller; the cache
    /// keeps its previous entry untouched in that case.
    pub async fn get_or_build(
        &self,
        shop: &str,
        catalog: &dyn CatalogSearch,
    ) -> Result<Arc<Lexicon>> {
        if let Some(lexicon) = self.entries.read().get(shop) {
            if lexicon.is_fresh(self.config.ttl) {
                tracing::debug!(shop, "lexicon cache hit");
                return Ok(Arc::clone(lexicon));
            }
        }

        let sample = catalog.recent_sample(self.config.sample_size).await?;
        let lexicon = Arc::new(Lexicon::from_products(&sample));
        tracing::debug!(
            shop,
            vendors = lexicon.vendors.len(),
            types = lexicon.types.len(),
            tags = lexicon.tags.len(),
            tokens = lexicon.tokens.len(),
            "lexicon rebuilt"
        );
        self.entries
            .write()
            .insert(shop.to_string(), Arc::clone(&lexicon));
        Ok(lexicon)
    }

    /// Replace the snapshot for a shop (warm-up and tests)
    pub fn insert(&self, shop: &str, lexicon: Lexicon) {
        self.entries
            .write()
            .insert(shop.to_string(), Arc::new(lexicon));
    }
}
