//! Catalog search support for the chat pipeline
//!
//! Features:
//! - Bounded single-edit fuzzy matching shared by expansion and ranking
//! - Per-shop auto-learned lexicon with a TTL cache
//! - Query term expansion against the lexicon
//! - Compilation of intents into catalog search queries
//! - Multi-signal product ranking with explicit price-sort overrides
//! - Title-based deduplication

pub mod dedupe;
pub mod expansion;
pub mod fuzzy;
pub mod lexicon;
pub mod query;
pub mod ranker;

pub use dedupe::dedupe_by_title;
pub use expansion::expand_terms;
pub use fuzzy::near;
pub use lexicon::{Lexicon, LexiconCache, LexiconConfig};
pub use query::{compile_query, CompiledQuery};
pub use ranker::{rank_products, score_product};
