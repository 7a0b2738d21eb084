//! The chat request pipeline
//!
//! Each request is handled independently; the only cross-request state is
//! the lexicon cache. The augmenter and the catalog search are the only
//! suspension points and both are timeout-bounded by their collaborators.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use shopchat_core::{CatalogSearch, Mode, Product, Result, SortKey};
use shopchat_nlp::{classify_mode, IntentParser};
use shopchat_search::{
    compile_query, dedupe_by_title, expand_terms, rank_products, LexiconCache,
};

use crate::reply::format_reply;

/// Pipeline tuning knobs
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum raw text length; longer input is truncated
    pub max_text_len: usize,
    /// Page size for catalog search calls
    pub page_size: usize,
    /// How many ranked candidates survive into deduplication
    pub rank_pool: usize,
    /// Maximum picks rendered in the reply
    pub max_picks: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_text_len: 500,
            page_size: 30,
            rank_pool: 12,
            max_picks: 5,
        }
    }
}

/// Final pipeline output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub mode: Mode,
    pub picks: Vec<Product>,
    /// True when the broadened fallback query supplied the result set
    pub fallback_used: bool,
    /// Compiled catalog query (diagnostics)
    pub query: String,
    /// Query terms after lexicon expansion (diagnostics)
    pub expanded_terms: Vec<String>,
}

/// End-to-end chat handler
pub struct ChatAgent {
    catalog: Arc<dyn CatalogSearch>,
    parser: IntentParser,
    lexicons: LexiconCache,
    config: AgentConfig,
}

impl ChatAgent {
    /// Agent with rules-only parsing and default tuning
    pub fn new(catalog: Arc<dyn CatalogSearch>) -> Self {
        Self::with_parts(
            catalog,
            IntentParser::new(),
            LexiconCache::default(),
            AgentConfig::default(),
        )
    }

    pub fn with_parts(
        catalog: Arc<dyn CatalogSearch>,
        parser: IntentParser,
        lexicons: LexiconCache,
        config: AgentConfig,
    ) -> Self {
        Self {
            catalog,
            parser,
            lexicons,
            config,
        }
    }

    /// Handle one chat turn for a shop.
    ///
    /// Catalog search failure is the one unrecoverable path and propagates;
    /// augmenter and lexicon failures degrade silently (base intent,
    /// expansion skipped).
    pub async fn handle(&self, shop: &str, text: &str) -> Result<ChatResponse> {
        let text = truncate_chars(text, self.config.max_text_len);
        if text.is_empty() {
            // Short-circuit before any parsing
            return Ok(ChatResponse {
                reply: "Echo: (empty)".to_string(),
                mode: Mode::Chat,
                picks: Vec::new(),
                fallback_used: false,
                query: String::new(),
                expanded_terms: Vec::new(),
            });
        }

        let mut intent = self.parser.parse(&text).await;

        // Lexicon failure degrades term expansion to a no-op rather than
        // failing the whole request
        match self.lexicons.get_or_build(shop, self.catalog.as_ref()).await {
            Ok(lexicon) => {
                intent.query_terms = expand_terms(&intent.query_terms, &lexicon);
            }
            Err(e) => {
                tracing::warn!(shop, error = %e, "lexicon unavailable, skipping term expansion");
            }
        }

        let compiled = compile_query(&intent);
        let mut products = self
            .catalog
            .search(
                &compiled.query,
                compiled.sort_key,
                compiled.reverse,
                self.config.page_size,
            )
            .await?;

        // Exactly one broadened retry when the compiled query finds nothing
        let mut fallback_used = false;
        if products.is_empty() {
            tracing::debug!(shop, query = %compiled.query, "no results, broadening to open discovery");
            products = self
                .catalog
                .search("status:active", SortKey::PublishedAt, true, self.config.page_size)
                .await?;
            fallback_used = true;
        }

        let mut ranked = rank_products(products, &intent, Utc::now());
        ranked.truncate(self.config.rank_pool);
        let mut picks = dedupe_by_title(ranked);
        picks.truncate(self.config.max_picks);

        let mode = classify_mode(&text, &intent);
        let reply = format_reply(mode, &picks);

        Ok(ChatResponse {
            reply,
            mode,
            picks,
            fallback_used,
            query: compiled.query,
            expanded_terms: intent.query_terms,
        })
    }
}

/// Truncate on a character boundary
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
