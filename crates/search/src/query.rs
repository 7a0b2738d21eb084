//! Compile an intent into a catalog search query
//!
//! Terms fan out across title/vendor/type/tag, OR-joined and parenthesized
//! as one clause; tag filters and an always-present active-status clause are
//! AND-joined. Price ordering is never delegated to the catalog search (it
//! does not support it); the ranker applies it locally.

use shopchat_core::{Intent, SortKey, SortOrder};

/// Compiled query string plus sort directive for the catalog collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub query: String,
    pub sort_key: SortKey,
    pub reverse: bool,
}

fn escape(s: &str) -> String {
    s.replace('\'', "\\'")
}

/// Build the search query and sort directive for an intent
pub fn compile_query(intent: &Intent) -> CompiledQuery {
    let (sort_key, reverse) = match intent.sort {
        SortOrder::New => (SortKey::PublishedAt, true),
        // Popular relies on catalog relevance; explicit price ordering is
        // applied locally after retrieval
        SortOrder::Popular | SortOrder::PriceAsc | SortOrder::PriceDesc => {
            (SortKey::Relevance, false)
        }
    };

    let mut clauses: Vec<String> = Vec::new();

    if !intent.query_terms.is_empty() {
        let term_expr = intent
            .query_terms
            .iter()
            .map(|term| {
                let q = escape(term);
                format!("title:*{q}* OR vendor:*{q}* OR product_type:*{q}* OR tag:'{q}'")
            })
            .collect::<Vec<_>>()
            .join(" OR ");
        clauses.push(format!("({term_expr})"));
    }

    let tag_exprs: Vec<String> = intent
        .include_tags
        .iter()
        .map(|t| format!("tag:'{}'", escape(t)))
        .chain(
            intent
                .exclude_tags
                .iter()
                .map(|t| format!("-tag:'{}'", escape(t))),
        )
        .collect();
    if !tag_exprs.is_empty() {
        clauses.push(tag_exprs.join(" AND "));
    }

    clauses.push("status:active".to_string());

    CompiledQuery {
        query: clauses.join(" AND "),
        sort_key,
        reverse,
    }
}
