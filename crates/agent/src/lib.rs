//! Chat pipeline orchestration
//!
//! Ties the pieces together: intent parsing (with optional augmenter),
//! per-shop lexicon expansion, query compilation, catalog search with a
//! single broadened fallback, ranking, deduplication, and reply formatting.

pub mod pipeline;
pub mod reply;

pub use pipeline::{AgentConfig, ChatAgent, ChatResponse};
pub use reply::format_reply;
