//! Error types shared across the workspace

use thiserror::Error;

/// Top-level error for the chat pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog search or catalog sampling failed. This is the one
    /// unrecoverable path inside the core pipeline.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Lexicon construction failed for a reason other than the catalog
    /// fetch itself.
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, Error>;
