//! Query understanding for noisy shop chat
//!
//! Features:
//! - Deterministic rule-based intent parsing (zh/en, typo-tolerant)
//! - Optional external augmenter with strict timeout and silent degradation
//! - SHOP / HELP / CHAT mode classification

pub mod augmenter;
pub mod mode;
pub mod parser;

pub use augmenter::{AugmenterClient, AugmenterConfig, AugmenterPayload};
pub use mode::classify_mode;
pub use parser::{parse_rules, tokenize, IntentParser};

use thiserror::Error;

/// NLP errors
#[derive(Error, Debug)]
pub enum NlpError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<NlpError> for shopchat_core::Error {
    fn from(err: NlpError) -> Self {
        shopchat_core::Error::Configuration(err.to_string())
    }
}
