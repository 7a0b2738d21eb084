//! Optional external intent augmenter
//!
//! A single `POST {"text": ...}` with bearer auth, bounded by a strict
//! timeout. The response schema accepts both camelCase and snake_case field
//! names (one canonical schema, two accepted encodings). Any failure mode
//! (timeout, non-2xx, network, malformed payload) silently degrades to the
//! base intent.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use shopchat_core::{Intent, SortOrder};

use crate::NlpError;

const DEFAULT_TIMEOUT_MS: u64 = 1800;

/// Augmenter endpoint configuration
#[derive(Debug, Clone)]
pub struct AugmenterConfig {
    /// Endpoint URL
    pub endpoint: String,
    /// Optional bearer token
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for AugmenterConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl AugmenterConfig {
    /// Read configuration from `EXT_NLP_URL`, `EXT_NLP_KEY`, and
    /// `EXT_NLP_TIMEOUT_MS`. Returns `None` when no endpoint is configured,
    /// in which case parsing runs rules-only.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("EXT_NLP_URL").ok().filter(|s| !s.is_empty())?;
        let api_key = std::env::var("EXT_NLP_KEY").ok().filter(|s| !s.is_empty());
        let timeout = std::env::var("EXT_NLP_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS));

        Some(Self {
            endpoint,
            api_key,
            timeout,
        })
    }
}

/// Augmenter response fields. All optional; absent and `null` are
/// equivalent and fall back to the base intent field-by-field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AugmenterPayload {
    #[serde(alias = "query_terms")]
    pub query_terms: Option<Vec<String>>,
    #[serde(alias = "include_tags")]
    pub include_tags: Option<Vec<String>>,
    #[serde(alias = "exclude_tags")]
    pub exclude_tags: Option<Vec<String>>,
    #[serde(alias = "min_price")]
    pub min_price: Option<f64>,
    #[serde(alias = "max_price")]
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    #[serde(alias = "mode_confidence")]
    pub mode_confidence: Option<f32>,
}

impl AugmenterPayload {
    /// Merge over a base intent: an external value wins only when present.
    /// Unrecognized sort strings coerce to `Popular`. The merged intent is
    /// re-normalized so augmenter output can never violate the intent
    /// invariants.
    pub fn merge_into(self, mut base: Intent) -> Intent {
        if let Some(terms) = self.query_terms {
            base.query_terms = terms;
        }
        if let Some(tags) = self.include_tags {
            base.include_tags = tags;
        }
        if let Some(tags) = self.exclude_tags {
            base.exclude_tags = tags;
        }
        if let Some(min) = self.min_price {
            base.min_price = Some(min);
        }
        if let Some(max) = self.max_price {
            base.max_price = Some(max);
        }
        if let Some(sort) = self.sort.as_deref() {
            base.sort = SortOrder::parse(sort);
        }
        if let Some(confidence) = self.mode_confidence {
            base.mode_confidence = confidence;
        }
        base.normalize();
        base
    }
}

/// HTTP client for the external augmenter
pub struct AugmenterClient {
    client: Client,
    config: AugmenterConfig,
}

impl AugmenterClient {
    pub fn new(config: AugmenterConfig) -> Result<Self, NlpError> {
        if config.endpoint.is_empty() {
            return Err(NlpError::Configuration(
                "augmenter endpoint is empty".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NlpError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Issue one augmentation request. Returns `None` on any failure; the
    /// caller proceeds with the base intent.
    pub async fn augment(&self, text: &str) -> Option<AugmenterPayload> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&json!({ "text": text }));
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<AugmenterPayload>().await {
                    Ok(payload) => Some(payload),
                    Err(e) => {
                        tracing::warn!(error = %e, "malformed augmenter payload, using base intent");
                        None
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "augmenter returned non-success, using base intent");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "augmenter unreachable, using base intent");
                None
            }
        }
    }
}
