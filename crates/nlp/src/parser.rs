//! Rule-based intent parsing
//!
//! The deterministic rule pass always produces a usable [`Intent`]; the
//! optional external augmenter only enriches it and is never required for
//! correctness.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use shopchat_core::{Intent, SortOrder};

use crate::augmenter::AugmenterClient;

/// Tag cue: region Taiwan
static REGION_TAIWAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)台湾|taiwan").unwrap());
/// Tag cue: female. "女" alone fires so "女生", "女装" etc. all match.
static GENDER_FEMALE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)女|female|women").unwrap());
/// Tag cue: male. Note "male"/"men" are substrings of "female"/"women", so
/// feminine text fires both gender tags; cues are independent by design.
static GENDER_MALE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)男|male|men").unwrap());

/// Price window: digit group, optional range marker, optional second group,
/// optional currency cue
static PRICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)[\s\-~到至]*(\d+)?\s*(?:元|rmb|\$|usd)?").unwrap());

static SORT_NEW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)最新|new|上新").unwrap());
static SORT_CHEAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)便宜|低价|价格从低到高|cheap").unwrap());
static SORT_EXPENSIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)贵|高价|价格从高到低|expensive").unwrap());

/// Greetings, filler, and generic "recommend me something" phrases (zh/en)
/// dropped from recall
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "hi", "hello", "hey", "ok", "okay", "yes", "no", "yo", "please", "pls",
        "recommend", "recommendation", "recommendations", "suggest", "suggestion",
        "help", "anything", "whatever", "anything works",
        "随便", "随便看看", "推荐", "推荐一下", "推荐下", "给我推荐", "帮推荐", "看看",
        "看下", "要啥", "买啥", "有啥", "有推荐吗", "推荐么", "整点",
        "你好", "您好", "哈喽", "嗨", "好的", "行", "嗯", "额", "诶", "可以吗",
        "求推荐", "推荐下呗",
    ]
    .into_iter()
    .collect()
});

/// Lowercase, strip common zh/en punctuation, split on whitespace.
///
/// Shared by query-term extraction and lexicon construction so both sides
/// segment text identically.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(['，', '。', ',', '.', '!', '?'], " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Deterministic rule pass producing the base intent.
///
/// Always succeeds; an empty ask falls back to open discovery on the newest
/// catalog items (`sort = New`).
pub fn parse_rules(text: &str) -> Intent {
    let mut intent = Intent::default();

    if REGION_TAIWAN.is_match(text) {
        intent.include_tags.push("region:Taiwan".to_string());
    }
    if GENDER_FEMALE.is_match(text) {
        intent.include_tags.push("gender:female".to_string());
    }
    if GENDER_MALE.is_match(text) {
        intent.include_tags.push("gender:male".to_string());
    }

    if let Some(caps) = PRICE.captures(text) {
        intent.min_price = caps.get(1).and_then(|m| m.as_str().parse().ok());
        if let Some(m) = caps.get(2) {
            intent.max_price = m.as_str().parse().ok();
        }
    }

    // Sequential checks, each unconditionally overwrites: last match wins
    if SORT_NEW.is_match(text) {
        intent.sort = SortOrder::New;
    }
    if SORT_CHEAP.is_match(text) {
        intent.sort = SortOrder::PriceAsc;
    }
    if SORT_EXPENSIVE.is_match(text) {
        intent.sort = SortOrder::PriceDesc;
    }

    intent.query_terms = tokenize(text)
        .into_iter()
        .filter(|t| !STOPWORDS.contains(t.as_str()))
        .take(shopchat_core::intent::MAX_BASE_TERMS)
        .collect();

    // Open discovery: an empty ask returns the newest items instead of an
    // arbitrary default
    if !intent.has_filters() {
        intent.sort = SortOrder::New;
    }

    intent.normalize();
    intent
}

/// Intent parser with an optional external augmenter
#[derive(Default)]
pub struct IntentParser {
    augmenter: Option<AugmenterClient>,
}

impl IntentParser {
    /// Rules-only parser
    pub fn new() -> Self {
        Self { augmenter: None }
    }

    /// Parser that merges augmenter output over the rule pass
    pub fn with_augmenter(client: AugmenterClient) -> Self {
        Self {
            augmenter: Some(client),
        }
    }

    /// Parse raw chat text into an [`Intent`].
    ///
    /// The augmenter call is bounded by its configured timeout; on any
    /// failure the base intent is returned unchanged.
    pub async fn parse(&self, text: &str) -> Intent {
        let base = parse_rules(text);
        match &self.augmenter {
            None => base,
            Some(client) => match client.augment(text).await {
                Some(payload) => payload.merge_into(base),
                None => base,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_yields_open_discovery() {
        let intent = parse_rules("hello");
        assert!(intent.query_terms.is_empty());
        assert!(intent.include_tags.is_empty());
        assert!(intent.min_price.is_none());
        assert!(intent.max_price.is_none());
        assert_eq!(intent.sort, SortOrder::New);
    }

    #[test]
    fn test_gift_query_with_price_window() {
        let intent = parse_rules("女生 礼物 200-300");
        assert!(intent.include_tags.contains(&"gender:female".to_string()));
        assert_eq!(intent.min_price, Some(200.0));
        assert_eq!(intent.max_price, Some(300.0));
        assert!(!intent.query_terms.is_empty());
    }

    #[test]
    fn test_single_number_sets_only_min_price() {
        let intent = parse_rules("200元以内的围巾");
        assert_eq!(intent.min_price, Some(200.0));
        assert_eq!(intent.max_price, None);
    }

    #[test]
    fn test_sort_cue_last_match_wins() {
        // Both cheap and expensive cues present: the expensive check runs
        // last and overwrites
        let intent = parse_rules("便宜还是expensive");
        assert_eq!(intent.sort, SortOrder::PriceDesc);

        let intent = parse_rules("最新 上新");
        assert_eq!(intent.sort, SortOrder::New);

        let intent = parse_rules("cheap scarf");
        assert_eq!(intent.sort, SortOrder::PriceAsc);
    }

    #[test]
    fn test_stopwords_dropped_from_terms() {
        let intent = parse_rules("hello please recommend a scarf");
        assert!(intent.query_terms.contains(&"scarf".to_string()));
        assert!(!intent.query_terms.contains(&"hello".to_string()));
        assert!(!intent.query_terms.contains(&"recommend".to_string()));
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(tokenize("红色，围巾。Red!Scarf?"), vec!["红色", "围巾", "red", "scarf"]);
    }

    #[test]
    fn test_terms_capped_at_eight() {
        let intent = parse_rules("a b c d e f g h i j k");
        assert!(intent.query_terms.len() <= 8);
    }

    #[test]
    fn test_region_and_gender_cues_stack() {
        let intent = parse_rules("taiwan 女 gifts");
        assert!(intent.include_tags.contains(&"region:Taiwan".to_string()));
        assert!(intent.include_tags.contains(&"gender:female".to_string()));
    }

    #[tokio::test]
    async fn test_parser_without_augmenter_matches_rules() {
        let parser = IntentParser::new();
        let parsed = parser.parse("女生 礼物 200-300").await;
        assert_eq!(parsed, parse_rules("女生 礼物 200-300"));
    }
}
