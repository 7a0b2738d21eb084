//! SHOP / HELP / CHAT mode classification
//!
//! Help cues always take precedence over shop cues, even when both match.

use once_cell::sync::Lazy;
use regex::Regex;

use shopchat_core::{Intent, Mode};

static HELP_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)refund|return|exchange|order|shipping|delivery|track|policy|客服|退货|换货|物流|快递|订单|政策")
        .unwrap()
});

static SHOP_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)buy|gift|recommend|option|size|color|适合|礼物|买|购|推荐|款|尺码|颜色").unwrap()
});

/// Classify a conversation turn from the raw text and the parsed intent
pub fn classify_mode(text: &str, intent: &Intent) -> Mode {
    if HELP_CUES.is_match(text) {
        return Mode::Help;
    }
    if intent.has_filters() || SHOP_CUES.is_match(text) {
        return Mode::Shop;
    }
    Mode::Chat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_cues_beat_shop_cues() {
        let intent = crate::parser::parse_rules("I want a refund for what I buy");
        assert_eq!(classify_mode("I want a refund for what I buy", &intent), Mode::Help);
    }

    #[test]
    fn test_filters_imply_shop() {
        let intent = Intent {
            min_price: Some(100.0),
            ..Default::default()
        };
        assert_eq!(classify_mode("呃", &intent), Mode::Shop);
    }

    #[test]
    fn test_shop_cue_without_filters() {
        let intent = Intent::default();
        assert_eq!(classify_mode("送什么礼物好", &intent), Mode::Shop);
    }

    #[test]
    fn test_plain_chat() {
        let intent = Intent::default();
        assert_eq!(classify_mode("how was your day", &intent), Mode::Chat);
    }

    #[test]
    fn test_chinese_help_cues() {
        let intent = Intent::default();
        assert_eq!(classify_mode("我的订单到哪了", &intent), Mode::Help);
    }
}
