//! Reply formatting per conversation mode

use shopchat_core::{Mode, Product};

const SHOP_PICK_LIMIT: usize = 5;
const CHAT_PICK_LIMIT: usize = 3;

fn bullet_list(header: &str, picks: &[Product], limit: usize) -> String {
    let mut lines = Vec::with_capacity(limit + 1);
    lines.push(header.to_string());
    lines.extend(picks.iter().take(limit).map(|p| format!("• {}", p.title)));
    lines.join("\n")
}

/// Render the final reply from the ranked, deduplicated picks and the mode
pub fn format_reply(mode: Mode, picks: &[Product]) -> String {
    match mode {
        Mode::Help => {
            "Need help with orders, returns, or shipping? I can guide you step by step."
                .to_string()
        }
        Mode::Shop => {
            if picks.is_empty() {
                "I couldn't find exact matches. Tell me a style, brand, or budget and I'll refine."
                    .to_string()
            } else {
                bullet_list("Here are some picks:", picks, SHOP_PICK_LIMIT)
            }
        }
        Mode::Chat => {
            if picks.is_empty() {
                "Got it. Tell me what you're looking for or your budget, and I can suggest a few options."
                    .to_string()
            } else {
                bullet_list(
                    "I hear you. Here are a few easy picks to browse:",
                    picks,
                    CHAT_PICK_LIMIT,
                )
            }
        }
    }
}
