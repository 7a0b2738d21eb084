//! Multi-signal product ranking
//!
//! Scores combine lexical and fuzzy term matches, tag inclusion, recency,
//! price-window fit, and availability. Ranking reorders candidates but never
//! drops them; explicit price sorts override the score ordering entirely.

use chrono::{DateTime, Utc};

use shopchat_core::{Intent, Product, SortOrder};

use crate::fuzzy::near;

const TAG_BONUS: f64 = 8.0;
const DIRECT_TERM_BONUS: f64 = 5.0;
const FUZZY_TERM_BONUS: f64 = 2.5;
const PRICE_VIOLATION_PENALTY: f64 = 4.0;
const UNAVAILABLE_PENALTY: f64 = 1.0;
const PRICE_EPSILON: f64 = 0.01;

/// Score a single candidate against the intent.
///
/// Exposed so monotonicity properties can be asserted directly in tests;
/// production callers go through [`rank_products`].
pub fn score_product(product: &Product, intent: &Intent, now: DateTime<Utc>) -> f64 {
    let mut score = 0.0;

    for tag in &intent.include_tags {
        if product.tags.iter().any(|t| t == tag) {
            score += TAG_BONUS;
        }
    }

    let title = product.title.to_lowercase();
    let tag_str = product.tags.join(" ").to_lowercase();
    let variant_titles = product
        .variants
        .iter()
        .map(|v| v.title.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let vendor = product.vendor.to_lowercase();
    let product_type = product.product_type.to_lowercase();

    for term in &intent.query_terms {
        let term = term.to_lowercase();
        if term.is_empty() {
            continue;
        }
        let direct = title.contains(&term)
            || tag_str.contains(&term)
            || variant_titles.contains(&term)
            || vendor.contains(&term)
            || product_type.contains(&term);
        if direct {
            score += DIRECT_TERM_BONUS;
        } else if near(&title, &term)
            || near(&variant_titles, &term)
            || near(&vendor, &term)
            || near(&product_type, &term)
        {
            // Tags are excluded from the fuzzy fallback
            score += FUZZY_TERM_BONUS;
        }
    }

    score += 10.0 / product.age_days(now).sqrt();

    if let Some(min_price) = product.min_variant_price() {
        if let Some(lower) = intent.min_price {
            if min_price < lower - PRICE_EPSILON {
                score -= PRICE_VIOLATION_PENALTY;
            }
        }
        if let Some(upper) = intent.max_price {
            if min_price > upper + PRICE_EPSILON {
                score -= PRICE_VIOLATION_PENALTY;
            }
        }
    }

    if !product.any_available() {
        score -= UNAVAILABLE_PENALTY;
    }

    score
}

/// Missing prices always sort as worst, in both explicit price directions
fn cmp_prices(a: Option<f64>, b: Option<f64>, descending: bool) -> std::cmp::Ordering {
    match (a, b) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(a), Some(b)) => {
            if descending {
                b.total_cmp(&a)
            } else {
                a.total_cmp(&b)
            }
        }
    }
}

/// Reorder candidates by score, or purely by minimum variant price when the
/// intent requests an explicit price sort. Stable sorts keep ties
/// reproducible run-to-run. No items are dropped.
pub fn rank_products(products: Vec<Product>, intent: &Intent, now: DateTime<Utc>) -> Vec<Product> {
    let mut scored: Vec<(Product, f64, Option<f64>)> = products
        .into_iter()
        .map(|p| {
            let score = score_product(&p, intent, now);
            let min_price = p.min_variant_price();
            (p, score, min_price)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    match intent.sort {
        SortOrder::PriceAsc => scored.sort_by(|a, b| cmp_prices(a.2, b.2, false)),
        SortOrder::PriceDesc => scored.sort_by(|a, b| cmp_prices(a.2, b.2, true)),
        SortOrder::Popular | SortOrder::New => {}
    }

    scored.into_iter().map(|(p, _, _)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shopchat_core::Variant;

    fn product(now: DateTime<Utc>, title: &str, price: Option<f64>, tags: &[&str]) -> Product {
        Product {
            title: title.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            published_at: Some(now - Duration::days(30)),
            variants: vec![Variant {
                title: "Default".to_string(),
                price,
                available_for_sale: true,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn intent_with_terms(terms: &[&str]) -> Intent {
        Intent {
            query_terms: terms.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_included_tag_strictly_increases_score() {
        let now = Utc::now();
        let intent = Intent {
            include_tags: vec!["gender:female".to_string()],
            ..Default::default()
        };
        let without = product(now, "Silk Scarf", Some(100.0), &[]);
        let with = product(now, "Silk Scarf", Some(100.0), &["gender:female"]);

        assert!(score_product(&with, &intent, now) > score_product(&without, &intent, now));

        let ranked = rank_products(vec![without.clone(), with.clone()], &intent, now);
        assert_eq!(ranked[0].tags, with.tags);
    }

    #[test]
    fn test_direct_match_outscores_fuzzy_match() {
        let now = Utc::now();
        let intent = intent_with_terms(&["scarf"]);
        let direct = product(now, "Silk Scarf", Some(100.0), &[]);
        let fuzzy = product(now, "scarp", Some(100.0), &[]);
        let neither = product(now, "Wool Gloves", Some(100.0), &[]);

        let s_direct = score_product(&direct, &intent, now);
        let s_fuzzy = score_product(&fuzzy, &intent, now);
        let s_neither = score_product(&neither, &intent, now);
        assert!(s_direct > s_fuzzy);
        assert!(s_fuzzy > s_neither);
    }

    #[test]
    fn test_tag_substring_counts_as_direct_but_not_fuzzy() {
        let now = Utc::now();
        let intent = intent_with_terms(&["winter"]);
        // Term appears only in tags: direct path applies
        let tagged = product(now, "Plain Item", Some(10.0), &["season:winter"]);
        let untagged = product(now, "Plain Item", Some(10.0), &[]);
        assert!(score_product(&tagged, &intent, now) > score_product(&untagged, &intent, now));
    }

    #[test]
    fn test_newer_products_score_higher() {
        let now = Utc::now();
        let intent = Intent::default();
        let mut fresh = product(now, "A", Some(10.0), &[]);
        fresh.published_at = Some(now - Duration::days(1));
        let mut old = product(now, "B", Some(10.0), &[]);
        old.published_at = Some(now - Duration::days(365));

        assert!(score_product(&fresh, &intent, now) > score_product(&old, &intent, now));
    }

    #[test]
    fn test_price_window_penalty_and_unknown_price() {
        let now = Utc::now();
        let intent = Intent {
            min_price: Some(50.0),
            max_price: Some(150.0),
            ..Default::default()
        };
        let inside = product(now, "A", Some(100.0), &[]);
        let below = product(now, "B", Some(10.0), &[]);
        let unknown = product(now, "C", None, &[]);

        assert!(score_product(&inside, &intent, now) > score_product(&below, &intent, now));
        // Unknown price is never penalized by the window
        assert_eq!(
            score_product(&unknown, &intent, now),
            score_product(&inside, &intent, now)
        );
    }

    #[test]
    fn test_unavailable_penalty() {
        let now = Utc::now();
        let intent = Intent::default();
        let available = product(now, "A", Some(10.0), &[]);
        let mut sold_out = product(now, "A", Some(10.0), &[]);
        sold_out.variants[0].available_for_sale = false;

        let diff = score_product(&available, &intent, now) - score_product(&sold_out, &intent, now);
        assert!((diff - UNAVAILABLE_PENALTY).abs() < 1e-9);
    }

    #[test]
    fn test_price_asc_orders_priced_then_unpriced() {
        let now = Utc::now();
        let intent = Intent {
            sort: SortOrder::PriceAsc,
            ..Default::default()
        };
        let products = vec![
            product(now, "Mid", Some(50.0), &[]),
            product(now, "Unpriced", None, &[]),
            product(now, "Cheap", Some(10.0), &[]),
            product(now, "Dear", Some(500.0), &[]),
        ];
        let ranked = rank_products(products, &intent, now);
        let titles: Vec<&str> = ranked.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Cheap", "Mid", "Dear", "Unpriced"]);
    }

    #[test]
    fn test_price_desc_still_puts_unpriced_last() {
        let now = Utc::now();
        let intent = Intent {
            sort: SortOrder::PriceDesc,
            ..Default::default()
        };
        let products = vec![
            product(now, "Unpriced", None, &[]),
            product(now, "Cheap", Some(10.0), &[]),
            product(now, "Dear", Some(500.0), &[]),
        ];
        let ranked = rank_products(products, &intent, now);
        let titles: Vec<&str> = ranked.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Dear", "Cheap", "Unpriced"]);
    }

    #[test]
    fn test_ranking_never_drops_items() {
        let now = Utc::now();
        let products = vec![
            product(now, "A", Some(10.0), &[]),
            product(now, "B", None, &[]),
            product(now, "C", Some(20.0), &[]),
        ];
        let ranked = rank_products(products, &intent_with_terms(&["a"]), now);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_scores_are_finite() {
        let now = Utc::now();
        let intent = Intent {
            query_terms: vec!["scarf".to_string()],
            include_tags: vec!["gender:female".to_string()],
            min_price: Some(0.0),
            max_price: Some(0.0),
            ..Default::default()
        };
        let odd = Product {
            title: String::new(),
            variants: vec![Variant {
                price: Some(f64::NAN),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(score_product(&odd, &intent, now).is_finite());
    }
}
