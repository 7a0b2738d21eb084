//! Query term expansion against the shop lexicon

use std::collections::HashSet;

use shopchat_core::intent::MAX_EXPANDED_TERMS;

use crate::fuzzy::near;
use crate::lexicon::Lexicon;

/// Grow the input terms by fuzzy-matching them against the union pool of the
/// lexicon's vocabularies.
///
/// The result starts from the lowercased input terms in first-seen order.
/// The inner pool scan stops once the set has grown past
/// [`MAX_EXPANDED_TERMS`] (a safety cap, not a precise cutoff) and the final
/// list is truncated to that bound. Deterministic for a given lexicon and
/// input, so repeated runs produce identical rankings.
pub fn expand_terms(terms: &[String], lexicon: &Lexicon) -> Vec<String> {
    let pool = lexicon.pool();

    let mut seen = HashSet::new();
    let mut expanded: Vec<String> = Vec::new();
    for term in terms {
        let term = term.to_lowercase();
        if seen.insert(term.clone()) {
            expanded.push(term);
        }
    }

    for term in terms {
        let term = term.to_lowercase();
        for candidate in &pool {
            if expanded.len() > MAX_EXPANDED_TERMS {
                break;
            }
            if near(candidate, &term) && seen.insert((*candidate).to_string()) {
                expanded.push((*candidate).to_string());
            }
        }
    }

    expanded.truncate(MAX_EXPANDED_TERMS);
    expanded
}
