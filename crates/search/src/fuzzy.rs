//! Bounded near-miss string matching
//!
//! This is a cheap detector for single-character typos, insertions, and
//! deletions, not true Levenshtein distance. Scoring outcomes depend on this
//! exact approximation (it rejects some one-edit pairs, e.g. transpositions),
//! so it must not be replaced by a general edit-distance algorithm.

/// Returns true if one string contains the other, or the two differ by at
/// most one edit under a single left-to-right scan.
///
/// Callers must case-normalize both arguments first. Empty strings never
/// match.
pub fn near(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.contains(b) || b.contains(a) {
        return true;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) > 1 {
        return false;
    }

    let (mut i, mut j, mut edits) = (0usize, 0usize, 0u32);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            i += 1;
            j += 1;
            continue;
        }
        edits += 1;
        if edits > 1 {
            return false;
        }
        // Consume from the longer string, or from both when equal length
        if a.len() > b.len() {
            i += 1;
        } else if a.len() < b.len() {
            j += 1;
        } else {
            i += 1;
            j += 1;
        }
    }
    // Any unconsumed tail counts as one more edit
    if i < a.len() || j < b.len() {
        edits += 1;
    }
    edits <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_deletion_matches() {
        assert!(near("shirt", "shrt"));
        assert!(near("shrt", "shirt"));
    }

    #[test]
    fn test_unrelated_words_do_not_match() {
        assert!(!near("shirt", "pants"));
        assert!(!near("ab", "cd"));
    }

    #[test]
    fn test_substring_matches_either_direction() {
        assert!(near("a", "ab"));
        assert!(near("scarf", "silk scarf deluxe"));
    }

    #[test]
    fn test_single_substitution_matches() {
        assert!(near("scarf", "scarp"));
    }

    #[test]
    fn test_two_edits_rejected() {
        assert!(!near("scarf", "scorp"));
    }

    #[test]
    fn test_length_gap_over_one_rejected_without_containment() {
        assert!(!near("cat", "crabs"));
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!near("", "a"));
        assert!(!near("a", ""));
        assert!(!near("", ""));
    }

    #[test]
    fn test_transposition_rejected_by_approximation() {
        // True edit distance would be 2 anyway, but this documents that the
        // scan is not a transposition-aware distance
        assert!(!near("form", "from"));
    }

    #[test]
    fn test_multibyte_chars_counted_as_one() {
        // One substitution on two-character strings: a single edit
        assert!(near("围巾", "围脖"));
        // Containment with multibyte text
        assert!(near("围巾子", "围巾"));
    }
}
