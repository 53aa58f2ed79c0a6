//! Title normalization and term extraction.
//!
//! Catalog titles and queries go through exactly the same two steps:
//! `clean_title` strips punctuation once, then `analyze` produces the
//! unigram and bigram terms the feature space is fitted on.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Everything outside `[A-Za-z0-9 ]`. Tabs and newlines are removed too.
pub static NON_TITLE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]").unwrap());

/// Word tokens of two or more characters.
pub static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Strip every character that is not an ASCII letter, digit or space.
/// Case and spacing of what remains are untouched.
/// e.g., "Toy Story (1995)" → "Toy Story 1995", "Se7en!" → "Se7en"
pub fn clean_title(title: &str) -> String {
    NON_TITLE_CHARS.replace_all(title, "").into_owned()
}

/// Lowercased word tokens, dropping single-character words.
/// e.g., "Dial M for Murder" → ["dial", "for", "murder"]
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Unigrams followed by bigrams of consecutive tokens.
/// e.g., "The Matrix Reloaded" → ["the", "matrix", "reloaded", "the matrix", "matrix reloaded"]
pub fn analyze(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = Vec::with_capacity(tokens.len().saturating_mul(2));
    terms.extend(tokens.iter().cloned());
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_basic() {
        assert_eq!(clean_title("Toy Story (1995)"), "Toy Story 1995");
        assert_eq!(clean_title("Se7en!"), "Se7en");
        assert_eq!(clean_title("Amélie"), "Amlie");
        assert_eq!(clean_title("WALL·E"), "WALLE");
    }

    #[test]
    fn test_clean_title_keeps_case_and_spacing() {
        assert_eq!(clean_title("  The   Matrix  "), "  The   Matrix  ");
        assert_eq!(clean_title("Mission: Impossible - Fallout"), "Mission Impossible  Fallout");
        assert_eq!(clean_title("tab\there"), "tabhere");
    }

    #[test]
    fn test_clean_title_empty_and_all_stripped() {
        assert_eq!(clean_title(""), "");
        assert_eq!(clean_title("!?()"), "");
    }

    #[test]
    fn test_clean_title_idempotent() {
        for s in ["", "The Matrix (1999)", "Amélie", "¡Three Amigos!", "  x  y ", "9½ Weeks"] {
            let once = clean_title(s);
            assert_eq!(clean_title(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        assert_eq!(tokenize("Dial M for Murder"), vec!["dial", "for", "murder"]);
        assert_eq!(tokenize("A Beautiful Mind"), vec!["beautiful", "mind"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("a b c 1").is_empty());
    }

    #[test]
    fn test_analyze_unigrams_then_bigrams() {
        assert_eq!(
            analyze("The Matrix Reloaded"),
            vec!["the", "matrix", "reloaded", "the matrix", "matrix reloaded"]
        );
        assert_eq!(analyze("Heat"), vec!["heat"]);
    }

    #[test]
    fn test_analyze_bigrams_skip_dropped_tokens() {
        // "m" is dropped before bigrams are formed
        assert_eq!(
            analyze("Dial M for Murder"),
            vec!["dial", "for", "murder", "dial for", "for murder"]
        );
    }
}
