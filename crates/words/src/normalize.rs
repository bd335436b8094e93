use rust_stemmers::{Algorithm, Stemmer};

use crate::stopwords::is_stop_word;

/// Tokenize, stem, stop-word filter, and dedupe a phrase into an ordered
/// keyword list.
///
/// Pure, deterministic, never fails on well-formed UTF-8 (`rust_stemmers`
/// has no fallible path, unlike the upstream's per-token stemmer error).
/// Preserves first-occurrence order; case is folded before stemming.
pub fn normalize(phrase: &str) -> Vec<String> {
    let stemmer = Stemmer::create(Algorithm::English);
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    for token in split_words(phrase) {
        let stem = stemmer.stem(&token.to_lowercase()).into_owned();
        if seen.contains(&stem) {
            continue;
        }
        if is_stop_word(&stem) {
            continue;
        }
        seen.insert(stem.clone());
        out.push(stem);
    }

    out
}

/// Split on any non-letter/non-digit codepoint, matching the upstream's
/// `strings.FieldsFunc(unicode.IsLetter, unicode.IsDigit)` splitter.
fn split_words(phrase: &str) -> Vec<&str> {
    phrase
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_stop_words_and_folds_case() {
        assert_eq!(
            normalize("the cats and the Dogs"),
            vec!["cat".to_string(), "dog".to_string()]
        );
    }

    #[test]
    fn dedupes_repeated_terms_case_insensitively() {
        assert_eq!(normalize("cats cats CAT"), vec!["cat".to_string()]);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(normalize("").is_empty());
    }

    #[test]
    fn punctuation_only_input_yields_empty_list() {
        assert!(normalize("!!! --- ...").is_empty());
    }

    #[test]
    fn preserves_first_occurrence_order() {
        assert_eq!(
            normalize("dog cat dog bird"),
            vec!["dog".to_string(), "cat".to_string(), "bird".to_string()]
        );
    }

    #[test]
    fn idempotent_up_to_order() {
        let once = normalize("Running runners run swiftly through the forest");
        let twice = normalize(&once.join(" "));
        let mut a = once.clone();
        let mut b = twice.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn every_output_token_is_its_own_stem_and_not_a_stop_word() {
        let stemmer = Stemmer::create(Algorithm::English);
        for token in normalize("The quick brown foxes jumped over lazy dogs") {
            assert_eq!(token, token.to_lowercase());
            assert!(!is_stop_word(&token));
            assert_eq!(stemmer.stem(&token).into_owned(), token);
        }
    }
}
