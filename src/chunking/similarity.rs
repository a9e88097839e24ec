//! Term-frequency cosine similarity, shared by the semantic strategy's
//! boundary detection and the coherence-adjustment pass.

use std::collections::HashMap;

fn term_frequencies(text: &str) -> HashMap<String, u32> {
    let mut freqs = HashMap::new();
    for token in text.split(|c: char| !c.is_alphanumeric()) {
        if token.len() < 2 {
            continue;
        }
        *freqs.entry(token.to_lowercase()).or_insert(0) += 1;
    }
    freqs
}

/// Cosine similarity between the term-frequency vectors of two texts, in
/// `[0, 1]`. Two texts with no shared vocabulary (or either empty) have
/// similarity 0.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let freqs_a = term_frequencies(a);
    let freqs_b = term_frequencies(b);
    if freqs_a.is_empty() || freqs_b.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    for (term, count_a) in &freqs_a {
        if let Some(count_b) = freqs_b.get(term) {
            dot += (*count_a as f64) * (*count_b as f64);
        }
    }

    let norm_a: f64 = freqs_a.values().map(|c| (*c as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = freqs_b.values().map(|c| (*c as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_has_similarity_one() {
        let sim = cosine_similarity("the quick brown fox", "the quick brown fox");
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_vocabularies_have_zero_similarity() {
        let sim = cosine_similarity("apples oranges bananas", "rust systems programming");
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn empty_text_has_zero_similarity() {
        assert_eq!(cosine_similarity("", "something here"), 0.0);
    }

    #[test]
    fn partial_overlap_is_between_zero_and_one() {
        let sim = cosine_similarity("rust programming language", "rust systems language design");
        assert!(sim > 0.0 && sim < 1.0);
    }
}
