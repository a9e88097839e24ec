//! TF-based keyword extraction over alphanumeric tokens, stop-word
//! filtered, ranked with a deterministic first-occurrence tiebreak.

use std::collections::HashMap;

const STOP_WORDS: &[&str] = &[
    "this", "that", "with", "from", "have", "will", "your", "about", "which", "there", "their",
    "what", "when", "where", "been", "were", "them", "these", "those", "into", "such", "than",
    "then", "only", "also", "more", "some", "other", "each", "same", "very", "just", "over",
    "under", "while", "being", "because", "through", "after", "before", "between",
];

/// Extract up to `limit` keywords from `text`: alphanumeric tokens of at
/// least 4 characters, stop-words removed, ranked by frequency then by
/// first occurrence.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (index, raw) in text.split(|c: char| !c.is_alphanumeric()).enumerate() {
        if raw.len() < 4 {
            continue;
        }
        let token = raw.to_lowercase();
        if STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        *counts.entry(token.clone()).or_insert(0) += 1;
        first_seen.entry(token).or_insert(index);
    }

    let mut ranked: Vec<(String, u32, usize)> = counts
        .into_iter()
        .map(|(token, count)| {
            let first = first_seen[&token];
            (token, count, first)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(limit).map(|(token, _, _)| token).collect()
}
