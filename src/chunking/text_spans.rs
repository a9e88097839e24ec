//! Shared text-splitting helpers used by the fixed, sentence, paragraph,
//! and semantic strategies: line-offset lookup, paragraph/sentence
//! segmentation, and word-level splitting for last-resort cuts.

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "vs", "etc", "e.g", "i.e", "st", "no", "fig",
];

/// A contiguous piece of text with its 1-based, inclusive line span.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub content: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// Byte offsets where each line begins, used to map a byte offset back to
/// a 1-based line number.
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub fn build(text: &str) -> Self {
        let mut offsets = vec![0usize];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(idx + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based line number containing byte offset `pos`.
    pub fn line_for_offset(&self, pos: usize) -> usize {
        match self.offsets.binary_search(&pos) {
            Ok(idx) => idx + 1,
            Err(idx) => idx.max(1),
        }
    }
}

/// Split `text` into paragraphs separated by one or more blank lines,
/// tracking each paragraph's 1-based line span within `text`.
pub fn split_paragraphs(text: &str) -> Vec<Span> {
    let lines: Vec<&str> = text.lines().collect();
    let mut spans = Vec::new();
    let mut i = 0usize;
    while i < lines.len() {
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }
        let start = i;
        let mut end = i;
        while end < lines.len() && !lines[end].trim().is_empty() {
            end += 1;
        }
        spans.push(Span {
            content: lines[start..end].join("\n"),
            start_line: start + 1,
            end_line: end,
        });
        i = end;
    }
    spans
}

/// Split `text` into sentences, respecting a small list of common
/// abbreviations so `"Dr. Smith"` isn't split after `"Dr."`. Sentences do
/// not track independent line spans finer than the paragraph they came
/// from; callers pass the paragraph's span for all of its sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if c == '.' || c == '!' || c == '?' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            let next_starts_sentence = j < chars.len()
                && (chars[j].is_uppercase() || chars[j].is_ascii_digit() || chars[j] == '"' || chars[j] == '\'');
            let at_end = j >= chars.len();
            if (next_starts_sentence || at_end) && !ends_with_abbreviation(&chars[start..=i]) {
                let sentence: String = chars[start..=i].iter().collect();
                let trimmed = sentence.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                start = j;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    if start < chars.len() {
        let rest: String = chars[start..].iter().collect();
        let trimmed = rest.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
    }
    sentences
}

fn ends_with_abbreviation(slice: &[char]) -> bool {
    let text: String = slice.iter().collect();
    let lower = text.to_lowercase();
    let word = lower
        .trim_end_matches('.')
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("");
    ABBREVIATIONS.contains(&word)
}

/// Split `text` into words on whitespace, preserving nothing but the word
/// boundaries — used only as the last-resort split granularity.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let spans = split_paragraphs("para one\nline two\n\npara two\n");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start_line, 1);
        assert_eq!(spans[0].end_line, 2);
        assert_eq!(spans[1].start_line, 4);
    }

    #[test]
    fn sentences_split_on_terminators() {
        let sentences = split_sentences("Hello world. This is a test! Is it? Yes.");
        assert_eq!(sentences.len(), 4);
        assert_eq!(sentences[0], "Hello world.");
    }

    #[test]
    fn sentences_respect_abbreviations() {
        let sentences = split_sentences("Dr. Smith arrived. He left soon after.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("Dr. Smith arrived."));
    }

    #[test]
    fn line_index_maps_offsets_to_lines() {
        let text = "line1\nline2\nline3";
        let index = LineIndex::build(text);
        assert_eq!(index.line_for_offset(0), 1);
        assert_eq!(index.line_for_offset(6), 2);
        assert_eq!(index.line_for_offset(12), 3);
    }
}
