//! Summary generation: strips structural noise and concatenates prose
//! paragraphs up to a character budget, breaking at sentence boundaries.

use crate::chunking::text_spans::split_sentences;
use crate::parser::blocks::BlockKind;
use crate::parser::ParsedDocument;

pub const DEFAULT_SUMMARY_CHARS: usize = 200;

/// Build a summary from `parsed`'s prose paragraphs (front-matter, fenced
/// code, tables, and heading lines already excluded by construction),
/// stopping at the nearest sentence boundary at or before `budget_chars`.
/// Returns an empty string when no prose remains.
pub fn summarize(parsed: &ParsedDocument, budget_chars: usize) -> String {
    let prose: String = parsed
        .blocks
        .iter()
        .filter(|b| matches!(b.kind, BlockKind::Paragraph))
        .map(|b| b.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    if prose.trim().is_empty() {
        return String::new();
    }

    let sentences = split_sentences(&prose);
    let mut summary = String::new();
    for sentence in sentences {
        let candidate = if summary.is_empty() {
            sentence.clone()
        } else {
            format!("{summary} {sentence}")
        };
        if candidate.len() > budget_chars && !summary.is_empty() {
            break;
        }
        summary = candidate;
        if summary.len() >= budget_chars {
            break;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_prose_paragraphs_only() {
        let text = "# Heading\n\nFirst sentence here. Second sentence follows.\n\n```rust\nfn x() {}\n```\n";
        let parsed = crate::parser::parse(text);
        let summary = summarize(&parsed, 200);
        assert!(summary.contains("First sentence"));
        assert!(!summary.contains("fn x()"));
        assert!(!summary.contains("Heading"));
    }

    #[test]
    fn empty_when_no_prose_remains() {
        let text = "# Heading\n\n```rust\nfn x() {}\n```\n";
        let parsed = crate::parser::parse(text);
        assert_eq!(summarize(&parsed, 200), "");
    }

    #[test]
    fn breaks_at_sentence_boundary_within_budget() {
        let text = "Short one. ".repeat(50);
        let parsed = crate::parser::parse(&text);
        let summary = summarize(&parsed, 30);
        assert!(summary.len() < 60);
        assert!(summary.ends_with('.'));
    }
}
