//! Hybrid strategy (the default): walks the section tree and emits one
//! chunk per section's own content (excluding text that belongs to its
//! descendants) when that content fits the budget, falling back to a
//! paragraph-then-sentence split for oversized sections. This is the only
//! strategy that consults `DocumentStructure` directly rather than the
//! flat block list.

use crate::chunking::text_spans::split_paragraphs;
use crate::chunking::{looks_like_code, ChunkingConfig, ChunkingStrategy, RawChunk};
use crate::datamodel::{ChunkType, Document, DocumentStructure, Section};
use crate::estimator::estimate_tokens;
use crate::parser::ParsedDocument;

pub struct HybridStrategy;

impl ChunkingStrategy for HybridStrategy {
    fn chunk(&self, _document: &Document, _parsed: &ParsedDocument, structure: &DocumentStructure, config: &ChunkingConfig) -> Vec<RawChunk> {
        let mut chunks = Vec::new();
        for (index, section) in structure.sections.iter().enumerate() {
            let (content, start_line, end_line) = own_content(section, &structure.sections);
            if content.trim().is_empty() {
                continue;
            }
            let _ = index;
            if estimate_tokens(&content) <= config.max_chunk_size {
                chunks.push(make_chunk(&content, start_line, end_line));
            } else {
                chunks.extend(split_section_content(&content, start_line, config.max_chunk_size));
            }
        }
        chunks
    }
}

/// The text directly owned by `section`, excluding any range claimed by a
/// child section. Since child ranges start immediately at the child's
/// heading and section ranges nest, "own" text is always a prefix of
/// `section.content` ending just before the first child begins.
fn own_content(section: &Section, sections: &[Section]) -> (String, usize, usize) {
    if section.children.is_empty() {
        return (section.content.clone(), section.start_line, section.end_line);
    }
    let first_child_start = sections[section.children[0]].start_line;
    let own_end = first_child_start.saturating_sub(1);
    if own_end < section.start_line {
        return (String::new(), section.start_line, section.start_line.saturating_sub(1));
    }
    let take = own_end - section.start_line + 1;
    let content: String = section.content.lines().take(take).collect::<Vec<_>>().join("\n");
    (content, section.start_line, own_end)
}

fn make_chunk(content: &str, start_line: usize, end_line: usize) -> RawChunk {
    let has_code = looks_like_code(content);
    RawChunk {
        content: content.to_string(),
        chunk_type: if has_code { ChunkType::CodeBlock } else { ChunkType::Paragraph },
        start_line,
        end_line,
        has_code,
    }
}

fn split_section_content(content: &str, start_line: usize, max_chunk_size: u32) -> Vec<RawChunk> {
    let paragraphs = split_paragraphs(content);
    if paragraphs.is_empty() {
        return vec![make_chunk(content, start_line, start_line)];
    }

    let mut chunks = Vec::new();
    let mut acc = String::new();
    let mut acc_start_rel = paragraphs[0].start_line;
    let mut acc_end_rel = paragraphs[0].start_line;

    for p in &paragraphs {
        let candidate = if acc.is_empty() { p.content.clone() } else { format!("{acc}\n\n{}", p.content) };
        if !acc.is_empty() && estimate_tokens(&candidate) > max_chunk_size {
            let offset = start_line.saturating_sub(1);
            chunks.push(make_chunk(&acc, offset + acc_start_rel, offset + acc_end_rel));
            acc = p.content.clone();
            acc_start_rel = p.start_line;
            acc_end_rel = p.end_line;
        } else {
            acc = candidate;
            acc_end_rel = p.end_line;
        }
    }
    if !acc.trim().is_empty() {
        let offset = start_line.saturating_sub(1);
        chunks.push(make_chunk(&acc, offset + acc_start_rel, offset + acc_end_rel));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section;

    fn structure_for(text: &str) -> DocumentStructure {
        let parsed = crate::parser::parse(text);
        let sections = section::extract_sections(&parsed.body, &parsed.blocks, None, "doc");
        DocumentStructure {
            title: None,
            sections,
            metadata: Default::default(),
            root: 0,
            cross_references: vec![],
            features: None,
        }
    }

    #[test]
    fn leaf_section_becomes_single_chunk() {
        let structure = structure_for("# A\n\nshort body text\n");
        let document = Document::from_text("# A\n\nshort body text\n", "doc.md");
        let parsed = crate::parser::parse("# A\n\nshort body text\n");
        let config = ChunkingConfig::default();
        let chunks = HybridStrategy.chunk(&document, &parsed, &structure, &config);
        assert!(chunks.iter().any(|c| c.content.contains("short body text")));
    }

    #[test]
    fn parent_own_content_excludes_child_text() {
        let text = "# A\n\nintro only\n\n## B\n\nchild detail\n";
        let structure = structure_for(text);
        let document = Document::from_text(text, "doc.md");
        let parsed = crate::parser::parse(text);
        let config = ChunkingConfig::default();
        let chunks = HybridStrategy.chunk(&document, &parsed, &structure, &config);
        let a_chunk = chunks.iter().find(|c| c.content.contains("intro only")).unwrap();
        assert!(!a_chunk.content.contains("child detail"));
    }

    #[test]
    fn oversized_section_splits_by_paragraph() {
        let mut text = String::from("# A\n\n");
        for i in 0..50 {
            text.push_str(&format!("paragraph number {i} with several words in it to add bulk.\n\n"));
        }
        let structure = structure_for(&text);
        let document = Document::from_text(text.clone(), "doc.md");
        let parsed = crate::parser::parse(&text);
        let config = ChunkingConfig {
            max_chunk_size: 40,
            ..ChunkingConfig::default()
        };
        let chunks = HybridStrategy.chunk(&document, &parsed, &structure, &config);
        assert!(chunks.len() > 1);
    }
}
