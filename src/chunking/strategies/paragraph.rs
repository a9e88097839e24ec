//! Paragraph strategy: packs whole blocks (paragraphs, headings) into
//! token-budgeted chunks, keeping code fences, lists, tables, quotes, and
//! definitions as atomic units that are never merged into something else
//! mid-unit but can still be packed alongside neighbors.

use crate::chunking::{classify_block_kind, ChunkingConfig, ChunkingStrategy, RawChunk};
use crate::datamodel::{Document, DocumentStructure};
use crate::parser::blocks::BlockKind;
use crate::parser::ParsedDocument;

use super::{pack_units, Unit};

pub struct ParagraphStrategy;

impl ChunkingStrategy for ParagraphStrategy {
    fn chunk(&self, _document: &Document, parsed: &ParsedDocument, _structure: &DocumentStructure, config: &ChunkingConfig) -> Vec<RawChunk> {
        let units: Vec<Unit> = parsed
            .blocks
            .iter()
            .filter(|b| !matches!(b.kind, BlockKind::Heading { .. }))
            .map(|block| Unit {
                content: block.content.clone(),
                chunk_type: classify_block_kind(&block.kind),
                start_line: block.line_start,
                end_line: block.line_end,
                has_code: matches!(block.kind, BlockKind::CodeFence { .. } | BlockKind::IndentedCode),
            })
            .collect();
        pack_units(units, config.max_chunk_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_structure() -> DocumentStructure {
        DocumentStructure {
            title: None,
            sections: vec![],
            metadata: Default::default(),
            root: 0,
            cross_references: vec![],
            features: None,
        }
    }

    #[test]
    fn packs_short_paragraphs_together() {
        let body = "first paragraph\n\nsecond paragraph\n\nthird paragraph\n";
        let document = Document::from_text(body, "doc.md");
        let parsed = crate::parser::parse(body);
        let config = ChunkingConfig {
            max_chunk_size: 1000,
            ..ChunkingConfig::default()
        };
        let chunks = ParagraphStrategy.chunk(&document, &parsed, &empty_structure(), &config);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn code_fence_stays_atomic_unit() {
        let body = "para one\n\n```rust\nfn x() {}\n```\n\npara two\n";
        let document = Document::from_text(body, "doc.md");
        let parsed = crate::parser::parse(body);
        let config = ChunkingConfig {
            max_chunk_size: 2,
            ..ChunkingConfig::default()
        };
        let chunks = ParagraphStrategy.chunk(&document, &parsed, &empty_structure(), &config);
        assert!(chunks.iter().any(|c| c.content.contains("fn x()")));
    }
}
