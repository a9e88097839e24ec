//! Sentence strategy: splits paragraph blocks into sentences and packs
//! those (finer-grained than whole paragraphs) into token-budgeted
//! chunks, while code fences, lists, tables, and quotes remain atomic.

use crate::chunking::{classify_block_kind, ChunkingConfig, ChunkingStrategy, RawChunk};
use crate::chunking::text_spans::split_sentences;
use crate::datamodel::{ChunkType, Document, DocumentStructure};
use crate::parser::blocks::BlockKind;
use crate::parser::ParsedDocument;

use super::{pack_units, Unit};

pub struct SentenceStrategy;

impl ChunkingStrategy for SentenceStrategy {
    fn chunk(&self, _document: &Document, parsed: &ParsedDocument, _structure: &DocumentStructure, config: &ChunkingConfig) -> Vec<RawChunk> {
        let mut units = Vec::new();
        for block in &parsed.blocks {
            if matches!(block.kind, BlockKind::Heading { .. }) {
                continue;
            }
            if matches!(block.kind, BlockKind::Paragraph) {
                let sentences = split_sentences(&block.content);
                if sentences.is_empty() {
                    continue;
                }
                for sentence in sentences {
                    units.push(Unit {
                        content: sentence,
                        chunk_type: ChunkType::Paragraph,
                        start_line: block.line_start,
                        end_line: block.line_end,
                        has_code: false,
                    });
                }
            } else {
                units.push(Unit {
                    content: block.content.clone(),
                    chunk_type: classify_block_kind(&block.kind),
                    start_line: block.line_start,
                    end_line: block.line_end,
                    has_code: matches!(block.kind, BlockKind::CodeFence { .. } | BlockKind::IndentedCode),
                });
            }
        }
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
    fn splits_paragraph_into_sentence_units_then_repacks() {
        let body = "One sentence here. Another sentence follows. A third one too.\n";
        let document = Document::from_text(body, "doc.md");
        let parsed = crate::parser::parse(body);
        let config = ChunkingConfig {
            max_chunk_size: 1000,
            ..ChunkingConfig::default()
        };
        let chunks = SentenceStrategy.chunk(&document, &parsed, &empty_structure(), &config);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].content.contains("third one"));
    }

    #[test]
    fn tight_budget_yields_multiple_chunks() {
        let body = "One sentence here. Another sentence follows. A third one too.\n";
        let document = Document::from_text(body, "doc.md");
        let parsed = crate::parser::parse(body);
        let config = ChunkingConfig {
            max_chunk_size: 4,
            ..ChunkingConfig::default()
        };
        let chunks = SentenceStrategy.chunk(&document, &parsed, &empty_structure(), &config);
        assert!(chunks.len() > 1);
    }
}
