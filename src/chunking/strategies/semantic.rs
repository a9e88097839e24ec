//! Semantic strategy: packs blocks like the paragraph strategy, but cuts a
//! new chunk whenever the next block's cosine similarity to the
//! accumulated chunk drops below `semantic_threshold`, even if the size
//! budget would allow more.

use crate::chunking::similarity::cosine_similarity;
use crate::chunking::{classify_block_kind, ChunkingConfig, ChunkingStrategy, RawChunk};
use crate::datamodel::{Document, DocumentStructure};
use crate::estimator::estimate_tokens;
use crate::parser::blocks::BlockKind;
use crate::parser::ParsedDocument;

pub struct SemanticStrategy;

impl ChunkingStrategy for SemanticStrategy {
    fn chunk(&self, _document: &Document, parsed: &ParsedDocument, _structure: &DocumentStructure, config: &ChunkingConfig) -> Vec<RawChunk> {
        let candidates: Vec<_> = parsed
            .blocks
            .iter()
            .filter(|b| !matches!(b.kind, BlockKind::Heading { .. }))
            .collect();

        let mut chunks = Vec::new();
        let mut acc_content = String::new();
        let mut acc_start = 0usize;
        let mut acc_end = 0usize;
        let mut acc_has_code = false;
        let mut acc_type = crate::datamodel::ChunkType::Paragraph;

        for block in candidates {
            let is_atomic = matches!(
                block.kind,
                BlockKind::CodeFence { .. } | BlockKind::IndentedCode | BlockKind::List { .. } | BlockKind::Table | BlockKind::BlockQuote
            );

            if acc_content.is_empty() {
                acc_content = block.content.clone();
                acc_start = block.line_start;
                acc_end = block.line_end;
                acc_has_code = matches!(block.kind, BlockKind::CodeFence { .. } | BlockKind::IndentedCode);
                acc_type = classify_block_kind(&block.kind);
                continue;
            }

            let similarity = cosine_similarity(&acc_content, &block.content);
            let candidate = format!("{acc_content}\n\n{}", block.content);
            let fits = estimate_tokens(&candidate) <= config.max_chunk_size;

            if !is_atomic && fits && similarity >= config.semantic_threshold {
                acc_content = candidate;
                acc_end = block.line_end;
                continue;
            }

            chunks.push(RawChunk {
                content: std::mem::take(&mut acc_content),
                chunk_type: acc_type,
                start_line: acc_start,
                end_line: acc_end,
                has_code: acc_has_code,
            });
            acc_content = block.content.clone();
            acc_start = block.line_start;
            acc_end = block.line_end;
            acc_has_code = matches!(block.kind, BlockKind::CodeFence { .. } | BlockKind::IndentedCode);
            acc_type = classify_block_kind(&block.kind);
        }

        if !acc_content.trim().is_empty() {
            chunks.push(RawChunk {
                content: acc_content,
                chunk_type: acc_type,
                start_line: acc_start,
                end_line: acc_end,
                has_code: acc_has_code,
            });
        }
        chunks
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
    fn similar_paragraphs_merge() {
        let body = "rust programming language basics\n\nrust programming language generics\n";
        let document = Document::from_text(body, "doc.md");
        let parsed = crate::parser::parse(body);
        let config = ChunkingConfig {
            max_chunk_size: 1000,
            semantic_threshold: 0.1,
            ..ChunkingConfig::default()
        };
        let chunks = SemanticStrategy.chunk(&document, &parsed, &empty_structure(), &config);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn dissimilar_paragraphs_split() {
        let body = "rust systems programming language\n\nbananas apples oranges fruit salad\n";
        let document = Document::from_text(body, "doc.md");
        let parsed = crate::parser::parse(body);
        let config = ChunkingConfig {
            max_chunk_size: 1000,
            semantic_threshold: 0.5,
            ..ChunkingConfig::default()
        };
        let chunks = SemanticStrategy.chunk(&document, &parsed, &empty_structure(), &config);
        assert_eq!(chunks.len(), 2);
    }
}
