//! Fixed-size strategy: windows the raw body into token-budgeted chunks
//! with no structural awareness at all — the simplest of the five and the
//! fallback when a document's structure can't be trusted.

use crate::chunking::{looks_like_code, ChunkingConfig, ChunkingStrategy, RawChunk};
use crate::datamodel::{ChunkType, Document, DocumentStructure};
use crate::estimator::estimate_tokens;
use crate::parser::ParsedDocument;

pub struct FixedStrategy;

impl ChunkingStrategy for FixedStrategy {
    fn chunk(&self, _document: &Document, parsed: &ParsedDocument, _structure: &DocumentStructure, config: &ChunkingConfig) -> Vec<RawChunk> {
        let lines: Vec<&str> = parsed.body.lines().collect();
        let mut chunks = Vec::new();
        let mut start = 0usize;
        let mut acc = String::new();

        for (idx, line) in lines.iter().enumerate() {
            let candidate = if acc.is_empty() {
                line.to_string()
            } else {
                format!("{acc}\n{line}")
            };
            if !acc.is_empty() && estimate_tokens(&candidate) > config.max_chunk_size {
                chunks.push(make_chunk(&acc, start + 1, idx));
                acc = line.to_string();
                start = idx;
            } else {
                acc = candidate;
            }
        }
        if !acc.trim().is_empty() {
            chunks.push(make_chunk(&acc, start + 1, lines.len().max(start + 1)));
        }
        chunks
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::ChunkingConfig;

    #[test]
    fn windows_respect_max_chunk_size() {
        let body = "word ".repeat(500);
        let document = Document::from_text(body.clone(), "doc.md");
        let parsed = crate::parser::parse(&body);
        let structure = DocumentStructure {
            title: None,
            sections: vec![],
            metadata: Default::default(),
            root: 0,
            cross_references: vec![],
            features: None,
        };
        let config = ChunkingConfig {
            max_chunk_size: 30,
            ..ChunkingConfig::default()
        };
        let chunks = FixedStrategy.chunk(&document, &parsed, &structure, &config);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(estimate_tokens(&chunk.content) <= config.max_chunk_size || chunk.content.split_whitespace().count() <= 1);
        }
    }

    #[test]
    fn empty_body_yields_no_chunks() {
        let document = Document::from_text("", "doc.md");
        let parsed = crate::parser::parse("");
        let structure = DocumentStructure {
            title: None,
            sections: vec![],
            metadata: Default::default(),
            root: 0,
            cross_references: vec![],
            features: None,
        };
        let chunks = FixedStrategy.chunk(&document, &parsed, &structure, &ChunkingConfig::default());
        assert!(chunks.is_empty());
    }
}
