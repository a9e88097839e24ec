//! Chunk Optimizer & Strategies (component D).

pub mod balance;
pub mod similarity;
pub mod strategies;
pub mod text_spans;

use serde::{Deserialize, Serialize};

use crate::datamodel::{ChunkMetadata, ChunkType, Document, DocumentChunk, DocumentStructure};
use crate::error::{ChunkingError, CoreError, Result};
use crate::parser::ParsedDocument;
use crate::section;

/// Which of the five chunking strategies to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkingStrategyKind {
    Fixed,
    Sentence,
    Paragraph,
    Semantic,
    Hybrid,
}

impl Default for ChunkingStrategyKind {
    fn default() -> Self {
        ChunkingStrategyKind::Hybrid
    }
}

/// Explicit chunking configuration (all sizes in estimated tokens).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub max_chunk_size: u32,
    pub min_chunk_size: u32,
    pub overlap_size: u32,
    /// Cosine-similarity floor in `[0, 1]` used both as the semantic
    /// strategy's boundary-candidate threshold and the coherence-
    /// adjustment floor. Not specified numerically upstream; this
    /// implementation documents 0.35 as its default.
    pub semantic_threshold: f64,
    pub strategy: ChunkingStrategyKind,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 512,
            min_chunk_size: 64,
            overlap_size: 32,
            semantic_threshold: 0.35,
            strategy: ChunkingStrategyKind::default(),
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size == 0 || self.min_chunk_size > self.max_chunk_size {
            return Err(CoreError::Chunking(ChunkingError::InvalidSizeConfig {
                max: self.max_chunk_size,
                min: self.min_chunk_size,
            }));
        }
        if self.overlap_size >= self.max_chunk_size {
            return Err(CoreError::Chunking(ChunkingError::OverlapTooLarge {
                overlap: self.overlap_size,
                max: self.max_chunk_size,
            }));
        }
        if !(0.0..=1.0).contains(&self.semantic_threshold) {
            return Err(CoreError::Chunking(ChunkingError::InvalidThreshold {
                value: self.semantic_threshold,
            }));
        }
        Ok(())
    }
}

/// A chunk as emitted directly by a strategy, before hierarchy lookup,
/// size balancing, or overlap attachment.
#[derive(Debug, Clone)]
pub struct RawChunk {
    pub content: String,
    pub chunk_type: ChunkType,
    pub start_line: usize,
    pub end_line: usize,
    pub has_code: bool,
}

/// A chunk with its section hierarchy resolved, ready for size balancing,
/// coherence adjustment, and overlap attachment.
#[derive(Debug, Clone)]
pub struct SizedChunk {
    pub content: String,
    pub chunk_type: ChunkType,
    pub start_line: usize,
    pub end_line: usize,
    pub has_code: bool,
    pub hierarchy: Vec<String>,
}

fn attach_hierarchy(raw: Vec<RawChunk>, structure: &DocumentStructure) -> Vec<SizedChunk> {
    raw.into_iter()
        .map(|chunk| SizedChunk {
            hierarchy: section::heading_path_for_line(&structure.sections, chunk.start_line),
            content: chunk.content,
            chunk_type: chunk.chunk_type,
            start_line: chunk.start_line,
            end_line: chunk.end_line,
            has_code: chunk.has_code,
        })
        .collect()
}

/// A pluggable chunking strategy, generalizing the teacher's `BaseChunker`
/// trait (`chunk()` there, `contextualize()` folded into the enrichment
/// pipeline here instead of the chunker).
pub trait ChunkingStrategy {
    fn chunk(&self, document: &Document, parsed: &ParsedDocument, structure: &DocumentStructure, config: &ChunkingConfig) -> Vec<RawChunk>;
}

/// Configuration holder and orchestrator for the five strategies,
/// generalizing the teacher's `HybridChunkerBuilder`.
pub struct ChunkOptimizer {
    config: ChunkingConfig,
}

impl ChunkOptimizer {
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Run the configured strategy, then size-balance, coherence-adjust
    /// (semantic/hybrid only), attach overlap context, and back-patch
    /// `total_chunks`.
    pub fn optimize(&self, document: &Document, parsed: &ParsedDocument, structure: &DocumentStructure) -> Vec<DocumentChunk> {
        if parsed.body.trim().is_empty() {
            return Vec::new();
        }

        let raw = match self.config.strategy {
            ChunkingStrategyKind::Fixed => strategies::fixed::FixedStrategy.chunk(document, parsed, structure, &self.config),
            ChunkingStrategyKind::Sentence => strategies::sentence::SentenceStrategy.chunk(document, parsed, structure, &self.config),
            ChunkingStrategyKind::Paragraph => strategies::paragraph::ParagraphStrategy.chunk(document, parsed, structure, &self.config),
            ChunkingStrategyKind::Semantic => strategies::semantic::SemanticStrategy.chunk(document, parsed, structure, &self.config),
            ChunkingStrategyKind::Hybrid => strategies::hybrid::HybridStrategy.chunk(document, parsed, structure, &self.config),
        };

        let sized = attach_hierarchy(raw, structure);
        let balanced = balance::balance_sizes(sized, &self.config);
        let coherent = if matches!(self.config.strategy, ChunkingStrategyKind::Semantic | ChunkingStrategyKind::Hybrid) {
            balance::adjust_coherence(balanced, &self.config)
        } else {
            balanced
        };
        let with_overlap = balance::attach_overlap(coherent, &self.config);

        finalize(document, with_overlap)
    }
}

/// Assign ids, word counts, and back-patch `total_chunks` on the fully
/// balanced chunk sequence.
fn finalize(document: &Document, raw: Vec<(SizedChunk, Option<String>, Option<String>)>) -> Vec<DocumentChunk> {
    let total = raw.len();
    raw.into_iter()
        .enumerate()
        .map(|(index, (chunk, context_before, context_after))| {
            let word_count = chunk.content.split_whitespace().count();
            DocumentChunk {
                id: DocumentChunk::derive_id(&document.path, index),
                content: chunk.content,
                chunk_type: chunk.chunk_type,
                metadata: ChunkMetadata {
                    document_path: document.path.clone(),
                    section_hierarchy: chunk.hierarchy,
                    chunk_index: index,
                    total_chunks: total,
                    has_code: chunk.has_code,
                    language: None,
                    keywords: Vec::new(),
                    word_count,
                    line_start: chunk.start_line,
                    line_end: chunk.end_line,
                },
                embedding: None,
                context_before,
                context_after,
            }
        })
        .collect()
}

/// Classify an atomic unit's content into a chunk type, used by every
/// text-based strategy.
pub(crate) fn classify_block_kind(kind: &crate::parser::blocks::BlockKind) -> ChunkType {
    use crate::parser::blocks::BlockKind;
    match kind {
        BlockKind::Heading { .. } => ChunkType::Heading,
        BlockKind::CodeFence { .. } | BlockKind::IndentedCode => ChunkType::CodeBlock,
        BlockKind::List { .. } => ChunkType::List,
        BlockKind::Table => ChunkType::Table,
        BlockKind::BlockQuote => ChunkType::Quote,
        BlockKind::FootnoteDef { .. } | BlockKind::LinkDef { .. } => ChunkType::Metadata,
        BlockKind::Paragraph | BlockKind::HorizontalRule | BlockKind::Component { .. } => ChunkType::Paragraph,
    }
}

pub(crate) fn looks_like_code(text: &str) -> bool {
    text.contains("```") || text.contains("fn ") || text.contains("def ") || text.contains("function ") || text.contains("=>") || text.contains("::")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ChunkingConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_size_bounds() {
        let config = ChunkingConfig {
            min_chunk_size: 100,
            max_chunk_size: 10,
            ..ChunkingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_overlap_not_smaller_than_max() {
        let config = ChunkingConfig {
            max_chunk_size: 100,
            overlap_size: 100,
            ..ChunkingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let config = ChunkingConfig {
            semantic_threshold: 1.2,
            ..ChunkingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_document_yields_zero_chunks() {
        let config = ChunkingConfig::default();
        let optimizer = ChunkOptimizer::new(config).unwrap();
        let document = Document::from_text("", "empty.md");
        let parsed = crate::parser::parse("");
        let structure = crate::pipeline::build_structure(&document, &parsed);
        let chunks = optimizer.optimize(&document, &parsed, &structure);
        assert!(chunks.is_empty());
    }
}
