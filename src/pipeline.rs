//! Top-level orchestration wiring the structural parser, section
//! extractor, chunk optimizer, metadata extractor, and enrichment pipeline
//! into the two public library operations.

use std::collections::HashMap;

use crate::chunking::{ChunkOptimizer, ChunkingConfig};
use crate::datamodel::{Document, DocumentChunk, DocumentStructure, ProcessingMetrics};
use crate::enrichment::{CancellationFlag, EnrichmentConfig, EnrichmentPipeline, MockProvider};
use crate::error::Result;
use crate::metadata::{DocumentMetadata, MetadataExtractor};
use crate::parser::{self, ParsedDocument};
use crate::section;

/// Build a document's structural outline: front-matter-resolved title,
/// section arena, cross-references, and feature usage.
pub fn build_structure(document: &Document, parsed: &ParsedDocument) -> DocumentStructure {
    let title_hint = parsed.front_matter.get_str("title");
    let sections = section::extract_sections(&parsed.body, &parsed.blocks, title_hint, document.filename_stem());

    DocumentStructure {
        title: title_hint.map(|t| t.to_string()),
        sections,
        metadata: parsed.front_matter.fields.clone(),
        root: 0,
        cross_references: parsed.cross_references.clone(),
        features: Some(parsed.features.clone()),
    }
}

/// Parse, extract structure, chunk, and extract document/chunk metadata for
/// one document. This is the primary entry point for callers that only
/// need chunking, not enrichment.
pub fn process_document(
    bytes: &[u8],
    path: &str,
    config: &ChunkingConfig,
) -> Result<(DocumentStructure, Vec<DocumentChunk>, DocumentMetadata)> {
    let document = Document::from_bytes(bytes, path);
    let parsed = parser::parse(&document.text);
    let structure = build_structure(&document, &parsed);

    let optimizer = ChunkOptimizer::new(config.clone())?;
    let mut chunks = optimizer.optimize(&document, &parsed, &structure);

    let filesystem = crate::metadata::filesystem::OsFileSystem;
    let extractor = MetadataExtractor::new(&filesystem);
    let metadata = extractor.extract(&document, &parsed);
    crate::metadata::apply_document_metadata(&mut chunks, &metadata);

    Ok((structure, chunks, metadata))
}

/// Enrich a batch of chunks with contextual paragraphs, returning a
/// chunk-id -> context mapping. Uses the deterministic mock provider; a
/// real deployment injects its own `ContextProvider`.
pub async fn enrich(
    document_path: &str,
    chunks: Vec<DocumentChunk>,
    document_context: Option<&str>,
    config: &EnrichmentConfig,
) -> Result<(HashMap<String, String>, ProcessingMetrics)> {
    let pipeline = EnrichmentPipeline::new(MockProvider, config.clone())?;
    let mut metrics = ProcessingMetrics::new(chunks.len());
    let cancellation = CancellationFlag::new();

    let contexts = pipeline
        .enrich_batch(document_path, &chunks, document_context, &cancellation, &mut metrics, |_, _| {})
        .await?;

    let mapping = chunks
        .iter()
        .zip(contexts.into_iter())
        .map(|(chunk, context)| (chunk.id.clone(), context))
        .collect();

    Ok((mapping, metrics))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_document_chunks_a_simple_markdown_file() {
        let text = "# Title\n\nSome intro text about the project.\n\n## Details\n\nMore detail here.\n";
        let config = ChunkingConfig::default();
        let (structure, chunks, metadata) = process_document(text.as_bytes(), "doc.md", &config).unwrap();

        assert_eq!(structure.title.as_deref(), None);
        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| c.metadata.document_path == "doc.md" && c.metadata.language.is_some()));
        assert_eq!(metadata.title.as_deref(), Some("# Title"));
    }

    #[tokio::test]
    async fn enrich_returns_a_context_per_chunk() {
        let text = "# Title\n\nSome intro text about the project.\n";
        let config = ChunkingConfig::default();
        let (_, chunks, _) = process_document(text.as_bytes(), "doc.md", &config).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut enrich_config = EnrichmentConfig::default();
        enrich_config.cache_dir = dir.path().to_path_buf();

        let (mapping, metrics) = enrich("doc.md", chunks.clone(), None, &enrich_config).await.unwrap();
        assert_eq!(mapping.len(), chunks.len());
        assert_eq!(metrics.processed_chunks, chunks.len());
    }
}
