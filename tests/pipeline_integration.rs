//! End-to-end integration tests covering the full parse -> structure ->
//! chunk -> metadata pipeline on realistic documents.

use chunkwright::chunking::ChunkingConfig;
use chunkwright::pipeline::process_document;

#[test]
fn front_matter_is_stripped_and_used_for_title() {
    let text = "---\ntitle: Quarterly Report\nauthor: Ada Lovelace\n---\n# Body Heading\n\nContent goes here.\n";
    let config = ChunkingConfig::default();
    let (structure, chunks, metadata) = process_document(text.as_bytes(), "report.md", &config).unwrap();

    assert_eq!(structure.title.as_deref(), Some("Quarterly Report"));
    assert_eq!(metadata.title.as_deref(), Some("Quarterly Report"));
    assert_eq!(metadata.author.as_deref(), Some("Ada Lovelace"));
    assert!(chunks.iter().all(|c| !c.content.contains("title: Quarterly Report")));
}

#[test]
fn unclosed_code_fence_does_not_panic_and_still_chunks() {
    let text = "# Notes\n\nSome text before a fence.\n\n```python\ndef f():\n    return 1\n";
    let config = ChunkingConfig::default();
    let (_, chunks, metadata) = process_document(text.as_bytes(), "notes.md", &config).unwrap();

    assert!(!chunks.is_empty());
    assert!(chunks
        .iter()
        .any(|c| c.metadata.has_code || matches!(c.chunk_type, chunkwright::ChunkType::CodeBlock)));
    assert_eq!(metadata.language, "python");
}

#[test]
fn hybrid_strategy_keeps_chunks_within_section_boundaries() {
    let text = "# A\n\nIntro to A.\n\n## B\n\nDetail about B that is reasonably short.\n\n# C\n\nUnrelated section C.\n";
    let config = ChunkingConfig::default();
    let (_, chunks, _) = process_document(text.as_bytes(), "doc.md", &config).unwrap();

    assert!(chunks.iter().any(|c| c.metadata.section_hierarchy == vec!["A".to_string()]));
    assert!(chunks
        .iter()
        .any(|c| c.metadata.section_hierarchy == vec!["A".to_string(), "B".to_string()]));
    assert!(chunks.iter().any(|c| c.metadata.section_hierarchy == vec!["C".to_string()]));
}

#[test]
fn empty_document_yields_no_chunks_end_to_end() {
    let config = ChunkingConfig::default();
    let (_, chunks, _) = process_document(b"", "empty.md", &config).unwrap();
    assert!(chunks.is_empty());
}

#[test]
fn invalid_config_is_rejected_before_chunking() {
    let config = ChunkingConfig {
        max_chunk_size: 10,
        min_chunk_size: 100,
        ..ChunkingConfig::default()
    };
    let result = process_document(b"# H\n\nbody\n", "doc.md", &config);
    assert!(result.is_err());
}
