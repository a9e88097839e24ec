//! Output rendering (markdown, JSON, text) for a chunked document.

use std::collections::HashMap;

use anyhow::Result;

use crate::datamodel::DocumentChunk;
use crate::metadata::DocumentMetadata;

/// Render chunks as Markdown, one section per chunk with its hierarchy,
/// size, and (if enrichment ran) generated context noted.
pub fn to_markdown(chunks: &[DocumentChunk], metadata: &DocumentMetadata, contexts: &HashMap<String, String>) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", metadata.title.as_deref().unwrap_or("Untitled")));

    for (index, chunk) in chunks.iter().enumerate() {
        if index > 0 {
            output.push_str("\n---\n\n");
        }
        output.push_str(&format!("## Chunk {} of {}\n", index + 1, chunk.metadata.total_chunks));
        if !chunk.metadata.section_hierarchy.is_empty() {
            output.push_str(&format!("Context: {}\n", chunk.metadata.section_hierarchy.join(" > ")));
        }
        output.push_str(&format!("Words: {}\n", chunk.metadata.word_count));
        if let Some(context) = contexts.get(&chunk.id) {
            output.push_str(&format!("Enrichment: {context}\n"));
        }
        output.push('\n');
        output.push_str(&chunk.content);
        output.push('\n');
    }

    output
}

/// Render chunks, document metadata, and any generated enrichment contexts
/// as a single JSON object.
pub fn to_json(chunks: &[DocumentChunk], metadata: &DocumentMetadata, contexts: &HashMap<String, String>) -> Result<String> {
    let payload = serde_json::json!({
        "metadata": metadata,
        "chunks": chunks,
        "contexts": contexts,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Render chunk content only, separated by blank lines.
pub fn to_text(chunks: &[DocumentChunk], metadata: &DocumentMetadata) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n\n", metadata.title.as_deref().unwrap_or("Untitled")));

    for chunk in chunks {
        output.push_str(&chunk.content);
        output.push_str("\n\n");
    }

    output
}
