//! Pure, deterministic `DocumentCategory` classification for a chunk,
//! layering extension, path tokens, chunk-type, and content heuristics.

use crate::datamodel::{ChunkType, DocumentCategory, DocumentChunk};

/// Classify a chunk's document category using, in order: (1) file
/// extension, (2) path name tokens, (3) chunk-type signals, (4) content
/// heuristics.
pub fn classify(chunk: &DocumentChunk, path: &str) -> DocumentCategory {
    if let Some(category) = from_extension(path) {
        return category;
    }
    if let Some(category) = from_path_tokens(path) {
        return category;
    }
    if matches!(chunk.chunk_type, ChunkType::CodeBlock) {
        return DocumentCategory::Code;
    }
    if let Some(category) = from_content(&chunk.content) {
        return category;
    }
    DocumentCategory::General
}

fn extension(path: &str) -> String {
    path.rsplit('.').next().unwrap_or("").to_ascii_lowercase()
}

fn from_extension(path: &str) -> Option<DocumentCategory> {
    match extension(path).as_str() {
        "py" | "js" | "ts" | "rs" | "go" | "java" | "c" | "cpp" => Some(DocumentCategory::Code),
        "yaml" | "yml" | "toml" | "ini" | "cfg" | "conf" => Some(DocumentCategory::Configuration),
        _ => None,
    }
}

fn from_path_tokens(path: &str) -> Option<DocumentCategory> {
    let lower = path.to_ascii_lowercase();
    if lower.contains("tutorial") || lower.contains("guide") || lower.contains("getting-started") {
        Some(DocumentCategory::Tutorial)
    } else if lower.contains("config") || lower.contains("settings") {
        Some(DocumentCategory::Configuration)
    } else if lower.contains("reference") || lower.contains("api") {
        Some(DocumentCategory::Reference)
    } else if lower.contains("readme") || lower.contains("docs") || lower.contains("doc/") {
        Some(DocumentCategory::Documentation)
    } else {
        None
    }
}

fn from_content(content: &str) -> Option<DocumentCategory> {
    let lower = content.to_ascii_lowercase();
    if lower.contains("to install") || lower.contains("step 1") || lower.contains("follow these steps") {
        Some(DocumentCategory::Tutorial)
    } else if lower.contains("parameters:") || lower.contains("returns:") {
        Some(DocumentCategory::Reference)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::ChunkMetadata;

    fn chunk_with(content: &str, chunk_type: ChunkType) -> DocumentChunk {
        DocumentChunk {
            id: "0000000000000000".to_string(),
            content: content.to_string(),
            chunk_type,
            metadata: ChunkMetadata {
                document_path: "doc.md".to_string(),
                section_hierarchy: vec![],
                chunk_index: 0,
                total_chunks: 1,
                has_code: false,
                language: None,
                keywords: vec![],
                word_count: 1,
                line_start: 1,
                line_end: 1,
            },
            embedding: None,
            context_before: None,
            context_after: None,
        }
    }

    #[test]
    fn extension_wins_for_code() {
        let chunk = chunk_with("print('hi')", ChunkType::Paragraph);
        assert_eq!(classify(&chunk, "scripts/run.py"), DocumentCategory::Code);
    }

    #[test]
    fn path_tokens_detect_tutorial() {
        let chunk = chunk_with("intro text", ChunkType::Paragraph);
        assert_eq!(classify(&chunk, "docs/getting-started.md"), DocumentCategory::Tutorial);
    }

    #[test]
    fn code_block_type_wins_when_path_is_ambiguous() {
        let chunk = chunk_with("fn main() {}", ChunkType::CodeBlock);
        assert_eq!(classify(&chunk, "notes.md"), DocumentCategory::Code);
    }

    #[test]
    fn content_heuristic_detects_tutorial() {
        let chunk = chunk_with("To install this package, follow these steps.", ChunkType::Paragraph);
        assert_eq!(classify(&chunk, "notes.md"), DocumentCategory::Tutorial);
    }

    #[test]
    fn falls_back_to_general() {
        let chunk = chunk_with("just some prose", ChunkType::Paragraph);
        assert_eq!(classify(&chunk, "notes.md"), DocumentCategory::General);
    }
}
