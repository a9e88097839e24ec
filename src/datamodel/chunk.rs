use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Closed enumeration of chunk content kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkType {
    Heading,
    Paragraph,
    CodeBlock,
    List,
    Table,
    Metadata,
    Quote,
    Unknown,
}

/// Positional and descriptive metadata attached to a chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub document_path: String,
    /// Titles from root to immediate parent, inclusive of the chunk's own
    /// heading when the chunk carries one.
    pub section_hierarchy: Vec<String>,
    pub chunk_index: usize,
    /// Back-patched once the full sequence for a document is known.
    pub total_chunks: usize,
    pub has_code: bool,
    pub language: Option<String>,
    pub keywords: Vec<String>,
    pub word_count: usize,
    pub line_start: usize,
    pub line_end: usize,
}

/// A contiguous, semantically coherent slice of a document produced by the
/// chunk optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// 16 lowercase hex characters, the truncated SHA-256 digest of
    /// `"{path}:{chunk_index}"`.
    pub id: String,
    pub content: String,
    pub chunk_type: ChunkType,
    pub metadata: ChunkMetadata,
    pub embedding: Option<Vec<f32>>,
    pub context_before: Option<String>,
    pub context_after: Option<String>,
}

impl DocumentChunk {
    /// Derive the stable chunk id for a `(path, chunk_index)` pair.
    pub fn derive_id(path: &str, chunk_index: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{path}:{chunk_index}").as_bytes());
        let digest = hasher.finalize();
        hex_prefix(&digest, 8)
    }
}

/// Render the first `bytes` bytes of a digest as lowercase hex, yielding a
/// string of `bytes * 2` characters.
pub(crate) fn hex_prefix(digest: &[u8], bytes: usize) -> String {
    digest[..bytes]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_id_is_16_hex_chars() {
        let id = DocumentChunk::derive_id("/docs/readme.md", 0);
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn derive_id_is_deterministic() {
        let a = DocumentChunk::derive_id("/docs/readme.md", 3);
        let b = DocumentChunk::derive_id("/docs/readme.md", 3);
        assert_eq!(a, b);
    }

    #[test]
    fn derive_id_differs_by_index() {
        let a = DocumentChunk::derive_id("/docs/readme.md", 0);
        let b = DocumentChunk::derive_id("/docs/readme.md", 1);
        assert_ne!(a, b);
    }
}
