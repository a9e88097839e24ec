//! Chunkwright: a document indexing and semantic chunking engine.
//!
//! Parses Markdown-family documents into a section outline, splits them
//! into retrieval-sized chunks under a choice of five strategies, extracts
//! per-document and per-chunk metadata, and optionally enriches chunks with
//! contextual paragraphs from an injected LLM provider.
//!
//! # Example
//!
//! ```ignore
//! use chunkwright::chunking::ChunkingConfig;
//! use chunkwright::pipeline::process_document;
//!
//! let (structure, chunks, metadata) = process_document(b"# Title\n\nBody.\n", "doc.md", &ChunkingConfig::default())?;
//! ```

pub mod chunking;
pub mod cli;
pub mod datamodel;
pub mod enrichment;
pub mod error;
pub mod estimator;
pub mod metadata;
pub mod parser;
pub mod pipeline;
pub mod section;

pub use datamodel::{ChunkMetadata, ChunkType, Document, DocumentCategory, DocumentChunk, DocumentStructure, ProcessingMetrics};
pub use error::{ChunkingError, CoreError, EnrichmentError, Result};
