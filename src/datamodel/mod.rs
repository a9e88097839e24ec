//! Core data types shared by the parser, chunk optimizer, metadata
//! extractor, and enrichment pipeline.

mod category;
mod chunk;
mod document;
mod metrics;
mod section;
mod structure;

pub use category::DocumentCategory;
pub use chunk::{ChunkMetadata, ChunkType, DocumentChunk};
pub use document::{Document, FrontMatter};
pub use metrics::ProcessingMetrics;
pub use section::{CrossReference, Section};
pub use structure::{DocumentFeatures, DocumentStructure};
