//! Hybrid chunking over a Markdown document with default size bounds.
//!
//! Run with: cargo run --example hybrid_chunking

use chunkwright::chunking::ChunkingConfig;
use chunkwright::pipeline::process_document;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Hybrid Chunking Example ===\n");

    let text = r#"# Machine Learning Basics

Machine learning is a subset of artificial intelligence that enables systems to learn and improve from experience without being explicitly programmed.

## Supervised Learning

Supervised learning uses labeled training data to learn the mapping between input features and output labels. Common algorithms include linear regression, logistic regression, decision trees, and neural networks.

## Unsupervised Learning

Unsupervised learning discovers patterns in unlabeled data. Popular techniques include clustering algorithms like K-means, hierarchical clustering, and dimensionality reduction methods like PCA.
"#;

    let config = ChunkingConfig {
        max_chunk_size: 80,
        ..ChunkingConfig::default()
    };

    let (structure, chunks, metadata) = process_document(text.as_bytes(), "ml_basics.md", &config)?;

    println!("Title: {:?}", structure.title.or(metadata.title));
    println!("Sections: {}\n", structure.sections.len());
    println!("Generated {} chunks\n", chunks.len());

    for chunk in &chunks {
        println!("Chunk {} of {}", chunk.metadata.chunk_index + 1, chunk.metadata.total_chunks);
        println!("  Headings: {:?}", chunk.metadata.section_hierarchy);
        println!("  Words: {}", chunk.metadata.word_count);
        let preview = chunk.content.chars().take(60).collect::<String>().replace('\n', " ");
        println!("  Preview: {preview}...\n");
    }

    Ok(())
}
