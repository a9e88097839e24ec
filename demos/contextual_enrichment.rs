//! Chunking followed by contextual enrichment, the shape a retrieval
//! pipeline would run before indexing chunks for embedding.
//!
//! Run with: cargo run --example contextual_enrichment

use chunkwright::chunking::ChunkingConfig;
use chunkwright::enrichment::EnrichmentConfig;
use chunkwright::pipeline::{enrich, process_document};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Contextual Enrichment Example ===\n");

    let text = "# Introduction to Rust\n\nRust is a systems programming language that runs blazingly fast, prevents segfaults, and guarantees thread safety.\n\n## Memory Safety\n\nRust achieves memory safety without garbage collection through its ownership system.\n";

    let config = ChunkingConfig::default();
    let (_, chunks, _) = process_document(text.as_bytes(), "rust_guide.md", &config)?;
    println!("Generated {} chunks\n", chunks.len());

    let cache_dir = std::env::temp_dir().join("chunkwright_demo_cache");
    let enrichment_config = EnrichmentConfig {
        cache_dir,
        ..EnrichmentConfig::default()
    };

    let (contexts, metrics) = enrich("rust_guide.md", chunks.clone(), None, &enrichment_config).await?;

    for chunk in &chunks {
        let context = contexts.get(&chunk.id).map(String::as_str).unwrap_or("");
        println!("Chunk {}: {context}", chunk.metadata.chunk_index + 1);
    }

    println!(
        "\nProcessed {} chunks ({} from cache), cost ${:.4}",
        metrics.processed_chunks, metrics.cached_chunks, metrics.total_cost
    );

    Ok(())
}
