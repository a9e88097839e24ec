//! CLI argument parsing with clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Validate a chunk size is greater than 0.
fn validate_chunk_size(s: &str) -> Result<u32, String> {
    let size: u32 = s.parse().map_err(|_| format!("invalid chunk size: {s}"))?;
    if size == 0 {
        return Err("chunk size must be greater than 0".to_string());
    }
    Ok(size)
}

/// chunkwright CLI - document indexing and semantic chunking engine.
#[derive(Parser, Debug)]
#[command(name = "chunkwright")]
#[command(about = "Chunk and enrich Markdown-family documents for retrieval", long_about = None)]
#[command(version)]
pub struct CliArgs {
    /// Input file or directory path
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output format (markdown, json, text)
    #[arg(short = 't', long = "to", value_name = "FORMAT", default_value = "json")]
    pub output_format: OutputFormat,

    /// Output directory (default: current directory)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Chunking strategy
    #[arg(long = "strategy", value_name = "STRATEGY", default_value = "hybrid")]
    pub strategy: Strategy,

    /// Maximum chunk size, in estimated tokens
    #[arg(long = "max-chunk-size", value_name = "SIZE", default_value = "512", value_parser = validate_chunk_size)]
    pub max_chunk_size: u32,

    /// Minimum chunk size before adjacent chunks are merged, in estimated tokens
    #[arg(long = "min-chunk-size", value_name = "SIZE", default_value = "64", value_parser = validate_chunk_size)]
    pub min_chunk_size: u32,

    /// Overlap carried between adjacent chunks, in estimated tokens
    #[arg(long = "overlap-size", value_name = "SIZE", default_value = "32")]
    pub overlap_size: u32,

    /// Cosine-similarity floor for the semantic strategy and coherence adjustment
    #[arg(long = "semantic-threshold", value_name = "THRESHOLD", default_value = "0.35")]
    pub semantic_threshold: f64,

    /// Run the contextual enrichment pass after chunking
    #[arg(long = "enrich")]
    pub enrich: bool,

    /// Directory for the on-disk enrichment context cache
    #[arg(long = "cache-dir", value_name = "DIR", default_value = ".chunkwright_cache")]
    pub cache_dir: PathBuf,

    /// Maximum concurrent enrichment requests
    #[arg(long = "max-concurrent-requests", value_name = "N", default_value = "3")]
    pub max_concurrent_requests: usize,

    /// Continue processing on error (batch mode)
    #[arg(long = "continue-on-error")]
    pub continue_on_error: bool,

    /// Abort on first error (batch mode)
    #[arg(long = "abort-on-error", conflicts_with = "continue_on_error")]
    pub abort_on_error: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Quiet mode (no output except errors)
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// CLI-facing chunking strategy selector, mapped onto `ChunkingStrategyKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    Fixed,
    Sentence,
    Paragraph,
    Semantic,
    Hybrid,
}

impl Strategy {
    pub fn to_chunking_kind(self) -> crate::chunking::ChunkingStrategyKind {
        use crate::chunking::ChunkingStrategyKind;
        match self {
            Self::Fixed => ChunkingStrategyKind::Fixed,
            Self::Sentence => ChunkingStrategyKind::Sentence,
            Self::Paragraph => ChunkingStrategyKind::Paragraph,
            Self::Semantic => ChunkingStrategyKind::Semantic,
            Self::Hybrid => ChunkingStrategyKind::Hybrid,
        }
    }
}

/// Output format for the rendered chunk set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}
