//! Error types for the chunking and enrichment pipeline.
//!
//! Follows the severity taxonomy of the design: recoverable-parse and
//! recoverable-metadata conditions never reach this module (callers get
//! best-effort output plus a `tracing` log line); only transient/permanent
//! external failures and programmer errors are represented here.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Top-level error for the chunking and enrichment engine.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Errors from the contextual enrichment pipeline.
    #[error("enrichment error: {0}")]
    Enrichment(#[from] EnrichmentError),

    /// Errors from the chunk optimizer.
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// Errors from cache persistence.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Invalid configuration supplied by the caller.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Chunking-specific errors.
///
/// Most chunking conditions (over-size atomic units, empty documents) are
/// not errors by contract; this enum exists for configuration validation.
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// `max_chunk_size` was zero or smaller than `min_chunk_size`.
    #[error("invalid chunk size configuration: max={max}, min={min}")]
    InvalidSizeConfig {
        /// Configured maximum chunk size.
        max: u32,
        /// Configured minimum chunk size.
        min: u32,
    },

    /// `overlap_size` is not smaller than `max_chunk_size`.
    #[error("overlap {overlap} must be less than max_chunk_size {max}")]
    OverlapTooLarge {
        /// Configured overlap size.
        overlap: u32,
        /// Configured maximum chunk size.
        max: u32,
    },

    /// `semantic_threshold` fell outside `[0, 1]`.
    #[error("semantic_threshold {value} must be within [0, 1]")]
    InvalidThreshold {
        /// The out-of-range value supplied.
        value: f64,
    },
}

/// Errors surfaced by the contextual enrichment pipeline.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// A declared `DocumentCategory` has no registered prompt template.
    ///
    /// Programmer error: surfaced at `EnrichmentPipeline::new`, never mid-batch.
    #[error("no prompt template registered for category {category:?}")]
    MissingTemplate {
        /// The category missing a template.
        category: crate::datamodel::DocumentCategory,
    },

    /// The cache directory could not be created or is not writable.
    ///
    /// Programmer error: surfaced at `EnrichmentPipeline::new`.
    #[error("cache directory {path} is not writable: {reason}")]
    CacheDirUnwritable {
        /// The offending path.
        path: String,
        /// Underlying I/O reason.
        reason: String,
    },

    /// Permanent external failure (auth, malformed prompt) that aborts the
    /// whole batch, per the error-handling design.
    #[error("permanent provider failure: {message}")]
    Permanent {
        /// Description of the permanent failure.
        message: String,
    },

    /// The batch was cancelled before completion.
    #[error("enrichment batch cancelled after {completed} of {total} chunks")]
    Cancelled {
        /// Chunks that completed before cancellation.
        completed: usize,
        /// Total chunks in the batch.
        total: usize,
    },
}

/// Errors surfaced by the LLM transport (`ContextProvider`).
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// Network error, rate limit, or 5xx — retried with backoff.
    #[error("transient provider error: {0}")]
    Transient(String),

    /// Auth failure or malformed request — aborts the batch.
    #[error("permanent provider error: {0}")]
    Permanent(String),

    /// The call was cancelled before completion.
    #[error("provider call cancelled")]
    Cancelled,
}

/// Errors from the on-disk context cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// I/O failure reading, writing, or renaming a cache file.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A cache entry on disk could not be deserialized; treated as a miss
    /// by callers, but constructible for tests that need to distinguish
    /// "miss" from "corrupt".
    #[error("corrupt cache entry at {path}: {reason}")]
    Corrupt {
        /// Path of the corrupt entry.
        path: String,
        /// Deserialization failure reason.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunking_error_messages() {
        let err = ChunkingError::InvalidSizeConfig { max: 10, min: 20 };
        assert!(err.to_string().contains("max=10"));

        let err = ChunkingError::OverlapTooLarge { overlap: 50, max: 40 };
        assert!(err.to_string().contains("overlap 50"));

        let err = ChunkingError::InvalidThreshold { value: 1.5 };
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn enrichment_error_cancelled_message() {
        let err = EnrichmentError::Cancelled { completed: 3, total: 10 };
        assert_eq!(err.to_string(), "enrichment batch cancelled after 3 of 10 chunks");
    }

    #[test]
    fn core_error_from_conversions() {
        let chunk_err: CoreError = ChunkingError::InvalidThreshold { value: -1.0 }.into();
        assert!(matches!(chunk_err, CoreError::Chunking(_)));

        let enrich_err: CoreError = EnrichmentError::Permanent {
            message: "auth failed".into(),
        }
        .into();
        assert!(matches!(enrich_err, CoreError::Enrichment(_)));
    }
}
