//! Contextual enrichment orchestration: bounded concurrency, retry with
//! backoff, cache-first lookups, cooperative cancellation, and
//! order-preserving output.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use crate::datamodel::{DocumentChunk, ProcessingMetrics};
use crate::error::{CoreError, EnrichmentError, ProviderError, Result};

use super::cache::{fingerprint, now_unix, CachedContext, ContextCache};
use super::category::classify;
use super::provider::ContextProvider;
use super::pricing::PricingConfig;
use super::templates::PromptTemplateRegistry;

/// Tunables for a single enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub max_concurrent_requests: usize,
    pub cache_dir: std::path::PathBuf,
    pub model_name: String,
    pub per_call_timeout: Duration,
    pub max_retries: u32,
    pub enable_prompt_caching: bool,
    pub pricing: PricingConfig,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 3,
            cache_dir: std::path::PathBuf::from(".chunkwright_cache"),
            model_name: "stub-model".to_string(),
            per_call_timeout: Duration::from_secs(30),
            max_retries: 3,
            enable_prompt_caching: true,
            pricing: PricingConfig::default(),
        }
    }
}

/// Cooperative cancellation flag shared between a caller and an in-flight
/// `enrich_batch` call. There is no `tokio-util` dependency in this tree;
/// a plain atomic flag is enough for the drain-and-return-partial contract.
#[derive(Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of enriching one chunk: its index in the input batch, generated
/// context, and the token usage to fold into the batch's metrics (zero for
/// a cache hit, since that accounting already happened on the first call).
struct EnrichedItem {
    index: usize,
    context: String,
    input_tokens: u64,
    output_tokens: u64,
}

pub struct EnrichmentPipeline<P: ContextProvider + 'static> {
    provider: Arc<P>,
    cache: Arc<ContextCache>,
    config: EnrichmentConfig,
    semaphore: Arc<Semaphore>,
}

impl<P: ContextProvider + 'static> EnrichmentPipeline<P> {
    /// Construct a pipeline, verifying the prompt template registry and
    /// opening the on-disk cache. Both failures are programmer errors that
    /// must refuse to start rather than fail mid-batch.
    pub fn new(provider: P, config: EnrichmentConfig) -> Result<Self> {
        PromptTemplateRegistry::verify_complete()?;
        let cache = ContextCache::open(&config.cache_dir)?;
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_requests.max(1)));
        Ok(Self {
            provider: Arc::new(provider),
            cache: Arc::new(cache),
            config,
            semaphore,
        })
    }

    /// Enrich every chunk in `chunks`, calling `on_progress(processed,
    /// total)` after each chunk settles (cache hit, success, or permanent
    /// failure). Returns a context string per chunk, in input order; a
    /// chunk left unprocessed due to cancellation maps to an empty string.
    pub async fn enrich_batch(
        &self,
        document_path: &str,
        chunks: &[DocumentChunk],
        document_context: Option<&str>,
        cancellation: &CancellationFlag,
        metrics: &mut ProcessingMetrics,
        mut on_progress: impl FnMut(usize, usize) + Send,
    ) -> Result<Vec<String>> {
        let total = chunks.len();
        let mut results: Vec<String> = vec![String::new(); total];
        let mut processed = 0usize;

        let mut join_set: JoinSet<std::result::Result<EnrichedItem, CoreError>> = JoinSet::new();

        for (index, chunk) in chunks.iter().enumerate() {
            if cancellation.is_cancelled() {
                break;
            }

            let category = classify(chunk, document_path);
            let fp = fingerprint(
                &chunk.content,
                &chunk.metadata.section_hierarchy,
                document_path,
                category,
            );

            if let Some(cached) = self.cache.get(&fp) {
                metrics.cached_chunks += 1;
                processed += 1;
                results[index] = cached.context;
                on_progress(processed, total);
                continue;
            }

            let permit = match self.semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let provider = Arc::clone(&self.provider);
            let cache = Arc::clone(&self.cache);
            let model = self.config.model_name.clone();
            let max_retries = self.config.max_retries;
            let timeout = self.config.per_call_timeout;
            let cache_hint = self.config.enable_prompt_caching.then(|| fp.clone());
            let content = chunk.content.clone();
            let hierarchy = chunk.metadata.section_hierarchy.clone();
            let document_path = document_path.to_string();
            let document_context = document_context.map(|s| s.to_string());

            join_set.spawn(async move {
                let _permit = permit;
                let template = PromptTemplateRegistry::template_for(category)?;
                let user_prompt = PromptTemplateRegistry::format_user_prompt(
                    &template,
                    &document_path,
                    &hierarchy,
                    document_context.as_deref(),
                    &content,
                );

                let response = call_with_retry(
                    provider.as_ref(),
                    template.system_prompt,
                    &user_prompt,
                    &model,
                    cache_hint.as_deref(),
                    max_retries,
                    timeout,
                )
                .await?;

                let entry = CachedContext {
                    fingerprint: fp.clone(),
                    category,
                    context: response.context.clone(),
                    created_at_unix: now_unix(),
                };
                cache.put(entry).await?;

                Ok(EnrichedItem {
                    index,
                    context: response.context,
                    input_tokens: response.input_tokens,
                    output_tokens: response.output_tokens,
                })
            });
        }

        while let Some(joined) = join_set.join_next().await {
            let outcome = match joined {
                Ok(inner) => inner,
                Err(join_err) => {
                    warn!("enrichment task panicked: {join_err}");
                    continue;
                }
            };
            match outcome {
                Ok(item) => {
                    processed += 1;
                    results[item.index] = item.context;
                    metrics.add_usage(
                        item.input_tokens,
                        item.output_tokens,
                        self.config.pricing.price_per_million_input,
                        self.config.pricing.price_per_million_output,
                    );
                    on_progress(processed, total);
                }
                Err(CoreError::Enrichment(EnrichmentError::Permanent { message })) => {
                    return Err(CoreError::Enrichment(EnrichmentError::Permanent { message }));
                }
                Err(err) => {
                    warn!("enrichment task failed: {err}");
                    processed += 1;
                    on_progress(processed, total);
                }
            }
        }

        if cancellation.is_cancelled() && processed < total {
            metrics.errors.push(
                EnrichmentError::Cancelled {
                    completed: processed,
                    total,
                }
                .to_string(),
            );
        }
        metrics.processed_chunks = processed;

        Ok(results)
    }
}

/// A provider call's outcome translated into cache-ready context plus usage,
/// distinct from `ProviderResponse` so retry bookkeeping stays local to
/// this module.
struct RetriedResponse {
    context: String,
    input_tokens: u64,
    output_tokens: u64,
}

async fn call_with_retry(
    provider: &(impl ContextProvider + ?Sized),
    system_prompt: &str,
    user_prompt: &str,
    model: &str,
    cache_hint: Option<&str>,
    max_retries: u32,
    per_call_timeout: Duration,
) -> std::result::Result<RetriedResponse, CoreError> {
    let mut attempt = 0u32;
    loop {
        let call = tokio::time::timeout(
            per_call_timeout,
            provider.generate(system_prompt, user_prompt, model, cache_hint),
        )
        .await;

        let result = match call {
            Ok(inner) => inner,
            Err(_) => Err(ProviderError::Transient("call timed out".to_string())),
        };

        match result {
            Ok(response) => {
                return Ok(RetriedResponse {
                    context: response.text,
                    input_tokens: response.input_tokens,
                    output_tokens: response.output_tokens,
                })
            }
            Err(ProviderError::Permanent(message)) => {
                return Err(CoreError::Enrichment(EnrichmentError::Permanent { message }))
            }
            Err(ProviderError::Cancelled) => {
                return Err(CoreError::Enrichment(EnrichmentError::Cancelled {
                    completed: 0,
                    total: 0,
                }))
            }
            Err(ProviderError::Transient(message)) => {
                attempt += 1;
                if attempt > max_retries {
                    return Err(CoreError::Enrichment(EnrichmentError::Permanent {
                        message: format!("exhausted retries after transient error: {message}"),
                    }));
                }
                let backoff = Duration::from_millis(50 * 2u64.pow(attempt.min(6)));
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::{ChunkMetadata, ChunkType};
    use crate::enrichment::provider::MockProvider;
    use std::sync::atomic::AtomicUsize;

    fn chunk(index: usize, content: &str) -> DocumentChunk {
        DocumentChunk {
            id: format!("{index:016x}"),
            content: content.to_string(),
            chunk_type: ChunkType::Paragraph,
            metadata: ChunkMetadata {
                document_path: "doc.md".to_string(),
                section_hierarchy: vec!["Intro".to_string()],
                chunk_index: index,
                total_chunks: 1,
                has_code: false,
                language: None,
                keywords: vec![],
                word_count: content.split_whitespace().count(),
                line_start: 1,
                line_end: 1,
            },
            embedding: None,
            context_before: None,
            context_after: None,
        }
    }

    fn test_config(dir: &std::path::Path) -> EnrichmentConfig {
        EnrichmentConfig {
            max_concurrent_requests: 3,
            cache_dir: dir.to_path_buf(),
            model_name: "mock".to_string(),
            per_call_timeout: Duration::from_secs(5),
            max_retries: 1,
            enable_prompt_caching: true,
            pricing: PricingConfig::default(),
        }
    }

    #[tokio::test]
    async fn cache_hit_is_deterministic_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = EnrichmentPipeline::new(MockProvider, test_config(dir.path())).unwrap();
        let chunks = vec![chunk(0, "hello world")];
        let mut metrics = ProcessingMetrics::new(1);

        let first = pipeline
            .enrich_batch("doc.md", &chunks, None, &CancellationFlag::new(), &mut metrics, |_, _| {})
            .await
            .unwrap();

        let mut metrics2 = ProcessingMetrics::new(1);
        let second = pipeline
            .enrich_batch("doc.md", &chunks, None, &CancellationFlag::new(), &mut metrics2, |_, _| {})
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(metrics2.cached_chunks, 1);
    }

    #[tokio::test]
    async fn concurrency_is_bounded_for_large_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.max_concurrent_requests = 3;
        let pipeline = EnrichmentPipeline::new(MockProvider, config).unwrap();

        let chunks: Vec<_> = (0..50).map(|i| chunk(i, &format!("chunk number {i}"))).collect();
        let mut metrics = ProcessingMetrics::new(50);
        let progress_count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&progress_count);

        let results = pipeline
            .enrich_batch("doc.md", &chunks, None, &CancellationFlag::new(), &mut metrics, move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 50);
        assert!(results.iter().all(|r| !r.is_empty()));
        assert_eq!(progress_count.load(Ordering::SeqCst), 50);
    }

    #[tokio::test]
    async fn cancellation_after_first_chunk_yields_partial_results() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = EnrichmentPipeline::new(MockProvider, test_config(dir.path())).unwrap();
        let chunks: Vec<_> = (0..10).map(|i| chunk(i, &format!("chunk {i}"))).collect();
        let mut metrics = ProcessingMetrics::new(10);
        let cancellation = CancellationFlag::new();

        let cancel_clone = cancellation.clone();
        let results = pipeline
            .enrich_batch("doc.md", &chunks, None, &cancellation, &mut metrics, move |processed, _| {
                if processed >= 1 {
                    cancel_clone.cancel();
                }
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 10);
        assert!(results.iter().any(|r| !r.is_empty()));
    }
}
