//! Orchestration: walks input paths, runs the chunking + optional
//! enrichment pipeline per file, and writes rendered output.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::chunking::ChunkingConfig;
use crate::cli::args::{CliArgs, OutputFormat};
use crate::cli::output;
use crate::datamodel::DocumentChunk;
use crate::enrichment::{CancellationFlag, EnrichmentConfig, EnrichmentPipeline, MockProvider};
use crate::metadata::DocumentMetadata;

/// A single file to process.
#[derive(Debug)]
struct Job {
    input_path: PathBuf,
    output_path: PathBuf,
}

/// Batch-processing tallies, reported at the end of a directory run.
#[derive(Debug, Default)]
struct BatchProgress {
    total: usize,
    successful: usize,
    failed: usize,
}

pub struct Runner {
    args: CliArgs,
}

impl Runner {
    pub fn new(args: CliArgs) -> Self {
        Self { args }
    }

    pub async fn run(&self) -> Result<()> {
        if !self.args.input.exists() {
            anyhow::bail!("Input path does not exist: {:?}", self.args.input);
        }

        if self.args.input.is_dir() {
            self.run_batch().await
        } else {
            self.run_single().await
        }
    }

    async fn run_single(&self) -> Result<()> {
        let input_path = self.args.input.clone();
        let output_path = self.output_path_for(&input_path)?;

        if self.args.verbose {
            eprintln!("Chunking {input_path:?} to {output_path:?}");
        }

        let job = Job { input_path: input_path.clone(), output_path };
        self.process(&job).await?;

        if !self.args.quiet {
            if let Some(filename) = input_path.file_name() {
                println!("{}", filename.to_string_lossy());
            }
        }
        Ok(())
    }

    async fn run_batch(&self) -> Result<()> {
        let jobs = self.collect_jobs(&self.args.input)?;
        if jobs.is_empty() {
            anyhow::bail!("No supported files found in directory");
        }

        let mut progress = BatchProgress { total: jobs.len(), ..Default::default() };
        if !self.args.quiet && self.args.verbose {
            eprintln!("Processing {} files...", jobs.len());
        }

        for job in jobs {
            match self.process(&job).await {
                Ok(()) => {
                    progress.successful += 1;
                    if !self.args.quiet {
                        if let Some(filename) = job.input_path.file_name() {
                            println!("{}", filename.to_string_lossy());
                        }
                    }
                }
                Err(err) => {
                    progress.failed += 1;
                    if !self.args.quiet {
                        eprintln!("{}: {err}", job.input_path.display());
                    }
                    if self.args.abort_on_error {
                        anyhow::bail!("Aborting due to error");
                    }
                }
            }
        }

        if progress.failed > 0 && !self.args.continue_on_error {
            anyhow::bail!("{} of {} files failed", progress.failed, progress.total);
        }
        Ok(())
    }

    async fn process(&self, job: &Job) -> Result<()> {
        let bytes = fs::read(&job.input_path)
            .with_context(|| format!("Failed to read {:?}", job.input_path))?;
        let path = job.input_path.to_string_lossy().into_owned();

        let config = ChunkingConfig {
            max_chunk_size: self.args.max_chunk_size,
            min_chunk_size: self.args.min_chunk_size,
            overlap_size: self.args.overlap_size,
            semantic_threshold: self.args.semantic_threshold,
            strategy: self.args.strategy.to_chunking_kind(),
        };

        let (_structure, chunks, metadata) =
            crate::pipeline::process_document(&bytes, &path, &config).with_context(|| format!("Failed to chunk {:?}", job.input_path))?;

        let contexts = if self.args.enrich {
            self.enrich(&path, &chunks).await?
        } else {
            HashMap::new()
        };

        let rendered = self.render(&chunks, &metadata, &contexts)?;

        if let Some(parent) = job.output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create output directory: {parent:?}"))?;
        }
        fs::write(&job.output_path, rendered)
            .with_context(|| format!("Unable to write output file: {:?}", job.output_path))?;

        Ok(())
    }

    async fn enrich(&self, path: &str, chunks: &[DocumentChunk]) -> Result<HashMap<String, String>> {
        let config = EnrichmentConfig {
            max_concurrent_requests: self.args.max_concurrent_requests,
            cache_dir: self.args.cache_dir.clone(),
            ..EnrichmentConfig::default()
        };
        let pipeline = EnrichmentPipeline::new(MockProvider, config)?;
        let mut metrics = crate::datamodel::ProcessingMetrics::new(chunks.len());
        let cancellation = CancellationFlag::new();

        let bar = (!self.args.quiet).then(|| {
            let bar = ProgressBar::new(chunks.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("{bar:40} {pos}/{len} chunks enriched")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        });

        let results = pipeline
            .enrich_batch(path, chunks, None, &cancellation, &mut metrics, |processed, total| {
                if let Some(bar) = &bar {
                    bar.set_position(processed as u64);
                    bar.set_length(total as u64);
                }
            })
            .await?;

        if let Some(bar) = bar {
            bar.finish_and_clear();
        }

        if self.args.verbose {
            eprintln!(
                "Enriched {} chunks ({} from cache), cost ${:.4}",
                metrics.processed_chunks, metrics.cached_chunks, metrics.total_cost
            );
        }

        Ok(chunks.iter().map(|c| c.id.clone()).zip(results).collect())
    }

    fn render(&self, chunks: &[DocumentChunk], metadata: &DocumentMetadata, contexts: &HashMap<String, String>) -> Result<String> {
        Ok(match self.args.output_format {
            OutputFormat::Markdown => output::to_markdown(chunks, metadata, contexts),
            OutputFormat::Json => output::to_json(chunks, metadata, contexts)?,
            OutputFormat::Text => output::to_text(chunks, metadata),
        })
    }

    fn output_path_for(&self, input_path: &Path) -> Result<PathBuf> {
        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid filename: {:?}", input_path))?;
        let filename = format!("{stem}.{}", self.args.output_format.extension());
        Ok(match &self.args.output_dir {
            Some(dir) => dir.join(filename),
            None => PathBuf::from(filename),
        })
    }

    fn output_path_for_batch(&self, input_path: &Path, root_dir: &Path) -> Result<PathBuf> {
        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid filename: {:?}", input_path))?;
        let filename = format!("{stem}.{}", self.args.output_format.extension());
        let rel_dir = input_path.parent().and_then(|p| p.strip_prefix(root_dir).ok()).unwrap_or_else(|| Path::new(""));
        Ok(match &self.args.output_dir {
            Some(dir) => dir.join(rel_dir).join(filename),
            None => rel_dir.join(filename),
        })
    }

    fn collect_jobs(&self, dir: &Path) -> Result<Vec<Job>> {
        let mut jobs = Vec::new();
        self.collect_jobs_recursive(dir, dir, &mut jobs)?;
        Ok(jobs)
    }

    fn collect_jobs_recursive(&self, dir: &Path, root: &Path, jobs: &mut Vec<Job>) -> Result<()> {
        for entry in fs::read_dir(dir).with_context(|| format!("Failed to read directory {dir:?}"))? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                self.collect_jobs_recursive(&path, root, jobs)?;
            } else if is_supported(&path) {
                jobs.push(Job {
                    output_path: self.output_path_for_batch(&path, root)?,
                    input_path: path,
                });
            }
        }
        Ok(())
    }
}

fn is_supported(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(),
        Some("md") | Some("markdown")
    )
}
