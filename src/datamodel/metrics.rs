use serde::{Deserialize, Serialize};

/// Per-batch accounting for an enrichment run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingMetrics {
    pub total_chunks: usize,
    pub processed_chunks: usize,
    pub cached_chunks: usize,
    pub total_tokens_input: u64,
    pub total_tokens_output: u64,
    pub total_cost: f64,
    pub processing_time_seconds: f64,
    pub errors: Vec<String>,
}

impl ProcessingMetrics {
    pub fn new(total_chunks: usize) -> Self {
        Self {
            total_chunks,
            ..Self::default()
        }
    }

    /// Record a successful LLM call's token usage and accumulate cost.
    pub fn add_usage(&mut self, input_tokens: u64, output_tokens: u64, price_in: f64, price_out: f64) {
        self.total_tokens_input += input_tokens;
        self.total_tokens_output += output_tokens;
        self.total_cost += (input_tokens as f64) * price_in / 1_000_000.0
            + (output_tokens as f64) * price_out / 1_000_000.0;
    }
}
