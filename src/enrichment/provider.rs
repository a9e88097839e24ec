//! The `ContextProvider` transport seam: an injected, implementation-
//! neutral LLM call, plus a deterministic mock used in tests and as the
//! default when no real provider is configured.

use async_trait::async_trait;

use crate::error::ProviderError;

/// A single provider call's result: generated text plus its token usage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Implementation-neutral context provider. Errors are typed per the
/// transient/permanent/cancelled taxonomy so callers can decide whether to
/// retry.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        cache_hint: Option<&str>,
    ) -> Result<ProviderResponse, ProviderError>;
}

/// Deterministic stub provider: returns a stub context built from the
/// user prompt's length, with no network calls. Used by tests and as the
/// default when no real provider is wired in.
pub struct MockProvider;

#[async_trait]
impl ContextProvider for MockProvider {
    async fn generate(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
        _model: &str,
        _cache_hint: Option<&str>,
    ) -> Result<ProviderResponse, ProviderError> {
        let input_tokens = crate::estimator::estimate_tokens(user_prompt) as u64;
        let text = format!("Stub context covering {} characters of input.", user_prompt.len());
        let output_tokens = crate::estimator::estimate_tokens(&text) as u64;
        Ok(ProviderResponse {
            text,
            input_tokens,
            output_tokens,
        })
    }
}
