//! Contextual enrichment: classifies each chunk, fetches (or generates and
//! caches) a short paragraph situating it within its document, and tracks
//! token/cost metrics for the batch.

pub mod cache;
pub mod category;
pub mod pipeline;
pub mod pricing;
pub mod provider;
pub mod templates;

pub use cache::{CachedContext, ContextCache};
pub use category::classify;
pub use pipeline::{CancellationFlag, EnrichmentConfig, EnrichmentPipeline};
pub use pricing::PricingConfig;
pub use provider::{ContextProvider, MockProvider, ProviderResponse};
pub use templates::{PromptTemplate, PromptTemplateRegistry};
