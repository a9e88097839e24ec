use serde::{Deserialize, Serialize};

/// Closed set of document categories used to select enrichment prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentCategory {
    /// Source code files or chunks dominated by code blocks.
    Code,
    /// General-purpose documentation.
    Documentation,
    /// Step-by-step instructional content.
    Tutorial,
    /// Configuration files (YAML, TOML, JSON, `.env`-style).
    Configuration,
    /// API/reference material.
    Reference,
    /// Fallback when no other category applies.
    General,
}

impl DocumentCategory {
    /// All variants, in declaration order. Used by the template registry to
    /// assert completeness at startup.
    pub const ALL: [DocumentCategory; 6] = [
        DocumentCategory::Code,
        DocumentCategory::Documentation,
        DocumentCategory::Tutorial,
        DocumentCategory::Configuration,
        DocumentCategory::Reference,
        DocumentCategory::General,
    ];
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DocumentCategory::Code => "code",
            DocumentCategory::Documentation => "documentation",
            DocumentCategory::Tutorial => "tutorial",
            DocumentCategory::Configuration => "configuration",
            DocumentCategory::Reference => "reference",
            DocumentCategory::General => "general",
        };
        f.write_str(s)
    }
}
