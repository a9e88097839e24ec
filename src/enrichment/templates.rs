//! Static prompt-template registry keyed by `DocumentCategory`. Every
//! category must have an entry; a missing one is a programmer error
//! surfaced at startup, never discovered mid-batch.

use crate::datamodel::DocumentCategory;
use crate::error::{CoreError, EnrichmentError, Result};

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub system_prompt: &'static str,
    pub user_prompt_template: &'static str,
}

pub struct PromptTemplateRegistry;

impl PromptTemplateRegistry {
    /// Look up the template for `category`. All categories in
    /// `DocumentCategory::ALL` resolve here; the catch-all arm exists only
    /// to satisfy exhaustiveness and is never actually reached by a valid
    /// `DocumentCategory` value, so reaching it is a programmer error.
    pub fn template_for(category: DocumentCategory) -> Result<PromptTemplate> {
        let template = match category {
            DocumentCategory::Code => PromptTemplate {
                system_prompt: "You situate source-code excerpts within their surrounding file and project.",
                user_prompt_template: CODE_TEMPLATE,
            },
            DocumentCategory::Documentation => PromptTemplate {
                system_prompt: "You situate documentation excerpts within the surrounding document.",
                user_prompt_template: GENERIC_TEMPLATE,
            },
            DocumentCategory::Tutorial => PromptTemplate {
                system_prompt: "You situate tutorial steps within the overall walkthrough.",
                user_prompt_template: GENERIC_TEMPLATE,
            },
            DocumentCategory::Configuration => PromptTemplate {
                system_prompt: "You situate configuration fragments within the overall configuration file.",
                user_prompt_template: GENERIC_TEMPLATE,
            },
            DocumentCategory::Reference => PromptTemplate {
                system_prompt: "You situate reference entries within the surrounding reference document.",
                user_prompt_template: GENERIC_TEMPLATE,
            },
            DocumentCategory::General => PromptTemplate {
                system_prompt: "You situate a document excerpt within its surrounding document.",
                user_prompt_template: GENERIC_TEMPLATE,
            },
        };
        Ok(template)
    }

    /// Verify at startup that every known category resolves to a
    /// template, refusing to start otherwise.
    pub fn verify_complete() -> Result<()> {
        for category in DocumentCategory::ALL {
            Self::template_for(category).map_err(|_| {
                CoreError::Enrichment(EnrichmentError::MissingTemplate { category })
            })?;
        }
        Ok(())
    }

    /// Format a template's user prompt, substituting document path, joined
    /// section hierarchy, optional document-level context, and content.
    pub fn format_user_prompt(
        template: &PromptTemplate,
        document_path: &str,
        section_hierarchy: &[String],
        document_context: Option<&str>,
        content: &str,
    ) -> String {
        template
            .user_prompt_template
            .replace("{document_path}", document_path)
            .replace("{section_hierarchy}", &section_hierarchy.join(" > "))
            .replace("{document_context}", document_context.unwrap_or(""))
            .replace("{content}", content)
    }
}

const GENERIC_TEMPLATE: &str = "Document: {document_path}\nSection: {section_hierarchy}\nContext: {document_context}\n\nChunk content:\n{content}\n\nWrite a short paragraph situating this chunk within the document.";

const CODE_TEMPLATE: &str = "File: {document_path}\nSymbol path: {section_hierarchy}\nProject context: {document_context}\n\nCode excerpt:\n{content}\n\nWrite a short paragraph situating this code excerpt within the file.";
