//! Metadata Extractor (component E): per-document title/author/date
//! resolution, language detection, keyword extraction, summary
//! generation, file metadata, and per-language code metadata.

pub mod code_metadata;
pub mod filesystem;
pub mod keywords;
pub mod language;
pub mod summary;

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::datamodel::{ChunkMetadata, Document, DocumentChunk};
use crate::parser::ParsedDocument;
use code_metadata::CodeMetadata;
use filesystem::{FileStat, FileSystem};

const DEFAULT_KEYWORD_LIMIT: usize = 10;

/// Per-document metadata, merged from front-matter, pattern scan, and
/// heuristic fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub language: String,
    pub keywords: Vec<String>,
    pub summary: String,
    pub code: CodeMetadata,
    pub file: FileInfo,
}

/// File-identity metadata derivable from the path alone, plus optional
/// filesystem stats from the injected `FileSystem`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    pub extension: String,
    pub absolute_path: String,
    pub size: Option<u64>,
    pub created_at_unix: Option<i64>,
    pub modified_at_unix: Option<i64>,
}

fn title_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?mi)^\s*title:\s*(.+)$").unwrap())
}

fn author_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?mi)^\s*(?:author:|@author)\s*(.+)$").unwrap())
}

fn html_title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title>\s*(.*?)\s*</title>").unwrap())
}

fn dunder_author_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?m)^__author__\s*=\s*['"](.+?)['"]"#).unwrap())
}

fn date_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?mi)^\s*date:\s*(.+)$").unwrap())
}

/// Orchestrates per-document metadata extraction over an injected
/// `FileSystem`, keeping the extractor testable without touching disk.
pub struct MetadataExtractor<'a> {
    filesystem: &'a dyn FileSystem,
    keyword_limit: usize,
    summary_chars: usize,
}

impl<'a> MetadataExtractor<'a> {
    pub fn new(filesystem: &'a dyn FileSystem) -> Self {
        Self {
            filesystem,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            summary_chars: summary::DEFAULT_SUMMARY_CHARS,
        }
    }

    pub fn with_keyword_limit(mut self, limit: usize) -> Self {
        self.keyword_limit = limit;
        self
    }

    pub fn with_summary_chars(mut self, chars: usize) -> Self {
        self.summary_chars = chars;
        self
    }

    /// Extract per-document metadata for `document`/`parsed`.
    pub fn extract(&self, document: &Document, parsed: &ParsedDocument) -> DocumentMetadata {
        let title = resolve_title(document, parsed);
        let author = resolve_author(parsed);
        let date = resolve_date(parsed);
        let language = language::detect_language(&parsed.body, &document.extension());
        let keywords = keywords::extract_keywords(&parsed.body, self.keyword_limit);
        let summary = summary::summarize(parsed, self.summary_chars);
        let code = code_metadata::extract_code_metadata(&parsed.body, &language);
        let file = self.file_info(document);

        DocumentMetadata {
            title,
            author,
            date,
            language,
            keywords,
            summary,
            code,
            file,
        }
    }

    fn file_info(&self, document: &Document) -> FileInfo {
        let stat = self.filesystem.stat(&document.path);
        FileInfo {
            filename: document.filename().to_string(),
            extension: document.extension(),
            absolute_path: document.path.clone(),
            size: stat.map(|s| s.size),
            created_at_unix: stat.map(|s| s.created_at_unix),
            modified_at_unix: stat.map(|s| s.modified_at_unix),
        }
    }
}

fn resolve_title(document: &Document, parsed: &ParsedDocument) -> Option<String> {
    if let Some(title) = parsed.front_matter.get_str("title") {
        return Some(title.to_string());
    }
    if let Some(caps) = title_line_re().captures(&parsed.body) {
        return Some(caps[1].trim().to_string());
    }
    if let Some(caps) = html_title_re().captures(&parsed.body) {
        return Some(caps[1].trim().to_string());
    }
    if let Some(first_line) = parsed.body.lines().find(|l| !l.trim().is_empty()) {
        return Some(first_line.trim().to_string());
    }
    Some(title_case(document.filename_stem()))
}

fn resolve_author(parsed: &ParsedDocument) -> Option<String> {
    if let Some(author) = parsed.front_matter.get_str("author") {
        return Some(author.to_string());
    }
    if let Some(caps) = author_line_re().captures(&parsed.body) {
        return Some(caps[1].trim().to_string());
    }
    if let Some(caps) = dunder_author_re().captures(&parsed.body) {
        return Some(caps[1].to_string());
    }
    None
}

fn resolve_date(parsed: &ParsedDocument) -> Option<String> {
    if let Some(date) = parsed.front_matter.get_str("date") {
        return Some(date.to_string());
    }
    date_line_re().captures(&parsed.body).map(|c| c[1].trim().to_string())
}

fn title_case(stem: &str) -> String {
    stem.split(['-', '_', ' '])
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Back-fill `language` and `keywords` onto every chunk's metadata from
/// document-level extraction, per the chunking/metadata data-flow split:
/// the optimizer leaves these null, the metadata extractor fills them in.
pub fn apply_document_metadata(chunks: &mut [DocumentChunk], metadata: &DocumentMetadata) {
    for chunk in chunks.iter_mut() {
        chunk.metadata.language = Some(metadata.language.clone());
        if chunk.metadata.keywords.is_empty() {
            chunk.metadata.keywords = keywords::extract_keywords(&chunk.content, DEFAULT_KEYWORD_LIMIT.min(5));
        }
    }
}

fn _assert_chunk_metadata_shape(_m: &ChunkMetadata) {}
