use serde_json::Value;
use std::collections::BTreeMap;

/// Input document: an opaque byte sequence plus a logical path.
///
/// The path need not exist on disk; it carries category hints (extension,
/// path tokens) and serves as the document's identity for chunk id
/// derivation.
#[derive(Debug, Clone)]
pub struct Document {
    /// Logical path. Used for category hints and chunk id derivation, not
    /// necessarily resolvable on disk.
    pub path: String,
    /// Document bytes, lossily converted to UTF-8 at ingestion.
    pub text: String,
    /// Optional caller-supplied document-level context (e.g. a project
    /// name) threaded into enrichment prompts.
    pub document_context: Option<BTreeMap<String, Value>>,
}

impl Document {
    /// Build a `Document` from raw bytes, replacing invalid UTF-8 with the
    /// standard replacement character.
    pub fn from_bytes(bytes: &[u8], path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: String::from_utf8_lossy(bytes).into_owned(),
            document_context: None,
        }
    }

    /// Build a `Document` from an owned string, skipping the lossy
    /// conversion.
    pub fn from_text(text: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            document_context: None,
        }
    }

    /// Attach document-level context used by the enrichment pipeline.
    pub fn with_context(mut self, context: BTreeMap<String, Value>) -> Self {
        self.document_context = Some(context);
        self
    }

    /// The filename component of `path`, or the whole path if it has no
    /// separator.
    pub fn filename(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.path)
    }

    /// The filename stem (filename without its final extension).
    pub fn filename_stem(&self) -> &str {
        let name = self.filename();
        match name.rfind('.') {
            Some(0) | None => name,
            Some(idx) => &name[..idx],
        }
    }

    /// The extension without its leading dot, lowercased. Empty if absent.
    pub fn extension(&self) -> String {
        let name = self.filename();
        match name.rfind('.') {
            Some(0) | None => String::new(),
            Some(idx) => name[idx + 1..].to_ascii_lowercase(),
        }
    }
}

/// A mapping from string keys to structured values, parsed from a leading
/// front-matter block.
///
/// Uses `serde_json::Value` as the universal representation so that YAML,
/// TOML, and JSON front-matter all normalize to the same shape, mirroring
/// the teacher's `DoclingDocument::metadata: HashMap<String, Value>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub fields: BTreeMap<String, Value>,
}

impl FrontMatter {
    /// An empty mapping, returned whenever front-matter is absent or fails
    /// to parse.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Convenience accessor for string-valued fields (title, author, date).
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}
