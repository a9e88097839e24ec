use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::section::{CrossReference, Section};

/// The parsed, hierarchical shape of a document: title, section arena, and
/// document-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Document title, when one could be resolved (front-matter, pattern
    /// scan, or heuristic fallback).
    pub title: Option<String>,
    /// Flat arena of sections in preorder. Index 0 is always the implicit
    /// root section.
    pub sections: Vec<Section>,
    /// Front-matter plus any metadata merged in by the metadata extractor.
    pub metadata: BTreeMap<String, Value>,
    /// Index of the implicit root section within `sections`.
    pub root: usize,
    /// Cross-references collected during parsing (wiki-links, footnote
    /// references).
    pub cross_references: Vec<CrossReference>,
    /// Per-document Markdown feature usage, additive surface not named by
    /// the core contract but cheap to derive and useful for routing.
    pub features: Option<DocumentFeatures>,
}

impl DocumentStructure {
    /// Root-to-leaf heading path for the section at `index`.
    pub fn heading_path(&self, index: usize) -> Vec<String> {
        Section::heading_path(&self.sections, index)
    }
}

/// Which Markdown features a document exercises, supplemented from the
/// original source's per-document statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFeatures {
    pub front_matter_dialect: Option<String>,
    pub has_tables: bool,
    pub has_task_lists: bool,
    pub has_math: bool,
    pub has_wiki_links: bool,
    pub has_footnotes: bool,
    pub has_components: bool,
    pub heading_count: usize,
    pub code_block_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_path_delegates_to_section() {
        let sections = vec![
            Section {
                id: "root".into(),
                heading: "Doc".into(),
                level: 0,
                content: String::new(),
                start_line: 1,
                end_line: 1,
                parent: None,
                children: vec![1],
            },
            Section {
                id: "a".into(),
                heading: "A".into(),
                level: 1,
                content: String::new(),
                start_line: 2,
                end_line: 2,
                parent: Some(0),
                children: vec![],
            },
        ];
        let structure = DocumentStructure {
            title: None,
            sections,
            metadata: BTreeMap::new(),
            root: 0,
            cross_references: vec![],
            features: None,
        };
        assert_eq!(structure.heading_path(1), vec!["A".to_string()]);
    }
}
