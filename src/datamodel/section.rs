use serde::{Deserialize, Serialize};

/// A heading-delimited region of a document.
///
/// Sections live in an arena (`DocumentStructure::sections`); `parent` and
/// `children` are indices into that same vector rather than owned
/// sub-trees, per the "from cyclic structures to arenas" design note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Stable id, unique within the document, derived from heading text.
    pub id: String,
    /// Raw heading text as it appeared in source.
    pub heading: String,
    /// Heading level, 1-6. The implicit root section uses level 0.
    pub level: u8,
    /// Text content between this heading and the next heading of equal or
    /// higher level (exclusive of the heading line itself).
    pub content: String,
    /// First line of this section's content, 1-based.
    pub start_line: usize,
    /// Last line of this section's content, inclusive, 1-based.
    pub end_line: usize,
    /// Index into `DocumentStructure::sections` of the parent, if any.
    pub parent: Option<usize>,
    /// Indices into `DocumentStructure::sections` of direct children, in
    /// source order.
    pub children: Vec<usize>,
}

impl Section {
    /// Root-to-leaf heading path for this section, given the arena it
    /// belongs to. `self_index` must be this section's own index.
    pub fn heading_path(sections: &[Section], self_index: usize) -> Vec<String> {
        let mut path = Vec::new();
        let mut cursor = Some(self_index);
        while let Some(idx) = cursor {
            let section = &sections[idx];
            if section.level > 0 {
                path.push(section.heading.clone());
            }
            cursor = section.parent;
        }
        path.reverse();
        path
    }
}

/// A named relation between two sections (e.g. a wiki-link target).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossReference {
    pub from: String,
    pub to: String,
    pub relation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_section(id: &str, heading: &str, level: u8, parent: Option<usize>) -> Section {
        Section {
            id: id.to_string(),
            heading: heading.to_string(),
            level,
            content: String::new(),
            start_line: 1,
            end_line: 1,
            parent,
            children: Vec::new(),
        }
    }

    #[test]
    fn heading_path_includes_root_to_leaf() {
        let sections = vec![
            make_section("root", "Doc", 0, None),
            make_section("a", "A", 1, Some(0)),
            make_section("b", "B", 2, Some(1)),
        ];
        let path = Section::heading_path(&sections, 2);
        assert_eq!(path, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn heading_path_for_root_is_empty() {
        let sections = vec![make_section("root", "Doc", 0, None)];
        let path = Section::heading_path(&sections, 0);
        assert!(path.is_empty());
    }
}
