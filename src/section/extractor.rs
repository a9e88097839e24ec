//! Section Extractor (component C): builds the nested section arena from
//! the parser's flat block list, assigns stable ids, and attributes
//! content ranges.

use crate::datamodel::Section;
use crate::parser::blocks::{Block, BlockKind};

/// Build the section arena for a document body.
///
/// Index 0 is always the implicit root section, spanning the whole
/// document. A section's content spans from the line after its heading to
/// the line before the next heading of level less than or equal to its
/// own — so a parent section's content textually contains its
/// descendants', matching the outline semantics of heading levels.
pub fn extract_sections(body: &str, block_list: &[Block], title_hint: Option<&str>, filename_stem: &str) -> Vec<Section> {
    let lines: Vec<&str> = body.lines().collect();
    let last_line = lines.len();

    let headings: Vec<&Block> = block_list
        .iter()
        .filter(|b| matches!(b.kind, BlockKind::Heading { .. }))
        .collect();

    let root_title = title_hint.filter(|t| !t.is_empty()).unwrap_or(filename_stem).to_string();

    let mut sections = vec![Section {
        id: "root".to_string(),
        heading: root_title,
        level: 0,
        content: String::new(),
        start_line: 1,
        end_line: last_line,
        parent: None,
        children: Vec::new(),
    }];
    let mut used_ids = vec!["root".to_string()];

    // stack of (section_index, level); root is always present at the
    // bottom so every heading finds a parent and is never popped itself
    // (its level, 0, is below every real heading level).
    let mut stack: Vec<(usize, u8)> = vec![(0, 0)];

    for heading_block in &headings {
        let level = match heading_block.kind {
            BlockKind::Heading { level } => level,
            _ => unreachable!(),
        };

        while stack.len() > 1 && stack.last().unwrap().1 >= level {
            let (closed_idx, _) = stack.pop().unwrap();
            sections[closed_idx].end_line = heading_block.line_start.saturating_sub(1);
        }
        let parent_idx = stack.last().unwrap().0;

        let slug = slugify(&heading_block.content);
        let id = unique_id(&slug, &used_ids);
        used_ids.push(id.clone());

        let new_index = sections.len();
        sections.push(Section {
            id,
            heading: heading_block.content.clone(),
            level,
            content: String::new(),
            start_line: heading_block.line_end + 1,
            end_line: last_line,
            parent: Some(parent_idx),
            children: Vec::new(),
        });
        sections[parent_idx].children.push(new_index);
        stack.push((new_index, level));
    }

    for section in sections.iter_mut() {
        section.content = slice_lines(&lines, section.start_line, section.end_line);
    }

    sections
}

fn slice_lines(lines: &[&str], start: usize, end: usize) -> String {
    if start == 0 || end < start || start > lines.len() {
        return String::new();
    }
    let end = end.min(lines.len());
    lines[start - 1..end].join("\n")
}

fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut last_was_dash = false;
    for ch in text.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        "section".to_string()
    } else {
        trimmed.to_string()
    }
}

fn unique_id(base: &str, used: &[String]) -> String {
    if !used.iter().any(|u| u == base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !used.iter().any(|u| u == &candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Find the most specific (deepest-nesting) section whose range contains
/// `line`, and return its root-to-leaf heading path. Since section ranges
/// are properly nested, the containing section with the latest
/// `start_line` is always the deepest match.
pub fn heading_path_for_line(sections: &[Section], line: usize) -> Vec<String> {
    let best = sections
        .iter()
        .enumerate()
        .filter(|(_, s)| s.start_line <= line && line <= s.end_line)
        .max_by_key(|(_, s)| s.start_line);
    match best {
        Some((idx, _)) => Section::heading_path(sections, idx),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn sections_for(text: &str) -> Vec<Section> {
        let parsed = parser::parse(text);
        extract_sections(&parsed.body, &parsed.blocks, None, "doc")
    }

    #[test]
    fn orphan_content_attached_to_root() {
        let sections = sections_for("intro text\n\n# H\n\nbody\n");
        assert_eq!(sections[0].level, 0);
        assert!(sections[0].content.contains("intro text"));
    }

    #[test]
    fn parent_content_contains_descendant_text() {
        let sections = sections_for("# A\n\nintro\n\n## B\n\ndetail\n");
        let a = sections.iter().find(|s| s.heading == "A").unwrap();
        assert!(a.content.contains("intro"));
        assert!(a.content.contains("detail"));
    }

    #[test]
    fn nested_headings_build_parent_child_links() {
        let sections = sections_for("# A\n\npara\n\n## B\n\npara2\n");
        let a_idx = sections.iter().position(|s| s.heading == "A").unwrap();
        let b_idx = sections.iter().position(|s| s.heading == "B").unwrap();
        assert_eq!(sections[b_idx].parent, Some(a_idx));
        assert!(sections[a_idx].children.contains(&b_idx));
    }

    #[test]
    fn heading_level_jump_has_no_synthetic_intermediate() {
        let sections = sections_for("# A\n\n#### D\n\ntext\n");
        let a_idx = sections.iter().position(|s| s.heading == "A").unwrap();
        let d = sections.iter().find(|s| s.heading == "D").unwrap();
        assert_eq!(d.parent, Some(a_idx));
        assert_eq!(sections.len(), 3); // root, A, D
    }

    #[test]
    fn slug_collisions_get_numeric_suffix() {
        let sections = sections_for("# Intro\n\ntext\n\n# Intro\n\nmore\n");
        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        assert!(ids.contains(&"intro"));
        assert!(ids.contains(&"intro-2"));
    }

    #[test]
    fn preorder_traversal_matches_document_order() {
        let sections = sections_for("# A\n\n## B\n\n# C\n");
        let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
        let a_pos = headings.iter().position(|h| *h == "A").unwrap();
        let b_pos = headings.iter().position(|h| *h == "B").unwrap();
        let c_pos = headings.iter().position(|h| *h == "C").unwrap();
        assert!(a_pos < b_pos);
        assert!(b_pos < c_pos);
    }

    #[test]
    fn heading_path_for_line_picks_deepest_section() {
        let sections = sections_for("# A\n\nintro\n\n## B\n\ndetail\n");
        let b = sections.iter().find(|s| s.heading == "B").unwrap();
        let path = heading_path_for_line(&sections, b.start_line);
        assert_eq!(path, vec!["A".to_string(), "B".to_string()]);
    }
}
