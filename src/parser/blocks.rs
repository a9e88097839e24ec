//! Block-level scanning: classifies each line of a document body into a
//! typed block with accurate `line_start`/`line_end`, in the same
//! "classify each line, emit a typed node" spirit as the teacher's markdown
//! backend, extended with line-span tracking and the wider block set this
//! engine needs (tables, footnotes, task lists, wiki-link carriers,
//! component tags).

use regex::Regex;
use std::sync::OnceLock;

/// The recognized block kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading { level: u8 },
    Paragraph,
    CodeFence { info: Option<String> },
    IndentedCode,
    List { ordered: bool },
    Table,
    BlockQuote,
    FootnoteDef { id: String },
    LinkDef { id: String },
    HorizontalRule,
    Component { tag: String },
}

/// A single block with source-accurate, 1-based, inclusive line span.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Raw text of the block (heading text for headings, inner lines
    /// joined by `\n` otherwise).
    pub content: String,
    pub line_start: usize,
    pub line_end: usize,
}

fn atx_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})(?:\s+(.*?))?\s*#*\s*$").unwrap())
}

fn setext_underline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(=+|-+)\s*$").unwrap())
}

fn hr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}((?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap())
}

fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)(?:[-*+]|\d+[.)])\s+(?:\[[ xX]\]\s+)?\S").unwrap())
}

fn ordered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+[.)]\s").unwrap())
}

fn blockquote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s{0,3}>").unwrap())
}

fn footnote_def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[\^([^\]]+)\]:\s*(.*)$").unwrap())
}

fn link_def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\[([^\]]+)\]:\s*(\S+)(?:\s+"(.*)")?\s*$"#).unwrap())
}

fn table_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\|?(.+\|)+.*$").unwrap())
}

fn table_align_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\|?[\s:|-]+\|[\s:|-]*$").unwrap())
}

fn component_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*</?([A-Z][a-zA-Z0-9]*)\b[^>]*>?\s*$").unwrap())
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_indented_code(line: &str) -> bool {
    line.starts_with("    ") || line.starts_with('\t')
}

/// Scan `body` into a flat, ordered list of blocks whose line ranges cover
/// every non-empty line.
pub fn scan_blocks(body: &str) -> Vec<Block> {
    let lines: Vec<&str> = body.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0usize;

    while i < lines.len() {
        let line = lines[i];
        let line_no = i + 1;

        if is_blank(line) {
            i += 1;
            continue;
        }

        if let Some(caps) = atx_heading_re().captures(line) {
            let level = caps.get(1).unwrap().as_str().len() as u8;
            let text = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("").to_string();
            blocks.push(Block {
                kind: BlockKind::Heading { level },
                content: text,
                line_start: line_no,
                line_end: line_no,
            });
            i += 1;
            continue;
        }

        if let Some(fence) = fence_open(line) {
            let (end_idx, info) = scan_fence(&lines, i, &fence);
            let inner_start = i + 1;
            let inner_end = if end_idx > i { end_idx - 1 } else { inner_start };
            let content = if end_idx > inner_start {
                lines[inner_start..end_idx.min(lines.len())].join("\n")
            } else {
                String::new()
            };
            let line_end = if end_idx < lines.len() { end_idx + 1 } else { lines.len() };
            blocks.push(Block {
                kind: BlockKind::CodeFence { info },
                content,
                line_start: line_no,
                line_end,
            });
            let _ = inner_end;
            i = line_end;
            continue;
        }

        if hr_re().is_match(line) && !setext_could_apply(&blocks) {
            blocks.push(Block {
                kind: BlockKind::HorizontalRule,
                content: String::new(),
                line_start: line_no,
                line_end: line_no,
            });
            i += 1;
            continue;
        }

        // Setext heading: a paragraph line immediately followed by an
        // underline of `=` (level 1) or `-` (level 2).
        if i + 1 < lines.len() && !is_blank(lines[i + 1]) {
            if let Some(caps) = setext_underline_re().captures(lines[i + 1]) {
                if !is_blank(line) && !list_item_re().is_match(line) && !blockquote_re().is_match(line) {
                    let underline = caps.get(1).unwrap().as_str();
                    let level = if underline.starts_with('=') { 1u8 } else { 2u8 };
                    blocks.push(Block {
                        kind: BlockKind::Heading { level },
                        content: line.trim().to_string(),
                        line_start: line_no,
                        line_end: line_no + 1,
                    });
                    i += 2;
                    continue;
                }
            }
        }

        if let Some(caps) = footnote_def_re().captures(line) {
            let id = caps.get(1).unwrap().as_str().to_string();
            let text = caps.get(2).unwrap().as_str().to_string();
            blocks.push(Block {
                kind: BlockKind::FootnoteDef { id },
                content: text,
                line_start: line_no,
                line_end: line_no,
            });
            i += 1;
            continue;
        }

        if let Some(caps) = link_def_re().captures(line) {
            let id = caps.get(1).unwrap().as_str().to_string();
            blocks.push(Block {
                kind: BlockKind::LinkDef { id },
                content: line.trim().to_string(),
                line_start: line_no,
                line_end: line_no,
            });
            i += 1;
            continue;
        }

        if is_indented_code(line) {
            let start = i;
            let mut end = i;
            while end < lines.len() && (is_indented_code(lines[end]) || is_blank(lines[end])) {
                end += 1;
            }
            while end > start && is_blank(lines[end - 1]) {
                end -= 1;
            }
            let content: String = lines[start..end]
                .iter()
                .map(|l| l.strip_prefix("    ").or_else(|| l.strip_prefix('\t')).unwrap_or(l))
                .collect::<Vec<_>>()
                .join("\n");
            blocks.push(Block {
                kind: BlockKind::IndentedCode,
                content,
                line_start: start + 1,
                line_end: end,
            });
            i = end;
            continue;
        }

        if table_row_re().is_match(line) && i + 1 < lines.len() && table_align_re().is_match(lines[i + 1]) {
            let start = i;
            let mut end = i + 2;
            while end < lines.len() && table_row_re().is_match(lines[end]) && !is_blank(lines[end]) {
                end += 1;
            }
            blocks.push(Block {
                kind: BlockKind::Table,
                content: lines[start..end].join("\n"),
                line_start: start + 1,
                line_end: end,
            });
            i = end;
            continue;
        }

        if blockquote_re().is_match(line) {
            let start = i;
            let mut end = i;
            while end < lines.len() && blockquote_re().is_match(lines[end]) {
                end += 1;
            }
            let content: String = lines[start..end]
                .iter()
                .map(|l| {
                    let trimmed = l.trim_start();
                    trimmed.strip_prefix('>').unwrap_or(trimmed).trim_start()
                })
                .collect::<Vec<_>>()
                .join("\n");
            blocks.push(Block {
                kind: BlockKind::BlockQuote,
                content,
                line_start: start + 1,
                line_end: end,
            });
            i = end;
            continue;
        }

        if list_item_re().is_match(line) {
            let ordered = ordered_item_re().is_match(line);
            let start = i;
            let mut end = i + 1;
            while end < lines.len()
                && (list_item_re().is_match(lines[end])
                    || (!is_blank(lines[end]) && lines[end].starts_with(' ')))
            {
                end += 1;
            }
            blocks.push(Block {
                kind: BlockKind::List { ordered },
                content: lines[start..end].join("\n"),
                line_start: start + 1,
                line_end: end,
            });
            i = end;
            continue;
        }

        if component_re().is_match(line) {
            let tag = component_re()
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            blocks.push(Block {
                kind: BlockKind::Component { tag },
                content: line.trim().to_string(),
                line_start: line_no,
                line_end: line_no,
            });
            i += 1;
            continue;
        }

        // Fallback: paragraph, extending until a blank line or a line that
        // starts a recognized block.
        let start = i;
        let mut end = i + 1;
        while end < lines.len() && !is_blank(lines[end]) && !starts_new_block(lines[end]) {
            end += 1;
        }
        blocks.push(Block {
            kind: BlockKind::Paragraph,
            content: lines[start..end].join("\n"),
            line_start: start + 1,
            line_end: end,
        });
        i = end;
    }

    blocks
}

fn starts_new_block(line: &str) -> bool {
    atx_heading_re().is_match(line)
        || fence_open(line).is_some()
        || list_item_re().is_match(line)
        || blockquote_re().is_match(line)
        || hr_re().is_match(line)
        || footnote_def_re().is_match(line)
}

fn setext_could_apply(blocks: &[Block]) -> bool {
    // Horizontal rule detection never reinterprets an already-closed
    // heading; this exists only to keep the HR/setext priority explicit
    // at the call site above.
    let _ = blocks;
    false
}

struct FenceMarker {
    ch: char,
    len: usize,
    info: Option<String>,
}

fn fence_open(line: &str) -> Option<FenceMarker> {
    let trimmed = line.trim_start();
    let ch = trimmed.chars().next()?;
    if ch != '`' && ch != '~' {
        return None;
    }
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    if len < 3 {
        return None;
    }
    let rest = trimmed[len..].trim();
    let info = if rest.is_empty() { None } else { Some(rest.to_string()) };
    Some(FenceMarker { ch, len, info })
}

/// Scan a fenced code block starting at `start` (the opening fence line).
/// Returns the index of the closing fence line (or `lines.len()` if
/// unclosed) and the fence's info string.
fn scan_fence(lines: &[&str], start: usize, opener: &FenceMarker) -> (usize, Option<String>) {
    let mut j = start + 1;
    while j < lines.len() {
        let trimmed = lines[j].trim_start();
        let matches_close = trimmed.chars().next() == Some(opener.ch)
            && trimmed.chars().take_while(|&c| c == opener.ch).count() >= opener.len
            && trimmed.chars().all(|c| c == opener.ch || c.is_whitespace());
        if matches_close {
            return (j, opener.info.clone());
        }
        j += 1;
    }
    (lines.len(), opener.info.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(blocks: &[Block]) -> Vec<&BlockKind> {
        blocks.iter().map(|b| &b.kind).collect()
    }

    #[test]
    fn atx_heading_levels() {
        let blocks = scan_blocks("# One\n## Two\n### Three\n");
        assert_eq!(
            kinds(&blocks),
            vec![
                &BlockKind::Heading { level: 1 },
                &BlockKind::Heading { level: 2 },
                &BlockKind::Heading { level: 3 },
            ]
        );
        assert_eq!(blocks[0].content, "One");
    }

    #[test]
    fn setext_heading_levels() {
        let blocks = scan_blocks("Title\n=====\nSubtitle\n-----\n");
        assert_eq!(blocks[0].kind, BlockKind::Heading { level: 1 });
        assert_eq!(blocks[0].content, "Title");
        assert_eq!(blocks[1].kind, BlockKind::Heading { level: 2 });
    }

    #[test]
    fn unclosed_fence_runs_to_eof() {
        let blocks = scan_blocks("# H\n\n```py\ndef f():\n");
        let fence = blocks.iter().find(|b| matches!(b.kind, BlockKind::CodeFence { .. })).unwrap();
        assert_eq!(fence.content, "def f():");
        assert_eq!(fence.line_end, 4);
    }

    #[test]
    fn closed_fence_has_accurate_span() {
        let blocks = scan_blocks("```rust\nfn x() {}\n```\nafter\n");
        let fence = &blocks[0];
        assert!(matches!(fence.kind, BlockKind::CodeFence { .. }));
        assert_eq!(fence.line_start, 1);
        assert_eq!(fence.line_end, 3);
        assert_eq!(fence.content, "fn x() {}");
    }

    #[test]
    fn table_recognized_with_header_and_alignment_row() {
        let blocks = scan_blocks("| A | B |\n|---|---|\n| 1 | 2 |\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Table);
    }

    #[test]
    fn footnote_and_link_definitions() {
        let blocks = scan_blocks("[^note]: a footnote\n[ref]: https://example.com \"Title\"\n");
        assert!(matches!(blocks[0].kind, BlockKind::FootnoteDef { ref id } if id == "note"));
        assert!(matches!(blocks[1].kind, BlockKind::LinkDef { ref id } if id == "ref"));
    }

    #[test]
    fn task_list_is_a_list_block() {
        let blocks = scan_blocks("- [ ] todo\n- [x] done\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::List { ordered: false });
    }

    #[test]
    fn blocks_cover_every_non_empty_line() {
        let body = "# H\n\npara one\npara one cont\n\n- item\n\n```\ncode\n```\n";
        let blocks = scan_blocks(body);
        let total_lines = body.lines().count();
        let mut covered = vec![false; total_lines + 1];
        for b in &blocks {
            for l in b.line_start..=b.line_end {
                covered[l] = true;
            }
        }
        for (idx, line) in body.lines().enumerate() {
            let line_no = idx + 1;
            if !line.trim().is_empty() {
                assert!(covered[line_no], "line {line_no} ({line:?}) not covered");
            }
        }
    }
}
