//! Structural Parser (component B): front-matter stripping, block
//! recognition, and cross-reference collection in a single pass over a
//! document's body.

pub mod blocks;
pub mod front_matter;
pub mod inline;

use crate::datamodel::{CrossReference, DocumentFeatures, FrontMatter};
use blocks::{Block, BlockKind};
use inline::InlineSpan;

/// Output of a full parse pass: front-matter, the stripped body, the flat
/// block list, and cross-references gathered from wiki-links and footnote
/// references found inline.
pub struct ParsedDocument {
    pub front_matter: FrontMatter,
    pub body: String,
    pub blocks: Vec<Block>,
    pub cross_references: Vec<CrossReference>,
    pub features: DocumentFeatures,
}

/// Parse `text` into front-matter, body, and an annotated block list.
///
/// Never raises: malformed front-matter and malformed blocks degrade to
/// empty mappings / paragraph blocks rather than propagating an error,
/// per the structural parser's robustness contract.
pub fn parse(text: &str) -> ParsedDocument {
    let extracted = front_matter::extract(text);
    let block_list = blocks::scan_blocks(&extracted.body);
    let cross_references = collect_cross_references(&extracted.body, &block_list);
    let features = compute_features(&extracted, &block_list);

    ParsedDocument {
        front_matter: extracted.front_matter,
        body: extracted.body,
        blocks: block_list,
        cross_references,
        features,
    }
}

fn collect_cross_references(body: &str, block_list: &[Block]) -> Vec<CrossReference> {
    let mut refs = Vec::new();
    for block in block_list {
        if matches!(block.kind, BlockKind::CodeFence { .. } | BlockKind::IndentedCode) {
            continue;
        }
        let line_text = line_range(body, block.line_start, block.line_end);
        for span in inline::scan_inline(&line_text) {
            match span {
                InlineSpan::WikiLink { target, .. } => refs.push(CrossReference {
                    from: format!("line:{}", block.line_start),
                    to: target,
                    relation: "wiki-link".to_string(),
                }),
                InlineSpan::FootnoteRef(id) => refs.push(CrossReference {
                    from: format!("line:{}", block.line_start),
                    to: format!("^{id}"),
                    relation: "footnote-ref".to_string(),
                }),
                _ => {}
            }
        }
    }
    refs
}

fn line_range(body: &str, start: usize, end: usize) -> String {
    body.lines()
        .skip(start.saturating_sub(1))
        .take(end.saturating_sub(start) + 1)
        .collect::<Vec<_>>()
        .join("\n")
}

fn compute_features(extracted: &front_matter::Extracted, block_list: &[Block]) -> DocumentFeatures {
    let mut features = DocumentFeatures {
        front_matter_dialect: extracted.dialect.map(|d| d.as_str().to_string()),
        ..DocumentFeatures::default()
    };
    for block in block_list {
        match &block.kind {
            BlockKind::Heading { .. } => features.heading_count += 1,
            BlockKind::CodeFence { .. } | BlockKind::IndentedCode => features.code_block_count += 1,
            BlockKind::Table => features.has_tables = true,
            BlockKind::FootnoteDef { .. } => features.has_footnotes = true,
            BlockKind::Component { .. } => features.has_components = true,
            BlockKind::List { .. } => {
                if block.content.contains("[ ]") || block.content.contains("[x]") || block.content.contains("[X]") {
                    features.has_task_lists = true;
                }
            }
            _ => {}
        }
        if block.content.contains("$$") || block.content.contains('$') {
            features.has_math = true;
        }
        if block.content.contains("[[") {
            features.has_wiki_links = true;
        }
    }
    features
}
