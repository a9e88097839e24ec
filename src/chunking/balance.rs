//! Size balancing, coherence adjustment, and overlap attachment — the
//! post-processing passes every strategy's raw chunk sequence goes
//! through before finalization.

use crate::datamodel::ChunkType;
use crate::estimator::estimate_tokens;

use super::text_spans::{split_paragraphs, split_sentences, split_words};
use super::{ChunkingConfig, SizedChunk};

/// Chunk kinds treated as atomic: never split further even if they
/// exceed `max_chunk_size`, per the size-balancing invariant's exception
/// for a single paragraph or code block that cannot be split without
/// violating atomicity.
fn is_atomic(chunk_type: ChunkType) -> bool {
    matches!(chunk_type, ChunkType::CodeBlock | ChunkType::List | ChunkType::Table | ChunkType::Quote)
}

/// Merge chunks under `min_chunk_size` with a same-hierarchy neighbor
/// when the combination stays under `max_chunk_size`, then split any
/// chunk still exceeding `max_chunk_size`.
pub fn balance_sizes(chunks: Vec<SizedChunk>, config: &ChunkingConfig) -> Vec<SizedChunk> {
    let merged = merge_small(chunks, config);
    merged.into_iter().flat_map(|chunk| split_oversized(chunk, config)).collect()
}

fn merge_small(chunks: Vec<SizedChunk>, config: &ChunkingConfig) -> Vec<SizedChunk> {
    let mut result: Vec<SizedChunk> = Vec::new();
    for chunk in chunks {
        let merge_candidate = result.last().map(|last| {
            let last_tokens = estimate_tokens(&last.content);
            let current_tokens = estimate_tokens(&chunk.content);
            last.hierarchy == chunk.hierarchy
                && (last_tokens < config.min_chunk_size || current_tokens < config.min_chunk_size)
        });

        if merge_candidate == Some(true) {
            let last = result.last().unwrap();
            let combined = format!("{}\n\n{}", last.content, chunk.content);
            if estimate_tokens(&combined) <= config.max_chunk_size {
                let mut merged = result.pop().unwrap();
                merged.content = combined;
                merged.end_line = chunk.end_line;
                merged.has_code = merged.has_code || chunk.has_code;
                result.push(merged);
                continue;
            }
        }
        result.push(chunk);
    }
    result
}

fn split_oversized(chunk: SizedChunk, config: &ChunkingConfig) -> Vec<SizedChunk> {
    if estimate_tokens(&chunk.content) <= config.max_chunk_size || is_atomic(chunk.chunk_type) {
        return vec![chunk];
    }

    let paragraphs = split_paragraphs(&chunk.content);
    if paragraphs.len() > 1 {
        let mut groups = Vec::new();
        let mut current = String::new();
        let mut current_start = paragraphs[0].start_line;
        let mut current_end = paragraphs[0].start_line;
        for p in &paragraphs {
            let candidate = if current.is_empty() {
                p.content.clone()
            } else {
                format!("{current}\n\n{}", p.content)
            };
            if !current.is_empty() && estimate_tokens(&candidate) > config.max_chunk_size {
                groups.push((current.clone(), current_start, current_end));
                current = p.content.clone();
                current_start = p.start_line;
                current_end = p.end_line;
            } else {
                current = candidate;
                current_end = p.end_line;
            }
        }
        if !current.is_empty() {
            groups.push((current, current_start, current_end));
        }

        return groups
            .into_iter()
            .flat_map(|(content, rel_start, rel_end)| {
                let absolute_offset = chunk.start_line.saturating_sub(1);
                let sub = SizedChunk {
                    content,
                    chunk_type: chunk.chunk_type,
                    start_line: absolute_offset + rel_start,
                    end_line: absolute_offset + rel_end,
                    has_code: chunk.has_code,
                    hierarchy: chunk.hierarchy.clone(),
                };
                split_oversized(sub, config)
            })
            .collect();
    }

    let sentences = split_sentences(&chunk.content);
    if sentences.len() > 1 {
        let groups = pack_by_token_budget(&sentences, config.max_chunk_size, " ");
        return groups
            .into_iter()
            .map(|content| SizedChunk {
                content,
                chunk_type: chunk.chunk_type,
                start_line: chunk.start_line,
                end_line: chunk.end_line,
                has_code: chunk.has_code,
                hierarchy: chunk.hierarchy.clone(),
            })
            .collect();
    }

    let words = split_words(&chunk.content);
    if words.len() > 1 {
        let owned: Vec<String> = words.into_iter().map(String::from).collect();
        let groups = pack_by_token_budget(&owned, config.max_chunk_size, " ");
        return groups
            .into_iter()
            .map(|content| SizedChunk {
                content,
                chunk_type: chunk.chunk_type,
                start_line: chunk.start_line,
                end_line: chunk.end_line,
                has_code: chunk.has_code,
                hierarchy: chunk.hierarchy.clone(),
            })
            .collect();
    }

    // A single indivisible unit (one word, or an empty/degenerate string)
    // that still exceeds the budget: the atomicity exception applies.
    vec![chunk]
}

fn pack_by_token_budget(units: &[String], budget: u32, joiner: &str) -> Vec<String> {
    let mut groups = Vec::new();
    let mut current = String::new();
    for unit in units {
        let candidate = if current.is_empty() {
            unit.clone()
        } else {
            format!("{current}{joiner}{unit}")
        };
        if !current.is_empty() && estimate_tokens(&candidate) > budget {
            groups.push(current.clone());
            current = unit.clone();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Compare adjacent semantic/hybrid chunks and shift the boundary between
/// them toward a nearby paragraph break when doing so raises cosine
/// similarity, never violating the size bounds. Heading-crossing
/// boundaries are never shifted.
pub fn adjust_coherence(chunks: Vec<SizedChunk>, config: &ChunkingConfig) -> Vec<SizedChunk> {
    let mut chunks = chunks;
    let mut i = 0;
    while i + 1 < chunks.len() {
        let crosses_heading = chunks[i].hierarchy != chunks[i + 1].hierarchy;
        if crosses_heading {
            i += 1;
            continue;
        }
        let similarity = super::similarity::cosine_similarity(&chunks[i].content, &chunks[i + 1].content);
        if similarity <= config.semantic_threshold {
            i += 1;
            continue;
        }
        shift_boundary_to_paragraph_break(&mut chunks, i, config);
        i += 1;
    }
    chunks
}

fn shift_boundary_to_paragraph_break(chunks: &mut [SizedChunk], i: usize, config: &ChunkingConfig) {
    let next_paragraphs = split_paragraphs(&chunks[i + 1].content);
    if next_paragraphs.len() < 2 {
        return;
    }
    let mut moved = String::new();
    let mut remaining_start_idx = 0;
    for (idx, p) in next_paragraphs.iter().enumerate() {
        let candidate_move = format!("{moved}{}{}", if moved.is_empty() { "" } else { "\n\n" }, p.content);
        if estimate_tokens(&candidate_move) as i64 + estimate_tokens(&chunks[i].content) as i64 > config.max_chunk_size as i64 {
            break;
        }
        moved = candidate_move;
        remaining_start_idx = idx + 1;
    }
    if moved.is_empty() || remaining_start_idx == 0 {
        return;
    }
    let moved_with_sep = format!("{}\n\n{moved}", chunks[i].content);
    if estimate_tokens(&moved_with_sep) > config.max_chunk_size {
        return;
    }
    let remaining: String = next_paragraphs[remaining_start_idx..]
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    if remaining.trim().is_empty() {
        return;
    }
    chunks[i].content = moved_with_sep;
    chunks[i + 1].content = remaining;
}

/// Attach advisory overlap context: a trailing slice of the previous
/// chunk (preferring a sentence boundary) as `context_before`, and a
/// leading slice of the next chunk as `context_after`.
pub fn attach_overlap(chunks: Vec<SizedChunk>, config: &ChunkingConfig) -> Vec<(SizedChunk, Option<String>, Option<String>)> {
    if config.overlap_size == 0 {
        return chunks.into_iter().map(|c| (c, None, None)).collect();
    }
    let contents: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    chunks
        .into_iter()
        .enumerate()
        .map(|(idx, chunk)| {
            let before = if idx > 0 {
                Some(trailing_slice(&contents[idx - 1], config.overlap_size))
            } else {
                None
            };
            let after = if idx + 1 < contents.len() {
                Some(leading_slice(&contents[idx + 1], config.overlap_size))
            } else {
                None
            };
            (chunk, before, after)
        })
        .collect()
}

fn trailing_slice(text: &str, overlap_tokens: u32) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return raw_tail(text, overlap_tokens);
    }
    let mut acc = String::new();
    for sentence in sentences.iter().rev() {
        let candidate = if acc.is_empty() {
            sentence.clone()
        } else {
            format!("{sentence} {acc}")
        };
        if estimate_tokens(&candidate) > overlap_tokens && !acc.is_empty() {
            break;
        }
        acc = candidate;
    }
    if acc.is_empty() {
        raw_tail(text, overlap_tokens)
    } else {
        acc
    }
}

fn leading_slice(text: &str, overlap_tokens: u32) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return raw_head(text, overlap_tokens);
    }
    let mut acc = String::new();
    for sentence in &sentences {
        let candidate = if acc.is_empty() {
            sentence.clone()
        } else {
            format!("{acc} {sentence}")
        };
        if estimate_tokens(&candidate) > overlap_tokens && !acc.is_empty() {
            break;
        }
        acc = candidate;
    }
    if acc.is_empty() {
        raw_head(text, overlap_tokens)
    } else {
        acc
    }
}

fn raw_tail(text: &str, overlap_tokens: u32) -> String {
    let chars: Vec<char> = text.chars().collect();
    let approx_chars = (overlap_tokens as f64 / 0.75).ceil() as usize;
    let start = chars.len().saturating_sub(approx_chars);
    chars[start..].iter().collect()
}

fn raw_head(text: &str, overlap_tokens: u32) -> String {
    let chars: Vec<char> = text.chars().collect();
    let approx_chars = (overlap_tokens as f64 / 0.75).ceil() as usize;
    let end = approx_chars.min(chars.len());
    chars[..end].iter().collect()
}
