//! The five pluggable chunking strategies dispatched by `ChunkOptimizer`.

pub mod fixed;
pub mod hybrid;
pub mod paragraph;
pub mod semantic;
pub mod sentence;

use crate::datamodel::ChunkType;
use crate::estimator::estimate_tokens;

/// Greedily pack `(content, chunk_type, start_line, end_line, has_code)`
/// units into token-budgeted groups, never splitting a unit and never
/// exceeding `max_chunk_size` unless a single unit alone already exceeds
/// it (in which case it is emitted alone, oversized, for the balance pass
/// to deal with).
pub(crate) struct Unit {
    pub content: String,
    pub chunk_type: ChunkType,
    pub start_line: usize,
    pub end_line: usize,
    pub has_code: bool,
}

pub(crate) fn pack_units(units: Vec<Unit>, max_chunk_size: u32) -> Vec<super::RawChunk> {
    let mut chunks = Vec::new();
    let mut acc: Option<Unit> = None;

    for unit in units {
        if unit.content.trim().is_empty() {
            continue;
        }
        acc = match acc {
            None => Some(unit),
            Some(current) => {
                let candidate = format!("{}\n\n{}", current.content, unit.content);
                if estimate_tokens(&candidate) <= max_chunk_size {
                    Some(Unit {
                        content: candidate,
                        chunk_type: current.chunk_type,
                        start_line: current.start_line,
                        end_line: unit.end_line,
                        has_code: current.has_code || unit.has_code,
                    })
                } else {
                    chunks.push(super::RawChunk {
                        content: current.content,
                        chunk_type: current.chunk_type,
                        start_line: current.start_line,
                        end_line: current.end_line,
                        has_code: current.has_code,
                    });
                    Some(unit)
                }
            }
        };
    }
    if let Some(last) = acc {
        chunks.push(super::RawChunk {
            content: last.content,
            chunk_type: last.chunk_type,
            start_line: last.start_line,
            end_line: last.end_line,
            has_code: last.has_code,
        });
    }
    chunks
}
