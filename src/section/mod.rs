//! Section Extractor (component C).

pub mod extractor;

pub use extractor::{extract_sections, heading_path_for_line};
