//! Per-language code metadata: import/require targets, top-level function
//! names, and class names, by pattern match rather than full parsing.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern-extracted facts about a code body, scoped to `python` and
/// `javascript` bodies per the metadata extractor's contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeMetadata {
    pub imports: Vec<String>,
    pub functions: Vec<String>,
    pub classes: Vec<String>,
}

fn py_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?:import|from)\s+([A-Za-z_][A-Za-z0-9_.]*)").unwrap())
}

fn py_def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap())
}

fn py_class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^class\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap())
}

fn js_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)(?:require\(\s*['"]([^'"]+)['"]\s*\)|from\s+['"]([^'"]+)['"])"#).unwrap()
    })
}

fn js_function_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)function\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*\(").unwrap())
}

fn js_class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^class\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap())
}

/// Extract code metadata for `body` given a detected `language` tag.
/// Unsupported languages return an empty `CodeMetadata`.
pub fn extract_code_metadata(body: &str, language: &str) -> CodeMetadata {
    match language {
        "python" => CodeMetadata {
            imports: dedup(py_import_re().captures_iter(body).map(|c| root_package(&c[1]))),
            functions: dedup(py_def_re().captures_iter(body).map(|c| c[1].to_string())),
            classes: dedup(py_class_re().captures_iter(body).map(|c| c[1].to_string())),
        },
        "javascript" => CodeMetadata {
            imports: dedup(js_import_re().captures_iter(body).map(|c| {
                let target = c.get(1).or_else(|| c.get(2)).map(|m| m.as_str()).unwrap_or("");
                root_package(target)
            })),
            functions: dedup(js_function_re().captures_iter(body).map(|c| c[1].to_string())),
            classes: dedup(js_class_re().captures_iter(body).map(|c| c[1].to_string())),
        },
        _ => CodeMetadata::default(),
    }
}

fn root_package(dotted: &str) -> String {
    dotted.split(['.', '/']).next().unwrap_or(dotted).to_string()
}

fn dedup(iter: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for item in iter {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_imports_functions_and_classes() {
        let body = "import os\nfrom collections.abc import Mapping\n\ndef run():\n    pass\n\nclass Worker:\n    pass\n";
        let meta = extract_code_metadata(body, "python");
        assert!(meta.imports.contains(&"os".to_string()));
        assert!(meta.imports.contains(&"collections".to_string()));
        assert_eq!(meta.functions, vec!["run".to_string()]);
        assert_eq!(meta.classes, vec!["Worker".to_string()]);
    }

    #[test]
    fn javascript_requires_and_function_declarations() {
        let body = "const fs = require('fs');\nimport { x } from 'pkg/sub';\n\nfunction handler() {}\n\nclass Widget {}\n";
        let meta = extract_code_metadata(body, "javascript");
        assert!(meta.imports.contains(&"fs".to_string()));
        assert!(meta.imports.contains(&"pkg".to_string()));
        assert_eq!(meta.functions, vec!["handler".to_string()]);
        assert_eq!(meta.classes, vec!["Widget".to_string()]);
    }

    #[test]
    fn unsupported_language_is_empty() {
        let meta = extract_code_metadata("# not code", "markdown");
        assert_eq!(meta, CodeMetadata::default());
    }
}
