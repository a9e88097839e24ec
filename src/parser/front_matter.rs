//! Front-matter recognition: YAML (`---`), TOML (`+++`), or JSON (`{` on a
//! line by itself). Parsing failures are never fatal — an empty mapping is
//! returned and the original body preserved, mirroring the regex-driven
//! detection in the original Python's markdown plugin.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::datamodel::FrontMatter;

fn yaml_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*\r?\n?").unwrap())
}

fn toml_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A\+\+\+[ \t]*\r?\n(.*?)\r?\n\+\+\+[ \t]*\r?\n?").unwrap())
}

fn json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A\{[ \t]*\r?\n(.*?)\r?\n\}[ \t]*\r?\n?").unwrap())
}

/// Dialect a front-matter block was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Yaml,
    Toml,
    Json,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Yaml => "yaml",
            Dialect::Toml => "toml",
            Dialect::Json => "json",
        }
    }
}

/// Result of attempting front-matter extraction.
pub struct Extracted {
    pub front_matter: FrontMatter,
    pub body: String,
    pub dialect: Option<Dialect>,
}

/// Strip a leading front-matter block from `text`, in YAML/TOML/JSON order.
///
/// Malformed content inside a recognized fence yields an empty mapping
/// while still stripping the fence; text with no recognizable fence is
/// returned unchanged with an empty mapping and `dialect: None`.
pub fn extract(text: &str) -> Extracted {
    if let Some(caps) = yaml_fence().captures(text) {
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let whole = caps.get(0).unwrap();
        let fields = parse_yaml(raw);
        return Extracted {
            front_matter: FrontMatter { fields },
            body: text[whole.end()..].to_string(),
            dialect: Some(Dialect::Yaml),
        };
    }
    if let Some(caps) = toml_fence().captures(text) {
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let whole = caps.get(0).unwrap();
        let fields = parse_toml(raw);
        return Extracted {
            front_matter: FrontMatter { fields },
            body: text[whole.end()..].to_string(),
            dialect: Some(Dialect::Toml),
        };
    }
    if let Some(caps) = json_fence().captures(text) {
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let whole = caps.get(0).unwrap();
        let fields = parse_json(raw);
        return Extracted {
            front_matter: FrontMatter { fields },
            body: text[whole.end()..].to_string(),
            dialect: Some(Dialect::Json),
        };
    }
    Extracted {
        front_matter: FrontMatter::empty(),
        body: text.to_string(),
        dialect: None,
    }
}

fn parse_yaml(raw: &str) -> BTreeMap<String, Value> {
    match serde_yaml::from_str::<serde_yaml::Value>(raw) {
        Ok(value) => yaml_to_map(value),
        Err(err) => {
            tracing::debug!(error = %err, "malformed yaml front matter, using empty mapping");
            BTreeMap::new()
        }
    }
}

fn yaml_to_map(value: serde_yaml::Value) -> BTreeMap<String, Value> {
    let json_value: Value = match serde_json::to_value(&value) {
        Ok(v) => v,
        Err(_) => return BTreeMap::new(),
    };
    match json_value {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}

fn parse_toml(raw: &str) -> BTreeMap<String, Value> {
    match toml::from_str::<toml::Value>(raw) {
        Ok(value) => match serde_json::to_value(value) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            _ => BTreeMap::new(),
        },
        Err(err) => {
            tracing::debug!(error = %err, "malformed toml front matter, using empty mapping");
            BTreeMap::new()
        }
    }
}

fn parse_json(raw: &str) -> BTreeMap<String, Value> {
    let wrapped = format!("{{\n{raw}\n}}");
    match serde_json::from_str::<Value>(&wrapped) {
        Ok(Value::Object(map)) => map.into_iter().collect(),
        Ok(_) => BTreeMap::new(),
        Err(err) => {
            tracing::debug!(error = %err, "malformed json front matter, using empty mapping");
            BTreeMap::new()
        }
    }
}
