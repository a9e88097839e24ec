//! Language detection: extension hints first, content scoring as a
//! tiebreaker, over a closed tag set.

/// The closed set of language tags this engine recognizes.
pub const KNOWN_LANGUAGES: &[&str] = &["python", "javascript", "java", "markdown", "html", "plaintext"];

/// Detect a language tag for `body`, preferring `extension` when it maps
/// directly to a known language.
pub fn detect_language(body: &str, extension: &str) -> String {
    if let Some(lang) = from_extension(extension) {
        return lang.to_string();
    }
    score_content(body).to_string()
}

fn from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "py" => Some("python"),
        "js" | "mjs" | "cjs" => Some("javascript"),
        "java" => Some("java"),
        "md" | "markdown" => Some("markdown"),
        "html" | "htm" => Some("html"),
        "txt" => Some("plaintext"),
        _ => None,
    }
}

fn score_content(body: &str) -> &'static str {
    let scores = [
        ("python", score_python(body)),
        ("javascript", score_javascript(body)),
        ("java", score_java(body)),
        ("markdown", score_markdown(body)),
        ("html", score_html(body)),
    ];
    scores
        .iter()
        .max_by_key(|(_, score)| *score)
        .filter(|(_, score)| *score > 0)
        .map(|(lang, _)| *lang)
        .unwrap_or("plaintext")
}

fn score_python(body: &str) -> u32 {
    let patterns = ["def ", "import ", "elif ", "self.", "__init__", ":\n"];
    patterns.iter().filter(|p| body.contains(*p)).count() as u32
}

fn score_javascript(body: &str) -> u32 {
    let patterns = ["function ", "const ", "let ", "=>", "require(", "console.log"];
    patterns.iter().filter(|p| body.contains(*p)).count() as u32
}

fn score_java(body: &str) -> u32 {
    let patterns = ["public class", "private ", "public static void main", "import java."];
    patterns.iter().filter(|p| body.contains(*p)).count() as u32
}

fn score_markdown(body: &str) -> u32 {
    let patterns = ["# ", "](", "```", "- ["];
    patterns.iter().filter(|p| body.contains(*p)).count() as u32
}

fn score_html(body: &str) -> u32 {
    let patterns = ["<html", "<div", "<body", "</"];
    patterns.iter().filter(|p| body.contains(*p)).count() as u32
}
