//! Whitespace normalization for extracted text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator between paragraphs in normalized text.
pub const PARAGRAPH_BREAK: &str = "\n\n";

static LINE_ENDINGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r").expect("valid regex"));
static HORIZONTAL_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid regex"));
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));
static ANY_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize text while keeping paragraph structure.
///
/// - Unifies `\r\n` and `\r` to `\n`
/// - Collapses runs of spaces/tabs to one space
/// - Collapses any run of blank lines to exactly one blank line
/// - Trims leading and trailing whitespace
///
/// Normalizing already-normalized text returns it unchanged.
pub fn normalize_paragraph_text(text: &str) -> String {
    let text = LINE_ENDINGS.replace_all(text, "\n");
    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, PARAGRAPH_BREAK);
    text.trim().to_string()
}

/// Collapse every whitespace run, newlines included, to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    ANY_SPACE.replace_all(text, " ").trim().to_string()
}

/// Split text into trimmed, non-empty paragraphs on blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
