//! Surface-text helpers: detokenization, spacing normalization, casing,
//! and word counting.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::Token;

static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([.,;:!?])").expect("valid regex"));
static SPACE_AFTER_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s+").expect("valid regex"));
static SPACE_BEFORE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\)").expect("valid regex"));
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));

/// Join tokens with conventional English spacing: no space before closing
/// punctuation, none after an opening bracket, none before a contraction
/// suffix.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && needs_space(&tokens[i - 1].text, &token.text) {
            out.push(' ');
        }
        out.push_str(&token.text);
    }
    out
}

fn needs_space(prev: &str, current: &str) -> bool {
    if matches!(current, "." | "," | ";" | ":" | "!" | "?" | ")" | "]" | "%") {
        return false;
    }
    if current.starts_with('\'') || current == "n't" {
        return false;
    }
    !matches!(prev, "(" | "[")
}

/// Tighten whitespace around punctuation in assembled document text.
pub fn normalize_spacing(text: &str) -> String {
    let text = SPACE_BEFORE_PUNCT.replace_all(text, "$1");
    let text = SPACE_AFTER_OPEN.replace_all(&text, "(");
    let text = SPACE_BEFORE_CLOSE.replace_all(&text, ")");
    MULTI_SPACE.replace_all(&text, " ").trim().to_string()
}

/// Word count over raw text, Unicode-aware.
pub fn count_words(text: &str) -> usize {
    text.unicode_words().count()
}

pub fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
