//! Text <-> URL slug conversion used for navigation identifiers.
//!
//! Both directions are lossy: distinct names may share a slug, and
//! `deslugify` cannot restore punctuation or original casing.

use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());
static RE_MULTI_DASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--+").unwrap());

/// Lowercase, turn whitespace runs into `-`, drop anything outside
/// `[A-Za-z0-9_-]`, then collapse repeated dashes.
pub fn slugify(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lower = text.to_lowercase();
    let dashed = RE_WHITESPACE.replace_all(&lower, "-");
    let stripped = RE_NON_WORD.replace_all(&dashed, "");
    RE_MULTI_DASH.replace_all(&stripped, "-").into_owned()
}

/// Split on `-` and title-case each word. Display fallback only.
pub fn deslugify(slug: &str) -> String {
    if slug.is_empty() {
        return String::new();
    }
    slug.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase and strip every non-alphanumeric ASCII character. Used as the
/// second-chance key when an exact slug lookup misses.
pub fn normalize_name(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
