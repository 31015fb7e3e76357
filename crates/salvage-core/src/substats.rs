//! Substat priority parser.
//!
//! Accepted separators are `>`, `≥`, `=`, `/` and `,`; any run of them is one
//! priority break. Parenthesized and bracketed text is annotation and is
//! removed before splitting, but survives untouched in the returned comment.

use regex::Regex;
use std::sync::LazyLock;

use crate::catalogs::{SUBSTATS_BY_LENGTH, SUBSTAT_ALIASES};
use crate::types::{CanonicalSubstat, SubstatPriority};

static RE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").unwrap());
static RE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[>≥=/,]+").unwrap());

/// Parse a priority string, dropping tokens that resolve to nothing.
pub fn parse_substats(text: &str) -> SubstatPriority {
    parse_substats_with(text, &mut Vec::new())
}

/// Like [`parse_substats`], also collecting the tokens that were dropped.
pub fn parse_substats_with(text: &str, unresolved: &mut Vec<String>) -> SubstatPriority {
    if text.is_empty() {
        return SubstatPriority::default();
    }

    let stripped = RE_ANNOTATION.replace_all(text, "");
    let mut clean: Vec<CanonicalSubstat> = Vec::new();

    for part in RE_SEPARATOR.split(stripped.trim()) {
        let token = part.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        match resolve_token(&token) {
            Some(stat) => {
                if !clean.contains(&stat) {
                    clean.push(stat);
                }
            }
            None => unresolved.push(part.trim().to_string()),
        }
    }

    SubstatPriority {
        clean,
        comment: text.to_string(),
    }
}

/// Alias table, then exact canonical name, then longest canonical name
/// contained in the token. `token` must already be lowercase.
fn resolve_token(token: &str) -> Option<CanonicalSubstat> {
    if let Some(stat) = SUBSTAT_ALIASES.get(token) {
        return Some(*stat);
    }
    if let Some(stat) = CanonicalSubstat::ALL
        .into_iter()
        .find(|s| s.name().to_lowercase() == token)
    {
        return Some(stat);
    }
    SUBSTATS_BY_LENGTH
        .iter()
        .copied()
        .find(|s| token.contains(&s.name().to_lowercase()))
}
