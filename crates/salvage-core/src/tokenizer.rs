//! Set-list tokenizer.
//!
//! Spreadsheet cells name sets inconsistently: comma separated, bare
//! concatenated, or through a `Group:<label>` shorthand. Matching is greedy
//! against the registry's longest-first name list, so a longer name always
//! wins over a shorter one that is its prefix.
//!
//! Results are ordered-unique: first occurrence order is kept, repeats are
//! dropped.

use indexmap::IndexSet;

use crate::catalogs::GROUP_PREFIX;
use crate::registry::SetRegistry;
use crate::types::SetField;

/// Non-fatal conditions met while tokenizing one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNotice {
    /// `Group:<label>` with no matching alias. The token is consumed.
    UnknownGroup { label: String },
    /// Nothing matched at the cursor; parsing stopped and `fragment` was dropped.
    UnparseableText { fragment: String },
}

/// Tokenize a free-text set list, discarding notices.
pub fn parse_set_list(text: &str, registry: &SetRegistry) -> IndexSet<String> {
    let mut found = IndexSet::new();
    parse_set_list_into(text, registry, &mut found, &mut Vec::new());
    found
}

/// Tokenize a set-option cell, collecting notices.
pub fn parse_set_field(
    field: &SetField,
    registry: &SetRegistry,
    notices: &mut Vec<ParseNotice>,
) -> IndexSet<String> {
    let mut found = IndexSet::new();
    match field {
        SetField::Text(text) => parse_set_list_into(text, registry, &mut found, notices),
        // Explicitly delimited: each element stands alone, so a name can never
        // run into its neighbour.
        SetField::List(items) => {
            for item in items {
                parse_set_list_into(item, registry, &mut found, notices);
            }
        }
    }
    found
}

fn parse_set_list_into(
    text: &str,
    registry: &SetRegistry,
    found: &mut IndexSet<String>,
    notices: &mut Vec<ParseNotice>,
) {
    let mut rest = text.trim();

    while !rest.is_empty() {
        if let Some(after_prefix) = rest.strip_prefix(GROUP_PREFIX) {
            let end = after_prefix.find(',').unwrap_or(after_prefix.len());
            let label = after_prefix[..end].trim();
            match registry.group(label) {
                Some(members) => found.extend(members.iter().cloned()),
                None => notices.push(ParseNotice::UnknownGroup {
                    label: label.to_string(),
                }),
            }
            rest = skip_separator(&after_prefix[end..]);
            continue;
        }

        match registry
            .known_sets()
            .iter()
            .find(|name| rest.starts_with(name.as_str()))
        {
            Some(name) => {
                found.insert(name.clone());
                rest = skip_separator(&rest[name.len()..]);
            }
            None => {
                notices.push(ParseNotice::UnparseableText {
                    fragment: rest.to_string(),
                });
                break;
            }
        }
    }
}

/// Drop surrounding whitespace and at most one comma.
fn skip_separator(s: &str) -> &str {
    let s = s.trim_start();
    s.strip_prefix(',').unwrap_or(s).trim_start()
}
