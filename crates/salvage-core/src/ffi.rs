//! JSON-in, JSON-out API for bindings that cannot hold a [`Corpus`].
//!
//! Every function rebuilds the corpus from the two documents and answers with
//! the envelope `{ "success": bool, "data"?: ..., "error"?: string }`.

use serde::{Deserialize, Serialize};

use crate::corpus::{build_corpus, Corpus};
use crate::query::{
    characters_using_set, filter_set_users, search, stat_usage, CharacterFilter, StatFilter,
    StatUsage,
};
use crate::types::*;

// ---------------------------------------------------------------------------
// Options types (deserialized from JSON input)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetUsersOptions {
    #[serde(default)]
    pub stats: StatFilter,
    #[serde(default)]
    pub attributes: CharacterFilter,
}

// ---------------------------------------------------------------------------
// Result types (serialized to JSON output)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FfiResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetUsers<'a> {
    pub lookup: SetLookup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<&'a SetMetadata>,
    pub users: Vec<&'a CharacterBuild>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<StatUsage>,
}

// ---------------------------------------------------------------------------
// Public FFI functions
// ---------------------------------------------------------------------------

/// Build the corpus and return it whole.
pub fn build_corpus_to_json(build_json: &str, relic_json: &str) -> String {
    with_corpus(build_json, relic_json, |corpus| Ok(to_envelope(corpus)))
}

/// Resolve a navigation slug against the relic-set metadata alone.
pub fn resolve_set_name_to_json(relic_json: &str, slug: &str) -> String {
    with_corpus("[]", relic_json, |corpus| {
        Ok(to_envelope(&corpus.resolve_set_name(slug)))
    })
}

/// Case-insensitive search over set and character names.
pub fn search_to_json(build_json: &str, relic_json: &str, query: &str) -> String {
    with_corpus(build_json, relic_json, |corpus| {
        Ok(to_envelope(&search(corpus, query)))
    })
}

/// Users of the set behind `slug`, narrowed by the filters in `options_json`
/// (`{ stats?: StatFilter, attributes?: CharacterFilter }`, empty string allowed).
pub fn set_users_to_json(
    build_json: &str,
    relic_json: &str,
    slug: &str,
    options_json: &str,
) -> String {
    let opts: SetUsersOptions = if options_json.trim().is_empty() {
        SetUsersOptions::default()
    } else {
        match serde_json::from_str(options_json) {
            Ok(o) => o,
            Err(e) => return failure(format!("Invalid options JSON: {e}")),
        }
    };

    with_corpus(build_json, relic_json, |corpus| {
        let lookup = corpus.resolve_set_name(slug);
        let set = corpus.registry().metadata(lookup.name());
        let users = filter_set_users(corpus, lookup.name(), &opts.stats, &opts.attributes);
        let usage = set.map(|s| stat_usage(&characters_using_set(corpus, &s.name), s.kind));
        Ok(to_envelope(&SetUsers {
            lookup,
            set,
            users,
            usage,
        }))
    })
}

// ---------------------------------------------------------------------------
// Envelope helpers
// ---------------------------------------------------------------------------

fn with_corpus<F>(build_json: &str, relic_json: &str, f: F) -> String
where
    F: FnOnce(&Corpus) -> Result<String, String> + std::panic::UnwindSafe,
{
    let result = std::panic::catch_unwind(|| {
        let corpus = build_corpus(build_json, relic_json).map_err(|e| e.to_string())?;
        f(&corpus)
    });

    match result {
        Ok(Ok(json)) => json,
        Ok(Err(message)) => failure(message),
        Err(_) => failure("Internal panic while building corpus".to_string()),
    }
}

fn to_envelope<T: Serialize>(data: &T) -> String {
    let result = FfiResult {
        success: true,
        data: Some(data),
        error: None,
    };
    serde_json::to_string(&result)
        .unwrap_or_else(|e| failure(format!("JSON serialization error: {e}")))
}

fn failure(message: String) -> String {
    serde_json::json!({ "success": false, "error": message }).to_string()
}
