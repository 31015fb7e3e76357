//! Relic recommendation corpus WASM bindings.
//!
//! The browser front end builds one [`Corpus`] handle at startup and queries
//! it for every page. Structured results cross the boundary as JSON strings.

use salvage_core::{build_corpus, characters_using_set, search, CharacterFilter, StatFilter};
use salvage_lint::{LintConfig, Linter};
use wasm_bindgen::prelude::*;

/// Slugify a set or character name for use in a URL.
#[wasm_bindgen(js_name = "slugify")]
pub fn wasm_slugify(text: &str) -> String {
    salvage_core::slugify(text)
}

/// Best-effort display name for a slug.
#[wasm_bindgen(js_name = "deslugify")]
pub fn wasm_deslugify(slug: &str) -> String {
    salvage_core::deslugify(slug)
}

/// Build a corpus and return it whole.
///
/// @returns JSON string with `{ success: boolean, data?: Corpus, error?: string }`
#[wasm_bindgen(js_name = "buildCorpus")]
pub fn wasm_build_corpus(build_json: &str, relic_json: &str) -> String {
    salvage_core::build_corpus_to_json(build_json, relic_json)
}

/// Immutable corpus handle held by the page script.
#[wasm_bindgen]
pub struct Corpus {
    inner: salvage_core::Corpus,
}

#[wasm_bindgen]
impl Corpus {
    /// Build from the two source documents. Throws with the load error
    /// message when either document is not a JSON array.
    #[wasm_bindgen(constructor)]
    pub fn new(build_json: &str, relic_json: &str) -> Result<Corpus, JsError> {
        let inner = build_corpus(build_json, relic_json)?;
        Ok(Corpus { inner })
    }

    /// `{ status: "found" | "guessed", name: string }`
    #[wasm_bindgen(js_name = "resolveSetName")]
    pub fn resolve_set_name(&self, slug: &str) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.resolve_set_name(slug))?)
    }

    #[wasm_bindgen(js_name = "toJson")]
    pub fn to_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner)?)
    }

    /// Users of a set, optionally narrowed by `{ stats?, attributes? }`.
    #[wasm_bindgen(js_name = "charactersUsingSet")]
    pub fn characters_using_set(&self, set_name: &str, filters_json: &str) -> Result<String, JsError> {
        let users = characters_using_set(&self.inner, set_name);
        if filters_json.trim().is_empty() {
            return Ok(serde_json::to_string(&users)?);
        }

        let filters: salvage_core::ffi::SetUsersOptions = serde_json::from_str(filters_json)?;
        let users: Vec<_> = users
            .into_iter()
            .filter(|c| filters.stats.matches(c) && filters.attributes.matches(c))
            .collect();
        Ok(serde_json::to_string(&users)?)
    }

    /// Characters passing an attribute filter, in corpus order.
    #[wasm_bindgen(js_name = "filterCharacters")]
    pub fn filter_characters(&self, filter_json: &str) -> Result<String, JsError> {
        let filter: CharacterFilter = serde_json::from_str(filter_json)?;
        Ok(serde_json::to_string(&filter.apply(self.inner.characters()))?)
    }

    /// Largest "match at least" value the UI should offer for a selection.
    #[wasm_bindgen(js_name = "maxRequiredSubstats")]
    pub fn max_required_substats(&self, stat_filter_json: &str) -> Result<usize, JsError> {
        let filter: StatFilter = serde_json::from_str(stat_filter_json)?;
        Ok(filter.max_required())
    }

    pub fn search(&self, query: &str) -> Result<String, JsError> {
        Ok(serde_json::to_string(&search(&self.inner, query))?)
    }

    pub fn diagnostics(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.inner.diagnostics())?)
    }

    /// Lint with an optional `{ rules: { id: "off" | "warn" | "error" } }` config.
    pub fn lint(&self, config_json: &str) -> Result<String, JsError> {
        let config: LintConfig = if config_json.trim().is_empty() {
            LintConfig::default()
        } else {
            serde_json::from_str(config_json)?
        };
        Ok(serde_json::to_string(&Linter::new(config).lint(&self.inner))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELICS: &str = r#"[{"Name": "Rutilant Arena", "ID": 307, "Type": "Planetary Ornament Set"}]"#;
    const BUILDS: &str = r#"[{"Name": "Seele", "ID": 1102, "Path": "The Hunt", "Planetary1": "Rutilant Arena"}]"#;

    #[test]
    fn slug_helpers() {
        assert_eq!(wasm_slugify("Rutilant Arena"), "rutilant-arena");
        assert_eq!(wasm_deslugify("rutilant-arena"), "Rutilant Arena");
    }

    #[test]
    fn handle_queries() {
        let corpus = Corpus::new(BUILDS, RELICS).ok().expect("corpus builds");
        let lookup: serde_json::Value =
            serde_json::from_str(&corpus.resolve_set_name("rutilant-arena").ok().unwrap()).unwrap();
        assert_eq!(lookup["status"], "found");

        let users: serde_json::Value =
            serde_json::from_str(&corpus.characters_using_set("Rutilant Arena", "").ok().unwrap())
                .unwrap();
        assert_eq!(users[0]["name"], "Seele");

        let filtered: serde_json::Value = serde_json::from_str(
            &corpus
                .characters_using_set("Rutilant Arena", r#"{"attributes": {"path": ["Erudition"]}}"#)
                .ok()
                .unwrap(),
        )
        .unwrap();
        assert!(filtered.as_array().unwrap().is_empty());
    }
}
