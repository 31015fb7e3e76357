use serde::Serialize;

use crate::catalogs::CORPUS_VERSION;
use crate::error::{Document, LoadError};
use crate::normalizer::normalize_character;
use crate::registry::SetRegistry;
use crate::slug::{deslugify, slugify};
use crate::types::*;

/// The finished, read-only dataset. There is no mutation API; filters and
/// searches in [`crate::query`] derive new views from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    version: String,
    /// Newest release first, then ascending id.
    characters: Vec<CharacterBuild>,
    registry: SetRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl Corpus {
    /// Build the registry, normalize every build row, and sort.
    pub fn assemble(builds: &[RawCharacter], relic_sets: &[RawRelicSet]) -> Self {
        let mut diagnostics = Vec::new();
        let registry = SetRegistry::build(relic_sets, &mut diagnostics);

        let mut characters: Vec<CharacterBuild> = builds
            .iter()
            .map(|raw| normalize_character(raw, &registry, &mut diagnostics))
            .collect();
        sort_characters(&mut characters);

        log::info!(
            "corpus built: {} characters, {} relic sets, {} ornament sets, {} diagnostics",
            characters.len(),
            registry.relic_sets().len(),
            registry.ornament_sets().len(),
            diagnostics.len()
        );

        Self {
            version: CORPUS_VERSION.to_string(),
            characters,
            registry,
            diagnostics,
        }
    }

    pub fn characters(&self) -> &[CharacterBuild] {
        &self.characters
    }

    pub fn relic_sets(&self) -> &[SetMetadata] {
        self.registry.relic_sets()
    }

    pub fn ornament_sets(&self) -> &[SetMetadata] {
        self.registry.ornament_sets()
    }

    pub fn registry(&self) -> &SetRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn resolve_set_name(&self, slug: &str) -> SetLookup {
        self.registry.resolve_set_name(slug)
    }

    pub fn character(&self, name: &str) -> Option<&CharacterBuild> {
        self.characters.iter().find(|c| c.name() == name)
    }

    /// Match a navigation slug against character names. On a miss the
    /// deslugified guess is returned as the error for display.
    pub fn character_by_slug(&self, slug: &str) -> Result<&CharacterBuild, String> {
        self.characters
            .iter()
            .find(|c| slugify(c.name()) == slug)
            .ok_or_else(|| deslugify(slug))
    }
}

/// Parse both documents and assemble the corpus. Both documents are always
/// attempted so the error names every one that failed.
pub fn build_corpus(build_json: &str, relic_json: &str) -> Result<Corpus, LoadError> {
    let builds = serde_json::from_str::<Vec<RawCharacter>>(build_json).map_err(|source| {
        LoadError::Json {
            document: Document::Builds,
            source,
        }
    });
    let relic_sets = serde_json::from_str::<Vec<RawRelicSet>>(relic_json).map_err(|source| {
        LoadError::Json {
            document: Document::RelicSets,
            source,
        }
    });

    match (builds, relic_sets) {
        (Ok(builds), Ok(relic_sets)) => Ok(Corpus::assemble(&builds, &relic_sets)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(builds), Err(relic_sets)) => Err(LoadError::Multiple(vec![builds, relic_sets])),
    }
}

/// Release descending, then id ascending. Stable, so fully tied rows keep
/// document order.
fn sort_characters(characters: &mut [CharacterBuild]) {
    characters.sort_by(|a, b| {
        b.release_version
            .total_cmp(&a.release_version)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RELICS: &str = r#"[
        {"Name": "Band of Sizzling Thunder", "ID": 109, "Type": "Relic Set", "2-Piece Bonus": "Lightning DMG +10%"},
        {"Name": "Rutilant Arena", "ID": 307, "Type": "Planetary Ornament Set", "Group": "Fantastic"}
    ]"#;

    fn character(name: &str, id: i64, release: f64) -> String {
        format!(r#"{{"Name": "{name}", "ID": {id}, "Release": {release}}}"#)
    }

    #[test]
    fn newer_release_sorts_first() {
        let builds = format!("[{}, {}]", character("Old", 1, 2.0), character("New", 2, 2.1));
        let corpus = build_corpus(&builds, RELICS).unwrap();
        let names: Vec<&str> = corpus.characters().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[test]
    fn equal_release_sorts_by_ascending_id() {
        let builds = format!("[{}, {}]", character("Five", 5, 2.0), character("Three", 3, 2.0));
        let corpus = build_corpus(&builds, RELICS).unwrap();
        let names: Vec<&str> = corpus.characters().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Three", "Five"]);
    }

    #[test]
    fn missing_release_sorts_last() {
        let builds = format!(r#"[{{"Name": "Unreleased", "ID": 1}}, {}]"#, character("Out", 9, 1.0));
        let corpus = build_corpus(&builds, RELICS).unwrap();
        assert_eq!(corpus.characters()[1].name(), "Unreleased");
    }

    #[test]
    fn invalid_build_document_is_fatal() {
        let err = build_corpus("not json", RELICS).unwrap_err();
        assert_eq!(err.documents(), vec![Document::Builds]);
    }

    #[test]
    fn both_documents_failing_are_reported_together() {
        let err = build_corpus("{}", "[1, 2").unwrap_err();
        assert_eq!(err.documents(), vec![Document::Builds, Document::RelicSets]);
    }

    #[test]
    fn lenient_cells_do_not_fail_the_load() {
        let builds = r#"[{"Name": "Odd", "ID": "7", "Release": "1.5", "Rank": 5, "Relic1": 42, "Substats": null}]"#;
        let corpus = build_corpus(builds, RELICS).unwrap();
        let c = &corpus.characters()[0];
        assert_eq!(c.id(), 7);
        assert_eq!(c.release_version(), 1.5);
        assert_eq!(c.rank(), Some("5"));
        assert!(c.relic_options().is_empty());
        assert_eq!(corpus.diagnostics().len(), 1);
    }

    #[test]
    fn character_slug_lookup() {
        let builds = format!("[{}]", character("Topaz & Numby", 1, 2.0));
        let corpus = build_corpus(&builds, RELICS).unwrap();
        assert_eq!(
            corpus.character_by_slug("topaz-numby").unwrap().name(),
            "Topaz & Numby"
        );
        assert_eq!(corpus.character_by_slug("no-one").unwrap_err(), "No One");
    }

    #[test]
    fn corpus_delegates_set_lists_to_registry() {
        let corpus = build_corpus("[]", RELICS).unwrap();
        assert_eq!(corpus.relic_sets().len(), 1);
        assert_eq!(corpus.ornament_sets()[0].name, "Rutilant Arena");
        assert!(corpus.resolve_set_name("rutilant-arena").is_found());
    }
}
