//! Rule: missing-recommendations
//!
//! A character with no usable relic options or no usable ornament options
//! after tokenizing. Either the cells are blank or nothing in them matched
//! a known set.

use salvage_core::{Corpus, SetKind};

use crate::{LintDiagnostic, LintRule};

pub struct MissingRecommendationsRule {
    pub require_relics: bool,
    pub require_ornaments: bool,
}

impl Default for MissingRecommendationsRule {
    fn default() -> Self {
        Self {
            require_relics: true,
            require_ornaments: true,
        }
    }
}

impl LintRule for MissingRecommendationsRule {
    fn id(&self) -> &'static str {
        "missing-recommendations"
    }

    fn summary(&self) -> &'static str {
        "Characters should recommend at least one relic and one ornament option"
    }

    fn check(&self, corpus: &Corpus) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for character in corpus.characters() {
            let gaps = [
                (self.require_relics, character.relic_options().is_empty(), SetKind::Relic, "Relic1"),
                (
                    self.require_ornaments,
                    character.ornament_options().is_empty(),
                    SetKind::Ornament,
                    "Planetary1",
                ),
            ];
            for (required, empty, kind, field) in gaps {
                if required && empty {
                    diagnostics.push(self.finding(
                        character.name().to_string(),
                        field,
                        format!(
                            "\"{}\" has no {kind} set recommendation",
                            character.display_name()
                        ),
                    ));
                }
            }
        }

        diagnostics
    }
}
