//! Rule: unknown-main-stat
//!
//! A recommended main stat that the piece cannot roll. Usually a typo in the
//! sheet, and it silently never matches a main-stat filter.

use salvage_core::catalogs::main_stat_menu;
use salvage_core::types::Piece;
use salvage_core::Corpus;

use crate::{LintDiagnostic, LintRule};

const RECOMMENDED_PIECES: [Piece; 4] = [Piece::Body, Piece::Feet, Piece::Sphere, Piece::Rope];

pub struct UnknownMainStatRule;

impl LintRule for UnknownMainStatRule {
    fn id(&self) -> &'static str {
        "unknown-main-stat"
    }

    fn summary(&self) -> &'static str {
        "Recommended main stats should exist on the piece's menu"
    }

    fn check(&self, corpus: &Corpus) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for character in corpus.characters() {
            for piece in RECOMMENDED_PIECES {
                let menu = main_stat_menu(piece);
                for stat in character.main_stats().for_piece(piece) {
                    if !menu.iter().any(|m| m.eq_ignore_ascii_case(stat)) {
                        diagnostics.push(self.finding(
                            character.name().to_string(),
                            piece.label(),
                            format!(
                                "\"{stat}\" is not a {} main stat (expected one of: {})",
                                piece.label(),
                                menu.join(", ")
                            ),
                        ));
                    }
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_with(body: &str, sphere: &str) -> Corpus {
        let builds = format!(
            r#"[{{"Name": "Himeko", "ID": 1003, "Body": "{body}", "Planar Sphere": "{sphere}"}}]"#
        );
        salvage_core::build_corpus(&builds, "[]").unwrap()
    }

    #[test]
    fn detects_stat_off_menu() {
        let corpus = corpus_with("CRIT Rate, Speed", "Fire DMG");
        let results = UnknownMainStatRule.check(&corpus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].field, "Body");
        assert!(results[0].message.starts_with("\"Speed\" is not a Body main stat"));
    }

    #[test]
    fn menu_match_ignores_case() {
        let corpus = corpus_with("effect hit rate", "fire dmg");
        assert!(UnknownMainStatRule.check(&corpus).is_empty());
    }
}
