//! Rule: slug-collision
//!
//! Two distinct set names that slugify to the same navigation id. Only one
//! of them is reachable by slug; the other resolves to the wrong page.

use salvage_core::Corpus;

use crate::{LintDiagnostic, LintRule};

pub struct SlugCollisionRule;

impl LintRule for SlugCollisionRule {
    fn id(&self) -> &'static str {
        "slug-collision"
    }

    fn summary(&self) -> &'static str {
        "Set names should produce distinct slugs"
    }

    fn check(&self, corpus: &Corpus) -> Vec<LintDiagnostic> {
        corpus
            .registry()
            .slug_collisions()
            .into_iter()
            .map(|(slug, names)| {
                let winner = corpus.resolve_set_name(&slug);
                self.finding(
                    names.join(" / "),
                    "Name",
                    format!(
                        "{} sets share the slug \"{slug}\"; it resolves to \"{}\"",
                        names.len(),
                        winner.name()
                    ),
                )
            })
            .collect()
    }
}
