//! Rule: unused-set
//!
//! A known set that no character recommends.

use salvage_core::query::characters_using_set;
use salvage_core::Corpus;

use crate::{LintDiagnostic, LintRule, LintSeverity};

pub struct UnusedSetRule;

impl LintRule for UnusedSetRule {
    fn id(&self) -> &'static str {
        "unused-set"
    }

    fn summary(&self) -> &'static str {
        "Every known set should be recommended by at least one character"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Info
    }

    fn check(&self, corpus: &Corpus) -> Vec<LintDiagnostic> {
        corpus
            .relic_sets()
            .iter()
            .chain(corpus.ornament_sets())
            .filter(|set| characters_using_set(corpus, &set.name).is_empty())
            .map(|set| {
                self.finding(
                    set.name.clone(),
                    "",
                    format!("{} set \"{}\" is not recommended by any character", set.kind, set.name),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_unused_sets() {
        let relics = r#"[
            {"Name": "Band of Sizzling Thunder", "ID": 109, "Type": "Relic Set"},
            {"Name": "Hunter of Glacial Forest", "ID": 104, "Type": "Relic Set"},
            {"Name": "Fleet of the Ageless", "ID": 302, "Type": "Planetary Ornament Set", "Group": "SPD"}
        ]"#;
        let builds = r#"[{"Name": "Kafka", "Relic1": "Band of Sizzling Thunder", "Planetary1": "Group:SPD"}]"#;
        let corpus = salvage_core::build_corpus(builds, relics).unwrap();
        let results = UnusedSetRule.check(&corpus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].subject, "Hunter of Glacial Forest");
        assert_eq!(
            results[0].message,
            "relic set \"Hunter of Glacial Forest\" is not recommended by any character"
        );
    }
}
