//! Stateless projections over a finished [`Corpus`].
//!
//! Nothing here mutates the corpus; every function returns a fresh view
//! borrowing from it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::catalogs::{main_stat_menu, MAX_REQUIRED_SUBSTATS};
use crate::corpus::Corpus;
use crate::types::*;

// ---------------------------------------------------------------------------
// Character attribute filter
// ---------------------------------------------------------------------------

/// Rank / elemental type / path selection. Values within a category are
/// alternatives; categories combine with AND. An empty category is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterFilter {
    #[serde(default)]
    pub rank: BTreeSet<String>,
    #[serde(default)]
    pub elemental_type: BTreeSet<String>,
    #[serde(default)]
    pub path: BTreeSet<String>,
}

impl CharacterFilter {
    pub fn is_active(&self) -> bool {
        !(self.rank.is_empty() && self.elemental_type.is_empty() && self.path.is_empty())
    }

    pub fn matches(&self, character: &CharacterBuild) -> bool {
        category_matches(&self.rank, character.rank())
            && category_matches(&self.elemental_type, character.elemental_type())
            && category_matches(&self.path, character.path())
    }

    pub fn apply<'a, I>(&self, characters: I) -> Vec<&'a CharacterBuild>
    where
        I: IntoIterator<Item = &'a CharacterBuild>,
    {
        characters.into_iter().filter(|c| self.matches(c)).collect()
    }
}

fn category_matches(selected: &BTreeSet<String>, value: Option<&str>) -> bool {
    selected.is_empty() || value.is_some_and(|v| selected.contains(v))
}

// ---------------------------------------------------------------------------
// Set usage
// ---------------------------------------------------------------------------

/// Characters recommending `set_name`, in corpus order. The set's kind picks
/// which union is consulted; unknown names match nobody.
pub fn characters_using_set<'a>(corpus: &'a Corpus, set_name: &str) -> Vec<&'a CharacterBuild> {
    let Some(kind) = corpus.registry().kind_of(set_name) else {
        return Vec::new();
    };
    corpus
        .characters()
        .iter()
        .filter(|c| match kind {
            SetKind::Ornament => c.all_ornament_sets_used().contains(set_name),
            SetKind::Relic => c.all_relic_sets_used().contains(set_name),
        })
        .collect()
}

/// Characters whose substat priority includes `stat`.
pub fn characters_prioritizing<'a>(
    corpus: &'a Corpus,
    stat: CanonicalSubstat,
) -> Vec<&'a CharacterBuild> {
    corpus
        .characters()
        .iter()
        .filter(|c| c.substat_priority().contains(&stat))
        .collect()
}

/// "Option N", flagged as a 2+2 split when a relic option names at least two
/// sets and every one of them is a relic set.
pub fn option_label(corpus: &Corpus, position: usize, option: &SetOption, kind: SetKind) -> String {
    let mut label = format!("Option {position}");
    if kind == SetKind::Relic
        && option.sets.len() >= 2
        && option.sets.iter().all(|s| corpus.registry().is_relic(s))
    {
        label.push_str(" (2 pcs + 2 pcs)");
    }
    label
}

// ---------------------------------------------------------------------------
// Stat filter
// ---------------------------------------------------------------------------

/// Main-stat and substat selection applied to the users of one set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatFilter {
    #[serde(default)]
    pub main_stats: BTreeMap<Piece, Vec<String>>,
    #[serde(default)]
    pub substats: Vec<CanonicalSubstat>,
    #[serde(default = "one")]
    pub required_substats: usize,
}

fn one() -> usize {
    1
}

impl Default for StatFilter {
    fn default() -> Self {
        Self {
            main_stats: BTreeMap::new(),
            substats: Vec::new(),
            required_substats: 1,
        }
    }
}

impl StatFilter {
    /// Largest meaningful "match at least" value for the current selection.
    pub fn max_required(&self) -> usize {
        self.substats.len().clamp(1, MAX_REQUIRED_SUBSTATS)
    }

    /// `required_substats` clamped into `1..=max_required()`.
    pub fn required(&self) -> usize {
        self.required_substats.clamp(1, self.max_required())
    }

    /// Flip one substat in or out of the selection.
    pub fn toggle_substat(&mut self, stat: CanonicalSubstat) {
        match self.substats.iter().position(|s| *s == stat) {
            Some(i) => {
                self.substats.remove(i);
            }
            None => self.substats.push(stat),
        }
        self.required_substats = self.required();
    }

    /// Flip one main stat in or out of a piece's selection.
    pub fn toggle_main_stat(&mut self, piece: Piece, stat: &str) {
        let selected = self.main_stats.entry(piece).or_default();
        match selected.iter().position(|s| s == stat) {
            Some(i) => {
                selected.remove(i);
            }
            None => selected.push(stat.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.substats.is_empty() || self.main_stats.values().any(|v| !v.is_empty())
    }

    pub fn matches(&self, character: &CharacterBuild) -> bool {
        self.main_stats_match(character) && self.substats_match(character)
    }

    fn main_stats_match(&self, character: &CharacterBuild) -> bool {
        self.main_stats
            .iter()
            .filter(|(_, selected)| !selected.is_empty())
            .all(|(piece, selected)| {
                let recommended = character.main_stats().for_piece(*piece);
                !recommended.is_empty() && selected.iter().any(|s| recommended.contains(s))
            })
    }

    /// A character that recommends fewer substats than required matches only
    /// when every one of its substats is selected.
    fn substats_match(&self, character: &CharacterBuild) -> bool {
        if self.substats.is_empty() {
            return true;
        }
        let wanted = character.substat_priority();
        if wanted.is_empty() {
            return false;
        }
        let hits = wanted.iter().filter(|s| self.substats.contains(s)).count();
        let required = self.required();
        if wanted.len() < required {
            hits == wanted.len()
        } else {
            hits >= required
        }
    }
}

/// Users of `set_name` passing both filters, in corpus order.
pub fn filter_set_users<'a>(
    corpus: &'a Corpus,
    set_name: &str,
    stats: &StatFilter,
    attributes: &CharacterFilter,
) -> Vec<&'a CharacterBuild> {
    characters_using_set(corpus, set_name)
        .into_iter()
        .filter(|c| stats.matches(c) && attributes.matches(c))
        .collect()
}

// ---------------------------------------------------------------------------
// Stat usage counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCount {
    pub stat: String,
    pub users: usize,
}

/// How many of `users` recommend each menu stat on the pieces relevant to
/// `kind`, and each substat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatUsage {
    pub main_stats: BTreeMap<Piece, Vec<StatCount>>,
    pub substats: Vec<StatCount>,
}

pub fn stat_usage(users: &[&CharacterBuild], kind: SetKind) -> StatUsage {
    let main_stats = Piece::filterable_for(kind)
        .into_iter()
        .map(|piece| {
            let counts = main_stat_menu(piece)
                .iter()
                .map(|stat| StatCount {
                    stat: stat.to_string(),
                    users: users
                        .iter()
                        .filter(|c| c.main_stats().for_piece(piece).iter().any(|s| s == stat))
                        .count(),
                })
                .collect();
            (piece, counts)
        })
        .collect();

    let substats = CanonicalSubstat::ALL
        .into_iter()
        .map(|stat| StatCount {
            stat: stat.name().to_string(),
            users: users
                .iter()
                .filter(|c| c.substat_priority().contains(&stat))
                .count(),
        })
        .collect();

    StatUsage {
        main_stats,
        substats,
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<'a> {
    pub relic_sets: Vec<&'a str>,
    pub ornament_sets: Vec<&'a str>,
    pub characters: Vec<&'a CharacterBuild>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.relic_sets.is_empty() && self.ornament_sets.is_empty() && self.characters.is_empty()
    }
}

/// Case-insensitive substring search. Sets come back alphabetical,
/// characters by display name. A blank query finds nothing.
pub fn search<'a>(corpus: &'a Corpus, query: &str) -> SearchResults<'a> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults {
            relic_sets: Vec::new(),
            ornament_sets: Vec::new(),
            characters: Vec::new(),
        };
    }

    let matching_sets = |sets: &'a [SetMetadata]| {
        let mut names: Vec<&'a str> = sets
            .iter()
            .map(|s| s.name.as_str())
            .filter(|n| n.to_lowercase().contains(&needle))
            .collect();
        names.sort_unstable();
        names
    };
    let relic_sets = matching_sets(corpus.relic_sets());
    let ornament_sets = matching_sets(corpus.ornament_sets());

    let mut characters: Vec<&CharacterBuild> = corpus
        .characters()
        .iter()
        .filter(|c| {
            c.name().to_lowercase().contains(&needle)
                || c.display_name().to_lowercase().contains(&needle)
        })
        .collect();
    characters.sort_by(|a, b| {
        a.display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase())
            .then_with(|| a.display_name().cmp(b.display_name()))
    });

    SearchResults {
        relic_sets,
        ornament_sets,
        characters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::build_corpus;
    use pretty_assertions::assert_eq;

    const RELICS: &str = r#"[
        {"Name": "Genius of Brilliant Stars", "ID": 110, "Type": "Relic Set"},
        {"Name": "Band of Sizzling Thunder", "ID": 109, "Type": "Relic Set"},
        {"Name": "Rutilant Arena", "ID": 307, "Type": "Planetary Ornament Set"},
        {"Name": "Fleet of the Ageless", "ID": 302, "Type": "Planetary Ornament Set"}
    ]"#;

    const BUILDS: &str = r#"[
        {"Name": "Kafka", "ID": 1, "Release": 1.2, "Rank": 5, "Type": "Lightning", "Path": "Nihility",
         "Body": "ATK%", "Feet": "Speed, ATK%", "Relic1": "Band of Sizzling Thunder",
         "Relic2": "Genius of Brilliant Stars, Band of Sizzling Thunder",
         "Planetary1": "Fleet of the Ageless", "Substats": "SPD > ATK% > EHR"},
        {"Name": "Serval", "ID": 2, "Release": 1.0, "Rank": 4, "Type": "Lightning", "Path": "Erudition",
         "Body": "CRIT Rate", "Feet": "ATK%", "Relic1": "Band of Sizzling Thunder",
         "Planetary1": "Rutilant Arena", "Substats": "CRIT Rate > CRIT DMG > ATK%"},
        {"Name": "Qingque", "Display Name": "Qingque", "ID": 3, "Release": 1.0, "Rank": 4, "Type": "Quantum", "Path": "Erudition",
         "Body": "CRIT Rate, CRIT DMG", "Relic1": "Genius of Brilliant Stars",
         "Planetary1": "Rutilant Arena", "Substats": "CRIT"}
    ]"#;

    fn corpus() -> Corpus {
        build_corpus(BUILDS, RELICS).unwrap()
    }

    fn names(chars: &[&CharacterBuild]) -> Vec<String> {
        chars.iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn set_usage_follows_set_kind() {
        let corpus = corpus();
        assert_eq!(
            names(&characters_using_set(&corpus, "Band of Sizzling Thunder")),
            vec!["Kafka", "Serval"]
        );
        assert_eq!(
            names(&characters_using_set(&corpus, "Rutilant Arena")),
            vec!["Serval", "Qingque"]
        );
        assert!(characters_using_set(&corpus, "Unknown").is_empty());
    }

    #[test]
    fn attribute_filter_or_within_and_across() {
        let corpus = corpus();
        let mut filter = CharacterFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(corpus.characters()).len(), 3);

        filter.rank.insert("4".into());
        filter.elemental_type.insert("Lightning".into());
        filter.elemental_type.insert("Quantum".into());
        assert_eq!(names(&filter.apply(corpus.characters())), vec!["Serval", "Qingque"]);

        filter.path.insert("Nihility".into());
        assert!(filter.apply(corpus.characters()).is_empty());
    }

    #[test]
    fn substat_filter_required_count() {
        let corpus = corpus();
        let mut filter = StatFilter::default();
        filter.toggle_substat(CanonicalSubstat::CritRate);
        filter.toggle_substat(CanonicalSubstat::CritDmg);
        filter.required_substats = 2;
        let users = filter_set_users(
            &corpus,
            "Band of Sizzling Thunder",
            &filter,
            &CharacterFilter::default(),
        );
        assert_eq!(names(&users), vec!["Serval"]);
    }

    #[test]
    fn character_with_few_substats_needs_all_selected() {
        let corpus = corpus();
        // Qingque's only resolvable substat comes from "CRIT" -> nothing.
        let qingque = corpus.character("Qingque").unwrap();
        assert!(qingque.substat_priority().is_empty());

        let mut filter = StatFilter::default();
        filter.toggle_substat(CanonicalSubstat::Speed);
        assert!(!filter.matches(qingque));

        let kafka = corpus.character("Kafka").unwrap();
        filter.substats = vec![
            CanonicalSubstat::Speed,
            CanonicalSubstat::AtkPercent,
            CanonicalSubstat::EffectHitRate,
            CanonicalSubstat::CritRate,
        ];
        filter.required_substats = 4;
        // Kafka lists three substats, all selected.
        assert!(filter.matches(kafka));
    }

    #[test]
    fn required_is_clamped() {
        let mut filter = StatFilter {
            required_substats: 9,
            ..Default::default()
        };
        assert_eq!(filter.required(), 1);
        for stat in CanonicalSubstat::ALL {
            filter.toggle_substat(stat);
        }
        assert_eq!(filter.max_required(), 4);
        assert_eq!(filter.required(), 1);
        filter.required_substats = 0;
        assert_eq!(filter.required(), 1);
    }

    #[test]
    fn main_stat_filter_requires_every_active_piece() {
        let corpus = corpus();
        let mut filter = StatFilter::default();
        filter.toggle_main_stat(Piece::Body, "CRIT Rate");
        let users = filter_set_users(
            &corpus,
            "Genius of Brilliant Stars",
            &filter,
            &CharacterFilter::default(),
        );
        assert_eq!(names(&users), vec!["Qingque"]);

        filter.toggle_main_stat(Piece::Feet, "ATK%");
        let users = filter_set_users(
            &corpus,
            "Genius of Brilliant Stars",
            &filter,
            &CharacterFilter::default(),
        );
        // Qingque has no Feet recommendation at all.
        assert!(users.is_empty());

        filter.toggle_main_stat(Piece::Feet, "ATK%");
        assert!(filter.is_active());
        assert!(filter.main_stats[&Piece::Feet].is_empty());
    }

    #[test]
    fn stat_usage_counts_users() {
        let corpus = corpus();
        let users = characters_using_set(&corpus, "Band of Sizzling Thunder");
        let usage = stat_usage(&users, SetKind::Relic);
        let feet = &usage.main_stats[&Piece::Feet];
        let atk = feet.iter().find(|c| c.stat == "ATK%").unwrap();
        assert_eq!(atk.users, 2);
        let speed = feet.iter().find(|c| c.stat == "Speed").unwrap();
        assert_eq!(speed.users, 1);
        assert!(!usage.main_stats.contains_key(&Piece::Sphere));
        let crit = usage.substats.iter().find(|c| c.stat == "CRIT Rate").unwrap();
        assert_eq!(crit.users, 1);
    }

    #[test]
    fn two_plus_two_label() {
        let corpus = corpus();
        let kafka = corpus.character("Kafka").unwrap();
        let labels: Vec<String> = kafka
            .relic_options()
            .iter()
            .enumerate()
            .map(|(i, o)| option_label(&corpus, i + 1, o, SetKind::Relic))
            .collect();
        assert_eq!(labels, vec!["Option 1", "Option 2 (2 pcs + 2 pcs)"]);
    }

    #[test]
    fn prioritizing_substat() {
        let corpus = corpus();
        assert_eq!(
            names(&characters_prioritizing(&corpus, CanonicalSubstat::AtkPercent)),
            vec!["Kafka", "Serval"]
        );
    }

    #[test]
    fn search_across_kinds() {
        let corpus = corpus();
        let results = search(&corpus, "  AR ");
        assert_eq!(results.relic_sets, vec!["Genius of Brilliant Stars"]);
        assert_eq!(results.ornament_sets, vec!["Rutilant Arena"]);
        assert!(results.characters.is_empty());

        let results = search(&corpus, "q");
        assert_eq!(names(&results.characters), vec!["Qingque"]);
        assert!(search(&corpus, "").is_empty());
    }
}
