use pretty_assertions::assert_eq;
use salvage_core::{
    build_corpus, characters_using_set, parse_set_list, parse_substats, slugify, CanonicalSubstat,
    Corpus, Document, SetKind, SetLookup,
};

const BUILDS: &str = include_str!("../../../samples/data/characters.json");
const RELICS: &str = include_str!("../../../samples/data/relics.json");

// ---------------------------------------------------------------------------
// Helper: full pipeline over the sample documents
// ---------------------------------------------------------------------------
fn sample_corpus() -> Corpus {
    build_corpus(BUILDS, RELICS).expect("sample documents load")
}

fn names(sets: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    sets.into_iter().map(|s| s.as_ref().to_string()).collect()
}

// ===========================================================================
// Registry
// ===========================================================================

#[test]
fn sets_partition_and_sort_newest_first() {
    let corpus = sample_corpus();
    let relics: Vec<&str> = corpus.relic_sets().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        relics,
        vec![
            "Eagle of Twilight Line",
            "Genius of Brilliant Stars",
            "Band of Sizzling Thunder",
            "Knight of Purity Palace",
            "Hunter of Glacial Forest",
            "Musketeer of Wild Wheat",
        ]
    );
    let ornaments: Vec<&str> = corpus.ornament_sets().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        ornaments,
        vec![
            "Sprightly Vonwacq",
            "Rutilant Arena",
            "Inert Salsotto",
            "Fleet of the Ageless",
            "Space Sealing Station",
        ]
    );
    assert!(corpus.ornament_sets().iter().all(|s| s.kind == SetKind::Ornament));
    assert!(corpus.ornament_sets().iter().all(|s| s.four_piece_bonus.is_none()));
}

#[test]
fn known_sets_are_longest_first() {
    let corpus = sample_corpus();
    let lengths: Vec<usize> = corpus
        .registry()
        .known_sets()
        .iter()
        .map(|s| s.chars().count())
        .collect();
    let mut sorted = lengths.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(lengths, sorted);
}

#[test]
fn every_known_set_tokenizes_to_itself() {
    let corpus = sample_corpus();
    for name in corpus.registry().known_sets() {
        let parsed = parse_set_list(name, corpus.registry());
        assert_eq!(names(&parsed), vec![name.clone()], "set {name}");
    }
}

#[test]
fn every_known_set_resolves_from_its_slug() {
    let corpus = sample_corpus();
    assert!(corpus.registry().slug_collisions().is_empty());
    for name in corpus.registry().known_sets() {
        assert_eq!(
            corpus.resolve_set_name(&slugify(name)),
            SetLookup::Found(name.clone())
        );
    }
}

#[test]
fn unknown_slug_is_a_guess() {
    let corpus = sample_corpus();
    let lookup = corpus.resolve_set_name("broken-keel");
    assert_eq!(lookup, SetLookup::Guessed("Broken Keel".into()));
    assert!(!lookup.is_found());
}

#[test]
fn group_aliases_expand() {
    let corpus = sample_corpus();
    let mut parsed = names(&parse_set_list("Group:Fantastic", corpus.registry()));
    parsed.sort();
    assert_eq!(parsed, vec!["Inert Salsotto", "Rutilant Arena"]);
}

#[test]
fn comma_and_bare_concatenation_agree() {
    let corpus = sample_corpus();
    let expected = vec!["Genius of Brilliant Stars", "Musketeer of Wild Wheat"];
    assert_eq!(
        names(&parse_set_list(
            "Genius of Brilliant Stars,Musketeer of Wild Wheat",
            corpus.registry()
        )),
        expected
    );
    assert_eq!(
        names(&parse_set_list(
            "Genius of Brilliant StarsMusketeer of Wild Wheat",
            corpus.registry()
        )),
        expected
    );
}

// ===========================================================================
// Characters
// ===========================================================================

#[test]
fn characters_sort_by_release_then_id() {
    let corpus = sample_corpus();
    let order: Vec<&str> = corpus.characters().iter().map(|c| c.name()).collect();
    assert_eq!(
        order,
        vec!["Boothill", "Kafka", "Imbibitor Lunae", "Seele", "Serval", "Gepard"]
    );
}

#[test]
fn kafka_is_fully_normalized() {
    let corpus = sample_corpus();
    let kafka = corpus.character("Kafka").unwrap();

    assert_eq!(kafka.display_name(), "Kafka");
    assert_eq!(kafka.rank(), Some("5"));
    assert_eq!(kafka.elemental_type(), Some("Lightning"));
    assert_eq!(kafka.main_stats().feet, vec!["Speed", "ATK%"]);

    let slots: Vec<u8> = kafka.relic_options().iter().map(|o| o.slot).collect();
    assert_eq!(slots, vec![1, 2]);
    assert_eq!(
        names(kafka.all_relic_sets_used()),
        vec!["Band of Sizzling Thunder", "Musketeer of Wild Wheat"]
    );
    assert_eq!(
        names(kafka.all_ornament_sets_used()),
        vec!["Space Sealing Station", "Rutilant Arena", "Inert Salsotto"]
    );
    assert_eq!(
        kafka.substat_priority(),
        &[
            CanonicalSubstat::Speed,
            CanonicalSubstat::AtkPercent,
            CanonicalSubstat::EffectHitRate,
            CanonicalSubstat::EffectRes,
        ]
    );
    assert_eq!(
        kafka.substat_comment(),
        "SPD > ATK% > EHR (for debuff teams) > Effect RES"
    );
}

#[test]
fn unions_always_match_options() {
    let corpus = sample_corpus();
    for c in corpus.characters() {
        let relics: Vec<&String> = c.relic_options().iter().flat_map(|o| &o.sets).collect();
        assert!(relics.iter().all(|s| c.all_relic_sets_used().contains(*s)));
        assert!(c
            .all_relic_sets_used()
            .iter()
            .all(|s| relics.contains(&s)));

        let ornaments: Vec<&String> = c.ornament_options().iter().flat_map(|o| &o.sets).collect();
        assert!(ornaments.iter().all(|s| c.all_ornament_sets_used().contains(*s)));
        assert!(c
            .all_ornament_sets_used()
            .iter()
            .all(|s| ornaments.contains(&s)));
    }
}

#[test]
fn array_set_fields_are_tokenized_per_element() {
    let corpus = sample_corpus();
    let serval = corpus.character("Serval").unwrap();
    assert_eq!(serval.ornament_options().len(), 1);
    assert_eq!(
        names(&serval.ornament_options()[0].sets),
        vec!["Inert Salsotto", "Space Sealing Station"]
    );
}

#[test]
fn display_name_is_kept_when_present() {
    let corpus = sample_corpus();
    let il = corpus.character_by_slug("imbibitor-lunae").unwrap();
    assert_eq!(il.display_name(), "Dan Heng • Imbibitor Lunae");
}

#[test]
fn set_usage_uses_corpus_order() {
    let corpus = sample_corpus();
    let users: Vec<&str> = characters_using_set(&corpus, "Rutilant Arena")
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(users, vec!["Kafka", "Imbibitor Lunae", "Seele"]);

    let users: Vec<&str> = characters_using_set(&corpus, "Fleet of the Ageless")
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(users, vec!["Boothill"]);
}

// ===========================================================================
// Diagnostics
// ===========================================================================

#[test]
fn non_fatal_conditions_become_diagnostics() {
    let corpus = sample_corpus();
    let codes: Vec<(&str, &str, &str)> = corpus
        .diagnostics()
        .iter()
        .map(|d| (d.code.as_str(), d.subject.as_str(), d.field.as_str()))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("SALVAGE-I002", "Legacy Entry", "Type"),
            ("SALVAGE-W001", "Gepard", "Planetary1"),
            ("SALVAGE-W002", "Gepard", "Planetary2"),
            ("SALVAGE-I001", "Boothill", "Substats"),
        ]
    );

    let gepard = corpus.character("Gepard").unwrap();
    assert!(gepard.ornament_options().is_empty());
    assert_eq!(gepard.relic_options().len(), 1);
}

#[test]
fn transport_failures_name_the_document() {
    let err = build_corpus(BUILDS, "{\"not\": \"an array\"}").unwrap_err();
    assert_eq!(err.documents(), vec![Document::RelicSets]);
    assert!(err.to_string().contains("relic-set metadata"));
}

// ===========================================================================
// Substats and boundaries
// ===========================================================================

#[test]
fn substat_examples() {
    let parsed = parse_substats("SPD > CRIT DMG > CRIT Rate");
    assert_eq!(
        parsed.clean,
        vec![
            CanonicalSubstat::Speed,
            CanonicalSubstat::CritDmg,
            CanonicalSubstat::CritRate
        ]
    );
    assert_eq!(parsed.comment, "SPD > CRIT DMG > CRIT Rate");

    let parsed = parse_substats("hp, hp, def");
    assert_eq!(
        parsed.clean,
        vec![CanonicalSubstat::HpPercent, CanonicalSubstat::DefPercent]
    );
}

#[test]
fn empty_inputs_yield_empty_collections() {
    let corpus = sample_corpus();
    assert!(parse_substats("").clean.is_empty());
    assert!(parse_set_list("", corpus.registry()).is_empty());
    assert!(parse_set_list("   ", corpus.registry()).is_empty());
    assert!(parse_set_list("Group:", corpus.registry()).is_empty());
}

#[test]
fn rebuilding_is_byte_identical() {
    let first = serde_json::to_string(&sample_corpus()).unwrap();
    let second = serde_json::to_string(&sample_corpus()).unwrap();
    assert_eq!(first, second);
}
