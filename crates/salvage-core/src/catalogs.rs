use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::{CanonicalSubstat, Piece};

/// `Type` discriminator of a cavern relic row in the metadata document.
pub const RELIC_SET_TYPE: &str = "Relic Set";
/// `Type` discriminator of a planar ornament row.
pub const ORNAMENT_SET_TYPE: &str = "Planetary Ornament Set";

/// Shorthand prefix that expands a group alias inside a set-list cell.
pub const GROUP_PREFIX: &str = "Group:";

/// Number of option columns per kind (`Relic1..Relic5`, `Planetary1..Planetary5`).
pub const OPTION_SLOTS: usize = 5;

/// Upper bound for the "match at least N substats" selector.
pub const MAX_REQUIRED_SUBSTATS: usize = 4;

pub const CORPUS_VERSION: &str = "1.0";

/// Short forms seen in the spreadsheets. Keys are lowercase.
///
/// Bare `hp`/`def`/`atk` mean the percentage rolls: flat rolls are never
/// prioritized, so the sheets only spell them out as "HP"/"DEF"/"ATK" when
/// they mean the percent stat.
pub static SUBSTAT_ALIASES: LazyLock<HashMap<&'static str, CanonicalSubstat>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert("hp", CanonicalSubstat::HpPercent);
        m.insert("def", CanonicalSubstat::DefPercent);
        m.insert("atk", CanonicalSubstat::AtkPercent);
        m.insert("spd", CanonicalSubstat::Speed);
        m.insert("ehr", CanonicalSubstat::EffectHitRate);
        m.insert("ehr%", CanonicalSubstat::EffectHitRate);
        m.insert("eff res", CanonicalSubstat::EffectRes);
        m.insert("eff res%", CanonicalSubstat::EffectRes);
        m.insert("crit rate", CanonicalSubstat::CritRate);
        m.insert("crit dmg", CanonicalSubstat::CritDmg);
        m.insert("break effect%", CanonicalSubstat::BreakEffect);
        m
    });

/// Canonical substats ordered by name length, longest first. Ties keep
/// canonical order (stable sort).
pub static SUBSTATS_BY_LENGTH: LazyLock<Vec<CanonicalSubstat>> = LazyLock::new(|| {
    let mut v = CanonicalSubstat::ALL.to_vec();
    v.sort_by(|a, b| b.name().len().cmp(&a.name().len()));
    v
});

/// Main stats a piece can roll, in display order.
pub fn main_stat_menu(piece: Piece) -> &'static [&'static str] {
    match piece {
        Piece::Head => &["HP"],
        Piece::Hands => &["ATK"],
        Piece::Body => &[
            "HP%",
            "DEF%",
            "ATK%",
            "CRIT Rate",
            "CRIT DMG",
            "Effect HIT Rate",
            "Outgoing Healing",
        ],
        Piece::Feet => &["HP%", "DEF%", "ATK%", "Speed"],
        Piece::Sphere => &[
            "HP%",
            "DEF%",
            "ATK%",
            "Physical DMG",
            "Fire DMG",
            "Ice DMG",
            "Wind DMG",
            "Lightning DMG",
            "Quantum DMG",
            "Imaginary DMG",
        ],
        Piece::Rope => &["HP%", "DEF%", "ATK%", "Break Effect", "Energy Regen Rate"],
    }
}

/// Character attribute filter categories and their known values.
pub const RANK_OPTIONS: &[&str] = &["5", "4"];
pub const ELEMENT_OPTIONS: &[&str] = &[
    "Physical",
    "Fire",
    "Ice",
    "Lightning",
    "Wind",
    "Quantum",
    "Imaginary",
];
pub const PATH_OPTIONS: &[&str] = &[
    "Destruction",
    "The Hunt",
    "Erudition",
    "Harmony",
    "Nihility",
    "Preservation",
    "Abundance",
    "Remembrance",
];
