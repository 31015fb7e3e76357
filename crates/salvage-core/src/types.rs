use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::catalogs::OPTION_SLOTS;

// ---------------------------------------------------------------------------
// Raw document records (lenient, spreadsheet-shaped)
// ---------------------------------------------------------------------------

/// One row of the build document. Every field is optional and tolerant of
/// the wrong JSON type; a bad cell degrades to `None` for that cell only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCharacter {
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(rename = "Display Name", default, deserialize_with = "lenient_text")]
    pub display_name: Option<String>,
    #[serde(rename = "Rank", default, deserialize_with = "lenient_text")]
    pub rank: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "lenient_text")]
    pub elemental_type: Option<String>,
    #[serde(rename = "Path", default, deserialize_with = "lenient_text")]
    pub path: Option<String>,
    #[serde(rename = "ID", default, deserialize_with = "lenient_integer")]
    pub id: Option<i64>,
    #[serde(rename = "Release", default, deserialize_with = "lenient_number")]
    pub release: Option<f64>,

    #[serde(rename = "Body", default, deserialize_with = "lenient_text")]
    pub body: Option<String>,
    #[serde(rename = "Feet", default, deserialize_with = "lenient_text")]
    pub feet: Option<String>,
    #[serde(rename = "Planar Sphere", default, deserialize_with = "lenient_text")]
    pub planar_sphere: Option<String>,
    #[serde(rename = "Link Rope", default, deserialize_with = "lenient_text")]
    pub link_rope: Option<String>,

    #[serde(rename = "Relic1", default, deserialize_with = "lenient_set_field")]
    pub relic1: Option<SetField>,
    #[serde(rename = "Relic2", default, deserialize_with = "lenient_set_field")]
    pub relic2: Option<SetField>,
    #[serde(rename = "Relic3", default, deserialize_with = "lenient_set_field")]
    pub relic3: Option<SetField>,
    #[serde(rename = "Relic4", default, deserialize_with = "lenient_set_field")]
    pub relic4: Option<SetField>,
    #[serde(rename = "Relic5", default, deserialize_with = "lenient_set_field")]
    pub relic5: Option<SetField>,
    #[serde(rename = "Planetary1", default, deserialize_with = "lenient_set_field")]
    pub planetary1: Option<SetField>,
    #[serde(rename = "Planetary2", default, deserialize_with = "lenient_set_field")]
    pub planetary2: Option<SetField>,
    #[serde(rename = "Planetary3", default, deserialize_with = "lenient_set_field")]
    pub planetary3: Option<SetField>,
    #[serde(rename = "Planetary4", default, deserialize_with = "lenient_set_field")]
    pub planetary4: Option<SetField>,
    #[serde(rename = "Planetary5", default, deserialize_with = "lenient_set_field")]
    pub planetary5: Option<SetField>,

    #[serde(rename = "Substats", default, deserialize_with = "lenient_text")]
    pub substats: Option<String>,
}

impl RawCharacter {
    /// Relic option cells in slot order (slot 1 first).
    pub fn relic_fields(&self) -> [Option<&SetField>; OPTION_SLOTS] {
        [
            self.relic1.as_ref(),
            self.relic2.as_ref(),
            self.relic3.as_ref(),
            self.relic4.as_ref(),
            self.relic5.as_ref(),
        ]
    }

    /// Planar ornament option cells in slot order (slot 1 first).
    pub fn planetary_fields(&self) -> [Option<&SetField>; OPTION_SLOTS] {
        [
            self.planetary1.as_ref(),
            self.planetary2.as_ref(),
            self.planetary3.as_ref(),
            self.planetary4.as_ref(),
            self.planetary5.as_ref(),
        ]
    }
}

/// One row of the relic-metadata document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRelicSet {
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(rename = "ID", default, deserialize_with = "lenient_integer")]
    pub id: Option<i64>,
    #[serde(rename = "Type", default, deserialize_with = "lenient_text")]
    pub set_type: Option<String>,
    #[serde(rename = "2-Piece Bonus", default, deserialize_with = "lenient_text")]
    pub two_piece_bonus: Option<String>,
    #[serde(rename = "4-Piece Bonus", default, deserialize_with = "lenient_text")]
    pub four_piece_bonus: Option<String>,
    #[serde(rename = "Group", default, deserialize_with = "lenient_text")]
    pub group: Option<String>,
}

/// A set-option cell: free spreadsheet text, or an explicitly delimited list.
#[derive(Debug, Clone, PartialEq)]
pub enum SetField {
    Text(String),
    List(Vec<String>),
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

fn lenient_set_field<'de, D>(deserializer: D) -> Result<Option<SetField>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(SetField::List(
            items.into_iter().filter_map(value_to_text).collect(),
        )),
        Some(other) => value_to_text(other).map(SetField::Text),
        None => None,
    })
}

// ---------------------------------------------------------------------------
// Set metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetKind {
    Relic,
    Ornament,
}

impl SetKind {
    /// Map the metadata `Type` discriminator to a kind.
    pub fn from_discriminator(raw: &str) -> Option<Self> {
        match raw {
            crate::catalogs::RELIC_SET_TYPE => Some(SetKind::Relic),
            crate::catalogs::ORNAMENT_SET_TYPE => Some(SetKind::Ornament),
            _ => None,
        }
    }
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetKind::Relic => f.write_str("relic"),
            SetKind::Ornament => f.write_str("ornament"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMetadata {
    pub name: String,
    pub kind: SetKind,
    /// Recency key; higher is newer. Missing ids load as 0.
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_piece_bonus: Option<String>,
    /// Always `None` for ornaments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub four_piece_bonus: Option<String>,
    pub group_names: Vec<String>,
}

/// Result of resolving a URL slug back to a set name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "name", rename_all = "lowercase")]
pub enum SetLookup {
    /// The slug maps to a registry member.
    Found(String),
    /// No registry entry; the name is a deslugified guess.
    Guessed(String),
}

impl SetLookup {
    pub fn name(&self) -> &str {
        match self {
            SetLookup::Found(name) | SetLookup::Guessed(name) => name,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SetLookup::Found(_))
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// The closed pool of twelve substats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalSubstat {
    #[serde(rename = "HP")]
    Hp,
    #[serde(rename = "DEF")]
    Def,
    #[serde(rename = "ATK")]
    Atk,
    #[serde(rename = "HP%")]
    HpPercent,
    #[serde(rename = "DEF%")]
    DefPercent,
    #[serde(rename = "ATK%")]
    AtkPercent,
    #[serde(rename = "Speed")]
    Speed,
    #[serde(rename = "CRIT Rate")]
    CritRate,
    #[serde(rename = "CRIT DMG")]
    CritDmg,
    #[serde(rename = "Break Effect")]
    BreakEffect,
    #[serde(rename = "Effect Hit Rate")]
    EffectHitRate,
    #[serde(rename = "Effect RES")]
    EffectRes,
}

impl CanonicalSubstat {
    pub const ALL: [CanonicalSubstat; 12] = [
        CanonicalSubstat::Hp,
        CanonicalSubstat::Def,
        CanonicalSubstat::Atk,
        CanonicalSubstat::HpPercent,
        CanonicalSubstat::DefPercent,
        CanonicalSubstat::AtkPercent,
        CanonicalSubstat::Speed,
        CanonicalSubstat::CritRate,
        CanonicalSubstat::CritDmg,
        CanonicalSubstat::BreakEffect,
        CanonicalSubstat::EffectHitRate,
        CanonicalSubstat::EffectRes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CanonicalSubstat::Hp => "HP",
            CanonicalSubstat::Def => "DEF",
            CanonicalSubstat::Atk => "ATK",
            CanonicalSubstat::HpPercent => "HP%",
            CanonicalSubstat::DefPercent => "DEF%",
            CanonicalSubstat::AtkPercent => "ATK%",
            CanonicalSubstat::Speed => "Speed",
            CanonicalSubstat::CritRate => "CRIT Rate",
            CanonicalSubstat::CritDmg => "CRIT DMG",
            CanonicalSubstat::BreakEffect => "Break Effect",
            CanonicalSubstat::EffectHitRate => "Effect Hit Rate",
            CanonicalSubstat::EffectRes => "Effect RES",
        }
    }
}

impl fmt::Display for CanonicalSubstat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CanonicalSubstat {
    type Err = String;

    /// Exact canonical name, case-insensitive. Aliases go through
    /// [`crate::parse_substats`] instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CanonicalSubstat::ALL
            .into_iter()
            .find(|stat| stat.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown substat \"{wanted}\""))
    }
}

/// Equipment positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    Head,
    Hands,
    Body,
    Feet,
    Sphere,
    Rope,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Head,
        Piece::Hands,
        Piece::Body,
        Piece::Feet,
        Piece::Sphere,
        Piece::Rope,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Piece::Head => "Head",
            Piece::Hands => "Hands",
            Piece::Body => "Body",
            Piece::Feet => "Feet",
            Piece::Sphere => "Planar Sphere",
            Piece::Rope => "Link Rope",
        }
    }

    /// Pieces whose main stat is filterable on a set page of this kind.
    pub fn filterable_for(kind: SetKind) -> [Piece; 2] {
        match kind {
            SetKind::Relic => [Piece::Body, Piece::Feet],
            SetKind::Ornament => [Piece::Sphere, Piece::Rope],
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Piece {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "head" => Ok(Piece::Head),
            "hands" => Ok(Piece::Hands),
            "body" => Ok(Piece::Body),
            "feet" => Ok(Piece::Feet),
            "sphere" | "planar sphere" | "planar-sphere" => Ok(Piece::Sphere),
            "rope" | "link rope" | "link-rope" => Ok(Piece::Rope),
            other => Err(format!("unknown piece \"{other}\"")),
        }
    }
}

// ---------------------------------------------------------------------------
// Character builds
// ---------------------------------------------------------------------------

/// Recommended main stats for the four variable pieces, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainStats {
    pub body: Vec<String>,
    pub feet: Vec<String>,
    pub planar_sphere: Vec<String>,
    pub link_rope: Vec<String>,
}

impl MainStats {
    /// Head and Hands have a fixed main stat and are never recommended.
    pub fn for_piece(&self, piece: Piece) -> &[String] {
        match piece {
            Piece::Body => &self.body,
            Piece::Feet => &self.feet,
            Piece::Sphere => &self.planar_sphere,
            Piece::Rope => &self.link_rope,
            Piece::Head | Piece::Hands => &[],
        }
    }
}

/// One recommended option slot (1-based) and the sets it names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetOption {
    pub slot: u8,
    pub sets: IndexSet<String>,
}

/// A fully normalized character record. Built only by the normalizer, so
/// the `all_*_sets_used` unions cannot drift from their options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterBuild {
    pub(crate) name: String,
    pub(crate) display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) elemental_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) path: Option<String>,
    pub(crate) id: i64,
    pub(crate) release_version: f64,
    pub(crate) main_stats: MainStats,
    pub(crate) relic_options: Vec<SetOption>,
    pub(crate) ornament_options: Vec<SetOption>,
    pub(crate) all_relic_sets_used: IndexSet<String>,
    pub(crate) all_ornament_sets_used: IndexSet<String>,
    pub(crate) substat_priority: Vec<CanonicalSubstat>,
    pub(crate) substat_comment: String,
}

impl CharacterBuild {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn rank(&self) -> Option<&str> {
        self.rank.as_deref()
    }

    pub fn elemental_type(&self) -> Option<&str> {
        self.elemental_type.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn release_version(&self) -> f64 {
        self.release_version
    }

    pub fn main_stats(&self) -> &MainStats {
        &self.main_stats
    }

    pub fn relic_options(&self) -> &[SetOption] {
        &self.relic_options
    }

    pub fn ornament_options(&self) -> &[SetOption] {
        &self.ornament_options
    }

    pub fn all_relic_sets_used(&self) -> &IndexSet<String> {
        &self.all_relic_sets_used
    }

    pub fn all_ornament_sets_used(&self) -> &IndexSet<String> {
        &self.all_ornament_sets_used
    }

    pub fn substat_priority(&self) -> &[CanonicalSubstat] {
        &self.substat_priority
    }

    pub fn substat_comment(&self) -> &str {
        &self.substat_comment
    }
}

/// Output of the substat parser: ranked stats plus the untouched source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubstatPriority {
    pub clean: Vec<CanonicalSubstat>,
    pub comment: String,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: DiagnosticSeverity,
    /// Character or set name the diagnostic belongs to.
    pub subject: String,
    /// Source column, e.g. `Relic2` or `Substats`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Warning,
    Info,
}
