use indexmap::IndexSet;

use crate::catalogs::OPTION_SLOTS;
use crate::registry::SetRegistry;
use crate::substats::parse_substats_with;
use crate::tokenizer::{parse_set_field, ParseNotice};
use crate::types::*;

/// Map one raw build row to a typed [`CharacterBuild`].
///
/// Never fails: a malformed cell degrades to an empty value for that cell
/// and leaves a diagnostic behind.
pub fn normalize_character(
    raw: &RawCharacter,
    registry: &SetRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) -> CharacterBuild {
    let name = raw.name.clone().unwrap_or_default();
    let display_name = raw
        .display_name
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| name.clone());

    let relic_options = normalize_options(
        &name,
        "Relic",
        raw.relic_fields(),
        registry,
        diagnostics,
    );
    let ornament_options = normalize_options(
        &name,
        "Planetary",
        raw.planetary_fields(),
        registry,
        diagnostics,
    );
    let all_relic_sets_used = union_of(&relic_options);
    let all_ornament_sets_used = union_of(&ornament_options);

    let mut unresolved = Vec::new();
    let substats = parse_substats_with(raw.substats.as_deref().unwrap_or(""), &mut unresolved);
    for token in unresolved {
        log::debug!("{name}: dropped substat token \"{token}\"");
        diagnostics.push(Diagnostic {
            code: "SALVAGE-I001".into(),
            severity: DiagnosticSeverity::Info,
            subject: name.clone(),
            field: "Substats".into(),
            message: format!("substat token \"{token}\" does not name a known substat"),
        });
    }

    CharacterBuild {
        display_name,
        rank: raw.rank.clone().filter(|r| !r.is_empty()),
        elemental_type: raw.elemental_type.clone().filter(|t| !t.is_empty()),
        path: raw.path.clone().filter(|p| !p.is_empty()),
        id: raw.id.unwrap_or(0),
        release_version: raw.release.unwrap_or(0.0),
        main_stats: MainStats {
            body: split_list(raw.body.as_deref()),
            feet: split_list(raw.feet.as_deref()),
            planar_sphere: split_list(raw.planar_sphere.as_deref()),
            link_rope: split_list(raw.link_rope.as_deref()),
        },
        relic_options,
        ornament_options,
        all_relic_sets_used,
        all_ornament_sets_used,
        substat_priority: substats.clean,
        substat_comment: substats.comment,
        name,
    }
}

/// Tokenize each option column on its own; empty results are dropped but the
/// surviving options keep their slot number.
fn normalize_options(
    character: &str,
    column: &str,
    fields: [Option<&SetField>; OPTION_SLOTS],
    registry: &SetRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<SetOption> {
    let mut options = Vec::new();
    for (index, field) in fields.into_iter().enumerate() {
        let Some(field) = field else { continue };
        let slot = index as u8 + 1;
        let mut notices = Vec::new();
        let sets = parse_set_field(field, registry, &mut notices);
        for notice in notices {
            diagnostics.push(notice_to_diagnostic(character, &format!("{column}{slot}"), notice));
        }
        if !sets.is_empty() {
            options.push(SetOption { slot, sets });
        }
    }
    options
}

fn union_of(options: &[SetOption]) -> IndexSet<String> {
    options
        .iter()
        .flat_map(|o| o.sets.iter().cloned())
        .collect()
}

/// Comma list with whitespace trimmed; blank entries are dropped.
fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn notice_to_diagnostic(character: &str, field: &str, notice: ParseNotice) -> Diagnostic {
    let (code, message) = match notice {
        ParseNotice::UnknownGroup { label } => (
            "SALVAGE-W001",
            format!("unknown relic group \"{label}\""),
        ),
        ParseNotice::UnparseableText { fragment } => (
            "SALVAGE-W002",
            format!("unparseable set text \"{}\" was dropped", preview(&fragment)),
        ),
    };
    log::warn!("{character} [{field}]: {message}");
    Diagnostic {
        code: code.into(),
        severity: DiagnosticSeverity::Warning,
        subject: character.to_string(),
        field: field.to_string(),
        message,
    }
}

/// First 20 characters of a fragment, with an ellipsis when cut.
fn preview(fragment: &str) -> String {
    let mut chars = fragment.chars();
    let head: String = chars.by_ref().take(20).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
