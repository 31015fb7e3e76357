use std::path::Path;

use salvage_core::{option_label, CharacterBuild, Corpus, Piece, SetKind};

use crate::reader::load_data_dir;

const RECOMMENDED_PIECES: [Piece; 4] = [Piece::Body, Piece::Feet, Piece::Sphere, Piece::Rope];

pub fn run_character(data_dir: &Path, slug: &str, format: &str) -> Result<String, String> {
    let data = load_data_dir(data_dir)?;
    let corpus = &data.corpus;

    let character = corpus
        .character_by_slug(slug)
        .map_err(|guess| format!("Unknown character \"{guess}\" (from slug \"{slug}\")"))?;

    if format == "json" {
        return serde_json::to_string_pretty(character)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    Ok(render_human(corpus, character))
}

fn render_human(corpus: &Corpus, character: &CharacterBuild) -> String {
    let mut lines: Vec<String> = Vec::new();

    if character.display_name() == character.name() {
        lines.push(character.name().to_string());
    } else {
        lines.push(format!("{} ({})", character.display_name(), character.name()));
    }

    let attributes: Vec<String> = [
        character.rank().map(|r| format!("Rank {r}")),
        character.elemental_type().map(String::from),
        character.path().map(String::from),
        Some(format!("release {}", character.release_version())),
    ]
    .into_iter()
    .flatten()
    .collect();
    lines.push(attributes.join(" | "));

    for (heading, kind, options) in [
        ("Relics", SetKind::Relic, character.relic_options()),
        ("Ornaments", SetKind::Ornament, character.ornament_options()),
    ] {
        lines.push(String::new());
        lines.push(format!("{heading}:"));
        if options.is_empty() {
            lines.push("  none found".into());
        }
        for (i, option) in options.iter().enumerate() {
            let sets: Vec<&str> = option.sets.iter().map(String::as_str).collect();
            lines.push(format!(
                "  {}: {}",
                option_label(corpus, i + 1, option, kind),
                sets.join(", ")
            ));
        }
    }

    lines.push(String::new());
    lines.push("Main stats:".into());
    for piece in RECOMMENDED_PIECES {
        let stats = character.main_stats().for_piece(piece);
        if !stats.is_empty() {
            lines.push(format!("  {}: {}", piece.label(), stats.join(", ")));
        }
    }

    let substats: Vec<&str> = character.substat_priority().iter().map(|s| s.name()).collect();
    if !substats.is_empty() {
        lines.push(format!("Substats: {}", substats.join(" > ")));
    }
    if !character.substat_comment().is_empty() {
        lines.push(format!("Notes: {}", character.substat_comment()));
    }

    lines.join("\n")
}
