use std::path::Path;

use salvage_core::ffi::SetUsers;
use salvage_core::{
    characters_using_set, filter_set_users, option_label, stat_usage, CanonicalSubstat,
    CharacterBuild, CharacterFilter, Corpus, Piece, SetKind, SetLookup, SetMetadata, StatFilter,
    StatUsage,
};

use crate::reader::load_data_dir;

/// Command-line form of a set page query.
pub struct SetQuery {
    pub slug: String,
    pub body: Vec<String>,
    pub feet: Vec<String>,
    pub sphere: Vec<String>,
    pub rope: Vec<String>,
    pub substats: Vec<CanonicalSubstat>,
    pub min_substats: usize,
    pub rank: Vec<String>,
    pub element: Vec<String>,
    pub path: Vec<String>,
}

impl SetQuery {
    fn stat_filter(&self) -> StatFilter {
        let mut filter = StatFilter {
            required_substats: self.min_substats,
            ..Default::default()
        };
        for (piece, stats) in [
            (Piece::Body, &self.body),
            (Piece::Feet, &self.feet),
            (Piece::Sphere, &self.sphere),
            (Piece::Rope, &self.rope),
        ] {
            if !stats.is_empty() {
                filter.main_stats.insert(piece, stats.clone());
            }
        }
        for stat in &self.substats {
            if !filter.substats.contains(stat) {
                filter.substats.push(*stat);
            }
        }
        filter
    }

    fn character_filter(&self) -> CharacterFilter {
        CharacterFilter {
            rank: self.rank.iter().cloned().collect(),
            elemental_type: self.element.iter().cloned().collect(),
            path: self.path.iter().cloned().collect(),
        }
    }
}

pub fn run_set(data_dir: &Path, query: &SetQuery, format: &str) -> Result<String, String> {
    let data = load_data_dir(data_dir)?;
    let corpus = &data.corpus;

    let lookup = corpus.resolve_set_name(&query.slug);
    let set = match &lookup {
        SetLookup::Found(name) => corpus.registry().metadata(name),
        SetLookup::Guessed(_) => None,
    };
    let Some(set) = set else {
        return Err(format!(
            "Unknown set \"{}\" (from slug \"{}\")",
            lookup.name(),
            query.slug
        ));
    };

    let stats = query.stat_filter();
    let users = filter_set_users(corpus, &set.name, &stats, &query.character_filter());
    // Popularity counts ignore the page filters.
    let usage = stat_usage(&characters_using_set(corpus, &set.name), set.kind);

    if format == "json" {
        let page = SetUsers {
            lookup: lookup.clone(),
            set: Some(set),
            users,
            usage: Some(usage),
        };
        return serde_json::to_string_pretty(&page)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    Ok(render_human(corpus, set, &users, &usage, &stats))
}

fn render_human(
    corpus: &Corpus,
    set: &SetMetadata,
    users: &[&CharacterBuild],
    usage: &StatUsage,
    stats: &StatFilter,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{} ({} set, id {})", set.name, set.kind, set.id));
    if let Some(bonus) = &set.two_piece_bonus {
        lines.push(format!("2-Piece: {bonus}"));
    }
    if let Some(bonus) = &set.four_piece_bonus {
        lines.push(format!("4-Piece: {bonus}"));
    }
    if !set.group_names.is_empty() {
        lines.push(format!("Groups: {}", set.group_names.join(", ")));
    }

    lines.push(String::new());
    if users.is_empty() {
        lines.push("No characters found.".into());
    } else {
        lines.push(format!("Characters ({}):", users.len()));
        for character in users {
            let options = match set.kind {
                SetKind::Relic => character.relic_options(),
                SetKind::Ornament => character.ornament_options(),
            };
            let labels: Vec<String> = options
                .iter()
                .enumerate()
                .filter(|(_, o)| o.sets.contains(&set.name))
                .map(|(i, o)| option_label(corpus, i + 1, o, set.kind))
                .collect();
            lines.push(format!(
                "  {} - {}",
                character.display_name(),
                labels.join(", ")
            ));
        }
    }

    lines.push(String::new());
    lines.push("Main stats:".into());
    for (piece, counts) in &usage.main_stats {
        let used: Vec<String> = counts
            .iter()
            .filter(|c| c.users > 0)
            .map(|c| format!("{} {}", c.stat, c.users))
            .collect();
        lines.push(format!("  {}: {}", piece.label(), display_list(&used)));
    }
    let used: Vec<String> = usage
        .substats
        .iter()
        .filter(|c| c.users > 0)
        .map(|c| format!("{} {}", c.stat, c.users))
        .collect();
    lines.push(format!("Substats: {}", display_list(&used)));

    if !stats.substats.is_empty() {
        lines.push(format!(
            "Matching at least {} of {} selected substats.",
            stats.required(),
            stats.substats.len()
        ));
    }

    lines.join("\n")
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".into()
    } else {
        items.join(", ")
    }
}
