use std::path::Path;

use salvage_core::{search, slugify};

use crate::reader::load_data_dir;

pub fn run_search(data_dir: &Path, query: &str, format: &str) -> Result<String, String> {
    let data = load_data_dir(data_dir)?;
    let results = search(&data.corpus, query);

    if format == "json" {
        return serde_json::to_string_pretty(&results)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    if results.is_empty() {
        return Ok(format!("No results for \"{}\".", query.trim()));
    }

    let mut lines: Vec<String> = Vec::new();
    for (heading, names) in [
        ("Relic sets", &results.relic_sets),
        ("Ornament sets", &results.ornament_sets),
    ] {
        if !names.is_empty() {
            lines.push(format!("{heading}:"));
            for name in names {
                lines.push(format!("  {name} ({})", slugify(name)));
            }
        }
    }
    if !results.characters.is_empty() {
        lines.push("Characters:".into());
        for character in &results.characters {
            lines.push(format!(
                "  {} ({})",
                character.display_name(),
                slugify(character.name())
            ));
        }
    }

    Ok(lines.join("\n"))
}
