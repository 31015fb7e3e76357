use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::slug::{deslugify, normalize_name, slugify};
use crate::types::*;

/// Authoritative list of known relic and ornament sets, plus the lookup
/// tables the tokenizer and slug resolution depend on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRegistry {
    relic_sets: Vec<SetMetadata>,
    ornament_sets: Vec<SetMetadata>,
    /// Relic then ornament names, longest first. Drives greedy matching.
    known_sets: Vec<String>,
    slug_index: BTreeMap<String, String>,
    normalized_index: BTreeMap<String, String>,
    groups: IndexMap<String, IndexSet<String>>,
}

impl SetRegistry {
    /// Build the registry from metadata rows. Rows without a `Name` or with an
    /// unrecognized `Type` are skipped and reported through `diagnostics`.
    pub fn build(records: &[RawRelicSet], diagnostics: &mut Vec<Diagnostic>) -> Self {
        let mut relic_sets: Vec<SetMetadata> = Vec::new();
        let mut ornament_sets: Vec<SetMetadata> = Vec::new();
        // Position of each (kind, name) inside its partition.
        let mut seen: HashMap<(SetKind, String), usize> = HashMap::new();
        let mut groups: IndexMap<String, IndexSet<String>> = IndexMap::new();

        for (index, record) in records.iter().enumerate() {
            let Some(name) = record.name.as_deref().filter(|n| !n.is_empty()) else {
                push_skipped(
                    diagnostics,
                    format!("#{}", index + 1),
                    "Name",
                    "relic-metadata record has no Name and was skipped".into(),
                );
                continue;
            };

            let group_names = split_group_field(record.group.as_deref());
            // Group membership does not depend on the Type discriminator.
            for group in &group_names {
                groups
                    .entry(group.clone())
                    .or_default()
                    .insert(name.to_string());
            }

            let kind = match record.set_type.as_deref().and_then(SetKind::from_discriminator) {
                Some(kind) => kind,
                None => {
                    push_skipped(
                        diagnostics,
                        name.to_string(),
                        "Type",
                        format!(
                            "unrecognized set type {:?}; \"{}\" is not a known set",
                            record.set_type.as_deref().unwrap_or(""),
                            name
                        ),
                    );
                    continue;
                }
            };

            let partition = match kind {
                SetKind::Relic => &mut relic_sets,
                SetKind::Ornament => &mut ornament_sets,
            };
            // Repeated name: the first row keeps its text, the last row's id wins.
            if let Some(&position) = seen.get(&(kind, name.to_string())) {
                partition[position].id = record.id.unwrap_or(0);
                continue;
            }
            seen.insert((kind, name.to_string()), partition.len());

            let metadata = SetMetadata {
                name: name.to_string(),
                kind,
                id: record.id.unwrap_or(0),
                two_piece_bonus: record.two_piece_bonus.clone().filter(|b| !b.is_empty()),
                four_piece_bonus: match kind {
                    SetKind::Relic => record.four_piece_bonus.clone().filter(|b| !b.is_empty()),
                    SetKind::Ornament => None,
                },
                group_names,
            };
            partition.push(metadata);
        }

        // Newest first; stable, so equal ids keep document order.
        relic_sets.sort_by(|a, b| b.id.cmp(&a.id));
        ornament_sets.sort_by(|a, b| b.id.cmp(&a.id));

        let mut known_sets: Vec<String> = relic_sets
            .iter()
            .chain(ornament_sets.iter())
            .map(|s| s.name.clone())
            .collect();
        known_sets.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let mut slug_index = BTreeMap::new();
        let mut normalized_index = BTreeMap::new();
        for name in &known_sets {
            slug_index.insert(slugify(name), name.clone());
            normalized_index.insert(normalize_name(name), name.clone());
        }

        log::debug!(
            "set registry: {} relic sets, {} ornament sets, {} groups",
            relic_sets.len(),
            ornament_sets.len(),
            groups.len()
        );

        Self {
            relic_sets,
            ornament_sets,
            known_sets,
            slug_index,
            normalized_index,
            groups,
        }
    }

    /// Relic sets, newest first.
    pub fn relic_sets(&self) -> &[SetMetadata] {
        &self.relic_sets
    }

    /// Ornament sets, newest first.
    pub fn ornament_sets(&self) -> &[SetMetadata] {
        &self.ornament_sets
    }

    /// Every known set name, longest first.
    pub fn known_sets(&self) -> &[String] {
        &self.known_sets
    }

    pub fn group(&self, label: &str) -> Option<&IndexSet<String>> {
        self.groups.get(label)
    }

    pub fn groups(&self) -> &IndexMap<String, IndexSet<String>> {
        &self.groups
    }

    pub fn is_relic(&self, name: &str) -> bool {
        self.relic_sets.iter().any(|s| s.name == name)
    }

    pub fn is_ornament(&self, name: &str) -> bool {
        self.ornament_sets.iter().any(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.is_relic(name) || self.is_ornament(name)
    }

    /// Ornament membership wins when a name exists under both kinds.
    pub fn kind_of(&self, name: &str) -> Option<SetKind> {
        if self.is_ornament(name) {
            Some(SetKind::Ornament)
        } else if self.is_relic(name) {
            Some(SetKind::Relic)
        } else {
            None
        }
    }

    /// Metadata for `name`, preferring the kind reported by [`Self::kind_of`].
    pub fn metadata(&self, name: &str) -> Option<&SetMetadata> {
        self.ornament_sets
            .iter()
            .chain(self.relic_sets.iter())
            .find(|s| s.name == name)
    }

    /// Exact slug, then normalized name, then a deslugified guess.
    pub fn resolve_set_name(&self, slug: &str) -> SetLookup {
        if slug.is_empty() {
            return SetLookup::Guessed(String::new());
        }
        if let Some(name) = self.slug_index.get(slug) {
            return SetLookup::Found(name.clone());
        }
        if let Some(name) = self.normalized_index.get(&normalize_name(slug)) {
            return SetLookup::Found(name.clone());
        }
        let guess = deslugify(slug);
        if self.contains(&guess) {
            SetLookup::Found(guess)
        } else {
            SetLookup::Guessed(guess)
        }
    }

    /// Known names whose slugs collide, grouped by slug.
    pub fn slug_collisions(&self) -> BTreeMap<String, Vec<String>> {
        let mut by_slug: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for name in &self.known_sets {
            let names = by_slug.entry(slugify(name)).or_default();
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        by_slug.retain(|_, names| names.len() > 1);
        by_slug
    }
}

fn split_group_field(raw: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in raw.unwrap_or("").split(',').map(str::trim) {
        if !token.is_empty() && !out.iter().any(|g| g == token) {
            out.push(token.to_string());
        }
    }
    out
}

fn push_skipped(diagnostics: &mut Vec<Diagnostic>, subject: String, field: &str, message: String) {
    log::debug!("{subject}: {message}");
    diagnostics.push(Diagnostic {
        code: "SALVAGE-I002".into(),
        severity: DiagnosticSeverity::Info,
        subject,
        field: field.into(),
        message,
    });
}
