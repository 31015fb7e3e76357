use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use salvage_core::{build_corpus, Corpus, Document, LoadError};
use salvage_lint::LintConfig;

pub const CONFIG_FILE: &str = "salvage.config.yaml";

/// Data directory configuration from salvage.config.yaml.
#[derive(Debug, Deserialize)]
pub struct SalvageConfig {
    pub title: Option<String>,
    #[serde(default = "default_builds")]
    pub builds: String,
    #[serde(default = "default_relic_sets")]
    pub relic_sets: String,
    #[serde(default)]
    pub lint: LintConfig,
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self {
            title: None,
            builds: default_builds(),
            relic_sets: default_relic_sets(),
            lint: LintConfig::default(),
        }
    }
}

fn default_builds() -> String {
    "characters.json".into()
}

fn default_relic_sets() -> String {
    "relics.json".into()
}

/// A loaded data directory.
pub struct DataSet {
    pub config: SalvageConfig,
    pub corpus: Corpus,
}

/// Read the config (if any) and both documents, then build the corpus.
pub fn load_data_dir(data_dir: &Path) -> Result<DataSet, String> {
    if !data_dir.is_dir() {
        return Err(format!(
            "Data directory does not exist: {}",
            data_dir.display()
        ));
    }

    let config = read_config(data_dir)?;
    let (builds, relic_sets) =
        read_documents(data_dir, &config).map_err(|e| e.to_string())?;
    let corpus = build_corpus(&builds, &relic_sets).map_err(|e| e.to_string())?;
    log::info!(
        "loaded {} from {}",
        config.title.as_deref().unwrap_or("corpus"),
        data_dir.display()
    );

    Ok(DataSet { config, corpus })
}

/// Read salvage.config.yaml if it exists; a missing file means defaults.
pub fn read_config(data_dir: &Path) -> Result<SalvageConfig, String> {
    let config_path = data_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        log::debug!("no {CONFIG_FILE} in {}, using defaults", data_dir.display());
        return Ok(SalvageConfig::default());
    }

    let yaml_content =
        fs::read_to_string(&config_path).map_err(|e| format!("Failed to read config: {}", e))?;
    serde_yaml::from_str(&yaml_content).map_err(|e| format!("Invalid YAML config: {}", e))
}

/// Read both documents. Both reads are attempted so a single error can name
/// every missing document.
fn read_documents(data_dir: &Path, config: &SalvageConfig) -> Result<(String, String), LoadError> {
    let mut errors = Vec::new();
    let builds = read_document(data_dir.join(&config.builds), Document::Builds)
        .map_err(|e| errors.push(e))
        .ok();
    let relic_sets = read_document(data_dir.join(&config.relic_sets), Document::RelicSets)
        .map_err(|e| errors.push(e))
        .ok();

    match LoadError::aggregate(errors) {
        Some(err) => Err(err),
        None => Ok((builds.unwrap_or_default(), relic_sets.unwrap_or_default())),
    }
}

fn read_document(path: PathBuf, document: Document) -> Result<String, LoadError> {
    fs::read_to_string(&path).map_err(|source| LoadError::Io {
        document,
        path,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_fill_missing_keys() {
        let config: SalvageConfig = serde_yaml::from_str("title: Test\n").unwrap();
        assert_eq!(config.title.as_deref(), Some("Test"));
        assert_eq!(config.builds, "characters.json");
        assert_eq!(config.relic_sets, "relics.json");
        assert!(config.lint.rules.is_empty());
    }

    #[test]
    fn config_reads_lint_levels() {
        let yaml = "lint:\n  rules:\n    unused-set: off\n";
        let config: SalvageConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.lint.is_enabled("unused-set"));
    }

    #[test]
    fn missing_documents_are_reported_together() {
        let dir = std::env::temp_dir().join(format!("salvage-reader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let err = read_documents(&dir, &SalvageConfig::default()).unwrap_err();
        assert_eq!(err.documents(), vec![Document::Builds, Document::RelicSets]);
        fs::remove_dir_all(&dir).ok();
    }
}
