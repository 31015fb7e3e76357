//! Data-quality linter for a built relic recommendation corpus.
//!
//! The core never rejects odd spreadsheet data; these rules point at the
//! rows that are probably wrong so an editor can fix the source sheet.

mod rules;

pub use rules::*;
use salvage_core::Corpus;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Severity of a lint finding. Ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Error,
    Warning,
    Info,
}

impl LintSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintDiagnostic {
    pub rule: String,
    pub severity: LintSeverity,
    /// Character or set name.
    pub subject: String,
    /// Source column, empty when the finding concerns the whole record.
    pub field: String,
    pub message: String,
}

/// A check over a finished corpus.
pub trait LintRule: Send + Sync {
    /// Kebab-case id used in config files and reports.
    fn id(&self) -> &'static str;

    /// One line for `--format sarif` rule descriptors.
    fn summary(&self) -> &'static str;

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn check(&self, corpus: &Corpus) -> Vec<LintDiagnostic>;

    /// Finding at the rule's default severity; the linter re-levels it.
    fn finding(&self, subject: String, field: &str, message: String) -> LintDiagnostic {
        LintDiagnostic {
            rule: self.id().to_string(),
            severity: self.default_severity(),
            subject,
            field: field.to_string(),
            message,
        }
    }
}

/// Per-rule override in `salvage.config.yaml` under `lint.rules`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    #[default]
    Warn,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub rules: HashMap<String, RuleLevel>,
}

impl LintConfig {
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id) != Some(&RuleLevel::Off)
    }

    /// Effective severity for `rule`, or `None` when it is switched off.
    pub fn resolve(&self, rule: &dyn LintRule) -> Option<LintSeverity> {
        match self.rules.get(rule.id()) {
            None => Some(rule.default_severity()),
            Some(RuleLevel::Off) => None,
            Some(RuleLevel::Warn) => Some(LintSeverity::Warning),
            Some(RuleLevel::Error) => Some(LintSeverity::Error),
        }
    }
}

/// Runs the built-in rules under a config.
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    config: LintConfig,
}

impl Linter {
    pub fn new(config: LintConfig) -> Self {
        Self {
            rules: vec![
                Box::new(SlugCollisionRule),
                Box::new(UnknownMainStatRule),
                Box::new(MissingRecommendationsRule::default()),
                Box::new(UnusedSetRule),
            ],
            config,
        }
    }

    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Configured rule ids that match no built-in rule, sorted.
    pub fn unknown_config_rules(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .config
            .rules
            .keys()
            .map(String::as_str)
            .filter(|id| !self.rules.iter().any(|r| r.id() == *id))
            .collect();
        unknown.sort_unstable();
        unknown
    }

    /// Findings of every enabled rule, most severe first. Within a severity,
    /// rule order and then each rule's own order is kept.
    pub fn lint(&self, corpus: &Corpus) -> Vec<LintDiagnostic> {
        let mut findings: Vec<LintDiagnostic> = self
            .rules
            .iter()
            .filter_map(|rule| Some((rule, self.config.resolve(rule.as_ref())?)))
            .flat_map(|(rule, severity)| {
                rule.check(corpus).into_iter().map(move |mut d| {
                    d.severity = severity;
                    d
                })
            })
            .collect();
        findings.sort_by_key(|d| d.severity);
        findings
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}
