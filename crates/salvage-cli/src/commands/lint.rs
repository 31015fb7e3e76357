use std::path::Path;

use serde::Serialize;

use salvage_lint::{LintDiagnostic, LintSeverity, Linter};

use crate::reader::load_data_dir;

const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json";

pub fn run_lint(data_dir: &Path, format: &str) -> Result<String, String> {
    let data = load_data_dir(data_dir)?;

    let linter = Linter::new(data.config.lint.clone());
    for id in linter.unknown_config_rules() {
        log::warn!("lint config names unknown rule \"{id}\"");
    }
    let findings = linter.lint(&data.corpus);
    let characters = data.corpus.characters().len();

    match format {
        "json" => to_json(&LintReport {
            summary: Summary {
                count: findings.len(),
                characters,
            },
            diagnostics: &findings,
        }),
        "sarif" => to_json(&sarif_log(&linter, &findings)),
        _ => Ok(render_human(&findings, characters)),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization error: {e}"))
}

fn render_human(findings: &[LintDiagnostic], characters: usize) -> String {
    let mut lines: Vec<String> = findings
        .iter()
        .map(|d| {
            let location = match d.field.as_str() {
                "" => d.subject.clone(),
                field => format!("{} [{field}]", d.subject),
            };
            format!("{location} {}[{}]: {}", d.severity.as_str(), d.rule, d.message)
        })
        .collect();

    lines.push(format!(
        "{} lint {} in {characters} {}.",
        findings.len(),
        plural(findings.len(), "issue", "issues"),
        plural(characters, "character", "characters")
    ));
    lines.join("\n")
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[derive(Serialize)]
struct LintReport<'a> {
    diagnostics: &'a [LintDiagnostic],
    summary: Summary,
}

#[derive(Serialize)]
struct Summary {
    count: usize,
    characters: usize,
}

// ---------------------------------------------------------------------------
// SARIF 2.1.0
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SarifLog<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun<'a>>,
}

#[derive(Serialize)]
struct SarifRun<'a> {
    tool: SarifTool<'a>,
    results: Vec<SarifResult<'a>>,
}

#[derive(Serialize)]
struct SarifTool<'a> {
    driver: SarifDriver<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver<'a> {
    name: &'static str,
    version: &'static str,
    rules: Vec<SarifRule<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule<'a> {
    id: &'a str,
    short_description: SarifText<'a>,
    default_configuration: SarifLevel,
}

#[derive(Serialize)]
struct SarifLevel {
    level: &'static str,
}

#[derive(Serialize)]
struct SarifText<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult<'a> {
    rule_id: &'a str,
    level: &'static str,
    message: SarifText<'a>,
    locations: Vec<SarifLocation<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation<'a> {
    logical_locations: Vec<SarifLogicalLocation<'a>>,
}

/// Findings point at a spreadsheet row and column, not a file position.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLogicalLocation<'a> {
    name: &'a str,
    fully_qualified_name: String,
    kind: &'static str,
}

fn sarif_level(severity: LintSeverity) -> &'static str {
    match severity {
        LintSeverity::Error => "error",
        LintSeverity::Warning => "warning",
        LintSeverity::Info => "note",
    }
}

fn sarif_log<'a>(linter: &'a Linter, findings: &'a [LintDiagnostic]) -> SarifLog<'a> {
    let rules = linter
        .rules()
        .iter()
        .map(|r| SarifRule {
            id: r.id(),
            short_description: SarifText { text: r.summary() },
            default_configuration: SarifLevel {
                level: sarif_level(r.default_severity()),
            },
        })
        .collect();

    let results = findings
        .iter()
        .map(|d| SarifResult {
            rule_id: &d.rule,
            level: sarif_level(d.severity),
            message: SarifText { text: &d.message },
            locations: vec![SarifLocation {
                logical_locations: vec![SarifLogicalLocation {
                    name: &d.subject,
                    fully_qualified_name: if d.field.is_empty() {
                        d.subject.clone()
                    } else {
                        format!("{}.{}", d.subject, d.field)
                    },
                    kind: "member",
                }],
            }],
        })
        .collect();

    SarifLog {
        schema: SARIF_SCHEMA,
        version: "2.1.0",
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "salvage-lint",
                    version: env!("CARGO_PKG_VERSION"),
                    rules,
                },
            },
            results,
        }],
    }
}
