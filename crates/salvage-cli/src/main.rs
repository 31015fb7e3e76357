mod commands;
mod reader;

use std::path::{Path, PathBuf};
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};

use salvage_core::catalogs::{ELEMENT_OPTIONS, PATH_OPTIONS, RANK_OPTIONS};
use salvage_core::{CanonicalSubstat, DiagnosticSeverity};
use reader::load_data_dir;

#[derive(Parser)]
#[command(
    name = "salvage",
    version,
    about = "Relic recommendation normalizer - build, check and query character build corpora"
)]
struct Cli {
    /// Directory holding the build and relic-set documents
    #[arg(long, global = true, default_value = "data")]
    data: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the corpus and output it as JSON
    Build {
        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report diagnostics collected while building the corpus
    Check {
        /// Exit with status 1 when any warning is reported
        #[arg(long)]
        strict: bool,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Lint the corpus for data-quality issues
    Lint {
        /// Output format: human (default), json or sarif
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Show a set and the characters recommending it
    Set {
        /// Set slug, e.g. rutilant-arena
        slug: String,

        /// Keep characters recommending this Body main stat (repeatable)
        #[arg(long = "body")]
        body: Vec<String>,

        /// Keep characters recommending this Feet main stat (repeatable)
        #[arg(long = "feet")]
        feet: Vec<String>,

        /// Keep characters recommending this Planar Sphere main stat (repeatable)
        #[arg(long = "sphere")]
        sphere: Vec<String>,

        /// Keep characters recommending this Link Rope main stat (repeatable)
        #[arg(long = "rope")]
        rope: Vec<String>,

        /// Selected substat (repeatable)
        #[arg(long = "substat")]
        substats: Vec<CanonicalSubstat>,

        /// How many selected substats a character must prioritize
        #[arg(long, default_value_t = 1)]
        min_substats: usize,

        /// Rank filter (repeatable)
        #[arg(long, value_parser = PossibleValuesParser::new(RANK_OPTIONS.iter().copied()))]
        rank: Vec<String>,

        /// Elemental type filter (repeatable)
        #[arg(long, value_parser = PossibleValuesParser::new(ELEMENT_OPTIONS.iter().copied()))]
        element: Vec<String>,

        /// Path filter (repeatable)
        #[arg(long, value_parser = PossibleValuesParser::new(PATH_OPTIONS.iter().copied()))]
        path: Vec<String>,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Show one character's recommendations
    Character {
        /// Character slug, e.g. imbibitor-lunae
        slug: String,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Search set and character names
    Search {
        query: String,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Build { output } => {
            run_build(&cli.data, output.as_deref()).map(|json| (json, 0))
        }
        Commands::Check { strict, format } => run_check(&cli.data, strict, &format)
            .map(|(output, warnings)| (output, i32::from(strict && warnings > 0))),
        Commands::Lint { format } => {
            commands::lint::run_lint(&cli.data, &format).map(|o| (o, 0))
        }
        Commands::Set {
            slug,
            body,
            feet,
            sphere,
            rope,
            substats,
            min_substats,
            rank,
            element,
            path,
            format,
        } => {
            let query = commands::set::SetQuery {
                slug,
                body,
                feet,
                sphere,
                rope,
                substats,
                min_substats,
                rank,
                element,
                path,
            };
            commands::set::run_set(&cli.data, &query, &format).map(|o| (o, 0))
        }
        Commands::Character { slug, format } => {
            commands::character::run_character(&cli.data, &slug, &format).map(|o| (o, 0))
        }
        Commands::Search { query, format } => {
            commands::search::run_search(&cli.data, &query, &format).map(|o| (o, 0))
        }
    };

    match result {
        Ok((output, code)) => {
            println!("{output}");
            if code != 0 {
                process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    // RUST_LOG, when set, wins over the -v flags.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_build(data_dir: &Path, output_file: Option<&Path>) -> Result<String, String> {
    let data = load_data_dir(data_dir)?;
    let json = serde_json::to_string_pretty(&data.corpus)
        .map_err(|e| format!("JSON serialization error: {e}"))?;

    if let Some(out_path) = output_file {
        std::fs::write(out_path, &json)
            .map_err(|e| format!("Failed to write {}: {e}", out_path.display()))?;
        return Ok(format!("Written to {}", out_path.display()));
    }

    Ok(json)
}

fn run_check(data_dir: &Path, strict: bool, format: &str) -> Result<(String, usize), String> {
    let data = load_data_dir(data_dir)?;
    let corpus = &data.corpus;
    let diagnostics = corpus.diagnostics();

    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Warning)
        .count();
    let info_count = diagnostics.len() - warning_count;
    let character_count = corpus.characters().len();

    if format == "json" {
        let output = serde_json::json!({
            "diagnostics": diagnostics,
            "summary": {
                "warnings": warning_count,
                "infos": info_count,
                "characters": character_count,
                "relicSets": corpus.relic_sets().len(),
                "ornamentSets": corpus.ornament_sets().len(),
                "strict": strict,
            }
        });
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        return Ok((json, warning_count));
    }

    // Human-readable format
    let mut lines: Vec<String> = Vec::new();

    for d in diagnostics {
        let severity = match d.severity {
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        };
        lines.push(format!(
            "{} [{}] {}[{}]: {}",
            d.subject, d.field, severity, d.code, d.message
        ));
    }

    let warning_word = if warning_count == 1 {
        "warning"
    } else {
        "warnings"
    };
    let info_word = if info_count == 1 { "notice" } else { "notices" };
    let character_word = if character_count == 1 {
        "character"
    } else {
        "characters"
    };
    lines.push(format!(
        "{warning_count} {warning_word}, {info_count} {info_word} in {character_count} {character_word}."
    ));

    Ok((lines.join("\n"), warning_count))
}
