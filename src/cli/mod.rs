//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod generate;
mod info;
mod render;
mod validate;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, DrillConfig};
use crate::pipeline::{PipelineResult, SkillLevel};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Find all drill files in a directory (recursively), sorted.
pub fn find_drill_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let dir_str = dir.display().to_string();

    for pattern in ["**/*.json", "**/*.json5"] {
        if let Ok(paths) = glob(&format!("{}/{}", dir_str, pattern)) {
            files.extend(paths.filter_map(Result::ok));
        }
    }

    files.sort();
    files
}

/// Expand directory arguments into the drill files they contain.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_drill_files(input));
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Drillboard - validate soccer drills and render them as SVG diagrams
#[derive(Parser)]
#[command(name = "drill")]
#[command(about = "Drillboard - validate soccer training drills and render them as SVG diagrams")]
#[command(version)]
pub struct Cli {
    /// Path to drill.toml (default: discovered from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate drill files and report errors and warnings
    Validate {
        /// Drill files or directories (searched for **/*.json)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a stored drill and render it to SVG
    Render {
        /// Drill file (.json or .json5)
        input: PathBuf,

        /// Output file or directory.
        /// If omitted: {input}.svg
        /// If directory (ends with /): dir/{input}.svg
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the canonical drill JSON to this path
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Drawing units per field unit (overrides drill.toml)
        #[arg(long)]
        scale: Option<f64>,
    },

    /// Generate a drill from a coaching goal with an external generator
    Generate {
        /// Coaching goal (e.g. "finishing under pressure")
        goal: String,

        /// Generator program; reads the request JSON on stdin, writes drill JSON
        #[arg(long)]
        generator: Option<String>,

        /// Argument passed to the generator program (repeatable)
        #[arg(long = "generator-arg", allow_hyphen_values = true)]
        generator_args: Vec<String>,

        /// Total number of players
        #[arg(short = 'p', long, default_value_t = 6)]
        players: u32,

        /// Number of attackers
        #[arg(long)]
        attackers: Option<u32>,

        /// Number of defenders
        #[arg(long)]
        defenders: Option<u32>,

        /// Include a goalkeeper
        #[arg(long, alias = "goalkeeper")]
        gk: bool,

        /// No cones available
        #[arg(long)]
        no_cones: bool,

        /// Use the full field instead of half
        #[arg(long)]
        full_field: bool,

        /// Age group (e.g. U14)
        #[arg(long)]
        age: Option<String>,

        /// Skill level
        #[arg(long, value_enum)]
        skill: Option<SkillLevel>,

        /// Session length in minutes (5-60)
        #[arg(long)]
        duration: Option<u32>,

        /// Extra instructions for the generator
        #[arg(long)]
        notes: Option<String>,

        /// Generator attempts before giving up (overrides drill.toml)
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Output SVG file or directory (default: {drill name}.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the drill JSON to this path
        #[arg(long)]
        json_out: Option<PathBuf>,
    },

    /// Rewrite drill files in canonical JSON form
    Fmt {
        /// Drill files to format
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Check formatting without writing (exit 1 if changes needed)
        #[arg(long)]
        check: bool,

        /// Write formatted output to stdout instead of in-place
        #[arg(long)]
        stdout: bool,
    },

    /// List built-in example drills, or print one
    Example {
        /// Example name; omit to list all
        name: Option<String>,
    },

    /// Print the JSON Schema of the drill document
    Schema,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins unless `--verbose` is given.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("drillboard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Fails only if a subscriber is already installed; keep that one.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Load drill.toml and apply command-line overrides.
fn load(path: Option<&Path>, overrides: &CliOverrides) -> Result<DrillConfig, ExitCode> {
    match load_config(path) {
        Ok(mut config) => {
            merge_cli_overrides(&mut config, overrides);
            let problems = config.validate();
            if problems.is_empty() {
                Ok(config)
            } else {
                for problem in problems {
                    eprintln!("Error: {}", problem);
                }
                Err(ExitCode::from(EXIT_INVALID_ARGS))
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Print a drill summary with its validation findings.
pub(crate) fn print_report(result: &PipelineResult) {
    let drill = &result.drill;
    println!("{}", "=".repeat(50));
    println!("DRILL: {}", drill.name);
    println!("{}", "=".repeat(50));
    println!();
    println!("{}", drill.description);
    println!();
    println!("Players: {}", drill.players.len());
    println!("Actions: {}", drill.actions.len());

    if !drill.coaching_points.is_empty() {
        println!();
        println!("Coaching points:");
        for point in &drill.coaching_points {
            println!("  - {}", point);
        }
    }
    if !drill.variations.is_empty() {
        println!();
        println!("Variations:");
        for variation in &drill.variations {
            println!("  - {}", variation);
        }
    }
    if result.validation.error_count() + result.validation.warning_count() > 0 {
        println!();
        for issue in result.validation.issues() {
            println!("  {}", issue);
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Validate { files, strict, json } => {
            let overrides = CliOverrides { strict: strict.then_some(true), ..Default::default() };
            match load(config_path, &overrides) {
                Ok(config) => validate::run_validate(&files, json, &config),
                Err(code) => code,
            }
        }
        Commands::Render { input, output, json_out, scale } => {
            let overrides = CliOverrides { scale, ..Default::default() };
            match load(config_path, &overrides) {
                Ok(config) => {
                    render::run_render(&input, output.as_deref(), json_out.as_deref(), &config)
                }
                Err(code) => code,
            }
        }
        Commands::Generate {
            goal,
            generator,
            generator_args,
            players,
            attackers,
            defenders,
            gk,
            no_cones,
            full_field,
            age,
            skill,
            duration,
            notes,
            max_attempts,
            output,
            json_out,
        } => {
            let overrides = CliOverrides {
                max_attempts,
                generator,
                generator_args: (!generator_args.is_empty()).then_some(generator_args),
                ..Default::default()
            };
            let config = match load(config_path, &overrides) {
                Ok(config) => config,
                Err(code) => return code,
            };
            let constraints = generate::constraints(
                players, attackers, defenders, gk, !no_cones, full_field, age, skill, duration,
                notes,
            );
            generate::run_generate(
                &goal,
                &constraints,
                output.as_deref(),
                json_out.as_deref(),
                &config,
            )
        }
        Commands::Fmt { files, check, stdout } => validate::run_fmt(&files, check, stdout),
        Commands::Example { name } => info::run_example(name.as_deref()),
        Commands::Schema => info::run_schema(),
    }
}
