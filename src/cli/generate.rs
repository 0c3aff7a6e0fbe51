//! Generate command implementation

use std::path::Path;
use std::process::ExitCode;

use super::render::write_artifacts;
use super::{print_report, EXIT_ERROR, EXIT_INVALID_ARGS};
use crate::config::DrillConfig;
use crate::models::FieldType;
use crate::pipeline::{AttemptOutcome, CommandGenerator, Constraints, Pipeline, PipelineError, SkillLevel};

/// Build generation constraints from command-line flags.
#[allow(clippy::too_many_arguments)]
pub(crate) fn constraints(
    players: u32,
    attackers: Option<u32>,
    defenders: Option<u32>,
    goalkeeper: bool,
    cones: bool,
    full_field: bool,
    age_group: Option<String>,
    skill_level: Option<SkillLevel>,
    duration_minutes: Option<u32>,
    additional_notes: Option<String>,
) -> Constraints {
    Constraints {
        num_players: players,
        num_attackers: attackers,
        num_defenders: defenders,
        has_goalkeeper: goalkeeper,
        has_cones: cones,
        num_cones: None,
        field_size: if full_field { FieldType::Full } else { FieldType::Half },
        age_group,
        skill_level,
        duration_minutes,
        additional_notes,
    }
}

/// Execute the generate command
pub fn run_generate(
    goal: &str,
    constraints: &Constraints,
    output_arg: Option<&Path>,
    json_out: Option<&Path>,
    config: &DrillConfig,
) -> ExitCode {
    let Some(program) = config.generator.command.as_deref() else {
        eprintln!("Error: No generator configured");
        eprintln!("Pass --generator <PROGRAM> or set [generator] command in drill.toml");
        return ExitCode::from(EXIT_INVALID_ARGS);
    };
    let generator = CommandGenerator::new(program).with_args(config.generator.args.iter().cloned());
    let pipeline = Pipeline::new(config);

    let result = match pipeline.generate_with(&generator, goal, constraints) {
        Ok(result) => result,
        Err(PipelineError::InvalidConstraints(problems)) => {
            for problem in problems {
                eprintln!("Error: {}", problem);
            }
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    print_report(&result);

    if !result.is_valid() {
        eprintln!();
        eprintln!(
            "Error: no valid drill after {} attempt(s)",
            result.attempts.len()
        );
        for record in &result.attempts {
            if let AttemptOutcome::Invalid { errors, warnings } = &record.outcome {
                eprintln!("  attempt {}: {} error(s), {} warning(s)", record.attempt, errors, warnings);
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    write_artifacts(&result, None, output_arg, json_out)
}
