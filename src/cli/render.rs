//! Render command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{print_report, EXIT_ERROR, EXIT_SUCCESS};
use crate::config::DrillConfig;
use crate::output;
use crate::pipeline::{Pipeline, PipelineResult};

/// Write the SVG, and the JSON when requested, of a valid result.
///
/// `input` is the drill file the result came from, if any.
pub(crate) fn write_artifacts(
    result: &PipelineResult,
    input: Option<&Path>,
    output_arg: Option<&Path>,
    json_out: Option<&Path>,
) -> ExitCode {
    let Some(svg) = &result.svg else {
        return ExitCode::from(EXIT_ERROR);
    };

    let svg_path = output::output_path(input, &result.drill.name, output_arg, "svg");
    if let Err(e) = output::write_text(&svg_path, svg) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!();
    println!("Diagram: {}", svg_path.display());

    if let (Some(path), Some(json)) = (json_out, &result.json) {
        if let Err(e) = output::write_text(path, json) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Drill JSON: {}", path.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the render command
pub fn run_render(
    input: &Path,
    output_arg: Option<&Path>,
    json_out: Option<&Path>,
    config: &DrillConfig,
) -> ExitCode {
    let result = match Pipeline::new(config).generate_from_json(input) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    print_report(&result);

    if !result.is_valid() {
        eprintln!();
        eprintln!(
            "Error: '{}' has {} validation error(s); no diagram written",
            input.display(),
            result.validation.error_count()
        );
        return ExitCode::from(EXIT_ERROR);
    }

    write_artifacts(&result, Some(input), output_arg, json_out)
}
