//! Validation command implementations (validate, fmt)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rayon::prelude::*;

use super::{expand_inputs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::DrillConfig;
use crate::schema::{self, SchemaError};
use crate::validate::{ValidationResult, Validator};

/// Outcome of checking one file.
struct FileReport {
    path: PathBuf,
    result: Result<ValidationResult, SchemaError>,
}

impl FileReport {
    fn failed(&self, strict: bool) -> bool {
        match &self.result {
            Ok(validation) => !validation.is_valid() || (strict && validation.has_warnings()),
            Err(_) => true,
        }
    }

    fn to_json(&self, strict: bool) -> serde_json::Value {
        match &self.result {
            Ok(validation) => serde_json::json!({
                "file": self.path.display().to_string(),
                "valid": !self.failed(strict),
                "errors": validation.errors,
                "warnings": validation.warnings,
            }),
            Err(e) => serde_json::json!({
                "file": self.path.display().to_string(),
                "valid": false,
                "error": e.to_string(),
            }),
        }
    }
}

fn check_file(path: &Path, validator: &Validator) -> FileReport {
    let result = schema::parse_file(path).map(|drill| validator.validate(&drill));
    FileReport { path: path.to_path_buf(), result }
}

/// Execute the validate command
pub fn run_validate(inputs: &[PathBuf], json: bool, config: &DrillConfig) -> ExitCode {
    let files = expand_inputs(inputs);
    if files.is_empty() {
        eprintln!("Error: No files to validate");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let strict = config.validate.strict;
    let validator = Validator::new(config.validate.clone());
    let reports: Vec<FileReport> = files.par_iter().map(|f| check_file(f, &validator)).collect();
    let failures = reports.iter().filter(|r| r.failed(strict)).count();

    if json {
        let output = serde_json::json!({
            "valid": failures == 0,
            "files": reports.iter().map(|r| r.to_json(strict)).collect::<Vec<_>>(),
        });
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for report in &reports {
            match &report.result {
                Ok(validation) if validation.error_count() + validation.warning_count() == 0 => {
                    println!("{}: OK", report.path.display());
                }
                Ok(validation) => {
                    for issue in validation.issues() {
                        println!("{}: {}", report.path.display(), issue);
                    }
                }
                Err(e) => println!("{}: error: {}", report.path.display(), e),
            }
        }
        println!();
        if failures == 0 {
            println!("{} file(s) valid", reports.len());
        } else {
            println!("{} of {} file(s) failed", failures, reports.len());
        }
    }

    if failures == 0 {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Canonical JSON text of a drill source.
fn format_drill(content: &str) -> Result<String, SchemaError> {
    schema::to_json(&schema::parse_str(content)?)
}

/// Execute the fmt command
pub fn run_fmt(files: &[PathBuf], check: bool, stdout_mode: bool) -> ExitCode {
    let mut needs_formatting = false;

    for file in files {
        let content = match std::fs::read_to_string(file) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: Cannot read '{}': {}", file.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        };

        let formatted = match format_drill(&content) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: Cannot format '{}': {}", file.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        };

        if check {
            if content != formatted {
                eprintln!("{}: needs formatting", file.display());
                needs_formatting = true;
            }
        } else if stdout_mode {
            print!("{}", formatted);
        } else if content != formatted {
            if let Err(e) = std::fs::write(file, &formatted) {
                eprintln!("Error: Cannot write '{}': {}", file.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            eprintln!("{}: formatted", file.display());
        } else {
            eprintln!("{}: already formatted", file.display());
        }
    }

    if check && needs_formatting {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_format_drill_is_stable() {
        let once = format_drill(fixtures::GIVE_AND_GO.source).unwrap();
        let twice = format_drill(&once).unwrap();
        assert_eq!(once, twice);
        assert!(once.ends_with("}\n"));
    }

    #[test]
    fn test_format_drill_rejects_bad_input() {
        assert!(format_drill("{\"name\": 3}").is_err());
    }

    #[test]
    fn test_check_file_reports() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(&good, fixtures::PASSING_TRIANGLE.source).unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();

        let validator = Validator::default();
        let report = check_file(&good, &validator);
        assert!(!report.failed(true));
        assert_eq!(report.to_json(false)["valid"], serde_json::json!(true));

        let report = check_file(&bad, &validator);
        assert!(report.failed(false));
        assert!(report.to_json(false)["error"].is_string());
    }
}
