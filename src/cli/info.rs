//! Informational commands (example, schema)

use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::fixtures;
use crate::schema;

/// Execute the example command
pub fn run_example(name: Option<&str>) -> ExitCode {
    let Some(name) = name else {
        println!("Available examples:");
        for fixture in fixtures::ALL {
            match fixture.drill() {
                Ok(drill) => println!("  {:<24} {}", fixture.name, drill.name),
                Err(_) => println!("  {}", fixture.name),
            }
        }
        println!();
        println!("Usage: drill example <name>");
        return ExitCode::from(EXIT_SUCCESS);
    };

    match fixtures::get(name) {
        Some(fixture) => {
            print!("{}", fixture.source);
            ExitCode::from(EXIT_SUCCESS)
        }
        None => {
            eprintln!("Error: Unknown example '{}'", name);
            eprintln!("Available: {}", fixtures::names().collect::<Vec<_>>().join(", "));
            ExitCode::from(EXIT_INVALID_ARGS)
        }
    }
}

/// Execute the schema command
pub fn run_schema() -> ExitCode {
    match serde_json::to_string_pretty(&schema::json_schema()) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
