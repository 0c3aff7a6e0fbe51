//! Generate, check and draw drills
//!
//! The pipeline asks a [`DrillGenerator`] for a drill, parses it, validates it
//! against the coaching goal and, once it is clean, renders it. A drill with
//! validation errors is sent back to the generator as [`Feedback`] until it
//! passes or the attempt budget runs out.
//!
//! The generator is a black box: anything that turns a [`GenerationRequest`]
//! into drill JSON. [`CommandGenerator`] runs an external program; tests and
//! embedders can pass a closure.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DrillConfig, ValidateConfig};
use crate::geometry;
use crate::models::{AttackingDirection, Drill, FieldType, Position};
use crate::render::{self, RenderOptions};
use crate::schema::{self, SchemaError};
use crate::validate::{ValidationResult, Validator};

/// Failure reported by a generator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeneratorError {
    /// The generator program could not be started or talked to
    #[error("failed to run generator '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The generator exited unsuccessfully
    #[error("generator exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    /// The generator wrote something other than UTF-8 text
    #[error("generator output is not valid UTF-8")]
    InvalidOutput,
    /// The request could not be encoded
    #[error("failed to encode generation request: {0}")]
    Request(#[from] serde_json::Error),
    /// Any other generator-specific failure
    #[error("{0}")]
    Other(String),
}

/// Produces raw drill JSON for a request.
pub trait DrillGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GeneratorError>;
}

impl<F> DrillGenerator for F
where
    F: Fn(&GenerationRequest<'_>) -> Result<String, GeneratorError>,
{
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
        self(request)
    }
}

/// Coach experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// What the coach asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Total players, 2 to 22
    pub num_players: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub num_attackers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub num_defenders: Option<u32>,
    #[serde(default)]
    pub has_goalkeeper: bool,
    #[serde(default = "default_true")]
    pub has_cones: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub num_cones: Option<u32>,
    #[serde(default)]
    pub field_size: FieldType,
    /// e.g. `U10`, `U14`, `Adult`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub age_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub skill_level: Option<SkillLevel>,
    /// 5 to 60 minutes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration_minutes: Option<u32>,
    /// Free-text instructions passed through to the generator
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub additional_notes: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            num_players: 6,
            num_attackers: None,
            num_defenders: None,
            has_goalkeeper: false,
            has_cones: true,
            num_cones: None,
            field_size: FieldType::Half,
            age_group: None,
            skill_level: None,
            duration_minutes: None,
            additional_notes: None,
        }
    }
}

impl Constraints {
    /// Problems with these constraints; empty when usable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !(2..=22).contains(&self.num_players) {
            problems.push(format!("num_players must be between 2 and 22, got {}", self.num_players));
        }
        let assigned = self.num_attackers.unwrap_or(0)
            + self.num_defenders.unwrap_or(0)
            + u32::from(self.has_goalkeeper);
        if assigned > self.num_players {
            problems.push(format!(
                "attackers, defenders and goalkeeper add up to {assigned}, more than num_players ({})",
                self.num_players
            ));
        }
        if let Some(minutes) = self.duration_minutes {
            if !(5..=60).contains(&minutes) {
                problems.push(format!("duration_minutes must be between 5 and 60, got {minutes}"));
            }
        }
        if !self.has_cones && self.num_cones.is_some_and(|n| n > 0) {
            problems.push("num_cones given but has_cones is false".to_string());
        }
        problems
    }
}

/// What went wrong with the previous attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    /// Attempt the feedback is about (1-based)
    pub attempt: u32,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Human-readable report, ready to paste into a prompt
    pub report: String,
}

impl Feedback {
    pub fn from_validation(attempt: u32, validation: &ValidationResult) -> Self {
        Self {
            attempt,
            errors: validation.errors.iter().map(|e| e.message.clone()).collect(),
            warnings: validation.warnings.iter().map(|w| w.message.clone()).collect(),
            report: validation.feedback(),
        }
    }

    /// Feedback for an attempt that produced no usable drill.
    pub fn from_failure(attempt: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            attempt,
            report: format!("Errors (must fix):\n- {message}\n"),
            errors: vec![message],
            warnings: Vec::new(),
        }
    }
}

/// Everything a generator gets for one attempt.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    pub goal: &'a str,
    pub constraints: &'a Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<&'a Feedback>,
    /// 1-based attempt number
    pub attempt: u32,
    /// Pitch landmarks when attacking north, the orientation generators
    /// are asked to draw in
    pub reference_positions: BTreeMap<&'static str, Position>,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(
        goal: &'a str,
        constraints: &'a Constraints,
        feedback: Option<&'a Feedback>,
        attempt: u32,
    ) -> Self {
        Self {
            goal,
            constraints,
            feedback,
            attempt,
            reference_positions: geometry::reference_positions(AttackingDirection::North),
        }
    }
}

/// Runs an external program as the generator.
///
/// The request is written to the program's stdin as JSON; the drill is read
/// from its stdout.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn spawn_error(&self, source: std::io::Error) -> GeneratorError {
        GeneratorError::Spawn { program: self.program.clone(), source }
    }
}

impl DrillGenerator for CommandGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
        let payload = serde_json::to_vec(request)?;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A generator that ignores its input may exit before reading it.
            if let Err(e) = stdin.write_all(&payload) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(self.spawn_error(e));
                }
            }
        }

        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(GeneratorError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8(output.stdout).map_err(|_| GeneratorError::InvalidOutput)
    }
}

/// How one generator attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    GeneratorFailed(String),
    SchemaFailed(String),
    Invalid { errors: usize, warnings: usize },
    Valid { warnings: usize },
}

/// Record of one generator attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    /// 1-based attempt number
    pub attempt: u32,
    pub outcome: AttemptOutcome,
}

/// Error type for pipeline failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    #[error("invalid constraints: {}", .0.join("; "))]
    InvalidConstraints(Vec<String>),
    /// Drill could not be read or parsed
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Every attempt failed inside the generator
    #[error("generator failed after {attempts} attempt(s): {last}")]
    GeneratorExhausted {
        attempts: u32,
        #[source]
        last: GeneratorError,
    },
    #[error("no drill generator configured")]
    NoGenerator,
}

/// Result of a pipeline run.
///
/// `svg` and `json` are only present when the drill is valid.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub drill: Drill,
    pub validation: ValidationResult,
    pub svg: Option<String>,
    /// Canonical re-serialization of the drill
    pub json: Option<String>,
    pub attempts: Vec<AttemptRecord>,
}

impl PipelineResult {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.validation.errors.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.validation.warnings.iter().map(|w| w.message.as_str()).collect()
    }
}

enum Failure {
    Generator(GeneratorError),
    Schema(SchemaError),
}

/// Generate-validate-render loop.
pub struct Pipeline {
    validate: ValidateConfig,
    render: RenderOptions,
    max_attempts: u32,
    generator: Option<Box<dyn DrillGenerator>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("validate", &self.validate)
            .field("render", &self.render)
            .field("max_attempts", &self.max_attempts)
            .field("generator", &self.generator.is_some())
            .finish()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&DrillConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: &DrillConfig) -> Self {
        Self {
            validate: config.validate.clone(),
            render: RenderOptions::from_config(config),
            max_attempts: config.pipeline.max_attempts.max(1),
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: impl DrillGenerator + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Generate a drill with the configured generator.
    pub fn generate(
        &self,
        goal: &str,
        constraints: &Constraints,
    ) -> Result<PipelineResult, PipelineError> {
        let generator = self.generator.as_deref().ok_or(PipelineError::NoGenerator)?;
        self.generate_with(generator, goal, constraints)
    }

    /// Generate a drill with an explicit generator.
    pub fn generate_with(
        &self,
        generator: &dyn DrillGenerator,
        goal: &str,
        constraints: &Constraints,
    ) -> Result<PipelineResult, PipelineError> {
        let problems = constraints.validate();
        if !problems.is_empty() {
            return Err(PipelineError::InvalidConstraints(problems));
        }

        let validator = Validator::new(self.validate.clone()).with_goal(goal);
        let mut attempts = Vec::new();
        let mut feedback: Option<Feedback> = None;
        let mut latest: Option<(Drill, ValidationResult)> = None;
        let mut last_failure: Option<Failure> = None;

        for attempt in 1..=self.max_attempts {
            let request = GenerationRequest::new(goal, constraints, feedback.as_ref(), attempt);
            tracing::info!(goal, attempt, max = self.max_attempts, "requesting drill");

            let raw = match generator.generate(&request) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "generator failed");
                    attempts.push(AttemptRecord {
                        attempt,
                        outcome: AttemptOutcome::GeneratorFailed(e.to_string()),
                    });
                    feedback = Some(Feedback::from_failure(attempt, e.to_string()));
                    last_failure = Some(Failure::Generator(e));
                    continue;
                }
            };

            let drill = match schema::parse_str(&raw) {
                Ok(drill) => drill,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "generated drill rejected by schema");
                    attempts.push(AttemptRecord {
                        attempt,
                        outcome: AttemptOutcome::SchemaFailed(e.to_string()),
                    });
                    feedback = Some(Feedback::from_failure(attempt, e.to_string()));
                    last_failure = Some(Failure::Schema(e));
                    continue;
                }
            };

            let validation = validator.validate(&drill);
            if validation.is_valid() {
                tracing::info!(
                    attempt,
                    drill = %drill.name,
                    warnings = validation.warning_count(),
                    "generated valid drill"
                );
                attempts.push(AttemptRecord {
                    attempt,
                    outcome: AttemptOutcome::Valid { warnings: validation.warning_count() },
                });
                return self.finish(drill, validation, attempts);
            }

            tracing::warn!(
                attempt,
                errors = validation.error_count(),
                warnings = validation.warning_count(),
                "generated drill has validation errors"
            );
            attempts.push(AttemptRecord {
                attempt,
                outcome: AttemptOutcome::Invalid {
                    errors: validation.error_count(),
                    warnings: validation.warning_count(),
                },
            });
            feedback = Some(Feedback::from_validation(attempt, &validation));
            latest = Some((drill, validation));
        }

        if let Some((drill, validation)) = latest {
            tracing::warn!(attempts = self.max_attempts, "attempts exhausted, returning invalid drill");
            return Ok(PipelineResult { drill, validation, svg: None, json: None, attempts });
        }
        match last_failure {
            Some(Failure::Schema(e)) => Err(PipelineError::Schema(e)),
            Some(Failure::Generator(last)) => {
                Err(PipelineError::GeneratorExhausted { attempts: self.max_attempts, last })
            }
            None => Err(PipelineError::NoGenerator),
        }
    }

    /// Validate and render a stored drill file without calling a generator.
    pub fn generate_from_json(&self, path: &Path) -> Result<PipelineResult, PipelineError> {
        let drill = schema::parse_file(path)?;
        tracing::debug!(path = %path.display(), drill = %drill.name, "loaded drill");
        self.check(drill)
    }

    /// Validate and render drill JSON text without calling a generator.
    pub fn generate_from_str(&self, input: &str) -> Result<PipelineResult, PipelineError> {
        let drill = schema::parse_str(input)?;
        self.check(drill)
    }

    fn check(&self, drill: Drill) -> Result<PipelineResult, PipelineError> {
        let validation = Validator::new(self.validate.clone()).validate(&drill);
        if validation.is_valid() {
            self.finish(drill, validation, Vec::new())
        } else {
            Ok(PipelineResult { drill, validation, svg: None, json: None, attempts: Vec::new() })
        }
    }

    fn finish(
        &self,
        drill: Drill,
        validation: ValidationResult,
        attempts: Vec<AttemptRecord>,
    ) -> Result<PipelineResult, PipelineError> {
        let svg = render::render_with(&drill, &self.render);
        let json = schema::to_json(&drill)?;
        Ok(PipelineResult { drill, validation, svg: Some(svg), json: Some(json), attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const VALID: &str = r#"{
        "name": "Passing pairs",
        "description": "Two players passing back and forth",
        "players": [
            {"id": "A1", "role": "ATTACKER", "position": {"x": 30, "y": 50}},
            {"id": "A2", "role": "ATTACKER", "position": {"x": 60, "y": 50}}
        ],
        "balls": [{"position": {"x": 30, "y": 50}}],
        "actions": [
            {"type": "PASS", "from_player": "A1", "to_player": "A2"},
            {"type": "PASS", "from_player": "A2", "to_player": "A1"}
        ]
    }"#;

    fn invalid() -> String {
        // A2 passes first without the ball
        VALID.replace(
            r#"{"type": "PASS", "from_player": "A1", "to_player": "A2"},
            {"type": "PASS", "from_player": "A2", "to_player": "A1"}"#,
            r#"{"type": "PASS", "from_player": "A2", "to_player": "A1"},
            {"type": "PASS", "from_player": "A1", "to_player": "A2"}"#,
        )
    }

    /// Replays canned responses and records what it was asked.
    struct Scripted {
        responses: RefCell<Vec<Result<String, GeneratorError>>>,
        seen: RefCell<Vec<(u32, Option<Feedback>)>>,
    }

    impl Scripted {
        fn new(mut responses: Vec<Result<String, GeneratorError>>) -> Self {
            responses.reverse();
            Self { responses: RefCell::new(responses), seen: RefCell::new(Vec::new()) }
        }
    }

    impl DrillGenerator for Scripted {
        fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
            self.seen.borrow_mut().push((request.attempt, request.feedback.cloned()));
            self.responses
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(GeneratorError::Other("script exhausted".to_string())))
        }
    }

    fn pipeline() -> Pipeline {
        Pipeline::default()
    }

    #[test]
    fn test_first_attempt_valid() {
        let generator = Scripted::new(vec![Ok(VALID.to_string())]);
        let result =
            pipeline().generate_with(&generator, "passing", &Constraints::default()).unwrap();
        assert!(result.is_valid());
        assert!(result.svg.as_deref().is_some_and(|s| s.starts_with("<svg")));
        assert!(result.json.is_some());
        assert_eq!(result.attempts.len(), 1);
        assert_eq!(generator.seen.borrow()[0], (1, None));
    }

    #[test]
    fn test_validation_errors_fed_back() {
        let generator = Scripted::new(vec![Ok(invalid()), Ok(VALID.to_string())]);
        let result =
            pipeline().generate_with(&generator, "passing", &Constraints::default()).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.attempts.len(), 2);
        assert!(matches!(result.attempts[0].outcome, AttemptOutcome::Invalid { errors: 1, .. }));

        let seen = generator.seen.borrow();
        let feedback = seen[1].1.as_ref().unwrap();
        assert_eq!(feedback.attempt, 1);
        assert!(feedback.errors[0].contains("does not possess the ball"));
        assert!(feedback.report.starts_with("Errors (must fix):"));
    }

    #[test]
    fn test_schema_failure_consumes_attempt() {
        let generator = Scripted::new(vec![Ok("{not json".to_string()), Ok(VALID.to_string())]);
        let result =
            pipeline().generate_with(&generator, "passing", &Constraints::default()).unwrap();
        assert!(result.is_valid());
        assert!(matches!(result.attempts[0].outcome, AttemptOutcome::SchemaFailed(_)));
        assert!(generator.seen.borrow()[1].1.is_some());
    }

    #[test]
    fn test_exhaustion_returns_latest_invalid_drill() {
        let generator = Scripted::new(vec![Ok(invalid()), Ok(invalid()), Ok(invalid())]);
        let result =
            pipeline().generate_with(&generator, "passing", &Constraints::default()).unwrap();
        assert!(!result.is_valid());
        assert!(result.svg.is_none());
        assert_eq!(result.attempts.len(), 3);
        assert_eq!(result.errors().len(), 1);
    }

    #[test]
    fn test_exhaustion_without_drill_is_error() {
        let generator = Scripted::new(vec![]);
        let err = pipeline()
            .with_max_attempts(2)
            .generate_with(&generator, "passing", &Constraints::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::GeneratorExhausted { attempts: 2, .. }));
        assert_eq!(generator.seen.borrow().len(), 2);

        let generator = Scripted::new(vec![Ok("[]".to_string())]);
        let err = pipeline()
            .with_max_attempts(1)
            .generate_with(&generator, "passing", &Constraints::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Schema(SchemaError::Shape(_))));
    }

    #[test]
    fn test_invalid_constraints_skip_generator() {
        let generator = Scripted::new(vec![Ok(VALID.to_string())]);
        let constraints = Constraints { num_players: 30, ..Constraints::default() };
        let err = pipeline().generate_with(&generator, "passing", &constraints).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConstraints(_)));
        assert!(generator.seen.borrow().is_empty());
    }

    #[test]
    fn test_constraints_validate() {
        assert!(Constraints::default().validate().is_empty());
        let c = Constraints {
            num_players: 4,
            num_attackers: Some(3),
            num_defenders: Some(2),
            duration_minutes: Some(90),
            ..Constraints::default()
        };
        assert_eq!(c.validate().len(), 2);
        let c = Constraints { num_players: 1, ..Constraints::default() };
        assert_eq!(c.validate().len(), 1);
    }

    #[test]
    fn test_goal_drives_intent_warnings() {
        let generator = Scripted::new(vec![Ok(VALID.to_string())]);
        let result =
            pipeline().generate_with(&generator, "finishing", &Constraints::default()).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings().iter().any(|w| w.contains("SHOT")));
    }

    fn always_valid(_: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
        Ok(VALID.to_string())
    }

    #[test]
    fn test_function_generator() {
        let p = pipeline().with_generator(always_valid);
        assert!(p.generate("passing", &Constraints::default()).unwrap().is_valid());
        assert!(matches!(
            pipeline().generate("passing", &Constraints::default()),
            Err(PipelineError::NoGenerator)
        ));
    }

    #[test]
    fn test_generate_from_str_and_file() {
        let result = pipeline().generate_from_str(VALID).unwrap();
        assert!(result.is_valid());
        assert!(result.attempts.is_empty());

        let result = pipeline().generate_from_str(&invalid()).unwrap();
        assert!(!result.is_valid());
        assert!(result.svg.is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.json");
        std::fs::write(&path, VALID).unwrap();
        assert!(pipeline().generate_from_json(&path).unwrap().is_valid());
        let missing = pipeline().generate_from_json(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(PipelineError::Schema(SchemaError::Read { .. }))));
    }

    #[test]
    fn test_request_serializes() {
        let constraints = Constraints {
            skill_level: Some(SkillLevel::Advanced),
            ..Constraints::default()
        };
        let request = GenerationRequest::new("crossing", &constraints, None, 1);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["goal"], "crossing");
        assert_eq!(
            json["reference_positions"]["penalty_spot"],
            serde_json::json!({"x": 50.0, "y": 88.0})
        );
        assert_eq!(json["reference_positions"]["own_goal"], serde_json::json!({"x": 50.0, "y": 0.0}));
        assert_eq!(json["constraints"]["skill_level"], "advanced");
        assert_eq!(json["constraints"]["field_size"], "HALF");
        assert!(json.get("feedback").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_generator() {
        let constraints = Constraints::default();
        let request = GenerationRequest::new("passing", &constraints, None, 1);
        let echo = CommandGenerator::new("sh").with_args(["-c", "cat >/dev/null; echo '{}'"]);
        assert_eq!(echo.generate(&request).unwrap().trim(), "{}");

        let failing = CommandGenerator::new("sh").with_args(["-c", "echo boom >&2; exit 3"]);
        match failing.generate(&request).unwrap_err() {
            GeneratorError::Failed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }

        let missing = CommandGenerator::new("definitely-not-a-drill-generator");
        assert!(matches!(missing.generate(&request), Err(GeneratorError::Spawn { .. })));
    }
}
