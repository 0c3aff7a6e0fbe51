//! Generate-validate-retry loop driven through the public API

use drillboard::config::DrillConfig;
use drillboard::fixtures;
use drillboard::models::FieldType;
use drillboard::pipeline::{
    AttemptOutcome, Constraints, GenerationRequest, GeneratorError, Pipeline, PipelineError,
};

const LOOSE_BALL: &str = r#"{
  "name": "Shooting Practice",
  "description": "Strike from the edge of the box",
  "players": [
    {"id": "A1", "role": "ATTACKER", "position": {"x": 50, "y": 75}}
  ],
  "balls": [{"position": {"x": 20, "y": 20}}],
  "actions": [
    {"type": "SHOT", "player": "A1", "target": "GOAL"}
  ]
}"#;

/// Returns an invalid drill until it is shown feedback, then a fixture.
fn learns_from_feedback(request: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
    match request.feedback {
        None => Ok(LOOSE_BALL.to_string()),
        Some(feedback) if !feedback.errors.is_empty() => {
            Ok(fixtures::FINISHING_2V1.source.to_string())
        }
        Some(_) => Err(GeneratorError::Other("unexpected empty feedback".to_string())),
    }
}

/// Places the shooter on the briefed penalty spot.
fn uses_landmarks(request: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
    let spot = request
        .reference_positions
        .get("penalty_spot")
        .ok_or_else(|| GeneratorError::Other("no penalty spot in request".to_string()))?;
    Ok(LOOSE_BALL
        .replace("\"x\": 50, \"y\": 75", &format!("\"x\": {}, \"y\": {}", spot.x, spot.y))
        .replace("\"x\": 20, \"y\": 20", &format!("\"x\": {}, \"y\": {}", spot.x, spot.y)))
}

fn never_valid(_: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
    Ok(LOOSE_BALL.to_string())
}

fn garbage(_: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
    Ok("I'm sorry, here is a drill: {".to_string())
}

fn offline(_: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
    Err(GeneratorError::Other("service unavailable".to_string()))
}

#[test]
fn test_retry_with_feedback_recovers() {
    let pipeline = Pipeline::default();
    let result = pipeline
        .generate_with(&learns_from_feedback, "finishing under pressure", &Constraints::default())
        .unwrap();

    assert!(result.is_valid());
    assert!(result.svg.is_some());
    assert!(result.json.is_some());
    assert_eq!(result.attempts.len(), 2);
    assert!(matches!(result.attempts[0].outcome, AttemptOutcome::Invalid { .. }));
    assert!(matches!(result.attempts[1].outcome, AttemptOutcome::Valid { .. }));
}

#[test]
fn test_generator_receives_reference_positions() {
    let result =
        Pipeline::default().generate_with(&uses_landmarks, "finishing", &Constraints::default()).unwrap();
    assert!(result.is_valid(), "{:?}", result.errors());
    assert_eq!(result.attempts.len(), 1);
    assert_eq!(result.drill.players[0].position.y, 88.0);
}

#[test]
fn test_exhaustion_returns_latest_invalid_drill() {
    let pipeline = Pipeline::default().with_max_attempts(2);
    let result =
        pipeline.generate_with(&never_valid, "finishing", &Constraints::default()).unwrap();

    assert!(!result.is_valid());
    assert!(result.svg.is_none());
    assert_eq!(result.attempts.len(), 2);
    assert_eq!(result.drill.name, "Shooting Practice");
    assert!(!result.errors().is_empty());
}

#[test]
fn test_unparseable_output_every_time() {
    let pipeline = Pipeline::default().with_max_attempts(2);
    let err = pipeline.generate_with(&garbage, "passing", &Constraints::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));
}

#[test]
fn test_generator_failure_every_time() {
    let pipeline = Pipeline::default().with_max_attempts(3);
    let err = pipeline.generate_with(&offline, "passing", &Constraints::default()).unwrap_err();
    match err {
        PipelineError::GeneratorExhausted { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_constraints_checked_before_generating() {
    let constraints = Constraints { num_players: 1, ..Default::default() };
    let err =
        Pipeline::default().generate_with(&offline, "passing", &constraints).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidConstraints(_)));
}

#[test]
fn test_configured_attempt_limit() {
    let mut config = DrillConfig::default();
    config.pipeline.max_attempts = 4;
    let pipeline = Pipeline::new(&config);
    assert_eq!(pipeline.max_attempts(), 4);

    let constraints = Constraints { field_size: FieldType::Full, ..Default::default() };
    let result = pipeline.generate_with(&never_valid, "finishing", &constraints).unwrap();
    assert_eq!(result.attempts.len(), 4);
}

#[test]
fn test_no_generator_configured() {
    let err = Pipeline::default().generate("passing", &Constraints::default()).unwrap_err();
    assert!(matches!(err, PipelineError::NoGenerator));
}
