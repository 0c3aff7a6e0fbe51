//! End-to-end drill checks through the public library API
//!
//! Each test parses drill JSON, runs validation and rendering, and checks the
//! combined outcome the way a caller of the pipeline sees it.

use drillboard::fixtures;
use drillboard::models::{Action, Ball, Drill, FieldConfig, Intent, Player, PlayerRole, Position};
use drillboard::pipeline::Pipeline;
use drillboard::render::render;
use drillboard::schema;
use drillboard::tracker::{self, StepOutcome, TrackerConfig};
use drillboard::validate::{validate, IssueCategory, IssueType, Severity};

fn drill(players: Vec<Player>, balls: Vec<Position>, actions: Vec<Action>) -> Drill {
    Drill {
        name: "Test Drill".to_string(),
        description: String::new(),
        intent: None,
        field: FieldConfig::default(),
        players,
        cones: vec![],
        cone_gates: vec![],
        balls: balls.into_iter().map(|position| Ball { position }).collect(),
        mannequins: vec![],
        actions,
        coaching_points: vec![],
        variations: vec![],
    }
}

fn pass(from: &str, to: &str) -> Action {
    Action::Pass { from_player: from.to_string(), to_player: to.to_string() }
}

const PAIRS_PASSING: &str = r#"{
  "name": "Pairs Passing",
  "description": "Two attackers keep the ball moving with short passes",
  "players": [
    {"id": "A1", "role": "ATTACKER", "position": {"x": 40, "y": 50}},
    {"id": "A2", "role": "ATTACKER", "position": {"x": 60, "y": 50}}
  ],
  "balls": [{"position": {"x": 40, "y": 50}}],
  "actions": [
    {"type": "PASS", "from_player": "A1", "to_player": "A2"},
    {"type": "PASS", "from_player": "A2", "to_player": "A1"}
  ]
}"#;

const FINISHING_NO_SHOT: &str = r#"{
  "name": "Approach Work",
  "description": "Attacker carries the ball toward the box",
  "intent": "FINISHING",
  "players": [
    {"id": "A1", "role": "ATTACKER", "position": {"x": 50, "y": 50}}
  ],
  "balls": [{"position": {"x": 50, "y": 50}}],
  "actions": [
    {"type": "DRIBBLE", "player": "A1", "to_position": {"x": 50, "y": 75}}
  ]
}"#;

const MISSING_GATE: &str = r#"{
  "name": "Gate Run",
  "description": "Carry the ball through a gate",
  "players": [
    {"id": "A1", "role": "ATTACKER", "position": {"x": 50, "y": 20}}
  ],
  "cone_gates": [
    {"id": "G1", "center": {"x": 50, "y": 40}, "width": 6, "orientation": "HORIZONTAL"}
  ],
  "balls": [{"position": {"x": 50, "y": 20}}],
  "actions": [
    {"type": "DRIBBLE", "player": "A1", "to_position": {"x": 50, "y": 60}, "through_gate": "G9"}
  ]
}"#;

#[test]
fn test_passing_pair_renders_clean() {
    let result = Pipeline::default().generate_from_str(PAIRS_PASSING).unwrap();
    assert!(result.is_valid(), "{:?}", result.errors());
    assert_eq!(result.validation.error_count(), 0);
    assert_eq!(result.validation.of_type(IssueType::TooFewPasses).count(), 0);

    let svg = result.svg.as_deref().unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("class=\"pass\"").count(), 2);
}

#[test]
fn test_finishing_without_shot_warns_once() {
    let result = Pipeline::default().generate_from_str(FINISHING_NO_SHOT).unwrap();
    assert!(result.is_valid());
    assert!(result.svg.is_some());
    assert_eq!(result.validation.warning_count(), 1);

    let warning = &result.validation.warnings[0];
    assert_eq!(warning.issue_type, IssueType::MissingShot);
    assert_eq!(warning.category(), IssueCategory::Semantic);
    assert_eq!(warning.severity, Severity::Warning);
}

#[test]
fn test_unknown_gate_blocks_diagram() {
    let result = Pipeline::default().generate_from_str(MISSING_GATE).unwrap();
    assert!(!result.is_valid());
    assert!(result.svg.is_none());
    assert!(result.json.is_none());
    assert_eq!(result.validation.error_count(), 1);

    let error = &result.validation.errors[0];
    assert_eq!(error.issue_type, IssueType::UnknownGate);
    assert_eq!(error.category(), IssueCategory::Referential);
    assert!(error.message.contains("G9"));
}

#[test]
fn test_corner_positions_in_bounds() {
    let d = drill(
        vec![
            Player::new("A1", PlayerRole::Attacker, Position::new(0.0, 0.0)),
            Player::new("A2", PlayerRole::Attacker, Position::new(100.0, 100.0)),
        ],
        vec![Position::new(0.0, 0.0)],
        vec![],
    );
    assert_eq!(validate(&d).of_type(IssueType::OutOfBounds).count(), 0);
}

#[test]
fn test_just_outside_bounds_is_error() {
    let d = drill(
        vec![
            Player::new("A1", PlayerRole::Attacker, Position::new(50.0, 50.0)),
            Player::new("A2", PlayerRole::Attacker, Position::new(100.0001, 50.0)),
        ],
        vec![Position::new(50.0, 50.0)],
        vec![],
    );
    let result = validate(&d);
    assert_eq!(result.of_type(IssueType::OutOfBounds).count(), 1);
    assert!(!result.is_valid());
}

#[test]
fn test_spacing_threshold_inclusive() {
    let at = |dx: f64| {
        drill(
            vec![
                Player::new("A1", PlayerRole::Attacker, Position::new(50.0, 50.0)),
                Player::new("A2", PlayerRole::Attacker, Position::new(50.0 + dx, 50.0)),
            ],
            vec![Position::new(50.0, 50.0)],
            vec![],
        )
    };
    assert_eq!(validate(&at(3.0)).of_type(IssueType::PlayerSpacing).count(), 0);
    assert_eq!(validate(&at(2.999)).of_type(IssueType::PlayerSpacing).count(), 1);
}

#[test]
fn test_rendering_is_deterministic() {
    for fixture in fixtures::ALL {
        let d = fixture.drill().unwrap();
        assert_eq!(render(&d), render(&d), "{}", fixture.name);
    }
}

#[test]
fn test_serialization_preserves_drill() {
    for fixture in fixtures::ALL {
        let d = fixture.drill().unwrap();
        let json = schema::to_json(&d).unwrap();
        assert_eq!(schema::parse_str(&json).unwrap(), d, "{}", fixture.name);
    }
}

#[test]
fn test_possession_errors_match_tracker() {
    // A2 passes without the ball, then A1 passes legitimately.
    let d = drill(
        vec![
            Player::new("A1", PlayerRole::Attacker, Position::new(40.0, 50.0)),
            Player::new("A2", PlayerRole::Attacker, Position::new(60.0, 50.0)),
        ],
        vec![Position::new(40.0, 50.0)],
        vec![pass("A2", "A1"), pass("A1", "A2")],
    );
    let timeline = tracker::track(&d, &TrackerConfig::default());
    let violations: Vec<usize> = timeline
        .steps
        .iter()
        .filter(|s| matches!(s.outcome, StepOutcome::PossessionViolation { .. }))
        .map(|s| s.index)
        .collect();
    assert_eq!(violations, vec![0]);
    // A1 never lost the ball
    assert!(timeline.snapshots[1].holds_ball("A1"));
    assert!(timeline.snapshots[2].holds_ball("A2"));

    let result = validate(&d);
    let errors: Vec<_> = result.of_type(IssueType::NotInPossession).collect();
    assert_eq!(errors.len(), violations.len());
    assert_eq!(errors[0].action_index, Some(0));
    assert!(errors[0].message.contains("player A2 does not possess the ball at action 0"));
}

#[test]
fn test_violation_keeps_other_players_ball() {
    // A2 passes without a ball while A1 and B1 each hold one; B1's pass is legal.
    let d = drill(
        vec![
            Player::new("A1", PlayerRole::Attacker, Position::new(10.0, 10.0)),
            Player::new("A2", PlayerRole::Attacker, Position::new(30.0, 10.0)),
            Player::new("B1", PlayerRole::Attacker, Position::new(40.0, 10.0)),
        ],
        vec![Position::new(10.0, 10.0), Position::new(40.0, 10.0)],
        vec![pass("A2", "A1"), pass("B1", "A2")],
    );
    let timeline = tracker::track(&d, &TrackerConfig::default());
    assert_eq!(timeline.snapshots[1].possessor(1), Some("B1"));
    assert_eq!(timeline.snapshots[2].possessor(1), Some("A2"));

    let result = validate(&d);
    let errors: Vec<_> = result.of_type(IssueType::NotInPossession).collect();
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].action_index, Some(0));
    assert!(errors[0].message.contains("player A2 does not possess the ball at action 0"));
}

#[test]
fn test_across_is_not_a_crossing_drill() {
    let mut d = drill(
        vec![
            Player::new("A1", PlayerRole::Attacker, Position::new(40.0, 50.0)),
            Player::new("A2", PlayerRole::Attacker, Position::new(60.0, 50.0)),
        ],
        vec![Position::new(40.0, 50.0)],
        vec![pass("A1", "A2"), pass("A2", "A1")],
    );
    d.description = "Pass the ball across the grid".to_string();
    assert_eq!(drillboard::intent::detect(&d, None), vec![Intent::Passing]);

    let result = validate(&d);
    assert_eq!(result.of_type(IssueType::NoWidePlayer).count(), 0);
    assert_eq!(result.warning_count(), 0, "{:?}", result.warnings);
}

#[test]
fn test_fixture_intents_resolve() {
    let d = fixtures::FINISHING_2V1.drill().unwrap();
    assert!(drillboard::intent::detect(&d, None).contains(&Intent::Finishing));
    let d = fixtures::RONDO_4V2.drill().unwrap();
    assert!(drillboard::intent::detect(&d, None).contains(&Intent::Defending));
}
