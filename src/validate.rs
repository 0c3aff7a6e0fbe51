//! Validation logic for drills
//!
//! Checks a parsed drill for structural, referential, possession and
//! semantic problems. Every check runs and every finding is collected, so a
//! single regeneration attempt can fix several problems at once. Findings
//! are data: the validator never fails.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::config::ValidateConfig;
use crate::geometry;
use crate::intent;
use crate::models::{Action, ActionKind, Drill, Intent, PlayerRole, Position, ShotTarget};
use crate::tracker::{self, InitialPossession, StepOutcome, Timeline};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Broad class of an issue. Only semantic issues are warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Structural,
    Referential,
    Possession,
    Semantic,
}

impl IssueCategory {
    pub fn severity(&self) -> Severity {
        match self {
            IssueCategory::Semantic => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueCategory::Structural => write!(f, "structural"),
            IssueCategory::Referential => write!(f, "referential"),
            IssueCategory::Possession => write!(f, "possession"),
            IssueCategory::Semantic => write!(f, "semantic"),
        }
    }
}

/// Type of validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Drill declares no players
    NoPlayers,
    /// A position lies outside the normalized pitch
    OutOfBounds,
    /// Two players start closer than the minimum spacing
    PlayerSpacing,
    /// Goalkeeper too far from the goal mouth
    GoalkeeperPlacement,
    /// Drill declares no balls
    NoBall,
    /// Ball not adjacent to any player
    LooseBall,
    /// Ball adjacent to more than one player
    AmbiguousPossession,
    /// Gate width not positive or too wide
    GateWidth,
    /// More goal mouths than a pitch has
    GoalCount,
    /// Two entities share an id
    DuplicateId,
    /// Action references a player that doesn't exist
    UnknownPlayer,
    /// Dribble references a gate that doesn't exist
    UnknownGate,
    /// Actor does not hold the ball when acting with it
    NotInPossession,
    /// Finishing drill with no shot
    MissingShot,
    /// Shot taken from outside the penalty box
    ShotOutsideBox,
    /// Passing drill with fewer than two passes
    TooFewPasses,
    /// Pass longer than the configured limit
    LongPass,
    /// Dribbling drill with no dribble
    MissingDribble,
    /// Crossing drill with nobody in a wide corridor
    NoWidePlayer,
    /// Defending drill with no defender
    NoDefender,
}

impl IssueType {
    pub fn category(&self) -> IssueCategory {
        use IssueType::*;
        match self {
            NoPlayers | OutOfBounds | PlayerSpacing | GoalkeeperPlacement | NoBall | LooseBall
            | AmbiguousPossession | GateWidth | GoalCount => IssueCategory::Structural,
            DuplicateId | UnknownPlayer | UnknownGate => IssueCategory::Referential,
            NotInPossession => IssueCategory::Possession,
            MissingShot | ShotOutsideBox | TooFewPasses | LongPass | MissingDribble
            | NoWidePlayer | NoDefender => IssueCategory::Semantic,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueType::NoPlayers => "no_players",
            IssueType::OutOfBounds => "out_of_bounds",
            IssueType::PlayerSpacing => "player_spacing",
            IssueType::GoalkeeperPlacement => "goalkeeper_placement",
            IssueType::NoBall => "no_ball",
            IssueType::LooseBall => "loose_ball",
            IssueType::AmbiguousPossession => "ambiguous_possession",
            IssueType::GateWidth => "gate_width",
            IssueType::GoalCount => "goal_count",
            IssueType::DuplicateId => "duplicate_id",
            IssueType::UnknownPlayer => "unknown_player",
            IssueType::UnknownGate => "unknown_gate",
            IssueType::NotInPossession => "not_in_possession",
            IssueType::MissingShot => "missing_shot",
            IssueType::ShotOutsideBox => "shot_outside_box",
            IssueType::TooFewPasses => "too_few_passes",
            IssueType::LongPass => "long_pass",
            IssueType::MissingDribble => "missing_dribble",
            IssueType::NoWidePlayer => "no_wide_player",
            IssueType::NoDefender => "no_defender",
        };
        f.write_str(name)
    }
}

/// A validation issue found in a drill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Severity of the issue
    pub severity: Severity,
    /// Type of issue
    pub issue_type: IssueType,
    /// Human-readable message describing the issue
    pub message: String,
    /// Index of the offending action (0-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_index: Option<usize>,
    /// Id or label of the offending entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Optional hint for fixing the issue (e.g., "did you mean?")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new error
    pub fn error(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, issue_type, message)
    }

    /// Create a new warning
    pub fn warning(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, issue_type, message)
    }

    /// Create an issue with the severity its category implies
    pub fn new(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self::with_severity(issue_type.category().severity(), issue_type, message)
    }

    fn with_severity(severity: Severity, issue_type: IssueType, message: impl Into<String>) -> Self {
        Self {
            severity,
            issue_type,
            message: message.into(),
            action_index: None,
            entity: None,
            suggestion: None,
        }
    }

    /// Add a suggestion to this issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Name the entity this issue is about
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Cite the action this issue is about
    pub fn with_action(mut self, index: usize) -> Self {
        self.action_index = Some(index);
        self
    }

    pub fn category(&self) -> IssueCategory {
        self.issue_type.category()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.issue_type, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        Ok(())
    }
}

/// All findings for one drill, split by severity
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue under its severity.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    /// A drill is valid when it has no errors; warnings don't count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors first, then warnings.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Issues of one type.
    pub fn of_type(&self, issue_type: IssueType) -> impl Iterator<Item = &ValidationIssue> {
        self.issues().filter(move |i| i.issue_type == issue_type)
    }

    /// Plain-text report handed back to a generator on the next attempt.
    pub fn feedback(&self) -> String {
        let mut out = String::new();
        if !self.errors.is_empty() {
            out.push_str("Errors (must fix):\n");
            for issue in &self.errors {
                push_feedback_line(&mut out, issue);
            }
        }
        if !self.warnings.is_empty() {
            out.push_str("Warnings (should fix):\n");
            for issue in &self.warnings {
                push_feedback_line(&mut out, issue);
            }
        }
        out
    }
}

fn push_feedback_line(out: &mut String, issue: &ValidationIssue) {
    out.push_str("- ");
    out.push_str(&issue.message);
    if let Some(suggestion) = &issue.suggestion {
        out.push_str(" (");
        out.push_str(suggestion);
        out.push(')');
    }
    out.push('\n');
}

/// Validator for drills
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidateConfig,
    /// Coaching goal the drill was generated from, used for intent detection
    goal: Option<String>,
}

impl Validator {
    /// Create a new validator
    pub fn new(config: ValidateConfig) -> Self {
        Self { config, goal: None }
    }

    /// Also consider `goal` when detecting the drill's intent
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    pub fn config(&self) -> &ValidateConfig {
        &self.config
    }

    /// Validate a drill, replaying its actions with the shared tracker.
    pub fn validate(&self, drill: &Drill) -> ValidationResult {
        let timeline = tracker::track(drill, &self.config.tracker());
        self.validate_timeline(drill, &timeline)
    }

    /// Validate a drill against an already-computed timeline.
    pub fn validate_timeline(&self, drill: &Drill, timeline: &Timeline) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.check_structure(drill, timeline, &mut result);
        self.check_references(drill, &mut result);
        self.check_possession(timeline, &mut result);
        self.check_intent(drill, timeline, &mut result);
        tracing::debug!(
            drill = %drill.name,
            errors = result.error_count(),
            warnings = result.warning_count(),
            "validated drill"
        );
        result
    }

    fn check_structure(&self, drill: &Drill, timeline: &Timeline, result: &mut ValidationResult) {
        if drill.players.is_empty() {
            result.push(ValidationIssue::error(IssueType::NoPlayers, "drill has no players"));
        }

        for (entity, position) in declared_positions(drill) {
            if !position.in_bounds() {
                result.push(
                    ValidationIssue::error(
                        IssueType::OutOfBounds,
                        format!("{} at {} is outside the field [0, 100]", entity, position),
                    )
                    .with_entity(entity),
                );
            }
        }
        for (index, action) in drill.actions.iter().enumerate() {
            let Some(target) = action.destination() else {
                continue;
            };
            if !target.in_bounds() {
                let what = match action {
                    Action::Shot { .. } => "shot target",
                    _ => "destination",
                };
                result.push(
                    ValidationIssue::error(
                        IssueType::OutOfBounds,
                        format!("action {} ({}) {} {} is outside the field [0, 100]", index, action.kind(), what, target),
                    )
                    .with_action(index)
                    .with_entity(action.actor()),
                );
            }
        }

        self.check_spacing(drill, result);
        self.check_goalkeepers(drill, result);
        self.check_balls(drill, timeline, result);

        for gate in &drill.cone_gates {
            if gate.width <= 0.0 || gate.width > self.config.max_gate_width {
                result.push(
                    ValidationIssue::error(
                        IssueType::GateWidth,
                        format!(
                            "gate {} has width {}; expected more than 0 and at most {}",
                            gate.id, gate.width, self.config.max_gate_width
                        ),
                    )
                    .with_entity(&gate.id),
                );
            }
        }

        if drill.field.goals > 2 {
            result.push(ValidationIssue::error(
                IssueType::GoalCount,
                format!("field has {} goals; at most 2 are supported", drill.field.goals),
            ));
        }
    }

    fn check_spacing(&self, drill: &Drill, result: &mut ValidationResult) {
        let min = self.config.min_player_spacing;
        for (i, a) in drill.players.iter().enumerate() {
            for b in &drill.players[i + 1..] {
                let d = a.position.distance_to(&b.position);
                if d < min {
                    result.push(
                        ValidationIssue::error(
                            IssueType::PlayerSpacing,
                            format!("players {} and {} are {:.2} apart; minimum spacing is {}", a.id, b.id, d, min),
                        )
                        .with_entity(&b.id),
                    );
                }
            }
        }
    }

    /// Every GOALKEEPER must stand near the goal being attacked. A second
    /// goal (`goals == 2`) does not count; no goal at all skips the check.
    fn check_goalkeepers(&self, drill: &Drill, result: &mut ValidationResult) {
        if drill.field.goals == 0 {
            return;
        }
        let goal = geometry::goal_center(drill.field.attacking_direction);
        let max = self.config.goalkeeper_max_distance;

        for keeper in drill.players.iter().filter(|p| p.role == PlayerRole::Goalkeeper) {
            let distance = keeper.position.distance_to(&goal);
            if distance > max {
                result.push(
                    ValidationIssue::error(
                        IssueType::GoalkeeperPlacement,
                        format!(
                            "goalkeeper {} at {} is {:.1} from the goal mouth; expected within {}",
                            keeper.id, keeper.position, distance, max
                        ),
                    )
                    .with_entity(&keeper.id)
                    .with_suggestion(format!("place the goalkeeper near {}", goal)),
                );
            }
        }
    }

    fn check_balls(&self, drill: &Drill, timeline: &Timeline, result: &mut ValidationResult) {
        if drill.balls.is_empty() {
            result.push(ValidationIssue::error(IssueType::NoBall, "drill has no ball"));
            return;
        }
        for (index, start) in timeline.initial.iter().enumerate() {
            let entity = format!("ball {}", index);
            match start {
                InitialPossession::Held(_) => {}
                InitialPossession::Loose { nearest } => {
                    let mut issue = ValidationIssue::error(
                        IssueType::LooseBall,
                        format!(
                            "{} is not within {} of any player",
                            entity, self.config.ball_tolerance
                        ),
                    )
                    .with_entity(&entity);
                    if let Some((id, d)) = nearest {
                        issue = issue.with_suggestion(format!("nearest player is {} at {:.1}", id, d));
                    }
                    result.push(issue);
                }
                InitialPossession::Ambiguous { candidates, .. } => {
                    result.push(
                        ValidationIssue::error(
                            IssueType::AmbiguousPossession,
                            format!(
                                "{} is within {} of several players ({}); possession is ambiguous",
                                entity,
                                self.config.ball_tolerance,
                                candidates.join(", ")
                            ),
                        )
                        .with_entity(&entity),
                    );
                }
            }
        }
    }

    fn check_references(&self, drill: &Drill, result: &mut ValidationResult) {
        let duplicates = find_duplicates("player", drill.players.iter().map(|p| p.id.as_str()))
            .chain(find_duplicates("gate", drill.cone_gates.iter().map(|g| g.id.as_str())))
            .chain(find_duplicates("mannequin", drill.mannequins.iter().map(|m| m.id.as_str())));
        for (entity, id) in duplicates {
            result.push(
                ValidationIssue::error(IssueType::DuplicateId, format!("duplicate {} id \"{}\"", entity, id))
                    .with_entity(id),
            );
        }

        let player_ids: Vec<&str> = drill.players.iter().map(|p| p.id.as_str()).collect();
        let gate_ids: Vec<&str> = drill.cone_gates.iter().map(|g| g.id.as_str()).collect();

        for (index, action) in drill.actions.iter().enumerate() {
            for (field, id) in action.player_refs() {
                if drill.player(id).is_some() {
                    continue;
                }
                let mut issue = ValidationIssue::error(
                    IssueType::UnknownPlayer,
                    format!("action {} ({}) references unknown player \"{}\" in {}", index, action.kind(), id, field),
                )
                .with_action(index)
                .with_entity(id);
                if let Some(s) = suggest_id(id, &player_ids) {
                    issue = issue.with_suggestion(format!("did you mean {}?", s));
                }
                result.push(issue);
            }
            if let Some(gate) = action.gate_ref() {
                if drill.gate(gate).is_none() {
                    let mut issue = ValidationIssue::error(
                        IssueType::UnknownGate,
                        format!("action {} ({}) references unknown gate \"{}\"", index, action.kind(), gate),
                    )
                    .with_action(index)
                    .with_entity(gate);
                    if let Some(s) = suggest_id(gate, &gate_ids) {
                        issue = issue.with_suggestion(format!("did you mean {}?", s));
                    }
                    result.push(issue);
                }
            }
        }
    }

    fn check_possession(&self, timeline: &Timeline, result: &mut ValidationResult) {
        for step in &timeline.steps {
            if let StepOutcome::PossessionViolation { player, holder, .. } = &step.outcome {
                let hint = match holder {
                    Some(holder) => format!("{} has the ball at this point", holder),
                    None => "the ball is loose at this point".to_string(),
                };
                result.push(
                    ValidationIssue::error(
                        IssueType::NotInPossession,
                        format!("player {} does not possess the ball at action {}", player, step.index),
                    )
                    .with_action(step.index)
                    .with_entity(player)
                    .with_suggestion(hint),
                );
            }
        }
    }

    fn check_intent(&self, drill: &Drill, timeline: &Timeline, result: &mut ValidationResult) {
        for intent in intent::detect(drill, self.goal.as_deref()) {
            match intent {
                Intent::Finishing => self.check_finishing(drill, timeline, result),
                Intent::Passing => self.check_passing(drill, timeline, result),
                Intent::Dribbling => {
                    if drill.count_actions(ActionKind::Dribble) == 0 {
                        result.push(ValidationIssue::warning(
                            IssueType::MissingDribble,
                            "dribbling drill has no DRIBBLE action",
                        ));
                    }
                }
                Intent::Crossing => self.check_crossing(timeline, result),
                Intent::Defending => {
                    if !drill.players.iter().any(|p| p.role == PlayerRole::Defender) {
                        result.push(ValidationIssue::warning(
                            IssueType::NoDefender,
                            "defending drill has no DEFENDER",
                        ));
                    }
                }
            }
        }
    }

    fn check_finishing(&self, drill: &Drill, timeline: &Timeline, result: &mut ValidationResult) {
        if drill.count_actions(ActionKind::Shot) == 0 {
            result.push(ValidationIssue::warning(
                IssueType::MissingShot,
                "finishing drill has no SHOT action",
            ));
            return;
        }
        let direction = drill.field.attacking_direction;
        for (index, action) in drill.actions.iter().enumerate() {
            let Action::Shot { player, target } = action else {
                continue;
            };
            // Shots at an explicit point are not necessarily at goal.
            if matches!(target, ShotTarget::Position(_)) {
                continue;
            }
            let Some(from) = timeline.before(index).and_then(|s| s.position_of(player)) else {
                continue;
            };
            if !geometry::in_penalty_box(&from, direction) {
                result.push(
                    ValidationIssue::warning(
                        IssueType::ShotOutsideBox,
                        format!("player {} shoots from outside the penalty box at action {}", player, index),
                    )
                    .with_action(index)
                    .with_entity(player),
                );
            }
        }
    }

    fn check_passing(&self, drill: &Drill, timeline: &Timeline, result: &mut ValidationResult) {
        if drill.count_actions(ActionKind::Pass) < 2 {
            result.push(ValidationIssue::warning(
                IssueType::TooFewPasses,
                "passing drill has fewer than 2 PASS actions",
            ));
        }
        for (index, action) in drill.actions.iter().enumerate() {
            let Action::Pass { from_player, to_player } = action else {
                continue;
            };
            let Some(snapshot) = timeline.before(index) else {
                continue;
            };
            let (Some(from), Some(to)) = (snapshot.position_of(from_player), snapshot.position_of(to_player))
            else {
                continue;
            };
            let d = from.distance_to(&to);
            if d > self.config.long_pass {
                result.push(
                    ValidationIssue::warning(
                        IssueType::LongPass,
                        format!("pass at action {} is very long ({:.1} units)", index, d),
                    )
                    .with_action(index)
                    .with_entity(from_player),
                );
            }
        }
    }

    fn check_crossing(&self, timeline: &Timeline, result: &mut ValidationResult) {
        let wide = self.config.wide_corridor;
        let is_wide = |p: &Position| p.x < wide || p.x > 100.0 - wide;
        let any_wide = timeline
            .snapshots
            .iter()
            .any(|s| s.players.iter().any(|p| is_wide(&p.position)));
        if !any_wide {
            result.push(
                ValidationIssue::warning(IssueType::NoWidePlayer, "crossing drill has no wide players")
                    .with_suggestion(format!("position a player at x < {} or x > {}", wide, 100.0 - wide)),
            );
        }
    }
}

/// Validate with the default configuration.
pub fn validate(drill: &Drill) -> ValidationResult {
    Validator::default().validate(drill)
}

/// Every declared static position with a label naming its entity.
fn declared_positions(drill: &Drill) -> Vec<(String, Position)> {
    let mut out = Vec::new();
    out.extend(drill.players.iter().map(|p| (format!("player {}", p.id), p.position)));
    out.extend(drill.balls.iter().enumerate().map(|(i, b)| (format!("ball {}", i), b.position)));
    out.extend(drill.cones.iter().enumerate().map(|(i, c)| (format!("cone {}", i), c.position)));
    out.extend(drill.cone_gates.iter().map(|g| (format!("gate {}", g.id), g.center)));
    out.extend(drill.mannequins.iter().map(|m| (format!("mannequin {}", m.id), m.position)));
    out
}

/// Ids that occur more than once, reported once each in first-seen order.
fn find_duplicates<'a>(
    entity: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> impl Iterator<Item = (&'static str, &'a str)> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dups = Vec::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            dups.push((entity, id));
        }
    }
    dups.into_iter()
}

/// Find the closest matching id using Levenshtein distance.
///
/// Returns `None` when nothing is within two edits.
pub fn suggest_id(unknown: &str, known: &[&str]) -> Option<String> {
    // Only consider ids with distance <= 2
    const MAX_DISTANCE: usize = 2;

    let mut best_match: Option<(&str, usize)> = None;

    for candidate in known {
        let distance = levenshtein_distance(unknown, candidate);
        if distance <= MAX_DISTANCE {
            match best_match {
                None => best_match = Some((candidate, distance)),
                Some((_, best_dist)) if distance < best_dist => best_match = Some((candidate, distance)),
                _ => {}
            }
        }
    }

    best_match.map(|(s, _)| s.to_string())
}

fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut dp = vec![vec![0usize; b_len + 1]; a_len + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        dp[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1) // deletion
                .min(dp[i][j - 1] + 1) // insertion
                .min(dp[i - 1][j - 1] + cost); // substitution
        }
    }

    dp[a_len][b_len]
}
