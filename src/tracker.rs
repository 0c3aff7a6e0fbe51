//! Position and possession tracking through a drill's action timeline
//!
//! [`track`] replays the actions in order and records, for every step, where
//! each player and ball is and who holds each ball. The validator reads the
//! step outcomes to report possession errors; the renderer reads the
//! snapshots to draw overlays. Both go through this one function, so a drill
//! is never drawn differently from how it was checked.

use crate::geometry;
use crate::models::{Action, ActionKind, AttackingDirection, Drill, Position, ShotTarget};

/// Tracker tuning shared by validation and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Maximum ball-to-player distance (inclusive) for initial possession
    pub ball_tolerance: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { ball_tolerance: 1.5 }
    }
}

/// A player's state at one point in the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub id: String,
    pub position: Position,
    /// Has left the initial position
    pub moved: bool,
}

/// A ball's state at one point in the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct BallState {
    /// Index into the drill's `balls`
    pub index: usize,
    pub position: Position,
    pub possessor: Option<String>,
}

/// Positions and possession between two actions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub players: Vec<PlayerState>,
    pub balls: Vec<BallState>,
}

impl Snapshot {
    pub fn player(&self, id: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.player(id).map(|p| p.position)
    }

    /// Lowest-indexed ball held by `id`.
    pub fn ball_held_by(&self, id: &str) -> Option<usize> {
        self.balls.iter().position(|b| b.possessor.as_deref() == Some(id))
    }

    /// True if `id` holds at least one ball.
    pub fn holds_ball(&self, id: &str) -> bool {
        self.ball_held_by(id).is_some()
    }

    /// Possessor of ball `index`, if the ball exists and is held.
    pub fn possessor(&self, index: usize) -> Option<&str> {
        self.balls.get(index).and_then(|b| b.possessor.as_deref())
    }

    fn move_player(&mut self, id: &str, to: Position) {
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            player.position = to;
            player.moved = true;
        }
    }

    fn place_ball(&mut self, index: usize, position: Position, possessor: Option<&str>) {
        if let Some(ball) = self.balls.get_mut(index) {
            ball.position = position;
            ball.possessor = possessor.map(str::to_string);
        }
    }

    /// Ball nearest to `id` among those accepted by `eligible`, lowest index on ties.
    fn nearest_ball(&self, id: &str, eligible: impl Fn(&BallState) -> bool) -> Option<(usize, f64)> {
        let from = self.position_of(id)?;
        let mut best: Option<(usize, f64)> = None;
        for (i, ball) in self.balls.iter().enumerate().filter(|(_, b)| eligible(b)) {
            let d = from.distance_to(&ball.position);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((i, d)),
            }
        }
        best
    }

    /// The ball `id` acts with.
    ///
    /// A held ball is used as is. Otherwise the nearest free ball within
    /// `tolerance` is picked up; a ball held by someone else is never taken.
    /// `None` when the drill has no balls at all.
    fn claim_ball(&self, id: &str, tolerance: f64) -> Option<Claim> {
        if let Some(ball) = self.ball_held_by(id) {
            return Some(Claim::Held(ball));
        }
        let (nearest, _) = self.nearest_ball(id, |_| true)?;
        let holder = self.possessor(nearest).map(str::to_string);
        let free = self
            .nearest_ball(id, |b| b.possessor.is_none())
            .filter(|(_, d)| *d <= tolerance)
            .map(|(i, _)| i);
        Some(Claim::Violation { free, holder })
    }
}

enum Claim {
    Held(usize),
    /// `free` is the loose ball picked up, if one was in reach; `holder`
    /// holds the ball nearest to the actor
    Violation { free: Option<usize>, holder: Option<String> },
}

impl Claim {
    /// Ball the action may move.
    fn ball(&self) -> Option<usize> {
        match self {
            Claim::Held(ball) => Some(*ball),
            Claim::Violation { free, .. } => *free,
        }
    }

    fn outcome(self, player: &str) -> StepOutcome {
        match self {
            Claim::Held(ball) => StepOutcome::Applied { ball: Some(ball) },
            Claim::Violation { free, holder } => StepOutcome::PossessionViolation {
                player: player.to_string(),
                holder,
                ball: free,
            },
        }
    }
}

/// How a ball's starting possessor was determined.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialPossession {
    /// Exactly one player within tolerance
    Held(String),
    /// Several players within tolerance; the nearest was chosen
    Ambiguous { chosen: String, candidates: Vec<String> },
    /// Nobody within tolerance
    Loose { nearest: Option<(String, f64)> },
}

impl InitialPossession {
    pub fn possessor(&self) -> Option<&str> {
        match self {
            InitialPossession::Held(id) => Some(id),
            InitialPossession::Ambiguous { chosen, .. } => Some(chosen),
            InitialPossession::Loose { .. } => None,
        }
    }
}

/// What replaying one action did.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Applied normally; `ball` is the ball involved, if any
    Applied { ball: Option<usize> },
    /// Actor did not hold a ball. With a free ball in reach (`ball`) the
    /// action is applied with it so later steps follow the intended
    /// sequence; otherwise the snapshot is left unchanged.
    PossessionViolation { player: String, holder: Option<String>, ball: Option<usize> },
    /// Action references unknown players; skipped
    Unresolved { missing: Vec<String> },
    /// Action needs a ball but the drill has none; skipped
    NoBall,
}

impl StepOutcome {
    /// Ball moved by this step, if any.
    pub fn ball(&self) -> Option<usize> {
        match self {
            StepOutcome::Applied { ball } => *ball,
            StepOutcome::PossessionViolation { ball, .. } => *ball,
            StepOutcome::Unresolved { .. } | StepOutcome::NoBall => None,
        }
    }

    /// True if the step changed the snapshot.
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            StepOutcome::Applied { .. } | StepOutcome::PossessionViolation { ball: Some(_), .. }
        )
    }
}

/// One replayed action.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Index into the drill's `actions`
    pub index: usize,
    pub kind: ActionKind,
    pub outcome: StepOutcome,
}

/// Full replay of a drill.
///
/// `snapshots[0]` is the initial state and `snapshots[i + 1]` the state after
/// action `i`, so there is always one more snapshot than there are steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Initial possession per ball, in ball order
    pub initial: Vec<InitialPossession>,
    pub snapshots: Vec<Snapshot>,
    pub steps: Vec<Step>,
}

impl Timeline {
    /// State immediately before action `index`.
    pub fn before(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// State immediately after action `index`.
    pub fn after(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index + 1)
    }

    /// State after the last action.
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

/// Resolve a shot target to a point on the pitch.
pub fn resolve_target(target: &ShotTarget, direction: AttackingDirection) -> Position {
    match target {
        ShotTarget::Goal(_) => geometry::goal_center(direction),
        ShotTarget::Position(p) => *p,
    }
}

/// Determine who starts with each ball.
pub fn initial_possession(drill: &Drill, config: &TrackerConfig) -> Vec<InitialPossession> {
    drill
        .balls
        .iter()
        .map(|ball| {
            let mut nearest: Option<(&str, f64)> = None;
            let mut candidates = Vec::new();
            for player in &drill.players {
                let d = ball.position.distance_to(&player.position);
                if d <= config.ball_tolerance {
                    candidates.push(player.id.clone());
                }
                match nearest {
                    Some((_, best)) if d >= best => {}
                    _ => nearest = Some((&player.id, d)),
                }
            }
            match (candidates.len(), nearest) {
                (1, _) => InitialPossession::Held(candidates.remove(0)),
                (0, nearest) => InitialPossession::Loose {
                    nearest: nearest.map(|(id, d)| (id.to_string(), d)),
                },
                (_, Some((id, _))) => {
                    InitialPossession::Ambiguous { chosen: id.to_string(), candidates }
                }
                (_, None) => InitialPossession::Loose { nearest: None },
            }
        })
        .collect()
}

/// Replay every action of `drill` and record the resulting timeline.
pub fn track(drill: &Drill, config: &TrackerConfig) -> Timeline {
    let initial = initial_possession(drill, config);
    let mut state = Snapshot {
        players: drill
            .players
            .iter()
            .map(|p| PlayerState { id: p.id.clone(), position: p.position, moved: false })
            .collect(),
        balls: drill
            .balls
            .iter()
            .zip(&initial)
            .enumerate()
            .map(|(index, (ball, start))| BallState {
                index,
                position: ball.position,
                possessor: start.possessor().map(str::to_string),
            })
            .collect(),
    };

    let mut snapshots = Vec::with_capacity(drill.actions.len() + 1);
    let mut steps = Vec::with_capacity(drill.actions.len());
    snapshots.push(state.clone());

    for (index, action) in drill.actions.iter().enumerate() {
        let outcome = apply(&mut state, action, drill.field.attacking_direction, config);
        steps.push(Step { index, kind: action.kind(), outcome });
        snapshots.push(state.clone());
    }

    Timeline { initial, snapshots, steps }
}

fn apply(
    state: &mut Snapshot,
    action: &Action,
    direction: AttackingDirection,
    config: &TrackerConfig,
) -> StepOutcome {
    let missing: Vec<String> = action
        .player_refs()
        .into_iter()
        .filter(|(_, id)| state.player(id).is_none())
        .map(|(_, id)| id.to_string())
        .collect();
    if !missing.is_empty() {
        return StepOutcome::Unresolved { missing };
    }

    let actor = match action {
        Action::Run { player, to_position } => {
            state.move_player(player, *to_position);
            return StepOutcome::Applied { ball: None };
        }
        Action::Pass { from_player, .. } => from_player,
        Action::Dribble { player, .. } | Action::Shot { player, .. } => player,
    };
    let Some(claim) = state.claim_ball(actor, config.ball_tolerance) else {
        return StepOutcome::NoBall;
    };
    let Some(ball) = claim.ball() else {
        return claim.outcome(actor);
    };

    match action {
        Action::Pass { to_player, .. } => {
            if let Some(receiver) = state.position_of(to_player) {
                state.place_ball(ball, receiver, Some(to_player));
            }
        }
        Action::Dribble { player, to_position, .. } => {
            state.move_player(player, *to_position);
            state.place_ball(ball, *to_position, Some(player));
        }
        Action::Shot { target, .. } => {
            state.place_ball(ball, resolve_target(target, direction), None);
        }
        Action::Run { .. } => {}
    }
    claim.outcome(actor)
}
