//! The closed set of drill actions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Position;

/// Symbolic shot target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalTarget {
    /// Centre of the attacking goal mouth
    Goal,
}

/// Where a shot is aimed: the attacking goal or an explicit point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ShotTarget {
    Goal(GoalTarget),
    Position(Position),
}

impl Default for ShotTarget {
    fn default() -> Self {
        ShotTarget::Goal(GoalTarget::Goal)
    }
}

/// One step of the drill timeline.
///
/// Serialized with a `type` tag (`PASS`, `RUN`, `DRIBBLE`, `SHOT`). Ids are
/// references into the drill's players and gates; they are resolved by the
/// tracker and validator, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Action {
    /// Ball played from one player to another
    Pass { from_player: String, to_player: String },
    /// Off-ball movement
    Run { player: String, to_position: Position },
    /// Movement with the ball, optionally through a gate
    Dribble {
        player: String,
        to_position: Position,
        #[serde(alias = "gate_id", skip_serializing_if = "Option::is_none", default)]
        through_gate: Option<String>,
    },
    /// Strike toward the goal or a point
    Shot {
        player: String,
        #[serde(default)]
        target: ShotTarget,
    },
}

/// Discriminant of [`Action`], used for dispatch tables and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Pass,
    Run,
    Dribble,
    Shot,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Pass => write!(f, "PASS"),
            ActionKind::Run => write!(f, "RUN"),
            ActionKind::Dribble => write!(f, "DRIBBLE"),
            ActionKind::Shot => write!(f, "SHOT"),
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Pass { .. } => ActionKind::Pass,
            Action::Run { .. } => ActionKind::Run,
            Action::Dribble { .. } => ActionKind::Dribble,
            Action::Shot { .. } => ActionKind::Shot,
        }
    }

    /// The player performing the action (the passer for a PASS).
    pub fn actor(&self) -> &str {
        match self {
            Action::Pass { from_player, .. } => from_player,
            Action::Run { player, .. }
            | Action::Dribble { player, .. }
            | Action::Shot { player, .. } => player,
        }
    }

    /// Every player id the action references, paired with its field name.
    pub fn player_refs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Action::Pass { from_player, to_player } => {
                vec![("from_player", from_player.as_str()), ("to_player", to_player.as_str())]
            }
            Action::Run { player, .. }
            | Action::Dribble { player, .. }
            | Action::Shot { player, .. } => vec![("player", player.as_str())],
        }
    }

    /// Gate id referenced by a DRIBBLE, if any.
    pub fn gate_ref(&self) -> Option<&str> {
        match self {
            Action::Dribble { through_gate, .. } => through_gate.as_deref(),
            _ => None,
        }
    }

    /// Whether the actor must hold a ball for the action to make sense.
    pub fn requires_possession(&self) -> bool {
        !matches!(self, Action::Run { .. })
    }

    /// Explicit destination carried by the action, if any.
    pub fn destination(&self) -> Option<Position> {
        match self {
            Action::Run { to_position, .. } | Action::Dribble { to_position, .. } => {
                Some(*to_position)
            }
            Action::Shot { target: ShotTarget::Position(p), .. } => Some(*p),
            _ => None,
        }
    }
}
