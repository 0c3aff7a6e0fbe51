//! The drill aggregate.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Action, ActionKind, Ball, Cone, ConeGate, FieldConfig, Mannequin, Player};

/// Training intent a drill is built around. Drives the semantic checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intent {
    Finishing,
    Passing,
    Dribbling,
    Crossing,
    Defending,
}

impl Intent {
    pub const ALL: [Intent; 5] =
        [Intent::Finishing, Intent::Passing, Intent::Dribbling, Intent::Crossing, Intent::Defending];
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Finishing => write!(f, "finishing"),
            Intent::Passing => write!(f, "passing"),
            Intent::Dribbling => write!(f, "dribbling"),
            Intent::Crossing => write!(f, "crossing"),
            Intent::Defending => write!(f, "defending"),
        }
    }
}

/// A complete drill: pitch, entities, the ordered action timeline and
/// coaching notes.
///
/// A drill is built once per parse and only read afterwards; the tracker,
/// validator and renderer all take `&Drill`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Drill {
    pub name: String,
    pub description: String,
    /// Explicit intent tag; overrides keyword inference when present
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub field: FieldConfig,
    pub players: Vec<Player>,
    #[serde(default)]
    pub cones: Vec<Cone>,
    #[serde(default)]
    pub cone_gates: Vec<ConeGate>,
    #[serde(default)]
    pub balls: Vec<Ball>,
    #[serde(default)]
    pub mannequins: Vec<Mannequin>,
    /// Timeline; order is significant
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub coaching_points: Vec<String>,
    #[serde(default)]
    pub variations: Vec<String>,
}

impl Drill {
    /// Look up a player by id (first match when ids are duplicated).
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a cone gate by id.
    pub fn gate(&self, id: &str) -> Option<&ConeGate> {
        self.cone_gates.iter().find(|g| g.id == id)
    }

    /// Number of actions of the given kind.
    pub fn count_actions(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind() == kind).count()
    }
}
