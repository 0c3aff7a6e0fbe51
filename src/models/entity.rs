//! Players, balls, cones, gates and mannequins.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Position;

/// Tactical role of a player. Drives marker colour and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerRole {
    Attacker,
    Defender,
    Goalkeeper,
    Neutral,
}

impl std::fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerRole::Attacker => write!(f, "ATTACKER"),
            PlayerRole::Defender => write!(f, "DEFENDER"),
            PlayerRole::Goalkeeper => write!(f, "GOALKEEPER"),
            PlayerRole::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// A player on the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    /// Player id (e.g. `A1`, `D2`, `GK`)
    pub id: String,
    pub role: PlayerRole,
    /// Initial position
    pub position: Position,
    /// Optional display label, drawn instead of the id
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl Player {
    pub fn new(id: impl Into<String>, role: PlayerRole, position: Position) -> Self {
        Self { id: id.into(), role, position, label: None }
    }

    /// Text drawn next to the marker.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// A ball, identified by its index in the drill's ball list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Ball {
    pub position: Position,
}

/// A single marker cone. Never referenced by actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Cone {
    pub position: Position,
}

/// Orientation of the line joining the two cones of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateOrientation {
    Horizontal,
    Vertical,
}

/// A gate formed by two virtual cones, `width` apart around `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConeGate {
    pub id: String,
    pub center: Position,
    pub width: f64,
    pub orientation: GateOrientation,
}

impl ConeGate {
    /// Positions of the two cones forming the gate.
    pub fn posts(&self) -> (Position, Position) {
        let half = self.width / 2.0;
        let c = self.center;
        match self.orientation {
            GateOrientation::Horizontal => {
                (Position::new(c.x - half, c.y), Position::new(c.x + half, c.y))
            }
            GateOrientation::Vertical => {
                (Position::new(c.x, c.y - half), Position::new(c.x, c.y + half))
            }
        }
    }
}

/// A training mannequin standing in for a passive defender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Mannequin {
    pub id: String,
    pub position: Position,
}
