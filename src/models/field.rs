//! Field coordinates and pitch configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Absolute position on the pitch in normalized 0-100 coordinates.
///
/// - `x`: 0 = left touchline, 100 = right touchline, 50 = centre
/// - `y`: 0 = bottom of the diagram, 100 = top of the diagram
///
/// Bounds are not enforced here; out-of-range values are reported by the
/// validator as structural errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True if both coordinates lie in the inclusive range [0, 100].
    pub fn in_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// How much of the pitch the diagram shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    /// One attacking end
    #[default]
    Half,
    /// Both ends with a halfway line
    Full,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Half => write!(f, "HALF"),
            FieldType::Full => write!(f, "FULL"),
        }
    }
}

/// Direction the attacking side plays toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttackingDirection {
    /// Toward the top of the diagram (goal at y=100)
    #[default]
    North,
    /// Toward the bottom of the diagram (goal at y=0)
    South,
}

impl AttackingDirection {
    /// The y coordinate of the attacking goal line.
    pub fn goal_line(self) -> f64 {
        match self {
            AttackingDirection::North => 100.0,
            AttackingDirection::South => 0.0,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            AttackingDirection::North => AttackingDirection::South,
            AttackingDirection::South => AttackingDirection::North,
        }
    }
}

/// Pitch configuration for a drill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldConfig {
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub attacking_direction: AttackingDirection,
    /// Draw pitch markings (boxes, halfway line, goal mouths)
    #[serde(default = "default_markings")]
    pub markings: bool,
    /// Number of goal mouths to draw (0, 1 or 2)
    #[serde(default = "default_goals")]
    pub goals: u8,
}

fn default_markings() -> bool {
    true
}

fn default_goals() -> u8 {
    1
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            field_type: FieldType::default(),
            attacking_direction: AttackingDirection::default(),
            markings: default_markings(),
            goals: default_goals(),
        }
    }
}
