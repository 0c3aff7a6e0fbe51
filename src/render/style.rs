//! Colours, marker shapes and sizes used by the renderer.
//!
//! Sizes are in normalized field units unless noted; the projection scales
//! them to drawing units.

use crate::models::{ActionKind, PlayerRole};

pub const GRASS_LIGHT: &str = "#6fbf4a";
pub const GRASS_DARK: &str = "#63b043";
pub const LINE_COLOR: &str = "#ffffff";
pub const CONE_COLOR: &str = "#f4a261";
pub const CONE_EDGE: &str = "#000000";
pub const MANNEQUIN_COLOR: &str = "#2d3436";
pub const BALL_FILL: &str = "#ffffff";
pub const BALL_EDGE: &str = "#000000";
pub const LABEL_COLOR: &str = "#ffffff";
pub const BADGE_FILL: &str = "#1d3557";

/// Width of one grass stripe.
pub const STRIPE_WIDTH: f64 = 10.0;
/// Marking line width in drawing units.
pub const MARKING_WIDTH: f64 = 1.5;
/// Goal mouth line width in drawing units.
pub const GOAL_WIDTH: f64 = 4.0;
/// Overlay line width in drawing units.
pub const ACTION_WIDTH: f64 = 2.0;

pub const PLAYER_RADIUS: f64 = 1.8;
pub const BALL_RADIUS: f64 = 0.9;
pub const CONE_SIZE: f64 = 1.2;
pub const MANNEQUIN_BASE: f64 = 1.0;
pub const MANNEQUIN_HEIGHT: f64 = 2.5;
pub const MANNEQUIN_HEAD: f64 = 0.7;
pub const PENALTY_SPOT_RADIUS: f64 = 0.4;
pub const BADGE_RADIUS: f64 = 1.3;

/// Gap between an overlay and a marker that hasn't moved yet.
pub const PLAYER_CLEARANCE: f64 = 2.5;
/// Gap between chained overlays.
pub const CHAIN_GAP: f64 = 0.8;
/// How far the starting ball is drawn toward its holder's first action.
pub const BALL_NUDGE: f64 = 1.2;

/// Dribble wave amplitude.
pub const WAVE_AMPLITUDE: f64 = 1.0;
/// Full sine periods along a dribble.
pub const WAVE_PERIODS: f64 = 2.0;
/// Samples along a dribble path.
pub const WAVE_SAMPLES: usize = 48;

/// Marker outline for a player role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
    Diamond,
}

/// Fill colour and shape for a role.
pub fn role_style(role: PlayerRole) -> (&'static str, Shape) {
    match role {
        PlayerRole::Attacker => ("#e63946", Shape::Circle),
        PlayerRole::Defender => ("#457b9d", Shape::Square),
        PlayerRole::Goalkeeper => ("#f1fa3c", Shape::Diamond),
        PlayerRole::Neutral => ("#f4a261", Shape::Circle),
    }
}

/// Stroke colour of an action overlay.
pub fn action_color(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Pass => "#ffffff",
        ActionKind::Run => "#ffd60a",
        ActionKind::Dribble => "#ffffff",
        ActionKind::Shot => "#d62828",
    }
}

/// Dash pattern of an action overlay, if dashed.
pub fn action_dash(kind: ActionKind) -> Option<&'static str> {
    match kind {
        ActionKind::Run => Some("6 4"),
        _ => None,
    }
}

/// Id of the arrowhead `<marker>` for an action kind.
pub fn marker_id(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Pass => "arrow-pass",
        ActionKind::Run => "arrow-run",
        ActionKind::Dribble => "arrow-dribble",
        ActionKind::Shot => "arrow-shot",
    }
}

/// Every action kind, in marker definition order.
pub const ACTION_KINDS: [ActionKind; 4] =
    [ActionKind::Pass, ActionKind::Run, ActionKind::Dribble, ActionKind::Shot];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_style() {
        assert_eq!(role_style(PlayerRole::Attacker), ("#e63946", Shape::Circle));
        assert_eq!(role_style(PlayerRole::Defender), ("#457b9d", Shape::Square));
        assert_eq!(role_style(PlayerRole::Goalkeeper), ("#f1fa3c", Shape::Diamond));
        assert_eq!(role_style(PlayerRole::Neutral).1, Shape::Circle);
    }

    #[test]
    fn test_only_runs_are_dashed() {
        for kind in ACTION_KINDS {
            assert_eq!(action_dash(kind).is_some(), kind == ActionKind::Run);
        }
    }
}
