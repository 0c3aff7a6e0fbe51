//! Pitch geometry in normalized coordinates
//!
//! The validator's box checks and the renderer's markings both read these
//! constants, so a shot "outside the box" is outside the box that is drawn.

use std::collections::BTreeMap;

use crate::models::{AttackingDirection, Position};

/// Horizontal extent of the eighteen-yard box.
pub const PENALTY_BOX_X: (f64, f64) = (30.0, 70.0);
/// Depth of the eighteen-yard box from the goal line.
pub const PENALTY_BOX_DEPTH: f64 = 18.0;
/// Horizontal extent of the six-yard box.
pub const SIX_YARD_BOX_X: (f64, f64) = (42.0, 58.0);
/// Depth of the six-yard box from the goal line.
pub const SIX_YARD_BOX_DEPTH: f64 = 6.0;
/// Horizontal extent of the goal mouth (post to post).
pub const GOAL_MOUTH_X: (f64, f64) = (44.0, 56.0);
/// Distance of the penalty spot from the goal line.
pub const PENALTY_SPOT_DEPTH: f64 = 12.0;
/// Centre circle radius (full pitch only).
pub const CENTRE_CIRCLE_RADIUS: f64 = 10.0;
/// y coordinate of the halfway line on a full pitch.
pub const HALFWAY_LINE: f64 = 50.0;

/// Unit step from the goal line into the pitch.
fn into_pitch(direction: AttackingDirection) -> f64 {
    match direction {
        AttackingDirection::North => -1.0,
        AttackingDirection::South => 1.0,
    }
}

/// y coordinate `depth` units in from the goal line `direction` attacks.
pub fn depth_from_goal(direction: AttackingDirection, depth: f64) -> f64 {
    direction.goal_line() + into_pitch(direction) * depth
}

/// Centre of the goal mouth the given direction attacks.
pub fn goal_center(direction: AttackingDirection) -> Position {
    Position::new(50.0, direction.goal_line())
}

/// True if `pos` is inside the eighteen-yard box at the attacking end.
pub fn in_penalty_box(pos: &Position, direction: AttackingDirection) -> bool {
    in_box(pos, direction, PENALTY_BOX_X, PENALTY_BOX_DEPTH)
}

fn in_box(pos: &Position, direction: AttackingDirection, x: (f64, f64), depth: f64) -> bool {
    let within_x = x.0 <= pos.x && pos.x <= x.1;
    let goal_y = direction.goal_line();
    within_x && (pos.y - goal_y).abs() <= depth
}

/// Named landmarks for an attacking direction, sent to generators with
/// every request.
pub fn reference_positions(direction: AttackingDirection) -> BTreeMap<&'static str, Position> {
    let d = |depth| depth_from_goal(direction, depth);
    let own = direction.reversed();
    BTreeMap::from([
        ("goal_line_center", goal_center(direction)),
        ("penalty_spot", Position::new(50.0, d(PENALTY_SPOT_DEPTH))),
        ("top_of_18_yard_box", Position::new(50.0, d(PENALTY_BOX_DEPTH))),
        ("top_of_6_yard_box", Position::new(50.0, d(SIX_YARD_BOX_DEPTH))),
        ("left_post", Position::new(GOAL_MOUTH_X.0, direction.goal_line())),
        ("right_post", Position::new(GOAL_MOUTH_X.1, direction.goal_line())),
        ("left_edge_18", Position::new(PENALTY_BOX_X.0, d(PENALTY_BOX_DEPTH))),
        ("right_edge_18", Position::new(PENALTY_BOX_X.1, d(PENALTY_BOX_DEPTH))),
        ("center_circle", Position::new(50.0, HALFWAY_LINE)),
        ("own_goal", goal_center(own)),
        ("own_penalty_spot", Position::new(50.0, depth_from_goal(own, PENALTY_SPOT_DEPTH))),
    ])
}

/// Point `distance` along the segment from `from` toward `to`.
///
/// Returns `from` unchanged when the two points coincide.
pub fn step_toward(from: Position, to: Position, distance: f64) -> Position {
    let len = from.distance_to(&to);
    if len == 0.0 {
        return from;
    }
    Position::new(from.x + (to.x - from.x) / len * distance, from.y + (to.y - from.y) / len * distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_center() {
        assert_eq!(goal_center(AttackingDirection::North), Position::new(50.0, 100.0));
        assert_eq!(goal_center(AttackingDirection::South), Position::new(50.0, 0.0));
    }

    #[test]
    fn test_penalty_box_north() {
        let dir = AttackingDirection::North;
        assert!(in_penalty_box(&Position::new(50.0, 85.0), dir));
        assert!(in_penalty_box(&Position::new(30.0, 82.0), dir));
        assert!(!in_penalty_box(&Position::new(50.0, 81.0), dir));
        assert!(!in_penalty_box(&Position::new(75.0, 90.0), dir));
    }

    #[test]
    fn test_penalty_box_south() {
        let dir = AttackingDirection::South;
        assert!(in_penalty_box(&Position::new(50.0, 10.0), dir));
        assert!(!in_penalty_box(&Position::new(50.0, 85.0), dir));
    }

    #[test]
    fn test_reference_positions_mirror() {
        let north = reference_positions(AttackingDirection::North);
        let south = reference_positions(AttackingDirection::South);
        assert_eq!(north["penalty_spot"], Position::new(50.0, 88.0));
        assert_eq!(south["penalty_spot"], Position::new(50.0, 12.0));
        assert_eq!(north["own_goal"], south["goal_line_center"]);
    }

    #[test]
    fn test_step_toward() {
        let p = step_toward(Position::new(0.0, 0.0), Position::new(10.0, 0.0), 2.5);
        assert_eq!(p, Position::new(2.5, 0.0));
        let same = step_toward(Position::new(3.0, 3.0), Position::new(3.0, 3.0), 1.0);
        assert_eq!(same, Position::new(3.0, 3.0));
    }
}
