//! Data models for drills (field, entities, actions)

mod action;
mod drill;
mod entity;
mod field;

// Re-export all public types
pub use action::{Action, ActionKind, GoalTarget, ShotTarget};
pub use drill::{Drill, Intent};
pub use entity::{Ball, Cone, ConeGate, GateOrientation, Mannequin, Player, PlayerRole};
pub use field::{AttackingDirection, FieldConfig, FieldType, Position};
