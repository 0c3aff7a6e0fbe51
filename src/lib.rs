//! Drillboard - Library for validating and diagramming soccer training drills
//!
//! This library provides functionality to:
//! - Parse drill documents (players, cones, gates, balls, actions) from JSON
//! - Track ball possession through a drill's action sequence
//! - Validate drills for structural, spatial, possession and coaching issues
//! - Render drills as SVG tactical diagrams
//! - Drive an external generator through a generate-validate-retry loop

pub mod cli;
pub mod config;
pub mod fixtures;
pub mod geometry;
pub mod intent;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod tracker;
pub mod validate;
