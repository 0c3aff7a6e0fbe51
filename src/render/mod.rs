//! Drill diagram rendering
//!
//! Draws a drill as a static SVG: pitch and markings, entities at their
//! starting positions, then one overlay per action in timeline order. The
//! overlays come from the same [`Timeline`](crate::tracker::Timeline) the
//! validator checks, so a chained action always starts where the previous
//! one left its player.
//!
//! Rendering is pure: no randomness, no clock, no I/O. The same drill and
//! options always produce the same bytes.

mod actions;
mod entities;
mod field;
pub mod style;
pub mod svg;

pub use actions::{overlays, Overlay};
pub use svg::{escape, Num, SvgWriter};

use crate::config::{DrillConfig, RenderConfig};
use crate::models::{Drill, FieldType, Position};
use crate::tracker::{self, Timeline, TrackerConfig};

/// Vertical stretch applied to full-pitch drawings.
pub const FULL_FIELD_STRETCH: f64 = 1.5;

/// Rendering options
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Drawing units per normalized field unit
    pub scale: f64,
    /// Blank border around the pitch, in drawing units
    pub margin: f64,
    /// Draw player and mannequin labels
    pub labels: bool,
    /// Number overlays in sequence order
    pub step_numbers: bool,
    /// Must match the validator's tracker settings
    pub tracker: TrackerConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_render_config(&RenderConfig::default(), TrackerConfig::default())
    }
}

impl RenderOptions {
    pub fn from_render_config(render: &RenderConfig, tracker: TrackerConfig) -> Self {
        Self {
            scale: render.scale,
            margin: render.margin,
            labels: render.labels,
            step_numbers: render.step_numbers,
            tracker,
        }
    }

    /// Options matching a loaded configuration, tracker included.
    pub fn from_config(config: &DrillConfig) -> Self {
        Self::from_render_config(&config.render, config.validate.tracker())
    }
}

/// Maps normalized field coordinates to drawing coordinates.
///
/// Normalized `y` grows toward the north goal; drawing `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub margin: f64,
    /// Extra vertical factor (1.0 half pitch, 1.5 full pitch)
    pub stretch: f64,
}

impl Projection {
    pub fn new(field_type: FieldType, options: &RenderOptions) -> Self {
        let stretch = match field_type {
            FieldType::Half => 1.0,
            FieldType::Full => FULL_FIELD_STRETCH,
        };
        Self { scale: options.scale, margin: options.margin, stretch }
    }

    pub fn x(&self, x: f64) -> f64 {
        self.margin + x * self.scale
    }

    pub fn y(&self, y: f64) -> f64 {
        self.margin + (100.0 - y) * self.scale * self.stretch
    }

    pub fn point(&self, p: Position) -> (f64, f64) {
        (self.x(p.x), self.y(p.y))
    }

    /// Horizontal length in drawing units (marker sizes).
    pub fn len(&self, d: f64) -> f64 {
        d * self.scale
    }

    /// Vertical length in drawing units (field distances along y).
    pub fn len_y(&self, d: f64) -> f64 {
        d * self.scale * self.stretch
    }

    pub fn pitch_width(&self) -> f64 {
        100.0 * self.scale
    }

    pub fn pitch_height(&self) -> f64 {
        100.0 * self.scale * self.stretch
    }

    pub fn width(&self) -> f64 {
        self.pitch_width() + 2.0 * self.margin
    }

    pub fn height(&self) -> f64 {
        self.pitch_height() + 2.0 * self.margin
    }
}

/// Everything needed to draw one drill.
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub drill: &'a Drill,
    pub options: RenderOptions,
    pub projection: Projection,
    pub timeline: Timeline,
    /// One entry per drawn action, in timeline order
    pub overlays: Vec<Overlay>,
}

impl<'a> Scene<'a> {
    pub fn build(drill: &'a Drill, options: &RenderOptions) -> Self {
        let projection = Projection::new(drill.field.field_type, options);
        let timeline = tracker::track(drill, &options.tracker);
        let overlays = actions::overlays(drill, &timeline);
        Self { drill, options: options.clone(), projection, timeline, overlays }
    }

    /// Emit the SVG document.
    pub fn to_svg(&self) -> String {
        let p = &self.projection;
        let (width, height) = (Num(p.width()), Num(p.height()));
        let view_box = format!("0 0 {} {}", width, height);

        let mut w = SvgWriter::new();
        w.open(
            "svg",
            &[
                ("xmlns", &"http://www.w3.org/2000/svg"),
                ("width", &width),
                ("height", &height),
                ("viewBox", &view_box),
            ],
        );
        w.text("title", &[], &self.drill.name);
        self.write_defs(&mut w);
        field::draw(&mut w, self);
        entities::draw(&mut w, self);
        actions::draw(&mut w, self);
        w.close("svg");

        let svg = w.finish();
        tracing::debug!(drill = %self.drill.name, bytes = svg.len(), "rendered drill");
        svg
    }

    fn write_defs(&self, w: &mut SvgWriter) {
        let p = &self.projection;
        w.open("defs", &[]);
        w.open("clipPath", &[("id", &"pitch-clip")]);
        w.empty(
            "rect",
            &[
                ("x", &Num(p.margin)),
                ("y", &Num(p.margin)),
                ("width", &Num(p.pitch_width())),
                ("height", &Num(p.pitch_height())),
            ],
        );
        w.close("clipPath");
        for kind in style::ACTION_KINDS {
            w.open(
                "marker",
                &[
                    ("id", &style::marker_id(kind)),
                    ("viewBox", &"0 0 10 10"),
                    ("refX", &"9"),
                    ("refY", &"5"),
                    ("markerWidth", &"4"),
                    ("markerHeight", &"4"),
                    ("orient", &"auto-start-reverse"),
                ],
            );
            w.empty("path", &[("d", &"M0 0 L10 5 L0 10 Z"), ("fill", &style::action_color(kind))]);
            w.close("marker");
        }
        w.close("defs");
    }
}

/// Render a drill with default options.
pub fn render(drill: &Drill) -> String {
    render_with(drill, &RenderOptions::default())
}

/// Render a drill with explicit options.
pub fn render_with(drill: &Drill, options: &RenderOptions) -> String {
    Scene::build(drill, options).to_svg()
}
