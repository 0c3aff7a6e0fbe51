//! Action overlays and step badges.

use std::f64::consts::PI;

use super::style::{self, CHAIN_GAP, PLAYER_CLEARANCE};
use super::svg::{Num, PathData, SvgWriter};
use super::{Projection, Scene};
use crate::geometry::step_toward;
use crate::models::{Action, ActionKind, Drill, Position};
use crate::tracker::{Snapshot, Timeline};

/// Geometry of one drawn action.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Index into the drill's actions
    pub index: usize,
    pub kind: ActionKind,
    /// Ball moved by the action, if any
    pub ball: Option<usize>,
    /// Where the action starts and ends on the pitch
    pub from: Position,
    pub to: Position,
    /// Drawn endpoints, pulled back from the markers they connect
    pub start: Position,
    pub end: Position,
}

fn clearance(snapshot: &Snapshot, id: &str) -> f64 {
    match snapshot.player(id) {
        Some(p) if p.moved => CHAIN_GAP,
        _ => PLAYER_CLEARANCE,
    }
}

/// Overlays for every applied action, in timeline order.
///
/// Actions the tracker could not apply and zero-length actions are skipped.
pub fn overlays(drill: &Drill, timeline: &Timeline) -> Vec<Overlay> {
    let mut out = Vec::new();
    for step in &timeline.steps {
        if !step.outcome.is_applied() {
            continue;
        }
        let (Some(action), Some(before), Some(after)) =
            (drill.actions.get(step.index), timeline.before(step.index), timeline.after(step.index))
        else {
            continue;
        };

        let endpoints = match action {
            Action::Pass { from_player, to_player } => before
                .position_of(from_player)
                .zip(before.position_of(to_player))
                .map(|(from, to)| {
                    (from, to, clearance(before, from_player), clearance(before, to_player))
                }),
            Action::Run { player, to_position } | Action::Dribble { player, to_position, .. } => {
                before
                    .position_of(player)
                    .map(|from| (from, *to_position, clearance(before, player), CHAIN_GAP))
            }
            Action::Shot { player, .. } => {
                let target = step.outcome.ball().and_then(|b| after.balls.get(b)).map(|b| b.position);
                before
                    .position_of(player)
                    .zip(target)
                    .map(|(from, to)| (from, to, clearance(before, player), 0.0))
            }
        };
        let Some((from, to, start_gap, end_gap)) = endpoints else {
            continue;
        };

        let length = from.distance_to(&to);
        if length == 0.0 {
            continue;
        }
        let (start, end) = if length > start_gap + end_gap {
            (step_toward(from, to, start_gap), step_toward(to, from, end_gap))
        } else {
            (from, to)
        };

        out.push(Overlay {
            index: step.index,
            kind: step.kind,
            ball: step.outcome.ball(),
            from,
            to,
            start,
            end,
        });
    }
    out
}

/// Sine-wave path from `start` to `end`, in drawing coordinates.
fn wave_path(p: &Projection, start: Position, end: Position) -> PathData {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let length = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = (-dy / length, dx / length);

    let mut d = PathData::new();
    for k in 0..=style::WAVE_SAMPLES {
        let t = k as f64 / style::WAVE_SAMPLES as f64;
        let offset = (t * style::WAVE_PERIODS * 2.0 * PI).sin() * style::WAVE_AMPLITUDE;
        let point =
            Position::new(start.x + dx * t + nx * offset, start.y + dy * t + ny * offset);
        let (x, y) = p.point(point);
        d = if k == 0 { d.move_to(x, y) } else { d.line_to(x, y) };
    }
    d
}

pub(super) fn draw(w: &mut SvgWriter, scene: &Scene<'_>) {
    let p = &scene.projection;
    w.open(
        "g",
        &[
            ("id", &"actions"),
            ("fill", &"none"),
            ("stroke-width", &Num(style::ACTION_WIDTH)),
            ("stroke-linecap", &"round"),
        ],
    );
    for overlay in &scene.overlays {
        draw_overlay(w, p, overlay);
    }
    w.close("g");

    if scene.options.step_numbers && !scene.overlays.is_empty() {
        w.open("g", &[("id", &"steps")]);
        for overlay in &scene.overlays {
            draw_badge(w, p, overlay);
        }
        w.close("g");
    }
}

fn draw_overlay(w: &mut SvgWriter, p: &Projection, overlay: &Overlay) {
    let kind = overlay.kind;
    let class = kind.to_string().to_lowercase();
    let color = style::action_color(kind);
    let marker = format!("url(#{})", style::marker_id(kind));
    let (x1, y1) = p.point(overlay.start);
    let (x2, y2) = p.point(overlay.end);

    match kind {
        ActionKind::Dribble => {
            let d = wave_path(p, overlay.start, overlay.end);
            w.empty(
                "path",
                &[("class", &class), ("d", &d), ("stroke", &color), ("marker-end", &marker)],
            );
            let (bx, by) = p.point(overlay.to);
            w.empty(
                "circle",
                &[
                    ("class", &"dribble-ball"),
                    ("cx", &Num(bx)),
                    ("cy", &Num(by)),
                    ("r", &Num(p.len(style::BALL_RADIUS * 0.8))),
                    ("fill", &style::BALL_FILL),
                    ("stroke", &style::BALL_EDGE),
                    ("stroke-width", &Num(1.0)),
                ],
            );
        }
        _ => {
            let dash = style::action_dash(kind).unwrap_or("none");
            w.empty(
                "line",
                &[
                    ("class", &class),
                    ("x1", &Num(x1)),
                    ("y1", &Num(y1)),
                    ("x2", &Num(x2)),
                    ("y2", &Num(y2)),
                    ("stroke", &color),
                    ("stroke-dasharray", &dash),
                    ("marker-end", &marker),
                ],
            );
        }
    }
}

fn draw_badge(w: &mut SvgWriter, p: &Projection, overlay: &Overlay) {
    let mid = Position::new(
        (overlay.start.x + overlay.end.x) / 2.0,
        (overlay.start.y + overlay.end.y) / 2.0,
    );
    let (cx, cy) = p.point(mid);
    let r = p.len(style::BADGE_RADIUS);
    w.open("g", &[("class", &"step")]);
    w.empty(
        "circle",
        &[
            ("cx", &Num(cx)),
            ("cy", &Num(cy)),
            ("r", &Num(r)),
            ("fill", &style::BADGE_FILL),
            ("stroke", &style::LABEL_COLOR),
            ("stroke-width", &Num(1.0)),
        ],
    );
    w.text(
        "text",
        &[
            ("x", &Num(cx)),
            ("y", &Num(cy)),
            ("fill", &style::LABEL_COLOR),
            ("font-family", &"sans-serif"),
            ("font-size", &Num(r * 1.2)),
            ("font-weight", &"bold"),
            ("text-anchor", &"middle"),
            ("dominant-baseline", &"central"),
        ],
        &(overlay.index + 1).to_string(),
    );
    w.close("g");
}
