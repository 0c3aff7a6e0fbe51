//! Cones, gates, mannequins, players and balls at their starting positions.

use super::style::{self, Shape};
use super::svg::{Num, PathData, SvgWriter};
use super::{Overlay, Projection, Scene};
use crate::geometry::step_toward;
use crate::models::{Mannequin, Player, Position};

pub(super) fn draw(w: &mut SvgWriter, scene: &Scene<'_>) {
    let drill = scene.drill;
    let p = &scene.projection;

    if !drill.cones.is_empty() {
        w.open("g", &[("id", &"cones")]);
        for cone in &drill.cones {
            draw_cone(w, p, cone.position);
        }
        w.close("g");
    }

    if !drill.cone_gates.is_empty() {
        w.open("g", &[("id", &"gates")]);
        for gate in &drill.cone_gates {
            let (a, b) = gate.posts();
            let ((x1, y1), (x2, y2)) = (p.point(a), p.point(b));
            w.open("g", &[("class", &"gate"), ("data-id", &gate.id)]);
            w.empty(
                "line",
                &[
                    ("x1", &Num(x1)),
                    ("y1", &Num(y1)),
                    ("x2", &Num(x2)),
                    ("y2", &Num(y2)),
                    ("stroke", &style::CONE_COLOR),
                    ("stroke-width", &Num(1.5)),
                    ("stroke-dasharray", &"4 3"),
                ],
            );
            draw_cone(w, p, a);
            draw_cone(w, p, b);
            w.close("g");
        }
        w.close("g");
    }

    if !drill.mannequins.is_empty() {
        w.open("g", &[("id", &"mannequins")]);
        for mannequin in &drill.mannequins {
            draw_mannequin(w, p, mannequin, scene.options.labels);
        }
        w.close("g");
    }

    w.open("g", &[("id", &"players")]);
    for player in &drill.players {
        draw_player(w, p, player, scene.options.labels);
    }
    w.close("g");

    if !drill.balls.is_empty() {
        w.open("g", &[("id", &"balls")]);
        for (index, ball) in drill.balls.iter().enumerate() {
            let held = scene.timeline.initial.get(index).and_then(|s| s.possessor()).is_some();
            let at = if held {
                nudge(ball.position, index, &scene.overlays)
            } else {
                ball.position
            };
            let (cx, cy) = p.point(at);
            w.empty(
                "circle",
                &[
                    ("class", &"ball"),
                    ("cx", &Num(cx)),
                    ("cy", &Num(cy)),
                    ("r", &Num(p.len(style::BALL_RADIUS))),
                    ("fill", &style::BALL_FILL),
                    ("stroke", &style::BALL_EDGE),
                    ("stroke-width", &Num(1.0)),
                ],
            );
        }
        w.close("g");
    }
}

/// Held ball drawn at the holder's feet, toward where it goes first.
fn nudge(position: Position, ball: usize, overlays: &[Overlay]) -> Position {
    match overlays.iter().find(|o| o.ball == Some(ball)) {
        Some(o) => {
            let target =
                Position::new(position.x + o.to.x - o.from.x, position.y + o.to.y - o.from.y);
            step_toward(position, target, style::BALL_NUDGE)
        }
        None => position,
    }
}

fn draw_cone(w: &mut SvgWriter, p: &Projection, at: Position) {
    let (cx, cy) = p.point(at);
    let s = p.len(style::CONE_SIZE);
    let d = PathData::new()
        .move_to(cx, cy - s)
        .line_to(cx + s, cy + s * 0.8)
        .line_to(cx - s, cy + s * 0.8)
        .close();
    w.empty(
        "path",
        &[
            ("class", &"cone"),
            ("d", &d),
            ("fill", &style::CONE_COLOR),
            ("stroke", &style::CONE_EDGE),
            ("stroke-width", &Num(0.5)),
        ],
    );
}

fn draw_mannequin(w: &mut SvgWriter, p: &Projection, mannequin: &Mannequin, labels: bool) {
    let (cx, cy) = p.point(mannequin.position);
    let base = p.len(style::MANNEQUIN_BASE);
    let height = p.len(style::MANNEQUIN_HEIGHT);
    let body = PathData::new()
        .move_to(cx - base, cy + base)
        .line_to(cx + base, cy + base)
        .line_to(cx + base * 0.5, cy - height + base)
        .line_to(cx - base * 0.5, cy - height + base)
        .close();
    w.open("g", &[("class", &"mannequin")]);
    w.empty("path", &[("d", &body), ("fill", &style::MANNEQUIN_COLOR)]);
    w.empty(
        "circle",
        &[
            ("cx", &Num(cx)),
            ("cy", &Num(cy - height + base - p.len(style::MANNEQUIN_HEAD))),
            ("r", &Num(p.len(style::MANNEQUIN_HEAD))),
            ("fill", &style::MANNEQUIN_COLOR),
        ],
    );
    if labels {
        draw_label(w, p, cx, cy + base, &mannequin.id);
    }
    w.close("g");
}

fn draw_label(w: &mut SvgWriter, p: &Projection, x: f64, y: f64, text: &str) {
    w.text(
        "text",
        &[
            ("class", &"label"),
            ("x", &Num(x)),
            ("y", &Num(y + p.len(1.6))),
            ("fill", &style::LABEL_COLOR),
            ("font-family", &"sans-serif"),
            ("font-size", &Num(p.len(1.8))),
            ("text-anchor", &"middle"),
        ],
        text,
    );
}

fn draw_player(w: &mut SvgWriter, p: &Projection, player: &Player, labels: bool) {
    let (color, shape) = style::role_style(player.role);
    let (cx, cy) = p.point(player.position);
    let r = p.len(style::PLAYER_RADIUS);
    let role = player.role.to_string().to_lowercase();

    w.open("g", &[("class", &"player"), ("data-id", &player.id), ("data-role", &role)]);
    let edge = Num(1.0);
    let outline: [(&str, &dyn std::fmt::Display); 3] =
        [("fill", &color), ("stroke", &style::CONE_EDGE), ("stroke-width", &edge)];
    match shape {
        Shape::Circle => {
            w.empty(
                "circle",
                &[("cx", &Num(cx)), ("cy", &Num(cy)), ("r", &Num(r)), outline[0], outline[1], outline[2]],
            );
        }
        Shape::Square => {
            let side = r * 1.8;
            w.empty(
                "rect",
                &[
                    ("x", &Num(cx - side / 2.0)),
                    ("y", &Num(cy - side / 2.0)),
                    ("width", &Num(side)),
                    ("height", &Num(side)),
                    outline[0],
                    outline[1],
                    outline[2],
                ],
            );
        }
        Shape::Diamond => {
            let d = PathData::new()
                .move_to(cx, cy - r * 1.2)
                .line_to(cx + r * 1.2, cy)
                .line_to(cx, cy + r * 1.2)
                .line_to(cx - r * 1.2, cy)
                .close();
            w.empty("path", &[("d", &d), outline[0], outline[1], outline[2]]);
        }
    }
    if labels {
        draw_label(w, p, cx, cy + r, player.display_label());
    }
    w.close("g");
}
