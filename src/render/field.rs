//! Pitch background and markings.

use super::style::{self, GRASS_DARK, GRASS_LIGHT, LINE_COLOR};
use super::svg::{Num, PathData, SvgWriter};
use super::Scene;
use crate::geometry::{
    depth_from_goal, CENTRE_CIRCLE_RADIUS, GOAL_MOUTH_X, HALFWAY_LINE, PENALTY_BOX_DEPTH,
    PENALTY_BOX_X, PENALTY_SPOT_DEPTH, SIX_YARD_BOX_DEPTH, SIX_YARD_BOX_X,
};
use crate::models::{AttackingDirection, FieldType};

pub(super) fn draw(w: &mut SvgWriter, scene: &Scene<'_>) {
    draw_grass(w, scene);
    if scene.drill.field.markings {
        draw_markings(w, scene);
        draw_goal_mouths(w, scene);
    }
}

fn draw_grass(w: &mut SvgWriter, scene: &Scene<'_>) {
    let p = &scene.projection;
    w.open("g", &[("id", &"pitch")]);
    let stripes = (100.0 / style::STRIPE_WIDTH) as usize;
    for i in 0..stripes {
        let fill = if i % 2 == 0 { GRASS_LIGHT } else { GRASS_DARK };
        w.empty(
            "rect",
            &[
                ("x", &Num(p.x(i as f64 * style::STRIPE_WIDTH))),
                ("y", &Num(p.margin)),
                ("width", &Num(p.len(style::STRIPE_WIDTH))),
                ("height", &Num(p.pitch_height())),
                ("fill", &fill),
            ],
        );
    }
    w.empty(
        "rect",
        &[
            ("class", &"outline"),
            ("x", &Num(p.margin)),
            ("y", &Num(p.margin)),
            ("width", &Num(p.pitch_width())),
            ("height", &Num(p.pitch_height())),
            ("fill", &"none"),
            ("stroke", &LINE_COLOR),
            ("stroke-width", &Num(2.0)),
        ],
    );
    w.close("g");
}

/// Goal lines whose boxes are drawn, attacking end first.
fn box_ends(scene: &Scene<'_>) -> Vec<AttackingDirection> {
    let direction = scene.drill.field.attacking_direction;
    match scene.drill.field.field_type {
        FieldType::Half => vec![direction],
        FieldType::Full => vec![direction, direction.reversed()],
    }
}

fn draw_markings(w: &mut SvgWriter, scene: &Scene<'_>) {
    let p = &scene.projection;
    w.open(
        "g",
        &[
            ("id", &"markings"),
            ("clip-path", &"url(#pitch-clip)"),
            ("fill", &"none"),
            ("stroke", &LINE_COLOR),
            ("stroke-width", &Num(style::MARKING_WIDTH)),
        ],
    );

    for end in box_ends(scene) {
        draw_box(w, scene, end, "penalty-box", PENALTY_BOX_X, PENALTY_BOX_DEPTH);
        draw_box(w, scene, end, "six-yard-box", SIX_YARD_BOX_X, SIX_YARD_BOX_DEPTH);
        let (sx, sy) = (p.x(50.0), p.y(depth_from_goal(end, PENALTY_SPOT_DEPTH)));
        w.empty(
            "circle",
            &[
                ("class", &"penalty-spot"),
                ("cx", &Num(sx)),
                ("cy", &Num(sy)),
                ("r", &Num(p.len(style::PENALTY_SPOT_RADIUS))),
                ("fill", &LINE_COLOR),
            ],
        );
    }

    if scene.drill.field.field_type == FieldType::Full {
        let y = Num(p.y(HALFWAY_LINE));
        w.empty(
            "line",
            &[
                ("class", &"halfway"),
                ("x1", &Num(p.x(0.0))),
                ("y1", &y),
                ("x2", &Num(p.x(100.0))),
                ("y2", &y),
            ],
        );
        w.empty(
            "ellipse",
            &[
                ("class", &"centre-circle"),
                ("cx", &Num(p.x(50.0))),
                ("cy", &y),
                ("rx", &Num(p.len(CENTRE_CIRCLE_RADIUS))),
                ("ry", &Num(p.len_y(CENTRE_CIRCLE_RADIUS))),
            ],
        );
        w.empty(
            "circle",
            &[
                ("class", &"centre-spot"),
                ("cx", &Num(p.x(50.0))),
                ("cy", &y),
                ("r", &Num(p.len(style::PENALTY_SPOT_RADIUS))),
                ("fill", &LINE_COLOR),
            ],
        );
    }

    w.close("g");
}

/// Three sides of a box standing on the goal line.
fn draw_box(
    w: &mut SvgWriter,
    scene: &Scene<'_>,
    end: AttackingDirection,
    class: &str,
    x: (f64, f64),
    depth: f64,
) {
    let p = &scene.projection;
    let goal_y = p.y(end.goal_line());
    let edge_y = p.y(depth_from_goal(end, depth));
    let d = PathData::new()
        .move_to(p.x(x.0), goal_y)
        .line_to(p.x(x.0), edge_y)
        .line_to(p.x(x.1), edge_y)
        .line_to(p.x(x.1), goal_y);
    w.empty("path", &[("class", &class), ("d", &d)]);
}

fn draw_goal_mouths(w: &mut SvgWriter, scene: &Scene<'_>) {
    let field = &scene.drill.field;
    let count = usize::from(match field.field_type {
        FieldType::Half => field.goals.min(1),
        FieldType::Full => field.goals.min(2),
    });
    if count == 0 {
        return;
    }

    let p = &scene.projection;
    let ends = [field.attacking_direction, field.attacking_direction.reversed()];
    w.open(
        "g",
        &[
            ("id", &"goals"),
            ("stroke", &LINE_COLOR),
            ("stroke-width", &Num(style::GOAL_WIDTH)),
            ("stroke-linecap", &"round"),
        ],
    );
    for end in ends.iter().take(count) {
        let y = Num(p.y(end.goal_line()));
        w.empty(
            "line",
            &[
                ("class", &"goal-mouth"),
                ("x1", &Num(p.x(GOAL_MOUTH_X.0))),
                ("y1", &y),
                ("x2", &Num(p.x(GOAL_MOUTH_X.1))),
                ("y2", &y),
            ],
        );
    }
    w.close("g");
}

#[cfg(test)]
mod tests {
    use crate::render::{render, RenderOptions, Scene};
    use crate::models::{Drill, FieldConfig, FieldType};

    fn empty_drill(field: FieldConfig) -> Drill {
        Drill {
            name: "Pitch".to_string(),
            description: String::new(),
            intent: None,
            field,
            players: vec![],
            cones: vec![],
            cone_gates: vec![],
            balls: vec![],
            mannequins: vec![],
            actions: vec![],
            coaching_points: vec![],
            variations: vec![],
        }
    }

    #[test]
    fn test_half_pitch_markings() {
        let svg = render(&empty_drill(FieldConfig::default()));
        assert_eq!(svg.matches("class=\"penalty-box\"").count(), 1);
        assert_eq!(svg.matches("class=\"six-yard-box\"").count(), 1);
        assert_eq!(svg.matches("class=\"goal-mouth\"").count(), 1);
        assert!(!svg.contains("centre-circle"));
    }

    #[test]
    fn test_half_pitch_box_geometry_north() {
        // 18-yard box: x 30..70, from y=100 down to y=82
        let svg = render(&empty_drill(FieldConfig::default()));
        assert!(svg.contains("class=\"penalty-box\" d=\"M204 24 L204 132 L444 132 L444 24\""));
        // goal mouth x 44..56 on the north goal line
        assert!(svg.contains("x1=\"288\" y1=\"24\" x2=\"360\" y2=\"24\""));
    }

    #[test]
    fn test_half_pitch_no_goals() {
        let field = FieldConfig { goals: 0, ..FieldConfig::default() };
        let svg = render(&empty_drill(field));
        assert!(!svg.contains("goal-mouth"));
        assert!(svg.contains("penalty-box"));
    }

    #[test]
    fn test_full_pitch_markings() {
        let field = FieldConfig { field_type: FieldType::Full, goals: 1, ..FieldConfig::default() };
        let svg = render(&empty_drill(field));
        assert_eq!(svg.matches("class=\"penalty-box\"").count(), 2);
        assert_eq!(svg.matches("class=\"goal-mouth\"").count(), 1);
        assert!(svg.contains("class=\"centre-circle\""));
    }

    #[test]
    fn test_stripes_cover_pitch() {
        let d = empty_drill(FieldConfig::default());
        let scene = Scene::build(&d, &RenderOptions::default());
        let svg = scene.to_svg();
        assert_eq!(svg.matches("fill=\"#6fbf4a\"").count(), 5);
        assert_eq!(svg.matches("fill=\"#63b043\"").count(), 5);
    }
}
