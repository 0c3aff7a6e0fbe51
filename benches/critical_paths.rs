//! Criterion benchmarks for Drillboard critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Schema: drill JSON parsing
//! - Tracker: possession replay over long action sequences
//! - Validator: full validation of bundled and synthetic drills
//! - Renderer: drill to SVG

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use drillboard::fixtures;
use drillboard::models::{Action, Ball, Drill, FieldConfig, Player, PlayerRole, Position};
use drillboard::render::render;
use drillboard::schema::parse_str;
use drillboard::tracker::{track, TrackerConfig};
use drillboard::validate::validate;

// =============================================================================
// Test Data Generators
// =============================================================================

/// A ring of `players` attackers passing the ball around `laps` times.
fn make_passing_ring(players: usize, laps: usize) -> Drill {
    let ring: Vec<Player> = (0..players)
        .map(|i| {
            let angle = i as f64 / players as f64 * std::f64::consts::TAU;
            let at = Position::new(50.0 + 35.0 * angle.cos(), 50.0 + 35.0 * angle.sin());
            Player::new(format!("A{}", i + 1), PlayerRole::Attacker, at)
        })
        .collect();
    let actions = (0..players * laps)
        .map(|i| Action::Pass {
            from_player: format!("A{}", i % players + 1),
            to_player: format!("A{}", (i + 1) % players + 1),
        })
        .collect();

    Drill {
        name: "Passing Ring".to_string(),
        description: "Circulate the ball around the ring".to_string(),
        intent: None,
        field: FieldConfig::default(),
        balls: vec![Ball { position: ring[0].position }],
        players: ring,
        cones: vec![],
        cone_gates: vec![],
        mannequins: vec![],
        actions,
        coaching_points: vec![],
        variations: vec![],
    }
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_schema(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema");

    for fixture in fixtures::ALL {
        group.throughput(Throughput::Bytes(fixture.source.len() as u64));
        group.bench_function(fixture.name, |b| b.iter(|| parse_str(black_box(fixture.source))));
    }

    group.finish();
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker");
    let config = TrackerConfig::default();

    for laps in [1usize, 10, 100] {
        let drill = make_passing_ring(8, laps);
        group.throughput(Throughput::Elements(drill.actions.len() as u64));
        group.bench_with_input(BenchmarkId::new("passing_ring", laps), &drill, |b, drill| {
            b.iter(|| track(black_box(drill), &config))
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for fixture in fixtures::ALL {
        let drill = fixture.drill().expect("bundled drill parses");
        group.bench_function(fixture.name, |b| b.iter(|| validate(black_box(&drill))));
    }

    let drill = make_passing_ring(22, 20);
    group.bench_function("passing_ring_22x20", |b| b.iter(|| validate(black_box(&drill))));

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for fixture in fixtures::ALL {
        let drill = fixture.drill().expect("bundled drill parses");
        group.bench_function(fixture.name, |b| b.iter(|| render(black_box(&drill))));
    }

    let drill = make_passing_ring(22, 5);
    group.bench_function("passing_ring_22x5", |b| b.iter(|| render(black_box(&drill))));

    group.finish();
}

criterion_group!(benches, bench_schema, bench_tracker, bench_validate, bench_render);
criterion_main!(benches);
