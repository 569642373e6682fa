use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use diagramkit_core::{EditorConfig, EntityId, EventBus, ObjectId, Point, Rect, Vector};
use diagramkit_editor::{
    route_connector, Diagram, DiagramBlock, DiagramCanvas, DiagramConnector, SceneSync,
};
use std::hint::black_box;

fn block_position(index: u64) -> Point {
    Point::new((index % 100) as f64 * 80.0, (index / 100) as f64 * 60.0)
}

/// Grid of blocks, each connected to its right neighbour.
fn build_synthetic_diagram(block_count: u64, shift: f64) -> Diagram {
    let bounds = Rect::centered(Point::ZERO, 16.0, 16.0);
    let mut diagram = Diagram::new();
    for index in 0..block_count {
        let mut block = DiagramBlock::new(
            EntityId::Object(ObjectId(index)),
            block_position(index) + Vector::new(shift, 0.0),
        );
        block.label = format!("node{}", index);
        diagram.blocks.push(block);
    }
    for index in 1..block_count {
        let origin = diagram.blocks[(index - 1) as usize].position;
        let target = diagram.blocks[index as usize].position;
        diagram.connectors.push(DiagramConnector {
            id: EntityId::Object(ObjectId(block_count + index)),
            origin: EntityId::Object(ObjectId(index - 1)),
            target: EntityId::Object(ObjectId(index)),
            geometry: Some(route_connector(origin, bounds, target, bounds, &[])),
            has_issues: false,
            z_index: 0,
        });
    }
    diagram
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for &block_count in &[100u64, 1_000u64] {
        let initial = build_synthetic_diagram(block_count, 0.0);
        let moved = build_synthetic_diagram(block_count, 5.0);
        let sync = SceneSync::new();

        group.bench_with_input(
            BenchmarkId::new("initial", block_count),
            &initial,
            |b, diagram| {
                b.iter(|| {
                    let mut canvas = DiagramCanvas::new(EditorConfig::default(), EventBus::new());
                    black_box(sync.reconcile(black_box(diagram), &mut canvas))
                })
            },
        );

        let mut canvas = DiagramCanvas::new(EditorConfig::default(), EventBus::new());
        sync.reconcile(&initial, &mut canvas);
        group.bench_function(BenchmarkId::new("update_in_place", block_count), |b| {
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let diagram = if flip { &moved } else { &initial };
                black_box(sync.reconcile(black_box(diagram), &mut canvas))
            })
        });
    }

    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let diagram = build_synthetic_diagram(1_000, 0.0);
    let mut canvas = DiagramCanvas::new(EditorConfig::default(), EventBus::new());
    SceneSync::new().reconcile(&diagram, &mut canvas);
    let samples: Vec<Point> = (0..256u64)
        .map(|i| Point::new((i * 37 % 8000) as f64 + 0.5, (i * 11 % 600) as f64 + 0.5))
        .collect();

    c.bench_function("hit_target_batch_1000", |b| {
        b.iter(|| {
            let hits = samples
                .iter()
                .filter(|p| canvas.hit_target(black_box(**p)).is_some())
                .count();
            black_box(hits)
        })
    });
}

criterion_group!(benches, bench_reconcile, bench_hit_test);
criterion_main!(benches);
