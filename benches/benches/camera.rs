// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for camera target resolution and animation stepping.
//!
//! Scenes are deterministic chains of nested groups so that resolving a leaf
//! has to walk and compose every transform on the way up to the camera.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, BezPath, Point, Size, Vec2};
use understory_camera::{
    ArclenPath, Camera, CameraConfig, LocalNode, NodeId, PathGeometry, Polyline, SceneTree,
    Scheduler, Target, TimingFunction, TravelOptions, fit_rect_around_area, move_between, moves,
};

/// A camera with `depth` nested groups beneath it and `leaves` cards under the deepest one.
fn nested_scene(depth: u32, leaves: u32) -> (SceneTree, Camera<NodeId>, Vec<NodeId>) {
    let mut scene = SceneTree::new();
    let root = scene.insert(None, LocalNode::default());
    let cam = scene.insert(Some(root), LocalNode::default());
    let mut parent = cam;
    for level in 0..depth {
        let angle = f64::from(level) * 0.01;
        parent = scene.insert(
            Some(parent),
            LocalNode {
                local_transform: Affine::rotate(angle) * Affine::translate(Vec2::new(3.0, 1.0)),
                ..LocalNode::default()
            },
        );
    }
    let cards = (0..leaves)
        .map(|i| {
            let x = f64::from(i) * 200.0;
            scene.insert(Some(parent), LocalNode::centered(Point::new(x, 0.0), 160.0, 90.0))
        })
        .collect();
    let camera = Camera::new(CameraConfig::new(cam, Size::new(1920.0, 1080.0)))
        .expect("valid camera config");
    (scene, camera, cards)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_camera/resolve");
    for &depth in &[1_u32, 16, 256] {
        let (scene, camera, cards) = nested_scene(depth, 1);
        let target = Target::Node(cards[0]);
        group.bench_function(format!("resolve_area(depth={depth})"), |b| {
            b.iter(|| black_box(camera.resolve_area(&scene, black_box(&target))));
        });
        group.bench_function(format!("node_to_local(depth={depth})"), |b| {
            b.iter(|| black_box(camera.node_to_local(&scene, black_box(cards[0]))));
        });
    }
    group.bench_function("fit_rect_around_area", |b| {
        b.iter(|| {
            fit_rect_around_area(
                black_box(Size::new(1920.0, 1080.0)),
                black_box(Size::new(123.0, 456.0)),
                black_box(12.0),
            )
        });
    });
    group.finish();
}

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_camera/path");
    let points: Vec<Point> = (0..1_000_u32)
        .map(|i| {
            let t = f64::from(i);
            Point::new(t, if i % 2 == 0 { 0.0 } else { 10.0 })
        })
        .collect();
    let polyline = Polyline::new(points);
    group.bench_function("polyline_point_at_fraction(n=1000)", |b| {
        b.iter(|| black_box(polyline.point_at_fraction(black_box(0.637))));
    });

    let mut curve = BezPath::new();
    curve.move_to((0.0, 0.0));
    for i in 0..64_u32 {
        let x = f64::from(i + 1) * 50.0;
        curve.curve_to((x - 40.0, 80.0), (x - 10.0, -80.0), (x, 0.0));
    }
    let arclen = ArclenPath::new(&curve);
    group.bench_function("arclen_point_at_fraction(segments=64)", |b| {
        b.iter(|| black_box(arclen.point_at_fraction(black_box(0.637))));
    });
    group.bench_function("arclen_measure(segments=64)", |b| {
        b.iter(|| black_box(ArclenPath::new(black_box(&curve))));
    });
    group.finish();
}

fn bench_tour(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_camera/tour");
    group.sample_size(30);
    for &(depth, stops) in &[(4_u32, 8_u32), (64, 8), (4, 128)] {
        group.bench_function(format!("move_between(depth={depth},stops={stops})"), |b| {
            b.iter_batched(
                || nested_scene(depth, stops),
                |(scene, mut camera, cards)| {
                    let options = TravelOptions::default()
                        .with_duration([0.5, 1.0])
                        .with_zoom([true, false])
                        .with_wait(0.1);
                    let mut scheduler = Scheduler::new(60.0).expect("valid tick rate");
                    scheduler.spawn(move_between(cards, options));
                    scheduler
                        .run(&mut camera, &scene)
                        .expect("tour runs to completion");
                    black_box(camera.pose());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.bench_function("zoom_onto_then_reset", |b| {
        let (scene, mut camera, cards) = nested_scene(16, 1);
        b.iter(|| {
            let mut scheduler = Scheduler::new(60.0).expect("valid tick rate");
            scheduler.spawn(moves::zoom_onto(
                Target::Node(cards[0]),
                1.0,
                20.0,
                TimingFunction::EaseInOutCubic,
            ));
            scheduler.spawn(moves::reset(1.0, TimingFunction::EaseOutBack));
            scheduler
                .run(&mut camera, &scene)
                .expect("moves run to completion");
            black_box(camera.pose());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_paths, bench_tour);
criterion_main!(benches);
