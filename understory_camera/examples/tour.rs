// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera tour basics.
//!
//! Build a small scene, tour three cards with alternating zoom, then follow a
//! curved path, printing the camera pose as it goes. Nothing is rendered.
//!
//! Run:
//! - `cargo run -p understory_camera --example tour`

use kurbo::{BezPath, Point, Size, Vec2};
use understory_camera::flow::{chain, wait};
use understory_camera::{
    ArclenPath, Camera, CameraConfig, LocalNode, NodeId, SceneTree, Scheduler, TimingFunction,
    TravelOptions, move_between, moves,
};

fn print_pose(label: &str, camera: &Camera<NodeId>) {
    let pose = camera.pose();
    println!(
        "{label:>10}: translation ({:8.2}, {:8.2})  scale {:6.3}  rotation {:6.2}°",
        pose.translation().x,
        pose.translation().y,
        pose.scale().x,
        pose.rotation()
    );
}

fn main() {
    let mut scene = SceneTree::new();
    let root = scene.insert(None, LocalNode::default());
    let camera_node = scene.insert(Some(root), LocalNode::default());

    // Three cards laid out left-to-right, plus one that lives outside the camera.
    let cards: Vec<NodeId> = [(-600.0, 0.0), (0.0, 150.0), (600.0, 0.0)]
        .into_iter()
        .map(|(x, y)| {
            scene.insert(
                Some(camera_node),
                LocalNode::centered(Point::new(x, y), 320.0, 180.0),
            )
        })
        .collect();
    let detached = scene.insert(Some(root), LocalNode::centered(Point::ZERO, 10.0, 10.0));

    let track = scene.insert(Some(camera_node), LocalNode::default());
    let mut curve = BezPath::new();
    curve.move_to((600.0, 0.0));
    curve.quad_to((600.0, 600.0), (0.0, 600.0));

    let config = CameraConfig::new(camera_node, Size::new(1280.0, 720.0)).with_base_zoom(0.5);
    let mut camera = Camera::new(config).expect("valid camera config");
    print_pose("start", &camera);

    let options = TravelOptions::<SceneTree>::default()
        .with_duration([0.8, 1.2])
        .with_zoom([true, false])
        .with_buffer(40.0)
        .with_wait(0.5)
        .on_before_move(|transition, node| {
            println!("   heading to {node:?}");
            transition
        });

    let stops = [cards[0], detached, cards[1], cards[2]];
    let mut scheduler = Scheduler::new(60.0).expect("valid tick rate");
    scheduler.spawn(chain([
        move_between(stops, options),
        moves::follow_path(
            track,
            ArclenPath::new(&curve),
            2.0,
            TimingFunction::EaseInOutSine,
        ),
        wait(0.25),
        moves::shift(Vec2::new(-100.0, 0.0), 0.5, TimingFunction::EaseOutCubic),
        moves::reset(1.0, TimingFunction::default()),
    ]));

    let mut next_report = 0.0;
    while scheduler
        .tick(&mut camera, &scene)
        .expect("camera tour failed")
    {
        if scheduler.time() >= next_report {
            print_pose(&format!("t={:.2}s", scheduler.time()), &camera);
            next_report += 0.5;
        }
    }
    print_pose("end", &camera);

    for diagnostic in camera.take_diagnostics() {
        println!("skipped in {}: {}", diagnostic.operation, diagnostic.error);
    }
}
