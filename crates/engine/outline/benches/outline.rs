//! Benchmark for plane outline generation
//!
//! Measures per-plane cost of edge placement for a room-sized batch of planes,
//! which is what a scene load pushes through in one frame.

use criterion::{criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec3};
use outline::{generate_outline_edges, Pose};
use std::hint::black_box;

/// Build a ring of wall planes around the origin
fn room_planes(count: usize) -> Vec<(Pose, f32, f32)> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let position = Vec3::new(angle.cos() * 3.0, 1.25, angle.sin() * 3.0);
            (
                Pose::new(position, Quat::from_rotation_y(-angle)),
                2.0 + (i % 3) as f32,
                2.5,
            )
        })
        .collect()
}

fn bench_single_plane(c: &mut Criterion) {
    let pose = Pose::new(Vec3::new(0.0, 1.5, -2.0), Quat::from_rotation_y(0.7));

    c.bench_function("outline_single_plane", |b| {
        b.iter(|| generate_outline_edges(black_box(pose), black_box(4.0), black_box(2.5), 0.02))
    });
}

fn bench_room(c: &mut Criterion) {
    let planes = room_planes(64);

    c.bench_function("outline_room_64_planes", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for (pose, w, h) in &planes {
                if let Ok(edges) = generate_outline_edges(*pose, *w, *h, 0.02) {
                    total += edges.len();
                }
            }
            black_box(total)
        })
    });
}

criterion_group!(benches, bench_single_plane, bench_room);
criterion_main!(benches);
