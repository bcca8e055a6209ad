// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_popover::grace::{GraceArea, point_in_convex_polygon, safe_polygon};
use understory_popover::timer::ManualScheduler;
use understory_popover::types::PointerKind;
use understory_popover::{Popover, PopoverConfig};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_points(count: usize, extent: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

const TRIGGER: Rect = Rect::new(100.0, 100.0, 200.0, 140.0);
const CONTENT: Rect = Rect::new(260.0, 220.0, 560.0, 520.0);

fn bench_polygon(c: &mut Criterion) {
    let points = gen_points(4_096, 700.0);
    let mut group = c.benchmark_group("grace_polygon");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("build_safe_polygon", |b| {
        b.iter(|| safe_polygon(black_box(Point::new(201.0, 141.0)), CONTENT, 1.0));
    });
    let hull = safe_polygon(Point::new(201.0, 141.0), CONTENT, 1.0);
    group.bench_function("contains_random", |b| {
        b.iter(|| {
            points
                .iter()
                .filter(|p| point_in_convex_polygon(**p, &hull))
                .count()
        });
    });
    group.finish();
}

// Diagonal travel from the trigger to the content, re-entering the trigger each round.
fn bench_tracking(c: &mut Criterion) {
    let steps: Vec<Point> = (0..=64)
        .map(|i| {
            let t = f64::from(i) / 64.0;
            Point::new(150.0 + t * 250.0, 120.0 + t * 250.0)
        })
        .collect();
    let mut group = c.benchmark_group("grace_tracking");
    group.throughput(Throughput::Elements(steps.len() as u64));
    group.bench_function("grace_area_diagonal", |b| {
        let mut grace = GraceArea::new();
        grace.set_enabled(true);
        b.iter(|| {
            for &p in &steps {
                black_box(grace.pointer_move(p, TRIGGER, CONTENT));
            }
        });
    });
    group.bench_function("popover_diagonal", |b| {
        let mut p = Popover::new(ManualScheduler::new(), PopoverConfig::default());
        p.state.handle_hover_open();
        b.iter(|| {
            for &pt in &steps {
                black_box(p.pointer_move(PointerKind::Mouse, pt, TRIGGER, CONTENT));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_polygon, bench_tracking);
criterion_main!(benches);
