/*
 * Particle Sandbox Benchmark
 *
 * This file contains benchmarks for the particle sandbox to identify performance bottlenecks.
 * It measures the grid rebuild, the grid-driven neighbour scan against the brute-force
 * scan, and the whole per-frame step.
 */

use beanbag::spatial_grid::{brute_force_pairs, SpatialGrid};
use beanbag::{Canvas, PointerSample, Simulation, SimulationParams};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const WIDTH: f32 = 1920.0;
const HEIGHT: f32 = 1080.0;
const SPACING: f32 = 144.0;

fn random_positions(n: usize) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..n)
        .map(|_| vec2(rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT)))
        .collect()
}

// Benchmark clearing and refilling the grid
fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for count in [250, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &n| {
            let positions = random_positions(n);
            let mut grid = SpatialGrid::new(SPACING, WIDTH, HEIGHT);

            b.iter(|| {
                grid.rebuild(positions.iter().copied());
                black_box(grid.occupied_cells());
            });
        });
    }

    group.finish();
}

// Benchmark the neighbour scan, grid versus brute force
fn bench_neighbour_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbour_scan");

    for count in [250, 1000, 2000].iter() {
        let positions = random_positions(*count);

        group.bench_with_input(BenchmarkId::new("grid", count), &positions, |b, positions| {
            let mut grid = SpatialGrid::new(SPACING, WIDTH, HEIGHT);
            grid.rebuild(positions.iter().copied());

            b.iter(|| {
                let mut close = 0usize;
                grid.for_each_candidate_pair(|i, j| {
                    if positions[i].distance(positions[j]) < SPACING {
                        close += 1;
                    }
                });
                black_box(close);
            });
        });

        group.bench_with_input(BenchmarkId::new("brute_force", count), &positions, |b, positions| {
            b.iter(|| black_box(brute_force_pairs(positions, SPACING).len()));
        });
    }

    group.finish();
}

// Benchmark the overall per-frame step
fn bench_update_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_loop");

    for count in [250, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &n| {
            let mut params = SimulationParams::default();
            params.particle_count = n;
            let mut sim = Simulation::new(&params, Canvas::new(WIDTH, HEIGHT));

            b.iter(|| black_box(sim.step(&params, PointerSample::default(), 1.0 / 60.0)));
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_neighbour_scan, bench_update_loop
}

criterion_main!(benches);
