/*
 * Physics Module
 *
 * This module resolves the soft pairwise interaction between particles that
 * the spatial grid reports as neighbours. Close pairs:
 * - accumulate crowding (density) on both particles
 * - push each other apart through acceleration
 * - correct overlapping positions directly
 * - blend their velocities toward the pair average
 *
 * The result is a springy, beanbag-like clumping rather than rigid collision.
 */

use nannou::prelude::*;

use crate::canvas::Canvas;
use crate::particle::{map_range, map_range_clamped, Particle};
use crate::spatial_grid::SpatialGrid;
use crate::params::SimulationParams;

const DENSITY_NEAR: f32 = 1.2;
const DENSITY_FAR: f32 = 0.1;
const REPULSION_NEAR: f32 = 0.8;
const REPULSION_EXPONENT: f32 = 1.1;
const REPULSION_WEIGHT: f32 = 0.4;
const CORRECTION_MIN: f32 = 0.15;
const CORRECTION_MAX: f32 = 0.25;
const CORRECTION_WEIGHT: f32 = 0.15;
const FLOOR_CORRECTION_FACTOR: f32 = 0.7;
// Combined density of a pair past this no longer changes the scaling
const PAIR_DENSITY_SATURATION: f32 = 10.0;
const CROWDED_CORRECTION_SCALE: f32 = 0.9;
const BLEND_NEAR: f32 = 0.15;
const BLEND_FAR: f32 = 0.02;
const SPARSE_BLEND_SCALE: f32 = 1.2;
const CROWDED_BLEND_SCALE: f32 = 0.95;
const DEEP_OVERLAP_BLEND_BOOST: f32 = 1.5;

/// Counters collected during one pairwise pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairStats {
    pub candidate_pairs: usize,
    pub interacting_pairs: usize,
}

/// Resolve the interaction between two particles. Returns true if they were
/// within `spacing` of each other and anything was applied.
pub fn interact(a: &mut Particle, b: &mut Particle, params: &SimulationParams, canvas: &Canvas) -> bool {
    let spacing = params.spacing();
    let d = a.position.distance(b.position);

    if d >= spacing {
        return false;
    }

    // Closer pairs count as more crowded
    let density_increase = map_range(d, 0.0, spacing, DENSITY_NEAR, DENSITY_FAR);
    a.density_factor += density_increase;
    b.density_factor += density_increase;

    // Coincident particles still need a direction to separate along
    let direction = if d > f32::EPSILON {
        (a.position - b.position) / d
    } else {
        vec2(1.0, 0.0)
    };

    let strength = map_range(d, 0.0, spacing, REPULSION_NEAR, 0.0).powf(REPULSION_EXPONENT);
    let force = direction * strength;

    let overlap = spacing - d;
    if overlap > 0.0 {
        let correction_strength = map_range(overlap, 0.0, spacing, CORRECTION_MIN, CORRECTION_MAX);
        let mut correction = force * overlap * correction_strength;

        let floor_line = canvas.height - params.particle_size * 4.0;
        if a.position.y > floor_line || b.position.y > floor_line {
            correction *= FLOOR_CORRECTION_FACTOR;
        }

        let pair_density = a.density_factor + b.density_factor;
        let density_scale =
            map_range_clamped(pair_density, 0.0, PAIR_DENSITY_SATURATION, 1.0, CROWDED_CORRECTION_SCALE);
        let correction = correction * CORRECTION_WEIGHT * density_scale;
        a.position += correction;
        b.position -= correction;

        let average_velocity = (a.velocity + b.velocity) * 0.5;
        let mut blend = map_range(d, 0.0, spacing, BLEND_NEAR, BLEND_FAR);
        blend *= map_range_clamped(
            pair_density,
            0.0,
            PAIR_DENSITY_SATURATION,
            SPARSE_BLEND_SCALE,
            CROWDED_BLEND_SCALE,
        );
        if d < spacing * 0.5 {
            blend *= DEEP_OVERLAP_BLEND_BOOST;
        }

        a.velocity = a.velocity.lerp(average_velocity, blend);
        b.velocity = b.velocity.lerp(average_velocity, blend);
    }

    let acceleration = force * REPULSION_WEIGHT;
    a.apply_force(acceleration);
    b.apply_force(-acceleration);

    true
}

/// Borrow two distinct particles mutably at once.
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Run the pairwise pass over every neighbouring pair the grid reports.
/// The grid must have been rebuilt from the current positions.
pub fn resolve_pairs(
    particles: &mut [Particle],
    grid: &SpatialGrid,
    params: &SimulationParams,
    canvas: &Canvas,
) -> PairStats {
    let mut stats = PairStats::default();

    grid.for_each_candidate_pair(|i, j| {
        stats.candidate_pairs += 1;
        let (a, b) = pair_mut(particles, i, j);
        if interact(a, b, params, canvas) {
            stats.interacting_pairs += 1;
        }
    });

    stats
}

/// Keep every position inside the margin box after correction pushes.
pub fn clamp_to_bounds(particles: &mut [Particle], canvas: &Canvas, margin: f32) {
    for particle in particles {
        particle.clamp_position(canvas, margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ShapeKind;

    fn setup() -> (SimulationParams, Canvas) {
        (SimulationParams::default(), Canvas::new(1000.0, 800.0))
    }

    #[test]
    fn distant_pairs_do_not_interact() {
        let (params, canvas) = setup();
        let mut a = Particle::at_rest(vec2(100.0, 100.0), ShapeKind::Square);
        let mut b = Particle::at_rest(vec2(100.0 + params.spacing(), 100.0), ShapeKind::Square);

        assert!(!interact(&mut a, &mut b, &params, &canvas));
        assert_eq!(a.density_factor, 0.0);
        assert_eq!(a.acceleration, Vec2::ZERO);
    }

    #[test]
    fn half_spacing_pair_is_pushed_apart() {
        let (params, canvas) = setup();
        let half = params.spacing() / 2.0;
        let mut a = Particle::at_rest(vec2(500.0, 300.0), ShapeKind::Circle);
        let mut b = Particle::at_rest(vec2(500.0 + half, 300.0), ShapeKind::Circle);

        assert!(interact(&mut a, &mut b, &params, &canvas));

        assert!(a.position.distance(b.position) > half);
        assert!(a.position.x < 500.0);
        assert!(b.position.x > 500.0 + half);
        // Accelerations point away from the partner
        assert!(a.acceleration.x < 0.0);
        assert!(b.acceleration.x > 0.0);
        assert_eq!(a.acceleration, -b.acceleration);
    }

    #[test]
    fn density_grows_with_closeness() {
        let (params, canvas) = setup();
        let spacing = params.spacing();

        let mut near_a = Particle::at_rest(vec2(300.0, 300.0), ShapeKind::Circle);
        let mut near_b = Particle::at_rest(vec2(300.0 + spacing * 0.1, 300.0), ShapeKind::Circle);
        let mut far_a = Particle::at_rest(vec2(300.0, 300.0), ShapeKind::Circle);
        let mut far_b = Particle::at_rest(vec2(300.0 + spacing * 0.9, 300.0), ShapeKind::Circle);

        interact(&mut near_a, &mut near_b, &params, &canvas);
        interact(&mut far_a, &mut far_b, &params, &canvas);

        assert!(near_a.density_factor > far_a.density_factor);
        assert_eq!(near_a.density_factor, near_b.density_factor);
        assert!(far_a.density_factor >= DENSITY_FAR);
    }

    #[test]
    fn velocity_blending_is_contractive() {
        let (params, canvas) = setup();
        let spacing = params.spacing();

        for &fraction in &[0.05, 0.3, 0.49, 0.51, 0.8, 0.99] {
            let mut a = Particle::at_rest(vec2(400.0, 300.0), ShapeKind::Triangle);
            let mut b = Particle::at_rest(vec2(400.0, 300.0 + spacing * fraction), ShapeKind::Triangle);
            a.velocity = vec2(12.0, -3.0);
            b.velocity = vec2(-7.0, 9.0);
            let before = (a.velocity - b.velocity).length();

            interact(&mut a, &mut b, &params, &canvas);

            let after = (a.velocity - b.velocity).length();
            assert!(after <= before, "fraction {fraction}: {after} > {before}");
        }
    }

    #[test]
    fn coincident_particles_separate() {
        let (params, canvas) = setup();
        let mut a = Particle::at_rest(vec2(200.0, 200.0), ShapeKind::Square);
        let mut b = a.clone();

        interact(&mut a, &mut b, &params, &canvas);

        assert!(a.position.is_finite() && b.position.is_finite());
        assert!(a.position.distance(b.position) > 0.0);
    }

    #[test]
    fn floor_softens_correction() {
        let (params, canvas) = setup();
        let gap = params.spacing() / 2.0;

        let mut air_a = Particle::at_rest(vec2(300.0, 300.0), ShapeKind::Square);
        let mut air_b = Particle::at_rest(vec2(300.0 + gap, 300.0), ShapeKind::Square);
        let floor_y = canvas.height - params.particle_size;
        let mut floor_a = Particle::at_rest(vec2(300.0, floor_y), ShapeKind::Square);
        let mut floor_b = Particle::at_rest(vec2(300.0 + gap, floor_y), ShapeKind::Square);

        interact(&mut air_a, &mut air_b, &params, &canvas);
        interact(&mut floor_a, &mut floor_b, &params, &canvas);

        let air_push = 300.0 - air_a.position.x;
        let floor_push = 300.0 - floor_a.position.x;
        assert!((floor_push / air_push - FLOOR_CORRECTION_FACTOR).abs() < 1e-4);
    }

    #[test]
    fn resolve_pairs_counts_and_applies() {
        let (params, canvas) = setup();
        let spacing = params.spacing();
        let mut particles = vec![
            Particle::at_rest(vec2(100.0, 100.0), ShapeKind::Circle),
            Particle::at_rest(vec2(100.0 + spacing * 0.5, 100.0), ShapeKind::Circle),
            Particle::at_rest(vec2(900.0, 700.0), ShapeKind::Circle),
        ];
        let mut grid = SpatialGrid::new(spacing, canvas.width, canvas.height);
        grid.rebuild(particles.iter().map(|p| p.position));

        let stats = resolve_pairs(&mut particles, &grid, &params, &canvas);

        assert_eq!(stats.interacting_pairs, 1);
        assert!(stats.candidate_pairs >= 1);
        assert!(particles[0].density_factor > 0.0);
        assert_eq!(particles[2].density_factor, 0.0);
    }

    #[test]
    fn clamp_keeps_positions_inside() {
        let canvas = Canvas::new(200.0, 200.0);
        let mut particles = vec![Particle::at_rest(vec2(-50.0, 500.0), ShapeKind::Circle)];
        particles[0].velocity = vec2(-1.0, 1.0);

        clamp_to_bounds(&mut particles, &canvas, 12.0);

        assert_eq!(particles[0].position, vec2(12.0, 188.0));
        assert_eq!(particles[0].velocity, vec2(-1.0, 1.0));
    }
}
