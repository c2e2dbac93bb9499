/*
 * Simulation Module
 *
 * This module defines the Simulation context that owns the particle store for
 * the lifetime of the app, together with the reusable spatial grid, the seeded
 * random number generator and the canvas bounds.
 *
 * One step runs, in order:
 * 1. Integrate every particle (gravity, pointer, drag, bounce)
 * 2. Rebuild the spatial grid from the new positions
 * 3. Resolve pairwise interactions between grid neighbours
 * 4. Clamp positions pushed past the margins by the correction
 *
 * Density accumulated in step 3 is consumed by the next frame's step 1.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::Canvas;
use crate::debug::FrameStats;
use crate::input::PointerSample;
use crate::params::SimulationParams;
use crate::particle::{Particle, StepEnv};
use crate::physics;
use crate::spatial_grid::SpatialGrid;

const SEED_WIDTH_FRACTION: f32 = 0.95;
const SEED_TOP_FRACTION: f32 = 0.05;
const SEED_JITTER: f32 = 5.0;

pub struct Simulation {
    particles: Vec<Particle>,
    grid: SpatialGrid,
    canvas: Canvas,
    rng: StdRng,
}

impl Simulation {
    pub fn new(params: &SimulationParams, canvas: Canvas) -> Self {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let particles = seed_particles(params, &canvas, &mut rng);
        let grid = SpatialGrid::new(params.spacing(), canvas.width, canvas.height);

        log::info!(
            "seeded {} particles on a {:.0}x{:.0} canvas (seed {:#x}, spacing {:.1})",
            particles.len(),
            canvas.width,
            canvas.height,
            params.seed,
            params.spacing()
        );

        Self {
            particles,
            grid,
            canvas,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Advance the whole simulation by one frame of length `dt`.
    pub fn step(&mut self, params: &SimulationParams, pointer: PointerSample, dt: f32) -> FrameStats {
        let env = StepEnv {
            params,
            canvas: self.canvas,
            pointer,
            dt,
        };

        for particle in &mut self.particles {
            particle.integrate(&env, &mut self.rng);
        }

        self.grid.rebuild(self.particles.iter().map(|p| p.position));

        let pairs = physics::resolve_pairs(&mut self.particles, &self.grid, params, &self.canvas);
        physics::clamp_to_bounds(&mut self.particles, &self.canvas, params.boundary_margin());

        let stats = FrameStats::collect(pairs, self.grid.occupied_cells(), &self.particles);
        log::trace!(
            "step dt={:.4}: {} candidate pairs, {} interacting",
            dt,
            stats.candidate_pairs,
            stats.interacting_pairs
        );
        stats
    }

    /// Reseed from scratch; picks up a changed particle count or seed.
    pub fn reset(&mut self, params: &SimulationParams) {
        self.rng = StdRng::seed_from_u64(params.seed);
        self.particles = seed_particles(params, &self.canvas, &mut self.rng);
        self.set_spacing(params.spacing());
        log::info!("reset to {} particles (seed {:#x})", self.particles.len(), params.seed);
    }

    // Particles are left where they are; the next step's bounce pulls them in
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas.resize(width, height);
        self.grid.resize(self.canvas.width, self.canvas.height);
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.grid.set_cell_size(spacing, self.canvas.width, self.canvas.height);
    }
}

/// Lay particles out in rows across the top of the canvas, one spacing apart
/// with a little jitter, filling row after row until the count is reached.
pub fn seed_particles<R: Rng + ?Sized>(
    params: &SimulationParams,
    canvas: &Canvas,
    rng: &mut R,
) -> Vec<Particle> {
    let spacing = params.spacing();
    let margin = params.boundary_margin();
    let cols = ((canvas.width * SEED_WIDTH_FRACTION / spacing).floor() as usize).max(1);
    let start_x = (canvas.width - cols as f32 * spacing) * 0.5;
    let start_y = canvas.height * SEED_TOP_FRACTION;

    let mut particles = Vec::with_capacity(params.particle_count);
    let mut row = 0;
    while particles.len() < params.particle_count {
        for col in 0..cols {
            if particles.len() == params.particle_count {
                break;
            }
            let x = start_x + col as f32 * spacing + rng.gen_range(-SEED_JITTER..SEED_JITTER);
            let y = start_y + row as f32 * spacing + rng.gen_range(-SEED_JITTER..SEED_JITTER);
            let mut particle = Particle::new(vec2(x, y), rng);
            particle.clamp_position(canvas, margin);
            particle.previous_position = particle.position;
            particles.push(particle);
        }
        row += 1;
    }

    particles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_respects_count_and_bounds() {
        let params = SimulationParams::default();
        let canvas = Canvas::new(1280.0, 720.0);
        let sim = Simulation::new(&params, canvas);

        assert_eq!(sim.particles().len(), params.particle_count);
        for p in sim.particles() {
            assert!(canvas.contains(p.position, params.boundary_margin()));
        }
    }

    #[test]
    fn seeding_fills_rows_left_to_right() {
        let mut params = SimulationParams::default();
        params.particle_count = 5;
        let canvas = Canvas::new(1000.0, 2000.0);
        let mut rng = StdRng::seed_from_u64(9);
        let particles = seed_particles(&params, &canvas, &mut rng);

        // 950 / 144 -> six columns, so all five share the first row
        let first_y = canvas.height * SEED_TOP_FRACTION;
        for p in &particles {
            assert!((p.position.y - first_y).abs() <= SEED_JITTER);
        }
        for pair in particles.windows(2) {
            assert!(pair[1].position.x > pair[0].position.x);
        }
    }

    #[test]
    fn same_seed_same_world() {
        let params = SimulationParams::default();
        let canvas = Canvas::new(900.0, 700.0);
        let mut a = Simulation::new(&params, canvas);
        let mut b = Simulation::new(&params, canvas);

        for _ in 0..30 {
            a.step(&params, PointerSample::default(), 1.0 / 60.0);
            b.step(&params, PointerSample::default(), 1.0 / 60.0);
        }

        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.velocity, pb.velocity);
        }
    }

    #[test]
    fn density_lags_one_frame() {
        let params = SimulationParams::default();
        let canvas = Canvas::new(900.0, 700.0);
        let mut sim = Simulation::new(&params, canvas);

        sim.step(&params, PointerSample::default(), 1.0 / 60.0);
        // Accumulated by this frame's pairwise pass and still visible after it
        assert!(sim.particles().iter().any(|p| p.density_factor > 0.0));
    }

    #[test]
    fn reset_picks_up_new_count() {
        let mut params = SimulationParams::default();
        let mut sim = Simulation::new(&params, Canvas::new(800.0, 600.0));
        params.particle_count = 17;
        sim.reset(&params);
        assert_eq!(sim.particles().len(), 17);
    }

    #[test]
    fn resize_leaves_particles_alone() {
        let params = SimulationParams::default();
        let mut sim = Simulation::new(&params, Canvas::new(800.0, 600.0));
        let before: Vec<_> = sim.particles().iter().map(|p| p.position).collect();

        sim.resize(400.0, 300.0);

        let after: Vec<_> = sim.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(sim.canvas(), Canvas::new(400.0, 300.0));
        assert_eq!(sim.grid().cols, 3);
    }
}
