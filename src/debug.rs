/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and per-frame simulation statistics to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - The timestep handed to the simulation
 * - Pair counts from the neighbour pass
 * - Grid occupancy and average crowding
 */

use std::time::Duration;

use crate::particle::Particle;
use crate::physics::PairStats;

/// What one simulation step did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub candidate_pairs: usize,
    pub interacting_pairs: usize,
    pub occupied_cells: usize,
    pub mean_density: f32,
}

impl FrameStats {
    pub fn collect(pairs: PairStats, occupied_cells: usize, particles: &[Particle]) -> Self {
        let mean_density = if particles.is_empty() {
            0.0
        } else {
            particles.iter().map(|p| p.density_factor).sum::<f32>() / particles.len() as f32
        };

        Self {
            candidate_pairs: pairs.candidate_pairs,
            interacting_pairs: pairs.interacting_pairs,
            occupied_cells,
            mean_density,
        }
    }
}

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub dt: f32,
    pub stats: FrameStats,
}

impl DebugInfo {
    pub fn lines(&self, particle_count: usize) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Step dt: {:.4} s", self.dt),
            format!("Particles: {}", particle_count),
            format!("Pairs: {} / {} checked", self.stats.interacting_pairs, self.stats.candidate_pairs),
            format!("Occupied cells: {}", self.stats.occupied_cells),
            format!("Mean density: {:.2}", self.stats.mean_density),
        ]
    }
}
