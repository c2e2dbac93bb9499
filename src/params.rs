/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the particle sandbox. These parameters can be
 * modified through the UI. It also provides snapshot-based change detection
 * so the app knows whether a change needs a reseed, a grid resize, or nothing.
 */

use nannou::prelude::*;

// Parameters for the simulation that can be adjusted via UI
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub particle_count: usize,
    pub particle_size: f32,
    pub spacing_factor: f32, // Interaction radius as a multiple of particle size
    pub gravity: f32,
    pub pointer_radius: f32,
    pub pointer_force: f32,
    pub restitution: f32,
    pub seed: u64,
    pub fixed_timestep: bool,
    pub nominal_fps: f32,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
struct ParamSnapshot {
    particle_count: usize,
    particle_size: f32,
    spacing_factor: f32,
    gravity: f32,
    pointer_radius: f32,
    pointer_force: f32,
    restitution: f32,
    seed: u64,
    fixed_timestep: bool,
    nominal_fps: f32,
    show_debug: bool,
    pause_simulation: bool,
}

/// What kind of follow-up work a parameter change requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    /// Particle count or seed changed; the store must be reseeded.
    pub reseed: bool,
    /// Interaction spacing changed; the grid cell size must follow.
    pub spacing: bool,
    /// Anything at all changed.
    pub any: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            particle_count: 250,
            particle_size: 12.0,
            spacing_factor: 12.0,
            gravity: 2.2,
            pointer_radius: 250.0,
            pointer_force: 10.0,
            restitution: 0.45,
            seed: 0x5eed,
            fixed_timestep: false,
            nominal_fps: 60.0,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    /// Interaction radius, also used as the grid cell size.
    pub fn spacing(&self) -> f32 {
        self.particle_size * self.spacing_factor
    }

    /// Distance from each canvas edge that particles may not cross.
    pub fn boundary_margin(&self) -> f32 {
        self.particle_size
    }

    // Gravity points down the canvas (canvas y grows downwards)
    pub fn gravity_vector(&self) -> Vec2 {
        vec2(0.0, self.gravity)
    }

    pub fn nominal_dt(&self) -> f32 {
        1.0 / self.nominal_fps
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            particle_count: self.particle_count,
            particle_size: self.particle_size,
            spacing_factor: self.spacing_factor,
            gravity: self.gravity,
            pointer_radius: self.pointer_radius,
            pointer_force: self.pointer_force,
            restitution: self.restitution,
            seed: self.seed,
            fixed_timestep: self.fixed_timestep,
            nominal_fps: self.nominal_fps,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Compare against the last snapshot; without one nothing has changed
    pub fn detect_changes(&self) -> ParamChanges {
        let Some(prev) = &self.previous_values else {
            return ParamChanges::default();
        };

        let current = self.snapshot();
        ParamChanges {
            reseed: current.particle_count != prev.particle_count || current.seed != prev.seed,
            spacing: current.particle_size != prev.particle_size
                || current.spacing_factor != prev.spacing_factor,
            any: current != *prev,
        }
    }

    /// Pull every tunable back into its slider range. Returns true if
    /// anything had to be corrected.
    pub fn validate(&mut self) -> bool {
        let mut corrected = false;

        macro_rules! clamp_field {
            ($field:ident, $range:expr) => {{
                let range = $range;
                let value = self.$field;
                let clamped = if value < *range.start() {
                    *range.start()
                } else if value > *range.end() {
                    *range.end()
                } else {
                    value
                };
                if clamped != value {
                    log::warn!(
                        "{} = {:?} is outside {:?}, using {:?}",
                        stringify!($field),
                        value,
                        range,
                        clamped
                    );
                    self.$field = clamped;
                    corrected = true;
                }
            }};
        }

        clamp_field!(particle_count, Self::get_particle_count_range());
        clamp_field!(particle_size, Self::get_particle_size_range());
        clamp_field!(spacing_factor, Self::get_spacing_factor_range());
        clamp_field!(gravity, Self::get_gravity_range());
        clamp_field!(pointer_radius, Self::get_pointer_radius_range());
        clamp_field!(pointer_force, Self::get_pointer_force_range());
        clamp_field!(restitution, Self::get_restitution_range());
        clamp_field!(nominal_fps, Self::get_nominal_fps_range());

        corrected
    }

    // Get parameter ranges for UI sliders
    pub fn get_particle_count_range() -> std::ops::RangeInclusive<usize> {
        1..=2000
    }

    pub fn get_particle_size_range() -> std::ops::RangeInclusive<f32> {
        2.0..=40.0
    }

    pub fn get_spacing_factor_range() -> std::ops::RangeInclusive<f32> {
        1.0..=20.0
    }

    pub fn get_gravity_range() -> std::ops::RangeInclusive<f32> {
        -5.0..=10.0
    }

    pub fn get_pointer_radius_range() -> std::ops::RangeInclusive<f32> {
        10.0..=600.0
    }

    pub fn get_pointer_force_range() -> std::ops::RangeInclusive<f32> {
        0.0..=40.0
    }

    pub fn get_restitution_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_nominal_fps_range() -> std::ops::RangeInclusive<f32> {
        15.0..=240.0
    }
}
