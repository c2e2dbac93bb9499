/*
 * Particle Module
 *
 * This module defines the Particle struct and its per-frame integration.
 * Each particle:
 * 1. Falls under gravity, more slowly when crowded
 * 2. Gets flung by a dragged pointer nearby
 * 3. Loses speed to air drag, or to floor friction near the bottom edge
 * 4. Bounces off the canvas margins with partial restitution
 */

use nannou::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

use crate::canvas::Canvas;
use crate::input::PointerSample;
use crate::params::SimulationParams;

const GRAVITY_MULTIPLIER: f32 = 4.0;
// Density values past this saturate the gravity and pointer scaling
const DENSITY_SATURATION: f32 = 5.0;
const CROWDED_GRAVITY_SCALE: f32 = 0.7;
const CROWDED_POINTER_SCALE: f32 = 0.85;
const POINTER_FALLOFF_EXPONENT: f32 = 1.75;
const POINTER_SPIN: f32 = 0.01;
const POINTER_EPSILON: f32 = 1e-4;
const VELOCITY_RATE: f32 = 15.0;
const POSITION_RATE: f32 = 11.5;
const FLOOR_DRAG: f32 = 0.92;
const FLOOR_DRAG_X: f32 = 0.94;
const FLOOR_SPIN_DRAG: f32 = 0.95;
const AIR_DRAG: f32 = 0.985;
const AIR_SPIN_DRAG: f32 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Triangle,
    Square,
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Triangle, ShapeKind::Square, ShapeKind::Circle];
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub previous_position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub density_factor: f32,
    pub rotation: f32,
    pub rotation_velocity: f32,
    pub shape: ShapeKind,
}

/// Everything a particle needs from the outside world for one integration.
#[derive(Debug, Clone, Copy)]
pub struct StepEnv<'a> {
    pub params: &'a SimulationParams,
    pub canvas: Canvas,
    pub pointer: PointerSample,
    pub dt: f32,
}

/// Linear remap of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
/// Values outside the input range extrapolate.
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max == in_min {
        return out_min;
    }
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Like [`map_range`], but the output never leaves `[out_min, out_max]`.
#[inline]
pub fn map_range_clamped(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let lo = in_min.min(in_max);
    let hi = in_min.max(in_max);
    map_range(value.max(lo).min(hi), in_min, in_max, out_min, out_max)
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(position: Vec2, rng: &mut R) -> Self {
        let velocity = vec2(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0));
        let shape = *ShapeKind::ALL.choose(rng).unwrap_or(&ShapeKind::Circle);

        Self {
            position,
            previous_position: position,
            velocity,
            acceleration: Vec2::ZERO,
            density_factor: 0.0,
            rotation: rng.gen_range(0.0..TAU),
            rotation_velocity: rng.gen_range(-0.1..0.1),
            shape,
        }
    }

    /// A particle with no motion, used for seeding tests and benches.
    pub fn at_rest(position: Vec2, shape: ShapeKind) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            density_factor: 0.0,
            rotation: 0.0,
            rotation_velocity: 0.0,
            shape,
        }
    }

    // Apply a force to the particle
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Advance the particle by one frame.
    ///
    /// The density factor read here was accumulated by the previous frame's
    /// pairwise pass; it is zeroed at the end so this frame's pass can
    /// accumulate afresh.
    pub fn integrate<R: Rng + ?Sized>(&mut self, env: &StepEnv, rng: &mut R) {
        let params = env.params;
        let dt = env.dt;
        let size = params.particle_size;

        self.previous_position = self.position;
        self.rotation += self.rotation_velocity * dt;

        // Crowded particles fall more slowly
        let gravity_scale =
            map_range_clamped(self.density_factor, 0.0, DENSITY_SATURATION, 1.0, CROWDED_GRAVITY_SCALE);
        self.apply_force(params.gravity_vector() * GRAVITY_MULTIPLIER * gravity_scale);

        if env.pointer.active {
            self.apply_pointer_force(env, rng);
        }

        self.velocity += self.acceleration * dt * VELOCITY_RATE;

        if self.position.y > env.canvas.height - size * 2.0 {
            self.velocity *= FLOOR_DRAG;
            self.velocity.x *= FLOOR_DRAG_X;
            self.rotation_velocity *= FLOOR_SPIN_DRAG;
        } else {
            self.velocity *= AIR_DRAG;
            self.rotation_velocity *= AIR_SPIN_DRAG;
        }

        self.position += self.velocity * dt * POSITION_RATE;

        self.collide_with_bounds(&env.canvas, params.boundary_margin(), params.restitution);

        self.acceleration = Vec2::ZERO;
        self.density_factor = 0.0;
    }

    fn apply_pointer_force<R: Rng + ?Sized>(&mut self, env: &StepEnv, rng: &mut R) {
        let pointer = env.pointer;
        let radius = env.params.pointer_radius;

        // A still pointer exerts nothing
        let speed = pointer.displacement.length();
        if speed < POINTER_EPSILON {
            return;
        }

        let d = self.position.distance(pointer.position);
        if d >= radius {
            return;
        }

        let density_scale =
            map_range_clamped(self.density_factor, 0.0, DENSITY_SATURATION, 1.0, CROWDED_POINTER_SCALE);
        let strength = ((radius - d) / radius).powf(POINTER_FALLOFF_EXPONENT);
        let force = pointer.displacement * env.params.pointer_force * density_scale * strength;
        self.apply_force(force);

        self.rotation_velocity += speed * POINTER_SPIN * rng.gen_range(-1.0..1.0);
    }

    /// Clamp into the margin box and reflect any velocity component that was
    /// carrying the particle out, keeping `restitution` of its magnitude.
    pub fn collide_with_bounds(&mut self, canvas: &Canvas, margin: f32, restitution: f32) {
        let min = canvas.min_bound(margin);
        let max = canvas.max_bound(margin);

        if self.position.x < min.x {
            self.position.x = min.x;
            self.velocity.x = self.velocity.x.abs() * restitution;
        }
        if self.position.x > max.x {
            self.position.x = max.x;
            self.velocity.x = -self.velocity.x.abs() * restitution;
        }
        if self.position.y < min.y {
            self.position.y = min.y;
            self.velocity.y = self.velocity.y.abs() * restitution;
        }
        if self.position.y > max.y {
            self.position.y = max.y;
            self.velocity.y = -self.velocity.y.abs() * restitution;
        }
    }

    /// Position-only clamp used after pairwise correction; velocity is left alone.
    pub fn clamp_position(&mut self, canvas: &Canvas, margin: f32) {
        let min = canvas.min_bound(margin);
        let max = canvas.max_bound(margin);
        self.position.x = self.position.x.max(min.x).min(max.x);
        self.position.y = self.position.y.max(min.y).min(max.y);
    }

    // Blend between the last and current positions for smoother motion
    pub fn interpolated_position(&self, alpha: f32) -> Vec2 {
        self.previous_position.lerp(self.position, alpha)
    }
}
