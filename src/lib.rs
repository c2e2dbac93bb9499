/*
 * Beanbag Particles - Module Definitions
 *
 * This file defines the module structure for the particle sandbox.
 * The simulation core (particle, spatial_grid, physics, simulation) does not
 * depend on a window and can be driven headless; app, input, renderer and ui
 * wire it into nannou.
 */

// Re-export key components for easier access
pub use app::Model;
pub use canvas::Canvas;
pub use debug::{DebugInfo, FrameStats};
pub use input::{Pointer, PointerSample};
pub use params::SimulationParams;
pub use particle::{Particle, ShapeKind};
pub use simulation::Simulation;
pub use spatial_grid::SpatialGrid;

// Define modules
pub mod app;
pub mod canvas;
pub mod debug;
pub mod input;
pub mod params;
pub mod particle;
pub mod physics;
pub mod renderer;
pub mod simulation;
pub mod spatial_grid;
pub mod ui;
