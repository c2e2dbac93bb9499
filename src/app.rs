/*
 * Application Module
 *
 * This module defines the main application model and logic for the particle
 * sandbox. It handles window creation, the control panel, timing, and hands
 * the per-frame work to the Simulation.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::Rng;

use crate::canvas::Canvas;
use crate::debug::DebugInfo;
use crate::input::{self, Pointer};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::ui;

// Bounds for the measured frame time when not using a fixed timestep
const MIN_DT: f32 = 1.0 / 240.0;
const MAX_DT: f32 = 1.0 / 20.0;

// Main model for the application
pub struct Model {
    pub params: SimulationParams,
    pub simulation: Simulation,
    pub pointer: Pointer,
    pub egui: Egui,
    pub debug_info: DebugInfo,
}

/// Timestep for this frame: the nominal one, or the measured frame time
/// clamped so a stall cannot launch particles through each other.
pub fn frame_dt(params: &SimulationParams, since_last: std::time::Duration) -> f32 {
    if params.fixed_timestep {
        return params.nominal_dt();
    }
    let measured = since_last.as_secs_f32();
    if measured <= 0.0 {
        params.nominal_dt()
    } else {
        measured.max(MIN_DT).min(MAX_DT)
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Get the primary monitor's dimensions
    let monitor = app.primary_monitor().expect("Failed to get primary monitor");
    let monitor_size = monitor.size();

    // Calculate window size based on monitor size (80% of monitor size)
    let window_width = monitor_size.width as f32 * 0.8;
    let window_height = monitor_size.height as f32 * 0.8;

    // Create the main window with dynamic size
    let window_id = app
        .new_window()
        .title("Beanbag Particles")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .touch(input::touch)
        .resized(input::resized)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window closed during setup");
    let egui = Egui::from_window(&window);

    let mut params = SimulationParams::default();
    params.validate();

    let canvas = Canvas::from(window.rect());
    let simulation = Simulation::new(&params, canvas);

    Model {
        params,
        simulation,
        pointer: Pointer::default(),
        egui,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let (actions, changes) = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &model.debug_info,
        model.simulation.particles().len(),
    );

    if changes.any && model.params.validate() {
        log::debug!("parameters corrected after UI change");
    }

    if actions.new_seed {
        model.params.seed = rand::thread_rng().gen();
    }

    if actions.reset || actions.new_seed || changes.reseed {
        model.simulation.reset(&model.params);
    } else if changes.spacing {
        log::debug!("spacing changed to {:.1}", model.params.spacing());
        model.simulation.set_spacing(model.params.spacing());
    }

    if !model.params.pause_simulation {
        let dt = frame_dt(&model.params, update.since_last);
        model.debug_info.dt = dt;
        model.debug_info.stats = model.simulation.step(&model.params, model.pointer.sample(), dt);
    }

    model.pointer.end_frame();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fixed_timestep_ignores_measured_time() {
        let mut params = SimulationParams::default();
        params.fixed_timestep = true;
        let dt = frame_dt(&params, Duration::from_millis(500));
        assert!((dt - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn measured_timestep_is_clamped() {
        let params = SimulationParams::default();
        assert_eq!(frame_dt(&params, Duration::from_secs(2)), MAX_DT);
        assert_eq!(frame_dt(&params, Duration::from_micros(10)), MIN_DT);
        assert!((frame_dt(&params, Duration::ZERO) - 1.0 / 60.0).abs() < 1e-6);
        let dt = frame_dt(&params, Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
    }
}
