/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::canvas::Canvas;
use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};

/// Button presses from this frame's panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiActions {
    pub reset: bool,
    pub new_seed: bool,
}

// Update the UI and report button presses together with parameter changes
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    particle_count: usize,
) -> (UiActions, ParamChanges) {
    let mut actions = UiActions::default();

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Particles", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.particle_count, SimulationParams::get_particle_count_range())
                        .text("Number of Particles"),
                );
                ui.add(
                    egui::Slider::new(&mut params.particle_size, SimulationParams::get_particle_size_range())
                        .text("Particle Size"),
                );
                ui.add(
                    egui::Slider::new(&mut params.spacing_factor, SimulationParams::get_spacing_factor_range())
                        .text("Spacing (x size)"),
                );

                ui.horizontal(|ui| {
                    if ui.button("Reset Particles").clicked() {
                        actions.reset = true;
                    }
                    if ui.button("New Seed").clicked() {
                        actions.new_seed = true;
                    }
                });
                ui.label(format!("Seed: {:#x}", params.seed));
            });

            ui.collapsing("Forces", |ui| {
                ui.add(egui::Slider::new(&mut params.gravity, SimulationParams::get_gravity_range()).text("Gravity"));
                ui.add(
                    egui::Slider::new(&mut params.restitution, SimulationParams::get_restitution_range())
                        .text("Wall Bounce"),
                );
                ui.add(
                    egui::Slider::new(&mut params.pointer_radius, SimulationParams::get_pointer_radius_range())
                        .text("Pointer Radius"),
                );
                ui.add(
                    egui::Slider::new(&mut params.pointer_force, SimulationParams::get_pointer_force_range())
                        .text("Pointer Force"),
                );
            });

            ui.collapsing("Timing", |ui| {
                ui.checkbox(&mut params.fixed_timestep, "Fixed Timestep");
                ui.add(
                    egui::Slider::new(&mut params.nominal_fps, SimulationParams::get_nominal_fps_range())
                        .text("Nominal FPS"),
                );

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Particles: {}", particle_count));
                ui.label(format!("Interacting pairs: {}", debug_info.stats.interacting_pairs));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    (actions, params.detect_changes())
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, canvas: Canvas, particle_count: usize) {
    let lines = debug_info.lines(particle_count);

    // Create a background panel in the top-right corner, clear of the controls
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 240.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let right = canvas.width / 2.0;
    let top = canvas.height / 2.0;

    draw.rect()
        .x_y(right - panel_width / 2.0, top - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    for (i, text) in lines.iter().enumerate() {
        let y = top - margin - i as f32 * line_height;

        draw.text(text)
            .x_y(right - panel_width / 2.0, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
