/*
 * Renderer Module
 *
 * This module handles the rendering of the particle sandbox.
 * It draws every particle as a rotated triangle, square or circle at a
 * position halfway between its last two positions, which hides most of the
 * jitter of the discrete step, followed by the optional debug overlay and the
 * control panel.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::canvas::Canvas;
use crate::particle::{Particle, ShapeKind};
use crate::ui;

// Weight of the current position when blending with the previous one
const RENDER_BLEND: f32 = 0.5;

fn background_color() -> Rgb<u8> {
    rgb(26, 47, 251)
}

fn particle_color() -> Rgb<u8> {
    rgb(255, 255, 255)
}

/// A particle's shape in canvas space, relative to its centre.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Polygon(Vec<Vec2>),
    Circle { radius: f32 },
}

pub fn render_position(particle: &Particle) -> Vec2 {
    particle.interpolated_position(RENDER_BLEND)
}

// Rotate in canvas space (y down), so positive angles turn clockwise on screen
fn rotate(point: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    vec2(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}

/// Outline of a shape inscribed in a `size`-wide box, rotated by `rotation`.
pub fn shape_outline(shape: ShapeKind, size: f32, rotation: f32) -> Outline {
    let half = size / 2.0;
    let corners = match shape {
        ShapeKind::Triangle => vec![vec2(-half, half), vec2(half, half), vec2(0.0, -half)],
        ShapeKind::Square => vec![
            vec2(-half, -half),
            vec2(half, -half),
            vec2(half, half),
            vec2(-half, half),
        ],
        ShapeKind::Circle => return Outline::Circle { radius: half },
    };

    Outline::Polygon(corners.into_iter().map(|p| rotate(p, rotation)).collect())
}

pub fn draw_particle(draw: &Draw, canvas: &Canvas, particle: &Particle, size: f32) {
    let centre = render_position(particle);

    match shape_outline(particle.shape, size, particle.rotation) {
        Outline::Polygon(points) => {
            draw.polygon()
                .color(particle_color())
                .points(points.into_iter().map(|p| canvas.to_screen(centre + p)));
        }
        Outline::Circle { radius } => {
            draw.ellipse()
                .color(particle_color())
                .xy(canvas.to_screen(centre))
                .radius(radius);
        }
    }
}

fn draw_debug_overlay(draw: &Draw, model: &Model) {
    let canvas = model.simulation.canvas();
    let grid = model.simulation.grid();
    let line_color = rgba(1.0, 1.0, 1.0, 0.12);

    // Grid lines
    for cx in 1..grid.cols {
        let x = cx as f32 * grid.cell_size;
        draw.line()
            .start(canvas.to_screen(vec2(x, 0.0)))
            .end(canvas.to_screen(vec2(x, canvas.height)))
            .color(line_color)
            .stroke_weight(1.0);
    }
    for cy in 1..grid.rows {
        let y = cy as f32 * grid.cell_size;
        draw.line()
            .start(canvas.to_screen(vec2(0.0, y)))
            .end(canvas.to_screen(vec2(canvas.width, y)))
            .color(line_color)
            .stroke_weight(1.0);
    }

    // Interaction radius and velocity of the first particle
    if let Some(first) = model.simulation.particles().first() {
        let centre = canvas.to_screen(render_position(first));
        draw.ellipse()
            .xy(centre)
            .radius(model.params.spacing())
            .no_fill()
            .stroke(RED)
            .stroke_weight(1.0);

        draw.arrow()
            .start(centre)
            .end(centre + canvas.vector_to_screen(first.velocity))
            .color(YELLOW)
            .stroke_weight(2.0);
    }

    if model.pointer.active {
        draw.ellipse()
            .xy(canvas.to_screen(model.pointer.position))
            .radius(model.params.pointer_radius)
            .no_fill()
            .stroke(GREEN)
            .stroke_weight(1.0);
    }

    ui::draw_debug_info(draw, &model.debug_info, canvas, model.simulation.particles().len());
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(background_color());

    let canvas = model.simulation.canvas();
    for particle in model.simulation.particles() {
        draw_particle(&draw, &canvas, particle, model.params.particle_size);
    }

    if model.params.show_debug {
        draw_debug_overlay(&draw, model);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to draw frame: {:?}", err);
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to draw control panel: {:?}", err);
    }
}
