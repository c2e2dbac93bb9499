/*
 * Input Module
 *
 * This module handles user input events for the particle sandbox.
 * Handlers only ever touch the pointer state and the canvas size; particles
 * are mutated exclusively inside the per-frame simulation step, which samples
 * the pointer once per frame.
 *
 * Features:
 * - Pointer drag (mouse or touch) to fling particles
 * - Ignoring presses that land on the control panel
 * - Canvas resizing with the window
 */

use nannou::event::TouchEvent;
use nannou::prelude::*;
use nannou::winit::event::{MouseButton, TouchPhase};

use crate::app::Model;

/// Pointer state in canvas space, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub previous: Vec2,
    pub active: bool,
}

/// What the simulation sees of the pointer during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub displacement: Vec2,
    pub active: bool,
}

impl Pointer {
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn press(&mut self) {
        self.active = true;
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn sample(&self) -> PointerSample {
        PointerSample {
            position: self.position,
            displacement: self.position - self.previous,
            active: self.active,
        }
    }

    // Called once per frame after the step, whether or not the pointer is active
    pub fn end_frame(&mut self) {
        self.previous = self.position;
    }
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let canvas_pos = model.simulation.canvas().from_screen(pos);
    model.pointer.move_to(canvas_pos);
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        // Dragging a slider must not fling particles
        if !model.egui.ctx().is_pointer_over_area() {
            model.pointer.press();
        }
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.pointer.release();
    }
}

// Touch behaves like a left-button drag
pub fn touch(_app: &App, model: &mut Model, touch: TouchEvent) {
    let canvas_pos = model.simulation.canvas().from_screen(touch.position);
    match touch.phase {
        TouchPhase::Started => {
            // Start from the touch point so the first frame sees no jump
            model.pointer.move_to(canvas_pos);
            model.pointer.end_frame();
            model.pointer.press();
        }
        TouchPhase::Moved => model.pointer.move_to(canvas_pos),
        TouchPhase::Ended | TouchPhase::Cancelled => model.pointer.release(),
    }
}

// Window resize only changes the bounds future steps use
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    log::debug!("canvas resized to {:.0}x{:.0}", size.x, size.y);
    model.simulation.resize(size.x, size.y);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
