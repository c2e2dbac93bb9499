/*
 * Canvas Module
 *
 * This module defines the Canvas struct that describes the drawing surface the
 * particles live on. The simulation works in canvas space (origin top-left,
 * y grows downwards), while nannou draws in window space (origin at the
 * centre, y grows upwards). The Canvas provides the transformations between
 * the two.
 */

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    // Only future boundary checks see the new size
    pub fn resize(&mut self, width: f32, height: f32) {
        *self = Self::new(width, height);
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    /// Smallest allowed coordinate on each axis for the given margin.
    pub fn min_bound(&self, margin: f32) -> Vec2 {
        vec2(margin, margin)
    }

    /// Largest allowed coordinate on each axis. Never below `min_bound`, so
    /// a canvas narrower than two margins pins particles to the margin.
    pub fn max_bound(&self, margin: f32) -> Vec2 {
        vec2(
            (self.width - margin).max(margin),
            (self.height - margin).max(margin),
        )
    }

    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        let min = self.min_bound(margin);
        let max = self.max_bound(margin);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    // Convert a point from canvas space to window space
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        vec2(point.x - self.width / 2.0, self.height / 2.0 - point.y)
    }

    // Convert a point from window space to canvas space
    pub fn from_screen(&self, point: Vec2) -> Vec2 {
        vec2(point.x + self.width / 2.0, self.height / 2.0 - point.y)
    }

    // Directions flip on the y axis only
    pub fn vector_to_screen(&self, v: Vec2) -> Vec2 {
        vec2(v.x, -v.y)
    }
}

impl From<Rect> for Canvas {
    fn from(rect: Rect) -> Self {
        Canvas::new(rect.w(), rect.h())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_round_trip_for_corners() {
        let canvas = Canvas::new(800.0, 600.0);
        assert_eq!(canvas.to_screen(vec2(0.0, 0.0)), vec2(-400.0, 300.0));
        assert_eq!(canvas.to_screen(vec2(800.0, 600.0)), vec2(400.0, -300.0));
        assert_eq!(canvas.from_screen(vec2(0.0, 0.0)), vec2(400.0, 300.0));
    }

    #[test]
    fn bounds_never_invert() {
        let canvas = Canvas::new(10.0, 100.0);
        let max = canvas.max_bound(12.0);
        assert_eq!(max.x, 12.0);
        assert_eq!(max.y, 88.0);
        assert!(canvas.contains(vec2(12.0, 50.0), 12.0));
        assert!(!canvas.contains(vec2(12.0, 95.0), 12.0));
    }
}
