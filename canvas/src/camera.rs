#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{DEFAULT_STAGE_SCALE, WHEEL_ZOOM_FACTOR};

/// A point in either screen or document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Stage transform of the editor view.
///
/// `x` / `y` are the stage offset in screen pixels.
/// `scale` is the stage scale factor (1.0 = one document unit per pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: DEFAULT_STAGE_SCALE, x: 0.0, y: 0.0 }
    }
}

impl Viewport {
    /// Convert a screen-space point (pixels relative to the stage container)
    /// to document coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.scale,
            y: (screen.y - self.y) / self.scale,
        }
    }

    /// Convert a document point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.x,
            y: world.y * self.scale + self.y,
        }
    }

    /// Zoom one wheel notch around `pointer`, keeping the document point
    /// under the pointer fixed. Negative `wheel_dy` zooms in.
    pub fn zoom_at(&mut self, pointer: Point, wheel_dy: f64) {
        let anchor = self.screen_to_world(pointer);
        self.scale = if wheel_dy < 0.0 {
            self.scale * WHEEL_ZOOM_FACTOR
        } else {
            self.scale / WHEEL_ZOOM_FACTOR
        };
        self.x = pointer.x - anchor.x * self.scale;
        self.y = pointer.y - anchor.y * self.scale;
    }

    /// Shift the stage by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}
