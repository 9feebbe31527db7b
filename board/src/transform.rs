#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::{MAX_SCALE, MIN_SCALE, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};

/// A point in either pointer (screen) or board space.
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

/// Nominal view transform for pan/zoom on the infinite board.
///
/// `pan_x` / `pan_y` are in CSS pixels. `scale` stays within
/// `[MIN_SCALE, MAX_SCALE]`; every mutation clamps. Items are laid out in
/// untransformed board space and painted inside a container carrying
/// `translate(pan_x, pan_y) scale(scale)`.
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { scale: 1.0, pan_x: 0.0, pan_y: 0.0 }
    }
}

impl ViewTransform {
    /// Convert a pointer-space point to board coordinates, given the
    /// container's viewport origin. Exact inverse of the render transform.
    #[must_use]
    pub fn to_board(&self, pointer: Point, origin: Point) -> Point {
        Point {
            x: (pointer.x - origin.x - self.pan_x) / self.scale,
            y: (pointer.y - origin.y - self.pan_y) / self.scale,
        }
    }

    /// Convert a board-space point back to pointer coordinates.
    #[must_use]
    pub fn to_screen(&self, board: Point, origin: Point) -> Point {
        Point {
            x: board.x * self.scale + self.pan_x + origin.x,
            y: board.y * self.scale + self.pan_y + origin.y,
        }
    }

    /// Apply one wheel tick of zoom about `cursor_offset` (pointer position
    /// relative to the container's viewport origin). A positive wheel delta
    /// zooms out, negative zooms in; the board point under the cursor keeps
    /// its screen position.
    pub fn zoom_about(&mut self, cursor_offset: Point, wheel_delta_y: f64) {
        let factor = if wheel_delta_y > 0.0 { ZOOM_OUT_FACTOR } else { ZOOM_IN_FACTOR };
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let diff = new_scale - self.scale;
        // Compensate by the board point under the cursor so it stays fixed
        // on screen: b*s + pan = b*s' + pan'.
        self.pan_x -= (cursor_offset.x - self.pan_x) / self.scale * diff;
        self.pan_y -= (cursor_offset.y - self.pan_y) / self.scale * diff;
        self.scale = new_scale;
    }
}

/// The transform the host has actually painted for the item container this
/// frame, passed down as data on every drag move.
///
/// Item dragging must divide by the painted scale, not the nominal one: the
/// painted transform can lag [`ViewTransform`] by a render frame, and using
/// the nominal value makes a card jump during a simultaneous zoom. When the
/// host has nothing painted yet, `Default` (identity) applies.
#[derive(Debug, Clone, Copy)]
pub struct RenderedTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for RenderedTransform {
    fn default() -> Self {
        Self { scale: 1.0, translate_x: 0.0, translate_y: 0.0 }
    }
}

impl RenderedTransform {
    /// Board-space position for a dragged item. `grab_offset` is the pointer
    /// to item-top-left offset captured at drag start, in screen pixels, so
    /// it is divided by the painted scale as well.
    #[must_use]
    pub fn item_position(&self, pointer: Point, origin: Point, grab_offset: Point) -> Point {
        Point {
            x: (pointer.x - origin.x - self.translate_x) / self.scale - grab_offset.x / self.scale,
            y: (pointer.y - origin.y - self.translate_y) / self.scale - grab_offset.y / self.scale,
        }
    }
}
