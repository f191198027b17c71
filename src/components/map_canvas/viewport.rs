//! Pan/zoom state of the map and the world <-> screen mapping.
//!
//! The world offset is the point shown at the canvas center, so
//! `screen = (world - offset) * zoom + center`.

use crate::constants::{INITIAL_ZOOM, MIN_ZOOM, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel deltas below zero scroll up, which zooms in.
    #[must_use]
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y < 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }

    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            ZoomDirection::In => ZOOM_IN_FACTOR,
            ZoomDirection::Out => ZOOM_OUT_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    offset_x: f64,
    offset_z: f64,
    zoom: f64,
    width: f64,
    height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            offset_x: 0.0,
            offset_z: 0.0,
            zoom: INITIAL_ZOOM,
            width,
            height,
        }
    }

    /// Sets the canvas pixel size (called whenever the element resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[must_use]
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level. Non-finite values and values below `MIN_ZOOM`
    /// would invert or collapse the mapping and are ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if zoom.is_finite() && zoom >= MIN_ZOOM {
            self.zoom = zoom;
            true
        } else {
            false
        }
    }

    /// One wheel step. Returns false when the step was rejected.
    pub fn zoom_step(&mut self, direction: ZoomDirection) -> bool {
        self.set_zoom(self.zoom * direction.factor())
    }

    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_z)
    }

    /// Centers the view on a world position.
    pub fn center_on(&mut self, world: (f64, f64)) {
        self.offset_x = world.0;
        self.offset_z = world.1;
    }

    /// Pans by a screen-space drag delta. Dragging right moves the world right,
    /// so the offset moves left.
    pub fn pan_by_screen(&mut self, dx: f64, dy: f64) {
        self.offset_x -= dx / self.zoom;
        self.offset_z -= dy / self.zoom;
    }

    #[must_use]
    pub fn world_to_screen(&self, world: (f64, f64)) -> (f64, f64) {
        let (cx, cy) = self.center();
        (
            (world.0 - self.offset_x) * self.zoom + cx,
            (world.1 - self.offset_z) * self.zoom + cy,
        )
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: (f64, f64)) -> (f64, f64) {
        let (cx, cy) = self.center();
        (
            (screen.0 - cx) / self.zoom + self.offset_x,
            (screen.1 - cy) / self.zoom + self.offset_z,
        )
    }
}
