use serde::{Deserialize, Serialize};

/// A pointer position in client (viewport) pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Inner size of the browser window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Convert an absolute x in pixels to a percentage of the width
    pub fn x_to_percent(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        x * 100.0 / self.width
    }

    /// Convert a percentage of the width back to pixels
    pub fn percent_to_x(&self, percent: f64) -> f64 {
        percent * self.width / 100.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}
