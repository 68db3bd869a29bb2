// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::common::{Bounds, Point};
use crate::render::common::Rect;

pub const WIDTH: f64 = 700.0;
pub const HEIGHT: f64 = 360.0;
pub const PADDING: f64 = 40.0;

/// The canvas minus the standard padding.
pub const FULL_FRAME: Rect = Rect {
    top: PADDING,
    left: PADDING,
    right: WIDTH - PADDING,
    bottom: HEIGHT - PADDING,
};

/// Maps data coordinates into a pixel frame, y pointing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub bounds: Bounds,
    pub frame: Rect,
}

impl Viewport {
    pub fn new(bounds: Bounds) -> Self {
        Viewport {
            bounds,
            frame: FULL_FRAME,
        }
    }

    pub fn with_frame(bounds: Bounds, frame: Rect) -> Self {
        Viewport { bounds, frame }
    }

    pub fn map_x(&self, x: f64) -> f64 {
        self.frame.left + scale(x, self.bounds.x_min, self.bounds.x_max) * self.frame.width()
    }

    pub fn map_y(&self, y: f64) -> f64 {
        self.frame.bottom - scale(y, self.bounds.y_min, self.bounds.y_max) * self.frame.height()
    }

    pub fn map(&self, p: Point) -> (f64, f64) {
        (self.map_x(p.x), self.map_y(p.y))
    }

    pub fn map_all<'a>(&'a self, points: &'a [Point]) -> impl Iterator<Item = (f64, f64)> + 'a {
        points.iter().map(|p| self.map(*p))
    }

    /// True when `y = 0` lies inside the vertical extent.
    pub fn shows_x_axis(&self) -> bool {
        self.bounds.y_min <= 0.0 && self.bounds.y_max >= 0.0
    }
}

// Fraction of the way from lo to hi.  An empty or non-finite span maps to
// the middle, and results are kept a little outside [0, 1] so off-plot
// samples stay near the frame instead of running to infinity.
fn scale(v: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if !span.is_finite() || span.abs() < f64::EPSILON || !v.is_finite() {
        return 0.5;
    }
    ((v - lo) / span).clamp(-0.5, 1.5)
}
