// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::f64::consts::PI;

use serde::Serialize;

use crate::common::{Point, Values};
use crate::models::{Derived, Numbers, input};

pub const R_MAX: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EulerOutput {
    pub theta: f64,
    pub r: f64,
    /// `r·e^{iθ}` as `(re, im)`.
    pub point: Point,
    /// `e^{iθ}` on the unit circle.
    pub unit_point: Point,
    /// Foot of the perpendicular onto the real axis.
    pub real_projection: Point,
    /// Foot of the perpendicular onto the imaginary axis.
    pub imaginary_projection: Point,
    /// The angle marker sweeps counter-clockwise from the positive real axis.
    pub counter_clockwise: bool,
}

impl Numbers for EulerOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        for p in [
            self.point,
            self.unit_point,
            self.real_projection,
            self.imaginary_projection,
        ] {
            f(p.x);
            f(p.y);
        }
        f(self.theta);
        f(self.r);
    }
}

pub fn evaluate(values: &Values) -> Derived {
    let theta = input(values, "theta", 0.0).clamp(-PI, PI);
    let r = input(values, "r", 1.0).clamp(0.0, R_MAX);

    let (sin, cos) = theta.sin_cos();
    let point = Point::new(r * cos, r * sin);

    Derived::EulerComplex(EulerOutput {
        theta,
        r,
        point,
        unit_point: Point::new(cos, sin),
        real_projection: Point::new(point.x, 0.0),
        imaginary_projection: Point::new(0.0, point.y),
        counter_clockwise: theta >= 0.0,
    })
}
