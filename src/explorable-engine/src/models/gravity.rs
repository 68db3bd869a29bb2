// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::Serialize;

use crate::common::Values;
use crate::models::{Derived, Numbers, input};

/// Gravitational constant in the scaled units the sliders use.
pub const G: f64 = 6.674;
pub const MIN_DISTANCE: f64 = 1.0;
pub const MAX_DISTANCE: f64 = 100.0;
const MIN_MASS: f64 = 1.0;
const MAX_MASS: f64 = 100.0;
const MIN_ARROW: f64 = 12.0;
const MAX_ARROW: f64 = 60.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GravityOutput {
    pub m1: f64,
    pub m2: f64,
    pub r: f64,
    pub force: f64,
    /// Force arrow length in pixels.
    pub arrow_length: f64,
    pub radius1: f64,
    pub radius2: f64,
}

impl Numbers for GravityOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        for n in [
            self.m1,
            self.m2,
            self.r,
            self.force,
            self.arrow_length,
            self.radius1,
            self.radius2,
        ] {
            f(n);
        }
    }
}

pub fn force(m1: f64, m2: f64, r: f64) -> f64 {
    let r = r.max(MIN_DISTANCE);
    G * m1 * m2 / (r * r)
}

fn body_radius(mass: f64) -> f64 {
    18.0 + mass / MAX_MASS * 25.0
}

pub fn evaluate(values: &Values) -> Derived {
    let m1 = input(values, "m1", 10.0).clamp(MIN_MASS, MAX_MASS);
    let m2 = input(values, "m2", 10.0).clamp(MIN_MASS, MAX_MASS);
    let r = input(values, "r", 20.0).clamp(MIN_DISTANCE, MAX_DISTANCE);

    let force = force(m1, m2, r);

    Derived::Gravity(GravityOutput {
        m1,
        m2,
        r,
        force,
        arrow_length: (force * 2.0).clamp(MIN_ARROW, MAX_ARROW),
        radius1: body_radius(m1),
        radius2: body_radius(m2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn eval(m1: f64, m2: f64, r: f64) -> GravityOutput {
        let values: Values = [("m1", m1), ("m2", m2), ("r", r)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        match evaluate(&values) {
            Derived::Gravity(out) => out,
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn inverse_square() {
        let near = eval(10.0, 10.0, 10.0);
        let far = eval(10.0, 10.0, 20.0);
        assert!(approx_eq!(f64, 6.674, near.force, epsilon = 1e-12));
        assert!(approx_eq!(f64, near.force / 4.0, far.force, epsilon = 1e-12));
    }

    #[test]
    fn zero_distance_is_guarded() {
        let out = eval(10.0, 10.0, 0.0);
        assert_eq!(MIN_DISTANCE, out.r);
        assert!(out.force.is_finite());
        assert_eq!(MAX_ARROW, out.arrow_length);
    }

    #[test]
    fn arrow_and_radius_limits() {
        let weak = eval(1.0, 1.0, 100.0);
        assert_eq!(MIN_ARROW, weak.arrow_length);
        assert!(approx_eq!(f64, 18.25, weak.radius1, epsilon = 1e-12));
        let heavy = eval(100.0, 100.0, 50.0);
        assert_eq!(43.0, heavy.radius2);
    }
}
