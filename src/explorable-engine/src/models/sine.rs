// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::common::{Point, Values};
use crate::models::{Derived, Numbers, input, linspace, visit_points, y_extent};

pub const T_MIN: f64 = 0.0;
pub const T_MAX: f64 = TAU;
const SEGMENTS: usize = 400;
const AMPLITUDE_LIMIT: f64 = 1e6;
const OMEGA_LIMIT: f64 = 1e3;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SineOutput {
    pub amplitude: f64,
    pub omega: f64,
    pub phi: f64,
    /// `2π/|ω|`, absent when `ω` is zero.
    pub period: Option<f64>,
    pub curve: Vec<Point>,
    pub y_min: f64,
    pub y_max: f64,
}

impl SineOutput {
    /// The period, when one full cycle fits inside the plotted window.
    pub fn visible_period(&self) -> Option<f64> {
        self.period.filter(|p| *p <= T_MAX)
    }
}

impl Numbers for SineOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        for n in [self.amplitude, self.omega, self.phi, self.y_min, self.y_max] {
            f(n);
        }
        if let Some(p) = self.period {
            f(p);
        }
        visit_points(&self.curve, f);
    }
}

pub fn evaluate(values: &Values) -> Derived {
    let amplitude = input(values, "A", 1.0).clamp(-AMPLITUDE_LIMIT, AMPLITUDE_LIMIT);
    let omega = input(values, "omega", 1.0).clamp(-OMEGA_LIMIT, OMEGA_LIMIT);
    let phi = input(values, "phi", 0.0);

    let curve: Vec<Point> = linspace(T_MIN, T_MAX, SEGMENTS)
        .map(|t| Point::new(t, amplitude * (omega * t + phi).cos()))
        .collect();
    let (y_min, y_max) = y_extent(curve.iter().map(|p| p.y));

    let period = if omega == 0.0 {
        None
    } else {
        Some(TAU / omega.abs())
    };

    Derived::Sine(SineOutput {
        amplitude,
        omega,
        phi,
        period,
        curve,
        y_min,
        y_max,
    })
}
