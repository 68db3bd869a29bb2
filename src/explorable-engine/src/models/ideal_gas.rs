// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::Serialize;

use crate::common::{Point, Values};
use crate::models::{Derived, Numbers, input, linspace, visit_points};

pub const R: f64 = 8.314;
pub const V_MIN: f64 = 1.0;
pub const V_MAX: f64 = 10.0;
pub const T_MIN: f64 = 100.0;
pub const T_MAX: f64 = 600.0;
pub const N_MIN: f64 = 1.0;
pub const N_MAX: f64 = 5.0;
/// Full-scale gauge reading: the most moles at the hottest temperature in a
/// one litre vessel.
pub const MAX_PRESSURE: f64 = N_MAX * R * T_MAX;
const VOLUME_EPSILON: f64 = 1e-3;
const ISOTHERM_SEGMENTS: usize = 90;
const COLD_HUE: f64 = 205.0;
const HOT_HUE: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdealGasOutput {
    pub volume: f64,
    pub temperature: f64,
    pub moles: f64,
    pub pressure: f64,
    /// `P(V)` at the current `n` and `T`, for `V` in `[V_MIN, V_MAX]`.
    pub isotherm: Vec<Point>,
    /// Where the current state sits on the isotherm.
    pub state: Point,
    /// Piston travel in `[0, 1]`.
    pub piston_ratio: f64,
    /// Gauge needle deflection in `[0, 1]`.
    pub gauge_ratio: f64,
    /// HSL hue for the gas, blue when cold and red when hot.
    pub hue: f64,
}

impl Numbers for IdealGasOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        for n in [
            self.volume,
            self.temperature,
            self.moles,
            self.pressure,
            self.state.x,
            self.state.y,
            self.piston_ratio,
            self.gauge_ratio,
            self.hue,
        ] {
            f(n);
        }
        visit_points(&self.isotherm, f);
    }
}

pub fn pressure(n: f64, t: f64, v: f64) -> f64 {
    n * R * t / v.max(VOLUME_EPSILON)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn evaluate(values: &Values) -> Derived {
    let volume = input(values, "V", 5.0).max(VOLUME_EPSILON);
    let temperature = input(values, "T", 300.0).clamp(T_MIN, T_MAX);
    let moles = input(values, "n", 1.0).clamp(N_MIN, N_MAX);

    let p = pressure(moles, temperature, volume);

    let isotherm = linspace(V_MIN, V_MAX, ISOTHERM_SEGMENTS)
        .map(|v| Point::new(v, pressure(moles, temperature, v)))
        .collect();

    let piston_ratio = ((volume - V_MIN) / (V_MAX - V_MIN)).clamp(0.0, 1.0);
    let gauge_ratio = (p / MAX_PRESSURE).clamp(0.0, 1.0);
    let hue = lerp(COLD_HUE, HOT_HUE, (temperature - T_MIN) / (T_MAX - T_MIN));

    Derived::IdealGas(IdealGasOutput {
        volume,
        temperature,
        moles,
        pressure: p,
        isotherm,
        state: Point::new(volume, p),
        piston_ratio,
        gauge_ratio,
        hue,
    })
}
