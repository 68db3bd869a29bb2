// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Truncated Fourier series of a unit square wave.
//!
//! Only odd harmonics contribute: term `k` has frequency `(2k+1)·f0` and
//! weight `4/((2k+1)π)`.  The partial sum never converges uniformly near the
//! jumps, so the overshoot beyond ±1 settles near 9% of the jump height
//! (about 0.179) however many terms are added.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

use crate::common::{Point, Values};
use crate::models::{Derived, Numbers, input, linspace, visit_points};

pub const T_MIN: f64 = 0.0;
pub const T_MAX: f64 = 1.0;
pub const MIN_TERMS: usize = 1;
pub const MAX_TERMS: usize = 25;
const F0_MIN: f64 = 1.0;
const F0_MAX: f64 = 5.0;
const SEGMENTS: usize = 800;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FourierOutput {
    pub terms: usize,
    pub f0: f64,
    pub partial_sum: Vec<Point>,
    /// The ideal square wave, with vertical edges at each half period.
    pub target: Vec<Point>,
    /// How far the partial sum rises above +1.
    pub overshoot: f64,
    /// How far the partial sum dips below -1.
    pub undershoot: f64,
}

impl Numbers for FourierOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        for n in [self.f0, self.overshoot, self.undershoot] {
            f(n);
        }
        visit_points(&self.partial_sum, f);
        visit_points(&self.target, f);
    }
}

/// Round and clamp a requested term count into `[MIN_TERMS, MAX_TERMS]`.
pub fn term_count(n: f64) -> usize {
    if !n.is_finite() {
        return MIN_TERMS;
    }
    n.round().clamp(MIN_TERMS as f64, MAX_TERMS as f64) as usize
}

pub fn partial_sum(terms: usize, f0: f64, t: f64) -> f64 {
    (0..terms)
        .map(|k| {
            let harmonic = (2 * k + 1) as f64;
            4.0 / (harmonic * PI) * (TAU * harmonic * f0 * t).sin()
        })
        .sum()
}

fn square_wave(f0: f64) -> Vec<Point> {
    let half_period = 0.5 / f0;
    let mut points = vec![Point::new(T_MIN, 1.0)];
    let mut level = 1.0;
    for k in 1.. {
        let edge = k as f64 * half_period;
        if edge >= T_MAX - 1e-9 {
            break;
        }
        points.push(Point::new(edge, level));
        level = -level;
        points.push(Point::new(edge, level));
    }
    points.push(Point::new(T_MAX, level));
    points
}

pub fn evaluate(values: &Values) -> Derived {
    let terms = term_count(input(values, "N", 1.0));
    let f0 = input(values, "f0", 1.0).clamp(F0_MIN, F0_MAX);

    let partial_sum: Vec<Point> = linspace(T_MIN, T_MAX, SEGMENTS)
        .map(|t| Point::new(t, partial_sum(terms, f0, t)))
        .collect();

    let (lo, hi) = partial_sum
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

    Derived::FourierSquare(FourierOutput {
        terms,
        f0,
        partial_sum,
        target: square_wave(f0),
        overshoot: (hi - 1.0).max(0.0),
        undershoot: (-(lo + 1.0)).max(0.0),
    })
}
