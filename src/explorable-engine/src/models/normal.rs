// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Normal distribution density and interval probability.
//!
//! The CDF uses the Abramowitz & Stegun 7.1.26 rational approximation of
//! `erf` (maximum absolute error about 1.5e-7), which saturates to exactly
//! 0 and 1 at the infinities.

use std::f64::consts::{PI, SQRT_2};

use serde::Serialize;

use crate::common::{Point, Values};
use crate::models::{Derived, Numbers, input, linspace, visit_points};

pub const X_MIN: f64 = -5.0;
pub const X_MAX: f64 = 5.0;
/// Smallest standard deviation the density is ever evaluated with.
pub const SIGMA_FLOOR: f64 = 0.1;
pub const DEFAULT_INTERVAL: (f64, f64) = (-1.0, 1.0);
const SEGMENTS: usize = 400;

const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalOutput {
    pub mu: f64,
    /// Sigma after the floor has been applied.
    pub sigma: f64,
    pub curve: Vec<Point>,
    pub peak_density: f64,
    /// Top of the plot: 1.2 × the peak, or 1 when the curve is flat.
    pub y_max: f64,
    pub interval: (f64, f64),
    pub interval_probability: f64,
}

impl Numbers for NormalOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        for n in [
            self.mu,
            self.sigma,
            self.peak_density,
            self.y_max,
            self.interval.0,
            self.interval.1,
            self.interval_probability,
        ] {
            f(n);
        }
        visit_points(&self.curve, f);
    }
}

pub fn effective_sigma(sigma: f64) -> f64 {
    if sigma.is_finite() {
        sigma.max(SIGMA_FLOOR)
    } else {
        1.0
    }
}

pub fn erf(x: f64) -> f64 {
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}

pub fn pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let sigma = effective_sigma(sigma);
    let z = (x - mu) / sigma;
    let density = (-0.5 * z * z).exp() / (sigma * (2.0 * PI).sqrt());
    if density.is_finite() { density } else { 0.0 }
}

pub fn cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let z = (x - mu) / (effective_sigma(sigma) * SQRT_2);
    if z.is_nan() {
        return 0.5;
    }
    0.5 * (1.0 + erf(z))
}

/// `P(lo ≤ X ≤ hi)` with the endpoints ordered and limited to the plot
/// window, clamped into `[0, 1]`.
pub fn interval_probability(mu: f64, sigma: f64, a: f64, b: f64) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let lo = lo.clamp(X_MIN, X_MAX);
    let hi = hi.clamp(X_MIN, X_MAX);
    (cdf(hi, mu, sigma) - cdf(lo, mu, sigma)).clamp(0.0, 1.0)
}

pub fn evaluate(values: &Values) -> Derived {
    let mu = input(values, "mu", 0.0);
    let sigma = effective_sigma(input(values, "sigma", 1.0));

    let curve: Vec<Point> = linspace(X_MIN, X_MAX, SEGMENTS)
        .map(|x| Point::new(x, pdf(x, mu, sigma)))
        .collect();
    let peak_density = curve.iter().map(|p| p.y).fold(0.0, f64::max);
    let y_max = if peak_density > 0.0 {
        peak_density * 1.2
    } else {
        1.0
    };

    let interval = DEFAULT_INTERVAL;
    let interval_probability = interval_probability(mu, sigma, interval.0, interval.1);

    Derived::Normal(NormalOutput {
        mu,
        sigma,
        curve,
        peak_density,
        y_max,
        interval,
        interval_probability,
    })
}
