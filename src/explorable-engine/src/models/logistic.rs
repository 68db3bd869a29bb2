// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The logistic map `x ← r·x·(1-x)` and its bifurcation diagram.

use lazy_static::lazy_static;
use serde::Serialize;

use crate::common::{Point, Values};
use crate::models::{Derived, Numbers, input, linspace, visit_points};

pub const R_MIN: f64 = 2.5;
pub const R_MAX: f64 = 4.0;
pub const ITERATIONS: usize = 300;
/// How many of the final iterates are plotted.
pub const WINDOW: usize = 100;
/// Iterations discarded before sampling the attractor.
pub const BURN_IN: usize = 200;
pub const SAMPLES: usize = 80;
const BIFURCATION_STEPS: usize = 200;
const BIFURCATION_START: f64 = 0.5;
const PARABOLA_SEGMENTS: usize = 100;

lazy_static! {
    static ref BIFURCATION: Vec<Point> = bifurcation();
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogisticOutput {
    pub r: f64,
    pub x0: f64,
    /// `(n, x_n)` for the last `WINDOW` of `ITERATIONS` iterates.
    pub iterates: Vec<Point>,
    /// `y = r·x·(1-x)` over `x ∈ [0, 1]`.
    pub parabola: Vec<Point>,
    /// `(r, x)` attractor samples across the whole `r` range.
    pub bifurcation: &'static [Point],
}

impl Numbers for LogisticOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        f(self.r);
        f(self.x0);
        visit_points(&self.iterates, f);
        visit_points(&self.parabola, f);
        visit_points(self.bifurcation, f);
    }
}

pub fn next(r: f64, x: f64) -> f64 {
    (r * x * (1.0 - x)).clamp(0.0, 1.0)
}

/// Run `BURN_IN` iterations from `x`, then record the next `SAMPLES`.
pub fn settled_samples(r: f64, mut x: f64) -> Vec<f64> {
    for _ in 0..BURN_IN {
        x = next(r, x);
    }
    (0..SAMPLES)
        .map(|_| {
            x = next(r, x);
            x
        })
        .collect()
}

pub fn bifurcation() -> Vec<Point> {
    linspace(R_MIN, R_MAX, BIFURCATION_STEPS)
        .flat_map(|r| {
            settled_samples(r, BIFURCATION_START)
                .into_iter()
                .map(move |x| Point::new(r, x))
        })
        .collect()
}

pub fn evaluate(values: &Values) -> Derived {
    let r = input(values, "r", 3.2).clamp(R_MIN, R_MAX);
    let x0 = input(values, "x0", 0.2).clamp(0.0, 1.0);

    let mut x = x0;
    let mut iterates = Vec::with_capacity(WINDOW);
    for n in 0..ITERATIONS {
        if n >= ITERATIONS - WINDOW {
            iterates.push(Point::new(n as f64, x));
        }
        x = next(r, x);
    }

    let parabola = linspace(0.0, 1.0, PARABOLA_SEGMENTS)
        .map(|x| Point::new(x, r * x * (1.0 - x)))
        .collect();

    Derived::LogisticMap(LogisticOutput {
        r,
        x0,
        iterates,
        parabola,
        bifurcation: BIFURCATION.as_slice(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variance(xs: &[f64]) -> f64 {
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64
    }

    #[test]
    fn chaos_has_more_spread_than_a_fixed_point() {
        let stable = settled_samples(2.8, 0.2);
        let chaotic = settled_samples(3.9, 0.2);
        assert_eq!(SAMPLES, stable.len());
        assert!(variance(&stable) < 1e-10, "stable variance {}", variance(&stable));
        assert!(variance(&chaotic) > 0.01, "chaotic variance {}", variance(&chaotic));
    }

    #[test]
    fn settles_on_the_fixed_point() {
        let fixed = 1.0 - 1.0 / 2.8;
        for x in settled_samples(2.8, 0.3) {
            assert!((x - fixed).abs() < 1e-6);
        }
    }

    #[test]
    fn window_is_the_tail() {
        let Derived::LogisticMap(out) = evaluate(&Values::new()) else {
            panic!("expected logistic output");
        };
        assert_eq!(WINDOW, out.iterates.len());
        assert_eq!(200.0, out.iterates[0].x);
        assert_eq!(299.0, out.iterates[WINDOW - 1].x);
        assert_eq!((BIFURCATION_STEPS + 1) * SAMPLES, out.bifurcation.len());
    }

    #[test]
    fn iterates_stay_in_unit_interval() {
        let values: Values = [("r".to_string(), 4.0), ("x0".to_string(), 0.999)]
            .into_iter()
            .collect();
        let Derived::LogisticMap(out) = evaluate(&values) else {
            panic!("expected logistic output");
        };
        assert!(out.iterates.iter().all(|p| (0.0..=1.0).contains(&p.y)));
        assert!((out.parabola[50].y - 1.0).abs() < 1e-12);
    }
}
