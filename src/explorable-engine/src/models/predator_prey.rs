// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Lotka-Volterra predator-prey dynamics, integrated with explicit Euler.
//!
//! Explicit Euler overshoots on stiff parameter combinations and would drive
//! populations negative; both populations are clamped to `[0, POPULATION_CAP]`
//! after every step.

use serde::Serialize;

use crate::common::{Point, Values};
use crate::models::{Derived, Numbers, input, visit_points};

pub const TOTAL_TIME: f64 = 30.0;
pub const DT: f64 = 0.02;
pub const POPULATION_CAP: f64 = 1e6;
const RATE_MAX: f64 = 3.0;
const INITIAL_MAX: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rates {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredatorPreyOutput {
    pub rates: Rates,
    /// `(t, x)` samples.
    pub prey: Vec<Point>,
    /// `(t, y)` samples.
    pub predators: Vec<Point>,
    /// `(x, y)` phase-plane trajectory.
    pub phase: Vec<Point>,
    pub max_prey: f64,
    pub max_predators: f64,
}

impl PredatorPreyOutput {
    /// Upper bound for a shared population axis.
    pub fn y_max(&self) -> f64 {
        self.max_prey.max(self.max_predators).max(1.0)
    }
}

impl Numbers for PredatorPreyOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        for n in [
            self.rates.alpha,
            self.rates.beta,
            self.rates.gamma,
            self.rates.delta,
            self.max_prey,
            self.max_predators,
        ] {
            f(n);
        }
        visit_points(&self.prey, f);
        visit_points(&self.predators, f);
        visit_points(&self.phase, f);
    }
}

fn clamp_population(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, POPULATION_CAP)
    }
}

/// One explicit Euler step of size `dt`.
pub fn step(rates: &Rates, x: f64, y: f64, dt: f64) -> (f64, f64) {
    let dx = rates.alpha * x - rates.beta * x * y;
    let dy = rates.delta * x * y - rates.gamma * y;
    (clamp_population(x + dx * dt), clamp_population(y + dy * dt))
}

pub fn evaluate(values: &Values) -> Derived {
    let rate = |name: &str, default: f64| input(values, name, default).clamp(0.0, RATE_MAX);
    let rates = Rates {
        alpha: rate("alpha", 1.0),
        beta: rate("beta", 0.5),
        gamma: rate("gamma", 1.0),
        delta: rate("delta", 0.5),
    };
    let mut x = input(values, "x0", 5.0).clamp(0.0, INITIAL_MAX);
    let mut y = input(values, "y0", 3.0).clamp(0.0, INITIAL_MAX);

    let steps = (TOTAL_TIME / DT).round() as usize;
    let mut prey = Vec::with_capacity(steps + 1);
    let mut predators = Vec::with_capacity(steps + 1);
    let mut phase = Vec::with_capacity(steps + 1);
    let mut max_prey = x;
    let mut max_predators = y;

    for i in 0..=steps {
        let t = i as f64 * DT;
        prey.push(Point::new(t, x));
        predators.push(Point::new(t, y));
        phase.push(Point::new(x, y));
        max_prey = max_prey.max(x);
        max_predators = max_predators.max(y);
        (x, y) = step(&rates, x, y, DT);
    }

    Derived::PredatorPrey(PredatorPreyOutput {
        rates,
        prey,
        predators,
        phase,
        max_prey,
        max_predators,
    })
}
