// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Pure numeric models, one per formula.
//!
//! Every model is a total function from the current variable values to an
//! immutable output structure.  Models read inputs through `input`, which
//! substitutes the declared default for missing or non-finite entries, and
//! then apply their own clamps so that no output field is ever NaN
//! or infinite, even for values that bypassed the sanitizer.

use serde::Serialize;

use crate::common::{Point, Values};

pub mod euler;
pub mod fourier;
pub mod gravity;
pub mod ideal_gas;
pub mod logistic;
pub mod normal;
pub mod predator_prey;
pub mod projectile;
pub mod quadratic;
pub mod sine;

pub type Model = fn(&Values) -> Derived;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "formula", rename_all = "kebab-case")]
pub enum Derived {
    Quadratic(quadratic::QuadraticOutput),
    Projectile(projectile::ProjectileOutput),
    Sine(sine::SineOutput),
    Normal(normal::NormalOutput),
    IdealGas(ideal_gas::IdealGasOutput),
    FourierSquare(fourier::FourierOutput),
    EulerComplex(euler::EulerOutput),
    Gravity(gravity::GravityOutput),
    PredatorPrey(predator_prey::PredatorPreyOutput),
    LogisticMap(logistic::LogisticOutput),
}

impl Derived {
    /// The registry id of the formula that produced this output.
    pub fn formula_id(&self) -> &'static str {
        match self {
            Derived::Quadratic(_) => "quadratic",
            Derived::Projectile(_) => "projectile",
            Derived::Sine(_) => "sine",
            Derived::Normal(_) => "normal",
            Derived::IdealGas(_) => "ideal-gas",
            Derived::FourierSquare(_) => "fourier-square",
            Derived::EulerComplex(_) => "euler-complex",
            Derived::Gravity(_) => "gravity",
            Derived::PredatorPrey(_) => "predator-prey",
            Derived::LogisticMap(_) => "logistic-map",
        }
    }

    fn as_numbers(&self) -> &dyn Numbers {
        match self {
            Derived::Quadratic(out) => out,
            Derived::Projectile(out) => out,
            Derived::Sine(out) => out,
            Derived::Normal(out) => out,
            Derived::IdealGas(out) => out,
            Derived::FourierSquare(out) => out,
            Derived::EulerComplex(out) => out,
            Derived::Gravity(out) => out,
            Derived::PredatorPrey(out) => out,
            Derived::LogisticMap(out) => out,
        }
    }

    /// True when every number this output would hand to a renderer is finite.
    pub fn is_finite(&self) -> bool {
        let mut finite = true;
        self.as_numbers()
            .visit_numbers(&mut |n| finite &= n.is_finite());
        finite
    }
}

/// Walks every scalar and coordinate in a model output.
pub trait Numbers {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64));
}

pub(crate) fn visit_points(points: &[Point], f: &mut dyn FnMut(f64)) {
    for p in points {
        f(p.x);
        f(p.y);
    }
}

/// Read `name` from `values`, substituting `default` when it is absent or
/// not finite.
pub(crate) fn input(values: &Values, name: &str, default: f64) -> f64 {
    match values.get(name) {
        Some(v) if v.is_finite() => *v,
        _ => default,
    }
}

/// `count + 1` evenly spaced samples covering `[start, end]` inclusive.
pub(crate) fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = (end - start) / count as f64;
    (0..=count).map(move |i| if i == count { end } else { start + step * i as f64 })
}

/// Minimum and maximum of `ys`, widened so the range is never empty.
pub(crate) fn y_extent(ys: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi == lo { (lo, lo + 1.0) } else { (lo, hi) }
}
