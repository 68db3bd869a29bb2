// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::Serialize;
use smallvec::SmallVec;

use crate::common::{Point, Values};
use crate::models::{Derived, Numbers, input, linspace, visit_points, y_extent};

pub const X_MIN: f64 = -10.0;
pub const X_MAX: f64 = 10.0;
const CURVE_SEGMENTS: usize = 400;

// Keeps b² - 4ac and -b/2a representable for any coefficient we are handed.
const COEFFICIENT_LIMIT: f64 = 1e6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootKind {
    TwoRoots,
    Touches,
    NoRealRoots,
    /// `a` is zero: the expression is linear and has no quadratic roots.
    Degenerate,
}

impl RootKind {
    pub fn describe(self) -> &'static str {
        match self {
            RootKind::TwoRoots => "two roots",
            RootKind::Touches => "touches",
            RootKind::NoRealRoots => "no real roots",
            RootKind::Degenerate => "not quadratic",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuadraticOutput {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub discriminant: f64,
    pub kind: RootKind,
    /// Real roots in ascending order.
    pub roots: SmallVec<[f64; 2]>,
    pub vertex: Option<Point>,
    pub curve: Vec<Point>,
    pub y_min: f64,
    pub y_max: f64,
}

impl Numbers for QuadraticOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        for n in [self.a, self.b, self.c, self.discriminant, self.y_min, self.y_max] {
            f(n);
        }
        self.roots.iter().for_each(|r| f(*r));
        if let Some(v) = self.vertex {
            f(v.x);
            f(v.y);
        }
        visit_points(&self.curve, f);
    }
}

/// Discriminant, root classification, and the real roots of `ax² + bx + c`.
///
/// Only an exactly zero `a` is degenerate and only an exactly zero
/// discriminant is a repeated root.
pub fn solve(a: f64, b: f64, c: f64) -> (f64, RootKind, SmallVec<[f64; 2]>) {
    let discriminant = b * b - 4.0 * a * c;
    let mut roots = SmallVec::new();

    if a == 0.0 {
        return (discriminant, RootKind::Degenerate, roots);
    }

    let kind = if discriminant == 0.0 {
        roots.push(-b / (2.0 * a));
        RootKind::Touches
    } else if discriminant < 0.0 {
        RootKind::NoRealRoots
    } else {
        // |q| >= sqrt(D) / 2 > 0, and the smaller-magnitude root comes from
        // c / q without cancellation.
        let q = -0.5 * (b + discriminant.sqrt().copysign(b));
        // + 0.0 turns -0 into 0
        let (r1, r2) = (q / a + 0.0, c / q + 0.0);
        roots.push(r1.min(r2));
        roots.push(r1.max(r2));
        RootKind::TwoRoots
    };

    (discriminant, kind, roots)
}

pub fn evaluate(values: &Values) -> Derived {
    let a = input(values, "a", 1.0).clamp(-COEFFICIENT_LIMIT, COEFFICIENT_LIMIT);
    let b = input(values, "b", 0.0).clamp(-COEFFICIENT_LIMIT, COEFFICIENT_LIMIT);
    let c = input(values, "c", 0.0).clamp(-COEFFICIENT_LIMIT, COEFFICIENT_LIMIT);

    let at = |x: f64| a * x * x + b * x + c;

    let curve: Vec<Point> = linspace(X_MIN, X_MAX, CURVE_SEGMENTS)
        .map(|x| Point::new(x, at(x)))
        .collect();
    let (y_min, y_max) = y_extent(curve.iter().map(|p| p.y));

    let (discriminant, kind, roots) = solve(a, b, c);
    let vertex = if a == 0.0 {
        None
    } else {
        let vx = -b / (2.0 * a);
        Some(Point::new(vx, at(vx)))
    };

    Derived::Quadratic(QuadraticOutput {
        a,
        b,
        c,
        discriminant,
        kind,
        roots,
        vertex,
        curve,
        y_min,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn eval(a: f64, b: f64, c: f64) -> QuadraticOutput {
        let values: Values = [("a", a), ("b", b), ("c", c)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        match evaluate(&values) {
            Derived::Quadratic(out) => out,
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn two_roots() {
        let out = eval(1.0, 0.0, -4.0);
        assert_eq!(RootKind::TwoRoots, out.kind);
        assert_eq!(&[-2.0, 2.0], out.roots.as_slice());
        assert_eq!(16.0, out.discriminant);
    }

    #[test]
    fn no_real_roots() {
        let out = eval(1.0, 0.0, 4.0);
        assert_eq!(RootKind::NoRealRoots, out.kind);
        assert!(out.roots.is_empty());
        assert_eq!(-16.0, out.discriminant);
    }

    #[test]
    fn repeated_root() {
        let out = eval(1.0, -4.0, 4.0);
        assert_eq!(RootKind::Touches, out.kind);
        assert_eq!(&[2.0], out.roots.as_slice());
        assert_eq!(Some(Point::new(2.0, 0.0)), out.vertex);
    }

    #[test]
    fn zero_a_suppresses_roots_and_vertex() {
        let out = eval(0.0, 3.0, 1.0);
        assert_eq!(RootKind::Degenerate, out.kind);
        assert!(out.roots.is_empty());
        assert!(out.vertex.is_none());
        assert!(Derived::Quadratic(out).is_finite());
    }

    #[test]
    fn small_coefficients_keep_two_roots() {
        let (discriminant, kind, roots) = solve(1e-6, 3e-4, 0.0);
        assert!(discriminant > 0.0);
        assert_eq!(RootKind::TwoRoots, kind);
        assert_eq!(2, roots.len());
        assert!(approx_eq!(f64, -300.0, roots[0], epsilon = 1e-9));
        assert_eq!(0.0, roots[1]);
    }

    #[test]
    fn tiny_a_is_still_quadratic() {
        let out = eval(5e-8, 1.0, -1.0);
        assert_eq!(RootKind::TwoRoots, out.kind);
        assert_eq!(2, out.roots.len());
        for x in &out.roots {
            let y = out.a * x * x + out.b * x + out.c;
            assert!(approx_eq!(f64, 0.0, y, epsilon = 1e-6), "y({x}) = {y}");
        }
        assert!(out.vertex.is_some());
    }

    #[test]
    fn flat_curve_has_nonempty_range() {
        let out = eval(0.0, 0.0, 3.0);
        assert_eq!(3.0, out.y_min);
        assert_eq!(4.0, out.y_max);
    }

    #[test]
    fn curve_spans_plot_window() {
        let out = eval(1.0, 0.0, 0.0);
        assert_eq!(CURVE_SEGMENTS + 1, out.curve.len());
        assert_eq!(X_MIN, out.curve[0].x);
        assert_eq!(X_MAX, out.curve.last().unwrap().x);
        assert_eq!(100.0, out.y_max);
    }

    #[test]
    fn huge_coefficients_stay_finite() {
        let out = eval(1e300, -1e300, 1e300);
        assert!(Derived::Quadratic(out).is_finite());
        let out = eval(1e-9, 1e300, 0.0);
        assert!(Derived::Quadratic(out).is_finite());
    }
}
