// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use explorable_engine::models::Derived;
use explorable_engine::render::common::fixed;

/// Readouts shown next to a formula's visualization, as label/value pairs.
pub fn readouts(derived: &Derived) -> Vec<(&'static str, String)> {
    match derived {
        Derived::Quadratic(out) => {
            let mut rows = vec![
                ("discriminant", fixed(out.discriminant, 3)),
                ("roots", out.kind.describe().to_string()),
            ];
            if !out.roots.is_empty() {
                let roots: Vec<String> = out.roots.iter().map(|x| fixed(*x, 3)).collect();
                rows.push(("x", roots.join(", ")));
            }
            if let Some(v) = out.vertex {
                rows.push(("vertex", format!("({}, {})", fixed(v.x, 3), fixed(v.y, 3))));
            }
            rows
        }
        Derived::Projectile(out) => vec![
            ("flight time", format!("{} s", fixed(out.flight_time, 2))),
            ("range", format!("{} m", fixed(out.range, 2))),
            ("apex height", format!("{} m", fixed(out.apex.y, 2))),
        ],
        Derived::Sine(out) => vec![(
            "period",
            out.period
                .map(|p| fixed(p, 3))
                .unwrap_or_else(|| "none (ω = 0)".to_string()),
        )],
        Derived::Normal(out) => vec![
            ("σ", fixed(out.sigma, 3)),
            ("peak density", fixed(out.peak_density, 4)),
            ("P(-1 ≤ X ≤ 1)", fixed(out.interval_probability, 3)),
        ],
        Derived::IdealGas(out) => vec![
            ("pressure", format!("{} Pa", fixed(out.pressure, 1))),
            ("gauge", format!("{}%", fixed(out.gauge_ratio * 100.0, 1))),
        ],
        Derived::FourierSquare(out) => vec![
            ("terms", out.terms.to_string()),
            ("overshoot", fixed(out.overshoot, 4)),
            ("undershoot", fixed(out.undershoot, 4)),
        ],
        Derived::EulerComplex(out) => vec![
            ("re", fixed(out.point.x, 3)),
            ("im", fixed(out.point.y, 3)),
        ],
        Derived::Gravity(out) => vec![("force", format!("{} N", fixed(out.force, 4)))],
        Derived::PredatorPrey(out) => vec![
            ("max prey", fixed(out.max_prey, 2)),
            ("max predators", fixed(out.max_predators, 2)),
        ],
        Derived::LogisticMap(out) => {
            let last = out.iterates.last().map(|p| p.y).unwrap_or(out.x0);
            vec![("x after 300 steps", fixed(last, 4))]
        }
    }
}
