// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Turns model outputs into SVG scenes.
//!
//! Renderers only ever see a [`Derived`] value, never raw variable values,
//! so every input they draw has already passed through a model's guards.

pub mod common;
mod formulas;
pub mod scene;
mod trail;
pub mod viewport;

pub use scene::{Element, Scene};
pub use trail::{TRAIL_CAPACITY, Trails};

use crate::models::Derived;

pub fn render(derived: &Derived) -> Scene {
    render_frame(derived, None)
}

/// Render one frame, drawing faded copies of recent paths for the formulas
/// that animate with a trail (quadratic and projectile).
pub fn render_with_trails(derived: &Derived, trails: &mut Trails) -> Scene {
    render_frame(derived, Some(trails))
}

pub fn render_svg(derived: &Derived) -> String {
    render(derived).to_svg()
}

fn render_frame(derived: &Derived, trails: Option<&mut Trails>) -> Scene {
    match derived {
        Derived::Quadratic(out) => formulas::quadratic(out, trails),
        Derived::Projectile(out) => formulas::projectile(out, trails),
        Derived::Sine(out) => formulas::sine(out),
        Derived::Normal(out) => formulas::normal(out),
        Derived::IdealGas(out) => formulas::ideal_gas(out),
        Derived::FourierSquare(out) => formulas::fourier(out),
        Derived::EulerComplex(out) => formulas::euler(out),
        Derived::Gravity(out) => formulas::gravity(out),
        Derived::PredatorPrey(out) => formulas::predator_prey(out),
        Derived::LogisticMap(out) => formulas::logistic(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Values;
    use crate::registry::{formulas, get_schema};

    fn values(pairs: &[(&str, f64)]) -> Values {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn every_formula_renders_finite_scenes() {
        for schema in formulas() {
            let mut states = vec![schema.defaults()];
            for preset in schema.presets {
                let mut v = schema.defaults();
                v.extend(preset.values());
                states.push(v);
            }
            for v in states {
                let scene = render(&schema.evaluate(&v));
                assert_eq!(schema.id, scene.formula_id);
                assert!(scene.is_finite(), "{} scene has non-finite output", schema.id);
                assert!(!scene.elements.is_empty());
            }
        }
    }

    #[test]
    fn degenerate_cases_render() {
        let cases = [
            ("projectile", values(&[("v0", 0.0)])),
            ("quadratic", values(&[("a", 1.0), ("b", -4.0), ("c", 4.0)])),
            ("quadratic", values(&[("a", 0.0), ("b", 0.0), ("c", 0.0)])),
            ("normal", values(&[("sigma", 0.0)])),
            ("ideal-gas", values(&[("V", 0.0)])),
            ("euler-complex", values(&[("r", 0.0)])),
            ("sine", values(&[("omega", 0.0), ("A", 0.0)])),
        ];
        for (id, v) in cases {
            let schema = get_schema(id).unwrap();
            let svg = render_svg(&schema.evaluate(&v));
            assert!(!svg.contains("NaN"), "{id}: {svg}");
            assert!(!svg.contains("Infinity"), "{id}");
        }
    }

    #[test]
    fn zero_range_projectile_is_a_dot() {
        let schema = get_schema("projectile").unwrap();
        let scene = render(&schema.evaluate(&values(&[("v0", 0.0)])));
        assert!(
            !scene
                .elements
                .iter()
                .any(|el| matches!(el, Element::Path { class: "explorable-curve", .. }))
        );
    }

    #[test]
    fn trails_are_bounded() {
        let schema = get_schema("quadratic").unwrap();
        let mut trails = Trails::new();
        let scene = (1..=6)
            .map(|b| render_with_trails(&schema.evaluate(&values(&[("b", b as f64)])), &mut trails))
            .last()
            .unwrap();
        let ghosts = scene
            .elements
            .iter()
            .filter(|el| matches!(el, Element::Path { class: "explorable-ghost", .. }))
            .count();
        assert_eq!(TRAIL_CAPACITY, ghosts);
    }

    #[test]
    fn normal_label_reports_interval_probability() {
        let schema = get_schema("normal").unwrap();
        let svg = render_svg(&schema.evaluate(&schema.defaults()));
        assert!(svg.contains("P(-1 ≤ X ≤ 1) = 0.683"), "{svg}");
    }
}
