// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The static formula catalogue.
//!
//! Each entry pairs a formula's variable bounds with the numeric model that
//! evaluates it.  The same bounds table drives UI defaults, presets, and the
//! tool-call sanitizer, so there is exactly one place a range is declared.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI};

use lazy_static::lazy_static;
use serde::Serialize;

use crate::common::{Error, ErrorCode, ErrorKind, Result, Values};
use crate::models::{self, Derived, Model};

pub const DEFAULT_FORMULA: &str = "quadratic";

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VariableSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl VariableSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub title: &'static str,
    pub patch: &'static [(&'static str, f64)],
}

impl Preset {
    pub fn values(&self) -> Values {
        self.patch
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }
}

#[derive(Clone, Copy, Serialize)]
pub struct FormulaSchema {
    pub id: &'static str,
    pub title: &'static str,
    pub variables: &'static [VariableSpec],
    pub presets: &'static [Preset],
    #[serde(skip)]
    pub model: Model,
}

impl std::fmt::Debug for FormulaSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulaSchema")
            .field("id", &self.id)
            .field("variables", &self.variables.len())
            .field("presets", &self.presets.len())
            .finish()
    }
}

impl FormulaSchema {
    pub fn variable(&self, name: &str) -> Option<&'static VariableSpec> {
        self.variables.iter().find(|var| var.name == name)
    }

    pub fn preset(&self, id: &str) -> Option<&'static Preset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    pub fn defaults(&self) -> Values {
        self.variables
            .iter()
            .map(|var| (var.name.to_string(), var.default))
            .collect()
    }

    pub fn evaluate(&self, values: &Values) -> Derived {
        (self.model)(values)
    }

    fn check(&self) -> Result<()> {
        let bad = |details: String| {
            Err(Error::new(
                ErrorKind::Registry,
                ErrorCode::BadSchema,
                Some(format!("{}: {}", self.id, details)),
            ))
        };

        if self.variables.is_empty() {
            return bad("no variables".to_string());
        }
        for (i, var) in self.variables.iter().enumerate() {
            if !(var.min.is_finite() && var.max.is_finite() && var.default.is_finite()) {
                return bad(format!("{} has a non-finite bound", var.name));
            }
            if !(var.min <= var.default && var.default <= var.max) {
                return bad(format!("{} default outside [min, max]", var.name));
            }
            if !(var.step > 0.0) {
                return bad(format!("{} step must be positive", var.name));
            }
            if self.variables[..i].iter().any(|prev| prev.name == var.name) {
                return bad(format!("{} declared twice", var.name));
            }
        }
        for preset in self.presets {
            for (name, value) in preset.patch {
                match self.variable(name) {
                    Some(var) if var.contains(*value) => {}
                    Some(_) => return bad(format!("preset {} sets {name} out of range", preset.id)),
                    None => return bad(format!("preset {} names unknown {name}", preset.id)),
                }
            }
        }
        Ok(())
    }
}

const fn var(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
) -> VariableSpec {
    VariableSpec {
        name,
        label,
        min,
        max,
        step,
        default,
    }
}

const fn preset(
    id: &'static str,
    title: &'static str,
    patch: &'static [(&'static str, f64)],
) -> Preset {
    Preset { id, title, patch }
}

static FORMULAS: &[FormulaSchema] = &[
    FormulaSchema {
        id: "quadratic",
        title: "Quadratic (Parabola)",
        variables: &[
            var("a", "Coefficient a", -5.0, 5.0, 0.1, 1.0),
            var("b", "Coefficient b", -10.0, 10.0, 0.1, 0.0),
            var("c", "Coefficient c", -20.0, 20.0, 0.1, 0.0),
        ],
        presets: &[
            preset("two-roots", "Two roots", &[("a", 1.0), ("b", 0.0), ("c", -4.0)]),
            preset("touches", "Touches axis", &[("a", 1.0), ("b", -4.0), ("c", 4.0)]),
            preset("no-real", "No real roots", &[("a", 1.0), ("b", 0.0), ("c", 4.0)]),
        ],
        model: models::quadratic::evaluate,
    },
    FormulaSchema {
        id: "projectile",
        title: "Projectile Motion",
        variables: &[
            var("v0", "Launch speed v0", 0.0, 100.0, 1.0, 50.0),
            var("theta", "Launch angle θ", 0.0, 1.57, 0.01, 0.785),
            var("g", "Gravity g", 1.0, 20.0, 0.1, 9.81),
        ],
        presets: &[
            preset("30deg", "30°", &[("theta", FRAC_PI_6)]),
            preset("45deg", "45°", &[("theta", FRAC_PI_4)]),
            preset("60deg", "60°", &[("theta", FRAC_PI_3)]),
        ],
        model: models::projectile::evaluate,
    },
    FormulaSchema {
        id: "sine",
        title: "Sine / SHM",
        variables: &[
            var("A", "Amplitude A", 0.0, 10.0, 0.1, 1.0),
            var("omega", "Angular freq ω", 0.1, 10.0, 0.1, 1.0),
            var("phi", "Phase φ", -PI, PI, 0.01, 0.0),
        ],
        presets: &[
            preset("baseline", "Baseline", &[("A", 1.0), ("omega", 1.0), ("phi", 0.0)]),
            preset("big-amplitude", "A = 3", &[("A", 3.0)]),
            preset("phase-shift", "Phase shift", &[("phi", FRAC_PI_4)]),
        ],
        model: models::sine::evaluate,
    },
    FormulaSchema {
        id: "normal",
        title: "Normal Distribution",
        variables: &[
            var("mu", "μ", -5.0, 5.0, 0.1, 0.0),
            var("sigma", "σ", 0.5, 3.0, 0.05, 1.0),
        ],
        presets: &[
            preset("standard", "Standard (0,1)", &[("mu", 0.0), ("sigma", 1.0)]),
            preset("narrow", "Narrow", &[("sigma", 0.7)]),
            preset("shifted", "Shifted mean", &[("mu", 1.5), ("sigma", 1.2)]),
        ],
        model: models::normal::evaluate,
    },
    FormulaSchema {
        id: "ideal-gas",
        title: "Ideal Gas Law",
        variables: &[
            var("V", "Volume V (L)", 1.0, 10.0, 0.1, 5.0),
            var("T", "Temperature T (K)", 100.0, 600.0, 5.0, 300.0),
            var("n", "Moles n", 1.0, 5.0, 0.1, 1.0),
        ],
        presets: &[
            preset("high-pressure", "High pressure", &[("V", 2.0), ("T", 500.0), ("n", 2.0)]),
            preset("low-temperature", "Cool gas", &[("T", 180.0)]),
            preset("spacious", "Large volume", &[("V", 9.0)]),
        ],
        model: models::ideal_gas::evaluate,
    },
    FormulaSchema {
        id: "fourier-square",
        title: "Fourier Series (Square Wave)",
        variables: &[
            var("N", "Terms N", 1.0, 25.0, 1.0, 1.0),
            var("f0", "Base frequency f₀", 1.0, 5.0, 0.1, 1.0),
        ],
        presets: &[
            preset("fundamental", "Fundamental", &[("N", 1.0), ("f0", 1.0)]),
            preset("five-terms", "5 terms", &[("N", 5.0)]),
            preset("fast-wave", "f₀ = 3", &[("f0", 3.0), ("N", 9.0)]),
        ],
        model: models::fourier::evaluate,
    },
    FormulaSchema {
        id: "euler-complex",
        title: "Euler's Formula",
        variables: &[
            var("theta", "Angle θ", -PI, PI, 0.01, 0.0),
            var("r", "Radius r", 0.0, 2.0, 0.05, 1.0),
        ],
        presets: &[
            preset("unit", "Unit circle", &[("r", 1.0)]),
            preset("quarter-turn", "θ = π/2", &[("theta", FRAC_PI_2)]),
            preset("double-radius", "r = 1.5", &[("r", 1.5), ("theta", FRAC_PI_4)]),
        ],
        model: models::euler::evaluate,
    },
    FormulaSchema {
        id: "gravity",
        title: "Newtonian Gravity",
        variables: &[
            var("m1", "Mass m1", 1.0, 100.0, 1.0, 10.0),
            var("m2", "Mass m2", 1.0, 100.0, 1.0, 10.0),
            var("r", "Distance r", 1.0, 100.0, 1.0, 20.0),
        ],
        presets: &[
            preset("close", "Close masses", &[("r", 5.0)]),
            preset("heavy", "Heavy pair", &[("m1", 80.0), ("m2", 90.0)]),
            preset("far", "Far apart", &[("r", 60.0)]),
        ],
        model: models::gravity::evaluate,
    },
    FormulaSchema {
        id: "predator-prey",
        title: "Predator-Prey (Lotka-Volterra)",
        variables: &[
            var("alpha", "α (prey growth)", 0.0, 3.0, 0.05, 1.0),
            var("beta", "β (predation)", 0.0, 3.0, 0.05, 0.5),
            var("gamma", "γ (predator decay)", 0.0, 3.0, 0.05, 1.0),
            var("delta", "δ (predator growth)", 0.0, 3.0, 0.05, 0.5),
            var("x0", "Initial prey x₀", 0.0, 10.0, 0.1, 5.0),
            var("y0", "Initial predator y₀", 0.0, 10.0, 0.1, 3.0),
        ],
        presets: &[
            preset(
                "stable-cycle",
                "Stable cycle",
                &[("alpha", 1.1), ("beta", 0.6), ("gamma", 1.1), ("delta", 0.6)],
            ),
            preset("fast-predators", "Predators thrive", &[("delta", 0.9), ("gamma", 0.8)]),
            preset("prey-boom", "Prey boom", &[("x0", 8.0), ("y0", 2.0), ("alpha", 1.5)]),
        ],
        model: models::predator_prey::evaluate,
    },
    FormulaSchema {
        id: "logistic-map",
        title: "Logistic Map (Chaos)",
        variables: &[
            var("r", "r (growth rate)", 2.5, 4.0, 0.01, 3.2),
            var("x0", "Initial x0", 0.0, 1.0, 0.01, 0.2),
        ],
        presets: &[
            preset("fixed-point", "Fixed point", &[("r", 2.8), ("x0", 0.3)]),
            preset("period-2", "Period-2", &[("r", 3.2), ("x0", 0.2)]),
            preset("chaotic", "Chaotic", &[("r", 3.9), ("x0", 0.2)]),
        ],
        model: models::logistic::evaluate,
    },
];

lazy_static! {
    static ref BY_ID: HashMap<&'static str, &'static FormulaSchema> =
        FORMULAS.iter().map(|schema| (schema.id, schema)).collect();
}

/// Every formula in catalogue order.
pub fn formulas() -> &'static [FormulaSchema] {
    FORMULAS
}

/// Look up a schema.  A missing id is `None`; callers must treat that as
/// "reject everything", never as "no constraints".
pub fn get_schema(id: &str) -> Option<&'static FormulaSchema> {
    BY_ID.get(id).copied()
}

/// Route-level resolution: an absent or unknown id falls back to the first
/// catalogue entry.
pub fn resolve_formula_id(id: Option<&str>) -> &'static str {
    match id.and_then(get_schema) {
        Some(schema) => schema.id,
        None => FORMULAS[0].id,
    }
}

/// Startup self-check of the catalogue invariants.
pub fn validate_registry() -> Result<()> {
    if BY_ID.len() != FORMULAS.len() {
        return Err(Error::new(
            ErrorKind::Registry,
            ErrorCode::BadSchema,
            Some("duplicate formula id".to_string()),
        ));
    }
    for schema in FORMULAS {
        schema.check()?;
    }
    Ok(())
}
