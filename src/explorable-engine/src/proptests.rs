// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Property-based tests for the sanitizer, the models, and the renderers.

use proptest::prelude::*;

use crate::common::Values;
use crate::registry::formulas;
use crate::render::render;
use crate::sanitize::{SanitizedMutation, sanitize};
use crate::tool_call::ToolCall;

fn formula_index() -> impl Strategy<Value = usize> {
    0..formulas().len()
}

fn any_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(-1.0),
        (-1_000_000i64..1_000_000).prop_map(|x| x as f64),
        -1e9f64..1e9,
    ]
}

fn wide_value() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), -1000f64..1000.0, (-20i32..20).prop_map(|x| x as f64 / 4.0)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn sanitized_values_land_in_bounds(
        index in formula_index(),
        var in 0usize..8,
        value in any_value(),
    ) {
        let schema = &formulas()[index];
        let spec = &schema.variables[var % schema.variables.len()];
        let call = ToolCall::SetVariable { name: spec.name.to_string(), value };
        match sanitize(schema.id, &call) {
            Ok(SanitizedMutation::Single { name, value: clamped }) => {
                prop_assert_eq!(spec.name, name.as_str());
                prop_assert!(spec.contains(clamped), "{} = {} outside bounds", name, clamped);
                if spec.contains(value) {
                    prop_assert_eq!(value, clamped);
                }
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn batch_values_land_in_bounds(
        index in formula_index(),
        values in proptest::collection::vec(any_value(), 1..6),
    ) {
        let schema = &formulas()[index];
        let mut patch: std::collections::BTreeMap<String, Option<f64>> = schema
            .variables
            .iter()
            .zip(values)
            .map(|(spec, v)| (spec.name.to_string(), Some(v)))
            .collect();
        patch.insert("not_a_variable".to_string(), Some(1.0));
        let Ok(SanitizedMutation::Batch { accepted, dropped }) =
            sanitize(schema.id, &ToolCall::SetMany { patch })
        else {
            panic!("setMany always sanitizes to a batch for known formulas");
        };
        prop_assert_eq!(1, dropped.len());
        for (name, value) in accepted {
            let spec = schema.variable(&name).unwrap();
            prop_assert!(spec.contains(value));
        }
    }

    #[test]
    fn models_stay_finite_outside_bounds(
        index in formula_index(),
        values in proptest::collection::vec(wide_value(), 6),
    ) {
        let schema = &formulas()[index];
        let input: Values = schema
            .variables
            .iter()
            .zip(values)
            .map(|(spec, v)| (spec.name.to_string(), v))
            .collect();
        let derived = schema.evaluate(&input);
        prop_assert!(derived.is_finite(), "{} produced non-finite output", schema.id);
        prop_assert!(render(&derived).is_finite());
    }

    #[test]
    fn evaluate_is_deterministic(
        index in formula_index(),
        values in proptest::collection::vec(wide_value(), 6),
    ) {
        let schema = &formulas()[index];
        let input: Values = schema
            .variables
            .iter()
            .zip(values)
            .map(|(spec, v)| (spec.name.to_string(), v))
            .collect();
        prop_assert_eq!(schema.evaluate(&input), schema.evaluate(&input));
    }
}
