// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Validation of assistant-proposed variable changes.
//!
//! Every `setVariable` and `setMany` call that came from a language model
//! passes through [`sanitize`] before it reaches the store.  Unknown
//! formulas and unknown variable names are rejected outright; known names
//! with out-of-range values are clamped into the declared range and
//! accepted.

use std::fmt;

use crate::common::Values;
use crate::registry::{FormulaSchema, get_schema};
use crate::tool_call::ToolCall;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    UnknownFormula(String),
    UnknownVariable(String),
    /// The value for this variable was missing, not a number, or not finite.
    NonFiniteValue(String),
    MalformedArguments(String),
    /// Not a variable-setting call; the bridge handles it directly.
    NotAMutation(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::UnknownFormula(id) => write!(f, "unknown formula {id}"),
            Rejection::UnknownVariable(name) => write!(f, "unknown variable {name}"),
            Rejection::NonFiniteValue(name) => write!(f, "{name} is not a finite number"),
            Rejection::MalformedArguments(reason) => write!(f, "malformed arguments: {reason}"),
            Rejection::NotAMutation(tool) => write!(f, "{tool} does not set variables"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SanitizedMutation {
    Single {
        name: String,
        value: f64,
    },
    /// Entries that failed validation are listed in `dropped`; `accepted`
    /// may be empty.
    Batch {
        accepted: Values,
        dropped: Vec<(String, Rejection)>,
    },
}

impl SanitizedMutation {
    pub fn is_empty(&self) -> bool {
        match self {
            SanitizedMutation::Single { .. } => false,
            SanitizedMutation::Batch { accepted, .. } => accepted.is_empty(),
        }
    }
}

/// Clamp `value` into the declared range of `name`.
pub fn clamp_variable(
    schema: &FormulaSchema,
    name: &str,
    value: f64,
) -> Result<f64, Rejection> {
    let Some(spec) = schema.variable(name) else {
        return Err(Rejection::UnknownVariable(name.to_string()));
    };
    if !value.is_finite() {
        return Err(Rejection::NonFiniteValue(name.to_string()));
    }
    Ok(spec.clamp(value))
}

pub fn sanitize(formula_id: &str, call: &ToolCall) -> Result<SanitizedMutation, Rejection> {
    match call {
        ToolCall::SetVariable { name, value } => {
            let schema = schema_for(formula_id)?;
            let value = clamp_variable(schema, name, *value)?;
            Ok(SanitizedMutation::Single {
                name: name.clone(),
                value,
            })
        }
        ToolCall::SetMany { patch } => {
            let schema = schema_for(formula_id)?;
            let mut accepted = Values::new();
            let mut dropped = Vec::new();
            for (name, value) in patch {
                let checked = (*value)
                    .ok_or_else(|| Rejection::NonFiniteValue(name.clone()))
                    .and_then(|v| clamp_variable(schema, name, v));
                match checked {
                    Ok(v) => {
                        accepted.insert(name.clone(), v);
                    }
                    Err(rejection) => dropped.push((name.clone(), rejection)),
                }
            }
            Ok(SanitizedMutation::Batch { accepted, dropped })
        }
        ToolCall::Malformed { reason, .. } => {
            Err(Rejection::MalformedArguments(reason.clone()))
        }
        other => Err(Rejection::NotAMutation(other.name().to_string())),
    }
}

// A missing schema rejects everything; it is never "no constraints".
fn schema_for(formula_id: &str) -> Result<&'static FormulaSchema, Rejection> {
    get_schema(formula_id).ok_or_else(|| Rejection::UnknownFormula(formula_id.to_string()))
}
