// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The live variable state for the selected formula.
//!
//! `VariableStore` is the only mutable state in the engine.  All writes go
//! through its methods; in a multi-threaded host it is wrapped in a single
//! mutex so there is exactly one writer at a time.

use std::collections::VecDeque;

use serde::Serialize;

use crate::common::{Error, ErrorCode, ErrorKind, Result, Values, format_number};
use crate::models::Derived;
use crate::registry::{FormulaSchema, formulas, get_schema};

/// Most recent action-log entries retained.
pub const ACTION_LOG_CAPACITY: usize = 20;

#[derive(Clone, Debug)]
pub struct VariableStore {
    schema: &'static FormulaSchema,
    values: Values,
    step_index: usize,
    action_log: VecDeque<String>,
}

/// A serializable view of the store.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub formula_id: String,
    pub values: Values,
    pub step_index: usize,
    pub action_log: Vec<String>,
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::for_schema(&formulas()[0])
    }
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formula(id: &str) -> Result<Self> {
        Ok(Self::for_schema(lookup(id)?))
    }

    fn for_schema(schema: &'static FormulaSchema) -> Self {
        VariableStore {
            schema,
            values: schema.defaults(),
            step_index: 0,
            action_log: VecDeque::with_capacity(ACTION_LOG_CAPACITY),
        }
    }

    pub fn formula_id(&self) -> &'static str {
        self.schema.id
    }

    pub fn schema(&self) -> &'static FormulaSchema {
        self.schema
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Action log, most recent first.
    pub fn action_log(&self) -> impl ExactSizeIterator<Item = &str> {
        self.action_log.iter().map(String::as_str)
    }

    /// Replace the formula and reset values to its defaults wholesale.
    pub fn switch_formula(&mut self, id: &str) -> Result<()> {
        let schema = lookup(id)?;
        self.schema = schema;
        self.values = schema.defaults();
        self.step_index = 0;
        Ok(())
    }

    /// Overwrite one value.  Non-finite values are ignored and `false` is
    /// returned.  Bounds are not enforced here.
    pub fn set_variable(&mut self, name: &str, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.values.insert(name.to_string(), value);
        true
    }

    /// Apply every finite entry of `patch` as one batch, returning how many
    /// entries were written.
    pub fn set_many(&mut self, patch: &Values) -> usize {
        let mut next = self.values.clone();
        let mut written = 0;
        for (name, value) in patch {
            if value.is_finite() {
                next.insert(name.clone(), *value);
                written += 1;
            }
        }
        self.values = next;
        written
    }

    pub fn push_action(&mut self, message: impl Into<String>) {
        self.action_log.push_front(message.into());
        self.action_log.truncate(ACTION_LOG_CAPACITY);
    }

    /// Non-finite and negative indices become 0; fractions are floored.
    pub fn set_step(&mut self, index: f64) {
        self.step_index = if index.is_finite() && index > 0.0 {
            index.floor() as usize
        } else {
            0
        };
    }

    pub fn apply_preset(&mut self, id: &str) -> Result<()> {
        let Some(preset) = self.schema.preset(id) else {
            return Err(Error::new(
                ErrorKind::Store,
                ErrorCode::DoesNotExist,
                Some(format!("{}/{}", self.schema.id, id)),
            ));
        };
        self.set_many(&preset.values());
        self.push_action(format!("preset: {}", preset.title));
        Ok(())
    }

    /// Restore the active formula's defaults and the first step.
    pub fn reset(&mut self) {
        self.values = self.schema.defaults();
        self.step_index = 0;
    }

    pub fn evaluate(&self) -> Derived {
        self.schema.evaluate(&self.values)
    }

    /// `name=value` pairs in key order, as used in action-log messages.
    pub fn describe_values(values: &Values) -> String {
        values
            .iter()
            .map(|(name, value)| format!("{}={}", name, format_number(*value)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            formula_id: self.schema.id.to_string(),
            values: self.values.clone(),
            step_index: self.step_index,
            action_log: self.action_log.iter().cloned().collect(),
        }
    }
}

fn lookup(id: &str) -> Result<&'static FormulaSchema> {
    get_schema(id).ok_or_else(|| {
        Error::new(
            ErrorKind::Store,
            ErrorCode::DoesNotExist,
            Some(id.to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_quadratic_defaults() {
        let store = VariableStore::new();
        assert_eq!("quadratic", store.formula_id());
        assert_eq!(Some(1.0), store.value("a"));
        assert_eq!(3, store.values().len());
        assert_eq!(0, store.step_index());
        assert_eq!(0, store.action_log().len());
    }

    #[test]
    fn action_log_keeps_most_recent() {
        let mut store = VariableStore::new();
        for i in 0..25 {
            store.push_action(format!("action {i}"));
        }
        let log: Vec<&str> = store.action_log().collect();
        assert_eq!(ACTION_LOG_CAPACITY, log.len());
        assert_eq!("action 24", log[0]);
        assert_eq!("action 5", log[19]);
    }

    #[test]
    fn switching_replaces_the_namespace() {
        let mut store = VariableStore::new();
        store.set_variable("a", 3.0);
        store.set_step(4.0);
        store.switch_formula("projectile").unwrap();
        assert_eq!("projectile", store.formula_id());
        assert!(store.value("a").is_none());
        assert!(store.value("b").is_none());
        assert!(store.value("c").is_none());
        assert_eq!(Some(50.0), store.value("v0"));
        assert_eq!(0, store.step_index());
    }

    #[test]
    fn unknown_formula_leaves_state_alone() {
        let mut store = VariableStore::new();
        store.set_variable("a", 2.0);
        let err = store.switch_formula("no-such-formula").unwrap_err();
        assert_eq!(ErrorCode::DoesNotExist, err.code);
        assert_eq!("quadratic", store.formula_id());
        assert_eq!(Some(2.0), store.value("a"));
        assert!(VariableStore::with_formula("nope").is_err());
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut store = VariableStore::new();
        assert!(!store.set_variable("a", f64::NAN));
        assert!(!store.set_variable("a", f64::INFINITY));
        assert_eq!(Some(1.0), store.value("a"));
        // no bounds check on this path
        assert!(store.set_variable("a", 999.0));
        assert_eq!(Some(999.0), store.value("a"));
    }

    #[test]
    fn set_many_skips_non_finite_entries() {
        let mut store = VariableStore::new();
        let patch: Values = [
            ("a".to_string(), 2.0),
            ("b".to_string(), f64::NAN),
            ("c".to_string(), -1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(2, store.set_many(&patch));
        assert_eq!(Some(2.0), store.value("a"));
        assert_eq!(Some(0.0), store.value("b"));
        assert_eq!(Some(-1.0), store.value("c"));
    }

    #[test]
    fn step_coercion() {
        let mut store = VariableStore::new();
        store.set_step(2.7);
        assert_eq!(2, store.step_index());
        store.set_step(f64::NAN);
        assert_eq!(0, store.step_index());
        store.set_step(5.0);
        store.set_step(-3.0);
        assert_eq!(0, store.step_index());
    }

    #[test]
    fn preset_and_reset() {
        let mut store = VariableStore::new();
        store.apply_preset("two-roots").unwrap();
        assert_eq!(Some(-4.0), store.value("c"));
        assert_eq!(Some("preset: Two roots"), store.action_log().next());
        assert!(store.apply_preset("missing").is_err());

        store.set_step(3.0);
        store.reset();
        assert_eq!(Some(0.0), store.value("c"));
        assert_eq!(0, store.step_index());
        // reset keeps the history
        assert_eq!(1, store.action_log().len());
    }

    #[test]
    fn describe_values_is_ordered() {
        let values: Values = [("b".to_string(), 0.5), ("a".to_string(), 3.0)]
            .into_iter()
            .collect();
        assert_eq!("a=3, b=0.5", VariableStore::describe_values(&values));
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let mut store = VariableStore::new();
        store.push_action("set a → 2");
        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!("quadratic", json["formulaId"]);
        assert_eq!(0, json["stepIndex"]);
        assert_eq!("set a → 2", json["actionLog"][0]);
    }
}
