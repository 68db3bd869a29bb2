// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The tool vocabulary in OpenAI `tools` form.
//!
//! Parameter schemas are generated from the same argument structs the
//! engine deserializes tool calls into, so what the model is told it may
//! send and what the parser accepts cannot drift apart.

use schemars::{JsonSchema, schema_for};
use serde_json::{Value, json};

use explorable_engine::tool_call::{
    RESET, ResetArgs, SET_MANY, SET_VARIABLE, SHOW_STEP, SWITCH_FORMULA, SetManyArgs,
    SetVariableArgs, ShowStepArgs, SwitchFormulaArgs,
};

pub fn tool_definitions() -> serde_json::Result<Vec<Value>> {
    Ok(vec![
        function::<SetVariableArgs>(SET_VARIABLE)?,
        function::<SetManyArgs>(SET_MANY)?,
        function::<ShowStepArgs>(SHOW_STEP)?,
        function::<SwitchFormulaArgs>(SWITCH_FORMULA)?,
        function::<ResetArgs>(RESET)?,
    ])
}

fn function<T: JsonSchema>(name: &str) -> serde_json::Result<Value> {
    let mut parameters = serde_json::to_value(schema_for!(T))?;
    let mut description = Value::Null;
    if let Some(obj) = parameters.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
        description = obj.remove("description").unwrap_or(Value::Null);
    }
    Ok(json!({
        "type": "function",
        "function": {
            "name": name,
            "description": description,
            "parameters": parameters,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters(name: &str) -> Value {
        tool_definitions()
            .unwrap()
            .into_iter()
            .find(|tool| tool["function"]["name"] == name)
            .map(|tool| tool["function"]["parameters"].clone())
            .unwrap()
    }

    #[test]
    fn five_tools_in_openai_shape() {
        let tools = tool_definitions().unwrap();
        let names: Vec<&str> = tools
            .iter()
            .map(|tool| tool["function"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            vec!["setVariable", "setMany", "showStep", "switchFormula", "reset"],
            names
        );
        for tool in &tools {
            assert_eq!("function", tool["type"]);
            assert!(tool["function"]["description"].is_string());
            assert_eq!("object", tool["function"]["parameters"]["type"]);
            assert!(tool["function"]["parameters"].get("$schema").is_none());
        }
    }

    #[test]
    fn schemas_compile() {
        for tool in tool_definitions().unwrap() {
            let result = jsonschema::validator_for(&tool["function"]["parameters"]);
            assert!(result.is_ok(), "{}: {:?}", tool["function"]["name"], result.err());
        }
    }

    #[test]
    fn set_variable_schema_matches_the_parser() {
        let validator = jsonschema::validator_for(&parameters("setVariable")).unwrap();
        assert!(validator.is_valid(&json!({"name": "a", "value": 2})));
        assert!(validator.is_valid(&json!({"name": "theta", "value": -0.5})));
        assert!(!validator.is_valid(&json!({"name": "a"})));
        assert!(!validator.is_valid(&json!({"name": "a", "value": "two"})));
    }

    #[test]
    fn set_many_schema_requires_numeric_patch() {
        let validator = jsonschema::validator_for(&parameters("setMany")).unwrap();
        assert!(validator.is_valid(&json!({"patch": {"a": 1, "b": 2.5}})));
        assert!(!validator.is_valid(&json!({"patch": {"a": "x"}})));
        assert!(!validator.is_valid(&json!({})));
    }

    #[test]
    fn show_step_index_is_a_non_negative_integer() {
        let validator = jsonschema::validator_for(&parameters("showStep")).unwrap();
        assert!(validator.is_valid(&json!({"index": 2})));
        assert!(!validator.is_valid(&json!({"index": -1})));
        assert!(!validator.is_valid(&json!({"index": 1.5})));
    }

    #[test]
    fn reset_arguments_are_optional() {
        let validator = jsonschema::validator_for(&parameters("reset")).unwrap();
        assert!(validator.is_valid(&json!({})));
        assert!(validator.is_valid(&json!({"formulaId": "sine"})));
    }
}
