// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Assistant responses and tool calls as they arrive on the wire.
//!
//! Two response shapes are accepted: an OpenAI chat completion
//! (`choices[0].message`) and a flat `{role, content, tool_calls}` message.
//! Tool-call arguments may be a JSON string or an already-parsed object;
//! both are normalized into [`ToolCall`] here so nothing downstream has to
//! care which one the backend sent.

use std::collections::BTreeMap;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::{Error, ErrorCode, ErrorKind, Result};

pub const SET_VARIABLE: &str = "setVariable";
pub const SET_MANY: &str = "setMany";
pub const SHOW_STEP: &str = "showStep";
pub const SWITCH_FORMULA: &str = "switchFormula";
pub const RESET: &str = "reset";

/// Set one variable of the active formula.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetVariableArgs {
    /// Variable name, e.g. "a" or "theta".
    pub name: String,
    /// Proposed value; it is clamped into the variable's range.
    pub value: f64,
}

/// Set several variables of the active formula at once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetManyArgs {
    /// Variable name to proposed value.
    pub patch: BTreeMap<String, f64>,
}

/// Focus a step of the walkthrough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ShowStepArgs {
    /// Zero-based step index.
    #[cfg_attr(feature = "schema", schemars(with = "u32"))]
    pub index: f64,
}

/// Suggest moving to another formula.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SwitchFormulaArgs {
    /// Formula id, e.g. "projectile".
    pub id: String,
}

/// Suggest restoring default values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ResetArgs {
    #[serde(rename = "formulaId", default, skip_serializing_if = "Option::is_none")]
    pub formula_id: Option<String>,
}

// Parse-side shape of `setMany`: entries are checked one at a time so a
// single bad value does not sink the whole patch.
#[derive(Deserialize)]
struct SetManyWire {
    patch: Map<String, Value>,
}

/// A tool call after argument normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolCall {
    SetVariable {
        name: String,
        value: f64,
    },
    /// `None` marks an entry whose value was not a number.
    SetMany {
        patch: BTreeMap<String, Option<f64>>,
    },
    ShowStep {
        index: f64,
    },
    SwitchFormula {
        id: String,
    },
    Reset {
        formula_id: Option<String>,
    },
    /// A known tool whose arguments could not be read.
    Malformed {
        name: String,
        reason: String,
    },
    /// A tool outside the vocabulary.
    Unrecognized {
        name: String,
    },
}

impl ToolCall {
    pub fn name(&self) -> &str {
        match self {
            ToolCall::SetVariable { .. } => SET_VARIABLE,
            ToolCall::SetMany { .. } => SET_MANY,
            ToolCall::ShowStep { .. } => SHOW_STEP,
            ToolCall::SwitchFormula { .. } => SWITCH_FORMULA,
            ToolCall::Reset { .. } => RESET,
            ToolCall::Malformed { name, .. } | ToolCall::Unrecognized { name } => name,
        }
    }

    /// Build a call from a tool name and its raw `arguments` payload.
    pub fn from_parts(name: &str, arguments: Option<&Value>) -> ToolCall {
        let malformed = |reason: String| ToolCall::Malformed {
            name: name.to_string(),
            reason,
        };

        if ![SET_VARIABLE, SET_MANY, SHOW_STEP, SWITCH_FORMULA, RESET].contains(&name) {
            return ToolCall::Unrecognized {
                name: name.to_string(),
            };
        }

        let args = match normalize_arguments(arguments) {
            Ok(args) => args,
            Err(reason) => return malformed(reason),
        };

        let parsed = match name {
            SET_VARIABLE => serde_json::from_value::<SetVariableArgs>(args)
                .map(|a| ToolCall::SetVariable {
                    name: a.name,
                    value: a.value,
                }),
            SET_MANY => serde_json::from_value::<SetManyWire>(args).map(|a| ToolCall::SetMany {
                patch: a
                    .patch
                    .into_iter()
                    .map(|(k, v)| (k, v.as_f64().filter(|n| n.is_finite())))
                    .collect(),
            }),
            SHOW_STEP => serde_json::from_value::<ShowStepArgs>(args)
                .map(|a| ToolCall::ShowStep { index: a.index }),
            SWITCH_FORMULA => serde_json::from_value::<SwitchFormulaArgs>(args)
                .map(|a| ToolCall::SwitchFormula { id: a.id }),
            _ => serde_json::from_value::<ResetArgs>(args).map(|a| ToolCall::Reset {
                formula_id: a.formula_id,
            }),
        };

        parsed.unwrap_or_else(|err| malformed(err.to_string()))
    }

    /// Read one entry of a `tool_calls` array, either
    /// `{function: {name, arguments}}` or `{name, arguments}`.
    pub fn from_wire(entry: &Value) -> ToolCall {
        let function = entry.get("function").unwrap_or(entry);
        match function.get("name").and_then(Value::as_str) {
            Some(name) => ToolCall::from_parts(name, function.get("arguments")),
            None => ToolCall::Malformed {
                name: String::new(),
                reason: "tool call has no function name".to_string(),
            },
        }
    }
}

// Arguments arrive as a JSON string, an object, or not at all.
fn normalize_arguments(arguments: Option<&Value>) -> std::result::Result<Value, String> {
    match arguments {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Value::Object(Map::new())),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(v @ Value::Object(_)) => Ok(v),
            Ok(_) => Err("arguments are not an object".to_string()),
            Err(err) => Err(format!("arguments are not valid JSON: {err}")),
        },
        Some(v) if v.is_object() => Ok(v.clone()),
        Some(_) => Err("arguments are not an object".to_string()),
    }
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    T: Default + serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Value,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tool_calls: Vec<Value>,
}

impl AssistantMessage {
    /// The display text, when the content is a plain string.
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParsedAssistantResponse {
    OpenAi(ChatCompletion),
    Flat(AssistantMessage),
}

impl ParsedAssistantResponse {
    /// Decide the shape by probing for a non-empty `choices` array, then
    /// fall back to the flat message.
    pub fn from_value(raw: &Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(Error::new(
                ErrorKind::Assistant,
                ErrorCode::BadResponse,
                Some("response is not a JSON object".to_string()),
            ));
        }
        let has_choices = raw
            .get("choices")
            .and_then(Value::as_array)
            .is_some_and(|choices| !choices.is_empty());
        if has_choices {
            if let Ok(completion) = serde_json::from_value::<ChatCompletion>(raw.clone()) {
                return Ok(ParsedAssistantResponse::OpenAi(completion));
            }
        }
        let message = serde_json::from_value::<AssistantMessage>(raw.clone())?;
        Ok(ParsedAssistantResponse::Flat(message))
    }

    pub fn parse(body: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(body)?;
        Self::from_value(&raw)
    }

    pub fn message(&self) -> Option<&AssistantMessage> {
        match self {
            ParsedAssistantResponse::OpenAi(completion) => {
                completion.choices.first().map(|c| &c.message)
            }
            ParsedAssistantResponse::Flat(message) => Some(message),
        }
    }

    /// Display text and normalized tool calls, in order.
    pub fn into_parts(self) -> (Option<String>, Vec<ToolCall>) {
        match self.message() {
            Some(message) => (
                message.text().map(str::to_string),
                message.tool_calls.iter().map(ToolCall::from_wire).collect(),
            ),
            None => (None, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_object_arguments_agree() {
        let as_string = ToolCall::from_wire(&json!({
            "type": "function",
            "function": {"name": "setVariable", "arguments": "{\"name\":\"a\",\"value\":2}"}
        }));
        let as_object = ToolCall::from_wire(&json!({
            "name": "setVariable",
            "arguments": {"name": "a", "value": 2}
        }));
        assert_eq!(as_string, as_object);
        assert_eq!(
            ToolCall::SetVariable {
                name: "a".to_string(),
                value: 2.0
            },
            as_string
        );
    }

    #[test]
    fn malformed_arguments() {
        let bad_json = ToolCall::from_parts(SET_VARIABLE, Some(&json!("{name: a")));
        assert!(matches!(bad_json, ToolCall::Malformed { .. }));
        let missing_value = ToolCall::from_parts(SET_VARIABLE, Some(&json!({"name": "a"})));
        assert!(matches!(missing_value, ToolCall::Malformed { .. }));
        let string_value =
            ToolCall::from_parts(SET_VARIABLE, Some(&json!({"name": "a", "value": "3"})));
        assert!(matches!(string_value, ToolCall::Malformed { .. }));
        let array_args = ToolCall::from_parts(SET_MANY, Some(&json!([1, 2])));
        assert!(matches!(array_args, ToolCall::Malformed { .. }));
        let nameless = ToolCall::from_wire(&json!({"function": {"arguments": "{}"}}));
        assert_eq!("", nameless.name());
    }

    #[test]
    fn set_many_keeps_bad_entries_as_none() {
        let call = ToolCall::from_parts(
            SET_MANY,
            Some(&json!({"patch": {"a": 3, "b": "x", "c": null}})),
        );
        let ToolCall::SetMany { patch } = call else {
            panic!("expected setMany");
        };
        assert_eq!(Some(&Some(3.0)), patch.get("a"));
        assert_eq!(Some(&None), patch.get("b"));
        assert_eq!(Some(&None), patch.get("c"));
    }

    #[test]
    fn absent_arguments_are_empty() {
        assert_eq!(
            ToolCall::Reset { formula_id: None },
            ToolCall::from_parts(RESET, None)
        );
        assert_eq!(
            ToolCall::Reset {
                formula_id: Some("gravity".to_string())
            },
            ToolCall::from_parts(RESET, Some(&json!("{\"formulaId\":\"gravity\"}")))
        );
        assert!(matches!(
            ToolCall::from_parts(SWITCH_FORMULA, None),
            ToolCall::Malformed { .. }
        ));
    }

    #[test]
    fn unknown_tools_pass_through() {
        let call = ToolCall::from_parts("launchRockets", Some(&json!({"count": 3})));
        assert_eq!(
            ToolCall::Unrecognized {
                name: "launchRockets".to_string()
            },
            call
        );
    }

    #[test]
    fn openai_shape_is_preferred() {
        let raw = json!({
            "choices": [{"message": {
                "role": "assistant",
                "content": "hi",
                "tool_calls": [{"function": {"name": "showStep", "arguments": "{\"index\":1}"}}]
            }}],
            "content": "ignored"
        });
        let parsed = ParsedAssistantResponse::from_value(&raw).unwrap();
        assert!(matches!(parsed, ParsedAssistantResponse::OpenAi(_)));
        let (text, calls) = parsed.into_parts();
        assert_eq!(Some("hi".to_string()), text);
        assert_eq!(vec![ToolCall::ShowStep { index: 1.0 }], calls);
    }

    #[test]
    fn flat_shape_and_empty_choices() {
        let raw = json!({"role": "assistant", "content": "plain", "tool_calls": null});
        let parsed = ParsedAssistantResponse::from_value(&raw).unwrap();
        assert!(matches!(parsed, ParsedAssistantResponse::Flat(_)));
        assert_eq!((Some("plain".to_string()), vec![]), parsed.into_parts());

        let raw = json!({"choices": [], "content": "flat after all"});
        let parsed = ParsedAssistantResponse::from_value(&raw).unwrap();
        assert!(matches!(parsed, ParsedAssistantResponse::Flat(_)));
    }

    #[test]
    fn non_objects_are_bad_responses() {
        let err = ParsedAssistantResponse::parse("[1,2]").unwrap_err();
        assert_eq!(ErrorCode::BadResponse, err.code);
        let err = ParsedAssistantResponse::parse("not json").unwrap_err();
        assert_eq!(ErrorCode::BadResponse, err.code);
    }
}
