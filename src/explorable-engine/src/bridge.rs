// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Applies an assistant response to the variable store.
//!
//! Tool calls run in the order the response lists them.  Variable-setting
//! calls are sanitized against the store's *current* formula at the moment
//! they are applied, so a response that was requested under a different
//! formula can never write that formula's names into the new namespace.

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::common::{Result, format_number};
use crate::sanitize::{Rejection, SanitizedMutation, sanitize};
use crate::store::VariableStore;
use crate::tool_call::{ParsedAssistantResponse, ToolCall};

pub const FALLBACK_CONTENT: &str =
    "Tutor is unavailable right now. Verify your backend setup and try again.";

pub const MOCK_CONTENT: &str = "Running in mock mode. Set PRIMARY_BASE_URL, PRIMARY_API_KEY, and PRIMARY_MODEL in your environment to enable the tutor.";

/// Whether the informational calls actually change state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeOptions {
    pub follow_switch_formula: bool,
    pub honor_reset: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The store changed; `message` was pushed to the action log.
    Applied { tool: String, message: String },
    /// Logged but left the store's values alone.
    Informational { tool: String, message: String },
    /// Sanitized to nothing; no state change and no log entry.
    NoOp { tool: String },
    Rejected { tool: String, rejection: Rejection },
    /// Outside the vocabulary and passed over.
    Ignored { tool: String },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApplyReport {
    /// Display text from the response.
    pub content: Option<String>,
    /// How many calls changed the store.
    pub applied: usize,
    pub outcomes: Vec<Outcome>,
}

/// The canned OpenAI-shaped reply used when no backend is configured.
pub fn mock_response() -> Value {
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": MOCK_CONTENT,
                "tool_calls": [{
                    "type": "function",
                    "function": {
                        "name": "setVariable",
                        "arguments": "{\"name\":\"a\",\"value\":2}"
                    }
                }]
            }
        }]
    })
}

/// The flat reply substituted when the backend fails.
pub fn fallback_response() -> Value {
    json!({
        "role": "assistant",
        "content": FALLBACK_CONTENT,
        "tool_calls": []
    })
}

/// Log the race where a response arrives after the user switched formulas.
/// Returns true when the formula changed.
pub fn warn_if_stale(store: &VariableStore, issued_formula: &str) -> bool {
    let stale = store.formula_id() != issued_formula;
    if stale {
        warn!(
            issued = issued_formula,
            current = store.formula_id(),
            "applying assistant response issued under a different formula"
        );
    }
    stale
}

pub fn apply_response(
    store: &mut VariableStore,
    raw: &Value,
    options: BridgeOptions,
) -> Result<ApplyReport> {
    let parsed = ParsedAssistantResponse::from_value(raw)?;
    Ok(apply_parsed(store, parsed, options))
}

pub fn apply_parsed(
    store: &mut VariableStore,
    parsed: ParsedAssistantResponse,
    options: BridgeOptions,
) -> ApplyReport {
    let (content, calls) = parsed.into_parts();
    ApplyReport {
        content,
        ..apply_tool_calls(store, &calls, options)
    }
}

pub fn apply_tool_calls(
    store: &mut VariableStore,
    calls: &[ToolCall],
    options: BridgeOptions,
) -> ApplyReport {
    let outcomes: Vec<Outcome> = calls
        .iter()
        .map(|call| apply_one(store, call, options))
        .collect();
    ApplyReport {
        content: None,
        applied: outcomes.iter().filter(|o| o.is_applied()).count(),
        outcomes,
    }
}

fn apply_one(store: &mut VariableStore, call: &ToolCall, options: BridgeOptions) -> Outcome {
    let tool = call.name().to_string();
    match call {
        ToolCall::SetVariable { .. } | ToolCall::SetMany { .. } | ToolCall::Malformed { .. } => {
            match sanitize(store.formula_id(), call) {
                Ok(mutation) => apply_mutation(store, tool, mutation),
                Err(rejection) => {
                    debug!(%tool, %rejection, "rejected tool call");
                    Outcome::Rejected { tool, rejection }
                }
            }
        }
        ToolCall::ShowStep { index } => {
            store.set_step(*index);
            let message = format!("showStep {}", store.step_index());
            store.push_action(message.clone());
            Outcome::Applied { tool, message }
        }
        ToolCall::SwitchFormula { id } => {
            let message = format!("switchFormula {id}");
            if options.follow_switch_formula {
                if let Err(err) = store.switch_formula(id) {
                    debug!(%tool, %err, "switchFormula names an unknown formula");
                    return Outcome::Rejected {
                        tool,
                        rejection: Rejection::UnknownFormula(id.clone()),
                    };
                }
                store.push_action(message.clone());
                Outcome::Applied { tool, message }
            } else {
                store.push_action(message.clone());
                Outcome::Informational { tool, message }
            }
        }
        ToolCall::Reset { .. } => {
            if options.honor_reset {
                store.reset();
                let message = "reset".to_string();
                store.push_action(message.clone());
                Outcome::Applied { tool, message }
            } else {
                let message = "reset (noop in demo)".to_string();
                store.push_action(message.clone());
                Outcome::Informational { tool, message }
            }
        }
        ToolCall::Unrecognized { .. } => {
            debug!(%tool, "ignoring unrecognized tool call");
            Outcome::Ignored { tool }
        }
    }
}

fn apply_mutation(store: &mut VariableStore, tool: String, mutation: SanitizedMutation) -> Outcome {
    match mutation {
        SanitizedMutation::Single { name, value } => {
            store.set_variable(&name, value);
            let message = format!("set {} → {}", name, format_number(value));
            debug!(%tool, %message, "applied");
            store.push_action(message.clone());
            Outcome::Applied { tool, message }
        }
        SanitizedMutation::Batch { accepted, dropped } => {
            for (name, rejection) in &dropped {
                debug!(%tool, %name, %rejection, "dropped patch entry");
            }
            if accepted.is_empty() {
                return Outcome::NoOp { tool };
            }
            store.set_many(&accepted);
            let message = format!("scenario: {}", VariableStore::describe_values(&accepted));
            debug!(%tool, %message, "applied");
            store.push_action(message.clone());
            Outcome::Applied { tool, message }
        }
    }
}
