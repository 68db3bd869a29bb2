// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod bridge;
pub mod common;
pub mod models;
pub mod registry;
pub mod render;
pub mod sanitize;
pub mod store;
pub mod tool_call;

#[cfg(test)]
mod proptests;

pub use self::bridge::{
    ApplyReport, BridgeOptions, Outcome, apply_parsed, apply_response, apply_tool_calls,
    fallback_response, mock_response,
};
pub use self::common::{Error, ErrorCode, ErrorKind, Result, Values};
pub use self::models::Derived;
pub use self::registry::{FormulaSchema, VariableSpec, formulas, get_schema};
pub use self::render::{Scene, render, render_svg};
pub use self::sanitize::{Rejection, SanitizedMutation, sanitize};
pub use self::store::{StoreSnapshot, VariableStore};
pub use self::tool_call::{ParsedAssistantResponse, ToolCall};
