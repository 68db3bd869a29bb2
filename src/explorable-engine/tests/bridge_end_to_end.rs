// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Drives the store through assistant responses the way a host would:
//! parse the raw body, apply it, evaluate, and render.

use serde_json::json;

use explorable_engine::bridge::{FALLBACK_CONTENT, MOCK_CONTENT};
use explorable_engine::{
    BridgeOptions, ParsedAssistantResponse, VariableStore, apply_parsed, apply_response,
    fallback_response, formulas, mock_response, render_svg,
};

fn options() -> BridgeOptions {
    BridgeOptions::default()
}

#[test]
fn mock_reply_on_quadratic_sets_a_once() {
    let mut store = VariableStore::with_formula("quadratic").unwrap();
    let report = apply_response(&mut store, &mock_response(), options()).unwrap();

    assert_eq!(Some(MOCK_CONTENT), report.content.as_deref());
    assert_eq!(1, report.applied);
    assert_eq!(Some(2.0), store.value("a"));
    assert_eq!(Some(0.0), store.value("b"));
    assert_eq!(Some(0.0), store.value("c"));
    assert_eq!(vec!["set a → 2"], store.action_log().collect::<Vec<_>>());

    let svg = render_svg(&store.evaluate());
    assert!(svg.starts_with("<svg"));
    assert!(!svg.contains("NaN"));
}

#[test]
fn fallback_reply_is_display_only() {
    let mut store = VariableStore::with_formula("sine").unwrap();
    let before = store.snapshot();
    let report = apply_response(&mut store, &fallback_response(), options()).unwrap();
    assert_eq!(Some(FALLBACK_CONTENT), report.content.as_deref());
    assert_eq!(0, report.applied);
    assert_eq!(before, store.snapshot());
}

#[test]
fn raw_openai_body_with_string_arguments() {
    let body = r#"{
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [
                    {"id": "call_1", "type": "function",
                     "function": {"name": "setVariable", "arguments": "{\"name\":\"theta\",\"value\":0.5}"}},
                    {"id": "call_2", "type": "function",
                     "function": {"name": "setVariable", "arguments": "{\"name\":\"v0\",\"value\":500}"}}
                ]
            }
        }]
    }"#;
    let mut store = VariableStore::with_formula("projectile").unwrap();
    let parsed = ParsedAssistantResponse::parse(body).unwrap();
    let report = apply_parsed(&mut store, parsed, options());

    assert_eq!(None, report.content);
    assert_eq!(2, report.applied);
    assert_eq!(Some(0.5), store.value("theta"));
    assert_eq!(Some(100.0), store.value("v0"));
    assert_eq!(
        vec!["set v0 → 100", "set theta → 0.5"],
        store.action_log().collect::<Vec<_>>()
    );
}

#[test]
fn scenario_patch_on_predator_prey() {
    let mut store = VariableStore::with_formula("predator-prey").unwrap();
    let raw = json!({
        "role": "assistant",
        "content": "Try a stronger predator.",
        "tool_calls": [{
            "name": "setMany",
            "arguments": {"patch": {"beta": 1.5, "delta": 9, "x0": "lots", "omega": 2}}
        }]
    });
    let report = apply_response(&mut store, &raw, options()).unwrap();

    assert_eq!(1, report.applied);
    assert_eq!(Some(1.5), store.value("beta"));
    assert_eq!(Some(3.0), store.value("delta"));
    assert_eq!(Some(5.0), store.value("x0"));
    assert!(store.value("omega").is_none());
    assert_eq!(
        Some("scenario: beta=1.5, delta=3"),
        store.action_log().next()
    );
}

#[test]
fn follow_switch_then_set_targets_new_formula() {
    let options = BridgeOptions {
        follow_switch_formula: true,
        ..Default::default()
    };
    let mut store = VariableStore::new();
    let raw = json!({
        "role": "assistant",
        "content": "Let's look at gravity.",
        "tool_calls": [
            {"name": "switchFormula", "arguments": "{\"id\":\"gravity\"}"},
            {"name": "setVariable", "arguments": "{\"name\":\"m1\",\"value\":80}"},
            {"name": "setVariable", "arguments": "{\"name\":\"a\",\"value\":3}"}
        ]
    });
    let report = apply_response(&mut store, &raw, options).unwrap();

    assert_eq!(2, report.applied);
    assert_eq!("gravity", store.formula_id());
    assert_eq!(Some(80.0), store.value("m1"));
    assert!(store.value("a").is_none());
}

#[test]
fn action_log_is_bounded() {
    let mut store = VariableStore::new();
    for i in 0..30 {
        let raw = json!({
            "role": "assistant",
            "content": "",
            "tool_calls": [{"name": "showStep", "arguments": {"index": i}}]
        });
        apply_response(&mut store, &raw, options()).unwrap();
    }
    let log: Vec<&str> = store.action_log().collect();
    assert_eq!(20, log.len());
    assert_eq!("showStep 29", log[0]);
    assert_eq!("showStep 10", log[19]);
}

#[test]
fn every_formula_survives_the_mock_reply() {
    for schema in formulas() {
        let mut store = VariableStore::with_formula(schema.id).unwrap();
        apply_response(&mut store, &mock_response(), options()).unwrap();
        for (name, value) in store.values() {
            let spec = schema.variable(name).unwrap();
            assert!(spec.contains(*value), "{}.{name} = {value}", schema.id);
        }
        assert!(store.evaluate().is_finite());
    }
}
