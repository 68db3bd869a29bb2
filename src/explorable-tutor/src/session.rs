// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The request lifecycle: ask the backend, then apply its tool calls.
//!
//! The store lock is never held across the network round-trip.  It is taken
//! once to note which formula the request was issued under and once more to
//! apply the whole tool-call list, so a single reply's mutations land
//! together.  Overlapping requests are not serialized against each other;
//! the last reply applied wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Result, anyhow};
use serde_json::Value;
use tracing::{debug, warn};

use explorable_engine::bridge::{
    ApplyReport, BridgeOptions, FALLBACK_CONTENT, apply_response, warn_if_stale,
};
use explorable_engine::common::format_number;
use explorable_engine::store::{StoreSnapshot, VariableStore};

use crate::client::{ChatMessage, ReplySource, TutorClient};
use crate::config::TutorConfig;
use crate::tools::tool_definitions;

pub const SYSTEM_PROMPT: &str = "You are a patient math tutor. Use short paragraphs. When useful, propose tool calls (setVariable or setMany) to illustrate effects.";

#[derive(Clone, Debug, PartialEq)]
pub struct TutorAnswer {
    /// Text to show the user; never empty.
    pub text: String,
    pub source: ReplySource,
    pub report: ApplyReport,
    /// The formula changed while the request was in flight.
    pub stale: bool,
}

#[derive(Clone, Debug)]
pub struct TutorSession {
    client: Arc<TutorClient>,
    store: Arc<Mutex<VariableStore>>,
    tools: Arc<Vec<Value>>,
    options: BridgeOptions,
}

impl TutorSession {
    pub fn new(client: TutorClient, store: VariableStore) -> Result<Self> {
        Ok(TutorSession {
            client: Arc::new(client),
            store: Arc::new(Mutex::new(store)),
            tools: Arc::new(tool_definitions()?),
            options: BridgeOptions::default(),
        })
    }

    pub fn from_config(config: TutorConfig, store: VariableStore) -> Result<Self> {
        Self::new(TutorClient::new(config)?, store)
    }

    pub fn with_options(mut self, options: BridgeOptions) -> Self {
        self.options = options;
        self
    }

    /// A handle to the shared store, for hosts that also mutate it from
    /// user input.
    pub fn store(&self) -> Arc<Mutex<VariableStore>> {
        Arc::clone(&self.store)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().snapshot()
    }

    pub fn tools(&self) -> &[Value] {
        &self.tools
    }

    // A panic while holding the lock cannot leave the store half-written:
    // every store method either completes its update or makes none.
    fn lock(&self) -> MutexGuard<'_, VariableStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn ask(&self, messages: &[ChatMessage]) -> TutorAnswer {
        let issued = self.lock().formula_id();
        let reply = self.client.complete(messages, &self.tools).await;

        let mut store = self.lock();
        let stale = warn_if_stale(&store, issued);
        let (report, source) = match apply_response(&mut store, &reply.body, self.options) {
            Ok(report) => (report, reply.source),
            Err(err) => {
                warn!(error = %err, "unreadable tutor reply");
                (
                    ApplyReport::default(),
                    ReplySource::Fallback {
                        reason: err.to_string(),
                    },
                )
            }
        };
        drop(store);
        debug!(applied = report.applied, ?source, "tutor reply applied");

        let text = match report.content.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => FALLBACK_CONTENT.to_string(),
        };
        TutorAnswer {
            text,
            source,
            report,
            stale,
        }
    }

    /// Ask about one variable of the current formula, with its range,
    /// value, and the rest of the state supplied as context.
    pub async fn ask_about_variable(
        &self,
        variable: &str,
        question: Option<&str>,
    ) -> Result<TutorAnswer> {
        let messages = context_messages(&self.lock(), variable, question)?;
        Ok(self.ask(&messages).await)
    }
}

pub fn context_messages(
    store: &VariableStore,
    variable: &str,
    question: Option<&str>,
) -> Result<Vec<ChatMessage>> {
    let schema = store.schema();
    let spec = schema
        .variable(variable)
        .ok_or_else(|| anyhow!("{} has no variable named {}", schema.id, variable))?;
    let current = store
        .value(variable)
        .map(format_number)
        .unwrap_or_else(|| "unset".to_string());
    let all = serde_json::to_string(store.values())?;

    let context = format!(
        "Current formula: {}\nVariable: {} ({})\nRange: {} to {}\nCurrent value: {}\nAll current values: {}",
        schema.title,
        spec.label,
        spec.name,
        format_number(spec.min),
        format_number(spec.max),
        current,
        all,
    );
    let question = match question {
        Some(q) if !q.trim().is_empty() => q.to_string(),
        _ => format!(
            "Explain {} and how changing it affects the visualization.",
            spec.label
        ),
    };

    Ok(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::assistant(context),
        ChatMessage::user(question),
    ])
}
