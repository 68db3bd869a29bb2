// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use anyhow::{Context, Result, anyhow, bail};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use explorable_engine::bridge::{fallback_response, mock_response};
use explorable_engine::tool_call::ParsedAssistantResponse;

use crate::config::{Backend, TutorConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Where a reply body came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplySource {
    Backend,
    /// No backend configured.
    Mock,
    /// The backend was configured but the round-trip failed.
    Fallback { reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TutorReply {
    pub source: ReplySource,
    /// A response body in one of the shapes the engine's bridge accepts.
    pub body: Value,
}

impl TutorReply {
    pub fn mock() -> Self {
        TutorReply {
            source: ReplySource::Mock,
            body: mock_response(),
        }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        TutorReply {
            source: ReplySource::Fallback {
                reason: reason.into(),
            },
            body: fallback_response(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ReplySource::Fallback { .. })
    }
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    tools: &'a [Value],
    tool_choice: &'static str,
}

#[derive(Clone, Debug)]
pub struct TutorClient {
    http: Client,
    config: TutorConfig,
}

impl TutorClient {
    pub fn new(config: TutorConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(TutorClient { http, config })
    }

    /// Use a caller-built HTTP client; `config.timeout` is not applied to it.
    pub fn with_http(config: TutorConfig, http: Client) -> Self {
        TutorClient { http, config }
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// One chat-completion round-trip.  Never fails: a missing backend
    /// yields the mock reply and any transport or decoding problem yields
    /// the fallback reply.
    pub async fn complete(&self, messages: &[ChatMessage], tools: &[Value]) -> TutorReply {
        let (url, api_key) = match (&self.config.backend, self.config.endpoint()) {
            (Backend::Remote { api_key, .. }, Some(url)) => (url, api_key),
            _ => {
                info!("no tutor backend configured; using mock reply");
                return TutorReply::mock();
            }
        };

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            tools,
            tool_choice: "auto",
        };

        match self.send(&url, api_key, &request).await {
            Ok(body) => TutorReply {
                source: ReplySource::Backend,
                body,
            },
            Err(err) => {
                warn!(error = %err, "tutor backend failed; using fallback reply");
                TutorReply::fallback(err.to_string())
            }
        }
    }

    async fn send(&self, url: &str, api_key: &str, request: &ChatRequest<'_>) -> Result<Value> {
        let res = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| anyhow!("failed to contact tutor backend: {}", e))?;

        let status = res.status();
        if !status.is_success() {
            bail!("tutor backend error: {}", status);
        }

        let text = res
            .text()
            .await
            .map_err(|e| anyhow!("failed to read tutor response: {}", e))?;
        if text.trim().is_empty() {
            bail!("tutor backend returned an empty body");
        }

        let body: Value =
            serde_json::from_str(&text).context("tutor backend returned invalid JSON")?;
        // reject shapes the bridge could not read before they reach the store
        ParsedAssistantResponse::from_value(&body)?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let messages = [ChatMessage::system("be brief"), ChatMessage::user("hi")];
        let tools = [serde_json::json!({"type": "function"})];
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            tools: &tools,
            tool_choice: "auto",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!("gpt-4o-mini", value["model"]);
        assert_eq!("auto", value["tool_choice"]);
        assert_eq!("system", value["messages"][0]["role"]);
        assert_eq!("hi", value["messages"][1]["content"]);
        assert_eq!(1, value["tools"].as_array().unwrap().len());
    }

    #[test]
    fn mock_and_fallback_replies_are_marked() {
        assert_eq!(ReplySource::Mock, TutorReply::mock().source);
        let fallback = TutorReply::fallback("timed out");
        assert!(fallback.is_fallback());
        assert!(fallback.body["tool_calls"].as_array().unwrap().is_empty());
    }
}
