// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

const BASE_URL_VARS: [&str; 2] = ["PRIMARY_BASE_URL", "OPENAI_BASE_URL"];
const API_KEY_VARS: [&str; 2] = ["PRIMARY_API_KEY", "OPENAI_API_KEY"];
const MODEL_VAR: &str = "PRIMARY_MODEL";
const TIMEOUT_VAR: &str = "EXPLORABLE_TUTOR_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub enum Backend {
    /// No credentials: every request gets the canned mock reply.
    Mock,
    Remote { base_url: String, api_key: String },
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Mock => write!(f, "Mock"),
            Backend::Remote { base_url, .. } => f
                .debug_struct("Remote")
                .field("base_url", base_url)
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TutorConfig {
    pub backend: Backend,
    pub model: String,
    /// Upper bound on one backend round-trip.
    pub timeout: Duration,
}

impl Default for TutorConfig {
    fn default() -> Self {
        TutorConfig::mock()
    }
}

impl TutorConfig {
    pub fn mock() -> Self {
        TutorConfig {
            backend: Backend::Mock,
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn remote(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        TutorConfig {
            backend: Backend::Remote {
                base_url: base_url.into(),
                api_key: api_key.into(),
            },
            ..TutorConfig::mock()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through `lookup` instead of the process
    /// environment.  Empty values count as unset.  A missing base URL or
    /// API key selects mock mode.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let first = |names: &[&str]| names.iter().find_map(|name| get(name));

        let backend = match (first(&BASE_URL_VARS), first(&API_KEY_VARS)) {
            (Some(base_url), Some(api_key)) => Backend::Remote { base_url, api_key },
            _ => Backend::Mock,
        };
        let timeout = get(TIMEOUT_VAR)
            .and_then(|secs| secs.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        TutorConfig {
            backend,
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_mock(&self) -> bool {
        self.backend == Backend::Mock
    }

    /// The chat-completions URL, or `None` in mock mode.
    pub fn endpoint(&self) -> Option<String> {
        match &self.backend {
            Backend::Mock => None,
            Backend::Remote { base_url, .. } => Some(format!(
                "{}/chat/completions",
                base_url.trim_end_matches('/')
            )),
        }
    }
}
