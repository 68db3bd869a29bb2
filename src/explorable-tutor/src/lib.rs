// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod session;
pub mod tools;

pub use self::client::{ChatMessage, ReplySource, Role, TutorClient, TutorReply};
pub use self::config::{Backend, TutorConfig};
pub use self::session::{TutorAnswer, TutorSession, context_messages};
pub use self::tools::tool_definitions;
