// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::VecDeque;

/// Previous paths kept as ghosts behind the live curve.
pub const TRAIL_CAPACITY: usize = 2;

/// Faded copies of the last few distinct paths a renderer drew.
///
/// This is the only state a renderer carries between frames, and it never
/// grows past `TRAIL_CAPACITY`.
#[derive(Clone, Debug, Default)]
pub struct Trails {
    current: Option<String>,
    ghosts: VecDeque<String>,
}

impl Trails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the path about to be drawn.  When it differs from the last
    /// one, the last one becomes the newest ghost.
    pub fn observe(&mut self, path: &str) {
        if path.is_empty() || self.current.as_deref() == Some(path) {
            return;
        }
        if let Some(prev) = self.current.replace(path.to_string()) {
            self.ghosts.push_front(prev);
            self.ghosts.truncate(TRAIL_CAPACITY);
        }
    }

    /// Ghost paths, newest first.
    pub fn ghosts(&self) -> impl ExactSizeIterator<Item = &str> {
        self.ghosts.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.ghosts.clear();
    }
}
