// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::Serialize;

use crate::common::{Bounds, Point, Values};
use crate::models::{Derived, Numbers, input, visit_points};

pub const DEFAULT_GRAVITY: f64 = 9.81;
const TRAJECTORY_SEGMENTS: usize = 200;
const MAX_SPEED: f64 = 1e4;
const MIN_GRAVITY: f64 = 0.01;
const MAX_GRAVITY: f64 = 1e4;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectileOutput {
    pub v0: f64,
    pub theta: f64,
    pub g: f64,
    pub flight_time: f64,
    pub range: f64,
    pub apex: Point,
    /// A single point at the origin when the launch never leaves the ground.
    pub trajectory: Vec<Point>,
    pub bounds: Bounds,
}

impl ProjectileOutput {
    pub fn is_degenerate(&self) -> bool {
        self.trajectory.len() == 1
    }
}

impl Numbers for ProjectileOutput {
    fn visit_numbers(&self, f: &mut dyn FnMut(f64)) {
        for n in [
            self.v0,
            self.theta,
            self.g,
            self.flight_time,
            self.range,
            self.apex.x,
            self.apex.y,
            self.bounds.x_min,
            self.bounds.x_max,
            self.bounds.y_min,
            self.bounds.y_max,
        ] {
            f(n);
        }
        visit_points(&self.trajectory, f);
    }
}

pub fn evaluate(values: &Values) -> Derived {
    let v0 = input(values, "v0", 50.0).clamp(0.0, MAX_SPEED);
    let theta = input(values, "theta", 0.785);
    let g = input(values, "g", DEFAULT_GRAVITY);
    let g = (if g > 0.0 { g } else { DEFAULT_GRAVITY }).clamp(MIN_GRAVITY, MAX_GRAVITY);

    let vx = v0 * theta.cos();
    let vy = v0 * theta.sin();

    let raw_t = 2.0 * vy / g;
    let mut flight_time = if raw_t.is_finite() && raw_t > 0.0 { raw_t } else { 0.0 };
    let raw_range = vx * flight_time;
    let range = if raw_range.is_finite() && raw_range > 0.0 {
        raw_range
    } else {
        0.0
    };
    if range == 0.0 {
        flight_time = 0.0;
    }

    let apex_t = flight_time / 2.0;
    let apex = Point::new(vx.max(0.0) * apex_t, vy * apex_t - 0.5 * g * apex_t * apex_t);

    let trajectory = if flight_time > 0.0 {
        let mut points: Vec<Point> = (0..TRAJECTORY_SEGMENTS)
            .map(|i| {
                let t = flight_time * i as f64 / TRAJECTORY_SEGMENTS as f64;
                Point::new(vx * t, vy * t - 0.5 * g * t * t)
            })
            .collect();
        points.push(Point::new(range, 0.0));
        points
    } else {
        vec![Point::ORIGIN]
    };

    let bounds = Bounds {
        x_min: 0.0,
        x_max: (range * 1.1).max(10.0),
        y_min: -1.0,
        y_max: (apex.y * 1.2).max(10.0),
    };

    Derived::Projectile(ProjectileOutput {
        v0,
        theta,
        g,
        flight_time,
        range,
        apex,
        trajectory,
        bounds,
    })
}
