// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::f64::consts::{PI, TAU};

use crate::common::{Bounds, Point, format_number};
use crate::models::euler::{EulerOutput, R_MAX};
use crate::models::fourier::FourierOutput;
use crate::models::gravity::GravityOutput;
use crate::models::ideal_gas::{IdealGasOutput, V_MAX, V_MIN};
use crate::models::logistic::{self, LogisticOutput};
use crate::models::normal::{self, NormalOutput};
use crate::models::predator_prey::{PredatorPreyOutput, TOTAL_TIME};
use crate::models::projectile::ProjectileOutput;
use crate::models::quadratic::{self, QuadraticOutput};
use crate::models::sine::{self, SineOutput};
use crate::render::common::{Rect, fixed, path_data};
use crate::render::scene::Scene;
use crate::render::trail::Trails;
use crate::render::viewport::{FULL_FRAME, HEIGHT, PADDING, Viewport, WIDTH};

/// Angle in degrees, for labels.
fn degrees(radians: f64) -> f64 {
    radians * 360.0 / TAU
}

const LABEL_X: f64 = PADDING + 8.0;
const LABEL_Y: f64 = PADDING - 14.0;
const MARKER_RADIUS: f64 = 5.0;

const LEFT_PANEL: Rect = Rect {
    top: PADDING,
    left: PADDING,
    right: WIDTH / 2.0 - 20.0,
    bottom: HEIGHT - PADDING,
};

const RIGHT_PANEL: Rect = Rect {
    top: PADDING,
    left: WIDTH / 2.0 + 20.0,
    right: WIDTH - PADDING,
    bottom: HEIGHT - PADDING,
};

fn axes(scene: &mut Scene, vp: &Viewport) {
    let frame = vp.frame;
    if vp.shows_x_axis() {
        let y = vp.map_y(0.0);
        scene.line("explorable-axis", (frame.left, y), (frame.right, y));
    } else {
        scene.line("explorable-axis", (frame.left, frame.bottom), (frame.right, frame.bottom));
    }
    if vp.bounds.x_min <= 0.0 && vp.bounds.x_max >= 0.0 {
        let x = vp.map_x(0.0);
        scene.line("explorable-axis", (x, frame.top), (x, frame.bottom));
    } else {
        scene.line("explorable-axis", (frame.left, frame.top), (frame.left, frame.bottom));
    }
}

fn ghosts(scene: &mut Scene, trails: Option<&mut Trails>, d: &str) {
    if let Some(trails) = trails {
        trails.observe(d);
        for ghost in trails.ghosts() {
            scene.path("explorable-ghost", ghost.to_string());
        }
    }
}

pub fn quadratic(out: &QuadraticOutput, trails: Option<&mut Trails>) -> Scene {
    let mut scene = Scene::new("quadratic");
    let vp = Viewport::new(Bounds {
        x_min: quadratic::X_MIN,
        x_max: quadratic::X_MAX,
        y_min: out.y_min,
        y_max: out.y_max,
    });
    axes(&mut scene, &vp);

    let d = path_data(vp.map_all(&out.curve));
    ghosts(&mut scene, trails, &d);
    scene.path("explorable-curve", d);

    for root in &out.roots {
        scene.circle("explorable-marker", vp.map(Point::new(*root, 0.0)), MARKER_RADIUS);
    }
    if let Some(vertex) = out.vertex {
        scene.circle("explorable-marker", vp.map(vertex), MARKER_RADIUS - 1.0);
    }

    scene.text(
        (LABEL_X, LABEL_Y),
        format!("D = {} ({})", fixed(out.discriminant, 2), out.kind.describe()),
    );
    scene
}

pub fn projectile(out: &ProjectileOutput, trails: Option<&mut Trails>) -> Scene {
    let mut scene = Scene::new("projectile");
    let vp = Viewport::new(out.bounds);
    axes(&mut scene, &vp);

    if out.is_degenerate() {
        scene.circle("explorable-marker", vp.map(Point::ORIGIN), MARKER_RADIUS);
    } else {
        let d = path_data(vp.map_all(&out.trajectory));
        ghosts(&mut scene, trails, &d);
        scene.path("explorable-curve", d);
        scene.circle("explorable-marker", vp.map(out.apex), MARKER_RADIUS);
        scene.circle(
            "explorable-marker",
            vp.map(Point::new(out.range, 0.0)),
            MARKER_RADIUS,
        );
    }

    scene.text(
        (LABEL_X, LABEL_Y),
        format!(
            "θ = {}°, range {} m, flight {} s, apex {} m",
            fixed(degrees(out.theta), 1),
            fixed(out.range, 1),
            fixed(out.flight_time, 2),
            fixed(out.apex.y, 1)
        ),
    );
    scene
}

pub fn sine(out: &SineOutput) -> Scene {
    let mut scene = Scene::new("sine");
    let extent = out.y_max.abs().max(out.y_min.abs()).max(1.0) * 1.1;
    let vp = Viewport::new(Bounds {
        x_min: sine::T_MIN,
        x_max: sine::T_MAX,
        y_min: -extent,
        y_max: extent,
    });
    axes(&mut scene, &vp);
    scene.path("explorable-curve", path_data(vp.map_all(&out.curve)));

    let label = match out.visible_period() {
        Some(period) => {
            let x = vp.map_x(period);
            scene.line("explorable-reference", (x, vp.frame.top), (x, vp.frame.bottom));
            format!("T = {}", fixed(period, 2))
        }
        None => "period exceeds window".to_string(),
    };
    scene.text((LABEL_X, LABEL_Y), label);
    scene
}

pub fn normal(out: &NormalOutput) -> Scene {
    let mut scene = Scene::new("normal");
    let vp = Viewport::new(Bounds {
        x_min: normal::X_MIN,
        x_max: normal::X_MAX,
        y_min: 0.0,
        y_max: out.y_max,
    });
    axes(&mut scene, &vp);

    let (a, b) = out.interval;
    let shaded = std::iter::once(Point::new(a, 0.0))
        .chain(out.curve.iter().copied().filter(|p| p.x >= a && p.x <= b))
        .chain(std::iter::once(Point::new(b, 0.0)))
        .map(|p| vp.map(p));
    let mut area = path_data(shaded);
    area.push_str(" Z");
    scene.path("explorable-area", area);
    scene.path("explorable-curve", path_data(vp.map_all(&out.curve)));

    let mean_x = vp.map_x(out.mu);
    scene.line(
        "explorable-reference",
        (mean_x, vp.frame.top),
        (mean_x, vp.frame.bottom),
    );
    scene.text(
        (LABEL_X, LABEL_Y),
        format!(
            "P({} ≤ X ≤ {}) = {}",
            format_number(a),
            format_number(b),
            fixed(out.interval_probability, 3)
        ),
    );
    scene
}

pub fn ideal_gas(out: &IdealGasOutput) -> Scene {
    let mut scene = Scene::new("ideal-gas");

    // cylinder with a piston on the left
    let cylinder = LEFT_PANEL;
    scene.rect(
        "explorable-axis",
        cylinder.left,
        cylinder.top,
        cylinder.width(),
        cylinder.height(),
    );
    let gas_width = 20.0 + out.piston_ratio * (cylinder.width() - 30.0);
    scene.filled_rect(
        cylinder.left,
        cylinder.top,
        gas_width,
        cylinder.height(),
        format!("hsl({}, 70%, 60%)", fixed(out.hue, 1)),
    );
    let piston_x = cylinder.left + gas_width;
    scene.line(
        "explorable-curve",
        (piston_x, cylinder.top),
        (piston_x, cylinder.bottom),
    );

    // pressure gauge, needle sweeping a half circle
    let (gx, gy) = (cylinder.right - 50.0, cylinder.top + 50.0);
    let radius = 36.0;
    scene.circle("explorable-axis", (gx, gy), radius);
    let angle = PI * (1.0 - out.gauge_ratio);
    scene.line(
        "explorable-secondary",
        (gx, gy),
        (gx + radius * angle.cos(), gy - radius * angle.sin()),
    );

    // isotherm on the right
    let p_max = out.isotherm.iter().map(|p| p.y).fold(1.0, f64::max) * 1.1;
    let vp = Viewport::with_frame(
        Bounds {
            x_min: V_MIN,
            x_max: V_MAX,
            y_min: 0.0,
            y_max: p_max,
        },
        RIGHT_PANEL,
    );
    axes(&mut scene, &vp);
    scene.path("explorable-curve", path_data(vp.map_all(&out.isotherm)));
    scene.circle("explorable-marker", vp.map(out.state), MARKER_RADIUS);

    scene.text(
        (LABEL_X, LABEL_Y),
        format!(
            "P = {} kPa at V = {} L, T = {} K, n = {}",
            fixed(out.pressure, 1),
            fixed(out.volume, 2),
            fixed(out.temperature, 0),
            fixed(out.moles, 2)
        ),
    );
    scene
}

pub fn fourier(out: &FourierOutput) -> Scene {
    let mut scene = Scene::new("fourier-square");
    let vp = Viewport::new(Bounds {
        x_min: 0.0,
        x_max: 1.0,
        y_min: -1.5,
        y_max: 1.5,
    });
    axes(&mut scene, &vp);
    scene.path("explorable-reference", path_data(vp.map_all(&out.target)));
    scene.path("explorable-curve", path_data(vp.map_all(&out.partial_sum)));
    scene.text(
        (LABEL_X, LABEL_Y),
        format!(
            "N = {}, overshoot {}, undershoot {}",
            out.terms,
            fixed(out.overshoot, 3),
            fixed(out.undershoot, 3)
        ),
    );
    scene
}

pub fn euler(out: &EulerOutput) -> Scene {
    let mut scene = Scene::new("euler-complex");
    // square frame so the circle stays round
    let side = FULL_FRAME.height();
    let (cx, _) = FULL_FRAME.centre();
    let frame = Rect {
        top: FULL_FRAME.top,
        left: cx - side / 2.0,
        right: cx + side / 2.0,
        bottom: FULL_FRAME.bottom,
    };
    let extent = R_MAX * 1.1;
    let vp = Viewport::with_frame(
        Bounds {
            x_min: -extent,
            x_max: extent,
            y_min: -extent,
            y_max: extent,
        },
        frame,
    );
    axes(&mut scene, &vp);

    let origin = vp.map(Point::ORIGIN);
    let unit_radius = vp.map_x(1.0) - origin.0;
    scene.circle("explorable-reference", origin, unit_radius);

    let tip = vp.map(out.point);
    scene.line("explorable-reference", tip, vp.map(out.real_projection));
    scene.line("explorable-reference", tip, vp.map(out.imaginary_projection));
    scene.line("explorable-curve", origin, tip);

    // angle marker from the positive real axis
    let arc_radius = 24.0;
    let start = (origin.0 + arc_radius, origin.1);
    let end = (
        origin.0 + arc_radius * out.theta.cos(),
        origin.1 - arc_radius * out.theta.sin(),
    );
    let sweep = if out.counter_clockwise { 0 } else { 1 };
    scene.path(
        "explorable-secondary",
        format!(
            "M {} {} A {} {} 0 0 {} {} {}",
            fixed(start.0, 2),
            fixed(start.1, 2),
            arc_radius,
            arc_radius,
            sweep,
            fixed(end.0, 2),
            fixed(end.1, 2)
        ),
    );

    scene.circle("explorable-marker", vp.map(out.unit_point), MARKER_RADIUS - 2.0);
    scene.circle("explorable-marker", tip, MARKER_RADIUS);

    let sign = if out.point.y < 0.0 { "-" } else { "+" };
    scene.text(
        (LABEL_X, LABEL_Y),
        format!(
            "{}·e^(i·{}) = {} {} {}i",
            fixed(out.r, 2),
            fixed(out.theta, 2),
            fixed(out.point.x, 3),
            sign,
            fixed(out.point.y.abs(), 3)
        ),
    );
    scene
}

pub fn gravity(out: &GravityOutput) -> Scene {
    let mut scene = Scene::new("gravity");
    let (cx, cy) = FULL_FRAME.centre();

    let closest = out.radius1 + out.radius2 + 2.0 * out.arrow_length.min(20.0);
    let widest = FULL_FRAME.width() - out.radius1 - out.radius2;
    let t = (out.r - 1.0) / 99.0;
    let separation = closest + (widest - closest).max(0.0) * t.clamp(0.0, 1.0);

    let left = (cx - separation / 2.0, cy);
    let right = (cx + separation / 2.0, cy);
    scene.line("explorable-reference", left, right);
    scene.circle("explorable-marker", left, out.radius1);
    scene.circle("explorable-marker", right, out.radius2);

    // equal and opposite pulls
    scene.line(
        "explorable-secondary",
        (left.0 + out.radius1, cy),
        (left.0 + out.radius1 + out.arrow_length, cy),
    );
    scene.line(
        "explorable-secondary",
        (right.0 - out.radius2, cy),
        (right.0 - out.radius2 - out.arrow_length, cy),
    );

    scene.text(
        (LABEL_X, LABEL_Y),
        format!(
            "F = {} (m1 = {}, m2 = {}, r = {})",
            fixed(out.force, 3),
            format_number(out.m1),
            format_number(out.m2),
            format_number(out.r)
        ),
    );
    scene
}

pub fn predator_prey(out: &PredatorPreyOutput) -> Scene {
    let mut scene = Scene::new("predator-prey");
    let y_max = out.y_max() * 1.1;

    let series = Viewport::with_frame(
        Bounds {
            x_min: 0.0,
            x_max: TOTAL_TIME,
            y_min: 0.0,
            y_max,
        },
        LEFT_PANEL,
    );
    axes(&mut scene, &series);
    scene.path("explorable-curve", path_data(series.map_all(&out.prey)));
    scene.path(
        "explorable-secondary",
        path_data(series.map_all(&out.predators)),
    );

    let phase = Viewport::with_frame(
        Bounds {
            x_min: 0.0,
            x_max: out.max_prey.max(1.0) * 1.1,
            y_min: 0.0,
            y_max: out.max_predators.max(1.0) * 1.1,
        },
        RIGHT_PANEL,
    );
    axes(&mut scene, &phase);
    scene.path("explorable-curve", path_data(phase.map_all(&out.phase)));
    if let Some(start) = out.phase.first() {
        scene.circle("explorable-marker", phase.map(*start), MARKER_RADIUS - 1.0);
    }

    scene.text(
        (LABEL_X, LABEL_Y),
        format!(
            "max prey {}, max predators {}",
            fixed(out.max_prey, 2),
            fixed(out.max_predators, 2)
        ),
    );
    scene
}

pub fn logistic(out: &LogisticOutput) -> Scene {
    let mut scene = Scene::new("logistic-map");

    let diagram = Viewport::with_frame(
        Bounds {
            x_min: logistic::R_MIN,
            x_max: logistic::R_MAX,
            y_min: 0.0,
            y_max: 1.0,
        },
        LEFT_PANEL,
    );
    axes(&mut scene, &diagram);
    let mut dots = String::new();
    for (i, (x, y)) in diagram.map_all(out.bifurcation).enumerate() {
        if i > 0 {
            dots.push(' ');
        }
        dots.push_str(&format!("M {} {} h 1", fixed(x, 1), fixed(y, 1)));
    }
    scene.path("explorable-dots", dots);
    let r_x = diagram.map_x(out.r);
    scene.line(
        "explorable-secondary",
        (r_x, diagram.frame.top),
        (r_x, diagram.frame.bottom),
    );

    let first = out.iterates.first().map(|p| p.x).unwrap_or(0.0);
    let last = out.iterates.last().map(|p| p.x).unwrap_or(1.0);
    let iterates = Viewport::with_frame(
        Bounds {
            x_min: first,
            x_max: last,
            y_min: 0.0,
            y_max: 1.0,
        },
        RIGHT_PANEL,
    );
    axes(&mut scene, &iterates);
    scene.path("explorable-curve", path_data(iterates.map_all(&out.iterates)));

    // the map itself, drawn in the same panel against x
    let parabola = Viewport::with_frame(
        Bounds {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        },
        RIGHT_PANEL,
    );
    scene.path(
        "explorable-reference",
        path_data(parabola.map_all(&out.parabola)),
    );

    scene.text(
        (LABEL_X, LABEL_Y),
        format!("r = {}, x0 = {}", fixed(out.r, 2), fixed(out.x0, 2)),
    );
    scene
}

