// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::Serialize;

use crate::render::common::{escape_xml_attr, escape_xml_text, px};
use crate::render::viewport::{HEIGHT, WIDTH};

const RENDER_STYLES: &str = r#"
.explorable-canvas text {
  fill: #1f2937;
  font-size: 12px;
  font-family: "Inter", "Helvetica Neue", "Arial", sans-serif;
}

.explorable-axis {
  stroke-width: 1px;
  stroke: #9ca3af;
  fill: none;
}

.explorable-curve {
  stroke-width: 2.5px;
  stroke: #2563eb;
  fill: none;
}

.explorable-secondary {
  stroke-width: 2px;
  stroke: #dc2626;
  fill: none;
}

.explorable-reference {
  stroke-width: 1px;
  stroke: #6b7280;
  stroke-dasharray: 4px;
  fill: none;
}

.explorable-ghost {
  stroke-width: 2px;
  stroke: #2563eb;
  opacity: 0.2;
  fill: none;
}

.explorable-marker {
  stroke-width: 1px;
  stroke: #111827;
  fill: #f59e0b;
}

.explorable-area {
  stroke: none;
  fill: #93c5fd;
  opacity: 0.5;
}

.explorable-dots {
  stroke-width: 1px;
  stroke: #4b5563;
  opacity: 0.6;
  fill: none;
}
"#;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Element {
    Path {
        class: &'static str,
        d: String,
    },
    Line {
        class: &'static str,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Circle {
        class: &'static str,
        cx: f64,
        cy: f64,
        r: f64,
    },
    Rect {
        class: &'static str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<String>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
    },
}

impl Element {
    fn numbers(&self) -> Vec<f64> {
        match self {
            Element::Path { .. } => vec![],
            Element::Line { x1, y1, x2, y2, .. } => vec![*x1, *y1, *x2, *y2],
            Element::Circle { cx, cy, r, .. } => vec![*cx, *cy, *r],
            Element::Rect {
                x,
                y,
                width,
                height,
                ..
            } => vec![*x, *y, *width, *height],
            Element::Text { x, y, .. } => vec![*x, *y],
        }
    }

    fn to_svg(&self) -> String {
        match self {
            Element::Path { class, d } => {
                format!("<path class=\"{}\" d=\"{}\"></path>", class, escape_xml_attr(d))
            }
            Element::Line {
                class,
                x1,
                y1,
                x2,
                y2,
            } => format!(
                "<line class=\"{}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"></line>",
                class,
                px(*x1),
                px(*y1),
                px(*x2),
                px(*y2)
            ),
            Element::Circle { class, cx, cy, r } => format!(
                "<circle class=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\"></circle>",
                class,
                px(*cx),
                px(*cy),
                px(*r)
            ),
            Element::Rect {
                class,
                x,
                y,
                width,
                height,
                fill,
            } => {
                let style = match fill {
                    Some(fill) => format!(" style=\"fill: {}\"", escape_xml_attr(fill)),
                    None => String::new(),
                };
                format!(
                    "<rect class=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}></rect>",
                    class,
                    px(*x),
                    px(*y),
                    px(width.max(0.0)),
                    px(height.max(0.0)),
                    style
                )
            }
            Element::Text { x, y, text } => format!(
                "<text x=\"{}\" y=\"{}\">{}</text>",
                px(*x),
                px(*y),
                escape_xml_text(text)
            ),
        }
    }
}

/// Drawable primitives for one frame of one formula, in paint order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub formula_id: &'static str,
    pub width: f64,
    pub height: f64,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(formula_id: &'static str) -> Self {
        Scene {
            formula_id,
            width: WIDTH,
            height: HEIGHT,
            elements: Vec::new(),
        }
    }

    pub fn path(&mut self, class: &'static str, d: String) {
        if !d.is_empty() {
            self.elements.push(Element::Path { class, d });
        }
    }

    pub fn line(&mut self, class: &'static str, from: (f64, f64), to: (f64, f64)) {
        self.elements.push(Element::Line {
            class,
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
        });
    }

    pub fn circle(&mut self, class: &'static str, at: (f64, f64), r: f64) {
        self.elements.push(Element::Circle {
            class,
            cx: at.0,
            cy: at.1,
            r,
        });
    }

    pub fn rect(&mut self, class: &'static str, x: f64, y: f64, width: f64, height: f64) {
        self.elements.push(Element::Rect {
            class,
            x,
            y,
            width,
            height,
            fill: None,
        });
    }

    pub fn filled_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: String) {
        self.elements.push(Element::Rect {
            class: "explorable-area",
            x,
            y,
            width,
            height,
            fill: Some(fill),
        });
    }

    pub fn text(&mut self, at: (f64, f64), text: impl Into<String>) {
        self.elements.push(Element::Text {
            x: at.0,
            y: at.1,
            text: text.into(),
        });
    }

    /// Every coordinate in the scene is finite and path data holds no
    /// `NaN`/`Infinity` tokens.
    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(|el| match el {
            Element::Path { d, .. } => !d.contains("NaN") && !d.contains("Infinity"),
            _ => el.numbers().iter().all(|n| n.is_finite()),
        })
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" class=\"explorable-canvas\" data-formula=\"{}\">",
            px(self.width),
            px(self.height),
            px(self.width),
            px(self.height),
            escape_xml_attr(self.formula_id)
        ));
        svg.push_str("<style>\n");
        svg.push_str(RENDER_STYLES);
        svg.push_str("\n</style>\n");
        svg.push_str("<g>");
        for el in &self.elements {
            svg.push_str(&el.to_svg());
        }
        svg.push_str("</g>");
        svg.push_str("</svg>");
        svg
    }
}
