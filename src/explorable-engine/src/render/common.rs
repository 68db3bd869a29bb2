// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::common::format_number;

/// A pixel-space rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn centre(&self) -> (f64, f64) {
        ((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }
}

fn escape_xml(s: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' if in_attribute => "&quot;",
            _ => {
                out.push(c);
                continue;
            }
        };
        out.push_str(entity);
    }
    out
}

/// Escapes element text; quotes pass through.
pub fn escape_xml_text(s: &str) -> String {
    escape_xml(s, false)
}

/// Escapes a double-quoted attribute value.
pub fn escape_xml_attr(s: &str) -> String {
    escape_xml(s, true)
}

/// Pixel coordinate rounded to two decimals and formatted like JS.
pub fn px(n: f64) -> String {
    let rounded = (n * 100.0).round() / 100.0;
    // avoid "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format_number(rounded)
}

/// Value label with at most `digits` decimals, trailing zeros trimmed.
pub fn fixed(n: f64, digits: usize) -> String {
    let s = format!("{:.*}", digits, n);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" { "0".to_string() } else { s }
}

/// Polyline path data, `M x y L x y ...`.  Empty for no points.
pub fn path_data(points: impl IntoIterator<Item = (f64, f64)>) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.into_iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        d.push_str(if i == 0 { "M " } else { "L " });
        d.push_str(&px(x));
        d.push(' ');
        d.push_str(&px(y));
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!("a &amp; b &lt;c&gt;", escape_xml_text("a & b <c>"));
        assert_eq!("say &quot;hi&quot;", escape_xml_attr("say \"hi\""));
        assert_eq!("plain", escape_xml_attr("plain"));
        assert_eq!("x = \"1\" &amp; y", escape_xml_text("x = \"1\" & y"));
    }

    #[test]
    fn test_px() {
        assert_eq!("12", px(12.0));
        assert_eq!("12.35", px(12.345_6));
        assert_eq!("0", px(-0.001));
        assert_eq!("-3.5", px(-3.5));
    }

    #[test]
    fn test_fixed() {
        assert_eq!("0.683", fixed(0.682_689, 3));
        assert_eq!("2", fixed(2.0, 2));
        assert_eq!("0", fixed(-0.0001, 2));
        assert_eq!("1.5", fixed(1.5, 3));
    }

    #[test]
    fn test_path_data() {
        assert_eq!("", path_data(std::iter::empty()));
        assert_eq!("M 0 1", path_data([(0.0, 1.0)]));
        assert_eq!("M 0 1 L 2.5 3", path_data([(0.0, 1.0), (2.5, 3.0)]));
    }
}
