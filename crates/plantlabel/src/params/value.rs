//! Typed renderer parameter values and their literal syntax.

use serde::{Deserialize, Serialize};

use crate::validation::{parse_flag, parse_integer};

/// Type of a renderer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Bool,
    Integer,
    Number,
    Text,
}

impl ParamKind {
    pub fn label(&self) -> &'static str {
        match self {
            ParamKind::Bool => "boolean",
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Text => "text",
        }
    }
}

/// A single renderer parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Integer(_) => ParamKind::Integer,
            ParamValue::Number(_) => ParamKind::Number,
            ParamValue::Text(_) => ParamKind::Text,
        }
    }

    /// Parse command-line text as a value of the given kind.
    pub fn parse_as(kind: ParamKind, raw: &str) -> Option<ParamValue> {
        match kind {
            ParamKind::Bool => parse_flag(raw).map(ParamValue::Bool),
            ParamKind::Integer => parse_integer(raw).map(ParamValue::Integer),
            ParamKind::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(ParamValue::Number),
            ParamKind::Text => Some(ParamValue::Text(raw.to_string())),
        }
    }

    /// Convert to the given kind where that loses nothing.
    ///
    /// Integers widen to numbers, whole numbers narrow to integers, and text
    /// is parsed with [`ParamValue::parse_as`].
    pub fn coerce(self, kind: ParamKind) -> Option<ParamValue> {
        if self.kind() == kind {
            return Some(self);
        }
        match (self, kind) {
            (ParamValue::Integer(n), ParamKind::Number) => Some(ParamValue::Number(n as f64)),
            (ParamValue::Number(n), ParamKind::Integer) if n.fract() == 0.0 && n.is_finite() => {
                Some(ParamValue::Integer(n as i64))
            }
            (ParamValue::Text(s), kind) => ParamValue::parse_as(kind, &s),
            _ => None,
        }
    }

    /// Render the value in the renderer's typed-parameter syntax.
    pub fn to_literal(&self) -> String {
        match self {
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Integer(n) => n.to_string(),
            ParamValue::Number(n) => format_number(*n),
            ParamValue::Text(s) => quote_text(s),
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Whole numbers keep one decimal so `80.0` stays `80.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}

fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
