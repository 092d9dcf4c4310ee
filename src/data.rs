//! Cell values and the coercions applied to them.
//!
//! Cells follow the loose typing of the import pipeline: a [`Value`] is null, a
//! boolean, a number or a string, and an absent key in a record stands for an
//! undefined cell. The coercion helpers here mirror how the dashboard front end
//! converts values (`Number(..)` / `String(..)` semantics), so that edits and
//! chart aggregation agree on what a cell means.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// String form of the value, as a cell would be rendered or exported.
    pub fn to_display(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Boolean(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Number(n) => Cow::Owned(format_number(*n)),
            Value::String(s) => Cow::Borrowed(s),
        }
    }

    /// Numeric reading of the value. `None` stands for not-a-number.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Null => Some(0.0),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) if n.is_nan() => None,
            Value::Number(n) => Some(*n),
            Value::String(s) => parse_number(s),
        }
    }

    /// True only for the literal string `"true"`, the boolean `true` and the number `1`.
    pub fn is_truthy_literal(&self) -> bool {
        match self {
            Value::String(s) => s == "true",
            Value::Boolean(b) => *b,
            Value::Number(n) => *n == 1.0,
            Value::Null => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

/// Shortest round-trip text for a number. Magnitudes of 1e21 and above or
/// below 1e-6 use exponent form with an explicit sign (`1e+21`, `1e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let label = if value > 0.0 { "Infinity" } else { "-Infinity" };
        label.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let exp = format!("{value:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        value.to_string()
    }
}

/// Parses numeric text leniently: blank is 0, surrounding whitespace is ignored,
/// and `0x`/`0o`/`0b` prefixes and `Infinity` are accepted.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if trimmed
            .get(..2)
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        {
            return u64::from_str_radix(&trimmed[2..], radix)
                .ok()
                .map(|parsed| parsed as f64);
        }
    }
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Stable string encoding of a composite key. Absent cells encode as `null`.
pub fn canonical_key(values: &[Option<&Value>]) -> String {
    serde_json::to_string(values).unwrap_or_default()
}

pub fn normalize_column_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => c,
            _ => '_',
        })
        .collect::<String>()
        .to_ascii_lowercase()
}
