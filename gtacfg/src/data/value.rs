use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Kind tag of a flat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Boolean,
    Number,
    String,
    /// Structural node without a value of its own.
    Container,
}

impl ValueKind {
    /// Name used in the interchange shape and in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Container => "container",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a flat entry.
///
/// The payload always agrees with the kind: [`SettingValue::kind`] is derived
/// from the variant, so a boolean can never be stored under a number kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Marker for structural nodes. Serializes as an empty string.
    Container,
}

impl SettingValue {
    /// Infer a typed value from a raw attribute string.
    ///
    /// `"true"`/`"false"` become booleans, anything that reads fully as a
    /// number becomes a number and everything else stays a string. The order
    /// of the checks is significant.
    pub fn infer(raw: &str) -> Self {
        match raw {
            "true" => SettingValue::Bool(true),
            "false" => SettingValue::Bool(false),
            _ => match parse_number(raw) {
                Some(n) => SettingValue::Number(n),
                None => SettingValue::Text(raw.to_string()),
            },
        }
    }

    /// Parse user input for an entry of the given kind.
    ///
    /// Returns `None` when the input cannot represent that kind.
    pub fn parse_as(kind: ValueKind, raw: &str) -> Option<Self> {
        match kind {
            ValueKind::Boolean => match raw.trim() {
                "true" => Some(SettingValue::Bool(true)),
                "false" => Some(SettingValue::Bool(false)),
                _ => None,
            },
            ValueKind::Number => parse_number(raw).map(SettingValue::Number),
            ValueKind::String => Some(SettingValue::Text(raw.to_string())),
            ValueKind::Container => None,
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            SettingValue::Bool(_) => ValueKind::Boolean,
            SettingValue::Number(_) => ValueKind::Number,
            SettingValue::Text(_) => ValueKind::String,
            SettingValue::Container => ValueKind::Container,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, SettingValue::Container)
    }
}

/// The string written back into the document: `true`/`false` for booleans,
/// the shortest round-tripping decimal for numbers, text as-is.
impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            SettingValue::Number(n) => f.write_str(&format_number(*n)),
            SettingValue::Text(s) => f.write_str(s),
            SettingValue::Container => Ok(()),
        }
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SettingValue::Bool(b) => serializer.serialize_bool(*b),
            SettingValue::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            SettingValue::Number(n) => serializer.serialize_str(&format_number(*n)),
            SettingValue::Text(s) => serializer.serialize_str(s),
            SettingValue::Container => serializer.serialize_str(""),
        }
    }
}

/// Read a string as a number the way a lenient scripting runtime would:
/// surrounding whitespace is ignored, `0x`/`0o`/`0b` prefixes and a signed
/// `Infinity` are accepted, and blank input is not a number.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'+' => (1.0, &s[1..]),
        b'-' => (-1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    if let Some(n) = parse_radix_literal(s) {
        return Some(n);
    }

    // Rejects the `inf`/`nan` spellings that `f64::from_str` would accept.
    if !unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    s[2..].chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Format a number for the document.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if n == 0.0 {
        // also covers -0
        "0".to_string()
    } else {
        n.to_string()
    }
}
