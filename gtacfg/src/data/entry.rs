use serde::{Deserialize, Serialize};

use crate::data::value::{SettingValue, ValueKind, format_number};

/// One setting in a flattened document.
///
/// Serializes to `{ "value", "kind", "readonly"?, "originalValue"? }`, the
/// shape exchanged with presentation code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawEntry", try_from = "RawEntry")]
pub struct FlatEntry {
    /// Current value; its variant is the entry kind.
    pub value: SettingValue,
    /// Set only for specially handled nodes such as the hardware description.
    pub readonly: bool,
    /// Value at flatten time. Never consulted when writing the document back.
    pub original_value: Option<SettingValue>,
}

impl FlatEntry {
    /// Entry for a value read from the document, snapshotting the original.
    pub fn new(value: SettingValue) -> Self {
        Self {
            original_value: Some(value.clone()),
            value,
            readonly: false,
        }
    }

    /// Read-only text entry.
    pub fn readonly_text(text: impl Into<String>) -> Self {
        Self {
            readonly: true,
            ..Self::new(SettingValue::Text(text.into()))
        }
    }

    /// Structural entry without a value or snapshot.
    pub fn container() -> Self {
        Self {
            value: SettingValue::Container,
            readonly: false,
            original_value: None,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn is_container(&self) -> bool {
        self.value.is_container()
    }

    /// Whether the value differs from the snapshot taken at flatten time.
    pub fn is_modified(&self) -> bool {
        match &self.original_value {
            Some(original) => *original != self.value,
            None => false,
        }
    }
}

/// Loosely typed value as it appears in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<SettingValue> for Scalar {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::Bool(b) => Scalar::Bool(b),
            SettingValue::Number(n) if n.is_finite() => Scalar::Number(n),
            // JSON has no infinities
            SettingValue::Number(n) => Scalar::Text(format_number(n)),
            SettingValue::Text(s) => Scalar::Text(s),
            SettingValue::Container => Scalar::Text(String::new()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    value: Scalar,
    kind: ValueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_value: Option<Scalar>,
}

impl From<FlatEntry> for RawEntry {
    fn from(entry: FlatEntry) -> Self {
        RawEntry {
            kind: entry.kind(),
            value: entry.value.into(),
            readonly: entry.readonly.then_some(true),
            original_value: entry.original_value.map(Scalar::from),
        }
    }
}

fn typed(kind: ValueKind, scalar: Scalar) -> Result<SettingValue, String> {
    match (kind, scalar) {
        (ValueKind::Boolean, Scalar::Bool(b)) => Ok(SettingValue::Bool(b)),
        (ValueKind::Number, Scalar::Number(n)) => Ok(SettingValue::Number(n)),
        (ValueKind::Number, Scalar::Text(s)) => match s.as_str() {
            "Infinity" => Ok(SettingValue::Number(f64::INFINITY)),
            "-Infinity" => Ok(SettingValue::Number(f64::NEG_INFINITY)),
            "NaN" => Ok(SettingValue::Number(f64::NAN)),
            _ => Err(format!("value {s:?} does not match kind `number`")),
        },
        (ValueKind::String, Scalar::Text(s)) => Ok(SettingValue::Text(s)),
        (ValueKind::Container, _) => Ok(SettingValue::Container),
        (kind, other) => Err(format!("value {other:?} does not match kind `{kind}`")),
    }
}

impl TryFrom<RawEntry> for FlatEntry {
    type Error = String;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let value = typed(raw.kind, raw.value)?;
        let original_value = raw
            .original_value
            .map(|original| typed(raw.kind, original))
            .transpose()?;
        Ok(FlatEntry {
            value,
            readonly: raw.readonly.unwrap_or(false),
            original_value,
        })
    }
}
