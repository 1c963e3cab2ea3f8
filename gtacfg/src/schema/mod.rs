//! Presentation schema for known settings.
//!
//! The registry maps dotted paths to a label and a control description. It
//! only drives presentation and edit validation; flattening and rehydration
//! never consult it.

use crate::{
    data::value::{SettingValue, ValueKind},
    error::EditError,
};

/// Static table of known settings and section names.
pub mod registry;

/// Grouping and control resolution for a flat model.
pub mod present;

pub use present::{Presentation, control_for, group_settings, humanize};
pub use registry::{definitions, lookup, section_for};

/// How a known setting is presented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingDefinition {
    /// Human-readable label.
    pub label: &'static str,
    /// Control kind and its parameters.
    pub control: Control,
    /// Shown, but never editable.
    pub readonly: bool,
}

/// Control kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    /// Bounded numeric value.
    Slider { min: f64, max: f64, step: f64 },
    /// One of a fixed list of raw option strings, each with an optional
    /// display label at the same index.
    Select {
        options: &'static [&'static str],
        labels: Option<&'static [&'static str]>,
    },
    /// Boolean toggle.
    Switch,
    /// Free-form entry.
    Input { numeric: bool },
    /// Plain value display.
    Text,
}

impl Control {
    pub fn name(&self) -> &'static str {
        match self {
            Control::Slider { .. } => "slider",
            Control::Select { .. } => "select",
            Control::Switch => "switch",
            Control::Input { .. } => "input",
            Control::Text => "text",
        }
    }
}

impl SettingDefinition {
    pub const fn slider(label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self::new(label, Control::Slider { min, max, step })
    }

    pub const fn select(label: &'static str, options: &'static [&'static str]) -> Self {
        Self::new(
            label,
            Control::Select {
                options,
                labels: None,
            },
        )
    }

    pub const fn select_labeled(
        label: &'static str,
        options: &'static [&'static str],
        labels: &'static [&'static str],
    ) -> Self {
        Self::new(
            label,
            Control::Select {
                options,
                labels: Some(labels),
            },
        )
    }

    pub const fn switch(label: &'static str) -> Self {
        Self::new(label, Control::Switch)
    }

    pub const fn number_input(label: &'static str) -> Self {
        Self::new(label, Control::Input { numeric: true })
    }

    pub const fn text(label: &'static str) -> Self {
        Self::new(label, Control::Text)
    }

    /// Mark as read-only.
    pub const fn readonly(self) -> Self {
        Self {
            readonly: true,
            ..self
        }
    }

    const fn new(label: &'static str, control: Control) -> Self {
        Self {
            label,
            control,
            readonly: false,
        }
    }

    /// Whether the presentation layer may offer an editable control.
    pub fn is_editable(&self) -> bool {
        !self.readonly && !matches!(self.control, Control::Text)
    }

    /// Validate an edit of `path` against this definition.
    pub fn check(&self, path: &str, value: &SettingValue) -> Result<(), EditError> {
        if !self.is_editable() {
            return Err(EditError::ReadOnly {
                path: path.to_string(),
            });
        }

        let mismatch = |expected: &str| EditError::TypeMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: format!("{} `{}`", value.kind(), value),
        };

        match self.control {
            Control::Switch => match value {
                SettingValue::Bool(_) => Ok(()),
                SettingValue::Number(n) if *n == 0.0 || *n == 1.0 => Ok(()),
                _ => Err(mismatch("boolean")),
            },
            Control::Slider { min, max, .. } => {
                let n = value.as_number().ok_or_else(|| mismatch("number"))?;
                if n < min || n > max {
                    return Err(EditError::OutOfRange {
                        path: path.to_string(),
                        value: n,
                        min,
                        max,
                    });
                }
                Ok(())
            }
            Control::Select { options, .. } => {
                let raw = value.to_string();
                if options.contains(&raw.as_str()) {
                    Ok(())
                } else {
                    Err(EditError::InvalidOption {
                        path: path.to_string(),
                        value: raw,
                        options: options.iter().map(|o| o.to_string()).collect(),
                    })
                }
            }
            Control::Input { numeric: true } => {
                value.as_number().map(drop).ok_or_else(|| mismatch("number"))
            }
            Control::Input { numeric: false } | Control::Text => Ok(()),
        }
    }

    /// Fit `value` to an entry of `kind`.
    ///
    /// Some files store switches as `0`/`1`; a boolean edit of such an entry
    /// becomes the matching number.
    pub fn coerce(&self, kind: ValueKind, value: SettingValue) -> SettingValue {
        match (self.control, kind, value) {
            (Control::Switch, ValueKind::Number, SettingValue::Bool(b)) => {
                SettingValue::Number(if b { 1.0 } else { 0.0 })
            }
            (_, _, value) => value,
        }
    }

    /// Display form of `value` for this control.
    ///
    /// Sliders show as many decimals as their step, selects show the label
    /// of the matching option.
    pub fn format_value(&self, value: &SettingValue) -> String {
        match (self.control, value) {
            (Control::Slider { step, .. }, SettingValue::Number(n)) => {
                format!("{:.*}", step_decimals(step), n)
            }
            (Control::Select { options, labels }, _) => {
                let raw = value.to_string();
                options
                    .iter()
                    .position(|o| *o == raw)
                    .and_then(|idx| labels.and_then(|l| l.get(idx)))
                    .map_or(raw, |label| label.to_string())
            }
            _ => value.to_string(),
        }
    }
}

fn step_decimals(step: f64) -> usize {
    let s = crate::data::value::format_number(step);
    s.split_once('.').map_or(0, |(_, frac)| frac.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_switch() {
        let def = SettingDefinition::switch("Depth of Field");
        assert!(def.check("graphics.DoF", &SettingValue::Bool(true)).is_ok());
        assert!(def.check("graphics.DoF", &SettingValue::Number(0.0)).is_ok());
        assert!(matches!(
            def.check("graphics.DoF", &SettingValue::Number(2.0)),
            Err(EditError::TypeMismatch { .. })
        ));
        assert!(matches!(
            def.check("graphics.DoF", &SettingValue::Text("on".into())),
            Err(EditError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_coerce_switch_on_number() {
        let def = SettingDefinition::switch("Pause On Focus Loss");
        assert_eq!(
            def.coerce(ValueKind::Number, SettingValue::Bool(false)),
            SettingValue::Number(0.0)
        );
        assert_eq!(
            def.coerce(ValueKind::Boolean, SettingValue::Bool(false)),
            SettingValue::Bool(false)
        );
    }

    #[test]
    fn test_check_slider_bounds() {
        let def = SettingDefinition::slider("Pedestrian LOD Bias", -1.0, 1.0, 0.01);
        assert!(def.check("p", &SettingValue::Number(-1.0)).is_ok());
        assert!(def.check("p", &SettingValue::Number(1.0)).is_ok());
        assert_eq!(
            def.check("p", &SettingValue::Number(1.5)),
            Err(EditError::OutOfRange {
                path: "p".into(),
                value: 1.5,
                min: -1.0,
                max: 1.0
            })
        );
    }

    #[test]
    fn test_check_select() {
        let def = SettingDefinition::select("MSAA", &["0", "2", "4", "8"]);
        assert!(def.check("m", &SettingValue::Number(4.0)).is_ok());
        assert!(matches!(
            def.check("m", &SettingValue::Number(3.0)),
            Err(EditError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_check_readonly() {
        let def = SettingDefinition::number_input("MSAA Fragments").readonly();
        assert_eq!(
            def.check("m", &SettingValue::Number(1.0)),
            Err(EditError::ReadOnly { path: "m".into() })
        );
        let text = SettingDefinition::text("Version");
        assert!(!text.is_editable());
    }

    #[test]
    fn test_format_value() {
        let slider = SettingDefinition::slider("LOD", 0.0, 5.0, 0.01);
        assert_eq!(slider.format_value(&SettingValue::Number(1.0)), "1.00");
        let fine = SettingDefinition::slider("Convergence", 0.0, 1.0, 0.001);
        assert_eq!(fine.format_value(&SettingValue::Number(0.1)), "0.100");

        let select =
            SettingDefinition::select_labeled("SSAO", &["0", "1", "2"], &["Off", "Low", "High"]);
        assert_eq!(select.format_value(&SettingValue::Number(2.0)), "High");
        assert_eq!(select.format_value(&SettingValue::Number(7.0)), "7");

        let plain = SettingDefinition::select("MSAA", &["0", "2"]);
        assert_eq!(plain.format_value(&SettingValue::Number(2.0)), "2");
    }
}
