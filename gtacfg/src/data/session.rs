use log::debug;

use crate::{
    data::{
        model::{Change, FlatModel},
        value::{SettingValue, ValueKind},
    },
    error::{EditError, XmlError},
    schema,
    xml::{self, Rehydrated},
};

/// State of one load/edit/export cycle.
///
/// Owns the original document text, which every export rehydrates from, and
/// the flat model that edits are applied to.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: String,
    model: FlatModel,
    /// Whether the model has edits since load.
    pub needs_save: bool,
}

impl EditSession {
    /// Parse and flatten `text`.
    pub fn load(text: impl Into<String>) -> Result<Self, XmlError> {
        let original = text.into();
        let model = xml::flatten_str(&original)?;
        debug!("loaded settings document with {} entries", model.len());
        Ok(Self {
            original,
            model,
            needs_save: false,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn model(&self) -> &FlatModel {
        &self.model
    }

    /// Replace the whole model, e.g. with one edited elsewhere.
    pub fn replace_model(&mut self, model: FlatModel) {
        self.needs_save = true;
        self.model = model;
    }

    /// Validate and apply an edit.
    ///
    /// Registered settings are checked against their definition; unknown
    /// ones only need a matching kind and must not be read-only.
    pub fn set(&mut self, path: &str, value: SettingValue) -> Result<(), EditError> {
        let entry = self.model.get(path).ok_or_else(|| EditError::UnknownPath {
            path: path.to_string(),
        })?;

        let value = match schema::lookup(path) {
            Some(def) if !entry.is_container() => {
                let value = def.coerce(entry.kind(), value);
                def.check(path, &value)?;
                value
            }
            _ if entry.readonly => {
                return Err(EditError::ReadOnly {
                    path: path.to_string(),
                });
            }
            _ => value,
        };

        self.model.set_value(path, value)?;
        debug!("set {path}");
        self.needs_save = true;
        Ok(())
    }

    /// Convert user input according to the entry kind, then [`set`](Self::set) it.
    pub fn set_raw(&mut self, path: &str, raw: &str) -> Result<(), EditError> {
        let entry = self.model.get(path).ok_or_else(|| EditError::UnknownPath {
            path: path.to_string(),
        })?;
        let kind = entry.kind();
        if entry.is_container() {
            return Err(EditError::Container {
                path: path.to_string(),
            });
        }
        let value = SettingValue::parse_as(kind, raw)
            .or_else(|| match schema::lookup(path) {
                Some(def) if matches!(def.control, schema::Control::Switch) => {
                    SettingValue::parse_as(ValueKind::Boolean, raw)
                }
                _ => None,
            })
            .ok_or_else(|| EditError::TypeMismatch {
                path: path.to_string(),
                expected: kind.to_string(),
                actual: format!("`{raw}`"),
            })?;
        self.set(path, value)
    }

    /// Entries changed since load.
    pub fn changes(&self) -> Vec<Change<'_>> {
        self.model.changed()
    }

    /// Render the edited document.
    pub fn export(&self) -> Result<String, XmlError> {
        xml::rehydrate(&self.model, &self.original)
    }

    /// Render the edited document and report skipped paths.
    pub fn export_with_report(&self) -> Result<Rehydrated, XmlError> {
        xml::rehydrate_with_report(&self.model, &self.original)
    }
}
