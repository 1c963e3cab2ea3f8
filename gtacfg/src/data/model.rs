use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    data::{
        entry::FlatEntry,
        value::{SettingValue, ValueKind},
    },
    error::EditError,
};

/// Path segment delimiter.
pub const PATH_DELIMITER: char = '.';

/// Flat view of a settings document: dotted path to typed entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatModel {
    entries: BTreeMap<String, FlatEntry>,
}

/// A value that differs from its flatten-time snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Change<'a> {
    pub path: &'a str,
    pub from: &'a SettingValue,
    pub to: &'a SettingValue,
}

impl FlatModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FlatEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Insert or replace the entry at `path`.
    pub fn insert(&mut self, path: impl Into<String>, entry: FlatEntry) -> Option<FlatEntry> {
        self.entries.insert(path.into(), entry)
    }

    /// Insert a container entry unless the path is already populated.
    pub fn insert_container(&mut self, path: impl Into<String>) {
        self.entries
            .entry(path.into())
            .or_insert_with(FlatEntry::container);
    }

    pub fn remove(&mut self, path: &str) -> Option<FlatEntry> {
        self.entries.remove(path)
    }

    /// Iterate entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Replace the value at `path`.
    ///
    /// The new value must have the entry's kind; containers take no values.
    /// Read-only handling belongs to the schema layer, not to the model.
    pub fn set_value(&mut self, path: &str, value: SettingValue) -> Result<(), EditError> {
        let entry = self
            .entries
            .get_mut(path)
            .ok_or_else(|| EditError::UnknownPath {
                path: path.to_string(),
            })?;

        let expected = entry.kind();
        if expected == ValueKind::Container {
            return Err(EditError::Container {
                path: path.to_string(),
            });
        }
        if value.kind() != expected {
            return Err(EditError::TypeMismatch {
                path: path.to_string(),
                expected: expected.to_string(),
                actual: format!("{} `{}`", value.kind(), value),
            });
        }

        entry.value = value;
        Ok(())
    }

    /// Convert `raw` according to the entry kind, then set it.
    pub fn set_raw(&mut self, path: &str, raw: &str) -> Result<(), EditError> {
        let kind = self
            .get(path)
            .map(FlatEntry::kind)
            .ok_or_else(|| EditError::UnknownPath {
                path: path.to_string(),
            })?;
        if kind == ValueKind::Container {
            return Err(EditError::Container {
                path: path.to_string(),
            });
        }
        let value = SettingValue::parse_as(kind, raw).ok_or_else(|| EditError::TypeMismatch {
            path: path.to_string(),
            expected: kind.to_string(),
            actual: format!("`{raw}`"),
        })?;
        self.set_value(path, value)
    }

    /// Restore the flatten-time value at `path`. Returns whether anything changed.
    pub fn reset(&mut self, path: &str) -> bool {
        match self.entries.get_mut(path) {
            Some(entry) if entry.is_modified() => {
                if let Some(original) = entry.original_value.clone() {
                    entry.value = original;
                }
                true
            }
            _ => false,
        }
    }

    /// Entries whose value differs from the flatten-time snapshot.
    pub fn changed(&self) -> Vec<Change<'_>> {
        self.entries
            .iter()
            .filter_map(|(path, entry)| {
                let original = entry.original_value.as_ref()?;
                (*original != entry.value).then_some(Change {
                    path,
                    from: original,
                    to: &entry.value,
                })
            })
            .collect()
    }
}

impl FromIterator<(String, FlatEntry)> for FlatModel {
    fn from_iter<T: IntoIterator<Item = (String, FlatEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FlatModel {
    type Item = (&'a String, &'a FlatEntry);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FlatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// First segment of a dotted path.
pub fn root_segment(path: &str) -> &str {
    path.split(PATH_DELIMITER).next().unwrap_or(path)
}

/// Last segment of a dotted path.
pub fn leaf_segment(path: &str) -> &str {
    path.rsplit(PATH_DELIMITER).next().unwrap_or(path)
}
