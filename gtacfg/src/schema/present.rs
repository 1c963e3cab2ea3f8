use std::collections::BTreeMap;

use crate::{
    data::{entry::FlatEntry, model::FlatModel, model::leaf_segment},
    schema::{SettingDefinition, lookup, section_for},
};

/// Resolved presentation of one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// Control described by a registry definition.
    Control(&'static SettingDefinition),
    /// Non-interactive value display.
    Display { label: String },
}

impl Presentation {
    pub fn label(&self) -> &str {
        match self {
            Presentation::Control(def) => def.label,
            Presentation::Display { label } => label,
        }
    }

    pub fn is_editable(&self) -> bool {
        match self {
            Presentation::Control(def) => def.is_editable(),
            Presentation::Display { .. } => false,
        }
    }

    /// Display form of the entry's value.
    pub fn format_value(&self, entry: &FlatEntry) -> String {
        match self {
            Presentation::Control(def) => def.format_value(&entry.value),
            Presentation::Display { .. } => entry.value.to_string(),
        }
    }
}

/// Choose how `path` is presented.
///
/// Unknown paths fall back to a display labelled after their last segment.
/// Read-only definitions are displayed with their own label, whatever their
/// control kind.
pub fn control_for(path: &str) -> Presentation {
    match lookup(path) {
        Some(def) if !def.readonly => Presentation::Control(def),
        Some(def) => Presentation::Display {
            label: def.label.to_string(),
        },
        None => Presentation::Display {
            label: humanize(leaf_segment(path)),
        },
    }
}

/// Sort listable entries into sections.
///
/// Containers are left out; sections and the paths within them are ordered
/// lexicographically and empty sections are omitted.
pub fn group_settings(model: &FlatModel) -> BTreeMap<&'static str, Vec<&str>> {
    let mut groups: BTreeMap<&'static str, Vec<&str>> = BTreeMap::new();
    for (path, entry) in model.iter() {
        if entry.is_container() {
            continue;
        }
        groups.entry(section_for(path)).or_default().push(path);
    }
    for paths in groups.values_mut() {
        paths.sort_unstable();
    }
    groups
}

/// Turn an identifier such as `numBytesPerReplayBlock` into
/// `Num Bytes Per Replay Block`.
pub fn humanize(segment: &str) -> String {
    let mut spaced = String::with_capacity(segment.len() + 8);
    for c in segment.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
