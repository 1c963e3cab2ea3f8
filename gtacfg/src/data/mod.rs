//! Flat model of a settings document.
//!
//! - [`value`] - typed values and the inference rule for raw strings
//! - [`entry`] - a single flattened setting
//! - [`model`] - the path-keyed collection of entries
//! - [`session`] - one load/edit/export cycle

/// Typed setting values.
pub mod value;

/// Single flattened setting.
pub mod entry;

/// Path-keyed entry collection.
pub mod model;

/// Editing session over one document.
pub mod session;

pub use entry::FlatEntry;
pub use model::FlatModel;
pub use session::EditSession;
pub use value::{SettingValue, ValueKind};
