//! # gtacfg
//!
//! Typed, flat editing of GTA V `settings.xml` documents.
//!
//! A settings document is a tree of elements whose scalar values live in a
//! `value` attribute. `gtacfg` turns that tree into a flat map from dotted
//! path (`graphics.LodScale`) to a typed entry, lets callers edit the map, and
//! writes the edits back onto the original text. Anything the edits do not
//! touch is reproduced byte for byte.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gtacfg::data::EditSession;
//!
//! let text = std::fs::read_to_string("settings.xml").unwrap();
//! let mut session = EditSession::load(text).unwrap();
//!
//! session.set_raw("graphics.Tessellation", "3").unwrap();
//! let updated = session.export().unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`data`] - flat model, typed values and the editing session
//! - [`xml`] - flattening and rehydration of documents
//! - [`schema`] - presentation registry, grouping and edit validation
//! - [`error`] - error types

/// Flat model, typed values and the editing session.
pub mod data;

/// Error types.
pub mod error;

/// Presentation registry for known settings.
pub mod schema;

/// Document flattening and rehydration.
pub mod xml;

pub use data::{EditSession, FlatEntry, FlatModel, SettingValue, ValueKind};
pub use error::{EditError, XmlError};
pub use xml::{flatten, rehydrate, rehydrate_with_report};
