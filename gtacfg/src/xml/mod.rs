//! Conversion between settings documents and flat models.
//!
//! - [`tree`] - element tree that reproduces untouched input verbatim
//! - [`flatten`] - document to flat model
//! - [`rehydrate`] - flat model back onto the original document

mod attr;

/// Document to flat model.
pub mod flatten;

/// Flat model back onto the original document text.
pub mod rehydrate;

/// Element tree built on `quick-xml` events.
pub mod tree;

/// Attribute holding a node's scalar value.
pub const VALUE_ATTRIBUTE: &str = "value";

/// Singleton element whose text describes the graphics adapter.
pub const HARDWARE_TAG: &str = "VideoCardDescription";

/// Declaration prepended to output that lacks one.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

pub use flatten::{flatten, flatten_str};
pub use rehydrate::{Rehydrated, rehydrate, rehydrate_with_report};
pub use tree::Document;
