//! Error types for document parsing and setting edits.

use thiserror::Error;

/// Failures while turning document text into a tree or back into text.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The underlying reader rejected the input.
    #[error("XML syntax error at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    /// The document has no root element.
    #[error("document has no root element")]
    MissingRoot,
    /// A second root element, or non-whitespace text outside the root.
    #[error("unexpected content outside the root element at byte {position}")]
    OutsideRoot { position: u64 },
    /// An end tag was found without a matching start tag.
    #[error("unexpected end tag `</{name}>`")]
    UnexpectedEnd { name: String },
    /// The input ended while elements were still open.
    #[error("unclosed element `<{name}>`")]
    Unclosed { name: String },
    /// Raw bytes in the document are not valid UTF-8.
    #[error("invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Writing the serialized tree failed.
    #[error("failed to serialize document: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected edits to a flat model.
#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    /// No entry exists under the path.
    #[error("unknown setting `{path}`")]
    UnknownPath { path: String },
    /// Structural entries carry no value.
    #[error("`{path}` is a container and has no value")]
    Container { path: String },
    /// The new value's type disagrees with the entry kind.
    #[error("type mismatch for `{path}`: expected {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },
    /// The setting is displayed but not editable.
    #[error("`{path}` is read-only")]
    ReadOnly { path: String },
    /// A slider value falls outside its bounds.
    #[error("{value} is out of range for `{path}` ({min}..={max})")]
    OutOfRange {
        path: String,
        value: f64,
        min: f64,
        max: f64,
    },
    /// A select value is not one of the offered options.
    #[error("`{value}` is not a valid option for `{path}`; expected one of: {options:?}")]
    InvalidOption {
        path: String,
        value: String,
        options: Vec<String>,
    },
}
