//! Error types for the PAGE-XML library.
//!
//! This module defines all error types that can occur while reading, building,
//! mutating and writing PAGE-XML documents.

use crate::element::ElementId;

/// Result type alias for PAGE-XML library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PAGE-XML processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tag name that does not belong to the PAGE-XML element set
    #[error("Unknown PAGE-XML element: {0}")]
    UnknownElement(String),

    /// Element that is known but not allowed at this position
    #[error("Unexpected element <{found}> inside <{parent}>")]
    UnexpectedElement {
        /// Tag of the enclosing element
        parent: String,
        /// Tag that was found
        found: String,
    },

    /// A required element is missing from the document
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// XML text without exactly one closed root element
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// XML parsing error reported by the reader
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Element nesting exceeds the configured limit
    #[error("Element nesting exceeds the limit of {0} levels")]
    NestingTooDeep(usize),

    /// Timestamp that is not ISO 8601
    #[error("Invalid timestamp in <{field}>: {value}")]
    InvalidTimestamp {
        /// Metadata field holding the timestamp
        field: String,
        /// Raw text that failed to parse
        value: String,
    },

    /// Handle that does not belong to this document
    #[error("Element {0} does not belong to this document")]
    ElementNotFound(ElementId),

    /// Linking would make an element its own ancestor
    #[error("Cannot link element {0} into its own subtree")]
    CyclicLink(ElementId),

    /// Region id that is already part of the reading order
    #[error("Region id '{0}' is already in the reading order")]
    DuplicateReadingOrderId(String),

    /// Element type that is managed by the document itself
    #[error("<{0}> cannot be linked directly under the page")]
    ReservedElement(String),

    /// Schema version without a registered namespace triple
    #[error("Unknown schema version: {0}")]
    UnknownSchema(String),

    /// Schema description file that could not be decoded
    #[error("Invalid schema file: {0}")]
    SchemaFile(#[from] serde_json::Error),

    /// Character encoding label that is not supported
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
