// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # pagexml
//!
//! In-memory model of PAGE-XML documents, the XML format for page layout
//! and OCR analysis results (regions, text lines, words, glyphs, their
//! outlines and text equivalents).
//!
//! ## Core Features
//!
//! - **Typed element tree**: closed [`PageType`] enumeration, ordered
//!   attributes, arena storage with copyable [`ElementId`] handles
//! - **Search**: depth-bounded pre-order filtering by id, type and attributes
//!   ([`Query`], [`Depth`])
//! - **Reading order**: explicit region order kept next to the physical child
//!   order, with geometric sorting and re-sequencing
//! - **Round-trip I/O**: strict or relaxed import, 2017 and 2019 schema
//!   namespaces, configurable output encoding
//!
//! ## Quick Start
//!
//! ```
//! use pagexml::{PageType, PageXml, ParserOptions, SortDirection, SortReference, WriterConfig};
//!
//! let mut page = PageXml::new("scan.png", 1000, 1400);
//! for (id, points) in [("r2", "0,500 900,500 900,900"), ("r1", "0,0 900,0 900,400")] {
//!     let region = page.create(PageType::TextRegion, None, &[("id", id)], true)?;
//!     page.element_mut(region)
//!         .unwrap()
//!         .create(PageType::Coords, None, &[("points", points)]);
//! }
//! page.reading_order_sort(SortReference::Minimum, SortDirection::TopBottom, true);
//!
//! let xml = page.to_xml_string(&WriterConfig::default());
//! let parsed = PageXml::from_xml_str(&xml, &ParserOptions::strict())?;
//! assert_eq!(parsed.reading_order(), vec!["r1", "r2"]);
//! # Ok::<(), pagexml::Error>(())
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Document model
pub mod document;
pub mod element;
pub mod page_type;
mod reading_order;
pub mod search;

// Geometry
pub mod geometry;

// Serialization
pub mod bridge;
mod io;
pub mod xml;

// Configuration
pub mod config;
/// Parser configuration options
pub mod parser_config;
pub mod schema;

// Re-exports
pub use config::WriterConfig;
pub use document::PageXml;
pub use element::{Element, ElementId, ElementMut, Parent, TextSource};
pub use error::{Error, Result};
pub use page_type::PageType;
pub use parser_config::ParserOptions;
pub use reading_order::{SortDirection, SortReference};
pub use schema::PageSchema;
pub use search::{Depth, Query};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
