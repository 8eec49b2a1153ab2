//! PAGE-XML namespace descriptors.
//!
//! A [`PageSchema`] holds the namespace triple written on the `PcGts` root
//! element. The `"2017"` and `"2019"` versions are registered by default;
//! custom triples can be constructed directly or loaded from a JSON file
//! that maps version labels to triples:
//!
//! ```json
//! {
//!   "2019": {
//!     "xmlns": "http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15",
//!     "xmlns_xsi": "http://www.w3.org/2001/XMLSchema-instance",
//!     "xsi_schema_location": "..."
//!   }
//! }
//! ```

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Version used when none is requested.
pub const DEFAULT_VERSION: &str = "2019";

const XMLNS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

lazy_static! {
    /// Registered schema versions
    static ref REGISTRY: HashMap<&'static str, PageSchema> = {
        let mut registry = HashMap::new();
        registry.insert("2017", PageSchema::for_namespace(
            "http://schema.primaresearch.org/PAGE/gts/pagecontent/2017-07-15",
        ));
        registry.insert("2019", PageSchema::for_namespace(
            "http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15",
        ));
        registry
    };
}

/// Namespace triple of a PAGE-XML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSchema {
    /// Default namespace (`xmlns`)
    pub xmlns: String,
    /// Schema instance namespace (`xmlns:xsi`)
    pub xmlns_xsi: String,
    /// Schema location (`xsi:schemaLocation`)
    #[serde(rename = "xsi_schema_location")]
    pub schema_location: String,
}

impl PageSchema {
    /// Look up a registered schema version (`"2017"`, `"2019"`).
    pub fn get(version: &str) -> Result<Self> {
        REGISTRY
            .get(version)
            .cloned()
            .ok_or_else(|| Error::UnknownSchema(version.to_string()))
    }

    /// Registered version labels, sorted.
    pub fn versions() -> Vec<&'static str> {
        let mut versions: Vec<_> = REGISTRY.keys().copied().collect();
        versions.sort_unstable();
        versions
    }

    /// Build a caller-supplied namespace triple.
    pub fn custom(
        xmlns: impl Into<String>,
        xmlns_xsi: impl Into<String>,
        schema_location: impl Into<String>,
    ) -> Self {
        Self {
            xmlns: xmlns.into(),
            xmlns_xsi: xmlns_xsi.into(),
            schema_location: schema_location.into(),
        }
    }

    /// Select `version` from a JSON schema description.
    pub fn from_json(json: &str, version: &str) -> Result<Self> {
        let mut schemas: HashMap<String, PageSchema> = serde_json::from_str(json)?;
        schemas
            .remove(version)
            .ok_or_else(|| Error::UnknownSchema(version.to_string()))
    }

    /// Select `version` from a JSON schema description file.
    pub fn from_json_file(path: impl AsRef<Path>, version: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json, version)
    }

    fn for_namespace(xmlns: &str) -> Self {
        Self::custom(xmlns, XMLNS_XSI, format!("{xmlns} {xmlns}/pagecontent.xsd"))
    }
}

impl Default for PageSchema {
    fn default() -> Self {
        REGISTRY
            .get(DEFAULT_VERSION)
            .cloned()
            .unwrap_or_else(|| Self::for_namespace(""))
    }
}
