//! Configuration for writing PAGE-XML documents.

use crate::error::Result;
use crate::schema::PageSchema;

/// Serialization configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Namespace triple written on the `PcGts` root.
    pub schema: PageSchema,

    /// Output encoding label, written into the XML declaration.
    pub encoding: String,

    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,

    /// Emit the `<?xml ...?>` declaration.
    pub xml_declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl WriterConfig {
    /// Create new configuration with defaults (2019 schema, UTF-8, indent 2).
    pub fn new() -> Self {
        Self {
            schema: PageSchema::default(),
            encoding: "UTF-8".to_string(),
            indent: Some(2),
            xml_declaration: true,
        }
    }

    /// Use a registered schema version.
    pub fn with_schema_version(mut self, version: &str) -> Result<Self> {
        self.schema = PageSchema::get(version)?;
        Ok(self)
    }

    /// Use a specific namespace triple.
    pub fn with_schema(mut self, schema: PageSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the output encoding label.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Set indentation (`None` for compact output).
    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable the XML declaration.
    pub fn with_xml_declaration(mut self, enable: bool) -> Self {
        self.xml_declaration = enable;
        self
    }
}
