//! Generic labeled XML tree.
//!
//! [`XmlElement`] is the neutral representation between XML text and the
//! typed PAGE-XML model: a tag name, ordered attributes, optional text and
//! ordered children. [`parse_str`] builds it from text with `quick-xml`,
//! [`to_string`] writes it back.
//!
//! Only the text before the first child element is kept (the text of mixed
//! content after a child is dropped). Tag names are stored without their
//! namespace prefix; attribute names keep it (`xsi:schemaLocation`).

mod reader;
mod writer;

pub use reader::parse_str;
pub use writer::to_string;

use indexmap::IndexMap;

/// Element of a generic XML tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Local tag name
    pub name: String,
    /// Attributes in document order
    pub attributes: IndexMap<String, String>,
    /// Text content before the first child
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an element without attributes, text or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }
}
