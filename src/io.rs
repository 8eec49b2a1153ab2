//! Reading and writing PAGE-XML files.

use crate::bridge;
use crate::config::WriterConfig;
use crate::document::PageXml;
use crate::error::{Error, Result};
use crate::parser_config::ParserOptions;
use crate::xml;
use encoding_rs::Encoding;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

/// Number of leading bytes searched for the XML declaration.
const DECLARATION_WINDOW: usize = 256;

impl PageXml {
    /// Open a PAGE-XML file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pagexml::{PageXml, ParserOptions};
    ///
    /// let page = PageXml::open("page.xml", &ParserOptions::relaxed())?;
    /// println!("{} regions", page.regions().len());
    /// # Ok::<(), pagexml::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>, options: &ParserOptions) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Parsing {}", path.display());
        let bytes = std::fs::read(path)?;
        let mut doc = Self::from_bytes(&bytes, options)?;
        doc.set_source_path(path);
        Ok(doc)
    }

    /// Parse an encoded PAGE-XML document.
    ///
    /// The encoding is taken from [`ParserOptions::encoding`], else from a
    /// byte order mark, else from the XML declaration, else UTF-8.
    pub fn from_bytes(bytes: &[u8], options: &ParserOptions) -> Result<Self> {
        let text = decode(bytes, options.encoding.as_deref())?;
        Self::from_xml_str(&text, options)
    }

    /// Parse PAGE-XML text.
    pub fn from_xml_str(text: &str, options: &ParserOptions) -> Result<Self> {
        let root = xml::parse_str(text)?;
        bridge::import(&root, options)
    }

    /// Serialize to XML text.
    ///
    /// The declaration carries the configured encoding label verbatim.
    pub fn to_xml_string(&self, config: &WriterConfig) -> String {
        let root = bridge::export(self, &config.schema);
        xml::to_string(&root, &config.encoding, config.indent, config.xml_declaration)
    }

    /// Serialize and encode.
    pub fn to_bytes(&self, config: &WriterConfig) -> Result<Vec<u8>> {
        let encoding = resolve(&config.encoding)?.output_encoding();
        let root = bridge::export(self, &config.schema);
        let text = xml::to_string(&root, encoding.name(), config.indent, config.xml_declaration);

        let (bytes, _, unmappable) = encoding.encode(&text);
        if unmappable {
            log::warn!("characters not representable in {} written as references", encoding.name());
        }
        Ok(bytes.into_owned())
    }

    /// Write the document to a file.
    ///
    /// Sets the last change time to now.
    pub fn save(&mut self, path: impl AsRef<Path>, config: &WriterConfig) -> Result<()> {
        let path = path.as_ref();
        self.touch();
        let bytes = self.to_bytes(config)?;
        std::fs::write(path, bytes)?;
        log::info!("Saved {}", path.display());
        Ok(())
    }
}

fn resolve(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| Error::UnsupportedEncoding(label.to_string()))
}

/// Decode document bytes.
fn decode(bytes: &[u8], label: Option<&str>) -> Result<String> {
    let encoding = match label {
        Some(label) => resolve(label)?,
        None => Encoding::for_bom(bytes)
            .map(|(encoding, _)| encoding)
            .or_else(|| declared_encoding(bytes))
            .unwrap_or(encoding_rs::UTF_8),
    };

    let (text, used, malformed) = encoding.decode(bytes);
    if malformed {
        log::warn!("malformed {} input, invalid sequences replaced", used.name());
    }
    Ok(text.into_owned())
}

/// Encoding named in the XML declaration, if it is a known label.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(DECLARATION_WINDOW)];
    let mut reader = Reader::from_reader(head);
    let mut buf = Vec::new();
    let Ok(Event::Decl(declaration)) = reader.read_event_into(&mut buf) else {
        return None;
    };

    let label = declaration.encoding()?.ok()?;
    let encoding = Encoding::for_label(&label);
    if encoding.is_none() {
        log::warn!(
            "unknown declared encoding '{}', assuming UTF-8",
            String::from_utf8_lossy(&label)
        );
    }
    encoding
}
