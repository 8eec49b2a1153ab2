//! XML text to [`XmlElement`] tree.

use super::XmlElement;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Element under construction.
struct Frame {
    element: XmlElement,
    /// Raw text seen before the first child
    text: String,
}

impl Frame {
    fn new(element: XmlElement) -> Self {
        Self {
            element,
            text: String::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.element.children.is_empty() {
            self.text.push_str(text);
        }
    }

    /// Add a finished child.
    ///
    /// Whitespace-only text in front of the first child is indentation.
    fn push_child(&mut self, child: XmlElement) {
        if self.element.children.is_empty() {
            let text = std::mem::take(&mut self.text);
            if !text.trim().is_empty() {
                self.element.text = Some(text);
            }
        }
        self.element.children.push(child);
    }

    fn finish(mut self) -> XmlElement {
        if self.element.children.is_empty() && !self.text.is_empty() {
            self.element.text = Some(self.text);
        }
        self.element
    }
}

/// Parse XML text into a generic tree.
///
/// # Errors
///
/// - [`Error::Xml`] for syntax errors reported by the reader: mismatched
///   closing tags, duplicate or malformed attributes, bad escapes
/// - [`Error::MalformedXml`] for a missing, unclosed or repeated root element
pub fn parse_str(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            log::debug!("XML error at position {}", reader.buffer_position());
            e
        })?;
        match event {
            Event::Start(ref e) => {
                let element = start_element(e, root.is_some() && stack.is_empty())?;
                stack.push(Frame::new(element));
            },
            Event::Empty(ref e) => {
                let element = start_element(e, root.is_some() && stack.is_empty())?;
                close(&mut stack, &mut root, Frame::new(element));
            },
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| Error::MalformedXml("unexpected closing tag".to_string()))?;
                close(&mut stack, &mut root, frame);
            },
            Event::Text(e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.push_text(&e.unescape()?);
                }
            },
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    let text = String::from_utf8(e.into_inner().into_owned())
                        .map_err(|err| Error::MalformedXml(format!("invalid CDATA: {}", err)))?;
                    frame.push_text(&text);
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::MalformedXml(format!("unclosed element <{}>", open.element.name)));
    }
    root.ok_or_else(|| Error::MalformedXml("no root element".to_string()))
}

fn close(stack: &mut [Frame], root: &mut Option<XmlElement>, frame: Frame) {
    let element = frame.finish();
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None => *root = Some(element),
    }
}

fn start_element(e: &BytesStart<'_>, second_root: bool) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
    if second_root {
        return Err(Error::MalformedXml(format!("second root element <{}>", name)));
    }

    let mut element = XmlElement::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?;
        element.attributes.insert(key, value.into_owned());
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structure() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- comment -->
<pc:PcGts xmlns:pc="urn:x" xmlns:xsi="urn:xsi" xsi:schemaLocation="urn:x x.xsd">
  <pc:Metadata>
    <pc:Creator>me</pc:Creator>
  </pc:Metadata>
  <pc:Page imageFilename="a.png" imageWidth="10" imageHeight="20"/>
</pc:PcGts>"#;
        let root = parse_str(xml).unwrap();
        assert_eq!(root.name, "PcGts");
        assert_eq!(root.attribute("xsi:schemaLocation"), Some("urn:x x.xsd"));
        assert_eq!(root.text, None);
        assert_eq!(root.children.len(), 2);

        let metadata = &root.children[0];
        assert_eq!(metadata.name, "Metadata");
        assert_eq!(metadata.child("Creator").and_then(|c| c.text.as_deref()), Some("me"));

        let page = &root.children[1];
        assert_eq!(
            page.attributes.keys().collect::<Vec<_>>(),
            vec!["imageFilename", "imageWidth", "imageHeight"]
        );
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let root = parse_str("<Unicode>  a &amp; b\n</Unicode>").unwrap();
        assert_eq!(root.text.as_deref(), Some("  a & b\n"));

        let root = parse_str("<Unicode> </Unicode>").unwrap();
        assert_eq!(root.text.as_deref(), Some(" "));

        let root = parse_str("<Unicode><![CDATA[<raw>]]></Unicode>").unwrap();
        assert_eq!(root.text.as_deref(), Some("<raw>"));
    }

    #[test]
    fn test_text_before_children() {
        let root = parse_str("<A>head<B/>tail</A>").unwrap();
        assert_eq!(root.text.as_deref(), Some("head"));
        assert_eq!(root.children.len(), 1);

        let root = parse_str("<A>\n  <B/>\n</A>").unwrap();
        assert_eq!(root.text, None);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(parse_str("<A><B></A>"), Err(Error::Xml(_))));
        assert!(matches!(parse_str("<A>"), Err(Error::MalformedXml(_) | Error::Xml(_))));
        assert!(matches!(parse_str(""), Err(Error::MalformedXml(_))));
        assert!(matches!(parse_str("<A/><B/>"), Err(Error::MalformedXml(_))));
        assert!(matches!(parse_str(r#"<A x="1" x="2"/>"#), Err(Error::Xml(_))));
        assert!(matches!(parse_str("<A>&bogus;</A>"), Err(Error::Xml(_))));
    }
}
