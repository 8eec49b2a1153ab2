//! [`XmlElement`] tree to XML text.

use super::XmlElement;

/// Serialize a tree to XML text.
///
/// `encoding` only labels the XML declaration; the returned string is always
/// Rust UTF-8. With `indent`, every element starts on its own line; elements
/// that hold both text and children are written on one line so the text stays
/// exactly as stored.
pub fn to_string(root: &XmlElement, encoding: &str, indent: Option<usize>, declaration: bool) -> String {
    let mut xml = String::new();

    if declaration {
        xml.push_str(&format!(
            "<?xml version=\"1.0\" encoding=\"{}\" standalone=\"yes\"?>",
            escape(encoding, true)
        ));
        if indent.is_some() {
            xml.push('\n');
        }
    }

    write_element(&mut xml, root, indent, 0);
    if indent.is_some() {
        xml.push('\n');
    }
    xml
}

fn write_element(xml: &mut String, element: &XmlElement, indent: Option<usize>, level: usize) {
    let pad = indent.map(|width| " ".repeat(width * level)).unwrap_or_default();
    xml.push_str(&pad);
    xml.push('<');
    xml.push_str(&element.name);
    for (key, value) in &element.attributes {
        xml.push_str(&format!(" {}=\"{}\"", key, escape(value, true)));
    }

    if element.children.is_empty() {
        match &element.text {
            Some(text) => xml.push_str(&format!(">{}</{}>", escape(text, false), element.name)),
            None => xml.push_str("/>"),
        }
        return;
    }

    xml.push('>');
    // Indentation would become part of the text
    let inner = if element.text.is_some() { None } else { indent };
    if let Some(text) = &element.text {
        xml.push_str(&escape(text, false));
    }
    for child in &element.children {
        if inner.is_some() {
            xml.push('\n');
        }
        write_element(xml, child, inner, level + 1);
    }
    if inner.is_some() {
        xml.push('\n');
        xml.push_str(&pad);
    }
    xml.push_str(&format!("</{}>", element.name));
}

/// Escape special XML characters.
///
/// Attribute values also escape quotes and whitespace control characters,
/// which attribute normalization would otherwise turn into spaces.
fn escape(s: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '\r' => escaped.push_str("&#13;"),
            '"' if attribute => escaped.push_str("&quot;"),
            '\n' if attribute => escaped.push_str("&#10;"),
            '\t' if attribute => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlElement {
        XmlElement::new("Page")
            .with_attribute("imageFilename", "a\"b.png")
            .with_child(XmlElement::new("Border"))
            .with_child(XmlElement::new("Unicode").with_text("x < y"))
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Hello", false), "Hello");
        assert_eq!(escape("<b> & \"q\"", false), "&lt;b&gt; &amp; \"q\"");
        assert_eq!(escape("\"q\"\n", true), "&quot;q&quot;&#10;");
    }

    #[test]
    fn test_indented_output() {
        let xml = to_string(&sample(), "UTF-8", Some(2), true);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <Page imageFilename=\"a&quot;b.png\">\n  <Border/>\n  <Unicode>x &lt; y</Unicode>\n</Page>\n"
        );
    }

    #[test]
    fn test_compact_output() {
        let xml = to_string(&sample(), "UTF-8", None, false);
        assert_eq!(
            xml,
            "<Page imageFilename=\"a&quot;b.png\"><Border/><Unicode>x &lt; y</Unicode></Page>"
        );
    }

    #[test]
    fn test_mixed_content_stays_compact() {
        let element = XmlElement::new("A")
            .with_text("head")
            .with_child(XmlElement::new("B").with_child(XmlElement::new("C")));
        let xml = to_string(&XmlElement::new("Root").with_child(element), "UTF-8", Some(2), false);
        assert_eq!(xml, "<Root>\n  <A>head<B><C/></B></A>\n</Root>\n");
    }
}
