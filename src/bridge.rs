//! Mapping between the generic XML tree and the PAGE-XML document model.
//!
//! [`import`] builds a [`PageXml`] from a `PcGts` tree, [`export`] produces
//! the tree for a document and a namespace triple:
//!
//! ```text
//! PcGts[xmlns, xmlns:xsi, xsi:schemaLocation]
//!   Metadata
//!     Creator / Created / LastChange
//!   Page[page attributes]
//!     ReadingOrder > OrderedGroup[id="g0"] > RegionRefIndexed[index, regionRef]*
//!     ...children
//! ```
//!
//! The `ReadingOrder` element of the page is not kept as a child; it is read
//! into the document's reading order and regenerated from it on export.

use crate::document::PageXml;
use crate::element::{normalize_text, ElementId, Parent};
use crate::error::{Error, Result};
use crate::page_type::PageType;
use crate::parser_config::ParserOptions;
use crate::schema::PageSchema;
use crate::xml::XmlElement;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const ROOT: &str = "PcGts";
const PAGE: &str = "Page";
const METADATA: &str = "Metadata";
const CREATOR: &str = "Creator";
const CREATED: &str = "Created";
const LAST_CHANGE: &str = "LastChange";

/// Id of the generated reading-order group.
const GROUP_ID: &str = "g0";

/// Page children that precede `ReadingOrder` in the schema sequence.
const BEFORE_READING_ORDER: [PageType; 3] =
    [PageType::AlternativeImage, PageType::Border, PageType::PrintSpace];

/// Build a document from a `PcGts` tree.
///
/// # Errors
///
/// - [`Error::UnexpectedElement`] if the root is not `PcGts`, or (strict) for
///   siblings of `Metadata` and `Page`
/// - [`Error::MissingElement`] without a `Page` element, or (strict) without
///   complete metadata
/// - [`Error::UnknownElement`] (strict) for tags outside the element set
/// - [`Error::InvalidTimestamp`] (strict) for malformed metadata timestamps
/// - [`Error::NestingTooDeep`] beyond [`ParserOptions::max_depth`]
pub fn import(root: &XmlElement, options: &ParserOptions) -> Result<PageXml> {
    if root.name != ROOT {
        return Err(Error::UnexpectedElement {
            parent: "document".to_string(),
            found: root.name.clone(),
        });
    }

    let mut metadata = None;
    let mut page = None;
    for child in &root.children {
        match child.name.as_str() {
            METADATA if metadata.is_none() => metadata = Some(child),
            PAGE if page.is_none() => page = Some(child),
            _ => unexpected(ROOT, &child.name, options)?,
        }
    }

    let page = page.ok_or_else(|| Error::MissingElement(PAGE.to_string()))?;
    let mut doc = PageXml::empty();

    match metadata {
        Some(metadata) => import_metadata(&mut doc, metadata, options)?,
        None if options.strict => return Err(Error::MissingElement(METADATA.to_string())),
        None => log::warn!("document has no <{}>, using defaults", METADATA),
    }

    doc.attributes = page.attributes.clone();
    let mut reading_order_seen = false;
    for child in &page.children {
        if child.name == PageType::ReadingOrder.tag() {
            if reading_order_seen {
                unexpected(PAGE, &child.name, options)?;
                continue;
            }
            reading_order_seen = true;
            doc.reading_order = import_reading_order(child);
            continue;
        }
        if let Some(id) = import_element(&mut doc, child, 2, options)? {
            doc.attach(Parent::Page, id, None);
        }
    }

    log::debug!(
        "imported page with {} children and {} reading order entries",
        doc.children.len(),
        doc.reading_order.len()
    );
    Ok(doc)
}

/// Handle an element that is known to the reader but misplaced.
fn unexpected(parent: &str, found: &str, options: &ParserOptions) -> Result<()> {
    if options.strict {
        return Err(Error::UnexpectedElement {
            parent: parent.to_string(),
            found: found.to_string(),
        });
    }
    log::warn!("skipping unexpected <{}> inside <{}>", found, parent);
    Ok(())
}

fn import_metadata(doc: &mut PageXml, metadata: &XmlElement, options: &ParserOptions) -> Result<()> {
    let field = |name: &str| metadata.child(name).map(|c| c.text.as_deref().unwrap_or(""));

    match field(CREATOR) {
        Some(creator) => doc.creator = creator.trim().to_string(),
        None => log::debug!("no <{}> in metadata", CREATOR),
    }
    if let Some(created) = import_timestamp(field(CREATED), CREATED, options)? {
        doc.created = created;
    }
    if let Some(last_change) = import_timestamp(field(LAST_CHANGE), LAST_CHANGE, options)? {
        doc.last_change = last_change;
    }

    for child in &metadata.children {
        if ![CREATOR, CREATED, LAST_CHANGE].contains(&child.name.as_str()) {
            log::debug!("dropping metadata element <{}>", child.name);
        }
    }
    Ok(())
}

/// Parse a metadata timestamp; `None` keeps the default.
fn import_timestamp(
    value: Option<&str>,
    field: &str,
    options: &ParserOptions,
) -> Result<Option<DateTime<Utc>>> {
    let Some(value) = value else {
        if options.strict {
            return Err(Error::MissingElement(field.to_string()));
        }
        log::warn!("no <{}> in metadata, using the current time", field);
        return Ok(None);
    };

    match parse_timestamp(value) {
        Some(timestamp) => Ok(Some(timestamp)),
        None if options.strict => Err(Error::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        }),
        None => {
            log::warn!("invalid <{}> timestamp '{}', using the current time", field, value);
            Ok(None)
        },
    }
}

/// Parse an ISO 8601 timestamp.
///
/// Timestamps without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Format a timestamp for the metadata fields.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Flatten the groups of a `ReadingOrder` element into region ids.
///
/// Groups are walked depth-first; the members of each group are ordered by
/// their `index` attribute. Members without an index follow the indexed ones.
fn import_reading_order(reading_order: &XmlElement) -> Vec<String> {
    let mut ids = Vec::new();
    collect_region_refs(reading_order, &mut ids);
    ids
}

fn collect_region_refs(group: &XmlElement, ids: &mut Vec<String>) {
    let mut members: Vec<&XmlElement> = group.children.iter().collect();
    members.sort_by_key(|m| {
        m.attribute("index")
            .and_then(|i| i.trim().parse::<i64>().ok())
            .unwrap_or(i64::MAX)
    });

    for member in members {
        match PageType::parse(&member.name) {
            Some(PageType::RegionRefIndexed | PageType::RegionRef) => {
                match member.attribute("regionRef") {
                    Some(id) => ids.push(id.to_string()),
                    None => log::warn!("<{}> without regionRef", member.name),
                }
            },
            Some(
                PageType::OrderedGroup
                | PageType::UnorderedGroup
                | PageType::OrderedGroupIndexed
                | PageType::UnorderedGroupIndexed,
            ) => collect_region_refs(member, ids),
            _ => log::debug!("ignoring <{}> in reading order", member.name),
        }
    }
}

/// Build the subtree for `xml`, returning `None` if it was dropped.
fn import_element(
    doc: &mut PageXml,
    xml: &XmlElement,
    depth: usize,
    options: &ParserOptions,
) -> Result<Option<ElementId>> {
    if depth > options.max_depth {
        return Err(Error::NestingTooDeep(options.max_depth));
    }
    let Some(page_type) = PageType::parse(&xml.name) else {
        if options.strict {
            return Err(Error::UnknownElement(xml.name.clone()));
        }
        log::warn!("dropping unknown element <{}> and its subtree", xml.name);
        return Ok(None);
    };

    let id = doc.alloc(page_type, xml.attributes.clone());
    doc.node_mut(id).text = normalize_text(xml.text.clone());
    for child in &xml.children {
        if let Some(child) = import_element(doc, child, depth + 1, options)? {
            doc.attach(Parent::Element(id), child, None);
        }
    }
    Ok(Some(id))
}

/// Build the `PcGts` tree of a document.
pub fn export(doc: &PageXml, schema: &PageSchema) -> XmlElement {
    let metadata = XmlElement::new(METADATA)
        .with_child(XmlElement::new(CREATOR).with_text(doc.creator()))
        .with_child(XmlElement::new(CREATED).with_text(format_timestamp(&doc.created())))
        .with_child(XmlElement::new(LAST_CHANGE).with_text(format_timestamp(&doc.last_change())));

    let mut page = XmlElement::new(PAGE);
    page.attributes = doc.attributes();
    page.children = doc.children.iter().map(|&child| export_element(doc, child)).collect();

    if !doc.reading_order.is_empty() {
        let position = doc
            .children
            .iter()
            .take_while(|&&child| BEFORE_READING_ORDER.contains(&doc.node(child).page_type))
            .count();
        page.children.insert(position, export_reading_order(&doc.reading_order));
    }

    XmlElement::new(ROOT)
        .with_attribute("xmlns", schema.xmlns.as_str())
        .with_attribute("xmlns:xsi", schema.xmlns_xsi.as_str())
        .with_attribute("xsi:schemaLocation", schema.schema_location.as_str())
        .with_child(metadata)
        .with_child(page)
}

fn export_reading_order(ids: &[String]) -> XmlElement {
    let group = ids.iter().enumerate().fold(
        XmlElement::new(PageType::OrderedGroup.tag()).with_attribute("id", GROUP_ID),
        |group, (index, id)| {
            group.with_child(
                XmlElement::new(PageType::RegionRefIndexed.tag())
                    .with_attribute("index", index.to_string())
                    .with_attribute("regionRef", id.as_str()),
            )
        },
    );
    XmlElement::new(PageType::ReadingOrder.tag()).with_child(group)
}

fn export_element(doc: &PageXml, id: ElementId) -> XmlElement {
    let node = doc.node(id);
    XmlElement {
        name: node.page_type.tag().to_string(),
        attributes: node.attributes.clone(),
        text: node.text.clone(),
        children: node.children.iter().map(|&child| export_element(doc, child)).collect(),
    }
}
