//! PAGE-XML elements.
//!
//! Elements live in an arena owned by their [`PageXml`] document and are
//! addressed through copyable [`ElementId`] handles. Ownership flows strictly
//! from parent to children; the back-reference to the parent is a plain
//! [`Parent`] value, so the tree is acyclic by construction.
//!
//! [`Element`] is a read-only view of one element, [`ElementMut`] a mutable
//! one. Both are obtained from the document:
//!
//! ```
//! use pagexml::{PageType, PageXml};
//!
//! let mut page = PageXml::new("scan.png", 1000, 800);
//! let region = page.create(PageType::TextRegion, None, &[("id", "r1")], true).unwrap();
//!
//! let mut region_mut = page.element_mut(region).unwrap();
//! let line = region_mut.create(PageType::TextLine, None, &[("id", "l1")]);
//!
//! let view = page.element(line).unwrap();
//! assert_eq!(view.id(), Some("l1"));
//! ```

use crate::document::PageXml;
use crate::error::Result;
use crate::page_type::PageType;
use crate::search::{self, Depth, Query};
use indexmap::IndexMap;
use std::fmt;

/// Handle of an element inside its document's arena.
///
/// Handles stay valid after the element is unlinked; the element is then
/// orphaned until it is linked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The holder of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    /// The `Page` element itself
    Page,
    /// Another element
    Element(ElementId),
}

/// Which text leaf [`Element::find_text`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSource {
    /// `Unicode` text (correct code points)
    #[default]
    Unicode,
    /// `PlainText` text (typing form)
    PlainText,
}

impl TextSource {
    /// Element type holding this text.
    pub fn page_type(self) -> PageType {
        match self {
            Self::Unicode => PageType::Unicode,
            Self::PlainText => PageType::PlainText,
        }
    }
}

/// Arena slot of one element.
#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    pub(crate) page_type: PageType,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) text: Option<String>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) parent: Option<Parent>,
}

impl ElementData {
    pub(crate) fn new(page_type: PageType, attributes: IndexMap<String, String>) -> Self {
        Self {
            page_type,
            attributes,
            text: None,
            children: Vec::new(),
            parent: None,
        }
    }
}

/// Convert borrowed attribute pairs into an ordered map.
pub(crate) fn attribute_map(attributes: &[(&str, &str)]) -> IndexMap<String, String> {
    attributes
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Empty and whitespace-only text is stored as `None`.
///
/// Such text cannot be told apart from indentation once the element has
/// children, so it is never kept.
pub(crate) fn normalize_text(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Read-only view of an element.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    doc: &'a PageXml,
    handle: ElementId,
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        f.debug_struct("Element")
            .field("handle", &self.handle)
            .field("type", &data.page_type)
            .field("attributes", &data.attributes)
            .field("children", &data.children.len())
            .finish()
    }
}

impl<'a> Element<'a> {
    pub(crate) fn new(doc: &'a PageXml, handle: ElementId) -> Self {
        Self { doc, handle }
    }

    fn data(&self) -> &'a ElementData {
        self.doc.node(self.handle)
    }

    /// Handle of this element.
    pub fn handle(&self) -> ElementId {
        self.handle
    }

    /// Element type.
    pub fn page_type(&self) -> PageType {
        self.data().page_type
    }

    /// Check if this element is a region.
    pub fn is_region(&self) -> bool {
        self.page_type().is_region()
    }

    /// Value of the `id` attribute.
    pub fn id(&self) -> Option<&'a str> {
        self.attribute("id")
    }

    /// Value of an attribute, `None` if it is not set.
    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.data().attributes.get(key).map(String::as_str)
    }

    /// Check if an attribute is set.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.data().attributes.contains_key(key)
    }

    /// Copy of the attributes in insertion order.
    pub fn attributes(&self) -> IndexMap<String, String> {
        self.data().attributes.clone()
    }

    /// Element text.
    pub fn text(&self) -> Option<&'a str> {
        self.data().text.as_deref()
    }

    /// Copy of the child handles.
    pub fn children(&self) -> Vec<ElementId> {
        self.data().children.clone()
    }

    /// Child at `index`.
    pub fn child(&self, index: usize) -> Option<ElementId> {
        self.data().children.get(index).copied()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.data().children.len()
    }

    /// Check if the element has no children.
    pub fn is_empty(&self) -> bool {
        self.data().children.is_empty()
    }

    /// Check if `child` is a direct child of this element.
    pub fn contains(&self, child: ElementId) -> bool {
        self.data().children.contains(&child)
    }

    /// Current holder, `None` for an unlinked element.
    pub fn parent(&self) -> Option<Parent> {
        self.data().parent
    }

    /// Check if the element is linked into a children list.
    pub fn is_linked(&self) -> bool {
        self.data().parent.is_some()
    }

    /// All descendants matching `query`, in pre-order.
    pub fn find_all(&self, query: &Query) -> Vec<ElementId> {
        search::find_all(self.doc, &self.data().children, query)
    }

    /// First descendant matching `query`.
    pub fn find_one(&self, query: &Query) -> Option<ElementId> {
        search::find_one(self.doc, &self.data().children, query)
    }

    /// First descendant with the given `id` attribute.
    pub fn find_by_id(&self, id: &str, depth: impl Into<Depth>) -> Option<ElementId> {
        self.find_one(&Query::new().with_id(id).with_depth(depth))
    }

    /// First direct `Coords` child.
    pub fn find_coords(&self) -> Option<ElementId> {
        search::first_child_of_type(self.doc, &self.data().children, PageType::Coords)
    }

    /// First direct `Baseline` child.
    pub fn find_baseline(&self) -> Option<ElementId> {
        search::first_child_of_type(self.doc, &self.data().children, PageType::Baseline)
    }

    /// Resolve the text of this element.
    ///
    /// - `Unicode`/`PlainText` elements return their own text.
    /// - `TextEquiv` elements return the text of their `source` child.
    /// - Any other element picks one of its direct `TextEquiv` children: the
    ///   one whose `index` attribute equals `index` if given, otherwise the
    ///   lowest declared index, otherwise the first one without an index.
    pub fn find_text(&self, index: Option<i64>, source: TextSource) -> Option<&'a str> {
        let data = self.data();
        if data.page_type.is_text_leaf() {
            return data.text.as_deref();
        }
        if data.page_type == PageType::TextEquiv {
            return text_of_equiv(self.doc, self.handle, source);
        }
        text_from_children(self.doc, &data.children, index, source)
    }
}

/// Text of the `source` child of a `TextEquiv`.
pub(crate) fn text_of_equiv(doc: &PageXml, equiv: ElementId, source: TextSource) -> Option<&str> {
    let leaf = search::first_child_of_type(doc, &doc.node(equiv).children, source.page_type())?;
    doc.node(leaf).text.as_deref()
}

/// Select a `TextEquiv` among `children` and return its text.
pub(crate) fn text_from_children<'a>(
    doc: &'a PageXml,
    children: &[ElementId],
    index: Option<i64>,
    source: TextSource,
) -> Option<&'a str> {
    let equivs: Vec<ElementId> = children
        .iter()
        .copied()
        .filter(|&child| doc.node(child).page_type == PageType::TextEquiv)
        .collect();
    let declared = |equiv: ElementId| -> Option<i64> {
        doc.node(equiv)
            .attributes
            .get("index")
            .and_then(|value| value.trim().parse().ok())
    };

    let selected = match index {
        Some(wanted) => equivs.iter().copied().find(|&e| declared(e) == Some(wanted)),
        None => {
            if equivs.len() > 1 {
                log::debug!("{} TextEquiv candidates, selecting the lowest index", equivs.len());
            }
            equivs
                .iter()
                .copied()
                .filter_map(|e| declared(e).map(|i| (i, e)))
                .min_by_key(|&(i, _)| i)
                .map(|(_, e)| e)
                .or_else(|| {
                    equivs
                        .iter()
                        .copied()
                        .find(|&e| !doc.node(e).attributes.contains_key("index"))
                })
        },
    }?;

    text_of_equiv(doc, selected, source)
}

/// Mutable view of an element.
pub struct ElementMut<'a> {
    doc: &'a mut PageXml,
    handle: ElementId,
}

impl<'a> ElementMut<'a> {
    pub(crate) fn new(doc: &'a mut PageXml, handle: ElementId) -> Self {
        Self { doc, handle }
    }

    fn data(&mut self) -> &mut ElementData {
        self.doc.node_mut(self.handle)
    }

    /// Handle of this element.
    pub fn handle(&self) -> ElementId {
        self.handle
    }

    /// Read-only view of this element.
    pub fn as_element(&self) -> Element<'_> {
        Element::new(&*self.doc, self.handle)
    }

    /// Change the element type.
    pub fn set_page_type(&mut self, page_type: PageType) {
        self.data().page_type = page_type;
    }

    /// Set an attribute; `None` removes it.
    ///
    /// Existing keys keep their position, new keys are appended.
    pub fn set_attribute(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.data().attributes.insert(key.to_string(), value.to_string());
            },
            None => {
                self.data().attributes.shift_remove(key);
            },
        }
    }

    /// Remove an attribute, returning its value if it was set.
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.data().attributes.shift_remove(key)
    }

    /// Remove all attributes.
    pub fn clear_attributes(&mut self) {
        self.data().attributes.clear();
    }

    /// Set the element text; empty or whitespace-only text is stored as `None`.
    pub fn set_text(&mut self, text: Option<impl Into<String>>) {
        self.data().text = normalize_text(text.map(Into::into));
    }

    /// Create a new child element at `index` (clamped) or appended.
    pub fn create(
        &mut self,
        page_type: PageType,
        index: Option<usize>,
        attributes: &[(&str, &str)],
    ) -> ElementId {
        let child = self.doc.alloc(page_type, attribute_map(attributes));
        self.doc.attach(Parent::Element(self.handle), child, index);
        child
    }

    /// Link an existing element as a child at `index` (clamped) or appended.
    ///
    /// The element is first removed from its current parent.
    pub fn link(&mut self, child: ElementId, index: Option<usize>) -> Result<()> {
        self.doc.link_into(Parent::Element(self.handle), child, index, false)
    }

    /// Remove `child` from this element's children.
    ///
    /// Returns `None` if it is not a child of this element.
    pub fn unlink(&mut self, child: ElementId) -> Option<ElementId> {
        self.doc.remove_child(Parent::Element(self.handle), child).then_some(child)
    }

    /// Remove this element from its own parent.
    pub fn detach(&mut self) -> Option<ElementId> {
        self.doc.detach(self.handle)
    }

    /// Remove all children.
    pub fn clear_children(&mut self) {
        let children = self.as_element().children();
        for child in children {
            self.doc.remove_child(Parent::Element(self.handle), child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_with_equivs() -> (PageXml, ElementId) {
        let mut page = PageXml::new("scan.png", 100, 100);
        let region = page.create(PageType::TextRegion, None, &[("id", "r1")], true).unwrap();
        let line = page
            .element_mut(region)
            .unwrap()
            .create(PageType::TextLine, None, &[("id", "l1")]);
        for (index, text) in [("1", "second"), ("0", "first")] {
            let equiv = page
                .element_mut(line)
                .unwrap()
                .create(PageType::TextEquiv, None, &[("index", index)]);
            let unicode = page.element_mut(equiv).unwrap().create(PageType::Unicode, None, &[]);
            page.element_mut(unicode).unwrap().set_text(Some(text));
        }
        (page, line)
    }

    #[test]
    fn test_attribute_order_and_removal() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let id = page.new_element(PageType::Coords, &[("points", "0,0"), ("conf", "0.9")]);
        let mut element = page.element_mut(id).unwrap();
        element.set_attribute("id", Some("c1"));
        element.set_attribute("points", Some("1,1"));
        assert_eq!(
            element.as_element().attributes().keys().collect::<Vec<_>>(),
            vec!["points", "conf", "id"]
        );

        element.set_attribute("conf", None);
        assert_eq!(element.remove_attribute("missing"), None);
        assert_eq!(element.remove_attribute("id"), Some("c1".to_string()));
        assert_eq!(element.as_element().attribute("points"), Some("1,1"));
        assert_eq!(element.as_element().attribute("conf"), None);

        element.clear_attributes();
        assert!(element.as_element().attributes().is_empty());
    }

    #[test]
    fn test_attributes_snapshot_isolation() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let id = page.new_element(PageType::Word, &[("id", "w1")]);
        let mut snapshot = page.element(id).unwrap().attributes();
        snapshot.insert("extra".to_string(), "1".to_string());
        assert!(!page.element(id).unwrap().has_attribute("extra"));
    }

    #[test]
    fn test_empty_text_is_none() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let id = page.new_element(PageType::Unicode, &[]);
        page.element_mut(id).unwrap().set_text(Some(""));
        assert_eq!(page.element(id).unwrap().text(), None);
        page.element_mut(id).unwrap().set_text(Some("a"));
        assert_eq!(page.element(id).unwrap().text(), Some("a"));
        page.element_mut(id).unwrap().set_text(None::<String>);
        assert_eq!(page.element(id).unwrap().text(), None);
        page.element_mut(id).unwrap().set_text(Some(" \n\t"));
        assert_eq!(page.element(id).unwrap().text(), None);
        page.element_mut(id).unwrap().set_text(Some(" a "));
        assert_eq!(page.element(id).unwrap().text(), Some(" a "));
    }

    #[test]
    fn test_create_link_unlink() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let region = page.create(PageType::TextRegion, None, &[("id", "r1")], true).unwrap();
        let mut region_mut = page.element_mut(region).unwrap();
        let a = region_mut.create(PageType::TextLine, None, &[("id", "a")]);
        let b = region_mut.create(PageType::TextLine, Some(0), &[("id", "b")]);
        let c = region_mut.create(PageType::TextLine, Some(99), &[("id", "c")]);
        assert_eq!(region_mut.as_element().children(), vec![b, a, c]);
        assert_eq!(page.element(a).unwrap().parent(), Some(Parent::Element(region)));

        let mut region_mut = page.element_mut(region).unwrap();
        assert_eq!(region_mut.unlink(a), Some(a));
        assert_eq!(region_mut.unlink(a), None);
        assert_eq!(page.element(a).unwrap().parent(), None);

        page.element_mut(region).unwrap().link(a, Some(1)).unwrap();
        assert_eq!(page.element(region).unwrap().children(), vec![b, a, c]);
    }

    #[test]
    fn test_link_moves_between_parents() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let r1 = page.create(PageType::TextRegion, None, &[("id", "r1")], true).unwrap();
        let r2 = page.create(PageType::TextRegion, None, &[("id", "r2")], true).unwrap();
        let line = page.element_mut(r1).unwrap().create(PageType::TextLine, None, &[]);

        page.element_mut(r2).unwrap().link(line, None).unwrap();
        assert!(page.element(r1).unwrap().is_empty());
        assert_eq!(page.element(r2).unwrap().children(), vec![line]);
        assert_eq!(page.element(line).unwrap().parent(), Some(Parent::Element(r2)));
    }

    #[test]
    fn test_link_rejects_cycles() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let region = page.create(PageType::TextRegion, None, &[("id", "r1")], true).unwrap();
        let line = page.element_mut(region).unwrap().create(PageType::TextLine, None, &[]);

        assert!(page.element_mut(line).unwrap().link(region, None).is_err());
        assert!(page.element_mut(line).unwrap().link(line, None).is_err());
        assert_eq!(page.element(region).unwrap().parent(), Some(Parent::Page));
    }

    #[test]
    fn test_detach_and_clear_children() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let region = page.create(PageType::TextRegion, None, &[("id", "r1")], true).unwrap();
        let mut region_mut = page.element_mut(region).unwrap();
        let coords = region_mut.create(PageType::Coords, None, &[("points", "0,0 1,1")]);
        let line = region_mut.create(PageType::TextLine, None, &[]);

        assert_eq!(page.element_mut(coords).unwrap().detach(), Some(coords));
        assert_eq!(page.element_mut(coords).unwrap().detach(), None);

        page.element_mut(region).unwrap().clear_children();
        assert!(page.element(region).unwrap().is_empty());
        assert!(!page.element(line).unwrap().is_linked());
    }

    #[test]
    fn test_detach_region_updates_reading_order() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let r1 = page.create(PageType::TextRegion, None, &[("id", "r1")], true).unwrap();
        page.create(PageType::TextRegion, None, &[("id", "r2")], true).unwrap();
        page.element_mut(r1).unwrap().detach();
        assert_eq!(page.reading_order(), vec!["r2".to_string()]);
    }

    #[test]
    fn test_find_coords_and_baseline_direct_children_only() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let region = page.create(PageType::TextRegion, None, &[("id", "r1")], true).unwrap();
        let line = page.element_mut(region).unwrap().create(PageType::TextLine, None, &[]);
        let mut line_mut = page.element_mut(line).unwrap();
        let coords = line_mut.create(PageType::Coords, None, &[]);
        let baseline = line_mut.create(PageType::Baseline, None, &[]);

        assert_eq!(page.element(line).unwrap().find_coords(), Some(coords));
        assert_eq!(page.element(line).unwrap().find_baseline(), Some(baseline));
        assert_eq!(page.element(region).unwrap().find_coords(), None);
        assert_eq!(page.element(region).unwrap().find_baseline(), None);
    }

    #[test]
    fn test_find_text_lowest_index() {
        let (page, line) = line_with_equivs();
        let line = page.element(line).unwrap();
        assert_eq!(line.find_text(None, TextSource::Unicode), Some("first"));
        assert_eq!(line.find_text(Some(1), TextSource::Unicode), Some("second"));
        assert_eq!(line.find_text(Some(0), TextSource::Unicode), Some("first"));
        assert_eq!(line.find_text(Some(5), TextSource::Unicode), None);
        assert_eq!(line.find_text(None, TextSource::PlainText), None);
    }

    #[test]
    fn test_find_text_on_equiv_and_leaf() {
        let (page, line) = line_with_equivs();
        let equiv = page.element(line).unwrap().child(0).unwrap();
        let leaf = page.element(equiv).unwrap().child(0).unwrap();
        assert_eq!(page.element(equiv).unwrap().find_text(None, TextSource::Unicode), Some("second"));
        assert_eq!(page.element(leaf).unwrap().find_text(Some(7), TextSource::PlainText), Some("second"));
    }

    #[test]
    fn test_find_text_falls_back_to_unindexed() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let line = page.new_element(PageType::TextLine, &[]);
        let equiv = page.element_mut(line).unwrap().create(PageType::TextEquiv, None, &[]);
        let plain = page.element_mut(equiv).unwrap().create(PageType::PlainText, None, &[]);
        page.element_mut(plain).unwrap().set_text(Some("plain"));

        let line = page.element(line).unwrap();
        assert_eq!(line.find_text(None, TextSource::PlainText), Some("plain"));
        assert_eq!(line.find_text(None, TextSource::Unicode), None);
        assert_eq!(line.find_text(Some(0), TextSource::PlainText), None);
    }

    #[test]
    fn test_find_text_without_equivs() {
        let mut page = PageXml::new("scan.png", 100, 100);
        let word = page.new_element(PageType::Word, &[]);
        assert_eq!(page.element(word).unwrap().find_text(None, TextSource::Unicode), None);
    }
}
