//! PAGE-XML document model.

use crate::element::{attribute_map, text_from_children, Element, ElementData, ElementId, ElementMut, Parent, TextSource};
use crate::error::{Error, Result};
use crate::page_type::PageType;
use crate::search::{self, Depth, Query};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Creator written into new documents.
pub const DEFAULT_CREATOR: &str = "pagexml";

/// PAGE-XML document.
///
/// The document plays the role of the `Page` element: it holds the page
/// attributes (image filename and size plus any extension attributes), the
/// top-level children, the metadata fields and the explicit reading order of
/// its regions.
///
/// All elements of the document live in an arena owned by it; callers address
/// them through [`ElementId`] handles and the [`element`](Self::element) /
/// [`element_mut`](Self::element_mut) views.
///
/// # Example
///
/// ```
/// use pagexml::{Depth, PageType, PageXml, Query};
///
/// let mut page = PageXml::new("scan.png", 2480, 3508);
/// let region = page.create(PageType::TextRegion, None, &[("id", "r1")], true)?;
/// page.element_mut(region)
///     .unwrap()
///     .create(PageType::Coords, None, &[("points", "0,0 10,0 10,10 0,10")]);
///
/// let coords = page.find_all(&Query::new().with_type(PageType::Coords).with_depth(Depth::Unlimited));
/// assert_eq!(coords.len(), 1);
/// assert_eq!(page.reading_order(), vec!["r1".to_string()]);
/// # Ok::<(), pagexml::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PageXml {
    /// Element storage; handles index into it
    pub(crate) arena: Vec<ElementData>,
    /// Attributes of the `Page` element
    pub(crate) attributes: IndexMap<String, String>,
    /// Top-level children of the `Page` element
    pub(crate) children: Vec<ElementId>,
    pub(crate) creator: String,
    pub(crate) created: DateTime<Utc>,
    pub(crate) last_change: DateTime<Utc>,
    /// Region ids in reading sequence
    pub(crate) reading_order: Vec<String>,
    pub(crate) source_path: Option<PathBuf>,
}

impl PageXml {
    /// Create an empty document for the given page image.
    pub fn new(image_filename: &str, image_width: u32, image_height: u32) -> Self {
        let mut doc = Self::empty();
        doc.set_image(image_filename, image_width, image_height);
        doc
    }

    /// Document without page attributes; used by the importer.
    pub(crate) fn empty() -> Self {
        let now = Utc::now();
        Self {
            arena: Vec::new(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            creator: DEFAULT_CREATOR.to_string(),
            created: now,
            last_change: now,
            reading_order: Vec::new(),
            source_path: None,
        }
    }

    // ----- arena -----

    pub(crate) fn node(&self, id: ElementId) -> &ElementData {
        &self.arena[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> &mut ElementData {
        &mut self.arena[id.index()]
    }

    fn owns(&self, id: ElementId) -> bool {
        id.index() < self.arena.len()
    }

    fn check(&self, id: ElementId) -> Result<()> {
        if self.owns(id) {
            Ok(())
        } else {
            Err(Error::ElementNotFound(id))
        }
    }

    /// Allocate an unlinked element.
    pub(crate) fn alloc(&mut self, page_type: PageType, attributes: IndexMap<String, String>) -> ElementId {
        let id = ElementId::from_index(self.arena.len());
        self.arena.push(ElementData::new(page_type, attributes));
        id
    }

    fn child_list(&self, parent: Parent) -> &Vec<ElementId> {
        match parent {
            Parent::Page => &self.children,
            Parent::Element(id) => &self.node(id).children,
        }
    }

    fn child_list_mut(&mut self, parent: Parent) -> &mut Vec<ElementId> {
        match parent {
            Parent::Page => &mut self.children,
            Parent::Element(id) => &mut self.node_mut(id).children,
        }
    }

    /// Insert an unlinked `child` under `parent`, returning its position.
    ///
    /// Out-of-range indices append.
    pub(crate) fn attach(&mut self, parent: Parent, child: ElementId, index: Option<usize>) -> usize {
        let list = self.child_list_mut(parent);
        let position = index.map_or(list.len(), |i| i.min(list.len()));
        list.insert(position, child);
        self.node_mut(child).parent = Some(parent);
        position
    }

    /// Remove `child` from `parent`'s children.
    ///
    /// Removing from the page also drops the child's id from the reading
    /// order. Returns false if `child` was not a child of `parent`.
    pub(crate) fn remove_child(&mut self, parent: Parent, child: ElementId) -> bool {
        if !self.owns(child) {
            return false;
        }
        if let Parent::Element(id) = parent {
            if !self.owns(id) {
                return false;
            }
        }
        let list = self.child_list_mut(parent);
        let Some(position) = list.iter().position(|&c| c == child) else {
            return false;
        };
        list.remove(position);
        self.node_mut(child).parent = None;

        if parent == Parent::Page {
            if let Some(id) = self.node(child).attributes.get("id").cloned() {
                let before = self.reading_order.len();
                self.reading_order.retain(|entry| *entry != id);
                if self.reading_order.len() != before {
                    log::debug!("removed '{}' from the reading order", id);
                }
            }
        }
        true
    }

    /// Remove `id` from its current parent.
    pub(crate) fn detach(&mut self, id: ElementId) -> Option<ElementId> {
        let parent = self.arena.get(id.index())?.parent?;
        self.remove_child(parent, id).then_some(id)
    }

    /// Check if `ancestor` is `node` or one of its ancestors.
    fn is_ancestor(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = match self.node(id).parent {
                Some(Parent::Element(parent)) => Some(parent),
                _ => None,
            };
        }
        false
    }

    /// Validate an insertion under the page.
    ///
    /// Returns the id to add to the reading order, if any.
    fn check_page_insert(
        &self,
        page_type: PageType,
        id: Option<&str>,
        on_page: bool,
        reading_order: bool,
    ) -> Result<Option<String>> {
        if page_type == PageType::ReadingOrder {
            return Err(Error::ReservedElement(page_type.tag().to_string()));
        }
        if !reading_order || !page_type.is_region() {
            return Ok(None);
        }
        match id {
            Some(id) if !on_page && self.reading_order.iter().any(|entry| entry == id) => {
                Err(Error::DuplicateReadingOrderId(id.to_string()))
            },
            Some(id) => Ok(Some(id.to_string())),
            None => Ok(None),
        }
    }

    /// Reading-order slot mirroring a page insertion at `position`.
    ///
    /// The slot follows the nearest preceding region that is already in the
    /// reading order.
    fn reading_order_slot(&self, position: usize) -> usize {
        self.children[..position]
            .iter()
            .rev()
            .filter_map(|&child| {
                let node = self.node(child);
                if !node.page_type.is_region() {
                    return None;
                }
                let id = node.attributes.get("id")?;
                self.reading_order.iter().position(|entry| entry == id)
            })
            .next()
            .map_or(0, |slot| slot + 1)
    }

    fn insert_reading_order(&mut self, id: String, position: usize, append: bool) {
        let slot = if append {
            self.reading_order.len()
        } else {
            self.reading_order_slot(position)
        };
        log::debug!("inserting '{}' into the reading order at {}", id, slot);
        self.reading_order.insert(slot, id);
    }

    /// Link `child` under `parent`, detaching it from its previous parent.
    pub(crate) fn link_into(
        &mut self,
        parent: Parent,
        child: ElementId,
        index: Option<usize>,
        reading_order: bool,
    ) -> Result<()> {
        self.check(child)?;
        let on_page = self.node(child).parent == Some(Parent::Page);
        let mut ordered_id = None;
        match parent {
            Parent::Element(target) => {
                self.check(target)?;
                if self.is_ancestor(child, target) {
                    return Err(Error::CyclicLink(child));
                }
            },
            Parent::Page => {
                let node = self.node(child);
                ordered_id = self.check_page_insert(
                    node.page_type,
                    node.attributes.get("id").map(String::as_str),
                    on_page,
                    reading_order,
                )?;
            },
        }

        if parent == Parent::Page && on_page && !reading_order {
            // Move within the page; the reading order stays as it is
            self.children.retain(|&c| c != child);
        } else {
            self.detach(child);
        }
        let position = self.attach(parent, child, index);
        if let Some(id) = ordered_id {
            self.insert_reading_order(id, position, index.is_none());
        }
        Ok(())
    }

    // ----- element access -----

    /// Read-only view of an element, `None` for a foreign handle.
    pub fn element(&self, id: ElementId) -> Option<Element<'_>> {
        self.owns(id).then(|| Element::new(self, id))
    }

    /// Mutable view of an element, `None` for a foreign handle.
    pub fn element_mut(&mut self, id: ElementId) -> Option<ElementMut<'_>> {
        if self.owns(id) {
            Some(ElementMut::new(self, id))
        } else {
            None
        }
    }

    /// Create an element that is not linked anywhere yet.
    ///
    /// Link it with [`link`](Self::link) or [`ElementMut::link`].
    pub fn new_element(&mut self, page_type: PageType, attributes: &[(&str, &str)]) -> ElementId {
        self.alloc(page_type, attribute_map(attributes))
    }

    // ----- metadata -----

    /// Creator of the document.
    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// Set the creator.
    pub fn set_creator(&mut self, creator: impl Into<String>) {
        self.creator = creator.into();
    }

    /// Creation time.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Set the creation time.
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.created = created;
    }

    /// Time of the last change.
    pub fn last_change(&self) -> DateTime<Utc> {
        self.last_change
    }

    /// Set the time of the last change.
    pub fn set_last_change(&mut self, last_change: DateTime<Utc>) {
        self.last_change = last_change;
    }

    /// Set the time of the last change to now.
    pub fn touch(&mut self) {
        self.last_change = Utc::now();
    }

    /// Path the document was opened from.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub(crate) fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.source_path = Some(path.into());
    }

    // ----- page attributes -----

    /// `imageFilename` page attribute.
    pub fn image_filename(&self) -> Option<&str> {
        self.attribute("imageFilename")
    }

    /// `imageWidth` page attribute, `None` if missing or not a number.
    pub fn image_width(&self) -> Option<u32> {
        self.attribute("imageWidth").and_then(|v| v.trim().parse().ok())
    }

    /// `imageHeight` page attribute, `None` if missing or not a number.
    pub fn image_height(&self) -> Option<u32> {
        self.attribute("imageHeight").and_then(|v| v.trim().parse().ok())
    }

    /// Set the image descriptor attributes.
    pub fn set_image(&mut self, filename: &str, width: u32, height: u32) {
        self.set_attribute("imageFilename", Some(filename));
        self.set_attribute("imageWidth", Some(&width.to_string()));
        self.set_attribute("imageHeight", Some(&height.to_string()));
    }

    /// Page attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Copy of the page attributes in insertion order.
    pub fn attributes(&self) -> IndexMap<String, String> {
        self.attributes.clone()
    }

    /// Set a page attribute; `None` removes it.
    pub fn set_attribute(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.attributes.insert(key.to_string(), value.to_string());
            },
            None => {
                self.attributes.shift_remove(key);
            },
        }
    }

    /// Remove a page attribute, returning its value if it was set.
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    /// Remove all page attributes.
    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    // ----- children -----

    /// Copy of the top-level child handles.
    pub fn children(&self) -> Vec<ElementId> {
        self.children.clone()
    }

    /// Top-level child at `index`.
    pub fn child(&self, index: usize) -> Option<ElementId> {
        self.children.get(index).copied()
    }

    /// Number of top-level children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the page has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Check if `id` is a top-level child.
    pub fn contains(&self, id: ElementId) -> bool {
        self.children.contains(&id)
    }

    /// Top-level region children, in child order.
    pub fn regions(&self) -> Vec<ElementId> {
        self.children
            .iter()
            .copied()
            .filter(|&child| self.node(child).page_type.is_region())
            .collect()
    }

    /// Top-level children of one region type.
    pub fn regions_of(&self, page_type: PageType) -> Vec<ElementId> {
        self.children
            .iter()
            .copied()
            .filter(|&child| self.node(child).page_type == page_type)
            .collect()
    }

    /// Create a top-level element at `index` (clamped) or appended.
    ///
    /// With `reading_order`, a region carrying an `id` attribute is also
    /// inserted into the reading order, after the nearest preceding region
    /// that is already listed there.
    ///
    /// # Errors
    ///
    /// - [`Error::ReservedElement`] for `ReadingOrder`
    /// - [`Error::DuplicateReadingOrderId`] if the id is already listed
    pub fn create(
        &mut self,
        page_type: PageType,
        index: Option<usize>,
        attributes: &[(&str, &str)],
        reading_order: bool,
    ) -> Result<ElementId> {
        let attributes = attribute_map(attributes);
        let ordered_id = self.check_page_insert(
            page_type,
            attributes.get("id").map(String::as_str),
            false,
            reading_order,
        )?;

        let child = self.alloc(page_type, attributes);
        let position = self.attach(Parent::Page, child, index);
        if let Some(id) = ordered_id {
            self.insert_reading_order(id, position, index.is_none());
        }
        Ok(child)
    }

    /// Link an existing element at the top level.
    ///
    /// The element is first removed from its current parent. Reading-order
    /// handling is the same as for [`create`](Self::create); without
    /// `reading_order`, moving a top-level child leaves the reading order
    /// unchanged.
    pub fn link(&mut self, id: ElementId, index: Option<usize>, reading_order: bool) -> Result<()> {
        self.link_into(Parent::Page, id, index, reading_order)
    }

    /// Remove a top-level child and its id from the reading order.
    ///
    /// Returns `None` if `id` is not a top-level child.
    pub fn unlink(&mut self, id: ElementId) -> Option<ElementId> {
        self.remove_child(Parent::Page, id).then_some(id)
    }

    /// Remove all top-level children, or only the regions.
    pub fn clear(&mut self, regions_only: bool) {
        if !regions_only {
            for child in std::mem::take(&mut self.children) {
                self.node_mut(child).parent = None;
            }
            self.reading_order.clear();
            return;
        }
        for region in self.regions() {
            self.remove_child(Parent::Page, region);
        }
    }

    // ----- search -----

    /// All elements below the page matching `query`, in pre-order.
    pub fn find_all(&self, query: &Query) -> Vec<ElementId> {
        search::find_all(self, &self.children, query)
    }

    /// First element below the page matching `query`.
    pub fn find_one(&self, query: &Query) -> Option<ElementId> {
        search::find_one(self, &self.children, query)
    }

    /// First element with the given `id` attribute.
    pub fn find_by_id(&self, id: &str, depth: impl Into<Depth>) -> Option<ElementId> {
        self.find_one(&Query::new().with_id(id).with_depth(depth))
    }

    /// First top-level `Coords` child.
    pub fn find_coords(&self) -> Option<ElementId> {
        search::first_child_of_type(self, &self.children, PageType::Coords)
    }

    /// First top-level `Baseline` child.
    pub fn find_baseline(&self) -> Option<ElementId> {
        search::first_child_of_type(self, &self.children, PageType::Baseline)
    }

    /// Text of a top-level `TextEquiv`, selected as in [`Element::find_text`].
    pub fn find_text(&self, index: Option<i64>, source: TextSource) -> Option<&str> {
        text_from_children(self, &self.children, index, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(page: &mut PageXml, id: &str) -> ElementId {
        page.create(PageType::TextRegion, None, &[("id", id)], true).unwrap()
    }

    #[test]
    fn test_new_document() {
        let page = PageXml::new("scan.png", 2480, 3508);
        assert_eq!(page.creator(), DEFAULT_CREATOR);
        assert_eq!(page.image_filename(), Some("scan.png"));
        assert_eq!(page.image_width(), Some(2480));
        assert_eq!(page.image_height(), Some(3508));
        assert_eq!(page.created(), page.last_change());
        assert!(page.is_empty());
        assert!(page.source_path().is_none());
        assert_eq!(
            page.attributes().keys().collect::<Vec<_>>(),
            vec!["imageFilename", "imageWidth", "imageHeight"]
        );
    }

    #[test]
    fn test_page_attributes() {
        let mut page = PageXml::new("scan.png", 10, 10);
        page.set_attribute("type", Some("content"));
        page.set_attribute("imageWidth", Some("wide"));
        assert_eq!(page.image_width(), None);
        assert_eq!(page.remove_attribute("type"), Some("content".to_string()));
        assert_eq!(page.remove_attribute("type"), None);
        page.set_attribute("imageFilename", None);
        assert_eq!(page.image_filename(), None);
        page.clear_attributes();
        assert!(page.attributes().is_empty());
    }

    #[test]
    fn test_touch_moves_last_change() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let old = DateTime::parse_from_rfc3339("2001-01-01T00:00:00Z").unwrap().with_timezone(&Utc);
        page.set_last_change(old);
        page.touch();
        assert!(page.last_change() > old);
    }

    #[test]
    fn test_create_regions_and_order() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let r1 = region(&mut page, "r1");
        let border = page.create(PageType::Border, Some(0), &[], true).unwrap();
        let r2 = region(&mut page, "r2");
        let unnamed = page.create(PageType::ImageRegion, None, &[], true).unwrap();

        assert_eq!(page.children(), vec![border, r1, r2, unnamed]);
        assert_eq!(page.regions(), vec![r1, r2, unnamed]);
        assert_eq!(page.regions_of(PageType::ImageRegion), vec![unnamed]);
        assert_eq!(page.reading_order(), vec!["r1".to_string(), "r2".to_string()]);
        assert_eq!(page.element(r1).unwrap().parent(), Some(Parent::Page));
    }

    #[test]
    fn test_create_at_index_mirrors_reading_order() {
        let mut page = PageXml::new("scan.png", 10, 10);
        region(&mut page, "r1");
        region(&mut page, "r3");
        page.create(PageType::TextRegion, Some(1), &[("id", "r2")], true).unwrap();
        page.create(PageType::TextRegion, Some(0), &[("id", "r0")], true).unwrap();
        assert_eq!(page.reading_order(), vec!["r0", "r1", "r2", "r3"]);
    }

    #[test]
    fn test_create_without_reading_order() {
        let mut page = PageXml::new("scan.png", 10, 10);
        page.create(PageType::TextRegion, None, &[("id", "r1")], false).unwrap();
        assert!(page.reading_order().is_empty());
    }

    #[test]
    fn test_out_of_range_index_appends() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let r1 = region(&mut page, "r1");
        let r2 = page.create(PageType::TextRegion, Some(42), &[("id", "r2")], true).unwrap();
        assert_eq!(page.children(), vec![r1, r2]);
        assert_eq!(page.reading_order(), vec!["r1", "r2"]);
    }

    #[test]
    fn test_duplicate_reading_order_id() {
        let mut page = PageXml::new("scan.png", 10, 10);
        region(&mut page, "r1");
        let result = page.create(PageType::TextRegion, None, &[("id", "r1")], true);
        assert!(matches!(result, Err(Error::DuplicateReadingOrderId(id)) if id == "r1"));
        assert_eq!(page.len(), 1);
        assert_eq!(page.reading_order(), vec!["r1"]);
    }

    #[test]
    fn test_reading_order_element_is_reserved() {
        let mut page = PageXml::new("scan.png", 10, 10);
        assert!(matches!(
            page.create(PageType::ReadingOrder, None, &[], true),
            Err(Error::ReservedElement(_))
        ));
        let orphan = page.new_element(PageType::ReadingOrder, &[]);
        assert!(page.link(orphan, None, false).is_err());
        assert!(page.is_empty());
    }

    #[test]
    fn test_link_moves_region_to_page() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let r1 = region(&mut page, "r1");
        let nested = page.element_mut(r1).unwrap().create(PageType::TextRegion, None, &[("id", "r1a")]);

        page.link(nested, Some(0), true).unwrap();
        assert_eq!(page.children(), vec![nested, r1]);
        assert!(page.element(r1).unwrap().is_empty());
        assert_eq!(page.reading_order(), vec!["r1a", "r1"]);
    }

    #[test]
    fn test_relink_on_page_moves_reading_order_entry() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let r1 = region(&mut page, "r1");
        let r2 = region(&mut page, "r2");
        page.link(r2, Some(0), true).unwrap();
        assert_eq!(page.children(), vec![r2, r1]);
        assert_eq!(page.reading_order(), vec!["r2", "r1"]);
    }

    #[test]
    fn test_relink_on_page_keeps_reading_order() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let r1 = region(&mut page, "r1");
        let r2 = region(&mut page, "r2");
        page.link(r2, Some(0), false).unwrap();
        assert_eq!(page.children(), vec![r2, r1]);
        assert_eq!(page.reading_order(), vec!["r1", "r2"]);
        assert_eq!(page.element(r2).unwrap().parent(), Some(Parent::Page));

        page.link(r1, Some(7), false).unwrap();
        assert_eq!(page.children(), vec![r2, r1]);
        assert_eq!(page.reading_order(), vec!["r1", "r2"]);
    }

    #[test]
    fn test_foreign_handle() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let mut other = PageXml::new("other.png", 10, 10);
        for _ in 0..3 {
            other.new_element(PageType::Word, &[]);
        }
        let foreign = other.new_element(PageType::Word, &[]);
        assert!(page.element(foreign).is_none());
        assert!(matches!(page.link(foreign, None, true), Err(Error::ElementNotFound(_))));
        assert_eq!(page.unlink(foreign), None);
    }

    #[test]
    fn test_unlink_region() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let r1 = region(&mut page, "r1");
        region(&mut page, "r2");
        assert_eq!(page.unlink(r1), Some(r1));
        assert_eq!(page.unlink(r1), None);
        assert_eq!(page.reading_order(), vec!["r2"]);
        assert_eq!(page.element(r1).unwrap().id(), Some("r1"));
        assert!(!page.element(r1).unwrap().is_linked());
    }

    #[test]
    fn test_clear_regions_only() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let border = page.create(PageType::Border, None, &[], true).unwrap();
        region(&mut page, "r1");
        page.reading_order_set(["r1", "gone"], false);

        page.clear(true);
        assert_eq!(page.children(), vec![border]);
        assert_eq!(page.reading_order(), vec!["gone"]);

        page.clear(false);
        assert!(page.is_empty());
        assert!(page.reading_order().is_empty());
        assert!(!page.element(border).unwrap().is_linked());
    }

    #[test]
    fn test_page_search() {
        let mut page = PageXml::new("scan.png", 10, 10);
        let r1 = region(&mut page, "r1");
        let line = page.element_mut(r1).unwrap().create(PageType::TextLine, None, &[("id", "l1")]);

        assert_eq!(page.find_by_id("l1", 0), None);
        assert_eq!(page.find_by_id("l1", 1), Some(line));
        assert_eq!(page.find_by_id("l1", -1), Some(line));
        assert_eq!(page.find_all(&Query::new()), vec![r1]);
        assert_eq!(page.find_all(&Query::new().with_depth(-1)), vec![r1, line]);
        assert_eq!(page.find_coords(), None);
    }

    #[test]
    fn test_children_snapshot_isolation() {
        let mut page = PageXml::new("scan.png", 10, 10);
        region(&mut page, "r1");
        let mut children = page.children();
        children.clear();
        let mut order = page.reading_order();
        order.push("extra".to_string());
        assert_eq!(page.len(), 1);
        assert_eq!(page.reading_order(), vec!["r1"]);
    }
}
