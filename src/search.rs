//! Depth-bounded tree search.
//!
//! The same pre-order filter backs [`Element::find_all`](crate::element::Element::find_all)
//! and [`PageXml::find_all`](crate::PageXml::find_all): children are visited
//! in array order, each child is tested before its own subtree is entered, so
//! the result order and the first match are deterministic.

use crate::document::PageXml;
use crate::element::{ElementData, ElementId};
use crate::page_type::PageType;
use indexmap::IndexMap;

/// How far a search descends below the starting node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Direct children plus the given number of additional levels
    ///
    /// `Limited(0)` searches only the direct children.
    Limited(u32),
    /// No depth limit
    Unlimited,
}

impl Depth {
    /// Depth budget for the next level down, `None` when exhausted.
    fn descend(self) -> Option<Self> {
        match self {
            Self::Unlimited => Some(Self::Unlimited),
            Self::Limited(0) => None,
            Self::Limited(n) => Some(Self::Limited(n - 1)),
        }
    }
}

impl From<i32> for Depth {
    /// `-1` (any negative value) is unlimited, `k >= 0` limits to k extra levels.
    fn from(depth: i32) -> Self {
        u32::try_from(depth).map_or(Self::Unlimited, Self::Limited)
    }
}

/// Search filter.
///
/// All given criteria must hold (conjunction). Criteria that are not set
/// match everything.
///
/// # Example
///
/// ```
/// use pagexml::{PageType, Query};
///
/// let query = Query::new()
///     .with_type(PageType::TextLine)
///     .with_attribute("custom", "structure {type:heading;}")
///     .with_depth(-1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    ids: Option<Vec<String>>,
    types: Option<Vec<PageType>>,
    attributes: IndexMap<String, String>,
    depth: Depth,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// Match everything among the direct children.
    pub fn new() -> Self {
        Self {
            ids: None,
            types: None,
            attributes: IndexMap::new(),
            depth: Depth::Limited(0),
        }
    }

    /// Add an accepted `id` attribute value.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.ids.get_or_insert_with(Vec::new).push(id.into());
        self
    }

    /// Add several accepted `id` attribute values.
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Add an accepted element type.
    pub fn with_type(mut self, page_type: PageType) -> Self {
        self.types.get_or_insert_with(Vec::new).push(page_type);
        self
    }

    /// Add several accepted element types.
    pub fn with_types(mut self, types: impl IntoIterator<Item = PageType>) -> Self {
        self.types.get_or_insert_with(Vec::new).extend(types);
        self
    }

    /// Require an attribute with exactly this value.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the search depth (`0`, `-1` or `k`, or a [`Depth`]).
    pub fn with_depth(mut self, depth: impl Into<Depth>) -> Self {
        self.depth = depth.into();
        self
    }

    /// The configured search depth.
    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub(crate) fn matches(&self, node: &ElementData) -> bool {
        if let Some(types) = &self.types {
            if !types.contains(&node.page_type) {
                return false;
            }
        }
        if let Some(ids) = &self.ids {
            match node.attributes.get("id") {
                Some(id) if ids.iter().any(|wanted| wanted == id) => {},
                _ => return false,
            }
        }
        self.attributes
            .iter()
            .all(|(key, value)| node.attributes.get(key) == Some(value))
    }
}

/// Collect all matches below `children`, in pre-order.
pub(crate) fn find_all(doc: &PageXml, children: &[ElementId], query: &Query) -> Vec<ElementId> {
    let mut found = Vec::new();
    collect(doc, children, query, query.depth, &mut found);
    found
}

/// First match below `children` in the same order as [`find_all`].
pub(crate) fn find_one(doc: &PageXml, children: &[ElementId], query: &Query) -> Option<ElementId> {
    first(doc, children, query, query.depth)
}

fn collect(
    doc: &PageXml,
    children: &[ElementId],
    query: &Query,
    depth: Depth,
    found: &mut Vec<ElementId>,
) {
    for &child in children {
        let node = doc.node(child);
        if query.matches(node) {
            found.push(child);
        }
        if let Some(next) = depth.descend() {
            collect(doc, &node.children, query, next, found);
        }
    }
}

fn first(doc: &PageXml, children: &[ElementId], query: &Query, depth: Depth) -> Option<ElementId> {
    for &child in children {
        let node = doc.node(child);
        if query.matches(node) {
            return Some(child);
        }
        if let Some(next) = depth.descend() {
            if let Some(found) = first(doc, &node.children, query, next) {
                return Some(found);
            }
        }
    }
    None
}

/// First direct child of the given type.
pub(crate) fn first_child_of_type(
    doc: &PageXml,
    children: &[ElementId],
    page_type: PageType,
) -> Option<ElementId> {
    children
        .iter()
        .copied()
        .find(|&child| doc.node(child).page_type == page_type)
}
