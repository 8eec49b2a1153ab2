//! Reading order of the page regions.
//!
//! The reading order is a list of region ids kept next to the physical child
//! order of the page. The two are only synchronized on request:
//! [`PageXml::reading_order_apply`] re-sequences the children after the list,
//! [`PageXml::reading_order_create`] and [`PageXml::reading_order_sort`] derive
//! the list from the children. Ids are not validated when the list is set;
//! ids without a matching region are skipped when it is applied.

use crate::document::PageXml;
use crate::element::ElementId;
use crate::geometry::{self, Axis};
use crate::page_type::PageType;
use crate::search;
use crate::utils::safe_float_cmp;
use std::cmp::Ordering;

/// Which polygon value a region is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortReference {
    /// Smallest coordinate on the sort axis
    #[default]
    Minimum,
    /// Largest coordinate on the sort axis
    Maximum,
    /// Mean coordinate on the sort axis
    Centroid,
}

/// Direction of a geometric sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending y
    #[default]
    TopBottom,
    /// Descending y
    BottomTop,
    /// Ascending x
    LeftRight,
    /// Descending x
    RightLeft,
}

impl SortDirection {
    /// Axis the direction sorts on.
    pub fn axis(self) -> Axis {
        match self {
            Self::TopBottom | Self::BottomTop => Axis::Y,
            Self::LeftRight | Self::RightLeft => Axis::X,
        }
    }

    fn is_descending(self) -> bool {
        matches!(self, Self::BottomTop | Self::RightLeft)
    }
}

impl PageXml {
    /// Copy of the reading order.
    pub fn reading_order(&self) -> Vec<String> {
        self.reading_order.clone()
    }

    /// Replace the reading order; an empty list clears it.
    ///
    /// With `apply`, the children are re-sequenced immediately.
    pub fn reading_order_set<I, S>(&mut self, ids: I, apply: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reading_order = ids.into_iter().map(Into::into).collect();
        if apply {
            self.reading_order_apply();
        }
    }

    /// Derive the reading order from the current region order.
    ///
    /// Regions without an `id` are skipped. Nothing happens if a reading
    /// order exists and `overwrite` is false.
    pub fn reading_order_create(&mut self, overwrite: bool) {
        if !self.reading_order.is_empty() && !overwrite {
            return;
        }
        self.reading_order = self
            .regions()
            .into_iter()
            .filter_map(|region| self.node(region).attributes.get("id").cloned())
            .collect();
    }

    /// Empty the reading order without touching the children.
    pub fn reading_order_clear(&mut self) {
        self.reading_order.clear();
    }

    /// Re-sequence the page children after the reading order.
    ///
    /// Non-region children come first in their current relative order, then
    /// the regions listed in the reading order, then the remaining regions in
    /// their current relative order. Listed ids without a region are skipped.
    pub fn reading_order_apply(&mut self) {
        let (mut regions, others): (Vec<ElementId>, Vec<ElementId>) = self
            .children
            .iter()
            .copied()
            .partition(|&child| self.node(child).page_type.is_region());

        let mut ordered = others;
        ordered.reserve(regions.len());
        for id in &self.reading_order {
            let found = regions
                .iter()
                .position(|&region| self.node(region).attributes.get("id") == Some(id));
            match found {
                Some(position) => ordered.push(regions.remove(position)),
                None => log::debug!("reading order id '{}' has no region", id),
            }
        }
        ordered.extend(regions);
        self.children = ordered;
    }

    /// Sort the reading order by region geometry.
    ///
    /// Each region is keyed by the points of its first direct `Coords` child.
    /// Regions without `Coords` or with unparsable points go last. Ties keep
    /// their current relative order. Regions without an `id` are not listed.
    ///
    /// # Example
    ///
    /// ```
    /// use pagexml::{PageType, PageXml, SortDirection, SortReference};
    ///
    /// let mut page = PageXml::new("scan.png", 100, 100);
    /// for (id, points) in [("low", "0,20 10,20 10,30"), ("high", "0,0 10,0 10,10")] {
    ///     let region = page.create(PageType::TextRegion, None, &[("id", id)], true)?;
    ///     page.element_mut(region).unwrap().create(PageType::Coords, None, &[("points", points)]);
    /// }
    ///
    /// page.reading_order_sort(SortReference::Minimum, SortDirection::TopBottom, true);
    /// assert_eq!(page.reading_order(), vec!["high", "low"]);
    /// # Ok::<(), pagexml::Error>(())
    /// ```
    pub fn reading_order_sort(&mut self, reference: SortReference, direction: SortDirection, apply: bool) {
        let axis = direction.axis();
        let mut keyed: Vec<(Option<f64>, String)> = self
            .regions()
            .into_iter()
            .filter_map(|region| {
                let id = self.node(region).attributes.get("id")?.clone();
                Some((self.sort_key(region, reference, axis), id))
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) if direction.is_descending() => safe_float_cmp(*b, *a),
            (Some(a), Some(b)) => safe_float_cmp(*a, *b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        self.reading_order = keyed.into_iter().map(|(_, id)| id).collect();
        if apply {
            self.reading_order_apply();
        }
    }

    fn sort_key(&self, region: ElementId, reference: SortReference, axis: Axis) -> Option<f64> {
        let coords = search::first_child_of_type(self, &self.node(region).children, PageType::Coords)?;
        let points = geometry::parse_points(self.node(coords).attributes.get("points")?)?;
        match reference {
            SortReference::Minimum => geometry::minimum(&points, axis).map(|v| v as f64),
            SortReference::Maximum => geometry::maximum(&points, axis).map(|v| v as f64),
            SortReference::Centroid => geometry::centroid(&points, axis),
        }
    }
}
