//! PAGE-XML element types.
//!
//! Every element that may appear below the `Page` element (and the `Metadata`
//! family) is represented by one [`PageType`] variant. Each variant is bound to
//! exactly one tag name; [`PageType::parse`] and [`PageType::tag`] are exact
//! inverses of each other.
//!
//! The element set follows the PAGE content schema (`PcGtsType`):
//! <https://ocr-d.de/de/gt-guidelines/pagexml/pagecontent_xsd_Complex_Type_pc_PcGtsType.html>

use phf::phf_map;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

macro_rules! page_types {
    ($($(#[$doc:meta])* $variant:ident => $tag:literal,)+) => {
        /// Enumeration of PAGE-XML element and region types.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PageType {
            $($(#[$doc])* $variant,)+
        }

        impl PageType {
            /// All element types in declaration order.
            pub const ALL: &'static [PageType] = &[$(PageType::$variant,)+];

            /// Tag name of this element type.
            pub fn tag(self) -> &'static str {
                match self {
                    $(PageType::$variant => $tag,)+
                }
            }
        }

        static TAGS: phf::Map<&'static str, PageType> = phf_map! {
            $($tag => PageType::$variant,)+
        };
    };
}

page_types! {
    /// Document metadata container.
    Metadata => "Metadata",
    /// Container for user-defined attributes.
    UserDefined => "UserDefined",
    /// Structured custom data defined by name, type and value.
    UserAttribute => "UserAttribute",
    /// Single metadata entry.
    MetadataItem => "MetadataItem",
    /// Semantic labels.
    Labels => "Labels",
    /// A semantic label.
    Label => "Label",
    /// Alternative image (e.g. binarized) of the enclosing element.
    AlternativeImage => "AlternativeImage",
    /// Border of the actual page inside the scanned image.
    Border => "Border",
    /// Polygon outline (`points` attribute).
    Coords => "Coords",
    /// Effective printed area of the page.
    PrintSpace => "PrintSpace",
    /// Reading order definition of the page.
    ReadingOrder => "ReadingOrder",
    /// Group with ordered members.
    OrderedGroup => "OrderedGroup",
    /// Indexed reference to a region.
    RegionRefIndexed => "RegionRefIndexed",
    /// Indexed group with ordered members.
    OrderedGroupIndexed => "OrderedGroupIndexed",
    /// Indexed group with unordered members.
    UnorderedGroupIndexed => "UnorderedGroupIndexed",
    /// Unindexed reference to a region.
    RegionRef => "RegionRef",
    /// Group with unordered members.
    UnorderedGroup => "UnorderedGroup",
    /// z-index layers of overlapping regions.
    Layers => "Layers",
    /// A single layer.
    Layer => "Layer",
    /// One-to-one relations between layout objects.
    Relations => "Relations",
    /// A single relation (`link` or `join`).
    Relation => "Relation",
    /// Font and text style information.
    TextStyle => "TextStyle",
    /// Region of pure text, including drop capitals.
    TextRegion => "TextRegion",
    /// Roles taken on by a region.
    Roles => "Roles",
    /// Role of a region acting as a table cell.
    TableCellRole => "TableCellRole",
    /// Photos or drawings.
    ImageRegion => "ImageRegion",
    /// Single colour illustration without solid areas.
    LineDrawingRegion => "LineDrawingRegion",
    /// Simple graphics such as logos.
    GraphicRegion => "GraphicRegion",
    /// Tabular data.
    TableRegion => "TableRegion",
    /// Charts or graphs.
    ChartRegion => "ChartRegion",
    /// Lines separating columns, paragraphs or articles.
    SeparatorRegion => "SeparatorRegion",
    /// Equations and mathematical symbols.
    MathsRegion => "MathsRegion",
    /// Chemical formulas.
    ChemRegion => "ChemRegion",
    /// Musical notation.
    MusicRegion => "MusicRegion",
    /// Advertisements.
    AdvertRegion => "AdvertRegion",
    /// Scanner noise or other artifacts without real content.
    NoiseRegion => "NoiseRegion",
    /// Region whose type cannot be ascertained.
    UnknownRegion => "UnknownRegion",
    /// Content not covered by the other region types.
    CustomRegion => "CustomRegion",
    /// Matrix of grid points defining a table grid.
    Grid => "Grid",
    /// Row of grid points.
    GridPoints => "GridPoints",
    /// A line of text.
    TextLine => "TextLine",
    /// Baseline polyline of a text line.
    Baseline => "Baseline",
    /// A word.
    Word => "Word",
    /// A glyph.
    Glyph => "Glyph",
    /// Container for graphemes, grapheme groups and non-printing characters.
    Graphemes => "Graphemes",
    /// Smallest graphical unit that can be assigned a code point.
    Grapheme => "Grapheme",
    /// Text equivalent container (`Unicode` / `PlainText`).
    TextEquiv => "TextEquiv",
    /// Glyph component without visual representation.
    NonPrintingChar => "NonPrintingChar",
    /// Group of graphemes.
    GraphemeGroup => "GraphemeGroup",
    /// Maps.
    MapRegion => "MapRegion",
    /// Text in simple (typing) form.
    PlainText => "PlainText",
    /// Text in correct Unicode encoding.
    Unicode => "Unicode",
}

impl PageType {
    /// Look up the element type for a tag name.
    ///
    /// Returns `None` for tags that are not part of the PAGE-XML element set.
    pub fn parse(tag: &str) -> Option<Self> {
        TAGS.get(tag).copied()
    }

    /// Check if this type is a region (eligible for the reading order).
    pub fn is_region(self) -> bool {
        matches!(
            self,
            Self::AdvertRegion
                | Self::ChartRegion
                | Self::ChemRegion
                | Self::CustomRegion
                | Self::GraphicRegion
                | Self::ImageRegion
                | Self::LineDrawingRegion
                | Self::MapRegion
                | Self::MathsRegion
                | Self::MusicRegion
                | Self::NoiseRegion
                | Self::SeparatorRegion
                | Self::TableRegion
                | Self::TextRegion
                | Self::UnknownRegion
        )
    }

    /// Check if this type carries text directly (`Unicode`, `PlainText`).
    pub fn is_text_leaf(self) -> bool {
        matches!(self, Self::Unicode | Self::PlainText)
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownElement(s.to_string()))
    }
}
