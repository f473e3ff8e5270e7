//! The layout style record attached to every node.

use crate::dimension::{Dimension, DimensionRect};
use crate::geometry::Size;

/// Positioning scheme for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionType {
    /// Laid out in normal flow; insets nudge the final position.
    #[default]
    Relative,
    /// Taken out of flow and placed against the parent's box via insets.
    Absolute,
}

/// Main-axis direction of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

/// Cross-axis alignment of children within a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    #[default]
    Stretch,
}

/// Per-child override of the parent's `AlignItems`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignSelf {
    /// Inherit the parent's cross-axis alignment.
    #[default]
    Auto,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    Stretch,
}

/// Distribution of wrapped lines on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    #[default]
    Stretch,
}

/// Distribution of children on the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Spacing between adjacent children on the main axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSpacing {
    /// Fixed gap in points.
    Fixed(f32),
    /// Leftover main-axis space is distributed evenly between children.
    Auto,
}

impl Default for ItemSpacing {
    fn default() -> Self {
        ItemSpacing::Fixed(0.0)
    }
}

/// Axis configuration for a grid container.
///
/// The fixed variants pin the track count on one axis and let items flow
/// on the other; the adaptive variants fit as many tracks of at least the
/// given extent (in points) as the container allows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridLayout {
    Columns(u16),
    Rows(u16),
    AutoColumns(f32),
    AutoRows(f32),
}

/// The complete set of layout properties for one node.
///
/// Styles are plain values: submitting a node replaces its style wholesale,
/// and the engine compares the submitted style against the stored one to
/// decide whether the node's geometry inputs changed at all. Equality is
/// therefore exact, field-wise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutStyle {
    pub position: PositionType,
    /// Insets against the parent box; honored for absolute nodes and as a
    /// relative nudge otherwise.
    pub left: Dimension,
    pub right: Dimension,
    pub top: Dimension,
    pub bottom: Dimension,

    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub min_height: Dimension,
    pub max_width: Dimension,
    pub max_height: Dimension,

    pub margin: DimensionRect,
    pub padding: DimensionRect,

    pub flex_direction: FlexDirection,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Dimension,
    pub align_items: AlignItems,
    pub align_self: AlignSelf,
    pub align_content: AlignContent,
    pub justify_content: JustifyContent,
    pub item_spacing: ItemSpacing,

    /// Present when the node is a grid container rather than a flex one.
    pub grid_layout: Option<GridLayout>,
    /// Number of tracks this node spans inside a grid parent.
    pub grid_span: Option<u16>,

    /// Visual bounds of a rotated node. When set alongside fixed point
    /// sizing, the bounding box wins over the style's width/height so the
    /// node keeps occupying its rotated footprint.
    pub bounding_box: Option<Size>,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            position: PositionType::Relative,
            left: Dimension::Undefined,
            right: Dimension::Undefined,
            top: Dimension::Undefined,
            bottom: Dimension::Undefined,
            width: Dimension::Undefined,
            height: Dimension::Undefined,
            min_width: Dimension::Undefined,
            min_height: Dimension::Undefined,
            max_width: Dimension::Undefined,
            max_height: Dimension::Undefined,
            margin: DimensionRect::undefined(),
            padding: DimensionRect::undefined(),
            flex_direction: FlexDirection::Row,
            flex_grow: 0.0,
            flex_shrink: 0.0,
            flex_basis: Dimension::Undefined,
            align_items: AlignItems::Stretch,
            align_self: AlignSelf::Auto,
            align_content: AlignContent::Stretch,
            justify_content: JustifyContent::FlexStart,
            item_spacing: ItemSpacing::default(),
            grid_layout: None,
            grid_span: None,
            bounding_box: None,
        }
    }
}

impl LayoutStyle {
    /// A row container.
    pub fn row() -> Self {
        Self { flex_direction: FlexDirection::Row, ..Default::default() }
    }

    /// A column container.
    pub fn column() -> Self {
        Self { flex_direction: FlexDirection::Column, ..Default::default() }
    }

    /// Set a fixed size in points.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Dimension::Points(width);
        self.height = Dimension::Points(height);
        self
    }

    /// Set width and height dimensions directly.
    pub fn with_dimensions(mut self, width: Dimension, height: Dimension) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the gap between adjacent children.
    pub fn with_item_spacing(mut self, spacing: ItemSpacing) -> Self {
        self.item_spacing = spacing;
        self
    }

    /// Set uniform padding.
    pub fn with_padding(mut self, points: f32) -> Self {
        self.padding = DimensionRect::uniform(points);
        self
    }

    /// Set the flex grow factor.
    pub fn with_flex_grow(mut self, grow: f32) -> Self {
        self.flex_grow = grow;
        self
    }

    /// Make this node a grid container.
    pub fn with_grid(mut self, grid: GridLayout) -> Self {
        self.grid_layout = Some(grid);
        self
    }

    /// Preserve the given visual bounds for a rotated node.
    pub fn with_bounding_box(mut self, size: Size) -> Self {
        self.bounding_box = Some(size);
        self
    }

    /// True if the style describes a grid container.
    pub fn is_grid(&self) -> bool {
        self.grid_layout.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_normal_flow() {
        let style = LayoutStyle::default();
        assert_eq!(style.position, PositionType::Relative);
        assert_eq!(style.width, Dimension::Undefined);
        assert_eq!(style.item_spacing, ItemSpacing::Fixed(0.0));
        assert!(!style.is_grid());
    }

    #[test]
    fn test_builders() {
        let style = LayoutStyle::column()
            .with_size(800.0, 600.0)
            .with_item_spacing(ItemSpacing::Fixed(10.0))
            .with_padding(16.0);
        assert_eq!(style.flex_direction, FlexDirection::Column);
        assert_eq!(style.width, Dimension::Points(800.0));
        assert_eq!(style.padding.left, Dimension::Points(16.0));
    }

    #[test]
    fn test_style_equality_is_the_cache_key() {
        let a = LayoutStyle::row().with_size(100.0, 50.0);
        let b = LayoutStyle::row().with_size(100.0, 50.0);
        assert_eq!(a, b);

        let c = b.clone().with_flex_grow(1.0);
        assert_ne!(a, c);
    }

    #[test]
    fn test_grid_builder() {
        let style = LayoutStyle::default().with_grid(GridLayout::Columns(3));
        assert!(style.is_grid());
        assert_eq!(style.grid_layout, Some(GridLayout::Columns(3)));
    }
}
