//! Conversion from the engine's style model to the box-model library.

use taffy::geometry::Line;
use taffy::style::GridPlacement;
use taffy::style_helpers::{fr, length, minmax, repeat};
use trellis_core::{
    AlignContent, AlignItems, AlignSelf, Dimension, DimensionRect, FlexDirection, GridLayout,
    ItemSpacing, JustifyContent, Layout, LayoutStyle, PositionType, Size,
};

fn dimension(value: Dimension) -> taffy::style::Dimension {
    match value {
        Dimension::Points(p) => taffy::style::Dimension::Length(p),
        Dimension::Percent(p) => taffy::style::Dimension::Percent(p),
        Dimension::Auto | Dimension::Undefined => taffy::style::Dimension::Auto,
    }
}

fn length_percentage(value: Dimension) -> taffy::style::LengthPercentage {
    match value {
        Dimension::Points(p) => taffy::style::LengthPercentage::Length(p),
        Dimension::Percent(p) => taffy::style::LengthPercentage::Percent(p),
        Dimension::Auto | Dimension::Undefined => taffy::style::LengthPercentage::Length(0.0),
    }
}

fn length_percentage_auto(value: Dimension) -> taffy::style::LengthPercentageAuto {
    match value {
        Dimension::Points(p) => taffy::style::LengthPercentageAuto::Length(p),
        Dimension::Percent(p) => taffy::style::LengthPercentageAuto::Percent(p),
        Dimension::Auto => taffy::style::LengthPercentageAuto::Auto,
        Dimension::Undefined => taffy::style::LengthPercentageAuto::Length(0.0),
    }
}

fn edge_rect(rect: DimensionRect) -> taffy::geometry::Rect<taffy::style::LengthPercentage> {
    taffy::geometry::Rect {
        left: length_percentage(rect.left),
        right: length_percentage(rect.right),
        top: length_percentage(rect.top),
        bottom: length_percentage(rect.bottom),
    }
}

fn margin_rect(rect: DimensionRect) -> taffy::geometry::Rect<taffy::style::LengthPercentageAuto> {
    taffy::geometry::Rect {
        left: length_percentage_auto(rect.left),
        right: length_percentage_auto(rect.right),
        top: length_percentage_auto(rect.top),
        bottom: length_percentage_auto(rect.bottom),
    }
}

fn align_items(value: AlignItems) -> taffy::style::AlignItems {
    match value {
        AlignItems::FlexStart => taffy::style::AlignItems::FlexStart,
        AlignItems::FlexEnd => taffy::style::AlignItems::FlexEnd,
        AlignItems::Center => taffy::style::AlignItems::Center,
        AlignItems::Baseline => taffy::style::AlignItems::Baseline,
        AlignItems::Stretch => taffy::style::AlignItems::Stretch,
    }
}

fn align_self(value: AlignSelf) -> Option<taffy::style::AlignItems> {
    match value {
        AlignSelf::Auto => None,
        AlignSelf::FlexStart => Some(taffy::style::AlignItems::FlexStart),
        AlignSelf::FlexEnd => Some(taffy::style::AlignItems::FlexEnd),
        AlignSelf::Center => Some(taffy::style::AlignItems::Center),
        AlignSelf::Baseline => Some(taffy::style::AlignItems::Baseline),
        AlignSelf::Stretch => Some(taffy::style::AlignItems::Stretch),
    }
}

fn align_content(value: AlignContent) -> taffy::style::AlignContent {
    match value {
        AlignContent::FlexStart => taffy::style::AlignContent::FlexStart,
        AlignContent::FlexEnd => taffy::style::AlignContent::FlexEnd,
        AlignContent::Center => taffy::style::AlignContent::Center,
        AlignContent::SpaceBetween => taffy::style::AlignContent::SpaceBetween,
        AlignContent::SpaceAround => taffy::style::AlignContent::SpaceAround,
        AlignContent::Stretch => taffy::style::AlignContent::Stretch,
    }
}

fn justify_content(value: JustifyContent) -> taffy::style::JustifyContent {
    match value {
        JustifyContent::FlexStart => taffy::style::JustifyContent::FlexStart,
        JustifyContent::FlexEnd => taffy::style::JustifyContent::FlexEnd,
        JustifyContent::Center => taffy::style::JustifyContent::Center,
        JustifyContent::SpaceBetween => taffy::style::JustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => taffy::style::JustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => taffy::style::JustifyContent::SpaceEvenly,
    }
}

fn flex_direction(value: FlexDirection) -> taffy::style::FlexDirection {
    match value {
        FlexDirection::Row => taffy::style::FlexDirection::Row,
        FlexDirection::Column => taffy::style::FlexDirection::Column,
        FlexDirection::RowReverse => taffy::style::FlexDirection::RowReverse,
        FlexDirection::ColumnReverse => taffy::style::FlexDirection::ColumnReverse,
    }
}

fn position(value: PositionType) -> taffy::style::Position {
    match value {
        PositionType::Relative => taffy::style::Position::Relative,
        PositionType::Absolute => taffy::style::Position::Absolute,
    }
}

fn grid_template(grid: GridLayout) -> Vec<taffy::style::TrackSizingFunction> {
    match grid {
        GridLayout::Columns(count) | GridLayout::Rows(count) => {
            vec![repeat(count.max(1), vec![fr(1.0)])]
        }
        GridLayout::AutoColumns(min) | GridLayout::AutoRows(min) => {
            vec![repeat(
                taffy::style::GridTrackRepetition::AutoFill,
                vec![minmax(length(min.max(1.0)), fr(1.0))],
            )]
        }
    }
}

/// Builds the backing style for a node, layering the authoritative size
/// overrides on top of the submitted style.
///
/// Precedence, weakest first: the style record; the submission's fixed
/// width/height (pinned as minimums); the caller's explicit size (pins
/// size, min, and max on both axes).
pub(crate) fn taffy_style(
    style: &LayoutStyle,
    fixed_width: Option<f32>,
    fixed_height: Option<f32>,
    explicit_size: Option<Size>,
) -> taffy::style::Style {
    let mut out = taffy::style::Style {
        position: position(style.position),
        inset: taffy::geometry::Rect {
            left: length_percentage_auto(style.left),
            right: length_percentage_auto(style.right),
            top: length_percentage_auto(style.top),
            bottom: length_percentage_auto(style.bottom),
        },
        size: taffy::geometry::Size {
            width: dimension(style.width),
            height: dimension(style.height),
        },
        min_size: taffy::geometry::Size {
            width: dimension(style.min_width),
            height: dimension(style.min_height),
        },
        max_size: taffy::geometry::Size {
            width: dimension(style.max_width),
            height: dimension(style.max_height),
        },
        margin: margin_rect(style.margin),
        padding: edge_rect(style.padding),
        flex_direction: flex_direction(style.flex_direction),
        flex_grow: style.flex_grow,
        flex_shrink: style.flex_shrink,
        flex_basis: dimension(style.flex_basis),
        align_items: Some(align_items(style.align_items)),
        align_self: align_self(style.align_self),
        align_content: Some(align_content(style.align_content)),
        justify_content: Some(justify_content(style.justify_content)),
        display: taffy::style::Display::Flex,
        ..Default::default()
    };

    match style.item_spacing {
        ItemSpacing::Fixed(gap) => {
            out.gap = taffy::geometry::Size {
                width: taffy::style::LengthPercentage::Length(gap),
                height: taffy::style::LengthPercentage::Length(gap),
            };
        }
        // Auto spacing distributes leftover space between items.
        ItemSpacing::Auto => {
            out.gap = taffy::geometry::Size {
                width: taffy::style::LengthPercentage::Length(0.0),
                height: taffy::style::LengthPercentage::Length(0.0),
            };
            out.justify_content = Some(taffy::style::JustifyContent::SpaceBetween);
        }
    }

    if let Some(grid) = style.grid_layout {
        out.display = taffy::style::Display::Grid;
        match grid {
            GridLayout::Columns(_) | GridLayout::AutoColumns(_) => {
                out.grid_template_columns = grid_template(grid);
            }
            GridLayout::Rows(_) | GridLayout::AutoRows(_) => {
                out.grid_template_rows = grid_template(grid);
            }
        }
    }
    if let Some(span) = style.grid_span {
        out.grid_column = Line { start: GridPlacement::Span(span), end: GridPlacement::Auto };
    }

    // A rotated node keeps occupying its visual footprint: the bounding
    // box beats fixed point sizing and releases min/max on that axis.
    if let Some(bounds) = style.bounding_box {
        if style.width.is_points() {
            out.size.width = taffy::style::Dimension::Length(bounds.width);
            out.min_size.width = taffy::style::Dimension::Auto;
            out.max_size.width = taffy::style::Dimension::Auto;
        }
        if style.height.is_points() {
            out.size.height = taffy::style::Dimension::Length(bounds.height);
            out.min_size.height = taffy::style::Dimension::Auto;
            out.max_size.height = taffy::style::Dimension::Auto;
        }
    }

    if let Some(width) = fixed_width {
        out.min_size.width = taffy::style::Dimension::Length(width);
    }
    if let Some(height) = fixed_height {
        out.min_size.height = taffy::style::Dimension::Length(height);
    }

    if let Some(size) = explicit_size {
        out.size.width = taffy::style::Dimension::Length(size.width);
        out.size.height = taffy::style::Dimension::Length(size.height);
        out.min_size.width = taffy::style::Dimension::Length(size.width);
        out.min_size.height = taffy::style::Dimension::Length(size.height);
        out.max_size.width = taffy::style::Dimension::Length(size.width);
        out.max_size.height = taffy::style::Dimension::Length(size.height);
    }

    out.overflow = taffy::geometry::Point {
        x: taffy::style::Overflow::Hidden,
        y: taffy::style::Overflow::Hidden,
    };

    out
}

/// Converts a computed taffy layout into the published form.
pub(crate) fn published_layout(layout: &taffy::Layout) -> Layout {
    Layout {
        order: layout.order,
        width: layout.size.width,
        height: layout.size.height,
        left: layout.location.x,
        top: layout.location.y,
        content_width: layout.content_size.width,
        content_height: layout.content_size.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::LayoutStyle;

    #[test]
    fn test_basic_style_conversion() {
        let style = LayoutStyle::column()
            .with_size(100.0, 200.0)
            .with_padding(10.0)
            .with_flex_grow(2.0);
        let out = taffy_style(&style, None, None, None);

        assert_eq!(out.flex_direction, taffy::style::FlexDirection::Column);
        assert_eq!(out.size.width, taffy::style::Dimension::Length(100.0));
        assert_eq!(out.size.height, taffy::style::Dimension::Length(200.0));
        assert_eq!(out.padding.left, taffy::style::LengthPercentage::Length(10.0));
        assert_eq!(out.flex_grow, 2.0);
        assert_eq!(out.display, taffy::style::Display::Flex);
    }

    #[test]
    fn test_undefined_dimensions_become_auto() {
        let out = taffy_style(&LayoutStyle::default(), None, None, None);
        assert_eq!(out.size.width, taffy::style::Dimension::Auto);
        assert_eq!(out.min_size.height, taffy::style::Dimension::Auto);
    }

    #[test]
    fn test_auto_item_spacing_distributes_evenly() {
        let style = LayoutStyle::row().with_item_spacing(ItemSpacing::Auto);
        let out = taffy_style(&style, None, None, None);
        assert_eq!(out.justify_content, Some(taffy::style::JustifyContent::SpaceBetween));
        assert_eq!(out.gap.width, taffy::style::LengthPercentage::Length(0.0));
    }

    #[test]
    fn test_bounding_box_beats_fixed_size() {
        let style = LayoutStyle::default()
            .with_size(100.0, 40.0)
            .with_bounding_box(Size::new(120.0, 60.0));
        let out = taffy_style(&style, None, None, None);
        assert_eq!(out.size.width, taffy::style::Dimension::Length(120.0));
        assert_eq!(out.size.height, taffy::style::Dimension::Length(60.0));
        assert_eq!(out.min_size.width, taffy::style::Dimension::Auto);
        assert_eq!(out.max_size.height, taffy::style::Dimension::Auto);
    }

    #[test]
    fn test_explicit_size_pins_all_constraints() {
        let style = LayoutStyle::default().with_size(100.0, 40.0);
        let out = taffy_style(&style, None, None, Some(Size::new(333.0, 44.0)));
        assert_eq!(out.size.width, taffy::style::Dimension::Length(333.0));
        assert_eq!(out.min_size.height, taffy::style::Dimension::Length(44.0));
        assert_eq!(out.max_size.width, taffy::style::Dimension::Length(333.0));
    }

    #[test]
    fn test_fixed_size_pins_minimums_only() {
        let out = taffy_style(&LayoutStyle::default(), Some(80.0), Some(20.0), None);
        assert_eq!(out.min_size.width, taffy::style::Dimension::Length(80.0));
        assert_eq!(out.min_size.height, taffy::style::Dimension::Length(20.0));
        assert_eq!(out.size.width, taffy::style::Dimension::Auto);
    }

    #[test]
    fn test_grid_conversion() {
        let style = LayoutStyle::default().with_grid(GridLayout::Columns(3));
        let out = taffy_style(&style, None, None, None);
        assert_eq!(out.display, taffy::style::Display::Grid);
        assert_eq!(out.grid_template_columns.len(), 1);
        assert!(out.grid_template_rows.is_empty());
    }
}
