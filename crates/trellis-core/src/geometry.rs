//! Computed geometry types.

/// A width/height pair in density-independent points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The computed layout of a single node.
///
/// `left`/`top` are relative to the parent's content box. `content_width`
/// and `content_height` are the extents of the node's children including
/// any overflow, so a scroll container can size its scrollable area; for
/// non-overflowing nodes they equal the visible box.
///
/// Change detection is field-wise equality on this struct, so two layouts
/// compare equal only when every published value matches exactly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// Relative paint order within the parent; higher draws on top.
    pub order: u32,
    pub width: f32,
    pub height: f32,
    /// Offset of the node's left edge from the parent.
    pub left: f32,
    /// Offset of the node's top edge from the parent.
    pub top: f32,
    /// Horizontal extent of content, which may exceed `width`.
    pub content_width: f32,
    /// Vertical extent of content, which may exceed `height`.
    pub content_height: f32,
}

impl Layout {
    /// The node's visible box size.
    pub fn size(&self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// True when the content extents exceed the visible box on either axis.
    pub fn overflows(&self) -> bool {
        self.content_width > self.width || self.content_height > self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_detection() {
        let mut layout = Layout { width: 100.0, height: 50.0, ..Default::default() };
        layout.content_width = 100.0;
        layout.content_height = 50.0;
        assert!(!layout.overflows());

        layout.content_height = 120.0;
        assert!(layout.overflows());
    }

    #[test]
    fn test_field_wise_equality() {
        let a = Layout { order: 1, width: 10.0, ..Default::default() };
        let mut b = a;
        assert_eq!(a, b);
        b.left = 0.5;
        assert_ne!(a, b);
    }
}
