//! The dimension union used throughout layout styles.

/// A single axis measurement in a layout style.
///
/// `Points` are density-independent; `Percent` resolves against the
/// parent's content box during computation. `Undefined` means "the style
/// says nothing about this axis" and is distinct from `Auto`, which asks
/// the engine to derive a size (hug children, or consult the node's
/// measure function).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    /// No value specified.
    #[default]
    Undefined,
    /// Derived from content or children.
    Auto,
    /// Fixed size in density-independent points.
    Points(f32),
    /// Fraction of the parent's resolved content box, 1.0 = 100%.
    Percent(f32),
}

impl Dimension {
    /// True if this dimension is a fixed point value.
    pub fn is_points(&self) -> bool {
        matches!(self, Dimension::Points(_))
    }

    /// The point value, if fixed.
    pub fn points(&self) -> Option<f32> {
        match self {
            Dimension::Points(p) => Some(*p),
            _ => None,
        }
    }
}

/// Per-edge dimensions, used for margins, padding, and insets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionRect {
    pub left: Dimension,
    pub right: Dimension,
    pub top: Dimension,
    pub bottom: Dimension,
}

impl DimensionRect {
    /// A rect with the same fixed value on every edge.
    pub fn uniform(points: f32) -> Self {
        let d = Dimension::Points(points);
        Self { left: d, right: d, top: d, bottom: d }
    }

    /// A rect with fixed horizontal and vertical values.
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: Dimension::Points(horizontal),
            right: Dimension::Points(horizontal),
            top: Dimension::Points(vertical),
            bottom: Dimension::Points(vertical),
        }
    }

    /// A rect that specifies nothing on any edge.
    pub fn undefined() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_undefined() {
        assert_eq!(Dimension::default(), Dimension::Undefined);
    }

    #[test]
    fn test_points_accessor() {
        assert_eq!(Dimension::Points(12.5).points(), Some(12.5));
        assert_eq!(Dimension::Auto.points(), None);
        assert!(Dimension::Points(0.0).is_points());
        assert!(!Dimension::Percent(0.5).is_points());
    }

    #[test]
    fn test_uniform_rect() {
        let rect = DimensionRect::uniform(8.0);
        assert_eq!(rect.left, Dimension::Points(8.0));
        assert_eq!(rect.bottom, Dimension::Points(8.0));
    }

    #[test]
    fn test_symmetric_rect() {
        let rect = DimensionRect::symmetric(4.0, 2.0);
        assert_eq!(rect.right, Dimension::Points(4.0));
        assert_eq!(rect.top, Dimension::Points(2.0));
    }
}
