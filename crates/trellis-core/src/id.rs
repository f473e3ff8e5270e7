//! Stable node identifiers.

use std::fmt;

/// Identifier for a node participating in layout.
///
/// Ids are assigned by the caller and are opaque to the engine: the only
/// requirement is that an id is unique within one manager while the node it
/// names is alive. Callers composing many independent component trees
/// typically derive ids by combining a per-tree prefix with a locally
/// unique suffix; the engine never inspects the bit pattern.
///
/// A root is an ordinary node that was submitted without a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutId(pub u32);

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for LayoutId {
    fn from(raw: u32) -> Self {
        LayoutId(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(LayoutId(42).to_string(), "#42");
    }

    #[test]
    fn test_from_raw() {
        let id: LayoutId = 7u32.into();
        assert_eq!(id, LayoutId(7));
    }
}
