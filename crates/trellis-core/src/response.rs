//! The change-tracking response returned by layout computation.

use std::collections::HashMap;

use crate::geometry::Layout;
use crate::id::LayoutId;

/// Result of one layout computation: the nodes whose geometry differs from
/// the previously published values, plus a monotonic state counter.
///
/// `layout_state` increases by exactly one every time a computation runs,
/// whether or not anything changed; a deferred operation returns the
/// current counter untouched. Callers use it to discard stale geometry
/// that arrives out of order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutChangedResponse {
    pub layout_state: u64,
    pub changed_layouts: HashMap<LayoutId, Layout>,
}

impl LayoutChangedResponse {
    /// A response carrying no changes, used when computation was deferred.
    pub fn unchanged(layout_state: u64) -> Self {
        Self { layout_state, changed_layouts: HashMap::new() }
    }

    /// True if no node geometry changed.
    pub fn is_empty(&self) -> bool {
        self.changed_layouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged() {
        let response = LayoutChangedResponse::unchanged(7);
        assert_eq!(response.layout_state, 7);
        assert!(response.is_empty());
    }

    #[test]
    fn test_non_empty() {
        let mut response = LayoutChangedResponse::unchanged(1);
        response.changed_layouts.insert(LayoutId(3), Layout::default());
        assert!(!response.is_empty());
    }
}
