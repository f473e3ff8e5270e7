//! Node submission descriptors.
//!
//! A batch is the unit of mutation: the caller describes the nodes it
//! touched this composition pass plus the parent→children edges that
//! actually changed, and hands the whole thing to the engine at once.

use crate::id::LayoutId;
use crate::style::LayoutStyle;

/// One node's registration for layout.
///
/// Created when a UI element first participates in layout and resubmitted
/// whenever its style or measurement requirements change. `child_index` is
/// an ordering hint for incremental single-node insertion; callers that
/// rebuild a parent's child list submit a [`ParentChildren`] edge instead
/// and leave it unset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutNode {
    pub id: LayoutId,
    /// Absent for root nodes.
    pub parent: Option<LayoutId>,
    /// Position within the parent's child list; absent when the parent's
    /// edge record carries the ordering.
    pub child_index: Option<u32>,
    pub style: LayoutStyle,
    /// Diagnostic name, surfaced in tree dumps and log messages.
    pub name: String,
    /// True when the node's intrinsic size comes from a registered
    /// measure function rather than from style alone.
    pub measure_content: bool,
    /// Authoritative minimum width determined outside layout.
    pub fixed_width: Option<f32>,
    /// Authoritative minimum height determined outside layout.
    pub fixed_height: Option<f32>,
}

impl LayoutNode {
    pub fn new(id: LayoutId, style: LayoutStyle) -> Self {
        Self {
            id,
            parent: None,
            child_index: None,
            style,
            name: String::new(),
            measure_content: false,
            fixed_width: None,
            fixed_height: None,
        }
    }

    pub fn with_parent(mut self, parent: LayoutId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn at_index(mut self, index: u32) -> Self {
        self.child_index = Some(index);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mark the node as externally measured.
    pub fn measured(mut self) -> Self {
        self.measure_content = true;
        self
    }

    pub fn with_fixed_size(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        self.fixed_width = width;
        self.fixed_height = height;
        self
    }
}

/// Replacement child list for one parent.
///
/// Only parents whose children actually changed appear in a batch;
/// untouched subtrees keep their existing structure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParentChildren {
    pub parent: LayoutId,
    pub children: Vec<LayoutId>,
}

/// A group of node upserts and edge replacements applied together.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeBatch {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<ParentChildren>,
}

impl NodeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node upsert to the batch.
    pub fn node(mut self, node: LayoutNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add a child-list replacement to the batch.
    pub fn edge(mut self, parent: LayoutId, children: Vec<LayoutId>) -> Self {
        self.edges.push(ParentChildren { parent, children });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = LayoutNode::new(LayoutId(5), LayoutStyle::default())
            .with_parent(LayoutId(1))
            .at_index(2)
            .with_name("badge")
            .measured();
        assert_eq!(node.parent, Some(LayoutId(1)));
        assert_eq!(node.child_index, Some(2));
        assert_eq!(node.name, "badge");
        assert!(node.measure_content);
        assert_eq!(node.fixed_width, None);
    }

    #[test]
    fn test_batch_builder() {
        let batch = NodeBatch::new()
            .node(LayoutNode::new(LayoutId(1), LayoutStyle::default()))
            .edge(LayoutId(1), vec![LayoutId(2), LayoutId(3)]);
        assert_eq!(batch.nodes.len(), 1);
        assert_eq!(batch.edges[0].children.len(), 2);
    }
}
