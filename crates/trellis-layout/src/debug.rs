//! Diagnostic rendering of a layout subtree.

use std::fmt::Write;

use trellis_core::LayoutId;

use crate::manager::LayoutManager;

/// Renders the subtree rooted at `root` as an indented text tree: one line
/// per node with its diagnostic name, id, and computed box. Useful when a
/// host needs to log why an element ended up where it did.
pub fn render_tree(manager: &LayoutManager, root: LayoutId) -> String {
    let mut out = String::new();
    render_node(manager, root, 0, &mut out);
    out
}

fn render_node(manager: &LayoutManager, id: LayoutId, depth: usize, out: &mut String) {
    let Some(record) = manager.record(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let name = if record.name.is_empty() { "<unnamed>" } else { record.name.as_str() };
    match record.layout {
        Some(layout) => {
            let _ = writeln!(
                out,
                "{indent}{name} {}: {}x{} @ ({}, {})",
                record.id, layout.width, layout.height, layout.left, layout.top
            );
        }
        None => {
            let _ = writeln!(out, "{indent}{name} {}: (not computed)", record.id);
        }
    }
    for &child in record.children.iter() {
        render_node(manager, child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{LayoutNode, LayoutStyle, NodeBatch};

    #[test]
    fn test_render_tree() {
        let mut manager = LayoutManager::new();
        let root = LayoutId(1);
        let child = LayoutId(2);

        let batch = NodeBatch::new()
            .node(
                LayoutNode::new(root, LayoutStyle::column().with_size(100.0, 100.0))
                    .with_name("frame"),
            )
            .node(
                LayoutNode::new(child, LayoutStyle::default().with_size(40.0, 20.0))
                    .with_parent(root)
                    .at_index(0)
                    .with_name("badge"),
            );
        manager.submit(root, batch);

        let rendered = render_tree(&manager, root);
        assert!(rendered.contains("frame #1: 100x100 @ (0, 0)"));
        assert!(rendered.contains("  badge #2: 40x20"));
    }

    #[test]
    fn test_render_unknown_root_is_empty() {
        let manager = LayoutManager::new();
        assert_eq!(render_tree(&manager, LayoutId(9)), "");
    }
}
