//! The layout manager: tree store, batching, computation, and diffing.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use log::{error, trace, warn};
use smallvec::SmallVec;
use taffy::prelude::TaffyMaxContent;
use taffy::TaffyTree;
use trellis_core::{
    Layout, LayoutChangedResponse, LayoutId, LayoutNode, NodeBatch, ParentChildren, Size,
};

use crate::convert;
use crate::measure::{MeasureFunc, MeasureRegistry};
use crate::tree::{NodeArena, NodeRecord, SlotRef};

/// One independent layout session: the authoritative node store, the
/// measure-function registry, and the change-tracking state for a document.
///
/// All mutation and computation for one manager must be serialized by the
/// caller (one logical thread of control); separate managers are fully
/// independent. The manager itself holds no locks and performs no I/O.
pub struct LayoutManager {
    /// Box-model tree; node context carries the layout id for nodes that
    /// use a measure function.
    taffy: TaffyTree<LayoutId>,
    nodes: NodeArena,
    ids: HashMap<LayoutId, SlotRef>,
    /// Root nodes in submission order; iteration must be deterministic.
    roots: IndexSet<LayoutId>,
    /// Roots with an open batch; computation for them is deferred.
    open_batches: HashSet<LayoutId>,
    measure: MeasureRegistry,
    /// Bumped once per computation that actually ran.
    layout_state: u64,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            nodes: NodeArena::new(),
            ids: HashMap::new(),
            roots: IndexSet::new(),
            open_batches: HashSet::new(),
            measure: MeasureRegistry::new(),
            layout_state: 0,
        }
    }

    /// The state counter of the most recent computation.
    pub fn layout_state(&self) -> u64 {
        self.layout_state
    }

    /// Number of live nodes across all roots.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Root ids in submission order.
    pub fn roots(&self) -> impl Iterator<Item = LayoutId> + '_ {
        self.roots.iter().copied()
    }

    /// Marks `root` as composing: submissions, removals and size overrides
    /// for it stop triggering computation until [`end_batch`] runs.
    ///
    /// [`end_batch`]: LayoutManager::end_batch
    pub fn begin_batch(&mut self, root: LayoutId) {
        trace!("begin_batch {root}");
        self.open_batches.insert(root);
    }

    /// Closes the batch for `root` and runs exactly one computation.
    pub fn end_batch(&mut self, root: LayoutId) -> LayoutChangedResponse {
        trace!("end_batch {root}");
        self.open_batches.remove(&root);
        self.compute(root)
    }

    /// Applies a batch of node upserts and edge replacements for the
    /// subtree rooted at `root`, then computes layout unless the root's
    /// batch is open.
    ///
    /// Structurally inconsistent entries (unknown parents, cross-root id
    /// conflicts, cycle-forming edges) are logged and dropped; the rest of
    /// the batch still applies.
    pub fn submit(&mut self, root: LayoutId, batch: NodeBatch) -> LayoutChangedResponse {
        trace!("submit {} nodes, {} edges under {root}", batch.nodes.len(), batch.edges.len());
        for node in batch.nodes {
            self.upsert_node(root, node);
        }
        for ParentChildren { parent, children } in batch.edges {
            self.apply_edge(parent, &children);
        }

        if self.open_batches.contains(&root) {
            LayoutChangedResponse::unchanged(self.layout_state)
        } else {
            self.compute(root)
        }
    }

    /// Removes a node, its cached geometry, and its measure registration.
    ///
    /// Returns `Some` response when `recompute` is set and the root has no
    /// open batch; otherwise the removal is merged silently and `None` is
    /// returned, so bulk teardown stays linear. Removing an unknown id is
    /// a routine no-op.
    pub fn remove_node(
        &mut self,
        id: LayoutId,
        root: LayoutId,
        recompute: bool,
    ) -> Option<LayoutChangedResponse> {
        let Some(slot) = self.ids.remove(&id) else {
            warn!("remove_node: unknown node {id}");
            return None;
        };
        // Stop any future dispatch against this id before the node goes.
        self.measure.clear(id);
        self.roots.shift_remove(&id);

        let Some(record) = self.nodes.remove(slot) else {
            return None;
        };

        if let Some(parent_id) = record.parent {
            self.detach_child(parent_id, id);
        }
        if let Err(e) = self.taffy.remove(record.taffy_node) {
            error!("backend remove failed for {id}: {e}");
        }

        if recompute && !self.open_batches.contains(&root) {
            Some(self.compute(root))
        } else {
            None
        }
    }

    /// Pins an authoritative pixel size for a node, as measured by the
    /// caller, and recomputes. The override outlives style resubmissions
    /// and is discarded only when the node is removed.
    pub fn set_explicit_size(
        &mut self,
        id: LayoutId,
        root: LayoutId,
        width: f32,
        height: f32,
    ) -> Option<LayoutChangedResponse> {
        let Some(&slot) = self.ids.get(&id) else {
            warn!("set_explicit_size: unknown node {id}");
            return None;
        };
        if let Some(record) = self.nodes.get_mut(slot) {
            record.explicit_size = Some(Size::new(width, height));
            let style = convert::taffy_style(
                &record.style,
                record.fixed_width,
                record.fixed_height,
                record.explicit_size,
            );
            if let Err(e) = self.taffy.set_style(record.taffy_node, style) {
                error!("backend set_style failed for {id}: {e}");
            }
        }

        if self.open_batches.contains(&root) {
            None
        } else {
            Some(self.compute(root))
        }
    }

    /// Invalidates a node whose measure inputs changed outside its style
    /// record (for example, edited text content). The next computation of
    /// its root re-measures it.
    pub fn mark_dirty(&mut self, id: LayoutId) {
        let Some(&slot) = self.ids.get(&id) else {
            warn!("mark_dirty: unknown node {id}");
            return;
        };
        if let Some(record) = self.nodes.get(slot) {
            if let Err(e) = self.taffy.mark_dirty(record.taffy_node) {
                error!("backend mark_dirty failed for {id}: {e}");
            }
        }
    }

    /// Registers the measure function for `id`, replacing any previous
    /// one. May be called before the node is first submitted.
    pub fn register_measure_func(
        &mut self,
        id: LayoutId,
        func: impl FnMut(f32, f32, f32, f32) -> (f32, f32) + Send + 'static,
    ) {
        self.register_measure_func_boxed(id, Box::new(func));
    }

    /// As [`register_measure_func`], for an already boxed function.
    ///
    /// [`register_measure_func`]: LayoutManager::register_measure_func
    pub fn register_measure_func_boxed(&mut self, id: LayoutId, func: MeasureFunc) {
        self.measure.register(id, func);
    }

    /// Drops the measure function for `id`. Must happen no later than the
    /// node's removal; the manager also clears it when removing the node.
    pub fn clear_measure_func(&mut self, id: LayoutId) {
        self.measure.clear(id);
    }

    /// Reads the last published geometry without forcing a computation.
    /// Absent for unknown ids and for nodes that have never been computed.
    pub fn query_layout(&self, id: LayoutId) -> Option<Layout> {
        let slot = *self.ids.get(&id)?;
        self.nodes.get(slot)?.layout
    }

    /// Removes every node and measure registration. The state counter is
    /// kept so later responses still compare monotonically.
    pub fn clear(&mut self) {
        self.taffy = TaffyTree::new();
        self.nodes = NodeArena::new();
        self.ids.clear();
        self.roots.clear();
        self.open_batches.clear();
        self.measure.clear_all();
    }

    /// Computes layout for the subtree rooted at `root` and returns the
    /// nodes whose published geometry changed. Bumps the state counter
    /// even when nothing changed.
    pub fn compute(&mut self, root: LayoutId) -> LayoutChangedResponse {
        trace!("compute {root}");
        let Some(&slot) = self.ids.get(&root) else {
            warn!("compute: unknown root {root}");
            return LayoutChangedResponse::unchanged(self.layout_state);
        };
        let Some(root_node) = self.nodes.get(slot).map(|record| record.taffy_node) else {
            return LayoutChangedResponse::unchanged(self.layout_state);
        };

        let mut unmeasured: HashSet<LayoutId> = HashSet::new();
        let measure = &mut self.measure;
        let result = self.taffy.compute_layout_with_measure(
            root_node,
            taffy::geometry::Size::MAX_CONTENT,
            |known, available, _node, context: Option<&mut LayoutId>, _style| {
                let Some(&mut id) = context else {
                    return taffy::geometry::Size::ZERO;
                };
                match measure.invoke(id, known, available) {
                    Some(size) => size,
                    None => {
                        unmeasured.insert(id);
                        taffy::geometry::Size::ZERO
                    }
                }
            },
        );
        if let Err(e) = result {
            error!("compute failed for root {root}: {e}");
        }
        for id in unmeasured {
            warn!("no measure function registered for {id}; measured as zero");
        }

        let mut changed = HashMap::new();
        self.collect_changes(root, &mut changed);
        self.layout_state += 1;

        LayoutChangedResponse { layout_state: self.layout_state, changed_layouts: changed }
    }

    fn upsert_node(&mut self, root: LayoutId, node: LayoutNode) {
        let id = node.id;
        if let Some(&slot) = self.ids.get(&id) {
            let Some(record) = self.nodes.get_mut(slot) else {
                return;
            };
            if record.root != root {
                error!(
                    "node {id} already registered under root {}; dropping submission for {root}",
                    record.root
                );
                return;
            }
            record.name = node.name;
            // Unchanged geometry inputs: leave the backing node untouched
            // so its cached layout survives.
            if record.style == node.style
                && record.measure_content == node.measure_content
                && record.fixed_width == node.fixed_width
                && record.fixed_height == node.fixed_height
            {
                trace!("upsert {id}: inputs unchanged, skipped");
                return;
            }

            record.style = node.style;
            record.measure_content = node.measure_content;
            record.fixed_width = node.fixed_width;
            record.fixed_height = node.fixed_height;
            let style = convert::taffy_style(
                &record.style,
                record.fixed_width,
                record.fixed_height,
                record.explicit_size,
            );
            let taffy_node = record.taffy_node;
            let context = record.measure_content.then_some(id);
            if let Err(e) = self.taffy.set_style(taffy_node, style) {
                error!("backend set_style failed for {id}: {e}");
            }
            if let Err(e) = self.taffy.set_node_context(taffy_node, context) {
                error!("backend set_node_context failed for {id}: {e}");
            }
            return;
        }

        // New node.
        let style = convert::taffy_style(&node.style, node.fixed_width, node.fixed_height, None);
        let taffy_node = match self.taffy.new_leaf(style) {
            Ok(n) => n,
            Err(e) => {
                error!("backend new_leaf failed for {id}: {e}");
                return;
            }
        };
        let context = node.measure_content.then_some(id);
        if let Err(e) = self.taffy.set_node_context(taffy_node, context) {
            error!("backend set_node_context failed for {id}: {e}");
        }

        let slot = self.nodes.insert(NodeRecord {
            id,
            root,
            taffy_node,
            style: node.style,
            name: node.name,
            measure_content: node.measure_content,
            fixed_width: node.fixed_width,
            fixed_height: node.fixed_height,
            explicit_size: None,
            parent: node.parent,
            children: SmallVec::new(),
            layout: None,
        });
        self.ids.insert(id, slot);

        match node.parent {
            None => {
                self.roots.insert(id);
            }
            Some(parent_id) => {
                if parent_id == id {
                    error!("node {id} submitted as its own parent; left unattached");
                    return;
                }
                match node.child_index {
                    Some(index) => self.attach_child(parent_id, id, index as usize),
                    // The parent's edge record carries the ordering.
                    None => {
                        if !self.ids.contains_key(&parent_id) {
                            warn!("node {id} names unknown parent {parent_id}");
                        }
                    }
                }
            }
        }
    }

    /// Replaces `parent`'s child list. Unknown parents drop the whole
    /// edge; unknown or cycle-forming children are dropped individually.
    fn apply_edge(&mut self, parent: LayoutId, children: &[LayoutId]) {
        let Some(&parent_slot) = self.ids.get(&parent) else {
            error!("edge names unknown parent {parent}; dropped");
            return;
        };

        let mut accepted: SmallVec<[LayoutId; 8]> = SmallVec::new();
        for &child in children {
            if !self.ids.contains_key(&child) {
                warn!("edge for {parent} names unknown child {child}; dropped");
                continue;
            }
            if child == parent || self.is_ancestor(child, parent) {
                error!("edge {parent} -> {child} would form a cycle; dropped");
                continue;
            }
            accepted.push(child);
        }

        // Detach accepted children from their former parents and from the
        // root set; an edge is authoritative for membership.
        for &child in &accepted {
            let old_parent = self
                .ids
                .get(&child)
                .and_then(|&slot| self.nodes.get(slot))
                .and_then(|record| record.parent);
            match old_parent {
                Some(previous) if previous != parent => {
                    self.detach_child(previous, child);
                }
                _ => {}
            }
            self.roots.shift_remove(&child);
            if let Some(record) = self.ids.get(&child).and_then(|&slot| self.nodes.get_mut(slot)) {
                record.parent = Some(parent);
            }
        }

        let backing = self.backing_children(&accepted);

        if let Some(record) = self.nodes.get_mut(parent_slot) {
            record.children = accepted;
            let parent_node = record.taffy_node;
            if let Err(e) = self.taffy.set_children(parent_node, &backing) {
                error!("backend set_children failed for {parent}: {e}");
            }
        }
    }

    /// Inserts `child` into `parent`'s list at `index` (clamped).
    fn attach_child(&mut self, parent: LayoutId, child: LayoutId, index: usize) {
        let Some(&parent_slot) = self.ids.get(&parent) else {
            warn!("node {child} names unknown parent {parent}");
            return;
        };
        let Some(&child_slot) = self.ids.get(&child) else {
            return;
        };

        self.roots.shift_remove(&child);
        if let Some(record) = self.nodes.get_mut(child_slot) {
            record.parent = Some(parent);
        }

        let (parent_node, children) = {
            let Some(record) = self.nodes.get_mut(parent_slot) else {
                return;
            };
            let at = index.min(record.children.len());
            record.children.insert(at, child);
            (record.taffy_node, record.children.clone())
        };
        let backing = self.backing_children(&children);
        if let Err(e) = self.taffy.set_children(parent_node, &backing) {
            error!("backend set_children failed for {parent}: {e}");
        }
    }

    /// Maps live layout ids to their backing nodes, skipping dead entries.
    fn backing_children(&self, children: &[LayoutId]) -> Vec<taffy::NodeId> {
        children
            .iter()
            .filter_map(|child| {
                self.ids
                    .get(child)
                    .and_then(|&slot| self.nodes.get(slot))
                    .map(|record| record.taffy_node)
            })
            .collect()
    }

    /// Unlinks `child` from `parent` and restales the parent so later
    /// siblings close the gap on the next computation.
    fn detach_child(&mut self, parent: LayoutId, child: LayoutId) {
        let Some(&parent_slot) = self.ids.get(&parent) else {
            return;
        };
        let (parent_node, children) = {
            let Some(record) = self.nodes.get_mut(parent_slot) else {
                return;
            };
            record.children.retain(|c| *c != child);
            (record.taffy_node, record.children.clone())
        };
        let backing = self.backing_children(&children);
        if let Err(e) = self.taffy.set_children(parent_node, &backing) {
            error!("backend set_children failed for {parent}: {e}");
        }
        if let Err(e) = self.taffy.mark_dirty(parent_node) {
            error!("backend mark_dirty failed for {parent}: {e}");
        }
    }

    /// True when `ancestor` appears on `node`'s parent chain.
    fn is_ancestor(&self, ancestor: LayoutId, node: LayoutId) -> bool {
        let mut current = node;
        let mut hops = 0usize;
        while let Some(record) = self.ids.get(&current).and_then(|&slot| self.nodes.get(slot)) {
            match record.parent {
                Some(parent) => {
                    if parent == ancestor {
                        return true;
                    }
                    current = parent;
                }
                None => return false,
            }
            // The walk must terminate even if a cycle already slipped in.
            hops += 1;
            if hops > self.nodes.len() {
                return true;
            }
        }
        false
    }

    /// Walks the subtree depth-first, parent before children, publishing
    /// every node whose geometry differs field-wise from the cached value.
    fn collect_changes(&mut self, id: LayoutId, changed: &mut HashMap<LayoutId, Layout>) {
        let Some(&slot) = self.ids.get(&id) else {
            return;
        };
        let (taffy_node, children) = {
            let Some(record) = self.nodes.get(slot) else {
                return;
            };
            (record.taffy_node, record.children.clone())
        };

        match self.taffy.layout(taffy_node) {
            Ok(layout) => {
                let layout = convert::published_layout(layout);
                if let Some(record) = self.nodes.get_mut(slot) {
                    if record.layout != Some(layout) {
                        changed.insert(id, layout);
                        record.layout = Some(layout);
                    }
                }
            }
            Err(e) => error!("layout read failed for {id}: {e}"),
        }

        for child in children {
            self.collect_changes(child, changed);
        }
    }

    pub(crate) fn record(&self, id: LayoutId) -> Option<&NodeRecord> {
        let slot = *self.ids.get(&id)?;
        self.nodes.get(slot)
    }

    /// Exposes the backend's dirtiness flag, mainly for tests and tools.
    pub fn is_stale(&self, id: LayoutId) -> bool {
        self.record(id)
            .map(|record| self.taffy.dirty(record.taffy_node).unwrap_or(true))
            .unwrap_or(false)
    }
}
