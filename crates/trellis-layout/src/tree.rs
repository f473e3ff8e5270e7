//! Node storage.
//!
//! Per-node engine state lives in a generational slot arena: removal bumps
//! the slot's generation, so a stale reference held across a removal reads
//! as absent instead of aliasing whatever node reuses the slot. Caller ids
//! are sparse and caller-chosen, so a single map resolves them to slots;
//! everything else about a node is reached through its slot.

use smallvec::SmallVec;
use trellis_core::{Layout, LayoutId, LayoutStyle, Size};

/// Reference to an arena slot, valid until the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotRef {
    index: u32,
    generation: u32,
}

/// Engine-side state for one live node.
pub(crate) struct NodeRecord {
    pub id: LayoutId,
    /// Root subtree this node was submitted under.
    pub root: LayoutId,
    /// Backing node in the box-model tree.
    pub taffy_node: taffy::NodeId,
    /// The style as submitted; compared against resubmissions to decide
    /// whether the node's geometry inputs changed at all.
    pub style: LayoutStyle,
    pub name: String,
    pub measure_content: bool,
    /// Minimum size pinned by the submission, if any.
    pub fixed_width: Option<f32>,
    pub fixed_height: Option<f32>,
    /// Authoritative size set by the caller after self-measurement;
    /// survives style resubmissions until the node is removed.
    pub explicit_size: Option<Size>,
    pub parent: Option<LayoutId>,
    pub children: SmallVec<[LayoutId; 8]>,
    /// Last published geometry; `None` until first computed.
    pub layout: Option<Layout>,
}

struct Slot {
    generation: u32,
    record: Option<NodeRecord>,
    next_free: Option<u32>,
}

/// Generational arena of node records.
#[derive(Default)]
pub(crate) struct NodeArena {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    len: usize,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { slots: Vec::new(), free_head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn insert(&mut self, record: NodeRecord) -> SlotRef {
        self.len += 1;
        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            self.free_head = slot.next_free;
            slot.next_free = None;
            slot.record = Some(record);
            SlotRef { index, generation: slot.generation }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot { generation: 0, record: Some(record), next_free: None });
            SlotRef { index, generation: 0 }
        }
    }

    pub fn get(&self, slot: SlotRef) -> Option<&NodeRecord> {
        let entry = self.slots.get(slot.index as usize)?;
        if entry.generation != slot.generation {
            return None;
        }
        entry.record.as_ref()
    }

    pub fn get_mut(&mut self, slot: SlotRef) -> Option<&mut NodeRecord> {
        let entry = self.slots.get_mut(slot.index as usize)?;
        if entry.generation != slot.generation {
            return None;
        }
        entry.record.as_mut()
    }

    /// Removes the record and retires the slot: its generation bumps, so
    /// outstanding references to the old occupant stop resolving.
    pub fn remove(&mut self, slot: SlotRef) -> Option<NodeRecord> {
        let entry = self.slots.get_mut(slot.index as usize)?;
        if entry.generation != slot.generation || entry.record.is_none() {
            return None;
        }
        let record = entry.record.take();
        entry.generation = entry.generation.wrapping_add(1);
        entry.next_free = self.free_head;
        self.free_head = Some(slot.index);
        self.len -= 1;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::LayoutStyle;

    fn record(id: u32) -> NodeRecord {
        NodeRecord {
            id: LayoutId(id),
            root: LayoutId(id),
            taffy_node: taffy::NodeId::from(0u64),
            style: LayoutStyle::default(),
            name: String::new(),
            measure_content: false,
            fixed_width: None,
            fixed_height: None,
            explicit_size: None,
            parent: None,
            children: SmallVec::new(),
            layout: None,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut arena = NodeArena::new();
        let slot = arena.insert(record(1));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(slot).unwrap().id, LayoutId(1));
    }

    #[test]
    fn test_remove_retires_slot() {
        let mut arena = NodeArena::new();
        let slot = arena.insert(record(1));
        let removed = arena.remove(slot).unwrap();
        assert_eq!(removed.id, LayoutId(1));
        assert_eq!(arena.len(), 0);
        assert!(arena.get(slot).is_none());
        assert!(arena.remove(slot).is_none());
    }

    #[test]
    fn test_stale_ref_after_reuse() {
        let mut arena = NodeArena::new();
        let first = arena.insert(record(1));
        arena.remove(first);

        // The freed slot is reused with a new generation.
        let second = arena.insert(record(2));
        assert_eq!(arena.len(), 1);
        assert!(arena.get(first).is_none());
        assert_eq!(arena.get(second).unwrap().id, LayoutId(2));
    }

    #[test]
    fn test_free_list_reuses_lowest_slot_last_freed() {
        let mut arena = NodeArena::new();
        let a = arena.insert(record(1));
        let b = arena.insert(record(2));
        arena.remove(a);
        arena.remove(b);
        // Most recently freed slot comes back first.
        let c = arena.insert(record(3));
        assert!(arena.get(c).is_some());
        assert!(arena.get(a).is_none());
        assert!(arena.get(b).is_none());
    }
}
