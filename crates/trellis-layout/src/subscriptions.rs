//! Per-caller change notification.
//!
//! The engine itself only returns responses; hosts that want callbacks per
//! node keep a `Subscriptions` registry next to their manager and feed it
//! every response they receive. A callback fires when its node appears in
//! a response's changed set, and is handed the response's state counter so
//! the host can discard out-of-order geometry.

use std::collections::HashMap;

use trellis_core::{LayoutChangedResponse, LayoutId};

/// Registry of per-node layout-change callbacks.
#[derive(Default)]
pub struct Subscriptions {
    callbacks: HashMap<LayoutId, Box<dyn FnMut(u64) + Send>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self { callbacks: HashMap::new() }
    }

    /// Registers a callback for `id`, replacing any previous one.
    pub fn subscribe(&mut self, id: LayoutId, callback: impl FnMut(u64) + Send + 'static) {
        self.callbacks.insert(id, Box::new(callback));
    }

    /// Drops the callback for `id`. Call this before removing the node
    /// from the manager; a dropped subscription can never fire again.
    pub fn unsubscribe(&mut self, id: LayoutId) -> bool {
        self.callbacks.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, id: LayoutId) -> bool {
        self.callbacks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Fires the callback of every subscribed id present in the response's
    /// changed set, passing the new state counter. Returns how many fired.
    pub fn dispatch(&mut self, response: &LayoutChangedResponse) -> usize {
        let mut fired = 0;
        for id in response.changed_layouts.keys() {
            if let Some(callback) = self.callbacks.get_mut(id) {
                callback(response.layout_state);
                fired += 1;
            }
        }
        fired
    }
}
