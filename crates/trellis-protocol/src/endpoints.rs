//! Byte-level entry points over an in-process manager.
//!
//! Each function is one boundary crossing: decode the request payload,
//! apply it to the manager, encode the response. Operations the engine
//! defers (an open batch, a removal without recompute) return `None`
//! rather than an empty response so remote callers can tell "nothing ran"
//! from "ran and nothing changed".

use trellis_core::LayoutId;
use trellis_layout::LayoutManager;

use crate::codec::{decode_batch, encode_response, WireError};

/// Applies a serialized node batch under `root` and returns the serialized
/// changed-layout response.
pub fn submit_nodes(
    manager: &mut LayoutManager,
    root: LayoutId,
    payload: &[u8],
) -> Result<Vec<u8>, WireError> {
    let batch = decode_batch(payload)?;
    let response = manager.submit(root, batch);
    encode_response(&response)
}

/// Removes a node; `None` when the removal was deferred.
pub fn remove_node(
    manager: &mut LayoutManager,
    id: LayoutId,
    root: LayoutId,
    compute: bool,
) -> Result<Option<Vec<u8>>, WireError> {
    match manager.remove_node(id, root, compute) {
        Some(response) => encode_response(&response).map(Some),
        None => Ok(None),
    }
}

/// Pins an authoritative node size; `None` when computation was deferred.
pub fn set_node_size(
    manager: &mut LayoutManager,
    id: LayoutId,
    root: LayoutId,
    width: f32,
    height: f32,
) -> Result<Option<Vec<u8>>, WireError> {
    match manager.set_explicit_size(id, root, width, height) {
        Some(response) => encode_response(&response).map(Some),
        None => Ok(None),
    }
}
