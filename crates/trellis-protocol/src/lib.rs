//! Binary serialization boundary for the Trellis layout engine.
//!
//! Hosts that keep the engine in another process (or behind a foreign
//! function interface) exchange node batches and changed-layout responses
//! as compact version-tagged binary payloads. In a single-process embedding
//! the boundary collapses to the plain entry-point functions here, which
//! decode a payload, apply it to a [`LayoutManager`], and encode the
//! response, preserving the batching and change-diff contract either way.
//!
//! Measure functions cannot cross this boundary; they are registered
//! in-process on the manager directly.
//!
//! [`LayoutManager`]: trellis_layout::LayoutManager

mod codec;
mod endpoints;

pub use codec::{
    decode_batch, decode_response, encode_batch, encode_response, WireError, WIRE_VERSION,
};
pub use endpoints::{remove_node, set_node_size, submit_nodes};

pub use trellis_core::{LayoutChangedResponse, LayoutNode, NodeBatch, ParentChildren};
