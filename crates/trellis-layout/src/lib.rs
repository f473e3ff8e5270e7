//! Incremental layout computation for Trellis node trees.
//!
//! The engine maintains a forest of style-annotated nodes keyed by
//! caller-assigned [`LayoutId`]s, batches mutations per composition pass,
//! computes flexbox/grid geometry through taffy, and reports only the
//! nodes whose computed geometry actually changed.
//!
//! # Architecture
//!
//! 1. **Tree store**: a generational slot arena holds per-node engine
//!    state; a single id map resolves sparse caller ids to slots.
//! 2. **Measurement bridge**: per-node callbacks supply intrinsic sizes
//!    for text and embedded content during the measure pass.
//! 3. **Computation + diff**: taffy computes the box model; the engine
//!    walks the subtree and publishes field-wise differences.
//!
//! # Example
//!
//! ```
//! use trellis_core::{LayoutId, LayoutNode, LayoutStyle, NodeBatch};
//! use trellis_layout::LayoutManager;
//!
//! let mut manager = LayoutManager::new();
//! let root = LayoutId(1);
//! let batch = NodeBatch::new()
//!     .node(LayoutNode::new(root, LayoutStyle::column().with_size(800.0, 600.0)));
//! let response = manager.submit(root, batch);
//! assert_eq!(response.changed_layouts.len(), 1);
//! ```
//!
//! All calls for one manager must be funneled through one logical thread
//! of control; independent managers are fully independent.

mod convert;
mod debug;
mod manager;
mod measure;
mod subscriptions;
mod tree;

pub use debug::render_tree;
pub use manager::LayoutManager;
pub use measure::MeasureFunc;
pub use subscriptions::Subscriptions;

pub use trellis_core::{LayoutChangedResponse, LayoutId, LayoutNode, NodeBatch, ParentChildren};
