//! Core value types for the Trellis layout engine.
//!
//! This crate defines the vocabulary shared by the engine and its callers:
//! stable node identifiers, the dimension union used by layout styles, the
//! style record itself, computed geometry, and the changed-layout response
//! returned by every computation.
//!
//! Nothing in this crate computes layout; it is deliberately free of heavy
//! dependencies so that hosts embedding only the wire types stay small.
//! Serialization support is behind the `serde` feature.

mod batch;
mod dimension;
mod geometry;
mod id;
mod response;
mod style;

pub use batch::{LayoutNode, NodeBatch, ParentChildren};
pub use dimension::{Dimension, DimensionRect};
pub use geometry::{Layout, Size};
pub use id::LayoutId;
pub use response::LayoutChangedResponse;
pub use style::{
    AlignContent, AlignItems, AlignSelf, FlexDirection, GridLayout, ItemSpacing, JustifyContent,
    LayoutStyle, PositionType,
};
