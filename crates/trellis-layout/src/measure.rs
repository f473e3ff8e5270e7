//! The measurement bridge.
//!
//! Nodes whose intrinsic size the engine cannot derive from style alone
//! (text, embedded host content) register a measure function. The engine
//! invokes it synchronously during the measure pass, on the computation
//! thread. A measure function must not call back into the manager that is
//! mid-computation; doing so is undefined behavior and is not detected.

use std::collections::HashMap;

use taffy::prelude::AvailableSpace;
use trellis_core::LayoutId;

/// Caller-supplied intrinsic sizing callback.
///
/// Arguments are `(width, height, available_width, available_height)`:
/// the first pair carries dimensions already resolved by style (0.0 when
/// unknown), the second the bounds the result must fit within. An
/// unbounded probe arrives as `f32::MAX` (max-content) or `0.0`
/// (min-content); the function must still return finite sizes.
pub type MeasureFunc = Box<dyn FnMut(f32, f32, f32, f32) -> (f32, f32) + Send>;

/// Per-node registry of measure functions.
///
/// Exactly one function per id; registering again replaces the previous
/// one. Registration may precede the node's first submission.
#[derive(Default)]
pub(crate) struct MeasureRegistry {
    funcs: HashMap<LayoutId, MeasureFunc>,
}

impl MeasureRegistry {
    pub fn new() -> Self {
        Self { funcs: HashMap::new() }
    }

    pub fn register(&mut self, id: LayoutId, func: MeasureFunc) {
        self.funcs.insert(id, func);
    }

    pub fn clear(&mut self, id: LayoutId) -> bool {
        self.funcs.remove(&id).is_some()
    }

    pub fn clear_all(&mut self) {
        self.funcs.clear();
    }

    /// Invokes the function registered for `id`, translating the box-model
    /// library's probe arguments into the caller-facing convention.
    /// Returns `None` when no function is registered.
    pub fn invoke(
        &mut self,
        id: LayoutId,
        known: taffy::geometry::Size<Option<f32>>,
        available: taffy::geometry::Size<AvailableSpace>,
    ) -> Option<taffy::geometry::Size<f32>> {
        let func = self.funcs.get_mut(&id)?;
        let width = known.width.unwrap_or(0.0);
        let height = known.height.unwrap_or(0.0);
        let available_width = match available.width {
            AvailableSpace::Definite(w) => w,
            AvailableSpace::MaxContent => f32::MAX,
            AvailableSpace::MinContent => 0.0,
        };
        let available_height = match available.height {
            AvailableSpace::Definite(h) => h,
            AvailableSpace::MaxContent => f32::MAX,
            AvailableSpace::MinContent => 0.0,
        };
        let (measured_width, measured_height) = func(width, height, available_width, available_height);
        Some(taffy::geometry::Size { width: measured_width, height: measured_height })
    }
}
