//! Per-kind behavior plugged into a frame node.

use crate::layout::{BoxLayoutAlgorithm, LayoutAlgorithm};
use crate::NodeId;
use arkui_ui_layout::LayoutProperty;
use std::any::Any;

/// What changed on a frame node when a layout result was swapped in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtySwapConfig {
    pub frame_size_change: bool,
    pub frame_offset_change: bool,
    pub content_size_change: bool,
    pub content_offset_change: bool,
    pub skip_measure: bool,
    pub skip_layout: bool,
}

/// Component-specific logic of a frame node.
///
/// Every hook has a default, so a plain leaf only needs an empty impl.
pub trait Pattern: Any {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::new()
    }

    /// A fresh algorithm for one layout pass.
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(BoxLayoutAlgorithm)
    }

    /// Atomic nodes are popped off the build stack as soon as a sibling is
    /// pushed.
    fn is_atomic_node(&self) -> bool {
        true
    }

    /// A boundary absorbs the measure requests of its subtree instead of
    /// forwarding them to its parent.
    fn is_measure_boundary(&self) -> bool {
        false
    }

    fn on_attach_to_main_tree(&mut self, _host: NodeId) {}

    fn on_detach_from_main_tree(&mut self, _host: NodeId) {}

    /// Called once the build stack has applied every pending property update.
    fn on_modify_done(&mut self, _layout_property: &LayoutProperty) {}

    /// Reads the state a finished layout pass left in `algorithm`.
    ///
    /// Returns true when the node needs to be painted again.
    fn on_dirty_layout_wrapper_swap(
        &mut self,
        _algorithm: &dyn LayoutAlgorithm,
        _config: &DirtySwapConfig,
    ) -> bool {
        false
    }
}

impl dyn Pattern {
    pub fn as_any(&self) -> &dyn Any {
        self
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    pub fn downcast_ref<P: Pattern>(&self) -> Option<&P> {
        self.as_any().downcast_ref::<P>()
    }

    pub fn downcast_mut<P: Pattern>(&mut self) -> Option<&mut P> {
        self.as_any_mut().downcast_mut::<P>()
    }
}
