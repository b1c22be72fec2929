use crate::layout::LayoutWrapper;
use crate::tree::UiTree;
use arkui_ui_graphics::SizeF;
use arkui_ui_layout::LayoutConstraintF;
use std::any::Any;

/// Measure and layout strategy of one container kind.
///
/// `measure` sets the frame size of the wrapper and measures the children it
/// needs; `layout` assigns child offsets and lays the children out. Both run
/// on a snapshot; nothing reaches the frame nodes before the swap.
pub trait LayoutAlgorithm: Any {
    fn measure(&mut self, _wrapper: &mut LayoutWrapper, _tree: &mut UiTree) {}

    fn layout(&mut self, _wrapper: &mut LayoutWrapper, _tree: &mut UiTree) {}

    /// Intrinsic content size of leaf kinds, if they have one.
    fn measure_content(
        &mut self,
        _content_constraint: &LayoutConstraintF,
        _wrapper: &LayoutWrapper,
    ) -> Option<SizeF> {
        None
    }
}

impl dyn LayoutAlgorithm {
    pub fn as_any(&self) -> &dyn Any {
        self
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    pub fn downcast_ref<A: LayoutAlgorithm>(&self) -> Option<&A> {
        self.as_any().downcast_ref::<A>()
    }
}

/// An algorithm plus the decision of which phases to run.
pub struct LayoutAlgorithmWrapper {
    algorithm: Option<Box<dyn LayoutAlgorithm>>,
    skip_measure: bool,
    skip_layout: bool,
}

impl LayoutAlgorithmWrapper {
    pub fn new(algorithm: Box<dyn LayoutAlgorithm>) -> Self {
        Self {
            algorithm: Some(algorithm),
            skip_measure: false,
            skip_layout: false,
        }
    }

    pub fn algorithm(&self) -> Option<&dyn LayoutAlgorithm> {
        self.algorithm.as_deref()
    }

    pub fn skip_measure(&self) -> bool {
        self.skip_measure
    }

    pub fn skip_layout(&self) -> bool {
        self.skip_layout
    }

    pub fn set_skip(&mut self, skip_measure: bool, skip_layout: bool) {
        self.skip_measure = skip_measure;
        self.skip_layout = skip_layout;
    }

    /// Lends the algorithm out for one call; see [`restore`](Self::restore).
    pub(crate) fn take(&mut self) -> Option<Box<dyn LayoutAlgorithm>> {
        self.algorithm.take()
    }

    pub(crate) fn restore(&mut self, algorithm: Box<dyn LayoutAlgorithm>) {
        self.algorithm = Some(algorithm);
    }
}
