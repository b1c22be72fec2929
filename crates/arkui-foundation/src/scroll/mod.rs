//! Scroll: a viewport around a single child that may be longer than the
//! viewport along the scroll axis.

use crate::scrollable::{ScrollSource, Scrollable};
use arkui_core::{DirtySwapConfig, LayoutAlgorithm, LayoutWrapper, Pattern, UiTree};
use arkui_ui_graphics::non_negative;
use arkui_ui_layout::measure_utils::{
    add_padding_to_size, create_ideal_size_optional, minus_padding_to_optional_size,
    minus_padding_to_size, padding_offset,
};
use arkui_ui_layout::{Axis, LayoutProperty, PropertyChangeFlag, ScrollLayoutProperty};

fn scroll_axis(property: &LayoutProperty) -> Axis {
    property
        .typed::<ScrollLayoutProperty>()
        .and_then(ScrollLayoutProperty::axis)
        .unwrap_or(Axis::Vertical)
}

/// Measure and layout of one Scroll pass.
#[derive(Clone, Debug)]
pub struct ScrollLayoutAlgorithm {
    current_offset: f32,
    scrollable_distance: f32,
    viewport_main_size: f32,
}

impl ScrollLayoutAlgorithm {
    pub fn new(current_offset: f32) -> Self {
        Self {
            current_offset,
            scrollable_distance: 0.0,
            viewport_main_size: 0.0,
        }
    }

    /// The offset after clamping, never positive.
    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    /// How far the child can move before its far end reaches the viewport
    /// end.
    pub fn scrollable_distance(&self) -> f32 {
        self.scrollable_distance
    }

    pub fn viewport_main_size(&self) -> f32 {
        self.viewport_main_size
    }
}

impl LayoutAlgorithm for ScrollLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let host = wrapper.host();
        let property = wrapper.layout_property();
        let Some(constraint) = property.layout_constraint().copied() else {
            log::error!("scroll #{host} measured without a constraint");
            return;
        };
        let axis = scroll_axis(property);
        let padding = property.create_padding_and_border();
        let ideal = create_ideal_size_optional(&constraint, axis, property.measure_type());

        let mut child_constraint = property.create_child_constraint();
        axis.set_main_size(&mut child_constraint.max_size, f32::INFINITY);
        let mut parent_ideal = ideal;
        minus_padding_to_optional_size(&padding, &mut parent_ideal);
        axis.set_optional_main_size(&mut parent_ideal, None);
        child_constraint.parent_ideal_size = parent_ideal;

        let mut child_size = None;
        for child in wrapper.get_all_children_with_build(tree, true).into_iter().take(1) {
            child.measure(tree, Some(child_constraint));
            child_size = Some(child.geometry_node().frame_size());
        }
        if wrapper.total_child_count() > 1 {
            log::warn!("scroll #{host} only lays out its first child");
        }

        let mut fallback = child_size.unwrap_or_default();
        add_padding_to_size(&padding, &mut fallback);
        let mut frame = ideal;
        frame.update_illegal_size_with_size(fallback);
        let mut frame = frame.to_size_or(0.0);
        frame.constrain(constraint.min_size, constraint.max_size);
        if !axis.main_size(frame).is_finite() {
            log::error!("scroll #{host} has an unbounded main axis; measure aborted");
            return;
        }
        wrapper.geometry_node_mut().set_frame_size(frame);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let property = wrapper.layout_property();
        let axis = scroll_axis(property);
        let padding = property.create_padding_and_border();
        let alignment = property.alignment().unwrap_or_default();
        let mut viewport = wrapper.geometry_node().frame_size();
        minus_padding_to_size(&padding, &mut viewport);
        let origin = padding_offset(&padding);
        let global = wrapper.global_offset();
        self.viewport_main_size = axis.main_size(viewport);

        let Some(child) = wrapper.get_or_create_child_by_index(0, tree, true) else {
            self.scrollable_distance = 0.0;
            self.current_offset = 0.0;
            return;
        };
        let child_size = child.geometry_node().frame_size();
        self.scrollable_distance = (axis.main_size(child_size) - self.viewport_main_size).max(0.0);
        self.current_offset = self.current_offset.clamp(-self.scrollable_distance, 0.0);

        let aligned = alignment.align_position(viewport, child_size);
        let cross = axis.cross_axis().main_offset(aligned);
        child
            .geometry_node_mut()
            .set_frame_offset(origin + axis.offset(self.current_offset, cross));
        child.layout(tree, global);
    }
}

/// Scroll position kept between passes.
#[derive(Debug, Default)]
pub struct ScrollPattern {
    current_offset: f32,
    scrollable_distance: f32,
    viewport_main_size: f32,
}

impl ScrollPattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of the child along the scroll axis, in `[-scrollable_distance, 0]`
    /// after every pass.
    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn scrollable_distance(&self) -> f32 {
        self.scrollable_distance
    }

    pub fn viewport_main_size(&self) -> f32 {
        self.viewport_main_size
    }

    /// Moves the child by `delta`; the next layout clamps the result.
    pub fn update_current_offset(&mut self, delta: f32) {
        self.current_offset += delta;
    }

    /// Scrolls so the child's `position` sits at the viewport start.
    pub fn jump_to(&mut self, position: f32) {
        self.current_offset = -position;
    }

    fn reached_start(&self) -> bool {
        non_negative(self.current_offset)
    }

    fn reached_end(&self) -> bool {
        self.current_offset <= -self.scrollable_distance
    }
}

impl Pattern for ScrollPattern {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::with_container(ScrollLayoutProperty::default())
    }

    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(ScrollLayoutAlgorithm::new(self.current_offset))
    }

    fn is_atomic_node(&self) -> bool {
        false
    }

    fn on_dirty_layout_wrapper_swap(
        &mut self,
        algorithm: &dyn LayoutAlgorithm,
        config: &DirtySwapConfig,
    ) -> bool {
        if config.skip_layout {
            return false;
        }
        let Some(scroll) = algorithm.downcast_ref::<ScrollLayoutAlgorithm>() else {
            return false;
        };
        self.current_offset = scroll.current_offset();
        self.scrollable_distance = scroll.scrollable_distance();
        self.viewport_main_size = scroll.viewport_main_size();
        false
    }
}

impl Scrollable for ScrollPattern {
    const SCROLL_DIRTY_FLAG: PropertyChangeFlag = PropertyChangeFlag::LAYOUT;

    fn update_scroll_position(&mut self, offset: f32, source: ScrollSource) -> bool {
        if source == ScrollSource::Start {
            return true;
        }
        if (offset > 0.0 && self.reached_start()) || (offset < 0.0 && self.reached_end()) {
            return false;
        }
        self.update_current_offset(offset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_against_an_edge_are_rejected() {
        let mut scroll = ScrollPattern {
            scrollable_distance: 700.0,
            ..ScrollPattern::default()
        };
        assert!(!scroll.update_scroll_position(20.0, ScrollSource::Update));
        assert!(scroll.update_scroll_position(-900.0, ScrollSource::Update));
        assert_eq!(scroll.current_offset(), -900.0);
        assert!(!scroll.update_scroll_position(-1.0, ScrollSource::Update));
        assert!(scroll.update_scroll_position(50.0, ScrollSource::Update));
    }

    #[test]
    fn jump_to_moves_a_position_to_the_viewport_start() {
        let mut scroll = ScrollPattern::new();
        scroll.jump_to(250.0);
        assert_eq!(scroll.current_offset(), -250.0);
    }
}
