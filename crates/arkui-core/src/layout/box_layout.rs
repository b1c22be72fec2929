//! Default algorithm: children stacked on top of each other and aligned
//! inside the content box.

use crate::layout::{LayoutAlgorithm, LayoutWrapper};
use crate::tree::UiTree;
use arkui_ui_graphics::{OptionalSizeF, SizeF};
use arkui_ui_layout::measure_utils::{add_padding_to_size, minus_padding_to_size, padding_offset};
use arkui_ui_layout::MeasureType;

#[derive(Clone, Copy, Debug, Default)]
pub struct BoxLayoutAlgorithm;

impl LayoutAlgorithm for BoxLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let constraint = wrapper.layout_property().create_child_constraint();
        for child in wrapper.get_all_children_with_build(tree, true) {
            child.measure(tree, Some(constraint));
        }
        Self::perform_measure_self(wrapper);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        Self::perform_layout(wrapper, tree);
    }
}

impl BoxLayoutAlgorithm {
    /// Sizes the wrapper from, in order: its self ideal size, the parent's
    /// ideal size when it matches its parent, its content or largest child
    /// plus padding, zero.
    pub fn perform_measure_self(wrapper: &mut LayoutWrapper) {
        let property = wrapper.layout_property();
        let Some(constraint) = property.layout_constraint().copied() else {
            log::error!("{} #{} measured without a constraint", wrapper.tag(), wrapper.host());
            return;
        };
        let padding = property.create_padding_and_border();
        let mut frame_size = OptionalSizeF::NONE;
        frame_size.update_size_with_check(constraint.self_ideal_size);
        if !frame_size.is_valid() && property.measure_type() == MeasureType::MatchParent {
            frame_size.update_illegal_size_with_check(constraint.parent_ideal_size);
            if frame_size.is_valid() {
                let mut size = frame_size.to_size_or(0.0);
                size.constrain(constraint.min_size, constraint.max_size);
                frame_size = OptionalSizeF::from_size(size);
            }
        }
        if !frame_size.is_valid() {
            if let Some(content) = wrapper.geometry_node().content() {
                let mut content_size = content.rect.size();
                add_padding_to_size(&padding, &mut content_size);
                frame_size.update_illegal_size_with_size(content_size);
            } else {
                let mut child_frame = wrapper
                    .active_children()
                    .iter()
                    .map(|child| child.geometry_node().frame_size())
                    .fold(SizeF::ZERO, |acc, size| {
                        SizeF::new(acc.width.max(size.width), acc.height.max(size.height))
                    });
                child_frame.constrain(constraint.min_size, constraint.max_size);
                add_padding_to_size(&padding, &mut child_frame);
                frame_size.update_illegal_size_with_size(child_frame);
            }
            frame_size.update_illegal_size_with_size(SizeF::ZERO);
        }
        wrapper
            .geometry_node_mut()
            .set_frame_size(frame_size.to_size_or(0.0));
    }

    /// Places every child by the node's alignment (centered by default)
    /// inside the content box and lays it out.
    pub fn perform_layout(wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let property = wrapper.layout_property();
        let padding = property.create_padding_and_border();
        let alignment = property.alignment().unwrap_or_default();
        let mut content_size = wrapper.geometry_node().frame_size();
        minus_padding_to_size(&padding, &mut content_size);
        let origin = padding_offset(&padding);
        let global = wrapper.global_offset();
        for child in wrapper.get_all_children_with_build(tree, true) {
            let child_size = child.geometry_node().frame_size();
            let offset = origin + alignment.align_position(content_size, child_size);
            child.geometry_node_mut().set_frame_offset(offset);
            child.layout(tree, global);
        }
        if wrapper.geometry_node().content().is_some() {
            let content_offset = origin
                + alignment.align_position(content_size, wrapper.geometry_node().content_size());
            wrapper.geometry_node_mut().set_content_offset(content_offset);
        }
    }
}
