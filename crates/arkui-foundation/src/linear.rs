//! Row and Column: children placed one after another along an axis.
//!
//! Children with a positive layout weight share the main-axis space the
//! others leave over, in proportion to their weights.

use arkui_core::{LayoutAlgorithm, LayoutWrapper, Pattern, UiTree};
use arkui_ui_graphics::{positive, SizeF};
use arkui_ui_layout::measure_utils::{
    add_padding_to_size, constrain_size, convert_to_px, create_ideal_size_optional,
    minus_padding_to_size, padding_offset,
};
use arkui_ui_layout::{Arrangement, Axis, FlexAlign, LayoutProperty, LinearLayoutProperty};
use smallvec::SmallVec;

/// Pattern behind Row (`is_vertical == false`) and Column.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearPattern {
    is_vertical: bool,
}

impl LinearPattern {
    pub fn row() -> Self {
        Self { is_vertical: false }
    }

    pub fn column() -> Self {
        Self { is_vertical: true }
    }

    pub fn is_vertical(&self) -> bool {
        self.is_vertical
    }
}

impl Pattern for LinearPattern {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::with_container(LinearLayoutProperty::new(self.is_vertical))
    }

    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        let axis = if self.is_vertical {
            Axis::Vertical
        } else {
            Axis::Horizontal
        };
        Box::new(LinearLayoutAlgorithm::new(axis))
    }

    fn is_atomic_node(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LinearLayoutAlgorithm {
    axis: Axis,
    space: f32,
}

struct LinearSettings {
    axis: Axis,
    space: f32,
    main_axis_align: FlexAlign,
    cross_axis_align: FlexAlign,
}

impl LinearLayoutAlgorithm {
    pub fn new(axis: Axis) -> Self {
        Self { axis, space: 0.0 }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Gap between neighbours resolved during the last measure.
    pub fn space(&self) -> f32 {
        self.space
    }

    fn settings(&self, property: &LayoutProperty) -> LinearSettings {
        let linear = property.typed::<LinearLayoutProperty>();
        let axis = linear.map_or(self.axis, LinearLayoutProperty::axis);
        let space = match (linear.and_then(LinearLayoutProperty::space), property.layout_constraint()) {
            (Some(space), Some(constraint)) => convert_to_px(
                Some(space),
                &constraint.scale_property,
                axis.main_size(constraint.percent_reference),
            )
            .unwrap_or(0.0),
            _ => 0.0,
        };
        LinearSettings {
            axis,
            space,
            main_axis_align: linear
                .and_then(LinearLayoutProperty::main_axis_align)
                .unwrap_or_default(),
            cross_axis_align: linear
                .and_then(LinearLayoutProperty::cross_axis_align)
                .unwrap_or(FlexAlign::Center),
        }
    }
}

impl LayoutAlgorithm for LinearLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let property = wrapper.layout_property();
        let Some(constraint) = property.layout_constraint().copied() else {
            log::error!("{} #{} measured without a constraint", wrapper.tag(), wrapper.host());
            return;
        };
        let settings = self.settings(property);
        let axis = settings.axis;
        self.axis = axis;
        self.space = settings.space;
        let padding = property.create_padding_and_border();
        let explicit = create_ideal_size_optional(&constraint, axis, property.measure_type());
        let mut available = explicit;
        available.update_illegal_size_with_size(constraint.max_size);
        let mut content = available.to_size_or(0.0);
        minus_padding_to_size(&padding, &mut content);
        let child_constraint = property.create_child_constraint();

        let host = wrapper.host();
        let mut children = wrapper.get_all_children_with_build(tree, true);
        let spaces = settings.space * children.len().saturating_sub(1) as f32;
        let mut weighted: SmallVec<[(usize, f32); 4]> = SmallVec::new();
        let mut total_weight = 0.0;
        let mut allocated = 0.0;
        let mut cross = 0.0f32;
        for (index, child) in children.iter_mut().enumerate() {
            match child.layout_property().layout_weight().filter(|weight| positive(*weight)) {
                Some(weight) => {
                    weighted.push((index, weight));
                    total_weight += weight;
                }
                None => {
                    child.measure(tree, Some(child_constraint));
                    let size = child.geometry_node().frame_size();
                    allocated += axis.main_size(size);
                    cross = cross.max(axis.cross_size(size));
                }
            }
        }

        if !weighted.is_empty() {
            let main = axis.main_size(content);
            if !main.is_finite() {
                log::error!("linear #{host} has weighted children but an unbounded main axis");
                return;
            }
            let remain = main - allocated - spaces;
            for (index, weight) in weighted {
                let share = if remain < 0.0 {
                    main
                } else {
                    remain * weight / total_weight
                };
                let mut weighted_constraint = child_constraint;
                let mut ideal = weighted_constraint.self_ideal_size;
                axis.set_optional_main_size(&mut ideal, Some(share));
                weighted_constraint.self_ideal_size = ideal;
                axis.set_main_size(&mut weighted_constraint.min_size, share);
                axis.set_main_size(&mut weighted_constraint.max_size, share);
                let Some(child) = children.get_mut(index) else {
                    continue;
                };
                child.measure(tree, Some(weighted_constraint));
                let size = child.geometry_node().frame_size();
                allocated += axis.main_size(size);
                cross = cross.max(axis.cross_size(size));
            }
        }
        drop(children);

        let mut frame = explicit;
        let mut children_size = axis.size(allocated + spaces, cross);
        add_padding_to_size(&padding, &mut children_size);
        let children_size = constrain_size(children_size, constraint.min_size, constraint.max_size);
        frame.update_illegal_size_with_size(children_size);
        let frame = frame.to_size_or(0.0);
        log::trace!("linear #{host} measured to {frame:?}");
        wrapper.geometry_node_mut().set_frame_size(frame);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let property = wrapper.layout_property();
        let settings = self.settings(property);
        let axis = settings.axis;
        let padding = property.create_padding_and_border();
        let mut content = wrapper.geometry_node().frame_size();
        minus_padding_to_size(&padding, &mut content);
        let origin = padding_offset(&padding);
        let global = wrapper.global_offset();

        let mut children = wrapper.get_all_children_with_build(tree, true);
        let sizes: SmallVec<[SizeF; 8]> = children
            .iter()
            .map(|child| child.geometry_node().frame_size())
            .collect();
        let main_sizes: SmallVec<[f32; 8]> = sizes.iter().map(|size| axis.main_size(*size)).collect();
        let mut positions: SmallVec<[f32; 8]> = SmallVec::from_elem(0.0, main_sizes.len());
        settings.main_axis_align.arrange(
            axis.main_size(content),
            settings.space,
            &main_sizes,
            &mut positions,
        );
        let content_cross = axis.cross_size(content);
        for ((child, size), main) in children.iter_mut().zip(sizes).zip(positions) {
            let cross = settings
                .cross_axis_align
                .cross_offset(content_cross, axis.cross_size(size));
            child
                .geometry_node_mut()
                .set_frame_offset(origin + axis.offset(main, cross));
            child.layout(tree, global);
        }
    }
}

#[cfg(test)]
#[path = "tests/linear_tests.rs"]
mod tests;
