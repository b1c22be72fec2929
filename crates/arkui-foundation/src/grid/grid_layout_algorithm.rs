use super::grid_layout_info::GridLayoutInfo;
use arkui_core::{LayoutAlgorithm, LayoutWrapper, UiTree};
use arkui_ui_layout::measure_utils::{create_ideal_size, minus_padding_to_size, padding_offset};
use arkui_ui_layout::GridLayoutProperty;

/// Measure and layout of one Grid pass, working on a copy of the pattern's
/// [`GridLayoutInfo`].
#[derive(Clone, Debug)]
pub struct GridLayoutAlgorithm {
    info: GridLayoutInfo,
}

impl GridLayoutAlgorithm {
    pub fn new(info: GridLayoutInfo) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &GridLayoutInfo {
        &self.info
    }
}

impl LayoutAlgorithm for GridLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let host = wrapper.host();
        let property = wrapper.layout_property();
        let Some(constraint) = property.layout_constraint().copied() else {
            log::error!("grid #{host} measured without a constraint");
            return;
        };
        if let Some(grid) = property.typed::<GridLayoutProperty>() {
            self.info.configure(grid);
        }
        let axis = self.info.axis();
        let ideal = create_ideal_size(&constraint, axis, property.measure_type(), true);
        if !axis.main_size(ideal).is_finite() {
            log::error!("grid #{host} has an unbounded main axis; measure aborted");
            return;
        }
        let padding = property.create_padding_and_border();
        let base = property.create_child_constraint();
        wrapper.geometry_node_mut().set_frame_size(ideal);
        let mut content = ideal;
        minus_padding_to_size(&padding, &mut content);

        wrapper.remove_all_children_in_render_tree();
        self.info.fill_grid_viewport_and_measure_children(
            axis.main_size(content),
            axis.cross_size(content),
            &base,
            wrapper,
            tree,
        );
        self.info.strip_items_out_of_viewport();
        let indices: Vec<usize> = self.info.item_indices().collect();
        for index in indices {
            wrapper.get_or_create_child_by_index(index, tree, true);
        }
        log::debug!(
            "grid #{host} keeps lines {}..={:?} (items {}..={:?}) at offset {}",
            self.info.start_main_line(),
            self.info.end_main_line(),
            self.info.start_index(),
            self.info.end_index(),
            self.info.current_offset()
        );
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let padding = wrapper.layout_property().create_padding_and_border();
        let mut content = wrapper.geometry_node().frame_size();
        minus_padding_to_size(&padding, &mut content);
        let origin = padding_offset(&padding);
        let global = wrapper.global_offset();
        let axis = self.info.axis();
        let fraction = self
            .info
            .cross_count()
            .map(|count| axis.cross_size(content) / count as f32);

        let mut main_position = self.info.current_offset();
        for (line, items) in self.info.grid_matrix() {
            let mut cross_position = 0.0;
            for (&index, &span) in items {
                let Some(child) = wrapper.get_or_create_child_by_index(index, tree, true) else {
                    continue;
                };
                let child_cross = axis.cross_size(child.geometry_node().frame_size());
                child
                    .geometry_node_mut()
                    .set_frame_offset(origin + axis.offset(main_position, cross_position));
                child.layout(tree, global);
                cross_position += fraction.map_or(child_cross, |width| width * span as f32);
            }
            main_position += self.info.line_height_map().get(line).copied().unwrap_or(0.0);
        }
    }
}

#[cfg(test)]
#[path = "../tests/grid_layout_algorithm_tests.rs"]
mod tests;
