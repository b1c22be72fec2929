use arkui_core::{LayoutAlgorithm, LayoutWrapper, UiTree};
use arkui_ui_graphics::{
    greater_not_equal, greater_or_equal, less_not_equal, less_or_equal, non_negative, OptionalSizeF,
};
use arkui_ui_layout::measure_utils::{
    convert_to_px, create_ideal_size_optional, minus_padding_to_size, padding_offset,
};
use arkui_ui_layout::{Axis, LayoutConstraintF, LayoutProperty, ListLayoutProperty, MeasureType};
use std::collections::BTreeMap;

/// Main-axis `(start, end)` of an item, in the coordinates of the pass:
/// the viewport begins at `current_offset`.
pub type ItemPosition = (f32, f32);

/// Measure and layout of one List pass.
///
/// The pass is anchored on the window of the previous pass: it walks
/// forward from the previous start item when the offset is non-negative,
/// backward from the previous end item otherwise. Items are grouped in rows
/// of `lanes` consecutive indices; a row is as tall as its tallest item and
/// every item of a row shares the row's position.
#[derive(Clone, Debug)]
pub struct ListLayoutAlgorithm {
    pre_start_index: usize,
    pre_end_index: usize,
    pre_start_position: f32,
    pre_end_position: Option<f32>,
    jump_index: Option<usize>,
    is_initialized: bool,
    current_offset: f32,
    space_width: f32,
    lanes: usize,
    axis: Axis,
    total_count: usize,
    main_size: f32,
    lane_cross_size: f32,
    start_main_pos: f32,
    end_main_pos: f32,
    position_map: BTreeMap<usize, ItemPosition>,
    start_index: usize,
    end_index: usize,
    reached_start: bool,
    reached_end: bool,
}

impl ListLayoutAlgorithm {
    pub fn new(pre_start_index: usize, pre_end_index: usize) -> Self {
        Self {
            pre_start_index,
            pre_end_index,
            pre_start_position: 0.0,
            pre_end_position: None,
            jump_index: None,
            is_initialized: false,
            current_offset: 0.0,
            space_width: 0.0,
            lanes: 1,
            axis: Axis::Vertical,
            total_count: 0,
            main_size: 0.0,
            lane_cross_size: 0.0,
            start_main_pos: 0.0,
            end_main_pos: 0.0,
            position_map: BTreeMap::new(),
            start_index: 0,
            end_index: 0,
            reached_start: false,
            reached_end: false,
        }
    }

    /// Where the previous start item began and the previous end item ended,
    /// relative to the viewport.
    pub fn set_pre_positions(&mut self, start: f32, end: Option<f32>) {
        self.pre_start_position = start;
        self.pre_end_position = end;
    }

    /// Lays the pass out from `index` at the top of the viewport.
    pub fn set_jump_index(&mut self, index: usize) {
        self.jump_index = Some(index);
    }

    pub fn set_is_initialized(&mut self, initialized: bool) {
        self.is_initialized = initialized;
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    pub fn set_current_offset(&mut self, offset: f32) {
        self.current_offset = offset;
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    /// Gap used when the layout property sets none.
    pub fn set_space_width(&mut self, space: f32) {
        self.space_width = space;
    }

    pub fn space_width(&self) -> f32 {
        self.space_width
    }

    /// Lane count used when the layout property sets none. Zero is read as
    /// one.
    pub fn set_lanes(&mut self, lanes: usize) {
        self.lanes = lanes.max(1);
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn position_map(&self) -> &BTreeMap<usize, ItemPosition> {
        &self.position_map
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    pub fn main_size(&self) -> f32 {
        self.main_size
    }

    pub fn reached_start(&self) -> bool {
        self.reached_start
    }

    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    fn row_start(&self, index: usize) -> usize {
        index / self.lanes * self.lanes
    }

    fn update_bands(&mut self, cache: f32) {
        self.start_main_pos = self.current_offset - cache;
        self.end_main_pos = self.current_offset + self.main_size + cache;
    }

    fn read_property(&mut self, property: &LayoutProperty, constraint: &LayoutConstraintF) {
        let Some(list) = property.typed::<ListLayoutProperty>() else {
            return;
        };
        if let Some(axis) = list.list_direction() {
            self.axis = axis;
        }
        if let Some(space) = list.space() {
            let reference = self.axis.main_size(constraint.percent_reference);
            self.space_width = convert_to_px(Some(space), &constraint.scale_property, reference)
                .unwrap_or(self.space_width);
        }
        if let Some(lanes) = list.lanes() {
            self.set_lanes(lanes);
        }
        if !self.is_initialized && self.jump_index.is_none() {
            self.jump_index = list.initial_index();
        }
    }

    /// The viewport size: the self ideal size, then the parent's ideal size
    /// on the cross axis (both axes when matching the parent), then the
    /// constraint's maximum.
    fn ideal_size(&self, constraint: &LayoutConstraintF, measure_type: MeasureType) -> OptionalSizeF {
        let measure_type = match measure_type {
            MeasureType::MatchContent => MeasureType::MatchParentCrossAxis,
            other => other,
        };
        let mut ideal = create_ideal_size_optional(constraint, self.axis, measure_type);
        ideal.update_illegal_size_with_size(constraint.max_size);
        ideal
    }

    fn item_constraint(&self, property: &LayoutProperty) -> LayoutConstraintF {
        let mut constraint = property.create_child_constraint();
        let axis = self.axis;
        axis.set_main_size(&mut constraint.max_size, f32::INFINITY);
        let cross = axis.cross_axis();
        cross.set_main_size(&mut constraint.max_size, self.lane_cross_size);
        let mut parent_ideal = constraint.parent_ideal_size;
        cross.set_optional_main_size(&mut parent_ideal, Some(self.lane_cross_size));
        constraint.parent_ideal_size = parent_ideal;
        constraint
    }

    /// Measures the row that starts at `row_start` and returns its main
    /// size. Missing items are skipped.
    fn measure_row(
        &self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        row_start: usize,
        constraint: &LayoutConstraintF,
    ) -> f32 {
        let row_end = (row_start + self.lanes).min(self.total_count);
        let mut row_main = 0.0f32;
        for index in row_start..row_end {
            let Some(child) = wrapper.get_or_create_child_by_index(index, tree, false) else {
                continue;
            };
            child.measure(tree, Some(*constraint));
            row_main = row_main.max(self.axis.main_size(child.geometry_node().frame_size()));
        }
        row_main
    }

    fn record_row(&mut self, row_start: usize, start: f32, end: f32) {
        let row_end = (row_start + self.lanes).min(self.total_count);
        for index in row_start..row_end {
            self.position_map.insert(index, (start, end));
        }
    }

    /// Walks rows from `row_start`, whose top sits at `start`, until a row
    /// begins past `limit` or the items run out.
    fn fill_forward(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        constraint: &LayoutConstraintF,
        mut row_start: usize,
        mut start: f32,
        limit: f32,
    ) {
        while row_start < self.total_count && less_not_equal(start, limit) {
            let row_main = self.measure_row(wrapper, tree, row_start, constraint);
            let end = start + row_main;
            self.record_row(row_start, start, end);
            row_start += self.lanes;
            start = end + self.space_width;
        }
    }

    /// Walks rows up from `row_start`, whose bottom sits at `end`, until a
    /// row ends before `limit` or index zero is reached.
    fn fill_backward(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        constraint: &LayoutConstraintF,
        row_start: usize,
        mut end: f32,
        limit: f32,
    ) {
        let mut row = Some(row_start);
        while let Some(row_start) = row {
            if less_or_equal(end, limit) {
                break;
            }
            let row_main = self.measure_row(wrapper, tree, row_start, constraint);
            let start = end - row_main;
            self.record_row(row_start, start, end);
            end = start - self.space_width;
            row = row_start.checked_sub(self.lanes);
        }
    }

    fn first_position(&self) -> Option<(usize, ItemPosition)> {
        self.position_map.iter().next().map(|(index, position)| (*index, *position))
    }

    fn last_position(&self) -> Option<(usize, ItemPosition)> {
        self.position_map
            .iter()
            .next_back()
            .map(|(index, position)| (*index, *position))
    }

    /// Grows the measured range on both sides until it covers the band.
    fn fill_band(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree, constraint: &LayoutConstraintF) {
        if let Some((first, (start, _))) = self.first_position() {
            let row = self.row_start(first);
            if row > 0 {
                let (above, end, limit) = (row - self.lanes, start - self.space_width, self.start_main_pos);
                self.fill_backward(wrapper, tree, constraint, above, end, limit);
            }
        }
        if let Some((last, (_, end))) = self.last_position() {
            let next = self.row_start(last) + self.lanes;
            let (start, limit) = (end + self.space_width, self.end_main_pos);
            self.fill_forward(wrapper, tree, constraint, next, start, limit);
        }
    }

    /// Walks forward from the previous start row. When the items run out
    /// before the viewport is full the offset is pulled back so the last
    /// item ends at the viewport end, and pulled back further so the first
    /// item never starts below the viewport start.
    pub fn layout_forward(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        constraint: &LayoutConstraintF,
        cache: f32,
    ) {
        let anchor = self.row_start(self.pre_start_index.min(self.total_count - 1));
        let start = self.pre_start_position;
        let limit = self.end_main_pos;
        self.fill_forward(wrapper, tree, constraint, anchor, start, limit);
        self.fill_band(wrapper, tree, constraint);
        self.correct_end(wrapper, tree, constraint, cache);
        self.correct_start(wrapper, tree, constraint, cache);
    }

    /// Mirror of [`layout_forward`](Self::layout_forward), anchored on the
    /// bottom of the previous end row.
    pub fn layout_backward(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        constraint: &LayoutConstraintF,
        cache: f32,
    ) {
        let anchor = self.row_start(self.pre_end_index.min(self.total_count - 1));
        let end = self
            .pre_end_position
            .unwrap_or(self.pre_start_position + self.main_size);
        let limit = self.start_main_pos;
        self.fill_backward(wrapper, tree, constraint, anchor, end, limit);
        self.fill_band(wrapper, tree, constraint);
        self.correct_end(wrapper, tree, constraint, cache);
        self.correct_start(wrapper, tree, constraint, cache);
    }

    fn correct_end(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        constraint: &LayoutConstraintF,
        cache: f32,
    ) {
        let Some((last, (_, end))) = self.last_position() else {
            return;
        };
        if last + 1 < self.total_count || !less_not_equal(end, self.current_offset + self.main_size) {
            return;
        }
        self.current_offset = end - self.main_size;
        self.update_bands(cache);
        self.fill_band(wrapper, tree, constraint);
    }

    fn correct_start(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        constraint: &LayoutConstraintF,
        cache: f32,
    ) {
        let Some((first, (start, _))) = self.first_position() else {
            return;
        };
        if first != 0 || !greater_not_equal(start, self.current_offset) {
            return;
        }
        self.current_offset = start;
        self.update_bands(cache);
        self.fill_band(wrapper, tree, constraint);
    }

    /// Drops every measured item outside the band and adds the rest to the
    /// render tree.
    fn strip_out_of_band(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let (low, high) = (self.start_main_pos, self.end_main_pos);
        self.position_map
            .retain(|_, (start, end)| greater_not_equal(*end, low) && less_not_equal(*start, high));
        for &index in self.position_map.keys() {
            wrapper.get_or_create_child_by_index(index, tree, true);
        }
    }

    fn update_edges(&mut self) {
        let viewport_end = self.current_offset + self.main_size;
        self.start_index = self.first_position().map_or(0, |(index, _)| index);
        self.end_index = self.last_position().map_or(0, |(index, _)| index);
        self.reached_start = self
            .first_position()
            .map_or(true, |(index, (start, _))| index == 0 && greater_or_equal(start, self.current_offset));
        self.reached_end = self.last_position().map_or(true, |(index, (_, end))| {
            index + 1 == self.total_count && less_or_equal(end, viewport_end)
        });
    }
}

impl LayoutAlgorithm for ListLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let property = wrapper.layout_property();
        let Some(constraint) = property.layout_constraint().copied() else {
            log::error!("{} #{} measured without a constraint", wrapper.tag(), wrapper.host());
            return;
        };
        self.read_property(property, &constraint);
        let ideal = self.ideal_size(&constraint, property.measure_type());
        let host = wrapper.host();
        if !self.axis.optional_main_size(ideal).map_or(false, f32::is_finite) {
            log::error!("list #{host} has an unbounded main axis; measure aborted");
            return;
        }
        let frame = ideal.to_size_or(0.0);
        wrapper.geometry_node_mut().set_frame_size(frame);

        let property = wrapper.layout_property();
        let padding = property.create_padding_and_border();
        let mut content = frame;
        minus_padding_to_size(&padding, &mut content);
        self.main_size = self.axis.main_size(content);
        self.lane_cross_size = self.axis.cross_size(content) / self.lanes as f32;
        let item_constraint = self.item_constraint(property);

        self.total_count = wrapper.total_child_count();
        self.position_map.clear();
        wrapper.remove_all_children_in_render_tree();
        if self.total_count == 0 {
            self.update_edges();
            return;
        }

        if let Some(jump) = self.jump_index.take() {
            self.pre_start_index = jump.min(self.total_count - 1);
            self.pre_start_position = 0.0;
            self.current_offset = 0.0;
        }
        let cache = self.main_size * tree.config().list_cache_ratio;
        self.update_bands(cache);
        if non_negative(self.current_offset) {
            self.layout_forward(wrapper, tree, &item_constraint, cache);
        } else {
            self.layout_backward(wrapper, tree, &item_constraint, cache);
        }
        self.strip_out_of_band(wrapper, tree);
        self.update_edges();
        self.is_initialized = true;
        log::debug!(
            "list #{host} keeps items {}..={} at offset {}",
            self.start_index,
            self.end_index,
            self.current_offset
        );
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let padding = wrapper.layout_property().create_padding_and_border();
        let origin = padding_offset(&padding);
        let global = wrapper.global_offset();
        for (&index, &(start, _)) in &self.position_map {
            let Some(child) = wrapper.get_or_create_child_by_index(index, tree, true) else {
                continue;
            };
            let lane = (index % self.lanes) as f32;
            let offset = origin
                + self
                    .axis
                    .offset(start - self.current_offset, lane * self.lane_cross_size);
            child.geometry_node_mut().set_frame_offset(offset);
            child.layout(tree, global);
        }
    }
}

#[cfg(test)]
#[path = "../tests/list_layout_algorithm_tests.rs"]
mod tests;
