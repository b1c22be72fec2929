use crate::scrollable::ScrollSource;
use arkui_core::{LayoutWrapper, UiTree};
use arkui_ui_graphics::{
    greater_not_equal, greater_or_equal, less_not_equal, less_or_equal, positive, OptionalSizeF,
    SizeF,
};
use arkui_ui_layout::{Axis, GridItemLayoutProperty, GridLayoutProperty, LayoutConstraintF};
use std::collections::BTreeMap;

/// Line bookkeeping of a Grid, kept by the pattern between passes.
///
/// In a vertical grid a line is a row. `grid_matrix` maps a line to the
/// items it holds and the number of tracks each item spans;
/// `line_height_map` maps a line to its main-axis size. Both only hold the
/// lines between `start_main_line` and `end_main_line` once a pass is over.
///
/// `current_offset` is where the top of the start line sits relative to
/// the viewport: positive leaves a blank above it, negative hides part of
/// it.
#[derive(Clone, Debug)]
pub struct GridLayoutInfo {
    is_vertical: bool,
    is_configured_scrollable: bool,
    cross_count: Option<usize>,
    main_count: Option<usize>,
    current_offset: f32,
    start_index: usize,
    end_index: Option<usize>,
    start_main_line: usize,
    end_main_line: Option<usize>,
    reach_start: bool,
    reach_end: bool,
    total_count: usize,
    main_size: f32,
    cross_size: f32,
    grid_matrix: BTreeMap<usize, BTreeMap<usize, usize>>,
    line_height_map: BTreeMap<usize, f32>,
}

impl Default for GridLayoutInfo {
    fn default() -> Self {
        Self {
            is_vertical: true,
            is_configured_scrollable: true,
            cross_count: None,
            main_count: None,
            current_offset: 0.0,
            start_index: 0,
            end_index: None,
            start_main_line: 0,
            end_main_line: None,
            reach_start: false,
            reach_end: false,
            total_count: 0,
            main_size: 0.0,
            cross_size: 0.0,
            grid_matrix: BTreeMap::new(),
            line_height_map: BTreeMap::new(),
        }
    }
}

fn track_count(template: Option<String>) -> Option<usize> {
    let count = template.map_or(0, |template| template.split_whitespace().count());
    (count > 0).then_some(count)
}

impl GridLayoutInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes orientation and track counts from the templates. A change of
    /// either drops the recorded lines and restarts from the current start
    /// item.
    pub fn configure(&mut self, grid: &GridLayoutProperty) {
        let is_vertical = grid.is_vertical();
        let columns = track_count(grid.columns_template());
        let rows = track_count(grid.rows_template());
        let (cross_count, main_count) = if is_vertical { (columns, rows) } else { (rows, columns) };
        if (is_vertical != self.is_vertical || cross_count != self.cross_count)
            && !self.grid_matrix.is_empty()
        {
            log::debug!("grid tracks changed; restarting from item {}", self.start_index);
            self.restart_from(self.start_index);
        }
        self.is_vertical = is_vertical;
        self.is_configured_scrollable = grid.is_configured_scrollable();
        self.cross_count = cross_count;
        self.main_count = main_count;
    }

    /// Forgets every line and lays the next pass out from `index`.
    pub fn restart_from(&mut self, index: usize) {
        self.grid_matrix.clear();
        self.line_height_map.clear();
        self.start_index = index;
        self.end_index = index.checked_sub(1);
        // Lines above the restart point hold at least one item each.
        self.start_main_line = index;
        self.end_main_line = None;
        self.current_offset = 0.0;
    }

    pub fn axis(&self) -> Axis {
        if self.is_vertical {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    pub fn is_configured_scrollable(&self) -> bool {
        self.is_configured_scrollable
    }

    /// Tracks per line; `None` when no template limits them.
    pub fn cross_count(&self) -> Option<usize> {
        self.cross_count
    }

    pub fn main_count(&self) -> Option<usize> {
        self.main_count
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> Option<usize> {
        self.end_index
    }

    pub fn start_main_line(&self) -> usize {
        self.start_main_line
    }

    pub fn end_main_line(&self) -> Option<usize> {
        self.end_main_line
    }

    pub fn reach_start(&self) -> bool {
        self.reach_start
    }

    pub fn reach_end(&self) -> bool {
        self.reach_end
    }

    pub fn grid_matrix(&self) -> &BTreeMap<usize, BTreeMap<usize, usize>> {
        &self.grid_matrix
    }

    pub fn line_height_map(&self) -> &BTreeMap<usize, f32> {
        &self.line_height_map
    }

    /// Item indices of every recorded line, in order.
    pub fn item_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.grid_matrix.values().flat_map(|items| items.keys().copied())
    }

    /// Applies a gesture offset: positive moves the content down.
    ///
    /// An offset pushing against a reached edge is rejected; an offset
    /// leaving an edge clears that edge's flag.
    pub fn update_scroll_position(&mut self, offset: f32, source: ScrollSource) -> bool {
        if source == ScrollSource::Start {
            return true;
        }
        if self.reach_end {
            if less_or_equal(offset, 0.0) {
                return false;
            }
            self.reach_end = false;
        }
        if self.reach_start {
            if greater_or_equal(offset, 0.0) {
                return false;
            }
            self.reach_start = false;
        }
        self.current_offset += offset;
        true
    }

    /// The constraint for an item spanning `span` tracks.
    ///
    /// The main axis is unbounded when the grid scrolls or no template
    /// fixes the line count; the cross axis is `span` fractions of the
    /// cross size, or all of it when the track count is unbounded.
    pub fn make_measure_constraint_for_grid_item(
        &self,
        span: usize,
        base: &LayoutConstraintF,
    ) -> LayoutConstraintF {
        let item_main = match self.main_count {
            Some(count) if !self.is_configured_scrollable => self.main_size / count as f32,
            _ => f32::INFINITY,
        };
        let item_cross = match self.cross_count {
            Some(count) => self.cross_size / count as f32 * span.min(count) as f32,
            None => self.cross_size,
        };
        let axis = self.axis();
        let mut parent_ideal = OptionalSizeF::NONE;
        axis.cross_axis()
            .set_optional_main_size(&mut parent_ideal, Some(item_cross));
        if item_main.is_finite() {
            axis.set_optional_main_size(&mut parent_ideal, Some(item_main));
        }
        let mut constraint = *base;
        constraint.parent_ideal_size = parent_ideal;
        constraint.max_size = axis.size(item_main, item_cross);
        constraint.min_size = SizeF::ZERO;
        constraint
    }

    fn span_of(&self, wrapper: &LayoutWrapper) -> usize {
        let span = wrapper
            .layout_property()
            .typed::<GridItemLayoutProperty>()
            .map_or(1, GridItemLayoutProperty::span);
        self.cross_count.map_or(span, |count| span.min(count))
    }

    fn line_has_room(&self, used: usize, span: usize) -> bool {
        match self.cross_count {
            Some(count) => used == 0 || used + span <= count,
            None => true,
        }
    }

    fn measure_item(
        &self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        index: usize,
        used: usize,
        base: &LayoutConstraintF,
    ) -> Option<(usize, f32)> {
        let child = wrapper.get_or_create_child_by_index(index, tree, false)?;
        let span = self.span_of(child);
        if !self.line_has_room(used, span) {
            return None;
        }
        child.measure(tree, Some(self.make_measure_constraint_for_grid_item(span, base)));
        Some((span, self.axis().main_size(child.geometry_node().frame_size())))
    }

    /// Measures the viewport for a pass with the given content size.
    ///
    /// Recorded lines are measured first. New lines are then appended until
    /// the viewport is full; when the items run out the offset is pulled
    /// back so the last line ends at the viewport end. Any blank left above
    /// the start line is filled with earlier lines, and the content snaps to
    /// the top once the first item is reached.
    pub fn fill_grid_viewport_and_measure_children(
        &mut self,
        main_size: f32,
        cross_size: f32,
        base: &LayoutConstraintF,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
    ) {
        self.main_size = main_size;
        self.cross_size = cross_size;
        self.total_count = wrapper.total_child_count();
        self.reach_start = false;
        self.reach_end = false;
        if self.start_index >= self.total_count && self.start_index > 0 {
            self.restart_from(0);
        }

        let mut main_length = self.current_offset;
        self.measure_recorded_items(wrapper, tree, base, &mut main_length);
        self.fill_blank_at_end(wrapper, tree, base, &mut main_length);
        if self.reach_end {
            self.modify_current_offset_when_reach_end();
        }
        if self.fill_blank_at_start(wrapper, tree, base) && !self.reach_end {
            let mut main_length = self.current_offset + self.lines_length();
            self.fill_blank_at_end(wrapper, tree, base, &mut main_length);
        }
        self.update_edges();
    }

    /// Re-measures recorded lines from the start line until the viewport is
    /// full or the record runs out. Lines that end above the viewport move
    /// the start line past them. Only lines with a positive size are
    /// recorded, and the record stops at the first item that is gone.
    pub fn measure_recorded_items(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        base: &LayoutConstraintF,
        main_length: &mut f32,
    ) {
        let mut line = self.start_main_line;
        self.end_main_line = None;
        while less_not_equal(*main_length, self.main_size) {
            let Some(items) = self.grid_matrix.get(&line).cloned() else {
                break;
            };
            let mut line_height = 0.0f32;
            let mut gone = None;
            for (&index, &span) in &items {
                let Some(child) = wrapper.get_or_create_child_by_index(index, tree, false) else {
                    log::warn!("grid item {index} is gone");
                    gone = Some(index);
                    break;
                };
                child.measure(tree, Some(self.make_measure_constraint_for_grid_item(span, base)));
                line_height = line_height.max(self.axis().main_size(child.geometry_node().frame_size()));
                self.end_index = Some(index);
            }
            if let Some(index) = gone {
                self.truncate_records(line, index);
            }
            if positive(line_height) {
                self.line_height_map.insert(line, line_height);
                *main_length += line_height;
            } else {
                self.line_height_map.remove(&line);
            }
            if gone.is_some() && !self.grid_matrix.contains_key(&line) {
                break;
            }
            self.end_main_line = Some(line);
            self.pass_line_above_viewport(line, *main_length);
            if gone.is_some() {
                break;
            }
            line += 1;
        }
    }

    /// Forgets item `index` of `line` and everything recorded after it.
    fn truncate_records(&mut self, line: usize, index: usize) {
        let _ = self.grid_matrix.split_off(&(line + 1));
        let _ = self.line_height_map.split_off(&(line + 1));
        if let Some(items) = self.grid_matrix.get_mut(&line) {
            let _ = items.split_off(&index);
            if items.is_empty() {
                self.grid_matrix.remove(&line);
            }
        }
    }

    fn pass_line_above_viewport(&mut self, line: usize, main_length: f32) {
        if less_or_equal(main_length, 0.0) {
            self.current_offset = main_length;
            self.start_main_line = line + 1;
            self.start_index = self.end_index.map_or(0, |index| index + 1);
        }
    }

    /// Appends new lines until `main_length` covers the viewport. Running
    /// out of items sets the end flag.
    pub fn fill_blank_at_end(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        base: &LayoutConstraintF,
        main_length: &mut f32,
    ) {
        while less_not_equal(*main_length, self.main_size) {
            let line = self.end_main_line.map_or(self.start_main_line, |line| line + 1);
            let Some(line_height) = self.fill_new_line_backward(wrapper, tree, base, line) else {
                self.reach_end = true;
                break;
            };
            *main_length += line_height;
            self.pass_line_above_viewport(line, *main_length);
        }
    }

    /// Builds `line` from the items after the end item and returns its main
    /// size, or `None` when no item is left.
    pub fn fill_new_line_backward(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        base: &LayoutConstraintF,
        line: usize,
    ) -> Option<f32> {
        let mut index = self.end_index.map_or(0, |index| index + 1);
        let mut items = BTreeMap::new();
        let mut used = 0;
        let mut line_height = 0.0f32;
        while index < self.total_count && self.cross_count.map_or(true, |count| used < count) {
            let Some((span, main)) = self.measure_item(wrapper, tree, index, used, base) else {
                break;
            };
            items.insert(index, span);
            used += span;
            line_height = line_height.max(main);
            self.end_index = Some(index);
            index += 1;
        }
        if items.is_empty() {
            return None;
        }
        self.grid_matrix.insert(line, items);
        self.line_height_map.insert(line, line_height);
        self.end_main_line = Some(line);
        Some(line_height)
    }

    /// Pulls the offset back so the last line ends at the viewport end.
    pub fn modify_current_offset_when_reach_end(&mut self) {
        self.current_offset = self.main_size - self.lines_length();
    }

    /// Fills a blank above the start line with earlier lines. Returns true
    /// when the content had to be moved up because the first item was
    /// reached first.
    pub fn fill_blank_at_start(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        base: &LayoutConstraintF,
    ) -> bool {
        if less_or_equal(self.current_offset, 0.0) {
            return false;
        }
        let mut blank = self.current_offset;
        while greater_not_equal(blank, 0.0) {
            match self.fill_new_line_forward(wrapper, tree, base) {
                Some(line_height) => blank -= line_height,
                None => {
                    self.reach_start = true;
                    break;
                }
            }
        }
        if self.reach_start && greater_not_equal(blank, 0.0) {
            self.current_offset = 0.0;
            return true;
        }
        self.current_offset = blank;
        false
    }

    /// Builds the line above the start line from the items before the
    /// start item and returns its main size, or `None` at the first item.
    pub fn fill_new_line_forward(
        &mut self,
        wrapper: &mut LayoutWrapper,
        tree: &mut UiTree,
        base: &LayoutConstraintF,
    ) -> Option<f32> {
        if self.start_index == 0 {
            return None;
        }
        if self.start_main_line == 0 {
            self.shift_lines(self.start_index);
        }
        let line = self.start_main_line - 1;
        let mut index = self.start_index;
        let mut items = BTreeMap::new();
        let mut used = 0;
        let mut line_height = 0.0f32;
        while index > 0 && self.cross_count.map_or(true, |count| used < count) {
            let Some((span, main)) = self.measure_item(wrapper, tree, index - 1, used, base) else {
                break;
            };
            index -= 1;
            items.insert(index, span);
            used += span;
            line_height = line_height.max(main);
        }
        if items.is_empty() {
            return None;
        }
        self.start_index = index;
        self.start_main_line = line;
        self.grid_matrix.insert(line, items);
        self.line_height_map.insert(line, line_height);
        Some(line_height)
    }

    /// Renumbers every line so `by` more lines fit above the start line.
    fn shift_lines(&mut self, by: usize) {
        self.grid_matrix = std::mem::take(&mut self.grid_matrix)
            .into_iter()
            .map(|(line, items)| (line + by, items))
            .collect();
        self.line_height_map = std::mem::take(&mut self.line_height_map)
            .into_iter()
            .map(|(line, height)| (line + by, height))
            .collect();
        self.start_main_line += by;
        self.end_main_line = self.end_main_line.map(|line| line + by);
    }

    /// Drops every recorded line outside `start_main_line..=end_main_line`.
    ///
    /// The bound is checked against the recorded line numbers themselves, so
    /// sparse records past the end line are dropped as well.
    pub fn strip_items_out_of_viewport(&mut self) {
        let start = self.start_main_line;
        let Some(end) = self.end_main_line else {
            self.grid_matrix.clear();
            self.line_height_map.clear();
            return;
        };
        let in_view = |line: &usize| (start..=end).contains(line);
        self.grid_matrix.retain(|line, _| in_view(line));
        self.line_height_map.retain(|line, _| in_view(line));
    }

    fn lines_length(&self) -> f32 {
        let Some(end) = self.end_main_line.filter(|end| *end >= self.start_main_line) else {
            return 0.0;
        };
        self.line_height_map
            .range(self.start_main_line..=end)
            .map(|(_, height)| *height)
            .sum()
    }

    fn update_edges(&mut self) {
        self.reach_start |= self.start_index == 0 && greater_or_equal(self.current_offset, 0.0);
        let last_shown = self.end_index.map_or(true, |index| index + 1 >= self.total_count);
        self.reach_end |= last_shown
            && less_or_equal(self.current_offset + self.lines_length(), self.main_size);
    }
}
