use arkui_core::{LayoutAlgorithm, LayoutWrapper, NodeId, UiTree};
use arkui_ui_graphics::{greater_not_equal, less_not_equal};
use arkui_ui_layout::measure_utils::{create_ideal_size, minus_padding_to_size, padding_offset};
use arkui_ui_layout::{Axis, SwiperLayoutProperty};

/// Measure and layout of one Swiper pass.
#[derive(Clone, Debug)]
pub struct SwiperLayoutAlgorithm {
    current_index: usize,
    target_index: Option<usize>,
    pending_index: Option<usize>,
    current_offset: f32,
    axis: Axis,
    display_count: usize,
    looping: bool,
    total_count: usize,
    item_main_size: f32,
}

impl SwiperLayoutAlgorithm {
    pub fn new(current_index: usize, target_index: Option<usize>, current_offset: f32) -> Self {
        Self {
            current_index,
            target_index,
            pending_index: None,
            current_offset,
            axis: Axis::Horizontal,
            display_count: 1,
            looping: false,
            total_count: 0,
            item_main_size: 0.0,
        }
    }

    /// Page count and page size of the previous pass, for passes that only
    /// lay out.
    pub fn set_page_metrics(&mut self, total_count: usize, item_main_size: f32) {
        self.total_count = total_count;
        self.item_main_size = item_main_size;
    }

    /// An index set from outside, applied if it names an existing page.
    pub fn set_pending_index(&mut self, index: usize) {
        self.pending_index = Some(index);
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn target_index(&self) -> Option<usize> {
        self.target_index
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Main size of one page.
    pub fn item_main_size(&self) -> f32 {
        self.item_main_size
    }

    /// A target that is not a neighbour of the current page. While looping,
    /// the first and last pages are neighbours.
    fn is_jump(&self) -> bool {
        let Some(target) = self.target_index else {
            return false;
        };
        if target.abs_diff(self.current_index) <= 1 {
            return false;
        }
        let count = self.total_count;
        let wraps = self.looping
            && count > 1
            && (target == (self.current_index + 1) % count
                || target == (self.current_index + count - 1) % count);
        !wraps
    }

    fn read_property(&mut self, swiper: &SwiperLayoutProperty) {
        self.axis = swiper.direction().unwrap_or(Axis::Horizontal);
        self.display_count = swiper.display_count().unwrap_or(1).max(1);
        self.looping = swiper.looping().unwrap_or(false);
    }

    fn apply_pending_index(&mut self, host: NodeId) {
        let Some(index) = self.pending_index.take() else {
            return;
        };
        if index < self.total_count {
            self.current_index = index;
            self.target_index = None;
            self.current_offset = 0.0;
        } else {
            log::error!(
                "swiper #{host}: index {index} is not valid for {} pages",
                self.total_count
            );
        }
    }

    /// Position of page `index` relative to the current page, in pages.
    /// While looping, the last page is drawn before the first one when
    /// the content is dragged towards the end, and the other way round.
    fn relative_position(&self, index: usize) -> f32 {
        let last = self.total_count.saturating_sub(1);
        let looping = self.looping && self.total_count > 1;
        let position = if looping
            && self.current_index == 0
            && greater_not_equal(self.current_offset, 0.0)
            && index == last
        {
            -1.0
        } else if looping
            && self.current_index == last
            && less_not_equal(self.current_offset, 0.0)
            && index == 0
        {
            self.total_count as f32
        } else {
            index as f32
        };
        position - self.current_index as f32
    }
}

impl LayoutAlgorithm for SwiperLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let host = wrapper.host();
        let property = wrapper.layout_property();
        let Some(constraint) = property.layout_constraint().copied() else {
            log::error!("swiper #{host} measured without a constraint");
            return;
        };
        if let Some(swiper) = property.typed::<SwiperLayoutProperty>() {
            self.read_property(swiper);
        }
        let ideal = create_ideal_size(&constraint, self.axis, property.measure_type(), true);
        if !self.axis.main_size(ideal).is_finite() {
            log::error!("swiper #{host} has an unbounded main axis; measure aborted");
            return;
        }
        let padding = property.create_padding_and_border();
        let mut child_constraint = property.create_child_constraint();
        wrapper.geometry_node_mut().set_frame_size(ideal);
        let mut content = ideal;
        minus_padding_to_size(&padding, &mut content);
        self.item_main_size = self.axis.main_size(content) / self.display_count as f32;
        self.axis
            .set_main_size(&mut child_constraint.max_size, self.item_main_size);
        let mut parent_ideal = child_constraint.parent_ideal_size;
        self.axis
            .set_optional_main_size(&mut parent_ideal, Some(self.item_main_size));
        child_constraint.parent_ideal_size = parent_ideal;

        self.total_count = wrapper.total_child_count();
        self.apply_pending_index(host);
        if self.current_index >= self.total_count && self.total_count > 0 {
            log::warn!(
                "swiper #{host}: page {} is gone, showing the last page",
                self.current_index
            );
            self.current_index = self.total_count - 1;
            self.target_index = None;
        }
        for child in wrapper.get_all_children_with_build(tree, true) {
            child.measure(tree, Some(child_constraint));
        }
        if self.is_jump() {
            let shown = [Some(self.current_index), self.target_index];
            for index in 0..self.total_count {
                if !shown.contains(&Some(index)) {
                    wrapper.remove_child_in_render_tree(index);
                }
            }
        }
        log::trace!(
            "swiper #{host} measured {} pages at page {}",
            self.total_count,
            self.current_index
        );
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        if let Some(swiper) = wrapper.layout_property().typed::<SwiperLayoutProperty>() {
            self.read_property(swiper);
        }
        let padding = wrapper.layout_property().create_padding_and_border();
        let origin = padding_offset(&padding);
        let global = wrapper.global_offset();
        let item = self.item_main_size;

        if let (true, Some(target)) = (self.is_jump(), self.target_index) {
            let toward = if target > self.current_index { item } else { -item };
            let pages = [(self.current_index, 0.0), (target, toward)];
            for (index, main) in pages {
                let Some(child) = wrapper.get_or_create_child_by_index(index, tree, true) else {
                    continue;
                };
                child
                    .geometry_node_mut()
                    .set_frame_offset(origin + self.axis.offset(main + self.current_offset, 0.0));
                child.layout(tree, global);
            }
            return;
        }

        for index in 0..self.total_count {
            let main = self.relative_position(index) * item + self.current_offset;
            let Some(child) = wrapper.get_or_create_child_by_index(index, tree, true) else {
                continue;
            };
            child
                .geometry_node_mut()
                .set_frame_offset(origin + self.axis.offset(main, 0.0));
            child.layout(tree, global);
        }
    }
}
