use super::swiper_layout_algorithm::SwiperLayoutAlgorithm;
use crate::scrollable::{ScrollSource, Scrollable};
use arkui_core::{DirtySwapConfig, LayoutAlgorithm, Pattern};
use arkui_ui_graphics::{greater_not_equal, less_not_equal, positive};
use arkui_ui_layout::{LayoutProperty, PropertyChangeFlag, SwiperLayoutProperty};

/// Page state of a Swiper.
///
/// The page count, the page size and the loop setting are the ones seen by
/// the last layout pass.
#[derive(Debug, Default)]
pub struct SwiperPattern {
    current_index: usize,
    target_index: Option<usize>,
    current_offset: f32,
    total_count: usize,
    item_main_size: f32,
    looping: bool,
    applied_index: Option<usize>,
    pending_index: Option<usize>,
}

impl SwiperPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The page a running transition ends on.
    pub fn target_index(&self) -> Option<usize> {
        self.target_index
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn is_loop(&self) -> bool {
        self.looping
    }

    /// Starts a transition to the next page. Refused on the last page
    /// unless the swiper loops.
    pub fn show_next(&mut self) -> bool {
        if self.total_count == 0 {
            return false;
        }
        if self.current_index + 1 >= self.total_count && !self.looping {
            log::warn!("already on the last page, can't show next");
            return false;
        }
        self.target_index = Some((self.current_index + 1) % self.total_count);
        true
    }

    /// Starts a transition to the previous page. Refused on the first page
    /// unless the swiper loops.
    pub fn show_previous(&mut self) -> bool {
        if self.total_count == 0 {
            return false;
        }
        if self.current_index == 0 && !self.looping {
            log::warn!("already on the first page, can't show previous");
            return false;
        }
        self.target_index = Some((self.current_index + self.total_count - 1) % self.total_count);
        true
    }

    /// Starts a transition to `index`. Pages more than one away are shown
    /// next to the current page and nothing in between.
    pub fn swipe_to(&mut self, index: usize) -> bool {
        if index >= self.total_count {
            log::warn!("can't swipe to page {index} of {}", self.total_count);
            return false;
        }
        self.target_index = (index != self.current_index).then_some(index);
        self.target_index.is_some()
    }

    /// Commits the running transition: the target becomes the current page
    /// and the offset returns to zero. Returns whether the page changed.
    pub fn finish_animation(&mut self) -> bool {
        self.current_offset = 0.0;
        match self.target_index.take() {
            Some(target) if target != self.current_index => {
                log::debug!("swiper moves from page {} to page {target}", self.current_index);
                self.current_index = target;
                true
            }
            _ => false,
        }
    }

    /// Pans the pages by `delta` along the swiper's axis.
    pub fn update_current_offset(&mut self, delta: f32) {
        self.current_offset += delta;
    }

    fn is_out_of_boundary(&self, offset: f32) -> bool {
        if self.looping || self.total_count == 0 {
            return false;
        }
        let out_of_start = self.current_index == 0 && greater_not_equal(offset, 0.0);
        let out_of_end =
            self.current_index + 1 == self.total_count && less_not_equal(offset, 0.0);
        out_of_start || out_of_end
    }
}

impl Pattern for SwiperPattern {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::with_container(SwiperLayoutProperty::default())
    }

    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        let mut algorithm =
            SwiperLayoutAlgorithm::new(self.current_index, self.target_index, self.current_offset);
        algorithm.set_page_metrics(self.total_count, self.item_main_size);
        if let Some(index) = self.pending_index {
            algorithm.set_pending_index(index);
        }
        Box::new(algorithm)
    }

    fn is_atomic_node(&self) -> bool {
        false
    }

    fn on_modify_done(&mut self, layout_property: &LayoutProperty) {
        let Some(swiper) = layout_property.typed::<SwiperLayoutProperty>() else {
            return;
        };
        self.looping = swiper.looping().unwrap_or(false);
        let index = swiper.index();
        if index != self.applied_index {
            self.applied_index = index;
            self.pending_index = index;
        }
    }

    fn on_dirty_layout_wrapper_swap(
        &mut self,
        algorithm: &dyn LayoutAlgorithm,
        config: &DirtySwapConfig,
    ) -> bool {
        if config.skip_measure && config.skip_layout {
            return false;
        }
        let Some(swiper) = algorithm.downcast_ref::<SwiperLayoutAlgorithm>() else {
            return false;
        };
        if !config.skip_measure {
            self.current_index = swiper.current_index();
            self.target_index = swiper.target_index();
            self.current_offset = swiper.current_offset();
            self.total_count = swiper.total_count();
            self.item_main_size = swiper.item_main_size();
            self.looping = swiper.looping();
            self.pending_index = None;
        }
        false
    }
}

impl Scrollable for SwiperPattern {
    const SCROLL_DIRTY_FLAG: PropertyChangeFlag = PropertyChangeFlag::REQUEST_NEW_CHILD_NODE;

    /// A drag pans the pages. Without looping, a drag pulling the first page
    /// down or the last page up is rejected.
    fn update_scroll_position(&mut self, offset: f32, source: ScrollSource) -> bool {
        if source == ScrollSource::Start {
            if positive(self.item_main_size) {
                self.current_offset %= self.item_main_size;
            }
            return true;
        }
        if self.is_out_of_boundary(self.current_offset + offset) {
            return false;
        }
        self.update_current_offset(offset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(total_count: usize, looping: bool) -> SwiperPattern {
        SwiperPattern {
            total_count,
            looping,
            item_main_size: 720.0,
            ..SwiperPattern::default()
        }
    }

    #[test]
    fn show_next_stops_on_the_last_page_unless_looping() {
        let mut swiper = pattern(3, false);
        swiper.current_index = 2;
        assert!(!swiper.show_next());
        assert_eq!(swiper.target_index(), None);

        let mut looping = pattern(3, true);
        looping.current_index = 2;
        assert!(looping.show_next());
        assert_eq!(looping.target_index(), Some(0));
    }

    #[test]
    fn show_previous_wraps_to_the_last_page_when_looping() {
        assert!(!pattern(3, false).show_previous());
        let mut looping = pattern(3, true);
        assert!(looping.show_previous());
        assert!(looping.finish_animation());
        assert_eq!(looping.current_index(), 2);
    }

    #[test]
    fn finishing_commits_the_target_and_resets_the_offset() {
        let mut swiper = pattern(5, false);
        assert!(swiper.swipe_to(3));
        swiper.update_current_offset(-200.0);
        assert!(swiper.finish_animation());
        assert_eq!(swiper.current_index(), 3);
        assert_eq!(swiper.current_offset(), 0.0);
        assert!(!swiper.finish_animation());
    }

    #[test]
    fn swipe_to_rejects_missing_pages() {
        let mut swiper = pattern(2, false);
        assert!(!swiper.swipe_to(2));
        assert!(!swiper.swipe_to(0));
    }

    #[test]
    fn drags_past_the_edges_are_rejected_without_looping() {
        let mut swiper = pattern(3, false);
        assert!(!swiper.update_scroll_position(30.0, ScrollSource::Update));
        assert!(swiper.update_scroll_position(-30.0, ScrollSource::Update));
        assert_eq!(swiper.current_offset(), -30.0);

        let mut looping = pattern(3, true);
        assert!(looping.update_scroll_position(30.0, ScrollSource::Update));
    }

    #[test]
    fn drag_start_keeps_less_than_a_page_of_offset() {
        let mut swiper = pattern(3, true);
        swiper.update_current_offset(-1000.0);
        assert!(swiper.update_scroll_position(0.0, ScrollSource::Start));
        assert_eq!(swiper.current_offset(), -280.0);
    }
}
