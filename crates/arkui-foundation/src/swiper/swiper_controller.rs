use super::swiper_pattern::SwiperPattern;
use crate::scrollable::update_pattern;
use arkui_core::{NodeError, NodeId, UiTree};
use arkui_ui_layout::PropertyChangeFlag;

/// Drives the page transitions of one Swiper node from outside.
///
/// Accepted requests queue the swiper for the next layout pass; refused
/// ones leave the tree untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwiperController {
    host: NodeId,
}

impl SwiperController {
    pub fn new(host: NodeId) -> Self {
        Self { host }
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn show_next(&self, tree: &mut UiTree) -> Result<bool, NodeError> {
        self.request(tree, SwiperPattern::show_next)
    }

    pub fn show_previous(&self, tree: &mut UiTree) -> Result<bool, NodeError> {
        self.request(tree, SwiperPattern::show_previous)
    }

    pub fn swipe_to(&self, tree: &mut UiTree, index: usize) -> Result<bool, NodeError> {
        self.request(tree, |pattern| pattern.swipe_to(index))
    }

    /// Feeds one animation frame.
    pub fn update_current_offset(&self, tree: &mut UiTree, delta: f32) -> Result<(), NodeError> {
        update_pattern::<SwiperPattern, _>(
            tree,
            self.host,
            PropertyChangeFlag::REQUEST_NEW_CHILD_NODE,
            |pattern| pattern.update_current_offset(delta),
        )
    }

    /// Ends the running transition. Returns whether the current page changed.
    pub fn finish_animation(&self, tree: &mut UiTree) -> Result<bool, NodeError> {
        update_pattern::<SwiperPattern, _>(
            tree,
            self.host,
            PropertyChangeFlag::REQUEST_NEW_CHILD_NODE,
            SwiperPattern::finish_animation,
        )
    }

    pub fn current_index(&self, tree: &UiTree) -> Result<usize, NodeError> {
        tree.with_pattern::<SwiperPattern, _>(self.host, |pattern| pattern.current_index())
    }

    fn request(
        &self,
        tree: &mut UiTree,
        f: impl FnOnce(&mut SwiperPattern) -> bool,
    ) -> Result<bool, NodeError> {
        let accepted = tree.with_pattern_mut::<SwiperPattern, _>(self.host, f)?;
        if accepted {
            tree.mark_dirty_node(self.host, PropertyChangeFlag::REQUEST_NEW_CHILD_NODE);
        }
        Ok(accepted)
    }
}
