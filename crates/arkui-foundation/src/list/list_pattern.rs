use super::list_layout_algorithm::{ItemPosition, ListLayoutAlgorithm};
use crate::scrollable::{ScrollSource, Scrollable};
use arkui_core::{DirtySwapConfig, LayoutAlgorithm, Pattern};
use arkui_ui_graphics::{non_negative, non_positive, positive};
use arkui_ui_layout::{Axis, LayoutProperty, ListLayoutProperty, PropertyChangeFlag};
use std::collections::BTreeMap;

/// State a List keeps between passes.
///
/// After every pass the item positions are re-based so the viewport starts
/// at zero; `current_offset` then only holds the scroll distance not yet
/// laid out.
#[derive(Debug, Default)]
pub struct ListPattern {
    start_index: usize,
    end_index: usize,
    item_position: BTreeMap<usize, ItemPosition>,
    current_offset: f32,
    reached_start: bool,
    reached_end: bool,
    is_initialized: bool,
    jump_index: Option<usize>,
    direction: Option<Axis>,
}

impl ListPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Positions of the retained items relative to the viewport start.
    pub fn item_position(&self) -> &BTreeMap<usize, ItemPosition> {
        &self.item_position
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    pub fn reached_start(&self) -> bool {
        self.reached_start
    }

    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    /// Moves the content by a gesture delta: a positive delta reveals
    /// earlier items. The host must be marked with
    /// [`PropertyChangeFlag::REQUEST_NEW_CHILD_NODE`] afterwards.
    pub fn update_current_offset(&mut self, delta: f32) {
        self.current_offset -= delta;
    }

    /// Lays the next pass out from `index` at the viewport start.
    pub fn jump_to_index(&mut self, index: usize) {
        self.jump_index = Some(index);
    }
}

impl Pattern for ListPattern {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::with_container(ListLayoutProperty::default())
    }

    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        let mut algorithm = ListLayoutAlgorithm::new(self.start_index, self.end_index);
        let start = self
            .item_position
            .get(&self.start_index)
            .map_or(0.0, |(start, _)| *start);
        let end = self.item_position.get(&self.end_index).map(|(_, end)| *end);
        algorithm.set_pre_positions(start, end);
        algorithm.set_current_offset(self.current_offset);
        algorithm.set_is_initialized(self.is_initialized);
        if let Some(index) = self.jump_index {
            algorithm.set_jump_index(index);
        }
        Box::new(algorithm)
    }

    fn is_atomic_node(&self) -> bool {
        false
    }

    fn on_modify_done(&mut self, layout_property: &LayoutProperty) {
        let direction = layout_property
            .typed::<ListLayoutProperty>()
            .and_then(ListLayoutProperty::list_direction);
        if self.is_initialized && direction != self.direction {
            log::debug!("list direction changed; restarting from item {}", self.start_index);
            self.jump_index = Some(self.start_index);
        }
        self.direction = direction;
    }

    fn on_dirty_layout_wrapper_swap(
        &mut self,
        algorithm: &dyn LayoutAlgorithm,
        config: &DirtySwapConfig,
    ) -> bool {
        if config.skip_measure && config.skip_layout {
            return false;
        }
        let Some(list) = algorithm.downcast_ref::<ListLayoutAlgorithm>() else {
            return false;
        };
        let offset = list.current_offset();
        self.start_index = list.start_index();
        self.end_index = list.end_index();
        self.item_position = list
            .position_map()
            .iter()
            .map(|(index, (start, end))| (*index, (start - offset, end - offset)))
            .collect();
        self.current_offset = 0.0;
        self.reached_start = list.reached_start();
        self.reached_end = list.reached_end();
        self.is_initialized = list.is_initialized();
        self.jump_index = None;
        false
    }
}

impl Scrollable for ListPattern {
    const SCROLL_DIRTY_FLAG: PropertyChangeFlag = PropertyChangeFlag::REQUEST_NEW_CHILD_NODE;

    fn update_scroll_position(&mut self, offset: f32, source: ScrollSource) -> bool {
        if source == ScrollSource::Start {
            return true;
        }
        if (self.reached_end && non_positive(offset)) || (self.reached_start && non_negative(offset)) {
            return false;
        }
        if positive(offset) {
            self.reached_end = false;
        } else {
            self.reached_start = false;
        }
        self.update_current_offset(offset);
        true
    }
}

/// A list row: a box around its content.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListItemPattern;

impl Pattern for ListItemPattern {
    fn is_atomic_node(&self) -> bool {
        false
    }
}
