use super::grid_layout_algorithm::GridLayoutAlgorithm;
use super::grid_layout_info::GridLayoutInfo;
use crate::scrollable::{ScrollSource, Scrollable};
use arkui_core::{DirtySwapConfig, LayoutAlgorithm, Pattern};
use arkui_ui_layout::{GridItemLayoutProperty, GridLayoutProperty, LayoutProperty, PropertyChangeFlag};

/// A scrollable grid. Owns the line bookkeeping between passes.
#[derive(Debug, Default)]
pub struct GridPattern {
    info: GridLayoutInfo,
}

impl GridPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self) -> &GridLayoutInfo {
        &self.info
    }

    /// Lays the next pass out from `index` at the viewport start.
    pub fn jump_to_index(&mut self, index: usize) {
        self.info.restart_from(index);
    }
}

impl Pattern for GridPattern {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::with_container(GridLayoutProperty::default())
    }

    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(GridLayoutAlgorithm::new(self.info.clone()))
    }

    fn is_atomic_node(&self) -> bool {
        false
    }

    fn on_modify_done(&mut self, layout_property: &LayoutProperty) {
        if let Some(grid) = layout_property.typed::<GridLayoutProperty>() {
            self.info.configure(grid);
        }
    }

    fn on_dirty_layout_wrapper_swap(
        &mut self,
        algorithm: &dyn LayoutAlgorithm,
        config: &DirtySwapConfig,
    ) -> bool {
        if config.skip_measure {
            return false;
        }
        let Some(grid) = algorithm.downcast_ref::<GridLayoutAlgorithm>() else {
            return false;
        };
        self.info = grid.info().clone();
        true
    }
}

impl Scrollable for GridPattern {
    const SCROLL_DIRTY_FLAG: PropertyChangeFlag = PropertyChangeFlag::MEASURE;

    fn update_scroll_position(&mut self, offset: f32, source: ScrollSource) -> bool {
        self.info.update_scroll_position(offset, source)
    }
}

/// A grid cell: a box around its content that may span several tracks.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridItemPattern;

impl Pattern for GridItemPattern {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::with_container(GridItemLayoutProperty::default())
    }

    fn is_atomic_node(&self) -> bool {
        false
    }
}
