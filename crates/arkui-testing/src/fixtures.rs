//! Patterns and data sources with fixed, predictable geometry.

use arkui_core::{BoxLayoutAlgorithm, LayoutAlgorithm, LayoutWrapper, LazyForEachSource, NodeId, Pattern, UiTree};
use arkui_ui_graphics::SizeF;
use arkui_ui_layout::{LayoutConstraintF, LayoutProperty};
use std::cell::Cell;
use std::rc::Rc;

/// An atomic node whose content always measures to `size`.
#[derive(Clone, Copy, Debug)]
pub struct FixedSizePattern {
    pub size: SizeF,
}

struct FixedSizeAlgorithm {
    size: SizeF,
}

impl LayoutAlgorithm for FixedSizeAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        BoxLayoutAlgorithm.measure(wrapper, tree);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        BoxLayoutAlgorithm.layout(wrapper, tree);
    }

    fn measure_content(&mut self, _: &LayoutConstraintF, _: &LayoutWrapper) -> Option<SizeF> {
        Some(self.size)
    }
}

impl Pattern for FixedSizePattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(FixedSizeAlgorithm { size: self.size })
    }
}

/// A non-atomic box container, optionally with a container property.
#[derive(Default)]
pub struct StackPattern {
    property: Option<fn() -> LayoutProperty>,
}

impl StackPattern {
    pub fn with_property(property: fn() -> LayoutProperty) -> Self {
        Self {
            property: Some(property),
        }
    }
}

impl Pattern for StackPattern {
    fn create_layout_property(&self) -> LayoutProperty {
        self.property.map_or_else(LayoutProperty::new, |make| make())
    }

    fn is_atomic_node(&self) -> bool {
        false
    }
}

pub fn fixed_leaf(tree: &mut UiTree, width: f32, height: f32) -> NodeId {
    let id = tree.make_unique_id();
    if let Err(err) = tree.create_frame_node(
        "Fixed",
        id,
        Box::new(FixedSizePattern {
            size: SizeF::new(width, height),
        }),
    ) {
        panic!("fixture node {id} could not be created: {err}");
    }
    id
}

pub fn stack(tree: &mut UiTree) -> NodeId {
    let id = tree.make_unique_id();
    if let Err(err) = tree.create_frame_node("Stack", id, Box::new(StackPattern::default())) {
        panic!("fixture node {id} could not be created: {err}");
    }
    id
}

/// A stack attached as the root of `tree`.
pub fn root_stack(tree: &mut UiTree) -> NodeId {
    let id = stack(tree);
    if let Err(err) = tree.set_root(id) {
        panic!("fixture root {id} could not be set: {err}");
    }
    id
}

/// `count` fixed-size items keyed `item{index}`. Every build is counted.
pub struct FixedSource {
    pub count: usize,
    pub item_size: SizeF,
    pub builds: Rc<Cell<usize>>,
}

impl FixedSource {
    pub fn new(count: usize, item_size: SizeF) -> Self {
        Self {
            count,
            item_size,
            builds: Rc::new(Cell::new(0)),
        }
    }
}

impl LazyForEachSource for FixedSource {
    fn total_count(&self) -> usize {
        self.count
    }

    fn build_item(&mut self, tree: &mut UiTree, index: usize) -> Option<(String, NodeId)> {
        self.builds.set(self.builds.get() + 1);
        let id = fixed_leaf(tree, self.item_size.width, self.item_size.height);
        Some((format!("item{index}"), id))
    }
}
