//! Patterns and builders shared by the unit tests of this crate.

use crate::layout::{BoxLayoutAlgorithm, LayoutAlgorithm, LayoutWrapper};
use crate::pattern::Pattern;
use crate::syntax::LazyForEachSource;
use crate::tree::UiTree;
use crate::NodeId;
use arkui_ui_graphics::SizeF;
use arkui_ui_layout::LayoutConstraintF;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub(crate) struct LeafPattern {
    pub size: SizeF,
}

struct LeafAlgorithm {
    size: SizeF,
}

impl LayoutAlgorithm for LeafAlgorithm {
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

impl Pattern for LeafPattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(LeafAlgorithm { size: self.size })
    }
}

pub(crate) struct ContainerPattern;

impl Pattern for ContainerPattern {
    fn is_atomic_node(&self) -> bool {
        false
    }
}

/// Records lifecycle hook calls as `(node, event)`.
pub(crate) type HookLog = Rc<RefCell<Vec<(NodeId, &'static str)>>>;

pub(crate) struct RecordingPattern {
    pub log: HookLog,
}

impl Pattern for RecordingPattern {
    fn is_atomic_node(&self) -> bool {
        false
    }

    fn on_attach_to_main_tree(&mut self, host: NodeId) {
        self.log.borrow_mut().push((host, "attach"));
    }

    fn on_detach_from_main_tree(&mut self, host: NodeId) {
        self.log.borrow_mut().push((host, "detach"));
    }
}

pub(crate) fn leaf(tree: &mut UiTree, width: f32, height: f32) -> NodeId {
    let id = tree.make_unique_id();
    tree.create_frame_node(
        "Leaf",
        id,
        Box::new(LeafPattern {
            size: SizeF::new(width, height),
        }),
    )
    .expect("fresh leaf id");
    id
}

pub(crate) fn container(tree: &mut UiTree) -> NodeId {
    let id = tree.make_unique_id();
    tree.create_frame_node("Container", id, Box::new(ContainerPattern))
        .expect("fresh container id");
    id
}

pub(crate) fn recording(tree: &mut UiTree, log: &HookLog) -> NodeId {
    let id = tree.make_unique_id();
    tree.create_frame_node(
        "Recording",
        id,
        Box::new(RecordingPattern {
            log: Rc::clone(log),
        }),
    )
    .expect("fresh id");
    id
}

pub(crate) fn rooted_container(tree: &mut UiTree) -> NodeId {
    let id = container(tree);
    tree.set_root(id).expect("root exists");
    id
}

/// Source of fixed-size leaves that counts how often it builds.
pub(crate) struct LeafSource {
    pub count: usize,
    pub size: SizeF,
    pub built: Rc<Cell<usize>>,
}

impl LazyForEachSource for LeafSource {
    fn total_count(&self) -> usize {
        self.count
    }

    fn build_item(&mut self, tree: &mut UiTree, index: usize) -> Option<(String, NodeId)> {
        self.built.set(self.built.get() + 1);
        let id = leaf(tree, self.size.width, self.size.height);
        Some((format!("item{index}"), id))
    }
}
