use arkui_core::{
    ElementState, LayoutAlgorithm, LayoutWrapper, LazyForEachBuilder, NodeId, Pattern, UiTree,
};
use arkui_testing::log_capture::contains;
use arkui_testing::prelude::*;
use arkui_ui_graphics::{OffsetF, SizeF};
use log::Level;
use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;

/// Lays out only the children in `window`, stacked vertically.
struct WindowPattern {
    window: Rc<Cell<(usize, usize)>>,
}

struct WindowAlgorithm {
    window: Range<usize>,
}

impl LayoutAlgorithm for WindowAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let constraint = wrapper.layout_property().create_child_constraint();
        wrapper.remove_all_children_in_render_tree();
        for index in self.window.clone() {
            if let Some(child) = wrapper.get_or_create_child_by_index(index, tree, true) {
                child.measure(tree, Some(constraint));
            }
        }
        wrapper.geometry_node_mut().set_frame_size(SizeF::new(200.0, 400.0));
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let global = wrapper.global_offset();
        let mut y = 0.0;
        for index in self.window.clone() {
            if let Some(child) = wrapper.get_or_create_child_by_index(index, tree, true) {
                child.geometry_node_mut().set_frame_offset(OffsetF::new(0.0, y));
                y += child.geometry_node().frame_size().height;
                child.layout(tree, global);
            }
        }
    }
}

impl Pattern for WindowPattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        let (start, end) = self.window.get();
        Box::new(WindowAlgorithm { window: start..end })
    }

    fn is_atomic_node(&self) -> bool {
        false
    }
}

struct Scene {
    rule: LayoutTestRule,
    list: NodeId,
    lazy: NodeId,
    window: Rc<Cell<(usize, usize)>>,
    builds: Rc<Cell<usize>>,
}

fn scene(count: usize, window: (usize, usize)) -> Scene {
    let mut rule = LayoutTestRule::new();
    let window = Rc::new(Cell::new(window));
    let source = FixedSource::new(count, SizeF::new(200.0, 50.0));
    let builds = Rc::clone(&source.builds);
    let tree = rule.tree_mut();
    let list = tree.make_unique_id();
    tree.create_frame_node(
        "Window",
        list,
        Box::new(WindowPattern {
            window: Rc::clone(&window),
        }),
    )
    .expect("fresh id");
    let lazy = tree.make_unique_id();
    tree.get_or_create_lazy_for_each_node(lazy, LazyForEachBuilder::shared(Box::new(source)))
        .expect("fresh id");
    tree.add_child(list, lazy, None);
    rule.mount(list);
    Scene {
        rule,
        list,
        lazy,
        window,
        builds,
    }
}

fn cached_indices(tree: &UiTree, lazy: NodeId) -> Vec<usize> {
    tree.lazy_for_each_builder(lazy)
        .map(|builder| builder.borrow().cached_items().keys().copied().collect())
        .unwrap_or_default()
}

#[test]
fn only_the_window_is_built() {
    let Scene {
        mut rule,
        lazy,
        builds,
        ..
    } = scene(1000, (0, 8));
    rule.pump_until_idle();
    assert_eq!(builds.get(), 8);
    assert_eq!(cached_indices(rule.tree(), lazy), (0..8).collect::<Vec<_>>());
    assert_eq!(rule.tree().frame_count(lazy), 1000);
    assert_eq!(rule.tree().children(lazy).len(), 8);

    let third = rule.tree().children(lazy)[2];
    assert_eq!(rule.frame_rect(third).map(|rect| rect.top()), Some(100.0));
}

#[test]
fn moving_the_window_evicts_and_reuses() {
    let Scene {
        mut rule,
        list,
        lazy,
        window,
        builds,
    } = scene(100, (0, 6));
    rule.pump_until_idle();
    let evicted = rule.tree().children(lazy)[0];
    let kept = rule.tree().children(lazy)[4];

    window.set((4, 10));
    rule.tree_mut()
        .update_layout_property(list, |property| {
            property.update_property_change_flag(arkui_ui_layout::PropertyChangeFlag::MEASURE)
        })
        .expect("frame");
    rule.pump_until_idle();

    assert_eq!(builds.get(), 10);
    assert_eq!(cached_indices(rule.tree(), lazy), (4..10).collect::<Vec<_>>());
    assert_eq!(rule.tree().children(lazy)[0], kept);
    assert_eq!(rule.frame_rect(kept).map(|rect| rect.top()), Some(0.0));
    assert_eq!(
        rule.tree().register().state(evicted),
        Some(ElementState::PendingRemoval)
    );
}

#[test]
fn requests_past_the_end_are_logged() {
    let Scene { mut rule, .. } = scene(3, (0, 5));
    let (_, records) = capture_logs(|| rule.pump_until_idle());
    assert!(contains(&records, Level::Warn, "out of range"));
    assert_eq!(rule.tree().len(), 2 + 1 + 3);
}
