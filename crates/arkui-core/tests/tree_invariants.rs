use arkui_core::{ElementState, NodeId, UiTree};
use arkui_testing::log_capture::contains;
use arkui_testing::prelude::*;
use log::Level;

fn assert_depth_invariant(tree: &UiTree, id: NodeId) {
    let depth = tree.depth(id).unwrap_or_default();
    for &child in tree.children(id) {
        assert_eq!(tree.depth(child), Some(depth + 1));
        assert_depth_invariant(tree, child);
    }
}

#[test]
fn depth_holds_across_nested_moves() {
    let mut rule = LayoutTestRule::new();
    let outer = stack(rule.tree_mut());
    let middle = stack(rule.tree_mut());
    let inner = stack(rule.tree_mut());
    let text = fixed_leaf(rule.tree_mut(), 10.0, 10.0);
    let tree = rule.tree_mut();
    tree.add_child(inner, text, None);
    tree.add_child(middle, inner, None);
    tree.add_child(outer, middle, None);
    rule.mount(outer);
    assert_depth_invariant(rule.tree(), rule.root());
    assert_eq!(rule.tree().depth(text), Some(5));

    let root = rule.root();
    let tree = rule.tree_mut();
    tree.remove_child(middle, inner);
    tree.add_child(root, inner, Some(0));
    assert_depth_invariant(rule.tree(), root);
    assert_eq!(rule.tree().depth(text), Some(3));
}

#[test]
fn attaching_twice_changes_nothing() {
    let mut rule = LayoutTestRule::new();
    let child = stack(rule.tree_mut());
    rule.mount(child);
    let root = rule.root();
    let before = rule.dump_tree();
    rule.tree_mut().attach_to_main_tree(root);
    rule.tree_mut().attach_to_main_tree(child);
    assert_eq!(rule.dump_tree(), before);
    assert!(rule.tree().is_on_main_tree(child));
}

#[test]
fn duplicate_adds_are_logged_and_ignored() {
    let mut rule = LayoutTestRule::new();
    let child = fixed_leaf(rule.tree_mut(), 1.0, 1.0);
    rule.mount(child);
    let root = rule.root();
    let (_, records) = capture_logs(|| rule.tree_mut().add_child(root, child, None));
    assert!(contains(&records, Level::Warn, "already a child"));
    assert_eq!(rule.tree().children(root), &[child]);
}

#[test]
fn dump_does_not_touch_the_tree() {
    let mut rule = LayoutTestRule::new();
    let child = fixed_leaf(rule.tree_mut(), 30.0, 40.0);
    rule.mount(child);
    rule.pump_until_idle();
    let nodes = rule.tree().len();
    let dump = rule.dump_tree();
    assert!(dump.contains("Stack"));
    assert!(dump.contains("Fixed"));
    assert!(dump.contains("30.0 x 40.0"));
    assert_eq!(rule.tree().len(), nodes);
    assert!(!rule.tree().has_dirty_layout());
}

#[test]
fn disposal_reports_every_removed_id_once() {
    let mut rule = LayoutTestRule::new();
    let parent = stack(rule.tree_mut());
    let a = fixed_leaf(rule.tree_mut(), 1.0, 1.0);
    let b = fixed_leaf(rule.tree_mut(), 1.0, 1.0);
    rule.tree_mut().add_child(parent, a, None);
    rule.tree_mut().add_child(parent, b, None);
    rule.mount(parent);

    rule.tree_mut().dispose_node(parent);
    let removed: Vec<NodeId> = rule.tree().register().removed_elements().iter().copied().collect();
    let mut expected = vec![parent, a, b];
    expected.sort_unstable();
    assert_eq!(removed, expected);

    for id in expected {
        assert!(rule.tree_mut().register_mut().clear_removed_element(id));
        assert_eq!(rule.tree().register().state(id), Some(ElementState::Purged));
    }
    assert!(rule.tree().register().removed_elements().is_empty());
}

#[test]
fn independent_trees_do_not_share_registers() {
    let mut first = LayoutTestRule::new();
    let mut second = LayoutTestRule::with_root_size(100.0, 100.0);
    let a = fixed_leaf(first.tree_mut(), 1.0, 1.0);
    let b = fixed_leaf(second.tree_mut(), 1.0, 1.0);
    assert_eq!(a, b);
    first.mount(a);
    second.mount(b);
    first.pump_until_idle();
    second.pump_until_idle();
    assert_eq!(first.frame_size(first.root()).map(|s| s.width), Some(720.0));
    assert_eq!(second.frame_size(second.root()).map(|s| s.width), Some(100.0));
}
