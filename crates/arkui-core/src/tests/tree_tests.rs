use super::*;
use crate::test_support::{container, leaf, recording, rooted_container, HookLog};
use crate::ElementState;

fn assert_depths(tree: &UiTree, id: NodeId) {
    let depth = tree.depth(id).expect("node exists");
    for &child in tree.children(id) {
        assert_eq!(tree.depth(child), Some(depth + 1), "child {child} of {id}");
        assert_eq!(tree.parent(child), Some(id));
        assert_depths(tree, child);
    }
}

#[test]
fn add_child_links_parent_depth_and_main_tree() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let column = container(&mut tree);
    let text = leaf(&mut tree, 10.0, 10.0);
    tree.add_child(column, text, None);
    assert!(!tree.is_on_main_tree(text));

    tree.add_child(root, column, None);
    assert_eq!(tree.depth(root), Some(1));
    assert_eq!(tree.depth(column), Some(2));
    assert_eq!(tree.depth(text), Some(3));
    assert!(tree.is_on_main_tree(column));
    assert!(tree.is_on_main_tree(text));
    assert_depths(&tree, root);
}

#[test]
fn duplicate_and_missing_children_are_ignored() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let child = leaf(&mut tree, 1.0, 1.0);
    tree.add_child(root, child, None);
    tree.add_child(root, child, None);
    tree.add_child(root, 9_999, None);
    assert_eq!(tree.children(root), &[child]);
    assert!(!tree.remove_child(root, 9_999));
}

#[test]
fn slots_insert_in_place_and_clamp() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let a = leaf(&mut tree, 1.0, 1.0);
    let b = leaf(&mut tree, 1.0, 1.0);
    let c = leaf(&mut tree, 1.0, 1.0);
    let d = leaf(&mut tree, 1.0, 1.0);
    tree.add_child(root, a, None);
    tree.add_child(root, b, None);
    tree.add_child(root, c, Some(0));
    tree.add_child(root, d, Some(99));
    assert_eq!(tree.children(root), &[c, a, b, d]);
}

#[test]
fn remove_child_detaches_but_keeps_the_node() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let column = container(&mut tree);
    let text = leaf(&mut tree, 1.0, 1.0);
    tree.add_child(column, text, None);
    tree.add_child(root, column, None);

    assert!(tree.remove_child(root, column));
    assert!(tree.contains(column));
    assert_eq!(tree.parent(column), None);
    assert!(!tree.is_on_main_tree(column));
    assert!(!tree.is_on_main_tree(text));
    assert!(tree.register().exists(column));
}

#[test]
fn attach_is_idempotent_and_ordered() {
    let mut tree = UiTree::new();
    let log = HookLog::default();
    let parent = recording(&mut tree, &log);
    let child = recording(&mut tree, &log);
    tree.add_child(parent, child, None);

    tree.attach_to_main_tree(parent);
    tree.attach_to_main_tree(parent);
    assert_eq!(&*log.borrow(), &[(parent, "attach"), (child, "attach")]);

    log.borrow_mut().clear();
    tree.detach_from_main_tree(parent);
    tree.detach_from_main_tree(parent);
    assert_eq!(&*log.borrow(), &[(child, "detach"), (parent, "detach")]);
}

#[test]
fn move_position_keeps_attach_state() {
    let mut tree = UiTree::new();
    let log = HookLog::default();
    let root = rooted_container(&mut tree);
    let a = recording(&mut tree, &log);
    let b = recording(&mut tree, &log);
    tree.add_child(root, a, None);
    tree.add_child(root, b, None);
    log.borrow_mut().clear();

    tree.move_position(b, 0);
    assert_eq!(tree.children(root), &[b, a]);
    assert!(tree.is_on_main_tree(b));
    assert!(log.borrow().is_empty());
}

#[test]
fn dispose_moves_the_subtree_to_pending_removal() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let column = container(&mut tree);
    let text = leaf(&mut tree, 1.0, 1.0);
    tree.add_child(column, text, None);
    tree.add_child(root, column, None);

    tree.dispose_node(column);
    assert!(!tree.contains(column));
    assert!(!tree.contains(text));
    assert!(tree.children(root).is_empty());
    assert_eq!(tree.register().state(column), Some(ElementState::PendingRemoval));
    assert_eq!(tree.register().state(text), Some(ElementState::PendingRemoval));
    assert!(tree.register().removed_elements().contains(&text));
}

#[test]
fn mount_to_parent_without_parent_heads_a_subtree() {
    let mut tree = UiTree::new();
    let column = container(&mut tree);
    let text = leaf(&mut tree, 1.0, 1.0);
    tree.add_child(column, text, None);
    tree.mount_to_parent(column, None, None).expect("node exists");
    assert_eq!(tree.depth(column), Some(1));
    assert_eq!(tree.depth(text), Some(2));
    assert_eq!(
        tree.mount_to_parent(text, Some(4_242), None),
        Err(NodeError::Missing { id: 4_242 })
    );
}

#[test]
fn depth_follows_every_reparenting() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let outer = container(&mut tree);
    let inner = container(&mut tree);
    let text = leaf(&mut tree, 1.0, 1.0);
    tree.add_child(inner, text, None);
    tree.add_child(outer, inner, None);
    tree.mount_to_parent(outer, Some(root), None).expect("mounted");
    assert_depths(&tree, root);

    tree.remove_child(outer, inner);
    tree.add_child(root, inner, Some(0));
    assert_eq!(tree.depth(text), Some(3));
    assert_depths(&tree, root);
}

#[test]
fn syntax_nodes_are_flattened_in_frame_counts() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let for_each = tree.make_unique_id();
    tree.get_or_create_for_each_node(for_each).expect("fresh id");
    for key in ["a", "b"] {
        let item = tree.make_unique_id();
        tree.create_syntax_item(item, key).expect("fresh id");
        let text = leaf(&mut tree, 1.0, 1.0);
        tree.add_child(item, text, None);
        tree.add_child(for_each, item, None);
    }
    let text = leaf(&mut tree, 1.0, 1.0);
    tree.add_child(root, for_each, None);
    tree.add_child(root, text, None);
    assert_eq!(tree.frame_count(for_each), 2);
    assert_eq!(tree.total_child_count(root), 3);
    assert_eq!(tree.frame_children(root).len(), 3);
}

#[test]
fn dump_lists_every_node_without_changing_the_tree() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let text = leaf(&mut tree, 1.0, 1.0);
    tree.add_child(root, text, None);
    let before = tree.len();
    let dump = tree.dump_tree(root);
    assert_eq!(tree.len(), before);
    assert!(dump.contains("Container"));
    assert!(dump.contains(&format!("Leaf #{text} depth=2")));
    assert!(tree.dump_tree(12_345).contains("missing"));
}

#[test]
fn a_size_change_queues_the_nearest_unfixed_ancestor() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let column = container(&mut tree);
    let text = leaf(&mut tree, 1.0, 1.0);
    tree.add_child(column, text, None);
    tree.add_child(root, column, None);
    tree.flush_layout();
    assert!(!tree.has_dirty_layout());

    tree.mark_dirty_node(text, PropertyChangeFlag::MEASURE);
    assert_eq!(tree.dirty_layout_nodes().collect::<Vec<_>>(), vec![root]);
    let column_flag = tree
        .frame_node(column)
        .map(|frame| frame.layout_property().property_change_flag())
        .unwrap_or_default();
    assert!(column_flag.contains(PropertyChangeFlag::BY_CHILD_REQUEST));
}

#[test]
fn a_layout_only_change_queues_the_node_itself() {
    let mut tree = UiTree::new();
    let root = rooted_container(&mut tree);
    let column = container(&mut tree);
    tree.add_child(root, column, None);
    tree.flush_layout();

    tree.mark_dirty_node(column, PropertyChangeFlag::LAYOUT);
    assert_eq!(tree.dirty_layout_nodes().collect::<Vec<_>>(), vec![column]);
}
