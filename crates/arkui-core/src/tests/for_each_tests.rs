use super::*;
use crate::test_support::{leaf, rooted_container};
use crate::ElementState;

fn item(tree: &mut UiTree, key: &str) -> NodeId {
    let id = tree.make_unique_id();
    tree.create_syntax_item(id, key).expect("fresh id");
    let text = leaf(tree, 10.0, 10.0);
    tree.add_child(id, text, None);
    id
}

/// One rebuild: `keys` is the new key list, `fresh` the keys the script
/// had to build items for.
fn rebuild(tree: &mut UiTree, for_each: NodeId, keys: &[&str], fresh: &[&str]) -> Vec<NodeId> {
    tree.create_temp_items(for_each);
    tree.set_ids(for_each, keys.iter().map(|key| key.to_string()).collect());
    for key in fresh {
        let id = item(tree, key);
        tree.add_child(for_each, id, None);
    }
    tree.compare_and_update_children(for_each);
    tree.children(for_each).to_vec()
}

fn mounted_for_each(tree: &mut UiTree) -> NodeId {
    let root = rooted_container(tree);
    let id = tree.make_unique_id();
    tree.get_or_create_for_each_node(id).expect("fresh id");
    tree.add_child(root, id, None);
    id
}

#[test]
fn permutations_keep_node_identity() {
    let mut tree = UiTree::new();
    let for_each = mounted_for_each(&mut tree);
    let first = rebuild(&mut tree, for_each, &["a", "b", "c"], &["a", "b", "c"]);
    let nodes_before = tree.len();

    let second = rebuild(&mut tree, for_each, &["c", "a", "b"], &[]);
    assert_eq!(second, vec![first[2], first[0], first[1]]);
    assert_eq!(tree.len(), nodes_before);
    assert!(second.iter().all(|&id| tree.is_on_main_tree(id)));
    assert_eq!(
        tree.for_each_node(for_each).map(|node| node.ids().to_vec()),
        Some(vec!["c".to_string(), "a".to_string(), "b".to_string()])
    );
}

#[test]
fn appending_a_key_builds_exactly_one_item() {
    let mut tree = UiTree::new();
    let for_each = mounted_for_each(&mut tree);
    let first = rebuild(&mut tree, for_each, &["a", "b"], &["a", "b"]);
    let second = rebuild(&mut tree, for_each, &["a", "b", "c"], &["c"]);
    assert_eq!(&second[..2], &first[..]);
    assert_eq!(second.len(), 3);
    assert!(!first.contains(&second[2]));
    assert_eq!(tree.depth(second[2]), Some(3));
}

#[test]
fn dropped_keys_dispose_their_items() {
    let mut tree = UiTree::new();
    let for_each = mounted_for_each(&mut tree);
    let first = rebuild(&mut tree, for_each, &["a", "b", "c"], &["a", "b", "c"]);
    let dropped_leaf = tree.children(first[1])[0];

    let second = rebuild(&mut tree, for_each, &["a", "c"], &[]);
    assert_eq!(second, vec![first[0], first[2]]);
    assert!(!tree.contains(first[1]));
    assert_eq!(tree.register().state(first[1]), Some(ElementState::PendingRemoval));
    assert_eq!(tree.register().state(dropped_leaf), Some(ElementState::PendingRemoval));
}

#[test]
fn unclaimed_children_are_disposed() {
    let mut tree = UiTree::new();
    let for_each = mounted_for_each(&mut tree);
    let children = rebuild(&mut tree, for_each, &["a"], &["a", "extra"]);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.len(), 4);
}

#[test]
fn temp_ids_expose_the_previous_keys() {
    let mut tree = UiTree::new();
    let for_each = mounted_for_each(&mut tree);
    rebuild(&mut tree, for_each, &["a", "b"], &["a", "b"]);
    tree.create_temp_items(for_each);
    assert_eq!(tree.temp_ids(for_each), &["a".to_string(), "b".to_string()]);
    assert!(tree.children(for_each).is_empty());
}

#[test]
fn view_stack_items_mount_under_the_for_each() {
    let mut tree = UiTree::new();
    let mut stack = ViewStackProcessor::new();
    let root = rooted_container(&mut tree);
    let for_each = tree.make_unique_id();
    tree.get_or_create_for_each_node(for_each).expect("fresh id");

    stack.push(&mut tree, root);
    stack.push(&mut tree, for_each);
    tree.create_temp_items(for_each);
    tree.set_ids(for_each, vec!["x".into(), "y".into()]);
    for key in ["x", "y"] {
        stack.create_new_child_start(&mut tree, key).expect("item");
        assert_eq!(stack.key(), key);
        let text = leaf(&mut tree, 5.0, 5.0);
        stack.push(&mut tree, text);
        stack.create_new_child_finish(&mut tree);
    }
    stack.pop(&mut tree);

    assert_eq!(tree.children(root), &[for_each]);
    let items = tree.children(for_each).to_vec();
    assert_eq!(items.len(), 2);
    assert_eq!(tree.frame_children(root).len(), 2);
    assert_eq!(stack.stack_size(), 1);
    assert!(stack.key().is_empty());
}
