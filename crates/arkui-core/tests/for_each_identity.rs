use arkui_core::{NodeId, UiTree, ViewStackProcessor};
use arkui_testing::prelude::*;

/// Builds the ForEach `for_each` from `keys` through the view stack, the way
/// a script rerender does: keys seen before are not built again.
fn render(
    tree: &mut UiTree,
    stack: &mut ViewStackProcessor,
    root: NodeId,
    for_each: NodeId,
    keys: &[&str],
) -> usize {
    tree.get_or_create_for_each_node(for_each).expect("ForEach id");
    stack.push(tree, root);
    stack.push(tree, for_each);
    let previous = tree.for_each_node(for_each).map(|node| node.ids().to_vec()).unwrap_or_default();
    tree.create_temp_items(for_each);
    tree.set_ids(for_each, keys.iter().map(|key| key.to_string()).collect());
    let mut built = 0;
    for key in keys {
        if previous.iter().any(|old| old == key) {
            continue;
        }
        stack.create_new_child_start(tree, key).expect("item");
        let text = fixed_leaf(tree, 20.0, 20.0);
        stack.push(tree, text);
        stack.create_new_child_finish(tree);
        built += 1;
    }
    stack.pop(tree);
    stack.finish(tree);
    built
}

#[test]
fn reordered_keys_move_existing_items() {
    let mut rule = LayoutTestRule::new();
    let root = rule.root();
    let (tree, stack) = rule.parts_mut();
    let for_each = tree.make_unique_id();
    assert_eq!(render(tree, stack, root, for_each, &["a", "b", "c", "d"]), 4);
    let before = tree.children(for_each).to_vec();

    assert_eq!(render(tree, stack, root, for_each, &["d", "c", "b", "a"]), 0);
    let after = tree.children(for_each).to_vec();
    let mut reversed = before.clone();
    reversed.reverse();
    assert_eq!(after, reversed);
    assert_eq!(tree.children(root), &[for_each]);
}

#[test]
fn a_rerender_lays_out_only_the_new_shape() {
    let mut rule = LayoutTestRule::new();
    let root = rule.root();
    let for_each = {
        let (tree, stack) = rule.parts_mut();
        let for_each = tree.make_unique_id();
        render(tree, stack, root, for_each, &["a", "b"]);
        for_each
    };
    rule.pump_until_idle();
    let kept = rule.tree().children(for_each)[0];
    let kept_leaf = rule.tree().children(kept)[0];
    assert_eq!(rule.frame_size(kept_leaf).map(|s| s.width), Some(20.0));

    {
        let (tree, stack) = rule.parts_mut();
        assert_eq!(render(tree, stack, root, for_each, &["a", "x"]), 1);
    }
    assert!(rule.tree().has_dirty_layout());
    rule.pump_until_idle();
    assert_eq!(rule.tree().children(for_each)[0], kept);
    assert_eq!(rule.tree().total_child_count(root), 2);
    let fresh = rule.tree().children(for_each)[1];
    let fresh_leaf = rule.tree().children(fresh)[0];
    assert_eq!(rule.frame_size(fresh_leaf).map(|s| s.height), Some(20.0));
}
