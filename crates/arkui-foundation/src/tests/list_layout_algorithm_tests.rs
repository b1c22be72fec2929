use super::*;
use crate::list::ListPattern;
use arkui_core::{NodeId, PipelineConfig};
use arkui_testing::log_capture::contains;
use arkui_testing::prelude::*;
use arkui_ui_graphics::{OffsetF, SizeF};
use log::Level;

const ITEM: f32 = 200.0;

fn list_with_items(tree: &mut UiTree, count: usize, size: SizeF) -> (NodeId, Vec<NodeId>) {
    let list = tree.make_unique_id();
    tree.create_frame_node("List", list, Box::new(ListPattern::new()))
        .expect("fresh id");
    let items = (0..count)
        .map(|_| {
            let item = fixed_leaf(tree, size.width, size.height);
            tree.add_child(list, item, None);
            item
        })
        .collect();
    (list, items)
}

fn constrained_wrapper(tree: &mut UiTree, list: NodeId, constraint: LayoutConstraintF) -> LayoutWrapper {
    let mut wrapper = tree.create_layout_wrapper(list, true, false).expect("wrapper");
    let property = wrapper.layout_property_mut();
    property.update_layout_constraint(&constraint, false);
    property.update_content_constraint();
    wrapper
}

#[test]
fn space_is_inserted_between_items() {
    for space in [0.0, 10.0, 25.0] {
        let mut tree = UiTree::new();
        let (list, _) = list_with_items(&mut tree, 10, SizeF::new(ITEM, ITEM));
        let constraint = tree.config().root_constraint();
        let mut wrapper = constrained_wrapper(&mut tree, list, constraint);
        let mut algorithm = ListLayoutAlgorithm::new(0, 0);
        algorithm.set_space_width(space);
        algorithm.measure(&mut wrapper, &mut tree);

        let positions = algorithm.position_map();
        assert!(!positions.is_empty());
        for (index, (start, end)) in positions {
            let expected = ITEM * *index as f32 + space * *index as f32;
            assert_eq!(*start, expected, "item {index} with space {space}");
            assert_eq!(*end, expected + ITEM);
        }
        assert_eq!(algorithm.start_index(), 0);
    }
}

#[test]
fn window_covers_viewport_and_cache_band() {
    let mut tree = UiTree::new();
    let (list, items) = list_with_items(&mut tree, 50, SizeF::new(ITEM, 100.0));
    let constraint = tree.config().root_constraint();
    let mut wrapper = constrained_wrapper(&mut tree, list, constraint);
    let mut algorithm = ListLayoutAlgorithm::new(0, 0);
    algorithm.measure(&mut wrapper, &mut tree);

    // 1280 of viewport plus 128 of cache band below it.
    assert_eq!(algorithm.start_index(), 0);
    assert_eq!(algorithm.end_index(), 14);
    assert_eq!(
        algorithm.position_map().keys().copied().collect::<Vec<_>>(),
        (0..=14).collect::<Vec<_>>()
    );
    assert!(algorithm.reached_start());
    assert!(!algorithm.reached_end());
    assert_eq!(wrapper.geometry_node().frame_size(), SizeF::new(720.0, 1280.0));

    wrapper.swap_dirty_layout_wrapper(&mut tree);
    let active: Vec<bool> = items
        .iter()
        .map(|item| tree.frame_node(*item).map_or(false, |frame| frame.is_active()))
        .collect();
    assert!(active[..15].iter().all(|active| *active));
    assert!(active[15..].iter().all(|active| !*active));
}

#[test]
fn forward_offset_drops_rows_above_the_band() {
    let mut tree = UiTree::new();
    let (list, _) = list_with_items(&mut tree, 50, SizeF::new(ITEM, 100.0));
    let constraint = tree.config().root_constraint();
    let mut wrapper = constrained_wrapper(&mut tree, list, constraint);
    let mut algorithm = ListLayoutAlgorithm::new(0, 14);
    algorithm.set_current_offset(500.0);
    algorithm.measure(&mut wrapper, &mut tree);

    assert_eq!(algorithm.start_index(), 3);
    assert_eq!(algorithm.end_index(), 19);
    assert_eq!(algorithm.current_offset(), 500.0);
}

#[test]
fn backward_offset_walks_up_from_the_previous_end() {
    let mut tree = UiTree::new();
    let (list, _) = list_with_items(&mut tree, 50, SizeF::new(ITEM, 100.0));
    let constraint = tree.config().root_constraint();
    let mut wrapper = constrained_wrapper(&mut tree, list, constraint);
    // Previous window: items 3..=19 with item 5 at the viewport start.
    let mut algorithm = ListLayoutAlgorithm::new(3, 19);
    algorithm.set_pre_positions(-200.0, Some(1500.0));
    algorithm.set_current_offset(-200.0);
    algorithm.measure(&mut wrapper, &mut tree);

    assert_eq!(algorithm.start_index(), 1);
    assert_eq!(algorithm.end_index(), 17);
    assert_eq!(algorithm.position_map().get(&3), Some(&(-200.0, -100.0)));
}

#[test]
fn overscroll_at_the_top_snaps_back_to_the_first_item() {
    let mut tree = UiTree::new();
    let (list, _) = list_with_items(&mut tree, 50, SizeF::new(ITEM, 100.0));
    let constraint = tree.config().root_constraint();
    let mut wrapper = constrained_wrapper(&mut tree, list, constraint);
    let mut algorithm = ListLayoutAlgorithm::new(0, 14);
    algorithm.set_pre_positions(0.0, Some(1500.0));
    algorithm.set_current_offset(-300.0);
    algorithm.measure(&mut wrapper, &mut tree);

    assert_eq!(algorithm.current_offset(), 0.0);
    assert_eq!(algorithm.start_index(), 0);
    assert!(algorithm.reached_start());
}

#[test]
fn short_content_is_shown_from_the_start() {
    let mut tree = UiTree::new();
    let (list, _) = list_with_items(&mut tree, 4, SizeF::new(ITEM, 100.0));
    let constraint = tree.config().root_constraint();
    let mut wrapper = constrained_wrapper(&mut tree, list, constraint);
    let mut algorithm = ListLayoutAlgorithm::new(0, 3);
    algorithm.set_current_offset(250.0);
    algorithm.measure(&mut wrapper, &mut tree);

    assert_eq!(algorithm.current_offset(), 0.0);
    assert_eq!(algorithm.position_map().len(), 4);
    assert!(algorithm.reached_start());
    assert!(algorithm.reached_end());
}

#[test]
fn lanes_share_rows_and_split_the_cross_axis() {
    let mut tree = UiTree::new();
    let (list, items) = list_with_items(&mut tree, 10, SizeF::new(100.0, 100.0));
    let constraint = LayoutConstraintF::tight(SizeF::new(300.0, 1280.0));
    let mut wrapper = constrained_wrapper(&mut tree, list, constraint);
    let mut algorithm = ListLayoutAlgorithm::new(0, 0);
    algorithm.set_lanes(3);
    algorithm.measure(&mut wrapper, &mut tree);
    algorithm.layout(&mut wrapper, &mut tree);

    assert_eq!(algorithm.position_map().get(&4), Some(&(100.0, 200.0)));
    assert_eq!(algorithm.position_map().get(&9), Some(&(300.0, 400.0)));
    wrapper.swap_dirty_layout_wrapper(&mut tree);
    let offset = |id: NodeId| tree.frame_node(id).map(|frame| frame.geometry_node().frame_offset());
    assert_eq!(offset(items[4]), Some(OffsetF::new(100.0, 100.0)));
    assert_eq!(offset(items[9]), Some(OffsetF::new(0.0, 300.0)));
}

#[test]
fn jump_index_starts_the_window_at_that_item() {
    let mut tree = UiTree::with_config(PipelineConfig {
        list_cache_ratio: 0.0,
        ..PipelineConfig::default()
    });
    let (list, _) = list_with_items(&mut tree, 50, SizeF::new(ITEM, 100.0));
    let constraint = tree.config().root_constraint();
    let mut wrapper = constrained_wrapper(&mut tree, list, constraint);
    let mut algorithm = ListLayoutAlgorithm::new(0, 0);
    algorithm.set_jump_index(20);
    algorithm.measure(&mut wrapper, &mut tree);

    assert_eq!(algorithm.start_index(), 20);
    assert_eq!(algorithm.end_index(), 32);
    assert_eq!(algorithm.position_map().get(&20), Some(&(0.0, 100.0)));
}

#[test]
fn unbounded_main_axis_is_reported() {
    let mut tree = UiTree::new();
    let (list, _) = list_with_items(&mut tree, 3, SizeF::new(ITEM, ITEM));
    let constraint = LayoutConstraintF {
        max_size: SizeF::new(720.0, f32::INFINITY),
        ..LayoutConstraintF::default()
    };
    let mut wrapper = constrained_wrapper(&mut tree, list, constraint);
    let mut algorithm = ListLayoutAlgorithm::new(0, 0);
    let (_, records) = capture_logs(|| algorithm.measure(&mut wrapper, &mut tree));

    assert!(contains(&records, Level::Error, "unbounded main axis"));
    assert!(algorithm.position_map().is_empty());
    assert_eq!(wrapper.geometry_node().frame_size(), SizeF::ZERO);
}
