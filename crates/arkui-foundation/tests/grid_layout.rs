use arkui_core::{NodeId, Pattern, UiTree};
use arkui_foundation::prelude::*;
use arkui_foundation::{tags, GridColPattern, GridRowPattern};
use arkui_testing::prelude::*;
use arkui_ui_graphics::{OffsetF, SizeF};
use arkui_ui_layout::{Dimension, GridColLayoutProperty, GridItemLayoutProperty, GridLayoutProperty};

fn node(tree: &mut UiTree, tag: &str, pattern: impl Pattern) -> NodeId {
    let id = tree.make_unique_id();
    tree.create_frame_node(tag, id, Box::new(pattern))
        .expect("fresh id");
    id
}

fn grid(tree: &mut UiTree, columns: Option<&str>, rows: Option<&str>) -> NodeId {
    let grid = node(tree, tags::GRID, GridPattern::new());
    let (columns, rows) = (columns.map(str::to_string), rows.map(str::to_string));
    tree.update_layout_property(grid, |property| {
        property.update_typed::<GridLayoutProperty>(|grid| {
            let columns = columns.map_or(false, |template| grid.update_columns_template(template));
            let rows = rows.map_or(false, |template| grid.update_rows_template(template));
            columns || rows
        });
    })
    .expect("grid node");
    grid
}

fn leaves(tree: &mut UiTree, parent: NodeId, count: usize, size: SizeF) -> Vec<NodeId> {
    (0..count)
        .map(|_| {
            let leaf = fixed_leaf(tree, size.width, size.height);
            tree.add_child(parent, leaf, None);
            leaf
        })
        .collect()
}

fn offset(rule: &LayoutTestRule, id: NodeId) -> Option<OffsetF> {
    rule.frame_rect(id).map(|rect| rect.offset())
}

#[test]
fn items_are_placed_by_line_and_fraction() {
    let mut rule = LayoutTestRule::new();
    let tree = rule.tree_mut();
    let grid = grid(tree, Some("1fr 1fr 1fr"), None);
    let items = leaves(tree, grid, 12, SizeF::new(100.0, 300.0));
    rule.mount(grid);
    rule.pump_until_idle();

    assert_eq!(rule.frame_size(grid), Some(SizeF::new(720.0, 1280.0)));
    assert_eq!(offset(&rule, items[4]), Some(OffsetF::new(240.0, 300.0)));
    assert_eq!(offset(&rule, items[11]), Some(OffsetF::new(480.0, 900.0)));
    assert!(items.iter().all(|item| rule.is_active(*item)));
}

#[test]
fn spanning_items_wrap_to_the_next_line() {
    let mut rule = LayoutTestRule::new();
    let tree = rule.tree_mut();
    let grid = grid(tree, Some("1fr 1fr 1fr"), None);
    let items: Vec<NodeId> = [2, 2, 1, 1, 1, 1]
        .into_iter()
        .map(|span| {
            let item = node(tree, tags::GRID_ITEM, GridItemPattern);
            tree.update_layout_property(item, |property| {
                property.update_typed::<GridItemLayoutProperty>(|item| item.update_column_span(span));
            })
            .expect("grid item");
            leaves(tree, item, 1, SizeF::new(100.0, 100.0));
            tree.add_child(grid, item, None);
            item
        })
        .collect();
    rule.mount(grid);
    rule.pump_until_idle();

    let expected = [
        (0.0, 0.0),
        (0.0, 100.0),
        (480.0, 100.0),
        (0.0, 200.0),
        (240.0, 200.0),
        (480.0, 200.0),
    ];
    for (item, (x, y)) in items.iter().zip(expected) {
        assert_eq!(offset(&rule, *item), Some(OffsetF::new(x, y)));
    }
    let matrix = rule
        .tree()
        .with_pattern::<GridPattern, _>(grid, |pattern| pattern.info().grid_matrix().clone())
        .expect("grid pattern");
    assert_eq!(matrix[&0].get(&0), Some(&2));
    assert_eq!(matrix[&1].len(), 2);
}

#[test]
fn a_rows_template_lays_lines_out_horizontally() {
    let mut rule = LayoutTestRule::new();
    let tree = rule.tree_mut();
    let grid = grid(tree, None, Some("1fr 1fr"));
    let items = leaves(tree, grid, 10, SizeF::new(100.0, 100.0));
    rule.mount(grid);
    rule.pump_until_idle();

    assert_eq!(offset(&rule, items[0]), Some(OffsetF::new(0.0, 0.0)));
    assert_eq!(offset(&rule, items[1]), Some(OffsetF::new(0.0, 640.0)));
    assert_eq!(offset(&rule, items[3]), Some(OffsetF::new(100.0, 640.0)));
    assert_eq!(offset(&rule, items[8]), Some(OffsetF::new(400.0, 0.0)));
}

#[test]
fn scrolling_moves_lines_and_stops_at_the_top() {
    let mut rule = LayoutTestRule::new();
    let tree = rule.tree_mut();
    let grid = grid(tree, Some("1fr 1fr 1fr"), None);
    let items = leaves(tree, grid, 30, SizeF::new(100.0, 300.0));
    rule.mount(grid);
    rule.pump_until_idle();

    let pulled = scroll_by::<GridPattern>(rule.tree_mut(), grid, 100.0, ScrollSource::Update);
    assert_eq!(pulled, Ok(false));
    assert!(!rule.tree().has_dirty_layout());

    let moved = scroll_by::<GridPattern>(rule.tree_mut(), grid, -450.0, ScrollSource::Update);
    assert_eq!(moved, Ok(true));
    assert!(rule.tree().has_dirty_layout());
    rule.pump_until_idle();

    assert!(!rule.is_active(items[0]));
    assert_eq!(rule.frame_rect(items[3]).map(|rect| rect.top()), Some(-150.0));
    let start = rule
        .tree()
        .with_pattern::<GridPattern, _>(grid, |pattern| pattern.info().start_index())
        .expect("grid pattern");
    assert_eq!(start, 3);
}

#[test]
fn grid_row_places_columns_in_order_with_gutters() {
    let mut rule = LayoutTestRule::new();
    let tree = rule.tree_mut();
    let row = node(tree, tags::GRID_ROW, GridRowPattern::new(4, Dimension::px(10.0)));
    // (span, order)
    let cols: Vec<NodeId> = [(2, 1), (1, 0), (3, 0)]
        .into_iter()
        .map(|(span, order)| {
            let col = node(tree, tags::GRID_COL, GridColPattern);
            tree.update_layout_property(col, |property| {
                property.update_typed::<GridColLayoutProperty>(|col| {
                    col.update_span(span) | col.update_order(order)
                });
            })
            .expect("grid col");
            leaves(tree, col, 1, SizeF::new(50.0, 40.0));
            tree.add_child(row, col, None);
            col
        })
        .collect();
    rule.mount(row);
    rule.pump_until_idle();

    // Columns of (720 - 3 * 10) / 4 = 172.5; order puts the second col first.
    assert_eq!(offset(&rule, cols[1]), Some(OffsetF::new(0.0, 0.0)));
    assert_eq!(offset(&rule, cols[2]), Some(OffsetF::new(182.5, 0.0)));
    assert_eq!(offset(&rule, cols[0]), Some(OffsetF::new(0.0, 50.0)));
    assert_eq!(rule.frame_size(row).map(|size| size.height), Some(90.0));
}
