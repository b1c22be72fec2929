//! Build-time entry points for the containers of this crate.
//!
//! Each `create` claims an id, creates (or reuses) the frame node and pushes
//! it on the build stack. Setters edit the container property of the node on
//! top of the stack and return whether the stored value changed.

use crate::grid::{GridColPattern, GridItemPattern, GridPattern, GridRowPattern};
use crate::linear::LinearPattern;
use crate::list::{ListItemPattern, ListPattern};
use crate::scroll::ScrollPattern;
use crate::swiper::{SwiperController, SwiperPattern};
use crate::tags;
use arkui_core::{NodeError, NodeId, Pattern, UiTree, ViewStackProcessor};
use arkui_ui_layout::{
    Axis, Dimension, FlexAlign, GridColLayoutProperty, GridItemLayoutProperty, GridLayoutProperty,
    LinearLayoutProperty, ListLayoutProperty, ScrollLayoutProperty, SwiperLayoutProperty,
};

fn create_frame<P: Pattern + 'static>(
    tree: &mut UiTree,
    stack: &mut ViewStackProcessor,
    tag: &str,
    make_pattern: impl FnOnce() -> P,
) -> Result<NodeId, NodeError> {
    let id = stack.claim_node_id(tree);
    tree.get_or_create_frame_node(tag, id, || Box::new(make_pattern()))?;
    stack.push(tree, id);
    Ok(id)
}

fn create_linear(
    tree: &mut UiTree,
    stack: &mut ViewStackProcessor,
    tag: &str,
    pattern: LinearPattern,
    space: Option<Dimension>,
) -> Result<NodeId, NodeError> {
    let id = create_frame(tree, stack, tag, || pattern)?;
    if let Some(space) = space {
        stack.update_layout_property::<LinearLayoutProperty>(tree, |linear| linear.update_space(space));
    }
    Ok(id)
}

pub struct RowView;

impl RowView {
    pub fn create(
        tree: &mut UiTree,
        stack: &mut ViewStackProcessor,
        space: Option<Dimension>,
    ) -> Result<NodeId, NodeError> {
        create_linear(tree, stack, tags::ROW, LinearPattern::row(), space)
    }

    pub fn set_justify_content(tree: &mut UiTree, stack: &mut ViewStackProcessor, align: FlexAlign) -> bool {
        stack.update_layout_property::<LinearLayoutProperty>(tree, |linear| linear.update_main_axis_align(align))
    }

    pub fn set_align_items(tree: &mut UiTree, stack: &mut ViewStackProcessor, align: FlexAlign) -> bool {
        stack.update_layout_property::<LinearLayoutProperty>(tree, |linear| linear.update_cross_axis_align(align))
    }
}

pub struct ColumnView;

impl ColumnView {
    pub fn create(
        tree: &mut UiTree,
        stack: &mut ViewStackProcessor,
        space: Option<Dimension>,
    ) -> Result<NodeId, NodeError> {
        create_linear(tree, stack, tags::COLUMN, LinearPattern::column(), space)
    }

    pub fn set_justify_content(tree: &mut UiTree, stack: &mut ViewStackProcessor, align: FlexAlign) -> bool {
        stack.update_layout_property::<LinearLayoutProperty>(tree, |linear| linear.update_main_axis_align(align))
    }

    pub fn set_align_items(tree: &mut UiTree, stack: &mut ViewStackProcessor, align: FlexAlign) -> bool {
        stack.update_layout_property::<LinearLayoutProperty>(tree, |linear| linear.update_cross_axis_align(align))
    }
}

pub struct ListView;

impl ListView {
    pub fn create(
        tree: &mut UiTree,
        stack: &mut ViewStackProcessor,
        initial_index: Option<usize>,
    ) -> Result<NodeId, NodeError> {
        let id = create_frame(tree, stack, tags::LIST, ListPattern::new)?;
        if let Some(index) = initial_index {
            stack.update_layout_property::<ListLayoutProperty>(tree, |list| list.update_initial_index(index));
        }
        Ok(id)
    }

    pub fn set_list_direction(tree: &mut UiTree, stack: &mut ViewStackProcessor, axis: Axis) -> bool {
        stack.update_layout_property::<ListLayoutProperty>(tree, |list| list.update_list_direction(axis))
    }

    pub fn set_space(tree: &mut UiTree, stack: &mut ViewStackProcessor, space: Dimension) -> bool {
        stack.update_layout_property::<ListLayoutProperty>(tree, |list| list.update_space(space))
    }

    pub fn set_lanes(tree: &mut UiTree, stack: &mut ViewStackProcessor, lanes: usize) -> bool {
        stack.update_layout_property::<ListLayoutProperty>(tree, |list| list.update_lanes(lanes))
    }
}

pub struct ListItemView;

impl ListItemView {
    pub fn create(tree: &mut UiTree, stack: &mut ViewStackProcessor) -> Result<NodeId, NodeError> {
        create_frame(tree, stack, tags::LIST_ITEM, || ListItemPattern)
    }
}

pub struct GridView;

impl GridView {
    pub fn create(tree: &mut UiTree, stack: &mut ViewStackProcessor) -> Result<NodeId, NodeError> {
        create_frame(tree, stack, tags::GRID, GridPattern::new)
    }

    /// Tracks separated by whitespace, e.g. `"1fr 1fr 1fr"`.
    pub fn set_columns_template(tree: &mut UiTree, stack: &mut ViewStackProcessor, template: &str) -> bool {
        let template = template.to_string();
        stack.update_layout_property::<GridLayoutProperty>(tree, |grid| grid.update_columns_template(template))
    }

    pub fn set_rows_template(tree: &mut UiTree, stack: &mut ViewStackProcessor, template: &str) -> bool {
        let template = template.to_string();
        stack.update_layout_property::<GridLayoutProperty>(tree, |grid| grid.update_rows_template(template))
    }
}

pub struct GridItemView;

impl GridItemView {
    pub fn create(tree: &mut UiTree, stack: &mut ViewStackProcessor) -> Result<NodeId, NodeError> {
        create_frame(tree, stack, tags::GRID_ITEM, || GridItemPattern)
    }

    pub fn set_column_span(tree: &mut UiTree, stack: &mut ViewStackProcessor, span: usize) -> bool {
        stack.update_layout_property::<GridItemLayoutProperty>(tree, |item| item.update_column_span(span))
    }
}

pub struct GridRowView;

impl GridRowView {
    pub fn create(
        tree: &mut UiTree,
        stack: &mut ViewStackProcessor,
        columns: usize,
        gutter: Dimension,
    ) -> Result<NodeId, NodeError> {
        create_frame(tree, stack, tags::GRID_ROW, || GridRowPattern::new(columns, gutter))
    }
}

pub struct GridColView;

impl GridColView {
    pub fn create(tree: &mut UiTree, stack: &mut ViewStackProcessor) -> Result<NodeId, NodeError> {
        create_frame(tree, stack, tags::GRID_COL, || GridColPattern)
    }

    pub fn set_span(tree: &mut UiTree, stack: &mut ViewStackProcessor, span: usize) -> bool {
        stack.update_layout_property::<GridColLayoutProperty>(tree, |col| col.update_span(span))
    }

    pub fn set_offset(tree: &mut UiTree, stack: &mut ViewStackProcessor, offset: usize) -> bool {
        stack.update_layout_property::<GridColLayoutProperty>(tree, |col| col.update_offset(offset))
    }

    pub fn set_order(tree: &mut UiTree, stack: &mut ViewStackProcessor, order: usize) -> bool {
        stack.update_layout_property::<GridColLayoutProperty>(tree, |col| col.update_order(order))
    }
}

pub struct SwiperView;

impl SwiperView {
    /// Creates the swiper and hands back the controller driving its pages.
    pub fn create(tree: &mut UiTree, stack: &mut ViewStackProcessor) -> Result<SwiperController, NodeError> {
        create_frame(tree, stack, tags::SWIPER, SwiperPattern::new).map(SwiperController::new)
    }

    pub fn set_direction(tree: &mut UiTree, stack: &mut ViewStackProcessor, axis: Axis) -> bool {
        stack.update_layout_property::<SwiperLayoutProperty>(tree, |swiper| swiper.update_direction(axis))
    }

    pub fn set_display_count(tree: &mut UiTree, stack: &mut ViewStackProcessor, count: usize) -> bool {
        stack.update_layout_property::<SwiperLayoutProperty>(tree, |swiper| swiper.update_display_count(count))
    }

    /// Page shown once the swiper is finished. Applied on the next pass if
    /// the page exists.
    pub fn set_index(tree: &mut UiTree, stack: &mut ViewStackProcessor, index: usize) -> bool {
        stack.update_layout_property::<SwiperLayoutProperty>(tree, |swiper| swiper.update_index(index))
    }

    pub fn set_loop(tree: &mut UiTree, stack: &mut ViewStackProcessor, looping: bool) -> bool {
        stack.update_layout_property::<SwiperLayoutProperty>(tree, |swiper| swiper.update_looping(looping))
    }
}

pub struct ScrollView;

impl ScrollView {
    pub fn create(tree: &mut UiTree, stack: &mut ViewStackProcessor) -> Result<NodeId, NodeError> {
        create_frame(tree, stack, tags::SCROLL, ScrollPattern::new)
    }

    pub fn set_axis(tree: &mut UiTree, stack: &mut ViewStackProcessor, axis: Axis) -> bool {
        stack.update_layout_property::<ScrollLayoutProperty>(tree, |scroll| scroll.update_axis(axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkui_testing::fixed_leaf;

    #[test]
    fn setters_reach_the_node_on_top_of_the_stack() {
        let mut tree = UiTree::new();
        let mut stack = ViewStackProcessor::new();
        let list = ListView::create(&mut tree, &mut stack, Some(4)).expect("list");
        assert!(ListView::set_lanes(&mut tree, &mut stack, 2));
        assert!(!ListView::set_lanes(&mut tree, &mut stack, 2));

        let property = tree.frame_node(list).map(|frame| frame.layout_property().clone());
        let list_property = property.as_ref().and_then(|property| property.typed::<ListLayoutProperty>());
        assert_eq!(list_property.and_then(ListLayoutProperty::lanes), Some(2));
        assert_eq!(list_property.and_then(ListLayoutProperty::initial_index), Some(4));
    }

    #[test]
    fn setters_of_another_container_are_ignored() {
        let mut tree = UiTree::new();
        let mut stack = ViewStackProcessor::new();
        ScrollView::create(&mut tree, &mut stack).expect("scroll");
        assert!(!GridView::set_columns_template(&mut tree, &mut stack, "1fr"));
        assert!(ScrollView::set_axis(&mut tree, &mut stack, Axis::Horizontal));
    }

    #[test]
    fn atomic_children_are_mounted_in_build_order() {
        let mut tree = UiTree::new();
        let mut stack = ViewStackProcessor::new();
        let row = RowView::create(&mut tree, &mut stack, None).expect("row");
        let first = fixed_leaf(&mut tree, 10.0, 10.0);
        stack.push(&mut tree, first);
        let second = fixed_leaf(&mut tree, 10.0, 10.0);
        stack.push(&mut tree, second);
        stack.pop_container(&mut tree);

        assert_eq!(stack.finish(&mut tree), Some(row));
        assert_eq!(tree.children(row), &[first, second]);
        assert_eq!(tree.node(row).map(|node| node.tag().to_string()), Some("Row".to_string()));
    }
}
