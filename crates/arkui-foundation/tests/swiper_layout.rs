use arkui_core::{NodeId, UiTree};
use arkui_foundation::prelude::*;
use arkui_foundation::tags;
use arkui_testing::prelude::*;
use arkui_ui_graphics::SizeF;
use arkui_ui_layout::SwiperLayoutProperty;

fn swiper(
    tree: &mut UiTree,
    pages: usize,
    page_size: SizeF,
    configure: impl FnOnce(&mut SwiperLayoutProperty) -> bool,
) -> (NodeId, Vec<NodeId>) {
    let swiper = tree.make_unique_id();
    tree.create_frame_node(tags::SWIPER, swiper, Box::new(SwiperPattern::new()))
        .expect("fresh id");
    tree.update_layout_property(swiper, |property| {
        property.update_typed::<SwiperLayoutProperty>(configure);
    })
    .expect("swiper node");
    tree.mark_modify_done(swiper);
    let pages = (0..pages)
        .map(|_| {
            let page = fixed_leaf(tree, page_size.width, page_size.height);
            tree.add_child(swiper, page, None);
            page
        })
        .collect();
    (swiper, pages)
}

fn x(rule: &LayoutTestRule, id: NodeId) -> Option<f32> {
    rule.frame_rect(id).map(|rect| rect.offset().x)
}

#[test]
fn pages_sit_side_by_side_from_the_current_one() {
    let mut rule = LayoutTestRule::new();
    let (swiper, pages) = swiper(rule.tree_mut(), 3, SizeF::new(100.0, 100.0), |_| false);
    rule.mount(swiper);
    rule.pump_until_idle();

    assert_eq!(rule.frame_size(swiper), Some(SizeF::new(720.0, 1280.0)));
    let xs: Vec<Option<f32>> = pages.iter().map(|page| x(&rule, *page)).collect();
    assert_eq!(xs, vec![Some(0.0), Some(720.0), Some(1440.0)]);
}

#[test]
fn show_next_follows_the_animation_and_commits_on_finish() {
    let mut rule = LayoutTestRule::new();
    let (swiper, pages) = swiper(rule.tree_mut(), 3, SizeF::new(100.0, 100.0), |_| false);
    rule.mount(swiper);
    rule.pump_until_idle();
    let controller = SwiperController::new(swiper);

    assert_eq!(controller.show_next(rule.tree_mut()), Ok(true));
    controller
        .update_current_offset(rule.tree_mut(), -360.0)
        .expect("swiper");
    rule.pump_until_idle();
    assert_eq!(x(&rule, pages[0]), Some(-360.0));
    assert_eq!(x(&rule, pages[1]), Some(360.0));

    assert_eq!(controller.finish_animation(rule.tree_mut()), Ok(true));
    rule.pump_until_idle();
    assert_eq!(controller.current_index(rule.tree()), Ok(1));
    assert_eq!(x(&rule, pages[0]), Some(-720.0));
    assert_eq!(x(&rule, pages[1]), Some(0.0));
}

#[test]
fn a_looping_swiper_wraps_the_last_page_before_the_first() {
    let mut rule = LayoutTestRule::new();
    let (swiper, pages) = swiper(rule.tree_mut(), 3, SizeF::new(100.0, 100.0), |swiper| {
        swiper.update_looping(true)
    });
    rule.mount(swiper);
    rule.pump_until_idle();

    let dragged = scroll_by::<SwiperPattern>(rule.tree_mut(), swiper, 100.0, ScrollSource::Update);
    assert_eq!(dragged, Ok(true));
    rule.pump_until_idle();
    assert_eq!(x(&rule, pages[0]), Some(100.0));
    assert_eq!(x(&rule, pages[2]), Some(-620.0));

    let controller = SwiperController::new(swiper);
    assert_eq!(controller.show_previous(rule.tree_mut()), Ok(true));
    assert_eq!(controller.finish_animation(rule.tree_mut()), Ok(true));
    rule.pump_until_idle();
    assert_eq!(controller.current_index(rule.tree()), Ok(2));
}

#[test]
fn drags_against_the_first_page_are_rejected_without_looping() {
    let mut rule = LayoutTestRule::new();
    let (swiper, pages) = swiper(rule.tree_mut(), 3, SizeF::new(100.0, 100.0), |_| false);
    rule.mount(swiper);
    rule.pump_until_idle();

    let pulled = scroll_by::<SwiperPattern>(rule.tree_mut(), swiper, 100.0, ScrollSource::Update);
    assert_eq!(pulled, Ok(false));
    assert!(!rule.tree().has_dirty_layout());
    assert_eq!(x(&rule, pages[0]), Some(0.0));

    let controller = SwiperController::new(swiper);
    assert_eq!(controller.show_previous(rule.tree_mut()), Ok(false));
    assert_eq!(controller.swipe_to(rule.tree_mut(), 3), Ok(false));
}

#[test]
fn a_far_swipe_shows_only_the_current_and_target_pages() {
    let mut rule = LayoutTestRule::new();
    let (swiper, pages) = swiper(rule.tree_mut(), 5, SizeF::new(100.0, 100.0), |_| false);
    rule.mount(swiper);
    rule.pump_until_idle();
    let controller = SwiperController::new(swiper);

    assert_eq!(controller.swipe_to(rule.tree_mut(), 3), Ok(true));
    rule.pump_until_idle();
    let active: Vec<bool> = pages.iter().map(|page| rule.is_active(*page)).collect();
    assert_eq!(active, vec![true, false, false, true, false]);
    assert_eq!(x(&rule, pages[3]), Some(720.0));

    assert_eq!(controller.finish_animation(rule.tree_mut()), Ok(true));
    rule.pump_until_idle();
    assert!(pages.iter().all(|page| rule.is_active(*page)));
    assert_eq!(x(&rule, pages[3]), Some(0.0));
    assert_eq!(x(&rule, pages[1]), Some(-1440.0));
}

#[test]
fn display_count_splits_the_width_between_pages() {
    let mut rule = LayoutTestRule::new();
    let (swiper, pages) = swiper(rule.tree_mut(), 4, SizeF::new(400.0, 100.0), |swiper| {
        swiper.update_display_count(2)
    });
    rule.mount(swiper);
    rule.pump_until_idle();

    assert_eq!(rule.frame_size(pages[0]), Some(SizeF::new(360.0, 100.0)));
    assert_eq!(x(&rule, pages[1]), Some(360.0));
    assert_eq!(x(&rule, pages[3]), Some(1080.0));
}

#[test]
fn the_index_property_selects_the_first_page_shown() {
    let mut rule = LayoutTestRule::new();
    let (swiper, pages) = swiper(rule.tree_mut(), 3, SizeF::new(100.0, 100.0), |swiper| {
        swiper.update_index(2)
    });
    rule.mount(swiper);
    rule.pump_until_idle();

    assert_eq!(x(&rule, pages[2]), Some(0.0));
    assert_eq!(x(&rule, pages[0]), Some(-1440.0));

    rule.tree_mut()
        .update_layout_property(swiper, |property| {
            property.update_typed::<SwiperLayoutProperty>(|swiper| swiper.update_index(7));
        })
        .expect("swiper node");
    rule.tree_mut().mark_modify_done(swiper);
    let (_, records) = capture_logs(|| rule.pump_until_idle());
    assert!(arkui_testing::log_capture::contains(&records, log::Level::Error, "is not valid"));
    assert_eq!(x(&rule, pages[2]), Some(0.0));
}

#[test]
fn looping_transitions_across_the_ends_slide_in_from_the_near_side() {
    let mut rule = LayoutTestRule::new();
    let (swiper, pages) = swiper(rule.tree_mut(), 4, SizeF::new(360.0, 100.0), |swiper| {
        swiper.update_looping(true) | swiper.update_index(3)
    });
    rule.mount(swiper);
    rule.pump_until_idle();
    let controller = SwiperController::new(swiper);

    assert_eq!(controller.show_next(rule.tree_mut()), Ok(true));
    controller
        .update_current_offset(rule.tree_mut(), -360.0)
        .expect("swiper");
    rule.pump_until_idle();
    let xs: Vec<Option<f32>> = pages.iter().map(|page| x(&rule, *page)).collect();
    assert_eq!(xs, vec![Some(360.0), Some(-1800.0), Some(-1080.0), Some(-360.0)]);
    assert!(pages.iter().all(|page| rule.is_active(*page)));

    assert_eq!(controller.finish_animation(rule.tree_mut()), Ok(true));
    rule.pump_until_idle();
    assert_eq!(controller.current_index(rule.tree()), Ok(0));
    assert_eq!(x(&rule, pages[0]), Some(0.0));

    assert_eq!(controller.show_previous(rule.tree_mut()), Ok(true));
    controller
        .update_current_offset(rule.tree_mut(), 360.0)
        .expect("swiper");
    rule.pump_until_idle();
    assert_eq!(x(&rule, pages[0]), Some(360.0));
    assert_eq!(x(&rule, pages[3]), Some(-360.0));
    assert!(pages.iter().all(|page| rule.is_active(*page)));

    assert_eq!(controller.finish_animation(rule.tree_mut()), Ok(true));
    rule.pump_until_idle();
    assert_eq!(controller.current_index(rule.tree()), Ok(3));
    assert_eq!(x(&rule, pages[3]), Some(0.0));
}
