//! Swiper: a pager showing `display_count` pages at a time.
//!
//! Pages sit edge to edge along the swiper's axis and are panned by
//! `current_offset`. Page changes are transitions: a target page is set,
//! an animation driver feeds offsets, and finishing the animation commits
//! the target as the current page. Every page is measured on every pass;
//! swipers are expected to hold few pages.

mod swiper_controller;
mod swiper_layout_algorithm;
mod swiper_pattern;

pub use swiper_controller::SwiperController;
pub use swiper_layout_algorithm::SwiperLayoutAlgorithm;
pub use swiper_pattern::SwiperPattern;
