//! Container patterns and layout algorithms for ArkUI
//!
//! Each container is a [`Pattern`](arkui_core::Pattern) that owns the state
//! surviving between passes and hands a fresh
//! [`LayoutAlgorithm`](arkui_core::LayoutAlgorithm) to every layout pass. The
//! algorithm reports back through `on_dirty_layout_wrapper_swap`.

pub mod grid;
pub mod linear;
pub mod list;
pub mod scroll;
mod scrollable;
pub mod swiper;
pub mod views;

pub use grid::{GridItemPattern, GridLayoutAlgorithm, GridLayoutInfo, GridPattern};
pub use grid::{GridColPattern, GridRowLayoutAlgorithm, GridRowPattern};
pub use linear::{LinearLayoutAlgorithm, LinearPattern};
pub use list::{ListItemPattern, ListLayoutAlgorithm, ListPattern};
pub use scroll::{ScrollLayoutAlgorithm, ScrollPattern};
pub use scrollable::{scroll_by, update_pattern, ScrollSource, Scrollable};
pub use swiper::{SwiperController, SwiperLayoutAlgorithm, SwiperPattern};

/// Tags of the frame nodes created by this crate.
pub mod tags {
    pub const ROW: &str = "Row";
    pub const COLUMN: &str = "Column";
    pub const LIST: &str = "List";
    pub const LIST_ITEM: &str = "ListItem";
    pub const GRID: &str = "Grid";
    pub const GRID_ITEM: &str = "GridItem";
    pub const GRID_ROW: &str = "GridRow";
    pub const GRID_COL: &str = "GridCol";
    pub const SWIPER: &str = "Swiper";
    pub const SCROLL: &str = "Scroll";
}

pub mod prelude {
    pub use crate::grid::{GridItemPattern, GridPattern};
    pub use crate::linear::LinearPattern;
    pub use crate::list::{ListItemPattern, ListPattern};
    pub use crate::scroll::ScrollPattern;
    pub use crate::scrollable::{scroll_by, ScrollSource, Scrollable};
    pub use crate::swiper::{SwiperController, SwiperPattern};
    pub use crate::views::*;
}
