//! Grid containers.
//!
//! [`GridPattern`] is the scrollable, virtualized grid: items flow into
//! lines of `cross_count` tracks, lines are measured only while they are in
//! the viewport, and the line bookkeeping lives in [`GridLayoutInfo`].
//!
//! [`GridRowPattern`] and [`GridColPattern`] form the responsive column
//! layout: a row splits its width into equal columns separated by a gutter
//! and every column child covers `span` of them.

mod grid_layout_algorithm;
mod grid_layout_info;
mod grid_pattern;
mod grid_row;

pub use grid_layout_algorithm::GridLayoutAlgorithm;
pub use grid_layout_info::GridLayoutInfo;
pub use grid_pattern::{GridItemPattern, GridPattern};
pub use grid_row::{GridColPattern, GridRowLayoutAlgorithm, GridRowPattern};
