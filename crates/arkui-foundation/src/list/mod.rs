//! Virtualized List.
//!
//! Only the rows around the viewport are built, measured and kept in the
//! render tree. The band around the viewport that stays built is a share of
//! the main size, configured by `PipelineConfig::list_cache_ratio`.

mod list_layout_algorithm;
mod list_pattern;

pub use list_layout_algorithm::{ItemPosition, ListLayoutAlgorithm};
pub use list_pattern::{ListItemPattern, ListPattern};
