//! The measure/layout protocol shared by every container.

mod algorithm;
mod box_layout;
mod builder;
mod custom_layout;
mod wrapper;

pub use algorithm::{LayoutAlgorithm, LayoutAlgorithmWrapper};
pub use box_layout::BoxLayoutAlgorithm;
pub use builder::LayoutWrapperBuilder;
pub use custom_layout::CustomNodeLayoutAlgorithm;
pub use wrapper::LayoutWrapper;
