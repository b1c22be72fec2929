//! Layout contracts & policies for ArkUI
//!
//! Everything a node needs to take part in measure and layout without knowing
//! about the tree: units, constraints, declared layout properties, change
//! flags and the per-node geometry record.

mod alignment;
mod arrangement;
mod axis;
mod constraints;
mod container_property;
mod dimension;
mod geometry_node;
mod layout_property;
mod measure_property;
pub mod measure_utils;
mod property_flag;

pub use alignment::*;
pub use arrangement::*;
pub use axis::*;
pub use constraints::*;
pub use container_property::*;
pub use dimension::*;
pub use geometry_node::*;
pub use layout_property::*;
pub use measure_property::*;
pub use property_flag::*;

pub mod prelude {
    pub use crate::alignment::{Alignment, FlexAlign};
    pub use crate::arrangement::Arrangement;
    pub use crate::axis::Axis;
    pub use crate::constraints::LayoutConstraintF;
    pub use crate::dimension::{Dimension, DimensionUnit, ScaleProperty};
    pub use crate::geometry_node::GeometryNode;
    pub use crate::layout_property::LayoutProperty;
    pub use crate::measure_property::{CalcSize, MeasureType, PaddingProperty};
    pub use crate::property_flag::PropertyChangeFlag;
}
