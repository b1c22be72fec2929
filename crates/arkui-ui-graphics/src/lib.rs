//! Pure math/data for ArkUI geometry
//!
//! This crate contains the size, offset and rect value types shared by the
//! layout property model and the node tree, plus the float tolerance helpers
//! every comparison in the layout pipeline goes through.

mod geometry;
mod math;

pub use geometry::*;
pub use math::*;

pub mod prelude {
    pub use crate::geometry::{OffsetF, OptionalSizeF, PointF, RectF, SizeF};
    pub use crate::math::{near_equal, near_zero};
}
