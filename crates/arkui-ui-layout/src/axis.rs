use arkui_ui_graphics::{OffsetF, OptionalSizeF, SizeF};

/// Represents the primary axis of a linear container (Row or Column).
///
/// Containers use it to decide which direction is the main axis (where
/// children advance) and which is the cross axis (where children are aligned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Horizontal main axis (Row).
    /// Main axis: left to right
    /// Cross axis: top to bottom
    Horizontal,

    /// Vertical main axis (Column, List).
    /// Main axis: top to bottom
    /// Cross axis: left to right
    #[default]
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Returns true if this is the horizontal axis.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    /// Returns true if this is the vertical axis.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }

    #[inline]
    pub fn main_size(self, size: SizeF) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    #[inline]
    pub fn cross_size(self, size: SizeF) -> f32 {
        self.cross_axis().main_size(size)
    }

    pub fn optional_main_size(self, size: OptionalSizeF) -> Option<f32> {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    pub fn optional_cross_size(self, size: OptionalSizeF) -> Option<f32> {
        self.cross_axis().optional_main_size(size)
    }

    pub fn set_main_size(self, size: &mut SizeF, value: f32) {
        match self {
            Axis::Horizontal => size.width = value,
            Axis::Vertical => size.height = value,
        }
    }

    pub fn set_optional_main_size(self, size: &mut OptionalSizeF, value: Option<f32>) {
        match self {
            Axis::Horizontal => size.width = value,
            Axis::Vertical => size.height = value,
        }
    }

    /// Builds a size from main and cross components.
    pub fn size(self, main: f32, cross: f32) -> SizeF {
        match self {
            Axis::Horizontal => SizeF::new(main, cross),
            Axis::Vertical => SizeF::new(cross, main),
        }
    }

    /// Builds an offset from main and cross components.
    pub fn offset(self, main: f32, cross: f32) -> OffsetF {
        match self {
            Axis::Horizontal => OffsetF::new(main, cross),
            Axis::Vertical => OffsetF::new(cross, main),
        }
    }

    pub fn main_offset(self, offset: OffsetF) -> f32 {
        match self {
            Axis::Horizontal => offset.x,
            Axis::Vertical => offset.y,
        }
    }
}
