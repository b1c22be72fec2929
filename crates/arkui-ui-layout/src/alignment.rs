//! Alignment utilities for positioning content

use arkui_ui_graphics::{OffsetF, SizeF};

/// Two-dimensional alignment expressed as biases in `[-1, 1]`.
///
/// `-1` pins to the leading edge, `0` centers and `1` pins to the trailing
/// edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alignment {
    /// Horizontal bias.
    pub horizontal: f32,
    /// Vertical bias.
    pub vertical: f32,
}

impl Alignment {
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const TOP_LEFT: Self = Self::new(-1.0, -1.0);
    pub const TOP_CENTER: Self = Self::new(0.0, -1.0);
    pub const TOP_RIGHT: Self = Self::new(1.0, -1.0);
    pub const CENTER_LEFT: Self = Self::new(-1.0, 0.0);
    pub const CENTER: Self = Self::new(0.0, 0.0);
    pub const CENTER_RIGHT: Self = Self::new(1.0, 0.0);
    pub const BOTTOM_LEFT: Self = Self::new(-1.0, 1.0);
    pub const BOTTOM_CENTER: Self = Self::new(0.0, 1.0);
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    /// Offset of a `child` box aligned inside a `parent` box.
    pub fn align_position(&self, parent: SizeF, child: SizeF) -> OffsetF {
        let width = (parent.width - child.width) / 2.0;
        let height = (parent.height - child.height) / 2.0;
        OffsetF::new(
            width * (1.0 + self.horizontal),
            height * (1.0 + self.vertical),
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::CENTER
    }
}

/// Flex alignment used by linear containers on both axes.
///
/// The space distribution variants only make sense on the main axis; on the
/// cross axis they behave like [`FlexAlign::FlexStart`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlexAlign {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl FlexAlign {
    /// Cross-axis offset of a child of size `child` inside `available`.
    pub fn cross_offset(&self, available: f32, child: f32) -> f32 {
        match self {
            FlexAlign::Center => (available - child) / 2.0,
            FlexAlign::FlexEnd => available - child,
            _ => 0.0,
        }
    }
}
