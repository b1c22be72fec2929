//! Declared (unresolved) sizing properties of a node.

use crate::alignment::Alignment;
use crate::dimension::Dimension;

/// How a node sizes itself when it has no explicit ideal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MeasureType {
    MatchParent,
    #[default]
    MatchContent,
    MatchParentCrossAxis,
    MatchParentMainAxis,
}

/// A width/height pair whose components are independently optional.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CalcSize {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
}

impl CalcSize {
    pub const fn new(width: Option<Dimension>, height: Option<Dimension>) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// Overwrites the components set on `other`.
    pub fn update_with_check(&mut self, other: CalcSize) -> bool {
        let mut changed = false;
        if other.width.is_some() && self.width != other.width {
            self.width = other.width;
            changed = true;
        }
        if other.height.is_some() && self.height != other.height {
            self.height = other.height;
            changed = true;
        }
        changed
    }
}

/// Explicit min/max/ideal overrides set on a node.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MeasureProperty {
    pub min_size: Option<CalcSize>,
    pub max_size: Option<CalcSize>,
    pub self_ideal_size: Option<CalcSize>,
}

impl MeasureProperty {
    pub fn update_min_size_with_check(&mut self, size: CalcSize) -> bool {
        update_calc_slot(&mut self.min_size, size)
    }

    pub fn update_max_size_with_check(&mut self, size: CalcSize) -> bool {
        update_calc_slot(&mut self.max_size, size)
    }

    pub fn update_self_ideal_size_with_check(&mut self, size: CalcSize) -> bool {
        update_calc_slot(&mut self.self_ideal_size, size)
    }

    pub fn clear_self_ideal_size(&mut self) -> bool {
        self.self_ideal_size.take().is_some()
    }
}

fn update_calc_slot(slot: &mut Option<CalcSize>, size: CalcSize) -> bool {
    match slot {
        Some(current) => current.update_with_check(size),
        None => {
            *slot = Some(size);
            true
        }
    }
}

/// Per-edge lengths shared by padding and border widths.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PaddingProperty {
    pub left: Option<Dimension>,
    pub right: Option<Dimension>,
    pub top: Option<Dimension>,
    pub bottom: Option<Dimension>,
}

impl PaddingProperty {
    pub fn uniform(value: Dimension) -> Self {
        Self {
            left: Some(value),
            right: Some(value),
            top: Some(value),
            bottom: Some(value),
        }
    }

    pub fn symmetric(horizontal: Dimension, vertical: Dimension) -> Self {
        Self {
            left: Some(horizontal),
            right: Some(horizontal),
            top: Some(vertical),
            bottom: Some(vertical),
        }
    }
}

pub type BorderWidthProperty = PaddingProperty;

/// Padding resolved to pixels. Unset edges stay unset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PaddingPropertyF {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

impl PaddingPropertyF {
    pub fn left_or_zero(&self) -> f32 {
        self.left.unwrap_or(0.0)
    }

    pub fn right_or_zero(&self) -> f32 {
        self.right.unwrap_or(0.0)
    }

    pub fn top_or_zero(&self) -> f32 {
        self.top.unwrap_or(0.0)
    }

    pub fn bottom_or_zero(&self) -> f32 {
        self.bottom.unwrap_or(0.0)
    }

    pub fn horizontal(&self) -> f32 {
        self.left_or_zero() + self.right_or_zero()
    }

    pub fn vertical(&self) -> f32 {
        self.top_or_zero() + self.bottom_or_zero()
    }

    /// Edge-wise sum, treating unset edges as zero.
    pub fn combine(&self, other: &PaddingPropertyF) -> PaddingPropertyF {
        PaddingPropertyF {
            left: Some(self.left_or_zero() + other.left_or_zero()),
            right: Some(self.right_or_zero() + other.right_or_zero()),
            top: Some(self.top_or_zero() + other.top_or_zero()),
            bottom: Some(self.bottom_or_zero() + other.bottom_or_zero()),
        }
    }
}

pub type BorderWidthPropertyF = PaddingPropertyF;

/// Flex participation of a child inside a linear container.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MagicItemProperty {
    pub layout_weight: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PositionProperty {
    pub alignment: Option<Alignment>,
}
