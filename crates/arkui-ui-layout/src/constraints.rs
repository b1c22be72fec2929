//! Layout constraints system

use crate::dimension::ScaleProperty;
use arkui_ui_graphics::{OptionalSizeF, SizeF};

/// Box constraint handed from a parent to a child for one measure pass.
///
/// `max_size` uses infinity as "no maximum". Ideal sizes are optional per
/// component; an unset component means the node has no preference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConstraintF {
    pub scale_property: ScaleProperty,
    pub min_size: SizeF,
    pub max_size: SizeF,
    /// Base used to resolve percentage lengths of the constrained node.
    pub percent_reference: SizeF,
    pub parent_ideal_size: OptionalSizeF,
    pub self_ideal_size: OptionalSizeF,
}

impl Default for LayoutConstraintF {
    fn default() -> Self {
        Self {
            scale_property: ScaleProperty::default(),
            min_size: SizeF::ZERO,
            max_size: SizeF::INFINITE,
            percent_reference: SizeF::ZERO,
            parent_ideal_size: OptionalSizeF::NONE,
            self_ideal_size: OptionalSizeF::NONE,
        }
    }
}

impl LayoutConstraintF {
    /// Constraint that admits exactly `size`.
    pub fn tight(size: SizeF) -> Self {
        Self {
            min_size: size,
            max_size: size,
            percent_reference: size,
            self_ideal_size: OptionalSizeF::from_size(size),
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Shrinks the maximum towards `size`, keeping `min_size <= max_size`.
    pub fn update_max_size_with_check(&mut self, size: SizeF) -> bool {
        if self.max_size == size {
            return false;
        }
        let changed = self.max_size.update_size_when_smaller(size);
        self.min_size.update_size_when_smaller(self.max_size);
        changed
    }

    /// Grows the minimum towards `size`. The minimum never passes the maximum.
    pub fn update_min_size_with_check(&mut self, size: SizeF) -> bool {
        if self.min_size == size {
            return false;
        }
        let before = self.min_size;
        self.min_size.update_size_when_larger(size);
        self.min_size.update_size_when_smaller(self.max_size);
        before != self.min_size
    }

    pub fn update_self_ideal_size_with_check(&mut self, size: OptionalSizeF) -> bool {
        self.self_ideal_size.update_size_with_check(size)
    }

    pub fn update_illegal_self_ideal_size_with_check(&mut self, size: OptionalSizeF) -> bool {
        self.self_ideal_size.update_illegal_size_with_check(size)
    }

    pub fn update_parent_ideal_size_with_check(&mut self, size: OptionalSizeF) -> bool {
        self.parent_ideal_size.update_size_with_check(size)
    }

    pub fn update_illegal_parent_ideal_size_with_check(&mut self, size: OptionalSizeF) -> bool {
        self.parent_ideal_size.update_illegal_size_with_check(size)
    }

    pub fn update_percent_reference(&mut self, size: SizeF) -> bool {
        self.percent_reference.update_size_with_check(size)
    }

    /// Keeps the self ideal size inside `[min_size, max_size]`.
    pub fn clamp_self_ideal_size(&mut self) -> bool {
        let grown = self.self_ideal_size.update_size_when_larger(self.min_size);
        let shrunk = self.self_ideal_size.update_size_when_smaller(self.max_size);
        grown || shrunk
    }

    /// Subtracts an inset from every size the constraint carries.
    pub fn minus_padding(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        self.min_size.minus_padding(left, right, top, bottom);
        self.min_size.update_size_when_larger(SizeF::ZERO);
        self.max_size.minus_padding(left, right, top, bottom);
        self.max_size.update_size_when_larger(SizeF::ZERO);
        self.self_ideal_size.minus_padding(left, right, top, bottom);
        self.self_ideal_size.update_size_when_larger(SizeF::ZERO);
        self.parent_ideal_size.minus_padding(left, right, top, bottom);
        self.parent_ideal_size.update_size_when_larger(SizeF::ZERO);
    }
}

#[cfg(test)]
#[path = "tests/constraints_tests.rs"]
mod tests;
