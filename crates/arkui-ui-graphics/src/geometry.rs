//! Geometric primitives: SizeF, OptionalSizeF, OffsetF, PointF, RectF
//!
//! Equality on every type here is tolerance based, see [`near_equal`].

use crate::math::{near_equal, non_negative, positive};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: SizeF = SizeF {
        width: 0.0,
        height: 0.0,
    };

    pub const INFINITE: SizeF = SizeF {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    pub fn is_non_negative(&self) -> bool {
        non_negative(self.width) && non_negative(self.height)
    }

    pub fn is_positive(&self) -> bool {
        positive(self.width) && positive(self.height)
    }

    pub fn is_infinite(&self) -> bool {
        self.width.is_infinite() || self.height.is_infinite()
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    /// Clamps each component into `[min, max]`.
    ///
    /// A bound only applies on the components where both the bound and `self`
    /// are non-negative. Returns whether anything changed.
    pub fn constrain(&mut self, min: SizeF, max: SizeF) -> bool {
        let before = *self;
        if non_negative(self.width) {
            if non_negative(min.width) {
                self.width = self.width.max(min.width);
            }
            if non_negative(max.width) {
                self.width = self.width.min(max.width);
            }
        }
        if non_negative(self.height) {
            if non_negative(min.height) {
                self.height = self.height.max(min.height);
            }
            if non_negative(max.height) {
                self.height = self.height.min(max.height);
            }
        }
        before != *self
    }

    pub fn update_size_when_larger(&mut self, other: SizeF) -> bool {
        let before = *self;
        self.width = self.width.max(other.width);
        self.height = self.height.max(other.height);
        before != *self
    }

    pub fn update_size_when_smaller(&mut self, other: SizeF) -> bool {
        let before = *self;
        self.width = self.width.min(other.width);
        self.height = self.height.min(other.height);
        before != *self
    }

    pub fn update_size_with_check(&mut self, other: SizeF) -> bool {
        if *self == other {
            return false;
        }
        *self = other;
        true
    }

    pub fn add_padding(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        self.width += left + right;
        self.height += top + bottom;
    }

    pub fn minus_padding(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        self.width -= left + right;
        self.height -= top + bottom;
    }

    /// Width over height. A zero height yields `inf` or `NaN` unchanged.
    pub fn calc_ratio(&self) -> f32 {
        self.width / self.height
    }
}

impl PartialEq for SizeF {
    fn eq(&self, other: &Self) -> bool {
        near_equal(self.width, other.width) && near_equal(self.height, other.height)
    }
}

impl Add for SizeF {
    type Output = SizeF;

    fn add(self, rhs: Self) -> Self::Output {
        SizeF::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for SizeF {
    type Output = SizeF;

    fn sub(self, rhs: Self) -> Self::Output {
        SizeF::new(self.width - rhs.width, self.height - rhs.height)
    }
}

/// A size whose components may individually be unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct OptionalSizeF {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl OptionalSizeF {
    pub const fn new(width: Option<f32>, height: Option<f32>) -> Self {
        Self { width, height }
    }

    pub const NONE: OptionalSizeF = OptionalSizeF {
        width: None,
        height: None,
    };

    pub fn from_size(size: SizeF) -> Self {
        Self::new(Some(size.width), Some(size.height))
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    pub fn set_width(&mut self, width: Option<f32>) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: Option<f32>) {
        self.height = height;
    }

    /// Both components are set.
    pub fn is_valid(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    pub fn is_null(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    pub fn is_non_negative(&self) -> bool {
        self.width.map_or(true, non_negative) && self.height.map_or(true, non_negative)
    }

    /// Overwrites the components that are set on `other`.
    pub fn update_size_with_check(&mut self, other: OptionalSizeF) -> bool {
        let mut changed = false;
        if let Some(width) = other.width {
            changed |= replace_component(&mut self.width, width);
        }
        if let Some(height) = other.height {
            changed |= replace_component(&mut self.height, height);
        }
        changed
    }

    /// Fills only the components that are still unset.
    pub fn update_illegal_size_with_check(&mut self, other: OptionalSizeF) -> bool {
        let mut changed = false;
        if self.width.is_none() && other.width.is_some() {
            self.width = other.width;
            changed = true;
        }
        if self.height.is_none() && other.height.is_some() {
            self.height = other.height;
            changed = true;
        }
        changed
    }

    pub fn update_illegal_size_with_size(&mut self, other: SizeF) -> bool {
        self.update_illegal_size_with_check(OptionalSizeF::from_size(other))
    }

    /// Raises the set components to at least `other`.
    pub fn update_size_when_larger(&mut self, other: SizeF) -> bool {
        let mut changed = false;
        if let Some(width) = self.width.as_mut() {
            if *width < other.width {
                *width = other.width;
                changed = true;
            }
        }
        if let Some(height) = self.height.as_mut() {
            if *height < other.height {
                *height = other.height;
                changed = true;
            }
        }
        changed
    }

    /// Lowers the set components to at most `other`.
    pub fn update_size_when_smaller(&mut self, other: SizeF) -> bool {
        let mut changed = false;
        if let Some(width) = self.width.as_mut() {
            if *width > other.width {
                *width = other.width;
                changed = true;
            }
        }
        if let Some(height) = self.height.as_mut() {
            if *height > other.height {
                *height = other.height;
                changed = true;
            }
        }
        changed
    }

    pub fn add_padding(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        if let Some(width) = self.width.as_mut() {
            *width += left + right;
        }
        if let Some(height) = self.height.as_mut() {
            *height += top + bottom;
        }
    }

    pub fn minus_padding(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        if let Some(width) = self.width.as_mut() {
            *width -= left + right;
        }
        if let Some(height) = self.height.as_mut() {
            *height -= top + bottom;
        }
    }

    /// Unset components become `fallback`.
    pub fn to_size_or(&self, fallback: f32) -> SizeF {
        SizeF::new(
            self.width.unwrap_or(fallback),
            self.height.unwrap_or(fallback),
        )
    }
}

fn replace_component(slot: &mut Option<f32>, value: f32) -> bool {
    match slot {
        Some(current) if near_equal(*current, value) => false,
        _ => {
            *slot = Some(value);
            true
        }
    }
}

impl PartialEq for OptionalSizeF {
    fn eq(&self, other: &Self) -> bool {
        option_near_equal(self.width, other.width) && option_near_equal(self.height, other.height)
    }
}

fn option_near_equal(left: Option<f32>, right: Option<f32>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => near_equal(l, r),
        (None, None) => true,
        _ => false,
    }
}

impl From<SizeF> for OptionalSizeF {
    fn from(size: SizeF) -> Self {
        OptionalSizeF::from_size(size)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OffsetF {
    pub x: f32,
    pub y: f32,
}

impl OffsetF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: OffsetF = OffsetF { x: 0.0, y: 0.0 };

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }
}

impl PartialEq for OffsetF {
    fn eq(&self, other: &Self) -> bool {
        near_equal(self.x, other.x) && near_equal(self.y, other.y)
    }
}

impl Add for OffsetF {
    type Output = OffsetF;

    fn add(self, rhs: Self) -> Self::Output {
        OffsetF::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for OffsetF {
    type Output = OffsetF;

    fn sub(self, rhs: Self) -> Self::Output {
        OffsetF::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for OffsetF {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for OffsetF {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for OffsetF {
    type Output = OffsetF;

    fn neg(self) -> Self::Output {
        OffsetF::new(-self.x, -self.y)
    }
}

/// A position in some node's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub<OffsetF> for PointF {
    type Output = PointF;

    fn sub(self, rhs: OffsetF) -> Self::Output {
        PointF::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectF {
    offset: OffsetF,
    size: SizeF,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            offset: OffsetF::new(x, y),
            size: SizeF::new(width, height),
        }
    }

    pub fn from_offset_size(offset: OffsetF, size: SizeF) -> Self {
        Self { offset, size }
    }

    pub fn offset(&self) -> OffsetF {
        self.offset
    }

    pub fn size(&self) -> SizeF {
        self.size
    }

    pub fn set_offset(&mut self, offset: OffsetF) {
        self.offset = offset;
    }

    pub fn set_size(&mut self, size: SizeF) {
        self.size = size;
    }

    pub fn left(&self) -> f32 {
        self.offset.x
    }

    pub fn top(&self) -> f32 {
        self.offset.y
    }

    pub fn right(&self) -> f32 {
        self.offset.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.offset.y + self.size.height
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn contains(&self, point: PointF) -> bool {
        point.x >= self.left()
            && point.y >= self.top()
            && point.x <= self.right()
            && point.y <= self.bottom()
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
