//! Float comparison helpers with a fixed tolerance.

/// Tolerance used by every geometry comparison.
pub const EPSILON: f32 = 0.001;

#[inline]
pub fn near_equal(left: f32, right: f32) -> bool {
    // Infinite values only compare equal to themselves.
    if left == right {
        return true;
    }
    (left - right).abs() <= EPSILON
}

#[inline]
pub fn near_zero(value: f32) -> bool {
    value.abs() <= EPSILON
}

#[inline]
pub fn non_negative(value: f32) -> bool {
    value > -EPSILON
}

#[inline]
pub fn non_positive(value: f32) -> bool {
    value < EPSILON
}

#[inline]
pub fn positive(value: f32) -> bool {
    value > EPSILON
}

#[inline]
pub fn negative(value: f32) -> bool {
    value < -EPSILON
}

/// `left < right` outside of the tolerance band.
#[inline]
pub fn less_not_equal(left: f32, right: f32) -> bool {
    right - left > EPSILON
}

/// `left > right` outside of the tolerance band.
#[inline]
pub fn greater_not_equal(left: f32, right: f32) -> bool {
    left - right > EPSILON
}

#[inline]
pub fn less_or_equal(left: f32, right: f32) -> bool {
    !greater_not_equal(left, right)
}

#[inline]
pub fn greater_or_equal(left: f32, right: f32) -> bool {
    !less_not_equal(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_equal_tolerates_rounding() {
        assert!(near_equal(0.1 + 0.2, 0.3));
        assert!(!near_equal(1.0, 1.01));
        assert!(near_equal(f32::INFINITY, f32::INFINITY));
        assert!(!near_equal(f32::INFINITY, 1.0e9));
    }

    #[test]
    fn strict_comparisons_ignore_tiny_differences() {
        assert!(!less_not_equal(1.0, 1.0005));
        assert!(less_not_equal(1.0, 1.1));
        assert!(greater_or_equal(1.0, 1.0005));
        assert!(non_negative(-0.0001));
        assert!(!positive(0.0001));
    }
}
