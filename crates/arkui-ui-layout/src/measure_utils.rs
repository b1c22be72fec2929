//! Helpers shared by layout properties and container layout algorithms.

use crate::axis::Axis;
use crate::constraints::LayoutConstraintF;
use crate::dimension::{Dimension, ScaleProperty};
use crate::measure_property::{CalcSize, MeasureType, PaddingProperty, PaddingPropertyF};
use arkui_ui_graphics::{positive, OffsetF, OptionalSizeF, SizeF};

pub fn convert_to_px(
    value: Option<Dimension>,
    scale: &ScaleProperty,
    percent_reference: f32,
) -> Option<f32> {
    value.and_then(|dimension| dimension.convert_to_px(scale, percent_reference))
}

/// Resolves each component against the matching reference component.
pub fn convert_to_optional_size(
    size: &CalcSize,
    scale: &ScaleProperty,
    percent_reference: SizeF,
) -> OptionalSizeF {
    OptionalSizeF::new(
        convert_to_px(size.width, scale, percent_reference.width),
        convert_to_px(size.height, scale, percent_reference.height),
    )
}

/// Like [`convert_to_optional_size`] but unresolvable components are
/// unbounded. Used for maximum sizes.
pub fn convert_to_max_size(size: &CalcSize, scale: &ScaleProperty, percent_reference: SizeF) -> SizeF {
    convert_to_optional_size(size, scale, percent_reference).to_size_or(f32::INFINITY)
}

/// Like [`convert_to_optional_size`] but unresolvable components are zero.
/// Used for minimum sizes.
pub fn convert_to_min_size(size: &CalcSize, scale: &ScaleProperty, percent_reference: SizeF) -> SizeF {
    convert_to_optional_size(size, scale, percent_reference).to_size_or(0.0)
}

/// Every padding edge resolves percentages against the width reference.
pub fn convert_to_padding_property_f(
    padding: Option<&PaddingProperty>,
    scale: &ScaleProperty,
    percent_reference: f32,
) -> PaddingPropertyF {
    let Some(padding) = padding else {
        return PaddingPropertyF::default();
    };
    PaddingPropertyF {
        left: convert_to_px(padding.left, scale, percent_reference),
        right: convert_to_px(padding.right, scale, percent_reference),
        top: convert_to_px(padding.top, scale, percent_reference),
        bottom: convert_to_px(padding.bottom, scale, percent_reference),
    }
}

/// `max(min, size)`, then capped by `max` on positive components.
pub fn constrain_size(size: SizeF, min: SizeF, max: SizeF) -> SizeF {
    let mut width = size.width.max(min.width);
    let mut height = size.height.max(min.height);
    if positive(max.width) {
        width = width.min(max.width);
    }
    if positive(max.height) {
        height = height.min(max.height);
    }
    SizeF::new(width, height)
}

pub fn minus_padding_to_size(padding: &PaddingPropertyF, size: &mut SizeF) {
    size.minus_padding(
        padding.left_or_zero(),
        padding.right_or_zero(),
        padding.top_or_zero(),
        padding.bottom_or_zero(),
    );
}

pub fn minus_padding_to_optional_size(padding: &PaddingPropertyF, size: &mut OptionalSizeF) {
    size.minus_padding(
        padding.left_or_zero(),
        padding.right_or_zero(),
        padding.top_or_zero(),
        padding.bottom_or_zero(),
    );
}

pub fn add_padding_to_size(padding: &PaddingPropertyF, size: &mut SizeF) {
    size.add_padding(
        padding.left_or_zero(),
        padding.right_or_zero(),
        padding.top_or_zero(),
        padding.bottom_or_zero(),
    );
}

pub fn padding_offset(padding: &PaddingPropertyF) -> OffsetF {
    OffsetF::new(padding.left_or_zero(), padding.top_or_zero())
}

/// The size a container wants before looking at its children.
///
/// Starts from the self ideal size and, depending on `measure_type`, fills the
/// missing components from the parent's ideal size.
pub fn create_ideal_size_optional(
    constraint: &LayoutConstraintF,
    axis: Axis,
    measure_type: MeasureType,
) -> OptionalSizeF {
    let mut ideal = OptionalSizeF::NONE;
    ideal.update_illegal_size_with_check(constraint.self_ideal_size);
    if ideal.is_valid() {
        return ideal;
    }
    let parent = constraint.parent_ideal_size;
    match measure_type {
        MeasureType::MatchParent => {
            ideal.update_illegal_size_with_check(parent);
        }
        MeasureType::MatchParentCrossAxis => {
            let mut cross = OptionalSizeF::NONE;
            axis.cross_axis()
                .set_optional_main_size(&mut cross, axis.optional_cross_size(parent));
            ideal.update_illegal_size_with_check(cross);
        }
        MeasureType::MatchParentMainAxis => {
            let mut main = OptionalSizeF::NONE;
            axis.set_optional_main_size(&mut main, axis.optional_main_size(parent));
            ideal.update_illegal_size_with_check(main);
        }
        MeasureType::MatchContent => {}
    }
    ideal
}

/// [`create_ideal_size_optional`] with the remaining components taken from
/// the maximum (or minimum) size of the constraint.
pub fn create_ideal_size(
    constraint: &LayoutConstraintF,
    axis: Axis,
    measure_type: MeasureType,
    using_max_size: bool,
) -> SizeF {
    let mut ideal = create_ideal_size_optional(constraint, axis, measure_type);
    if using_max_size {
        ideal.update_illegal_size_with_size(constraint.max_size);
    } else {
        ideal.update_illegal_size_with_size(constraint.min_size);
    }
    ideal.to_size_or(0.0)
}

#[cfg(test)]
#[path = "tests/measure_utils_tests.rs"]
mod tests;
