use super::*;

#[test]
fn constrain_size_prefers_min_then_caps_by_positive_max() {
    let min = SizeF::new(50.0, 0.0);
    let max = SizeF::new(100.0, 0.0);
    let size = constrain_size(SizeF::new(10.0, 500.0), min, max);
    // A zero maximum is treated as "no maximum".
    assert_eq!(size, SizeF::new(50.0, 500.0));
    let capped = constrain_size(SizeF::new(300.0, 5.0), min, SizeF::new(100.0, 100.0));
    assert_eq!(capped, SizeF::new(100.0, 5.0));
}

#[test]
fn padding_percentages_use_the_width_reference() {
    let padding = PaddingProperty {
        left: Some(Dimension::percent(0.1)),
        top: Some(Dimension::percent(0.1)),
        right: Some(Dimension::vp(2.0)),
        bottom: None,
    };
    let scale = ScaleProperty {
        vp_scale: 3.0,
        ..ScaleProperty::default()
    };
    let resolved = convert_to_padding_property_f(Some(&padding), &scale, 200.0);
    assert_eq!(resolved.left, Some(20.0));
    assert_eq!(resolved.top, Some(20.0));
    assert_eq!(resolved.right, Some(6.0));
    assert_eq!(resolved.bottom, None);
    assert_eq!(resolved.vertical(), 20.0);
}

#[test]
fn ideal_size_falls_back_to_max_size() {
    let mut constraint = LayoutConstraintF::default();
    constraint.max_size = SizeF::new(720.0, 1280.0);
    constraint.self_ideal_size = OptionalSizeF::new(Some(100.0), None);
    let size = create_ideal_size(&constraint, Axis::Vertical, MeasureType::MatchContent, true);
    assert_eq!(size, SizeF::new(100.0, 1280.0));
    let min_based = create_ideal_size(&constraint, Axis::Vertical, MeasureType::MatchContent, false);
    assert_eq!(min_based, SizeF::new(100.0, 0.0));
}

#[test]
fn match_parent_cross_axis_only_takes_the_cross_component() {
    let mut constraint = LayoutConstraintF::default();
    constraint.parent_ideal_size = OptionalSizeF::new(Some(300.0), Some(600.0));
    let ideal =
        create_ideal_size_optional(&constraint, Axis::Vertical, MeasureType::MatchParentCrossAxis);
    assert_eq!(ideal, OptionalSizeF::new(Some(300.0), None));
    let full = create_ideal_size_optional(&constraint, Axis::Vertical, MeasureType::MatchParent);
    assert_eq!(full, OptionalSizeF::new(Some(300.0), Some(600.0)));
}
