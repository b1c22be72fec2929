use super::Arrangement;
use crate::FlexAlign;

#[test]
fn space_evenly_distributes_gaps() {
    let sizes = vec![10.0, 10.0, 10.0];
    let mut positions = vec![0.0; sizes.len()];
    FlexAlign::SpaceEvenly.arrange(100.0, 0.0, &sizes, &mut positions);
    assert_eq!(positions, vec![17.5, 45.0, 72.5]);
}

#[test]
fn flex_start_uses_fixed_spacing() {
    let sizes = vec![10.0, 10.0];
    let mut positions = vec![0.0; sizes.len()];
    FlexAlign::FlexStart.arrange(40.0, 5.0, &sizes, &mut positions);
    assert_eq!(positions, vec![0.0, 15.0]);
}

#[test]
fn center_accounts_for_spacing() {
    let sizes = vec![10.0, 10.0];
    let mut positions = vec![0.0; sizes.len()];
    FlexAlign::Center.arrange(100.0, 20.0, &sizes, &mut positions);
    assert_eq!(positions, vec![30.0, 60.0]);
}

#[test]
fn flex_end_pins_last_child_to_trailing_edge() {
    let sizes = vec![30.0, 20.0];
    let mut positions = vec![0.0; sizes.len()];
    FlexAlign::FlexEnd.arrange(100.0, 0.0, &sizes, &mut positions);
    assert_eq!(positions, vec![50.0, 80.0]);
}

#[test]
fn space_between_with_single_child_starts_at_zero() {
    let sizes = vec![30.0];
    let mut positions = vec![1.0];
    FlexAlign::SpaceBetween.arrange(100.0, 0.0, &sizes, &mut positions);
    assert_eq!(positions, vec![0.0]);
}
