//! Per-node layout configuration and constraint propagation.

use crate::alignment::Alignment;
use crate::constraints::LayoutConstraintF;
use crate::container_property::{ContainerProperty, LinearLayoutProperty, TypedLayoutProperty};
use crate::dimension::ScaleProperty;
use crate::measure_property::{
    BorderWidthProperty, CalcSize, MagicItemProperty, MeasureProperty, MeasureType,
    PaddingProperty, PaddingPropertyF, PositionProperty,
};
use crate::measure_utils::{
    convert_to_max_size, convert_to_min_size, convert_to_optional_size,
    convert_to_padding_property_f,
};
use crate::property_flag::PropertyChangeFlag;
use arkui_ui_graphics::{OptionalSizeF, SizeF};

/// Declared layout state of a frame node plus the constraints derived from it
/// during the current measure pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutProperty {
    property_change_flag: PropertyChangeFlag,
    layout_constraint: Option<LayoutConstraintF>,
    content_constraint: Option<LayoutConstraintF>,
    calc_layout_constraint: Option<MeasureProperty>,
    padding: Option<PaddingProperty>,
    border_width: Option<BorderWidthProperty>,
    magic_item_property: Option<MagicItemProperty>,
    position_property: Option<PositionProperty>,
    measure_type: Option<MeasureType>,
    container: ContainerProperty,
}

impl LayoutProperty {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(container: impl Into<ContainerProperty>) -> Self {
        Self {
            container: container.into(),
            ..Self::default()
        }
    }

    /// Drops every declared value and derived constraint. The container kind
    /// is kept, its fields are cleared.
    pub fn reset(&mut self) {
        let container = match &self.container {
            ContainerProperty::None => ContainerProperty::None,
            ContainerProperty::Linear(linear) => {
                ContainerProperty::Linear(LinearLayoutProperty::new(linear.is_vertical()))
            }
            ContainerProperty::List(_) => ContainerProperty::List(Default::default()),
            ContainerProperty::Grid(_) => ContainerProperty::Grid(Default::default()),
            ContainerProperty::GridItem(_) => ContainerProperty::GridItem(Default::default()),
            ContainerProperty::GridCol(_) => ContainerProperty::GridCol(Default::default()),
            ContainerProperty::Swiper(_) => ContainerProperty::Swiper(Default::default()),
            ContainerProperty::Scroll(_) => ContainerProperty::Scroll(Default::default()),
        };
        *self = Self {
            container,
            ..Self::default()
        };
    }

    pub fn property_change_flag(&self) -> PropertyChangeFlag {
        self.property_change_flag
    }

    pub fn update_property_change_flag(&mut self, flag: PropertyChangeFlag) {
        self.property_change_flag |= flag;
    }

    pub fn clean_dirty(&mut self) {
        self.property_change_flag = PropertyChangeFlag::NORMAL;
    }

    /// Folds a child's pending change into this node's flag.
    pub fn adjust_property_change_flag_by_child(&mut self, child_flag: PropertyChangeFlag) {
        if child_flag.check_measure_flag() {
            if self.measure_type() == MeasureType::MatchContent {
                self.update_property_change_flag(PropertyChangeFlag::MEASURE);
            }
            self.update_property_change_flag(PropertyChangeFlag::LAYOUT);
        }
        if child_flag.contains(PropertyChangeFlag::POSITION) {
            self.update_property_change_flag(PropertyChangeFlag::LAYOUT);
        }
    }

    pub fn layout_constraint(&self) -> Option<&LayoutConstraintF> {
        self.layout_constraint.as_ref()
    }

    pub fn content_constraint(&self) -> Option<&LayoutConstraintF> {
        self.content_constraint.as_ref()
    }

    pub fn calc_layout_constraint(&self) -> Option<&MeasureProperty> {
        self.calc_layout_constraint.as_ref()
    }

    pub fn update_calc_layout_property(&mut self, property: MeasureProperty) {
        if self.calc_layout_constraint.as_ref() == Some(&property) {
            return;
        }
        self.calc_layout_constraint = Some(property);
        self.update_property_change_flag(PropertyChangeFlag::MEASURE);
    }

    pub fn update_calc_self_ideal_size(&mut self, size: CalcSize) {
        let measure = self.calc_layout_constraint.get_or_insert_with(Default::default);
        if measure.update_self_ideal_size_with_check(size) {
            self.update_property_change_flag(PropertyChangeFlag::MEASURE);
        }
    }

    pub fn update_calc_min_size(&mut self, size: CalcSize) {
        let measure = self.calc_layout_constraint.get_or_insert_with(Default::default);
        if measure.update_min_size_with_check(size) {
            self.update_property_change_flag(PropertyChangeFlag::MEASURE);
        }
    }

    pub fn update_calc_max_size(&mut self, size: CalcSize) {
        let measure = self.calc_layout_constraint.get_or_insert_with(Default::default);
        if measure.update_max_size_with_check(size) {
            self.update_property_change_flag(PropertyChangeFlag::MEASURE);
        }
    }

    pub fn clear_user_defined_ideal_size(&mut self) {
        if let Some(measure) = self.calc_layout_constraint.as_mut() {
            if measure.clear_self_ideal_size() {
                self.update_property_change_flag(PropertyChangeFlag::MEASURE);
            }
        }
    }

    pub fn padding(&self) -> Option<&PaddingProperty> {
        self.padding.as_ref()
    }

    pub fn update_padding(&mut self, padding: PaddingProperty) {
        if self.padding.as_ref() == Some(&padding) {
            return;
        }
        self.padding = Some(padding);
        self.update_property_change_flag(PropertyChangeFlag::LAYOUT | PropertyChangeFlag::MEASURE);
    }

    pub fn border_width(&self) -> Option<&BorderWidthProperty> {
        self.border_width.as_ref()
    }

    pub fn update_border_width(&mut self, border_width: BorderWidthProperty) {
        if self.border_width.as_ref() == Some(&border_width) {
            return;
        }
        self.border_width = Some(border_width);
        self.update_property_change_flag(PropertyChangeFlag::LAYOUT | PropertyChangeFlag::MEASURE);
    }

    pub fn magic_item_property(&self) -> Option<&MagicItemProperty> {
        self.magic_item_property.as_ref()
    }

    pub fn layout_weight(&self) -> Option<f32> {
        self.magic_item_property
            .as_ref()
            .and_then(|magic| magic.layout_weight)
    }

    pub fn update_layout_weight(&mut self, weight: f32) {
        let magic = self.magic_item_property.get_or_insert_with(Default::default);
        if magic.layout_weight == Some(weight) {
            return;
        }
        magic.layout_weight = Some(weight);
        self.update_property_change_flag(PropertyChangeFlag::MEASURE);
    }

    pub fn position_property(&self) -> Option<&PositionProperty> {
        self.position_property.as_ref()
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.position_property
            .as_ref()
            .and_then(|position| position.alignment)
    }

    pub fn update_alignment(&mut self, alignment: Alignment) {
        let position = self.position_property.get_or_insert_with(Default::default);
        if position.alignment == Some(alignment) {
            return;
        }
        position.alignment = Some(alignment);
        self.update_property_change_flag(PropertyChangeFlag::LAYOUT);
    }

    pub fn measure_type(&self) -> MeasureType {
        self.measure_type.unwrap_or_default()
    }

    pub fn update_measure_type(&mut self, measure_type: MeasureType) {
        if self.measure_type == Some(measure_type) {
            return;
        }
        self.measure_type = Some(measure_type);
        self.update_property_change_flag(PropertyChangeFlag::MEASURE);
    }

    pub fn container(&self) -> &ContainerProperty {
        &self.container
    }

    pub fn typed<T: TypedLayoutProperty>(&self) -> Option<&T> {
        T::from_container(&self.container)
    }

    /// Applies `update` to the container extension of type `T`.
    ///
    /// A node of another kind is left untouched. When `update` reports a
    /// change the node becomes measure-dirty.
    pub fn update_typed<T: TypedLayoutProperty>(&mut self, update: impl FnOnce(&mut T) -> bool) -> bool {
        let Some(typed) = T::from_container_mut(&mut self.container) else {
            log::debug!("layout property is not a {}; update ignored", T::NAME);
            return false;
        };
        if update(typed) {
            self.update_property_change_flag(PropertyChangeFlag::MEASURE);
            return true;
        }
        false
    }

    /// Merges the parent's constraint with this node's explicit overrides.
    ///
    /// Overrides apply in the order max, min, self ideal. Percentages resolve
    /// against the parent's percent reference and the scale is inherited.
    /// When `update_flag` is set, a changed result marks the node
    /// measure-dirty.
    pub fn update_layout_constraint(&mut self, parent: &LayoutConstraintF, update_flag: bool) {
        let mut constraint = *parent;
        if let Some(calc) = self.calc_layout_constraint {
            let scale = parent.scale_property;
            let reference = parent.percent_reference;
            if let Some(max) = calc.max_size {
                constraint.update_max_size_with_check(convert_to_max_size(&max, &scale, reference));
            }
            if let Some(min) = calc.min_size {
                constraint.update_min_size_with_check(convert_to_min_size(&min, &scale, reference));
            }
            if let Some(ideal) = calc.self_ideal_size {
                constraint.update_self_ideal_size_with_check(convert_to_optional_size(
                    &ideal, &scale, reference,
                ));
            }
        }
        self.check_self_ideal_size(&mut constraint);
        if update_flag && self.layout_constraint.as_ref() != Some(&constraint) {
            self.update_property_change_flag(PropertyChangeFlag::MEASURE);
        }
        self.layout_constraint = Some(constraint);
    }

    fn check_self_ideal_size(&self, constraint: &mut LayoutConstraintF) {
        if self.measure_type() == MeasureType::MatchParent {
            let parent = constraint.parent_ideal_size;
            constraint.update_self_ideal_size_with_check(parent);
        }
        constraint.clamp_self_ideal_size();
    }

    /// Derives the content constraint: the layout constraint minus padding
    /// and border.
    pub fn update_content_constraint(&mut self) {
        let Some(mut content) = self.layout_constraint else {
            self.content_constraint = None;
            return;
        };
        if let Some(width) = content.parent_ideal_size.width {
            content.percent_reference.width = width;
        }
        if let Some(height) = content.parent_ideal_size.height {
            content.percent_reference.height = height;
        }
        let inset = self.create_padding_and_border();
        content.minus_padding(
            inset.left_or_zero(),
            inset.right_or_zero(),
            inset.top_or_zero(),
            inset.bottom_or_zero(),
        );
        self.content_constraint = Some(content);
    }

    /// Replaces the content constraint with one computed by the container.
    pub fn replace_content_constraint(&mut self, constraint: LayoutConstraintF) {
        self.content_constraint = Some(constraint);
    }

    /// Constraint handed to children: bounded by this node's content ideal
    /// size, with no minimum and no self ideal size of their own.
    pub fn create_child_constraint(&self) -> LayoutConstraintF {
        let mut child = self.content_constraint.unwrap_or_default();
        child.parent_ideal_size = child.self_ideal_size;
        if let Some(width) = child.self_ideal_size.width {
            child.max_size.width = width;
            child.percent_reference.width = width;
        }
        if let Some(height) = child.self_ideal_size.height {
            child.max_size.height = height;
            child.percent_reference.height = height;
        }
        child.min_size = SizeF::ZERO;
        child.self_ideal_size = OptionalSizeF::NONE;
        child
    }

    pub fn create_content_constraint(&self) -> LayoutConstraintF {
        self.content_constraint.unwrap_or_default()
    }

    /// Scale and width reference used to resolve padding and border.
    fn inset_reference(&self) -> (ScaleProperty, f32) {
        match self.layout_constraint {
            Some(constraint) => (
                constraint.scale_property,
                constraint
                    .parent_ideal_size
                    .width
                    .unwrap_or(constraint.percent_reference.width),
            ),
            None => (ScaleProperty::default(), 0.0),
        }
    }

    /// Padding plus border, every edge resolved (unset edges are zero).
    pub fn create_padding_and_border(&self) -> PaddingPropertyF {
        let (scale, width) = self.inset_reference();
        let padding = convert_to_padding_property_f(self.padding.as_ref(), &scale, width);
        let border = convert_to_padding_property_f(self.border_width.as_ref(), &scale, width);
        padding.combine(&border)
    }

    pub fn create_padding_without_border(&self) -> PaddingPropertyF {
        let (scale, width) = self.inset_reference();
        convert_to_padding_property_f(self.padding.as_ref(), &scale, width)
    }
}

#[cfg(test)]
#[path = "tests/layout_property_tests.rs"]
mod tests;
