//! Layout properties specific to one container kind.
//!
//! A [`LayoutProperty`](crate::LayoutProperty) carries exactly one
//! [`ContainerProperty`] variant, fixed when the owning pattern creates it.
//! Typed access goes through [`TypedLayoutProperty`]; asking for the wrong
//! type yields `None` rather than a cast failure.

use crate::alignment::FlexAlign;
use crate::axis::Axis;
use crate::dimension::Dimension;

macro_rules! optional_fields {
    ($ty:ident { $($field:ident : $value:ty => $update:ident),* $(,)? }) => {
        impl $ty {
            $(
                pub fn $field(&self) -> Option<$value> {
                    self.$field.clone()
                }

                /// Returns whether the stored value changed.
                pub fn $update(&mut self, value: $value) -> bool {
                    if self.$field.as_ref() == Some(&value) {
                        return false;
                    }
                    self.$field = Some(value);
                    true
                }
            )*
        }
    };
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct LinearLayoutProperty {
    is_vertical: bool,
    space: Option<Dimension>,
    main_axis_align: Option<FlexAlign>,
    cross_axis_align: Option<FlexAlign>,
}

impl LinearLayoutProperty {
    pub fn new(is_vertical: bool) -> Self {
        Self {
            is_vertical,
            ..Self::default()
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.is_vertical
    }

    pub fn axis(&self) -> Axis {
        if self.is_vertical {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }
}

optional_fields!(LinearLayoutProperty {
    space: Dimension => update_space,
    main_axis_align: FlexAlign => update_main_axis_align,
    cross_axis_align: FlexAlign => update_cross_axis_align,
});

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ListLayoutProperty {
    list_direction: Option<Axis>,
    space: Option<Dimension>,
    lanes: Option<usize>,
    initial_index: Option<usize>,
}

optional_fields!(ListLayoutProperty {
    list_direction: Axis => update_list_direction,
    space: Dimension => update_space,
    lanes: usize => update_lanes,
    initial_index: usize => update_initial_index,
});

#[derive(Clone, Debug, PartialEq, Default)]
pub struct GridLayoutProperty {
    columns_template: Option<String>,
    rows_template: Option<String>,
}

optional_fields!(GridLayoutProperty {
    columns_template: String => update_columns_template,
    rows_template: String => update_rows_template,
});

impl GridLayoutProperty {
    fn has_template(template: &Option<String>) -> bool {
        template
            .as_deref()
            .map_or(false, |value| !value.trim().is_empty())
    }

    /// Rows advance vertically unless only a rows template is given.
    pub fn is_vertical(&self) -> bool {
        Self::has_template(&self.columns_template) || !Self::has_template(&self.rows_template)
    }

    /// Exactly one template set means the other axis scrolls.
    pub fn is_configured_scrollable(&self) -> bool {
        Self::has_template(&self.columns_template) != Self::has_template(&self.rows_template)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct GridItemLayoutProperty {
    column_span: Option<usize>,
}

optional_fields!(GridItemLayoutProperty {
    column_span: usize => update_column_span,
});

impl GridItemLayoutProperty {
    /// Number of cross-axis tracks the item covers, at least one.
    pub fn span(&self) -> usize {
        self.column_span.unwrap_or(1).max(1)
    }
}

/// Placement of a column inside a responsive grid row.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GridColLayoutProperty {
    span: Option<usize>,
    offset: Option<usize>,
    order: Option<usize>,
}

optional_fields!(GridColLayoutProperty {
    span: usize => update_span,
    offset: usize => update_offset,
    order: usize => update_order,
});

impl GridColLayoutProperty {
    /// Columns covered, at least one.
    pub fn span_or_default(&self) -> usize {
        self.span.unwrap_or(1).max(1)
    }

    pub fn offset_or_default(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    pub fn order_or_default(&self) -> usize {
        self.order.unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct SwiperLayoutProperty {
    direction: Option<Axis>,
    display_count: Option<usize>,
    index: Option<usize>,
    looping: Option<bool>,
}

optional_fields!(SwiperLayoutProperty {
    direction: Axis => update_direction,
    display_count: usize => update_display_count,
    index: usize => update_index,
    looping: bool => update_looping,
});

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ScrollLayoutProperty {
    axis: Option<Axis>,
}

optional_fields!(ScrollLayoutProperty {
    axis: Axis => update_axis,
});

/// The container-specific extension of a layout property.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ContainerProperty {
    #[default]
    None,
    Linear(LinearLayoutProperty),
    List(ListLayoutProperty),
    Grid(GridLayoutProperty),
    GridItem(GridItemLayoutProperty),
    GridCol(GridColLayoutProperty),
    Swiper(SwiperLayoutProperty),
    Scroll(ScrollLayoutProperty),
}

/// Implemented by every type that can live inside a [`ContainerProperty`].
pub trait TypedLayoutProperty: Sized + 'static {
    const NAME: &'static str;

    fn from_container(container: &ContainerProperty) -> Option<&Self>;

    fn from_container_mut(container: &mut ContainerProperty) -> Option<&mut Self>;
}

macro_rules! typed_property {
    ($ty:ident, $variant:ident) => {
        impl TypedLayoutProperty for $ty {
            const NAME: &'static str = stringify!($ty);

            fn from_container(container: &ContainerProperty) -> Option<&Self> {
                match container {
                    ContainerProperty::$variant(property) => Some(property),
                    _ => None,
                }
            }

            fn from_container_mut(container: &mut ContainerProperty) -> Option<&mut Self> {
                match container {
                    ContainerProperty::$variant(property) => Some(property),
                    _ => None,
                }
            }
        }

        impl From<$ty> for ContainerProperty {
            fn from(property: $ty) -> Self {
                ContainerProperty::$variant(property)
            }
        }
    };
}

typed_property!(LinearLayoutProperty, Linear);
typed_property!(ListLayoutProperty, List);
typed_property!(GridLayoutProperty, Grid);
typed_property!(GridItemLayoutProperty, GridItem);
typed_property!(GridColLayoutProperty, GridCol);
typed_property!(SwiperLayoutProperty, Swiper);
typed_property!(ScrollLayoutProperty, Scroll);
