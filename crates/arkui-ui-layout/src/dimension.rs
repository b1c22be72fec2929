//! Length units and the scale used to resolve them to pixels.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DimensionUnit {
    #[default]
    Px,
    /// Virtual pixels, scaled by [`ScaleProperty::vp_scale`].
    Vp,
    /// Font pixels, scaled by [`ScaleProperty::fp_scale`].
    Fp,
    /// Logical pixels, scaled by [`ScaleProperty::lpx_scale`].
    Lpx,
    /// Fraction of a reference length, `0.5` meaning half.
    Percent,
}

/// Scale factors inherited down the tree through layout constraints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleProperty {
    pub vp_scale: f32,
    pub fp_scale: f32,
    pub lpx_scale: f32,
}

impl Default for ScaleProperty {
    fn default() -> Self {
        Self {
            vp_scale: 1.0,
            fp_scale: 1.0,
            lpx_scale: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Dimension {
    pub value: f32,
    pub unit: DimensionUnit,
}

impl Dimension {
    pub const fn new(value: f32, unit: DimensionUnit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: f32) -> Self {
        Self::new(value, DimensionUnit::Px)
    }

    pub const fn vp(value: f32) -> Self {
        Self::new(value, DimensionUnit::Vp)
    }

    pub const fn fp(value: f32) -> Self {
        Self::new(value, DimensionUnit::Fp)
    }

    pub const fn lpx(value: f32) -> Self {
        Self::new(value, DimensionUnit::Lpx)
    }

    pub const fn percent(fraction: f32) -> Self {
        Self::new(fraction, DimensionUnit::Percent)
    }

    /// Resolves to pixels. A percentage without a finite reference has no
    /// pixel value.
    pub fn convert_to_px(&self, scale: &ScaleProperty, percent_reference: f32) -> Option<f32> {
        match self.unit {
            DimensionUnit::Px => Some(self.value),
            DimensionUnit::Vp => Some(self.value * scale.vp_scale),
            DimensionUnit::Fp => Some(self.value * scale.fp_scale),
            DimensionUnit::Lpx => Some(self.value * scale.lpx_scale),
            DimensionUnit::Percent => {
                if percent_reference.is_finite() && percent_reference >= 0.0 {
                    Some(self.value * percent_reference)
                } else {
                    None
                }
            }
        }
    }
}
