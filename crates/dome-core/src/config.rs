use crate::error::ConfigError;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Which container dimension the dome radius scales from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitBasis {
    /// Width on wide viewports (aspect >= 1.3), otherwise the smaller side.
    #[default]
    Auto,
    Min,
    Max,
    Width,
    Height,
}

/// Caller-supplied gallery options.
///
/// Field names deserialize from camelCase so a JS options object can be
/// handed over unchanged. Every field is optional on the wire.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomeConfig {
    pub fit: f32,
    pub fit_basis: FitBasis,
    pub min_radius: f32,
    /// `None` leaves the radius unbounded above.
    pub max_radius: Option<f32>,
    pub pad_factor: f32,
    pub overlay_blur_color: String,
    pub max_vertical_rotation_deg: f32,
    /// Pixels of pointer travel per degree of rotation.
    pub drag_sensitivity: f32,
    #[serde(deserialize_with = "whole_number")]
    pub enlarge_transition_ms: u64,
    #[serde(deserialize_with = "whole_number")]
    pub segments: usize,
    /// Clamped into 0..=1 when the inertia coefficients are derived.
    pub drag_dampening: f32,
    pub image_border_radius: String,
    pub opened_image_border_radius: String,
    pub grayscale: bool,
    /// CSS length; resolved to pixels by the front end.
    pub opened_image_width: Option<String>,
    pub opened_image_height: Option<String>,
}

/// JS numbers arrive as floats; round them instead of failing the mount.
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative number, got {value}"
        )));
    }
    T::try_from(value.round() as u64)
        .map_err(|_| serde::de::Error::custom(format!("{value} is out of range")))
}

impl Default for DomeConfig {
    fn default() -> Self {
        Self {
            fit: 1.0,
            fit_basis: FitBasis::Auto,
            min_radius: 2000.0,
            max_radius: None,
            pad_factor: 0.25,
            overlay_blur_color: "#060010".to_string(),
            max_vertical_rotation_deg: 5.0,
            drag_sensitivity: 20.0,
            enlarge_transition_ms: 300,
            segments: 32,
            drag_dampening: 2.0,
            image_border_radius: "30px".to_string(),
            opened_image_border_radius: "30px".to_string(),
            grayscale: false,
            opened_image_width: None,
            opened_image_height: None,
        }
    }
}

impl DomeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segments == 0 {
            return Err(ConfigError::ZeroSegments);
        }
        if !(self.drag_sensitivity.is_finite() && self.drag_sensitivity > 0.0) {
            return Err(ConfigError::NonPositiveSensitivity(self.drag_sensitivity));
        }
        let non_negative = [
            ("fit", self.fit),
            ("minRadius", self.min_radius),
            ("padFactor", self.pad_factor),
            ("maxVerticalRotationDeg", self.max_vertical_rotation_deg),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidNumber { field, value });
            }
        }
        if let Some(max) = self.max_radius {
            if max.is_nan() || max < 0.0 {
                return Err(ConfigError::InvalidNumber {
                    field: "maxRadius",
                    value: max,
                });
            }
            if self.min_radius > max {
                return Err(ConfigError::RadiusRange {
                    min: self.min_radius,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Dampening clamped into 0..=1; NaN counts as no dampening.
    #[inline]
    pub fn dampening(&self) -> f32 {
        if self.drag_dampening.is_nan() {
            0.0
        } else {
            self.drag_dampening.clamp(0.0, 1.0)
        }
    }

    #[inline]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.enlarge_transition_ms)
    }

    /// True when either custom overlay dimension was requested.
    #[inline]
    pub fn wants_resize(&self) -> bool {
        self.opened_image_width.is_some() || self.opened_image_height.is_some()
    }
}

/// Custom overlay size after the front end resolved the CSS lengths.
///
/// A missing dimension falls back to the frame's.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlaySize {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl OverlaySize {
    #[inline]
    pub fn is_custom(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}
