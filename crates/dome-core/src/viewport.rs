use crate::config::{DomeConfig, FitBasis};
use crate::constants::{AUTO_BASIS_ASPECT, HEIGHT_GUARD_FACTOR, MIN_VIEWER_PAD_PX};
use smallvec::SmallVec;

/// Derived per resize; the single source of truth for dome scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    pub width: f32,
    pub height: f32,
    pub basis: f32,
    /// Whole pixels, clamped into the configured radius range.
    pub radius: f32,
    pub padding: f32,
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        fit_viewport(1.0, 1.0, &DomeConfig::default())
    }
}

#[inline]
fn floor_dimension(v: f32) -> f32 {
    if v.is_finite() {
        v.max(1.0)
    } else {
        1.0
    }
}

pub fn select_basis(width: f32, height: f32, basis: FitBasis) -> f32 {
    let min_dim = width.min(height);
    match basis {
        FitBasis::Min => min_dim,
        FitBasis::Max => width.max(height),
        FitBasis::Width => width,
        FitBasis::Height => height,
        FitBasis::Auto => {
            if width / height >= AUTO_BASIS_ASPECT {
                width
            } else {
                min_dim
            }
        }
    }
}

/// Radius and padding for a `width` x `height` container.
///
/// Dimensions below 1 (or non-finite) are floored to 1.
pub fn fit_viewport(width: f32, height: f32, config: &DomeConfig) -> ViewportMetrics {
    let w = floor_dimension(width);
    let h = floor_dimension(height);
    let basis = select_basis(w, h, config.fit_basis);

    let mut radius = (basis * config.fit).min(h * HEIGHT_GUARD_FACTOR);
    radius = radius.max(config.min_radius);
    if let Some(max) = config.max_radius {
        radius = radius.min(max);
    }
    let padding = (w.min(h) * config.pad_factor).round().max(MIN_VIEWER_PAD_PX);

    ViewportMetrics {
        width: w,
        height: h,
        basis,
        radius: radius.round(),
        padding,
    }
}

pub type StyleVars = SmallVec<[(&'static str, String); 8]>;

/// CSS custom properties published on the gallery root after every fit.
pub fn style_vars(metrics: &ViewportMetrics, config: &DomeConfig) -> StyleVars {
    let mut vars = StyleVars::new();
    vars.push(("--radius", format!("{}px", metrics.radius)));
    vars.push(("--viewer-pad", format!("{}px", metrics.padding)));
    vars.push(("--overlay-blur-color", config.overlay_blur_color.clone()));
    vars.push(("--tile-radius", config.image_border_radius.clone()));
    vars.push(("--enlarge-radius", config.opened_image_border_radius.clone()));
    vars.push((
        "--image-filter",
        if config.grayscale {
            "grayscale(1)".to_string()
        } else {
            "none".to_string()
        },
    ));
    vars.push(("--segments-x", config.segments.to_string()));
    vars.push(("--segments-y", config.segments.to_string()));
    vars
}
