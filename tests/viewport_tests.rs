// Host-side tests for viewport fitting and the published style variables.

use dome_core::{fit_viewport, select_basis, style_vars, DomeConfig, FitBasis};

fn unclamped() -> DomeConfig {
    DomeConfig {
        min_radius: 0.0,
        ..DomeConfig::default()
    }
}

fn var<'a>(vars: &'a dome_core::StyleVars, name: &str) -> &'a str {
    vars.iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| panic!("missing {name}"))
}

#[test]
fn auto_basis_switches_at_aspect_boundary() {
    assert_eq!(select_basis(1300.0, 1000.0, FitBasis::Auto), 1300.0);
    assert_eq!(select_basis(1299.0, 1000.0, FitBasis::Auto), 1000.0);
    assert_eq!(select_basis(800.0, 600.0, FitBasis::Auto), 800.0);
    assert_eq!(select_basis(700.0, 600.0, FitBasis::Auto), 600.0);
}

#[test]
fn explicit_bases() {
    assert_eq!(select_basis(800.0, 600.0, FitBasis::Min), 600.0);
    assert_eq!(select_basis(800.0, 600.0, FitBasis::Max), 800.0);
    assert_eq!(select_basis(800.0, 600.0, FitBasis::Width), 800.0);
    assert_eq!(select_basis(800.0, 600.0, FitBasis::Height), 600.0);
}

#[test]
fn widening_the_container_is_capped_by_height() {
    let cfg = unclamped();
    let before = fit_viewport(800.0, 600.0, &cfg);
    assert_eq!(before.basis, 800.0);
    assert_eq!(before.radius, 800.0);

    // 1600 wide would double the radius; the height guard holds it at 600 * 1.35.
    let after = fit_viewport(1600.0, 600.0, &cfg);
    assert_eq!(after.basis, 1600.0);
    assert_eq!(after.radius, 810.0);
}

#[test]
fn radius_honours_min_and_max() {
    let default = fit_viewport(800.0, 600.0, &DomeConfig::default());
    assert_eq!(default.radius, 2000.0);

    let capped = DomeConfig {
        min_radius: 0.0,
        max_radius: Some(500.0),
        ..DomeConfig::default()
    };
    assert_eq!(fit_viewport(800.0, 600.0, &capped).radius, 500.0);

    // No max: only the height guard bounds the radius.
    assert_eq!(fit_viewport(4000.0, 4000.0, &unclamped()).radius, 4000.0);
}

#[test]
fn fit_factor_scales_basis() {
    let cfg = DomeConfig {
        fit: 0.5,
        ..unclamped()
    };
    assert_eq!(fit_viewport(800.0, 600.0, &cfg).radius, 400.0);
}

#[test]
fn degenerate_sizes_floor_to_one() {
    let m = fit_viewport(0.0, -5.0, &unclamped());
    assert_eq!((m.width, m.height), (1.0, 1.0));
    assert_eq!(m.radius, 1.0);
    assert_eq!(m.padding, 8.0);

    let nan = fit_viewport(f32::NAN, f32::INFINITY, &unclamped());
    assert_eq!((nan.width, nan.height), (1.0, 1.0));
}

#[test]
fn padding_scales_with_smaller_side() {
    assert_eq!(fit_viewport(800.0, 600.0, &unclamped()).padding, 150.0);
    assert_eq!(fit_viewport(20.0, 20.0, &unclamped()).padding, 8.0);
}

#[test]
fn style_vars_reflect_metrics_and_config() {
    let cfg = DomeConfig {
        grayscale: true,
        segments: 24,
        ..unclamped()
    };
    let m = fit_viewport(800.0, 600.0, &cfg);
    let vars = style_vars(&m, &cfg);
    assert_eq!(var(&vars, "--radius"), "800px");
    assert_eq!(var(&vars, "--viewer-pad"), "150px");
    assert_eq!(var(&vars, "--overlay-blur-color"), "#060010");
    assert_eq!(var(&vars, "--tile-radius"), "30px");
    assert_eq!(var(&vars, "--enlarge-radius"), "30px");
    assert_eq!(var(&vars, "--image-filter"), "grayscale(1)");
    assert_eq!(var(&vars, "--segments-x"), "24");
    assert_eq!(var(&vars, "--segments-y"), "24");

    let plain = style_vars(&m, &unclamped());
    assert_eq!(var(&plain, "--image-filter"), "none");
}
