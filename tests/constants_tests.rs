// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use dome_core::constants as tuning;

#[test]
#[allow(clippy::assertions_on_constants)]
fn velocity_sampling_is_consistent() {
    // A pointer must rest for less than the window before the estimate is dropped
    assert!(VELOCITY_STALE_MS > 0.0);
    assert!(VELOCITY_STALE_MS <= VELOCITY_WINDOW_MS);
    assert!(VELOCITY_MAX_SAMPLES >= 2);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn gesture_windows_are_ordered() {
    // The trailing-click veto must expire well before a close is allowed
    assert!(tuning::TAP_AFTER_DRAG_VETO_MS < tuning::OPEN_DWELL_MS);
    assert!(tuning::TAP_MAX_DISTANCE_SQ_PX > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn inertia_coefficients_stay_decaying() {
    // Friction below 1 and a positive stop threshold at full dampening
    assert!(tuning::INERTIA_FRICTION_BASE + tuning::INERTIA_FRICTION_SPAN < 1.0);
    assert!(tuning::INERTIA_STOP_BASE - tuning::INERTIA_STOP_SPAN > 0.0);
    assert!(tuning::INERTIA_MAX_FRAMES_SPAN > 0.0);
    assert!(tuning::FALLBACK_VELOCITY_MAX <= tuning::INERTIA_MAX_RELEASE_VELOCITY);
}

#[test]
fn lattice_rows_are_staggered() {
    assert_eq!(tuning::EVEN_COLUMN_ROWS.len(), tuning::ROWS_PER_COLUMN);
    assert_eq!(tuning::ODD_COLUMN_ROWS.len(), tuning::ROWS_PER_COLUMN);
    for (even, odd) in tuning::EVEN_COLUMN_ROWS.iter().zip(tuning::ODD_COLUMN_ROWS) {
        assert_eq!(odd - even, 1);
    }
}

#[test]
fn class_names_are_prefixed() {
    for class in [
        ROOT_CLASS,
        MAIN_CLASS,
        STAGE_CLASS,
        SPHERE_CLASS,
        ITEM_CLASS,
        ITEM_IMAGE_CLASS,
        VIEWER_CLASS,
        SCRIM_CLASS,
        FRAME_CLASS,
        ENLARGE_CLASS,
        ENLARGE_CLOSING_CLASS,
        SCROLL_LOCK_CLASS,
    ] {
        assert!(class.starts_with("dg-"), "{class}");
    }
}

#[test]
fn stylesheet_covers_every_class() {
    let css = include_str!("../src/dome.css");
    for class in [
        ROOT_CLASS,
        MAIN_CLASS,
        STAGE_CLASS,
        SPHERE_CLASS,
        ITEM_CLASS,
        ITEM_IMAGE_CLASS,
        VIEWER_CLASS,
        SCRIM_CLASS,
        FRAME_CLASS,
        OVERLAY_BLUR_CLASS,
        ENLARGE_CLASS,
        ENLARGE_CLOSING_CLASS,
        ACTION_BAR_CLASS,
        CAPTION_CLASS,
        OPEN_BUTTON_CLASS,
        SCROLL_LOCK_CLASS,
    ] {
        assert!(css.contains(&format!(".{class}")), "no rule for {class}");
    }
    assert!(css.contains(&format!("[{ENLARGING_ATTR}=\"true\"]")));
}

#[test]
fn root_class_is_a_plain_selector_token() {
    // Unmount looks up remaining roots with `.{ROOT_CLASS}` before dropping
    // the shared stylesheet.
    assert!(ROOT_CLASS
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-'));
    assert!(!STYLESHEET_ID.is_empty());
    assert!(!STYLESHEET_ID.contains(' '));
}
