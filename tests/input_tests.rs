// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use dome_core::PointerKind;
use glam::Vec2;
use input::*;

#[test]
fn pointer_kind_from_pointer_type() {
    assert_eq!(pointer_kind("touch"), PointerKind::Touch);
    assert_eq!(pointer_kind("pen"), PointerKind::Pen);
    assert_eq!(pointer_kind("mouse"), PointerKind::Mouse);
    // Unknown or empty types behave like a mouse
    assert_eq!(pointer_kind(""), PointerKind::Mouse);
}

#[test]
fn velocity_from_two_samples() {
    let mut t = VelocityTracker::default();
    t.push(Vec2::new(0.0, 0.0), 0.0);
    t.push(Vec2::new(10.0, -5.0), 10.0);
    assert_eq!(t.velocity_at(10.0), Vec2::new(1.0, -0.5));
}

#[test]
fn velocity_needs_two_samples() {
    let mut t = VelocityTracker::default();
    assert_eq!(t.velocity_at(0.0), Vec2::ZERO);
    t.push(Vec2::new(3.0, 3.0), 5.0);
    assert_eq!(t.velocity_at(5.0), Vec2::ZERO);
}

#[test]
fn velocity_is_zero_after_resting() {
    let mut t = VelocityTracker::default();
    t.push(Vec2::ZERO, 0.0);
    t.push(Vec2::new(50.0, 0.0), 20.0);
    assert_eq!(t.velocity_at(200.0), Vec2::ZERO);
}

#[test]
fn old_samples_fall_out_of_window() {
    let mut t = VelocityTracker::default();
    t.push(Vec2::ZERO, 0.0);
    t.push(Vec2::new(100.0, 0.0), 50.0);
    t.push(Vec2::new(200.0, 0.0), 150.0);
    // The sample at t=0 is more than 100 ms older than the newest.
    assert_eq!(t.velocity_at(150.0), Vec2::new(1.0, 0.0));
}

#[test]
fn duplicate_timestamp_replaces_last_sample() {
    let mut t = VelocityTracker::default();
    t.push(Vec2::ZERO, 0.0);
    t.push(Vec2::new(10.0, 0.0), 10.0);
    t.push(Vec2::new(20.0, 0.0), 10.0);
    assert_eq!(t.velocity_at(10.0), Vec2::new(2.0, 0.0));
}

#[test]
fn reset_clears_samples() {
    let mut t = VelocityTracker::default();
    t.push(Vec2::ZERO, 0.0);
    t.push(Vec2::new(10.0, 0.0), 10.0);
    t.reset();
    assert_eq!(t.velocity_at(10.0), Vec2::ZERO);
}

#[test]
fn sample_count_is_capped() {
    let mut t = VelocityTracker::default();
    for i in 0..20 {
        t.push(Vec2::new(i as f32, 0.0), i as f64);
    }
    // Still a steady 1 px/ms over the retained samples.
    assert_eq!(t.velocity_at(19.0), Vec2::new(1.0, 0.0));
}
