//! Drag-to-rotate model with inertial decay.
//!
//! # State machine
//!
//! `Idle -> Dragging -> (Idle | Coasting) -> Idle`
//!
//! - Dragging maps total pointer displacement since the press onto the
//!   rotation snapshot taken at the press, so sampling rate never affects the
//!   result.
//! - Releasing with enough velocity starts an [`InertiaRun`] on the shared
//!   frame driver; a new press always cancels it.
//!
//! # Invariants
//!
//! 1. `x` (tilt) stays inside `[-max_tilt, +max_tilt]`.
//! 2. `y` (spin) stays inside `(-180, 180]`.

use crate::animation::{Driver, FrameAnimation, Step};
use crate::config::DomeConfig;
use crate::constants::{
    FALLBACK_VELOCITY_GAIN, FALLBACK_VELOCITY_MAX, INERTIA_FRICTION_BASE, INERTIA_FRICTION_SPAN,
    INERTIA_MAX_FRAMES_BASE, INERTIA_MAX_FRAMES_SPAN, INERTIA_MAX_RELEASE_VELOCITY,
    INERTIA_ROTATION_DIVISOR, INERTIA_START_THRESHOLD, INERTIA_STOP_BASE, INERTIA_STOP_SPAN,
    INERTIA_VELOCITY_SCALE, REPORTED_VELOCITY_EPSILON, TAP_AFTER_DRAG_VETO_MS,
    TAP_MAX_DISTANCE_SQ_PX,
};
use glam::Vec2;
use instant::Instant;
use std::time::Duration;

/// Dome orientation in degrees: `x` tilts, `y` spins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
}

impl RotationState {
    pub fn sphere_transform(&self) -> String {
        format!(
            "translateZ(calc(var(--radius) * -1)) rotateX({}deg) rotateY({}deg)",
            self.x, self.y
        )
    }
}

/// Wrap into `(-180, 180]`.
#[inline]
pub fn wrap_angle_signed(deg: f32) -> f32 {
    let a = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if a <= -180.0 {
        a + 360.0
    } else {
        a
    }
}

/// Wrap into `[0, 360)`.
#[inline]
pub fn normalize_angle(deg: f32) -> f32 {
    let a = deg.rem_euclid(360.0);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Rotation limits shared by dragging and coasting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationLimits {
    pub max_tilt: f32,
}

impl RotationLimits {
    #[inline]
    pub fn constrain(&self, x: f32, y: f32) -> RotationState {
        RotationState {
            x: x.clamp(-self.max_tilt, self.max_tilt),
            y: wrap_angle_signed(y),
        }
    }
}

/// Baseline captured on press; lives until release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub start_pos: Vec2,
    pub start_rotation: RotationState,
    pub last_pos: Vec2,
    /// Squared displacement crossed the tap threshold at some point.
    pub moved: bool,
}

impl DragSession {
    #[inline]
    pub fn movement(&self) -> Vec2 {
        self.last_pos - self.start_pos
    }
}

/// Friction model derived from a 0..=1 dampening factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaParams {
    pub friction: f32,
    pub stop_threshold: f32,
    pub max_frames: u32,
}

impl InertiaParams {
    pub fn from_dampening(d: f32) -> Self {
        let d = d.clamp(0.0, 1.0);
        Self {
            friction: INERTIA_FRICTION_BASE + INERTIA_FRICTION_SPAN * d,
            stop_threshold: INERTIA_STOP_BASE - INERTIA_STOP_SPAN * d,
            max_frames: (INERTIA_MAX_FRAMES_BASE + INERTIA_MAX_FRAMES_SPAN * d).round() as u32,
        }
    }
}

/// One post-release coast. Frame-counted, so `dt` is ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaRun {
    pub velocity: Vec2,
    pub frames: u32,
    pub params: InertiaParams,
    pub limits: RotationLimits,
}

impl InertiaRun {
    /// `release` is pointer velocity in px/ms.
    pub fn new(release: Vec2, params: InertiaParams, limits: RotationLimits) -> Self {
        let clamped = release.clamp(
            Vec2::splat(-INERTIA_MAX_RELEASE_VELOCITY),
            Vec2::splat(INERTIA_MAX_RELEASE_VELOCITY),
        );
        Self {
            velocity: clamped * INERTIA_VELOCITY_SCALE,
            frames: 0,
            params,
            limits,
        }
    }
}

impl FrameAnimation for InertiaRun {
    type Target = RotationState;

    fn advance(&mut self, rotation: &mut RotationState, _dt: Duration) -> Step {
        self.velocity *= self.params.friction;
        let stop = self.params.stop_threshold;
        if self.velocity.x.abs() < stop && self.velocity.y.abs() < stop {
            return Step::Done;
        }
        self.frames += 1;
        if self.frames > self.params.max_frames {
            return Step::Done;
        }
        *rotation = self.limits.constrain(
            rotation.x - self.velocity.y / INERTIA_ROTATION_DIVISOR,
            rotation.y + self.velocity.x / INERTIA_ROTATION_DIVISOR,
        );
        Step::Continue
    }
}

/// Result of a pointer release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragRelease {
    /// The gesture crossed the tap threshold.
    pub moved: bool,
    pub inertia_started: bool,
}

#[derive(Debug)]
pub struct DragEngine {
    rotation: RotationState,
    limits: RotationLimits,
    sensitivity: f32,
    inertia_params: InertiaParams,
    session: Option<DragSession>,
    inertia: Driver<InertiaRun>,
    last_drag_end: Option<Instant>,
}

impl DragEngine {
    pub fn new(config: &DomeConfig) -> Self {
        Self {
            rotation: RotationState::default(),
            limits: RotationLimits {
                max_tilt: config.max_vertical_rotation_deg,
            },
            sensitivity: config.drag_sensitivity,
            inertia_params: InertiaParams::from_dampening(config.dampening()),
            session: None,
            inertia: Driver::default(),
            last_drag_end: None,
        }
    }

    #[inline]
    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    #[inline]
    pub fn limits(&self) -> RotationLimits {
        self.limits
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[inline]
    pub fn is_coasting(&self) -> bool {
        self.inertia.is_running()
    }

    #[inline]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    #[inline]
    pub fn last_drag_end(&self) -> Option<Instant> {
        self.last_drag_end
    }

    /// A tap this soon after a real drag is the drag's trailing click.
    pub fn tap_vetoed(&self, now: Instant) -> bool {
        self.last_drag_end
            .is_some_and(|t| now < t + Duration::from_millis(TAP_AFTER_DRAG_VETO_MS))
    }

    pub fn begin(&mut self, pos: Vec2) {
        if self.inertia.cancel() {
            log::debug!("[inertia] cancelled by new drag");
        }
        self.session = Some(DragSession {
            start_pos: pos,
            start_rotation: self.rotation,
            last_pos: pos,
            moved: false,
        });
        log::debug!("[drag] start at ({:.1},{:.1})", pos.x, pos.y);
    }

    /// Returns true when the rotation changed.
    pub fn update(&mut self, pos: Vec2) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.last_pos = pos;
        let d = session.movement();
        if !session.moved && d.length_squared() > TAP_MAX_DISTANCE_SQ_PX {
            session.moved = true;
        }
        let next = self.limits.constrain(
            session.start_rotation.x - d.y / self.sensitivity,
            session.start_rotation.y + d.x / self.sensitivity,
        );
        if next != self.rotation {
            self.rotation = next;
            true
        } else {
            false
        }
    }

    /// End the gesture. `reported` is the pointer layer's release velocity in
    /// px/ms; when it is negligible a velocity is synthesised from the total
    /// movement so platforms without velocity reporting still coast.
    pub fn end(&mut self, pos: Vec2, reported: Vec2, now: Instant) -> DragRelease {
        if self.session.is_none() {
            return DragRelease::default();
        }
        self.update(pos);
        let Some(session) = self.session.take() else {
            return DragRelease::default();
        };

        let mut velocity = reported;
        let movement = session.movement();
        if velocity.x.abs() < REPORTED_VELOCITY_EPSILON
            && velocity.y.abs() < REPORTED_VELOCITY_EPSILON
            && movement != Vec2::ZERO
        {
            velocity = (movement / self.sensitivity * FALLBACK_VELOCITY_GAIN).clamp(
                Vec2::splat(-FALLBACK_VELOCITY_MAX),
                Vec2::splat(FALLBACK_VELOCITY_MAX),
            );
        }

        let inertia_started =
            velocity.x.abs() > INERTIA_START_THRESHOLD || velocity.y.abs() > INERTIA_START_THRESHOLD;
        if inertia_started {
            self.inertia
                .start(InertiaRun::new(velocity, self.inertia_params, self.limits));
            log::debug!(
                "[inertia] start v=({:.3},{:.3}) px/ms",
                velocity.x,
                velocity.y
            );
        }
        if session.moved {
            self.last_drag_end = Some(now);
        }
        log::debug!(
            "[drag] end moved={} inertia={}",
            session.moved,
            inertia_started
        );
        DragRelease {
            moved: session.moved,
            inertia_started,
        }
    }

    /// Abandon the gesture without coasting (pointer cancel, focus loss).
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            log::debug!("[drag] cancelled");
        }
    }

    pub fn stop_inertia(&mut self) -> bool {
        self.inertia.cancel()
    }

    /// Advance inertia by one frame. Returns true when the rotation changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let before = self.rotation;
        match self.inertia.tick(&mut self.rotation, dt) {
            Some(Step::Done) => log::debug!("[inertia] settled"),
            Some(Step::Continue) | None => {}
        }
        before != self.rotation
    }
}
