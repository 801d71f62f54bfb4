//! Open/close transition between a dome tile and the full-frame overlay.
//!
//! # State machine
//!
//! ```text
//! Closed -> Opening{Transform} -> [Opening{Resize}] -> Open
//!        -> Closing{Shrink} -> Closing{FadeIn} -> Closed
//! ```
//!
//! - Opening: the overlay is laid out at the frame rect and transformed so it
//!   first covers the tile exactly, then eases to identity while fading in.
//!   A custom overlay size adds a second stage that resizes and re-centres it.
//! - Closing: a non-interactive clone starts at the overlay's last on-screen
//!   rect and shrinks back onto the tile's original rect while fading out; the
//!   tile then fades back in. The gallery releases its transition guard only
//!   after that fade completes.
//!
//! The controller never holds the guard itself; [`DomeGallery`](crate::DomeGallery)
//! acquires it before [`TransitionController::open`] and releases it when
//! [`TransitionController::tick`] reports [`TransitionTick::Finished`].

use crate::animation::{Driver, Step, Tween};
use crate::config::OverlaySize;
use crate::constants::{FALLBACK_CAPTION, OPEN_DWELL_MS, TILE_FADE_IN_MS};
use crate::geometry::{Easing, Rect, Transform2D};
use crate::image::ImageDescriptor;
use crate::layout::BaseRotation;
use crate::rotation::{normalize_angle, RotationState};
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenStage {
    Transform,
    Resize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseStage {
    Shrink,
    FadeIn,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionPhase {
    Closed,
    Opening { stage: OpenStage, progress: f32 },
    Open,
    Closing { stage: CloseStage, progress: f32 },
}

/// Extra rotation applied to the focused slot so it faces the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationDelta {
    pub x: f32,
    pub y: f32,
}

/// Rotation that cancels the dome's spin and tilt for a slot at `base`.
pub fn rotation_delta(base: BaseRotation, dome: RotationState) -> RotationDelta {
    let parent_y = normalize_angle(base.rotate_y);
    let global_y = normalize_angle(dome.y);
    let mut y = -((parent_y + global_y) % 360.0);
    if y < -180.0 {
        y += 360.0;
    }
    RotationDelta {
        x: -base.rotate_x - dome.x,
        y,
    }
}

/// Everything measured when a tile is opened.
#[derive(Clone, Debug, PartialEq)]
pub struct OpenRequest {
    pub tile: usize,
    pub image: ImageDescriptor,
    pub base: BaseRotation,
    pub dome: RotationState,
    /// Tile rect at open time; `None` when it could not be measured.
    pub origin: Option<Rect>,
    pub frame: Rect,
    pub size: OverlaySize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionSession {
    pub tile: usize,
    pub image: ImageDescriptor,
    pub origin: Option<Rect>,
    pub frame: Rect,
    pub size: OverlaySize,
    pub rotation_delta: RotationDelta,
    pub opened_at: Instant,
    closing_from: Option<Rect>,
}

impl TransitionSession {
    /// Resize-stage destination, if a custom size was requested.
    pub fn resize_target(&self) -> Option<Rect> {
        if !self.size.is_custom() {
            return None;
        }
        let w = self.size.width.unwrap_or(self.frame.width);
        let h = self.size.height.unwrap_or(self.frame.height);
        Some(self.frame.centered(w, h))
    }

    fn settled_rect(&self) -> Rect {
        self.resize_target().unwrap_or(self.frame)
    }
}

/// Render description of the overlay or its closing clone.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayView {
    pub tile: usize,
    pub src: String,
    pub caption: String,
    /// Layout box, relative to the gallery root.
    pub rect: Rect,
    pub transform: Transform2D,
    pub opacity: f32,
    /// The clone used while closing: no action bar, no pointer events.
    pub closing: bool,
}

impl OverlayView {
    /// Rect the overlay currently covers on screen.
    pub fn visual_rect(&self) -> Rect {
        self.transform.apply(&self.rect)
    }
}

/// Render description of the tile being opened or restored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusedTile {
    pub index: usize,
    pub hidden: bool,
    /// Explicit opacity while fading back in.
    pub opacity: Option<f32>,
    pub rotation_delta: RotationDelta,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    NotOpen,
    /// Inside the dwell window after open.
    TooSoon,
    Animating,
    /// No origin rect to return to; state was reset without animation.
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionTick {
    Idle,
    Progressed,
    /// The close sequence completed; the guard may be released.
    Finished,
}

#[derive(Debug)]
pub struct TransitionController {
    phase: TransitionPhase,
    session: Option<TransitionSession>,
    tween: Driver<Tween>,
    duration: Duration,
}

impl TransitionController {
    pub fn new(duration: Duration) -> Self {
        Self {
            phase: TransitionPhase::Closed,
            session: None,
            tween: Driver::default(),
            duration,
        }
    }

    #[inline]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    #[inline]
    pub fn session(&self) -> Option<&TransitionSession> {
        self.session.as_ref()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase != TransitionPhase::Closed
    }

    /// The tile that currently owns the overlay. Clear once the tile is
    /// fading back in, so drags resume while the guard is still held.
    pub fn focused_tile(&self) -> Option<usize> {
        match self.phase {
            TransitionPhase::Closed
            | TransitionPhase::Closing {
                stage: CloseStage::FadeIn,
                ..
            } => None,
            _ => self.session.as_ref().map(|s| s.tile),
        }
    }

    /// Start opening. The caller must already hold the transition guard.
    pub fn open(&mut self, req: OpenRequest, now: Instant) {
        let rotation_delta = rotation_delta(req.base, req.dome);
        log::info!(
            "[transition] open tile {} ({}) delta=({:.1},{:.1})",
            req.tile,
            req.image.src,
            rotation_delta.x,
            rotation_delta.y
        );
        self.session = Some(TransitionSession {
            tile: req.tile,
            image: req.image,
            origin: req.origin,
            frame: req.frame,
            size: req.size,
            rotation_delta,
            opened_at: now,
            closing_from: None,
        });
        self.phase = TransitionPhase::Opening {
            stage: OpenStage::Transform,
            progress: 0.0,
        };
        self.tween.start(Tween::new(self.duration));
    }

    pub fn dwell_elapsed(&self, now: Instant) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| now >= s.opened_at + Duration::from_millis(OPEN_DWELL_MS))
    }

    pub fn close(&mut self, now: Instant) -> CloseOutcome {
        if !matches!(
            self.phase,
            TransitionPhase::Opening { .. } | TransitionPhase::Open
        ) {
            return CloseOutcome::NotOpen;
        }
        if !self.dwell_elapsed(now) {
            log::debug!("[transition] close ignored inside dwell window");
            return CloseOutcome::TooSoon;
        }
        let from = self.overlay().map(|o| o.visual_rect());
        let Some(session) = self.session.as_mut() else {
            return CloseOutcome::NotOpen;
        };
        if session.origin.is_none() {
            log::warn!("[transition] no origin rect for tile {}; resetting", session.tile);
            self.reset();
            return CloseOutcome::Reset;
        }
        session.closing_from = from.or(Some(session.frame));
        self.phase = TransitionPhase::Closing {
            stage: CloseStage::Shrink,
            progress: 0.0,
        };
        self.tween.start(Tween::new(self.duration));
        log::debug!("[transition] closing tile {}", session.tile);
        CloseOutcome::Animating
    }

    /// Drop any session immediately, without animation.
    pub fn reset(&mut self) {
        self.tween.cancel();
        self.session = None;
        self.phase = TransitionPhase::Closed;
    }

    /// The frame moved or resized: keep the overlay aligned with it.
    pub fn reframe(&mut self, frame: Rect) {
        if let Some(session) = self.session.as_mut() {
            session.frame = frame;
        }
    }

    pub fn tick(&mut self, dt: Duration) -> TransitionTick {
        let mut progress = match self.phase {
            TransitionPhase::Opening { progress, .. } | TransitionPhase::Closing { progress, .. } => {
                progress
            }
            TransitionPhase::Closed | TransitionPhase::Open => return TransitionTick::Idle,
        };
        let Some(step) = self.tween.tick(&mut progress, dt) else {
            return TransitionTick::Idle;
        };
        if step == Step::Done {
            return self.finish_stage();
        }
        if let TransitionPhase::Opening { progress: p, .. }
        | TransitionPhase::Closing { progress: p, .. } = &mut self.phase
        {
            *p = progress;
        }
        TransitionTick::Progressed
    }

    fn finish_stage(&mut self) -> TransitionTick {
        let has_resize = self
            .session
            .as_ref()
            .is_some_and(|s| s.resize_target().is_some());
        match self.phase {
            TransitionPhase::Opening {
                stage: OpenStage::Transform,
                ..
            } if has_resize => {
                self.phase = TransitionPhase::Opening {
                    stage: OpenStage::Resize,
                    progress: 0.0,
                };
                self.tween.start(Tween::new(self.duration));
                TransitionTick::Progressed
            }
            TransitionPhase::Opening { .. } => {
                self.phase = TransitionPhase::Open;
                TransitionTick::Progressed
            }
            TransitionPhase::Closing {
                stage: CloseStage::Shrink,
                ..
            } => {
                self.phase = TransitionPhase::Closing {
                    stage: CloseStage::FadeIn,
                    progress: 0.0,
                };
                self.tween
                    .start(Tween::new(Duration::from_millis(TILE_FADE_IN_MS)));
                TransitionTick::Progressed
            }
            TransitionPhase::Closing {
                stage: CloseStage::FadeIn,
                ..
            } => {
                if let Some(s) = self.session.take() {
                    log::info!("[transition] tile {} restored", s.tile);
                }
                self.phase = TransitionPhase::Closed;
                TransitionTick::Finished
            }
            TransitionPhase::Closed | TransitionPhase::Open => TransitionTick::Idle,
        }
    }

    pub fn overlay(&self) -> Option<OverlayView> {
        let s = self.session.as_ref()?;
        let (rect, transform, opacity, closing) = match self.phase {
            TransitionPhase::Opening {
                stage: OpenStage::Transform,
                progress,
            } => {
                let e = Easing::Ease.apply(progress);
                let start = s
                    .origin
                    .map(|o| Transform2D::mapping(&s.frame, &o))
                    .unwrap_or(Transform2D::IDENTITY);
                (
                    s.frame,
                    start.lerp(&Transform2D::IDENTITY, e),
                    e,
                    false,
                )
            }
            TransitionPhase::Opening {
                stage: OpenStage::Resize,
                progress,
            } => {
                let e = Easing::Ease.apply(progress);
                (
                    s.frame.lerp(&s.settled_rect(), e),
                    Transform2D::IDENTITY,
                    1.0,
                    false,
                )
            }
            TransitionPhase::Open => (s.settled_rect(), Transform2D::IDENTITY, 1.0, false),
            TransitionPhase::Closing {
                stage: CloseStage::Shrink,
                progress,
            } => {
                let e = Easing::EaseOut.apply(progress);
                let from = s.closing_from.unwrap_or(s.frame);
                let to = s.origin.unwrap_or(from);
                (from.lerp(&to, e), Transform2D::IDENTITY, 1.0 - e, true)
            }
            TransitionPhase::Closing {
                stage: CloseStage::FadeIn,
                ..
            }
            | TransitionPhase::Closed => return None,
        };
        let caption = if s.image.alt.is_empty() {
            FALLBACK_CAPTION.to_string()
        } else {
            s.image.alt.clone()
        };
        Some(OverlayView {
            tile: s.tile,
            src: s.image.src.clone(),
            caption,
            rect,
            transform,
            opacity,
            closing,
        })
    }

    pub fn focused(&self) -> Option<FocusedTile> {
        let s = self.session.as_ref()?;
        match self.phase {
            TransitionPhase::Closed => None,
            TransitionPhase::Closing {
                stage: CloseStage::FadeIn,
                progress,
            } => Some(FocusedTile {
                index: s.tile,
                hidden: false,
                opacity: Some(Easing::EaseOut.apply(progress)),
                rotation_delta: RotationDelta::default(),
            }),
            _ => Some(FocusedTile {
                index: s.tile,
                hidden: true,
                opacity: None,
                rotation_delta: s.rotation_delta,
            }),
        }
    }
}
