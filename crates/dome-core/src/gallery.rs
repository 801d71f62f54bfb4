//! The gallery controller: one instance per mounted dome.
//!
//! Composes layout, viewport fitting, the drag engine and the transition
//! controller, and arbitrates between them:
//!
//! - no drag may start while a tile is focused;
//! - no tile may open while a drag is live, within 80 ms of a real drag's
//!   release, or while another transition holds the guard;
//! - no close is honoured within 250 ms of the open.
//!
//! Input methods return whether they changed anything; the front end renders
//! [`DomeGallery::view`] after any change and after every [`DomeGallery::tick`]
//! that reports progress.

use crate::config::{DomeConfig, OverlaySize};
use crate::error::ConfigError;
use crate::geometry::Rect;
use crate::image::DomeImage;
use crate::layout::{build_slots, TileSlot};
use crate::lock::InteractionLock;
use crate::rotation::{DragEngine, DragRelease, RotationState};
use crate::transition::{
    CloseOutcome, FocusedTile, OpenRequest, OverlayView, TransitionController, TransitionPhase,
    TransitionTick,
};
use crate::viewport::{fit_viewport, style_vars, StyleVars, ViewportMetrics};
use glam::Vec2;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

/// Which platform event reported a tap on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapSource {
    Click(PointerKind),
    PointerUp(PointerKind),
    TouchEnd,
}

impl TapSource {
    /// Touch taps come from pointer-up (synthetic clicks would double-fire),
    /// mouse and pen taps from click.
    pub fn accepted(self) -> bool {
        match self {
            TapSource::Click(kind) => kind != PointerKind::Touch,
            TapSource::PointerUp(kind) => kind == PointerKind::Touch,
            TapSource::TouchEnd => true,
        }
    }
}

/// Snapshot handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct DomeView {
    pub rotation: RotationState,
    pub sphere_transform: String,
    pub metrics: ViewportMetrics,
    pub style_vars: StyleVars,
    /// Mirrors the root's `data-enlarging` attribute.
    pub enlarging: bool,
    pub scroll_locked: bool,
    pub focused: Option<FocusedTile>,
    pub overlay: Option<OverlayView>,
}

pub type SelectCallback = Box<dyn FnMut(&str)>;

pub struct DomeGallery {
    config: DomeConfig,
    pool: Vec<DomeImage>,
    slots: Vec<TileSlot>,
    metrics: ViewportMetrics,
    overlay_size: OverlaySize,
    drag: DragEngine,
    transition: TransitionController,
    lock: InteractionLock,
    on_select: Option<SelectCallback>,
    last_tick: Option<Instant>,
}

impl std::fmt::Debug for DomeGallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomeGallery")
            .field("slots", &self.slots.len())
            .field("rotation", &self.drag.rotation())
            .field("phase", &self.transition.phase())
            .field("scroll_locked", &self.lock.scroll_locked())
            .finish()
    }
}

impl DomeGallery {
    pub fn new(images: Vec<DomeImage>, config: DomeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let slots = build_slots(&images, config.segments);
        log::info!(
            "[gallery] {} images on {} slots",
            images.len(),
            slots.len()
        );
        Ok(Self {
            metrics: fit_viewport(1.0, 1.0, &config),
            drag: DragEngine::new(&config),
            transition: TransitionController::new(config.transition_duration()),
            lock: InteractionLock::default(),
            pool: images,
            slots,
            overlay_size: OverlaySize::default(),
            on_select: None,
            last_tick: None,
            config,
        })
    }

    pub fn set_on_select(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    #[inline]
    pub fn config(&self) -> &DomeConfig {
        &self.config
    }

    #[inline]
    pub fn slots(&self) -> &[TileSlot] {
        &self.slots
    }

    #[inline]
    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    #[inline]
    pub fn rotation(&self) -> RotationState {
        self.drag.rotation()
    }

    #[inline]
    pub fn phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[inline]
    pub fn is_coasting(&self) -> bool {
        self.drag.is_coasting()
    }

    #[inline]
    pub fn focused_tile(&self) -> Option<usize> {
        self.transition.focused_tile()
    }

    #[inline]
    pub fn transition_in_progress(&self) -> bool {
        self.lock.transition_in_progress()
    }

    #[inline]
    pub fn scroll_locked(&self) -> bool {
        self.lock.scroll_locked()
    }

    /// Replace the image pool. Returns true when the layout was rebuilt.
    pub fn set_images(&mut self, images: Vec<DomeImage>) -> bool {
        if images == self.pool {
            return false;
        }
        self.pool = images;
        self.slots = build_slots(&self.pool, self.config.segments);
        true
    }

    pub fn set_segments(&mut self, segments: usize) -> Result<bool, ConfigError> {
        if segments == 0 {
            return Err(ConfigError::ZeroSegments);
        }
        if segments == self.config.segments {
            return Ok(false);
        }
        self.config.segments = segments;
        self.slots = build_slots(&self.pool, segments);
        Ok(true)
    }

    /// Custom overlay size, resolved to pixels by the caller.
    pub fn set_overlay_size(&mut self, size: OverlaySize) {
        self.overlay_size = size;
    }

    /// Refit the dome to a new container size. Rotation is left untouched;
    /// an open overlay follows the (possibly moved) frame.
    pub fn resize(&mut self, width: f32, height: f32, frame: Option<Rect>) -> ViewportMetrics {
        self.metrics = fit_viewport(width, height, &self.config);
        log::debug!(
            "[viewport] {}x{} -> radius={} pad={}",
            self.metrics.width,
            self.metrics.height,
            self.metrics.radius,
            self.metrics.padding
        );
        if let Some(frame) = frame {
            self.transition.reframe(frame);
        }
        self.metrics
    }

    pub fn pointer_down(&mut self, pos: Vec2) -> bool {
        if self.transition.focused_tile().is_some() {
            return false;
        }
        self.drag.begin(pos);
        true
    }

    pub fn pointer_move(&mut self, pos: Vec2) -> bool {
        if self.transition.focused_tile().is_some() {
            return false;
        }
        self.drag.update(pos)
    }

    /// `velocity` is the pointer layer's release velocity in px/ms.
    pub fn pointer_up(&mut self, pos: Vec2, velocity: Vec2, now: Instant) -> DragRelease {
        if self.transition.focused_tile().is_some() {
            self.drag.cancel();
            return DragRelease::default();
        }
        let release = self.drag.end(pos, velocity, now);
        self.release_idle_scroll_lock();
        release
    }

    pub fn pointer_cancel(&mut self) {
        self.drag.cancel();
        self.release_idle_scroll_lock();
    }

    /// A transition that finished under a live drag leaves the scroll lock to
    /// the drag's end.
    fn release_idle_scroll_lock(&mut self) {
        if !self.lock.transition_in_progress() {
            self.lock.unlock_scroll(self.drag.is_dragging());
        }
    }

    /// Try to open tile `index`. `tile_rect` and `frame_rect` are the measured
    /// root-relative rects; without a frame there is nothing to open into.
    pub fn tap_tile(
        &mut self,
        index: usize,
        source: TapSource,
        tile_rect: Option<Rect>,
        frame_rect: Option<Rect>,
        now: Instant,
    ) -> bool {
        if !source.accepted() || self.drag.is_dragging() {
            return false;
        }
        if self.drag.tap_vetoed(now) {
            log::debug!("[gallery] tap on tile {} vetoed after drag", index);
            return false;
        }
        let Some(slot) = self.slots.get(index) else {
            return false;
        };
        let Some(frame) = frame_rect else {
            log::warn!("[gallery] frame not measurable; ignoring tap");
            return false;
        };
        if !self.lock.try_acquire_transition() {
            return false;
        }
        self.lock.lock_scroll();
        let req = OpenRequest {
            tile: index,
            image: slot.image.clone(),
            base: slot.base_rotation(self.config.segments),
            dome: self.drag.rotation(),
            origin: tile_rect,
            frame,
            size: self.overlay_size,
        };
        self.transition.open(req, now);
        true
    }

    pub fn click_scrim(&mut self, now: Instant) -> bool {
        self.request_close(now)
    }

    pub fn key_down(&mut self, key: &str, now: Instant) -> bool {
        key == "Escape" && self.request_close(now)
    }

    pub fn request_close(&mut self, now: Instant) -> bool {
        match self.transition.close(now) {
            CloseOutcome::Animating => true,
            CloseOutcome::Reset => {
                self.lock.unlock_scroll(self.drag.is_dragging());
                self.lock.release_transition();
                true
            }
            CloseOutcome::NotOpen | CloseOutcome::TooSoon => false,
        }
    }

    /// The overlay's "Open" action: forward the focused image's source.
    pub fn select_current(&mut self) -> bool {
        let Some(src) = self
            .transition
            .session()
            .map(|s| s.image.src.clone())
            .filter(|src| !src.is_empty())
        else {
            return false;
        };
        log::info!("[gallery] selected {}", src);
        if let Some(cb) = self.on_select.as_mut() {
            cb(&src);
        }
        true
    }

    /// Advance inertia and transitions by one frame. Returns true when the
    /// view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let dt = match self.last_tick {
            Some(last) if now > last => now - last,
            _ => Duration::ZERO,
        };
        self.last_tick = Some(now);

        let rotated = self.drag.tick(dt);
        let transitioned = match self.transition.tick(dt) {
            TransitionTick::Idle => false,
            TransitionTick::Progressed => true,
            TransitionTick::Finished => {
                self.lock.unlock_scroll(self.drag.is_dragging());
                self.lock.release_transition();
                true
            }
        };
        rotated || transitioned
    }

    /// True while a frame loop is needed.
    pub fn is_animating(&self) -> bool {
        self.drag.is_coasting()
            || matches!(
                self.transition.phase(),
                TransitionPhase::Opening { .. } | TransitionPhase::Closing { .. }
            )
    }

    pub fn view(&self) -> DomeView {
        let rotation = self.drag.rotation();
        DomeView {
            rotation,
            sphere_transform: rotation.sphere_transform(),
            metrics: self.metrics,
            style_vars: style_vars(&self.metrics, &self.config),
            enlarging: self.transition.focused_tile().is_some(),
            scroll_locked: self.lock.scroll_locked(),
            focused: self.transition.focused(),
            overlay: self.transition.overlay(),
        }
    }

    /// Unmount: stop inertia, drop any session, release every guard.
    pub fn teardown(&mut self) {
        self.drag.stop_inertia();
        self.drag.cancel();
        self.transition.reset();
        self.lock.release_all();
        self.on_select = None;
        self.last_tick = None;
        log::info!("[gallery] torn down");
    }
}
