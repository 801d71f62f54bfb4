//! Per-frame animation driver shared by inertial decay and transitions.
//!
//! An animation is stepped once per rendered frame with the elapsed time
//! since the previous frame and reports whether it wants another frame.
//! [`Driver`] owns at most one running animation: starting a new one or
//! calling [`Driver::cancel`] drops the previous run explicitly.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done,
}

pub trait FrameAnimation {
    /// State the animation writes into each frame.
    type Target: ?Sized;

    fn advance(&mut self, target: &mut Self::Target, dt: Duration) -> Step;
}

#[derive(Debug)]
pub struct Driver<A> {
    running: Option<A>,
}

impl<A> Default for Driver<A> {
    fn default() -> Self {
        Self { running: None }
    }
}

impl<A: FrameAnimation> Driver<A> {
    /// Start `anim`, superseding whatever was running.
    pub fn start(&mut self, anim: A) {
        self.running = Some(anim);
    }

    /// Returns true if a run was actually cancelled.
    pub fn cancel(&mut self) -> bool {
        self.running.take().is_some()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    #[inline]
    pub fn current(&self) -> Option<&A> {
        self.running.as_ref()
    }

    /// Advance the running animation one frame. `None` when idle; a run that
    /// reports [`Step::Done`] is dropped before returning.
    pub fn tick(&mut self, target: &mut A::Target, dt: Duration) -> Option<Step> {
        let anim = self.running.as_mut()?;
        let step = anim.advance(target, dt);
        if step == Step::Done {
            self.running = None;
        }
        Some(step)
    }
}

/// Time-based 0..=1 progress over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
}

impl Tween {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

impl FrameAnimation for Tween {
    type Target = f32;

    fn advance(&mut self, progress: &mut f32, dt: Duration) -> Step {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        *progress = self.progress();
        if self.is_finished() {
            Step::Done
        } else {
            Step::Continue
        }
    }
}
