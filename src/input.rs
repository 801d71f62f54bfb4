use crate::constants::{VELOCITY_MAX_SAMPLES, VELOCITY_STALE_MS, VELOCITY_WINDOW_MS};
use dome_core::PointerKind;
use glam::Vec2;
use std::collections::VecDeque;

#[inline]
pub fn pointer_kind(pointer_type: &str) -> PointerKind {
    match pointer_type {
        "touch" => PointerKind::Touch,
        "pen" => PointerKind::Pen,
        _ => PointerKind::Mouse,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    pos: Vec2,
    t_ms: f64,
}

/// Estimates release velocity (px/ms) from the last few pointer moves,
/// since browsers do not report one.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn push(&mut self, pos: Vec2, t_ms: f64) {
        if let Some(last) = self.samples.back() {
            // Out-of-order or duplicate timestamps carry no velocity information.
            if t_ms <= last.t_ms {
                self.samples.pop_back();
            }
        }
        self.samples.push_back(Sample { pos, t_ms });
        while self.samples.len() > VELOCITY_MAX_SAMPLES {
            self.samples.pop_front();
        }
        while self
            .samples
            .front()
            .is_some_and(|s| t_ms - s.t_ms > VELOCITY_WINDOW_MS)
        {
            self.samples.pop_front();
        }
    }

    /// Velocity as of `release_ms`; zero if the pointer rested before release.
    pub fn velocity_at(&self, release_ms: f64) -> Vec2 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return Vec2::ZERO;
        };
        if release_ms - last.t_ms > VELOCITY_STALE_MS {
            return Vec2::ZERO;
        }
        let dt = (last.t_ms - first.t_ms) as f32;
        if dt <= 0.0 {
            return Vec2::ZERO;
        }
        (last.pos - first.pos) / dt
    }
}
