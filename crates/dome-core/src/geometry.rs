//! Screen-space rectangles, 2D overlay transforms and easing curves.
//!
//! All rects handled by the gallery are expressed relative to the gallery's
//! root element, so the front end converts client rects once on the way in.

use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Re-express `self` in the coordinate space whose origin is `container`'s top-left.
    #[inline]
    pub fn relative_to(&self, container: &Rect) -> Rect {
        Rect::new(
            self.left - container.left,
            self.top - container.top,
            self.width,
            self.height,
        )
    }

    /// A `width` x `height` rect centred inside `self`.
    pub fn centered(&self, width: f32, height: f32) -> Rect {
        Rect::new(
            self.left + (self.width - width) / 2.0,
            self.top + (self.height - height) / 2.0,
            width,
            height,
        )
    }

    pub fn lerp(&self, to: &Rect, t: f32) -> Rect {
        let o = self.origin().lerp(to.origin(), t);
        let s = self.size().lerp(to.size(), t);
        Rect::new(o.x, o.y, s.x, s.y)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// `translate(..) scale(..)` with a top-left transform origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub translate: Vec2,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        translate: Vec2::ZERO,
        scale: Vec2::ONE,
    };

    /// Transform that makes a box laid out at `frame` appear at `target`.
    pub fn mapping(frame: &Rect, target: &Rect) -> Self {
        let fw = frame.width.max(1.0);
        let fh = frame.height.max(1.0);
        Self {
            translate: target.origin() - frame.origin(),
            scale: Vec2::new(target.width / fw, target.height / fh),
        }
    }

    pub fn lerp(&self, to: &Transform2D, t: f32) -> Self {
        Self {
            translate: self.translate.lerp(to.translate, t),
            scale: self.scale.lerp(to.scale, t),
        }
    }

    /// Where a box laid out at `rect` ends up on screen.
    pub fn apply(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.left + self.translate.x,
            rect.top + self.translate.y,
            rect.width * self.scale.x,
            rect.height * self.scale.y,
        )
    }

    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}, {})",
            self.translate.x, self.translate.y, self.scale.x, self.scale.y
        )
    }
}

/// CSS timing curves, evaluated on the core side because the front end
/// renders each frame's interpolated state directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// `ease`
    Ease,
    /// `ease-out`
    EaseOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }
    let bez = |a: f32, b: f32, t: f32| {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    };
    let d_bez = |a: f32, b: f32, t: f32| {
        let u = 1.0 - t;
        3.0 * u * u * a + 6.0 * u * t * (b - a) + 3.0 * t * t * (1.0 - b)
    };
    // Newton first, bisection when the slope flattens out.
    let mut t = x;
    for _ in 0..8 {
        let err = bez(x1, x2, t) - x;
        if err.abs() < 1e-5 {
            return bez(y1, y2, t);
        }
        let d = d_bez(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    t = x;
    for _ in 0..32 {
        let v = bez(x1, x2, t);
        if (v - x).abs() < 1e-5 {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    bez(y1, y2, t)
}
