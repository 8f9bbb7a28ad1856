//! Page scroll position with exponential ease-out.
//!
//! The page keeps a *target* offset (where input asked to go) and a rendered
//! *position*.  Each tick the remaining distance decays by `speed`, so jumps
//! such as "scroll to section" glide instead of teleporting.  Offsets are in
//! terminal rows from the top of the document.

/// Row-offset smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Offset currently painted.
    position: f64,
    /// Offset the animation is heading to.
    target: f64,
    /// Largest valid offset (document height minus viewport height).
    max: f64,
    /// Damping: `distance *= (1 - speed)` each tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            max: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Update the scrollable extent, rescaling the current offsets so the
    /// reader stays at the same relative place after a resize.
    pub fn set_max(&mut self, max: f64) {
        let max = max.max(0.0);
        if self.max > 0.0 && max != self.max {
            let k = max / self.max;
            self.position *= k;
            self.target *= k;
        }
        self.max = max;
        self.position = self.position.clamp(0.0, max);
        self.target = self.target.clamp(0.0, max);
    }

    /// Move the target by `delta` rows (wheel / arrow keys).
    pub fn scroll_by(&mut self, delta: f64) {
        self.target = (self.target + delta).clamp(0.0, self.max);
    }

    /// Glide to an absolute offset.
    pub fn scroll_to(&mut self, offset: f64) {
        self.target = offset.clamp(0.0, self.max);
    }

    /// Decay the remaining distance toward zero.  Call once per frame.
    pub fn tick(&mut self) {
        let remaining = self.target - self.position;
        if remaining.abs() < 0.05 {
            self.position = self.target;
        } else {
            self.position += remaining * self.speed;
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True while the painted offset has not reached the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}
