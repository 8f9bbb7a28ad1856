//! Normalized scroll progress and the scroll-region geometry that produces it.

use serde::Serialize;

/// Scroll progress through the scroll region, always within `[0, 1]`.
///
/// Construction clamps: overscroll never becomes an error.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    pub const START: Progress = Progress(0.0);
    pub const END: Progress = Progress(1.0);

    /// Clamp `value` into `[0, 1]`.  NaN maps to `0`.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// The span of absolute scroll offsets that maps onto progress `0..=1`.
///
/// On the page this is the tall section region that follows the hero screen:
/// it starts once the hero has scrolled away and ends when the region's bottom
/// edge meets the bottom of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    /// Absolute offset at which progress is `0`.
    pub start: f64,
    /// Absolute offset at which progress is `1`.
    pub end: f64,
}

impl ScrollRegion {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Region for a page whose hero is `hero_height` tall, followed by a
    /// region of `region_height` viewed through a viewport of
    /// `viewport_height`.
    pub fn after_hero(hero_height: f64, region_height: f64, viewport_height: f64) -> Self {
        let scrollable = (region_height - viewport_height).max(0.0);
        Self::new(hero_height, hero_height + scrollable)
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// `(offset - start) / (end - start)`, clamped.  A degenerate region
    /// reports `0` before its start and `1` from its start onwards.
    pub fn progress_at(&self, offset: f64) -> Progress {
        let len = self.len();
        if len <= 0.0 {
            return if offset < self.start {
                Progress::START
            } else {
                Progress::END
            };
        }
        Progress::new((offset - self.start) / len)
    }

    /// Inverse of [`progress_at`](Self::progress_at).
    pub fn offset_for(&self, progress: Progress) -> f64 {
        self.start + progress.get() * self.len().max(0.0)
    }
}
