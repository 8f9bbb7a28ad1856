//! Section visibility model.
//!
//! Section `i` of `n` owns the progress window `[i/n, (i+1)/n]`.  Inside it the
//! section fades and scales in over the first `margin`, holds fully visible
//! through the *peak window*, then fades back out over the last `margin`.
//! The terminal section only fades in and then stays.
//!
//! When `2 * margin` exceeds the window width the margin is clamped to half
//! the width, so the peak collapses onto the window midpoint.

use serde::Serialize;

use super::interpolate::{sample_unchecked, Distance};
use super::progress::Progress;

/// Default fade margin as a fraction of the whole progress range.
pub const DEFAULT_MARGIN: f64 = 0.1;

/// Vertical travel of a section across its window.
const TRAVEL_PX: f64 = 40.0;

const FADE_SCALE: f64 = 0.92;
const TERMINAL_FADE_SCALE: f64 = 0.95;

/// Visual parameters of one section for one progress value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualParams {
    pub opacity: f64,
    pub scale: f64,
    pub offset: Distance,
    pub interactive: bool,
}

impl VisualParams {
    /// Whether anything of the section would be painted.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Progress breakpoints of a single section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionWindow {
    pub index: usize,
    pub total: usize,
    pub start: f64,
    pub peak_start: f64,
    pub peak_end: f64,
    pub end: f64,
}

impl SectionWindow {
    /// Breakpoints for section `index` of `total`.  Panics if `index >= total`.
    pub fn new(index: usize, total: usize, margin: f64) -> Self {
        assert!(index < total, "section {index} out of range for {total} sections");
        let n = total as f64;
        let start = index as f64 / n;
        let end = (index + 1) as f64 / n;

        if index + 1 == total {
            // Terminal section: fade in once and stay.
            let peak_start = (start + margin).min(1.0);
            return Self {
                index,
                total,
                start,
                peak_start,
                peak_end: 1.0,
                end: 1.0,
            };
        }

        let (peak_start, peak_end) = if 2.0 * margin > end - start {
            let mid = (start + end) / 2.0;
            (mid, mid)
        } else {
            (start + margin, end - margin)
        };
        Self {
            index,
            total,
            start,
            peak_start,
            peak_end,
            end,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.index + 1 == self.total
    }

    /// Whether `progress` falls inside `[start, end)`; the terminal window
    /// also owns `1.0`.
    pub fn contains(&self, progress: Progress) -> bool {
        let p = progress.get();
        p >= self.start && (p < self.end || (self.is_terminal() && p <= self.end))
    }

    /// Center of the window, the target of "scroll to this section".
    pub fn midpoint(&self) -> f64 {
        (self.index as f64 + 0.5) / self.total as f64
    }

    pub fn params(&self, progress: Progress) -> VisualParams {
        let p = progress.get();
        if self.is_terminal() {
            let ramp = [self.start, self.peak_start];
            return VisualParams {
                opacity: sample_unchecked(p, &ramp, &[0.0, 1.0]),
                scale: sample_unchecked(p, &ramp, &[TERMINAL_FADE_SCALE, 1.0]),
                offset: sample_unchecked(p, &ramp, &[Distance::px(TRAVEL_PX), Distance::px(0.0)]),
                interactive: p >= self.peak_start,
            };
        }

        let stops = [self.start, self.peak_start, self.peak_end, self.end];
        VisualParams {
            opacity: sample_unchecked(p, &stops, &[0.0, 1.0, 1.0, 0.0]),
            scale: sample_unchecked(p, &stops, &[FADE_SCALE, 1.0, 1.0, FADE_SCALE]),
            offset: sample_unchecked(
                p,
                &[self.start, self.end],
                &[Distance::px(TRAVEL_PX), Distance::px(-TRAVEL_PX)],
            ),
            interactive: p >= self.peak_start && p <= self.peak_end,
        }
    }
}

/// Stateless entry point: parameters of section `index` of `total`.
pub fn section_params(index: usize, total: usize, margin: f64, progress: Progress) -> VisualParams {
    SectionWindow::new(index, total, margin).params(progress)
}

/// Index of the section whose window contains `progress`.
pub fn section_at(total: usize, progress: Progress) -> usize {
    (0..total)
        .find(|&i| SectionWindow::new(i, total, 0.0).contains(progress))
        .unwrap_or(0)
}
