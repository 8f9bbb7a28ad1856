//! Floating header model and section navigation.
//!
//! The header fades in over the first `epsilon` of progress, slides down from
//! above once, and fades out over the last `epsilon`.  Its text color either
//! follows a curve (dark on the light top of the page, light on the dark
//! bottom) or stays fixed.

use serde::Serialize;

use super::color::Rgb;
use super::error::{ConfigError, CurveError};
use super::interpolate::{Curve, Distance};
use super::progress::{Progress, ScrollRegion};
use super::section::SectionWindow;

pub const DEFAULT_EPSILON: f64 = 0.02;

pub fn default_text_stops() -> Vec<(f64, Rgb)> {
    [
        (0.0, Rgb::new(0x0f, 0x17, 0x2a)),
        (0.2, Rgb::new(0x1e, 0x29, 0x3b)),
        (0.4, Rgb::new(0xe2, 0xe8, 0xf0)),
        (0.6, Rgb::new(0xf8, 0xfa, 0xfc)),
        (0.8, Rgb::new(0xf8, 0xfa, 0xfc)),
        (1.0, Rgb::new(0xf8, 0xfa, 0xfc)),
    ]
    .into()
}

/// How the header picks its text color.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderTextColor {
    Interpolated(Curve<Rgb>),
    Fixed(Rgb),
}

impl HeaderTextColor {
    pub fn interpolated(stops: &[(f64, Rgb)]) -> Result<Self, CurveError> {
        let (thresholds, colors) = stops.iter().copied().unzip();
        Ok(Self::Interpolated(Curve::new(thresholds, colors)?))
    }

    fn sample(&self, progress: f64) -> Rgb {
        match self {
            Self::Interpolated(curve) => curve.sample(progress),
            Self::Fixed(color) => *color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeaderParams {
    pub opacity: f64,
    /// Vertical offset as a percentage of the header's own height.
    pub offset: Distance,
    pub text_color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderModel {
    opacity: Curve<f64>,
    offset: Curve<Distance>,
    text_color: HeaderTextColor,
}

impl HeaderModel {
    pub fn new(epsilon: f64, text_color: HeaderTextColor) -> Result<Self, ConfigError> {
        if !(0.0..=0.5).contains(&epsilon) {
            return Err(ConfigError::HeaderEpsilon(epsilon));
        }
        let opacity = Curve::new(vec![0.0, epsilon, 1.0 - epsilon, 1.0], vec![0.0, 1.0, 1.0, 0.0])
            .map_err(ConfigError::curve("header opacity"))?;
        let offset = Curve::new(
            vec![0.0, epsilon],
            vec![Distance::percent(-100.0), Distance::percent(0.0)],
        )
        .map_err(ConfigError::curve("header offset"))?;
        Ok(Self {
            opacity,
            offset,
            text_color,
        })
    }

    pub fn params(&self, progress: Progress) -> HeaderParams {
        let p = progress.get();
        HeaderParams {
            opacity: self.opacity.sample(p),
            offset: self.offset.sample(p),
            text_color: self.text_color.sample(p),
        }
    }
}

// ───────────────────────────────────────── navigation ────────

/// A request for the host to move its scroll surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub section: usize,
    pub progress: Progress,
    /// Absolute scroll offset to move to.
    pub offset: f64,
}

/// Progress at the center of section `index`'s window: `(index + 0.5) / total`.
pub fn section_target(index: usize, total: usize) -> Progress {
    if total == 0 {
        return Progress::START;
    }
    let window = SectionWindow::new(index.min(total - 1), total, 0.0);
    Progress::new(window.midpoint())
}

/// Build the scroll request that centers section `index` in `region`.
pub fn scroll_to_section(index: usize, total: usize, region: &ScrollRegion) -> ScrollRequest {
    let progress = section_target(index, total);
    ScrollRequest {
        section: index.min(total.saturating_sub(1)),
        progress,
        offset: region.offset_for(progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn model() -> HeaderModel {
        HeaderModel::new(
            DEFAULT_EPSILON,
            HeaderTextColor::interpolated(&default_text_stops()).unwrap(),
        )
        .unwrap()
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.01, 0.5)]
    #[case(0.02, 1.0)]
    #[case(0.5, 1.0)]
    #[case(0.98, 1.0)]
    #[case(0.99, 0.5)]
    #[case(1.0, 0.0)]
    fn opacity_fades_at_both_ends(#[case] progress: f64, #[case] expected: f64) {
        let got = model().params(Progress::new(progress)).opacity;
        assert!((got - expected).abs() < 1e-9, "{progress}: {got}");
    }

    #[test]
    fn slides_in_once() {
        let m = model();
        assert_eq!(m.params(Progress::START).offset, Distance::percent(-100.0));
        assert_eq!(m.params(Progress::new(0.01)).offset.value.round(), -50.0);
        assert_eq!(m.params(Progress::new(0.02)).offset, Distance::percent(0.0));
        assert_eq!(m.params(Progress::END).offset, Distance::percent(0.0));
    }

    #[test]
    fn text_color_follows_curve() {
        let m = model();
        assert_eq!(m.params(Progress::START).text_color.to_string(), "#0f172a");
        assert_eq!(m.params(Progress::new(0.7)).text_color.to_string(), "#f8fafc");
    }

    #[test]
    fn fixed_text_color_ignores_progress() {
        let white = Rgb::new(0xf8, 0xfa, 0xfc);
        let m = HeaderModel::new(DEFAULT_EPSILON, HeaderTextColor::Fixed(white)).unwrap();
        for v in [0.0, 0.3, 1.0] {
            assert_eq!(m.params(Progress::new(v)).text_color, white);
        }
    }

    #[rstest]
    #[case(-0.1)]
    #[case(0.6)]
    #[case(f64::NAN)]
    fn rejects_bad_epsilon(#[case] eps: f64) {
        let err = HeaderModel::new(eps, HeaderTextColor::Fixed(Rgb::WHITE)).unwrap_err();
        assert!(matches!(err, ConfigError::HeaderEpsilon(_)));
    }

    #[test]
    fn scroll_to_section_round_trips_to_window_midpoint() {
        let region = ScrollRegion::after_hero(40.0, 160.0, 40.0);
        for i in 0..4 {
            let request = scroll_to_section(i, 4, &region);
            let back = region.progress_at(request.offset);
            assert!((back.get() - (i as f64 + 0.5) / 4.0).abs() < 1e-12);
            assert!(SectionWindow::new(i, 4, 0.1).contains(back));
        }
    }

    #[test]
    fn scroll_to_section_offsets() {
        let region = ScrollRegion::after_hero(40.0, 160.0, 40.0);
        assert_eq!(scroll_to_section(0, 4, &region).offset, 55.0);
        assert_eq!(scroll_to_section(3, 4, &region).offset, 145.0);
        // out-of-range index targets the last section
        assert_eq!(scroll_to_section(9, 4, &region).section, 3);
    }
}
