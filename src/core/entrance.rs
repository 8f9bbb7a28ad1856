//! Clock-driven entrance animations.
//!
//! Everything else in the core is a function of scroll progress.  These are
//! functions of the milliseconds elapsed since an element first appeared: the
//! hero fades and rises in when the page opens, and pricing cards reveal one
//! after another the first time their section becomes visible.

use serde::Serialize;

use super::error::CurveError;
use super::interpolate::{interpolate, Curve, Distance};

/// How far an entering element rises, in px.
const RISE_PX: f64 = 20.0;
const CARD_STAGGER_MS: f64 = 100.0;
const CARD_DURATION_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    InOut,
}

impl Easing {
    fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::InOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Opacity and vertical offset of an entering element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntranceParams {
    pub opacity: f64,
    /// Positive values sit below the resting position.
    pub offset: Distance,
}

impl EntranceParams {
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        offset: Distance::px(0.0),
    };
}

/// A one-shot fade from invisible, optionally rising into place.
#[derive(Debug, Clone, PartialEq)]
pub struct Entrance {
    ramp: Curve<f64>,
    easing: Easing,
    rise_px: f64,
}

impl Entrance {
    pub fn new(delay_ms: f64, duration_ms: f64, rise_px: f64, easing: Easing) -> Result<Self, CurveError> {
        let ramp = Curve::new(vec![delay_ms, delay_ms + duration_ms], vec![0.0, 1.0])?;
        Ok(Self {
            ramp,
            easing,
            rise_px,
        })
    }

    pub fn at(&self, elapsed_ms: f64) -> EntranceParams {
        let t = self.easing.apply(self.ramp.sample(elapsed_ms));
        EntranceParams {
            opacity: t,
            offset: Distance::px(self.rise_px * (1.0 - t)),
        }
    }
}

/// Entrances of the hero's three elements.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroIntro {
    mark: Entrance,
    title: Entrance,
    hint: Entrance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeroIntroParams {
    pub mark: EntranceParams,
    pub title: EntranceParams,
    pub hint: EntranceParams,
}

impl HeroIntroParams {
    pub const SHOWN: Self = Self {
        mark: EntranceParams::SHOWN,
        title: EntranceParams::SHOWN,
        hint: EntranceParams::SHOWN,
    };
}

impl HeroIntro {
    pub fn new() -> Result<Self, CurveError> {
        Ok(Self {
            mark: Entrance::new(0.0, 800.0, RISE_PX, Easing::InOut)?,
            title: Entrance::new(200.0, 800.0, RISE_PX, Easing::InOut)?,
            hint: Entrance::new(1000.0, 1000.0, 0.0, Easing::Linear)?,
        })
    }

    pub fn at(&self, elapsed_ms: f64) -> HeroIntroParams {
        HeroIntroParams {
            mark: self.mark.at(elapsed_ms),
            title: self.title.at(elapsed_ms),
            hint: self.hint.at(elapsed_ms),
        }
    }
}

/// Opacity of the `index`th card `elapsed_ms` after its group came into view.
/// Each card starts [`CARD_STAGGER_MS`] after the one before it.
pub fn card_reveal(index: usize, elapsed_ms: f64) -> f64 {
    let start = index as f64 * CARD_STAGGER_MS;
    interpolate(elapsed_ms, &[start, start + CARD_DURATION_MS], &[0.0, 1.0]).unwrap_or(1.0)
}
