//! Background color model: a color curve over the whole progress range, plus
//! an optional decorative "aurora" tint that fades in over a sub-range.

use serde::Serialize;

use super::color::Rgb;
use super::error::CurveError;
use super::interpolate::Curve;
use super::progress::Progress;

/// Light, slate-white top fading into a deep indigo night.
pub fn default_stops() -> Vec<(f64, Rgb)> {
    [
        (0.0, Rgb::new(0xf8, 0xfa, 0xfc)),
        (0.2, Rgb::new(0xe0, 0xe7, 0xff)),
        (0.4, Rgb::new(0xa5, 0xb4, 0xfc)),
        (0.6, Rgb::new(0x43, 0x38, 0xca)),
        (0.8, Rgb::new(0x31, 0x2e, 0x81)),
        (1.0, Rgb::new(0x11, 0x18, 0x27)),
    ]
    .into()
}

/// Aurora overlay: fades from transparent to `opacity` over `[from, to]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aurora {
    pub tint: Rgb,
    opacity: Curve<f64>,
}

impl Aurora {
    pub fn new(tint: Rgb, from: f64, to: f64, opacity: f64) -> Result<Self, CurveError> {
        Ok(Self {
            tint,
            opacity: Curve::new(vec![from, to], vec![0.0, opacity.clamp(0.0, 1.0)])?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuroraParams {
    pub tint: Rgb,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundParams {
    pub color: Rgb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aurora: Option<AuroraParams>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundModel {
    color: Curve<Rgb>,
    aurora: Option<Aurora>,
}

impl BackgroundModel {
    pub fn new(stops: &[(f64, Rgb)], aurora: Option<Aurora>) -> Result<Self, CurveError> {
        let (thresholds, colors) = stops.iter().copied().unzip();
        Ok(Self {
            color: Curve::new(thresholds, colors)?,
            aurora,
        })
    }

    pub fn params(&self, progress: Progress) -> BackgroundParams {
        let p = progress.get();
        BackgroundParams {
            color: self.color.sample(p),
            aurora: self.aurora.as_ref().map(|a| AuroraParams {
                tint: a.tint,
                opacity: a.opacity.sample(p),
            }),
        }
    }
}
