//! Piecewise-linear interpolation over ordered breakpoints.
//!
//! A breakpoint curve is a list of `(threshold, output)` pairs.  Below the
//! first threshold the first output is held, above the last threshold the last
//! output is held, and in between the two bracketing outputs are mixed
//! linearly.  A repeated threshold forms a zero-width segment, which is never
//! selected, so it behaves like a step.
//!
//! [`Curve`] is the validated, reusable form.  [`interpolate`] validates on
//! every call and is meant for one-off lookups.

use serde::{Deserialize, Serialize};

use super::error::CurveError;

// ───────────────────────────────────────── lerp ──────────────

/// A value that can be mixed linearly with another of its kind.
pub trait Lerp: Clone {
    /// `t = 0` yields `self`, `t = 1` yields `other`.
    fn lerp(&self, other: &Self, t: f64) -> Self;

    /// Whether two outputs may share a curve.  Only distances care.
    fn compatible(&self, _other: &Self) -> bool {
        true
    }
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for super::color::Rgb {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self.mix(*other, t as f32)
    }
}

// ───────────────────────────────────────── distance ──────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Px,
    Percent,
}

/// A signed length with a unit.  Interpolation mixes the magnitude and carries
/// the unit through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    pub unit: Unit,
}

impl Distance {
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    pub const fn percent(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    /// Resolve to terminal rows.  `Px` is divided by `px_per_row`, `Percent`
    /// is taken of `basis_rows` (e.g. the header height).
    pub fn to_rows(self, px_per_row: f64, basis_rows: f64) -> i32 {
        let rows = match self.unit {
            Unit::Px => self.value / px_per_row.max(f64::EPSILON),
            Unit::Percent => self.value / 100.0 * basis_rows,
        };
        rows.round() as i32
    }
}

impl Lerp for Distance {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            value: self.value.lerp(&other.value, t),
            unit: self.unit,
        }
    }

    fn compatible(&self, other: &Self) -> bool {
        self.unit == other.unit
    }
}

// ───────────────────────────────────────── curve ─────────────

/// A validated breakpoint curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve<T> {
    thresholds: Vec<f64>,
    outputs: Vec<T>,
}

impl<T: Lerp> Curve<T> {
    pub fn new(thresholds: Vec<f64>, outputs: Vec<T>) -> Result<Self, CurveError> {
        validate(&thresholds, &outputs)?;
        Ok(Self {
            thresholds,
            outputs,
        })
    }

    /// Evaluate the curve at `progress`.
    pub fn sample(&self, progress: f64) -> T {
        sample_unchecked(progress, &self.thresholds, &self.outputs)
    }
}

/// Validate then evaluate in one step.
pub fn interpolate<T: Lerp>(progress: f64, thresholds: &[f64], outputs: &[T]) -> Result<T, CurveError> {
    validate(thresholds, outputs)?;
    Ok(sample_unchecked(progress, thresholds, outputs))
}

fn validate<T: Lerp>(thresholds: &[f64], outputs: &[T]) -> Result<(), CurveError> {
    if thresholds.len() != outputs.len() {
        return Err(CurveError::LengthMismatch {
            thresholds: thresholds.len(),
            outputs: outputs.len(),
        });
    }
    if thresholds.is_empty() {
        return Err(CurveError::Empty);
    }
    for (index, t) in thresholds.iter().enumerate() {
        if !t.is_finite() {
            return Err(CurveError::NonFinite { index });
        }
    }
    for (index, pair) in thresholds.windows(2).enumerate() {
        if pair[1] < pair[0] {
            return Err(CurveError::NotMonotonic {
                index: index + 1,
                previous: pair[0],
                value: pair[1],
            });
        }
    }
    for (index, out) in outputs.iter().enumerate().skip(1) {
        if !outputs[0].compatible(out) {
            return Err(CurveError::MixedUnits { index });
        }
    }
    Ok(())
}

/// Core lookup.  Callers guarantee equal, non-zero lengths and non-decreasing
/// thresholds.  A NaN progress is treated as the start of the curve.
pub(crate) fn sample_unchecked<T: Lerp>(progress: f64, thresholds: &[f64], outputs: &[T]) -> T {
    let last = thresholds.len() - 1;
    if progress.is_nan() || progress <= thresholds[0] {
        return outputs[0].clone();
    }
    if progress >= thresholds[last] {
        return outputs[last].clone();
    }
    // First segment whose upper bound lies strictly above `progress`; its
    // lower bound is then <= progress.  Zero-width segments are skipped.
    let upper = thresholds.partition_point(|&t| t <= progress);
    let lower = upper - 1;
    let span = thresholds[upper] - thresholds[lower];
    let t = (progress - thresholds[lower]) / span;
    outputs[lower].lerp(&outputs[upper], t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Rgb;
    use rstest::rstest;

    #[rstest]
    #[case(-0.5, 0.0)]
    #[case(0.0, 0.0)]
    #[case(0.25, 0.5)]
    #[case(0.5, 1.0)]
    #[case(0.75, 1.0)]
    #[case(0.875, 0.5)]
    #[case(1.0, 0.0)]
    #[case(3.0, 0.0)]
    fn scalar_curve(#[case] progress: f64, #[case] expected: f64) {
        let curve = Curve::new(vec![0.0, 0.5, 0.75, 1.0], vec![0.0, 1.0, 1.0, 0.0]).unwrap();
        assert!((curve.sample(progress) - expected).abs() < 1e-12);
    }

    #[test]
    fn single_point_curve_is_constant() {
        let curve = Curve::new(vec![0.3], vec![7.0]).unwrap();
        assert_eq!(curve.sample(0.0), 7.0);
        assert_eq!(curve.sample(0.3), 7.0);
        assert_eq!(curve.sample(1.0), 7.0);
    }

    #[test]
    fn repeated_threshold_acts_as_step() {
        let curve = Curve::new(vec![0.0, 0.5, 0.5, 1.0], vec![0.0, 0.0, 1.0, 1.0]).unwrap();
        assert_eq!(curve.sample(0.499), 0.0);
        assert_eq!(curve.sample(0.5), 1.0);
        assert_eq!(curve.sample(0.9), 1.0);
    }

    #[test]
    fn nan_progress_holds_first_output() {
        let curve = Curve::new(vec![0.0, 1.0], vec![2.0, 4.0]).unwrap();
        assert_eq!(curve.sample(f64::NAN), 2.0);
    }

    #[test]
    fn sampling_is_pure() {
        let curve = Curve::new(vec![0.0, 0.2, 1.0], vec![1.0, 5.0, -3.0]).unwrap();
        for p in [0.1, 0.37, 0.99] {
            assert_eq!(curve.sample(p), curve.sample(p));
        }
    }

    #[test]
    fn monotone_within_each_segment() {
        let curve = Curve::new(vec![0.0, 0.4, 0.6, 1.0], vec![0.92, 1.0, 1.0, 0.92]).unwrap();
        let steps: Vec<f64> = (0..=40).map(|i| 0.4 * i as f64 / 40.0).collect();
        for w in steps.windows(2) {
            assert!(curve.sample(w[1]) >= curve.sample(w[0]));
        }
        let steps: Vec<f64> = (0..=40).map(|i| 0.6 + 0.4 * i as f64 / 40.0).collect();
        for w in steps.windows(2) {
            assert!(curve.sample(w[1]) <= curve.sample(w[0]));
        }
    }

    #[test]
    fn distance_keeps_unit() {
        let curve = Curve::new(vec![0.0, 1.0], vec![Distance::px(40.0), Distance::px(-40.0)]).unwrap();
        assert_eq!(curve.sample(0.5), Distance::px(0.0));
        assert_eq!(curve.sample(0.25), Distance::px(20.0));
    }

    #[test]
    fn color_midpoint_is_exact_gray() {
        let gray = interpolate(0.5, &[0.0, 1.0], &[Rgb::WHITE, Rgb::BLACK]).unwrap();
        assert_eq!(gray, Rgb { r: 127.5, g: 127.5, b: 127.5 });
    }

    #[rstest]
    #[case(vec![], vec![], CurveError::Empty)]
    #[case(vec![0.0, 1.0], vec![1.0], CurveError::LengthMismatch { thresholds: 2, outputs: 1 })]
    #[case(vec![0.0, f64::INFINITY], vec![1.0, 2.0], CurveError::NonFinite { index: 1 })]
    #[case(vec![0.0, 0.6, 0.4], vec![1.0, 2.0, 3.0], CurveError::NotMonotonic { index: 2, previous: 0.6, value: 0.4 })]
    fn rejects_malformed_curves(
        #[case] thresholds: Vec<f64>,
        #[case] outputs: Vec<f64>,
        #[case] expected: CurveError,
    ) {
        assert_eq!(Curve::new(thresholds, outputs).unwrap_err(), expected);
    }

    #[test]
    fn rejects_mixed_units() {
        let err = interpolate(0.5, &[0.0, 1.0], &[Distance::px(1.0), Distance::percent(1.0)]).unwrap_err();
        assert_eq!(err, CurveError::MixedUnits { index: 1 });
    }

    #[rstest]
    #[case(Distance::px(40.0), 16.0, 3.0, 3)]
    #[case(Distance::px(-40.0), 16.0, 3.0, -3)]
    #[case(Distance::percent(-100.0), 16.0, 3.0, -3)]
    #[case(Distance::percent(-50.0), 16.0, 3.0, -2)]
    fn distance_to_rows(#[case] d: Distance, #[case] ppr: f64, #[case] basis: f64, #[case] rows: i32) {
        assert_eq!(d.to_rows(ppr, basis), rows);
    }
}
