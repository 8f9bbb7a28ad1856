//! Error types for curve construction and page configuration.
//!
//! Everything here is a *configuration* failure: it is raised once, when the
//! page is assembled, and never while frames are being computed.

use std::path::PathBuf;

use thiserror::Error;

/// A breakpoint curve that cannot be interpolated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("curve has no breakpoints")]
    Empty,

    #[error("curve has {thresholds} thresholds but {outputs} outputs")]
    LengthMismatch { thresholds: usize, outputs: usize },

    #[error("threshold #{index} is not a finite number")]
    NonFinite { index: usize },

    #[error("threshold #{index} ({value}) is smaller than the previous one ({previous})")]
    NotMonotonic {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("output #{index} uses a different unit than the first output")]
    MixedUnits { index: usize },
}

/// A color string that is not `#RGB` / `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #RGB or #RRGGBB")]
pub struct ColorParseError(pub String);

/// Anything that can go wrong while loading or validating a page config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Color(#[from] ColorParseError),

    #[error("{name} curve: {source}")]
    Curve {
        name: &'static str,
        #[source]
        source: CurveError,
    },

    #[error("page has no sections")]
    NoSections,

    #[error("section margin must be within [0, 0.5], got {0}")]
    Margin(f64),

    #[error("header fade epsilon must be within [0, 0.5], got {0}")]
    HeaderEpsilon(f64),

    #[error("pricing category {0:?} has no plans")]
    EmptyPricingCategory(String),

    #[error("smooth scroll speed must be within [0.05, 0.95], got {0}")]
    ScrollSpeed(f64),

    #[error("px_per_row must be a positive number, got {0}")]
    PxPerRow(f64),

    #[error("frame interval must be at least 1 ms")]
    FrameInterval,

    #[error("aurora opacity must be within [0, 1], got {0}")]
    AuroraOpacity(f64),
}

impl ConfigError {
    pub fn curve(name: &'static str) -> impl FnOnce(CurveError) -> Self {
        move |source| ConfigError::Curve { name, source }
    }
}
