//! Core animation model – interpolation, section visibility, background and
//! header curves, and frame composition.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Every
//! computation is a pure function of the current [`progress::Progress`].

pub mod background;
pub mod color;
pub mod content;
pub mod entrance;
pub mod error;
pub mod frame;
pub mod header;
pub mod interpolate;
pub mod pricing;
pub mod progress;
pub mod section;
