//! UI / rendering layer, everything that touches Ratatui widgets.
//!
//! This layer takes a computed [`Frame`](crate::core::frame::Frame) and the
//! page content and turns them into cells on the terminal.  No animation
//! math happens here beyond converting distances into rows.

pub mod header;
pub mod layout;
pub mod page;
pub mod section_view;
pub mod smooth_scroll;
pub mod theme;
