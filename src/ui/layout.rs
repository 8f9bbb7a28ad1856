//! Layout helpers: split the terminal area into regions and describe the
//! scrollable document that lives behind the page viewport.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::progress::ScrollRegion;

/// Rows taken by the floating header (two text rows plus a rule).
pub const HEADER_HEIGHT: u16 = 3;

/// Primary screen layout: the page viewport with the header floating over its
/// top rows, and a bottom status bar.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub page_area: Rect,
    pub header_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page viewport (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let page_area = chunks[0];
        let header_area = Rect {
            height: HEADER_HEIGHT.min(page_area.height),
            ..page_area
        };
        Self {
            page_area,
            header_area,
            status_area: chunks[1],
        }
    }
}

/// Vertical geometry of the document: a one-viewport hero followed by a
/// region of `sections` viewports whose content stays pinned while it
/// scrolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub viewport: f64,
    pub sections: usize,
}

impl PageGeometry {
    pub fn new(viewport_rows: u16, sections: usize) -> Self {
        Self {
            viewport: f64::from(viewport_rows),
            sections,
        }
    }

    pub fn hero_height(&self) -> f64 {
        self.viewport
    }

    pub fn region_height(&self) -> f64 {
        self.viewport * self.sections as f64
    }

    /// Largest scroll offset: the region's bottom meets the viewport bottom.
    pub fn max_offset(&self) -> f64 {
        (self.hero_height() + self.region_height() - self.viewport).max(0.0)
    }

    pub fn scroll_region(&self) -> ScrollRegion {
        ScrollRegion::after_hero(self.hero_height(), self.region_height(), self.viewport)
    }

    /// Screen row (relative to the viewport top) of the pinned section
    /// stage.  It slides up with the hero, then sticks at `0`.
    pub fn stage_top(&self, offset: f64) -> f64 {
        (self.hero_height() - offset).max(0.0)
    }
}
