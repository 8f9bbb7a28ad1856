//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    color::Rgb,
    entrance::{HeroIntro, HeroIntroParams},
    error::ConfigError,
    frame::{Animator, Frame},
    pricing::PricingTabs,
    progress::Progress,
    section::section_at,
};
use crate::ui::{layout::PageGeometry, smooth_scroll::SmoothScroll};

/// Fixed header color used when toggling away from the interpolated one and
/// the page does not name its own.
fn default_fixed_header_color() -> Rgb {
    Rgb::new(0xf8, 0xfa, 0xfc)
}

/// Top-level application state.
pub struct AppState {
    /// Page content, animation settings and keybindings.
    pub config: AppConfig,
    /// Validated curves; rebuilt only when the header color mode changes.
    pub animator: Animator,
    /// Active plan category of the pricing section.
    pub tabs: Option<PricingTabs>,
    /// Index of the section that owns `tabs`.
    pub pricing_index: Option<usize>,
    pub scroll: SmoothScroll,
    /// Area the page is painted into, as of the last draw.
    pub viewport: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Animation ticks so far; drives the entrances and the hero hint.
    pub tick: u64,
    hero_intro: HeroIntro,
    /// Tick at which the pricing section first became visible.
    pricing_revealed_at: Option<u64>,
    /// Color the header switches to when fixed mode is toggled on.
    fixed_header_color: Rgb,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let animator = config.page.build_animator()?;
        let tabs = config.page.pricing_tabs()?;
        let pricing_index = config
            .page
            .sections
            .iter()
            .position(|s| s.pricing_categories().is_some());
        let fixed_header_color = config
            .page
            .header
            .fixed_text_color
            .unwrap_or_else(default_fixed_header_color);
        let scroll = SmoothScroll::new(config.page.animation.smooth_scroll_speed);
        let hero_intro = HeroIntro::new().map_err(ConfigError::curve("hero intro"))?;
        Ok(Self {
            config,
            animator,
            tabs,
            pricing_index,
            scroll,
            viewport: Rect::default(),
            should_quit: false,
            status_message: None,
            tick: 0,
            hero_intro,
            pricing_revealed_at: None,
            fixed_header_color,
        })
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.viewport.height, self.animator.total())
    }

    /// Progress at the painted scroll position.
    pub fn progress(&self) -> Progress {
        self.geometry().scroll_region().progress_at(self.scroll.position())
    }

    pub fn frame(&self) -> Frame {
        self.animator.compute_frame(self.progress())
    }

    /// Advance one animation frame.
    pub fn on_tick(&mut self) {
        if self.scroll.is_animating() {
            self.scroll.tick();
        }
        self.tick = self.tick.wrapping_add(1);
        self.note_reveals();
    }

    fn elapsed_ms(&self, since: u64) -> f64 {
        self.tick.saturating_sub(since) as f64 * self.config.page.animation.frame_ms as f64
    }

    /// Start the pricing cards' reveal the first time their section shows.
    fn note_reveals(&mut self) {
        if self.pricing_revealed_at.is_some() {
            return;
        }
        let Some(index) = self.pricing_index else {
            return;
        };
        if self.frame().sections.get(index).is_some_and(|p| p.is_visible()) {
            tracing::debug!(tick = self.tick, "pricing cards revealed");
            self.pricing_revealed_at = Some(self.tick);
        }
    }

    /// Hero entrance, timed from startup.
    pub fn hero_intro(&self) -> HeroIntroParams {
        self.hero_intro.at(self.elapsed_ms(0))
    }

    /// Milliseconds since the pricing cards started revealing, zero until
    /// they do.
    pub fn card_reveal(&self) -> Option<f64> {
        Some(self.pricing_revealed_at.map_or(0.0, |at| self.elapsed_ms(at)))
    }

    /// Record the page area and resize the scrollable extent to match.
    pub fn set_viewport(&mut self, area: Rect) {
        if area == self.viewport {
            return;
        }
        self.viewport = area;
        self.scroll.set_max(self.geometry().max_offset());
    }

    /// Section the scroll is heading to, so repeated navigation keys keep
    /// stepping while the previous glide is still running.
    pub fn target_section(&self) -> usize {
        let progress = self.geometry().scroll_region().progress_at(self.scroll.target());
        section_at(self.animator.total(), progress)
    }

    /// Glide to the middle of section `index`.
    pub fn scroll_to_section(&mut self, index: usize) {
        let region = self.geometry().scroll_region();
        let request = self.animator.scroll_to_section(index, &region);
        tracing::debug!(
            section = request.section,
            progress = request.progress.get(),
            offset = request.offset,
            "scroll to section"
        );
        self.scroll.scroll_to(request.offset);
    }

    /// Titles that get a header nav entry: every section but the last, which
    /// is reached through "Get Started".
    pub fn nav_titles(&self) -> Vec<&str> {
        let sections = &self.config.page.sections;
        sections[..sections.len().saturating_sub(1)]
            .iter()
            .map(|s| s.title.as_str())
            .collect()
    }

    /// Switch the header between its interpolated and fixed text color.
    pub fn toggle_header_color(&mut self) -> Result<(), ConfigError> {
        let header = &mut self.config.page.header;
        header.fixed_text_color = match header.fixed_text_color {
            Some(_) => None,
            None => Some(self.fixed_header_color),
        };
        self.animator = self.config.page.build_animator()?;
        Ok(())
    }

    pub fn header_color_is_fixed(&self) -> bool {
        self.config.page.header.fixed_text_color.is_some()
    }
}
