//! The page itself: animated background, hero screen, and the pinned stage on
//! which the sections fade, scale and slide.
//!
//! The widget is created fresh each frame from an already computed
//! [`Frame`]; it does no animation math of its own beyond turning distances
//! into rows.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::core::{
    color::Rgb,
    content::{Hero, Section},
    entrance::{EntranceParams, HeroIntroParams},
    frame::Frame,
    pricing::PricingTabs,
};

use super::layout::PageGeometry;
use super::section_view::{self, Run};
use super::theme::{Role, Theme, MIN_VISIBLE_OPACITY};

/// Background of the hero screen.
fn hero_bg() -> Rgb {
    Rgb::new(0xf8, 0xfa, 0xfc)
}

/// Widest the section content gets, before scaling.
const MAX_CONTENT_WIDTH: u16 = 100;

pub struct PageWidget<'a> {
    frame: &'a Frame,
    sections: &'a [Section],
    hero: &'a Hero,
    tabs: Option<&'a PricingTabs>,
    /// Scroll offset in rows from the top of the document.
    offset: f64,
    px_per_row: f64,
    /// Animation tick, drives the hero's bobbing arrow.
    tick: u64,
    intro: HeroIntroParams,
    /// See [`section_view::compose`].
    card_reveal: Option<f64>,
}

impl<'a> PageWidget<'a> {
    pub fn new(frame: &'a Frame, sections: &'a [Section], hero: &'a Hero) -> Self {
        Self {
            frame,
            sections,
            hero,
            tabs: None,
            offset: 0.0,
            px_per_row: 16.0,
            tick: 0,
            intro: HeroIntroParams::SHOWN,
            card_reveal: None,
        }
    }

    pub fn tabs(mut self, tabs: Option<&'a PricingTabs>) -> Self {
        self.tabs = tabs;
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn px_per_row(mut self, px_per_row: f64) -> Self {
        self.px_per_row = px_per_row;
        self
    }

    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    pub fn intro(mut self, intro: HeroIntroParams) -> Self {
        self.intro = intro;
        self
    }

    pub fn card_reveal(mut self, reveal: Option<f64>) -> Self {
        self.card_reveal = reveal;
        self
    }

    fn paint_background(&self, area: Rect, buf: &mut Buffer) {
        let bg = self.frame.background.color;
        match self.frame.background.aurora {
            Some(aurora) if aurora.opacity >= MIN_VISIBLE_OPACITY => {
                // Tint strongest at the top, fading out toward the bottom.
                for dy in 0..area.height {
                    let falloff = 1.0 - f64::from(dy) / f64::from(area.height.max(1));
                    let color = bg.mix(aurora.tint, (aurora.opacity * falloff) as f32);
                    let row = Rect::new(area.x, area.y + dy, area.width, 1);
                    buf.set_style(row, Style::default().bg(Theme::color(color)));
                }
            }
            _ => buf.set_style(area, Style::default().bg(Theme::color(bg))),
        }
    }

    fn paint_hero(&self, area: Rect, buf: &mut Buffer) {
        let height = f64::from(area.height);
        let top = -self.offset;
        if top + height <= 0.0 {
            return;
        }
        let bg = hero_bg();
        let top_row = top.round() as i32;
        let first_visible = top_row.max(0) as u16;
        let visible = (top_row + i32::from(area.height)).clamp(0, i32::from(area.height)) as u16;
        let hero_rect = Rect::new(area.x, area.y + first_visible, area.width, visible - first_visible);
        buf.set_style(hero_rect, Style::default().bg(Theme::color(bg)));

        let mid = top_row + i32::from(area.height) / 2;
        let bottom = top_row + i32::from(area.height);
        let intro = self.intro;
        let rows = [
            (mid - 2, Run::new("◆", Role::Accent), intro.mark),
            (mid, Run::new(spaced(&self.hero.brand), Role::Heading), intro.title),
            (bottom - 3, Run::new(self.hero.hint.as_str(), Role::Muted), intro.hint),
            (bottom - 2 + bob(self.tick), Run::new("↓", Role::Muted), intro.hint),
        ];
        for (y, run, entrance) in rows {
            let EntranceParams { opacity, offset } = entrance;
            let y = y + offset.to_rows(self.px_per_row, 0.0);
            paint_row(buf, area, hero_rect, y, &[run], bg, opacity);
        }
    }

    fn paint_stage(&self, area: Rect, buf: &mut Buffer) {
        let geometry = PageGeometry::new(area.height, self.sections.len());
        let stage_top = geometry.stage_top(self.offset).round() as i32;
        if stage_top >= i32::from(area.height) {
            return;
        }
        let stage = Rect::new(
            area.x,
            area.y + stage_top as u16,
            area.width,
            area.height - stage_top as u16,
        );
        let bg = self.frame.background.color;
        let base_width = area.width.saturating_sub(4).min(MAX_CONTENT_WIDTH);

        // Least visible first so the dominant section ends up on top.
        let mut order: Vec<usize> = (0..self.sections.len().min(self.frame.sections.len())).collect();
        order.sort_by(|&a, &b| {
            self.frame.sections[a]
                .opacity
                .total_cmp(&self.frame.sections[b].opacity)
        });

        for i in order {
            let params = self.frame.sections[i];
            if params.opacity < MIN_VISIBLE_OPACITY {
                continue;
            }
            let width = (f64::from(base_width) * params.scale).floor() as usize;
            let rows = section_view::compose(&self.sections[i], width, self.tabs, self.card_reveal);
            let height = rows.len() as i32;
            let shift = params.offset.to_rows(self.px_per_row, f64::from(area.height));
            let top = stage_top + (i32::from(area.height) - height) / 2 + shift;
            for (r, row) in rows.iter().enumerate() {
                paint_row(buf, area, stage, top + r as i32, row, bg, params.opacity);
            }
        }
    }
}

impl<'a> Widget for PageWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.paint_background(area, buf);
        self.paint_stage(area, buf);
        self.paint_hero(area, buf);
    }
}

/// Paint one row centred horizontally at viewport row `y`, clipped to `clip`.
fn paint_row(buf: &mut Buffer, area: Rect, clip: Rect, y: i32, row: &[Run], bg: Rgb, opacity: f64) {
    if y < 0 {
        return;
    }
    let abs_y = area.y as i32 + y;
    if abs_y < clip.y as i32 || abs_y >= (clip.y + clip.height) as i32 {
        return;
    }
    let width = section_view::row_width(row) as u16;
    let mut x = area.x + area.width.saturating_sub(width) / 2;
    let right = area.x + area.width;
    for run in row {
        if x >= right {
            break;
        }
        let alpha = opacity * run.alpha;
        if alpha < MIN_VISIBLE_OPACITY {
            let skip = u16::try_from(run.text.chars().count()).unwrap_or(u16::MAX);
            x = x.saturating_add(skip).min(right);
            continue;
        }
        let style = Theme::role_style(run.role, bg, alpha);
        let (nx, _) = buf.set_stringn(x, abs_y as u16, &run.text, (right - x) as usize, style);
        x = nx;
    }
}

/// `INFINIO` → `I N F I N I O`, a poor terminal's display font.
fn spaced(s: &str) -> String {
    s.chars().map(String::from).collect::<Vec<_>>().join(" ")
}

/// Up-down bob of the scroll hint, in rows.
fn bob(tick: u64) -> i32 {
    i32::from((tick / 12) % 2 == 1)
}
