//! Floating navigation header painted over the top rows of the page.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::core::{color::Rgb, header::HeaderParams};

use super::layout::HEADER_HEIGHT;
use super::theme::{Theme, MIN_VISIBLE_OPACITY};

const BRAND_MARK: &str = "◆ ";
const GET_STARTED: &str = " Get Started ";
const NAV_GAP: u16 = 3;

/// Where a clickable header element sits and what it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTarget {
    Section(usize),
    GetStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderItem {
    pub rect: Rect,
    pub target: HeaderTarget,
}

fn brand_width(brand: &str) -> usize {
    BRAND_MARK.chars().count() + brand.chars().count()
}

/// Clickable items on the text row of the header.  Nav entries are dropped
/// when they would collide with the brand or the button.
pub fn header_items(area: Rect, brand: &str, titles: &[&str]) -> Vec<HeaderItem> {
    let row = area.y + 1;
    let mut items = Vec::new();
    let button_width = GET_STARTED.chars().count() as u16;
    if area.width < button_width + 2 {
        return items;
    }
    let button_x = area.x + area.width - button_width - 1;
    items.push(HeaderItem {
        rect: Rect::new(button_x, row, button_width, 1),
        target: HeaderTarget::GetStarted,
    });

    // Widths are summed in usize: long titles must not wrap a u16.
    let gap = usize::from(NAV_GAP);
    let nav_width = titles.iter().map(|t| t.chars().count()).sum::<usize>()
        + gap * titles.len().saturating_sub(1);
    let brand_end = usize::from(area.x) + 2 + brand_width(brand) + gap;
    let start = (usize::from(area.x) + usize::from(area.width).saturating_sub(nav_width) / 2)
        .max(brand_end);
    if titles.is_empty() || start + nav_width + gap > usize::from(button_x) {
        return items;
    }
    // Everything now fits left of the button, so the u16 casts are exact.
    let mut x = start as u16;
    for (i, title) in titles.iter().enumerate() {
        let w = title.chars().count() as u16;
        items.push(HeaderItem {
            rect: Rect::new(x, row, w, 1),
            target: HeaderTarget::Section(i),
        });
        x += w + NAV_GAP;
    }
    items
}

pub struct HeaderWidget<'a> {
    params: &'a HeaderParams,
    /// Page background behind the header.
    background: Rgb,
    brand: &'a str,
    /// Titles of the sections that get a nav entry.
    titles: &'a [&'a str],
    current: usize,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(params: &'a HeaderParams, background: Rgb, titles: &'a [&'a str]) -> Self {
        Self {
            params,
            background,
            brand: "",
            titles,
            current: 0,
        }
    }

    pub fn brand(mut self, brand: &'a str) -> Self {
        self.brand = brand;
        self
    }

    pub fn current(mut self, current: usize) -> Self {
        self.current = current;
        self
    }
}

impl<'a> Widget for HeaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let opacity = self.params.opacity;
        if opacity < MIN_VISIBLE_OPACITY || area.width == 0 {
            return;
        }
        // Slides down from above while it fades in.
        let shift = self.params.offset.to_rows(1.0, f64::from(HEADER_HEIGHT));
        let top = i32::from(area.y) + shift;
        let visible = |y: i32| y >= i32::from(area.y) && y < i32::from(area.y + area.height);

        let bg = self.background;
        let surface = Theme::fade(bg.mix(Rgb::WHITE, 0.06), bg, opacity);
        let ink = Theme::fade(self.params.text_color, surface, opacity);
        let muted = Theme::fade(self.params.text_color, surface, opacity * 0.6);
        let accent = Theme::fade(Theme::accent(), surface, opacity);

        for dy in 0..HEADER_HEIGHT {
            let y = top + i32::from(dy);
            if visible(y) {
                let row = Rect::new(area.x, y as u16, area.width, 1);
                buf.set_style(row, Style::default().bg(Theme::color(surface)));
            }
        }

        let text_y = top + 1;
        if visible(text_y) {
            let y = text_y as u16;
            let brand = Style::default()
                .fg(Theme::color(ink))
                .add_modifier(Modifier::BOLD);
            let label = format!("{BRAND_MARK}{}", self.brand);
            buf.set_stringn(area.x + 2, y, label, area.width.saturating_sub(2) as usize, brand);

            let placed = header_items(area, self.brand, self.titles);
            for item in placed {
                let (label, style) = match item.target {
                    HeaderTarget::Section(i) => {
                        let style = if i == self.current {
                            Style::default()
                                .fg(Theme::color(accent))
                                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                        } else {
                            Style::default().fg(Theme::color(muted))
                        };
                        (self.titles[i], style)
                    }
                    HeaderTarget::GetStarted => (
                        GET_STARTED,
                        Style::default()
                            .fg(Theme::color(Theme::fade(Rgb::WHITE, surface, opacity)))
                            .bg(Theme::color(accent))
                            .add_modifier(Modifier::BOLD),
                    ),
                };
                buf.set_stringn(item.rect.x, y, label, item.rect.width as usize, style);
            }
        }

        let rule_y = top + i32::from(HEADER_HEIGHT) - 1;
        if visible(rule_y) {
            let rule = Theme::fade(Theme::accent(), surface, opacity * 0.4);
            buf.set_stringn(
                area.x,
                rule_y as u16,
                "─".repeat(area.width as usize),
                area.width as usize,
                Style::default().fg(Theme::color(rule)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interpolate::Distance;

    const BRAND: &str = "INFINIO";
    const TITLES: [&str; 3] = ["Welcome", "About", "Pricing"];

    #[test]
    fn wide_header_has_nav_and_button() {
        let items = header_items(Rect::new(0, 0, 100, 3), BRAND, &TITLES);
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].target, HeaderTarget::GetStarted);
        assert_eq!(items[0].rect.right(), 99);
        assert_eq!(items[1].target, HeaderTarget::Section(0));
        assert!(usize::from(items[1].rect.x) > brand_width(BRAND));
        for pair in items[1..].windows(2) {
            assert!(pair[0].rect.right() < pair[1].rect.x);
        }
        assert!(items[3].rect.right() < items[0].rect.x);
    }

    #[test]
    fn narrow_header_drops_nav() {
        let items = header_items(Rect::new(0, 0, 40, 3), BRAND, &TITLES);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].target, HeaderTarget::GetStarted);
    }

    #[test]
    fn hidden_header_paints_nothing() {
        let params = HeaderParams {
            opacity: 0.0,
            offset: Distance::percent(-100.0),
            text_color: Rgb::WHITE,
        };
        let area = Rect::new(0, 0, 100, 3);
        let mut buf = Buffer::empty(area);
        HeaderWidget::new(&params, Rgb::BLACK, &TITLES).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn visible_header_shows_brand_and_current_section() {
        let params = HeaderParams {
            opacity: 1.0,
            offset: Distance::percent(0.0),
            text_color: Rgb::WHITE,
        };
        let area = Rect::new(0, 0, 100, 3);
        let mut buf = Buffer::empty(area);
        HeaderWidget::new(&params, Rgb::BLACK, &TITLES)
            .brand(BRAND)
            .current(1)
            .render(area, &mut buf);
        let row: String = (0..100).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("◆ INFINIO"));
        assert!(row.contains("About"));
        assert!(row.contains("Get Started"));
        let about = header_items(area, BRAND, &TITLES)[2].rect;
        assert!(buf[(about.x, 1)].modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn brand_comes_from_the_page() {
        let params = HeaderParams {
            opacity: 1.0,
            offset: Distance::percent(0.0),
            text_color: Rgb::WHITE,
        };
        let area = Rect::new(0, 0, 100, 3);
        let mut buf = Buffer::empty(area);
        HeaderWidget::new(&params, Rgb::BLACK, &TITLES)
            .brand("ACME")
            .render(area, &mut buf);
        let row: String = (0..100).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("◆ ACME"));
        assert!(!row.contains("INFINIO"));
    }

    #[test]
    fn long_brand_pushes_nav_out() {
        let brand = "B".repeat(60);
        let items = header_items(Rect::new(0, 0, 100, 3), &brand, &TITLES);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn oversized_titles_leave_only_the_button() {
        let long = "T".repeat(30_000);
        let titles = [long.as_str(), long.as_str(), long.as_str()];
        let items = header_items(Rect::new(0, 0, 200, 3), BRAND, &titles);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].target, HeaderTarget::GetStarted);
    }
}
