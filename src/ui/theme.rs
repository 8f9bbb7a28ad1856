//! Colour palette and text styles used across the UI.
//!
//! Terminals have no alpha channel, so "opacity" is rendered by mixing a
//! foreground colour toward the background it sits on.

use ratatui::style::{Color, Modifier, Style};

use crate::core::color::Rgb;

/// Below this opacity a layer is not painted at all.
pub const MIN_VISIBLE_OPACITY: f64 = 0.02;

/// Semantic role of a piece of page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Heading,
    Body,
    Accent,
    Muted,
    Border,
    /// Text on an accent-filled surface (popular plan, buttons).
    OnAccent,
    /// Check marks in feature lists.
    Check,
}

/// Central theme. Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub fn accent() -> Rgb {
        Rgb::new(0x3b, 0x82, 0xf6)
    }

    fn dark_text() -> Rgb {
        Rgb::new(0x1e, 0x29, 0x3b)
    }

    fn light_text() -> Rgb {
        Rgb::new(0xf8, 0xfa, 0xfc)
    }

    /// Base colour of a role on a given background: dark ink on light
    /// backgrounds, light ink on dark ones.
    pub fn role_color(role: Role, bg: Rgb) -> Rgb {
        let light_bg = bg.luma() > 0.5;
        match role {
            Role::Heading if light_bg => Self::dark_text(),
            Role::Heading => Self::light_text(),
            Role::Body if light_bg => Rgb::new(0x47, 0x55, 0x69),
            Role::Body => Rgb::new(0xcb, 0xd5, 0xe1),
            Role::Muted if light_bg => Rgb::new(0x64, 0x74, 0x8b),
            Role::Muted => Rgb::new(0x94, 0xa3, 0xb8),
            Role::Border if light_bg => Rgb::new(0xcb, 0xd5, 0xe1),
            Role::Border => Rgb::new(0x47, 0x55, 0x69),
            Role::Accent => Self::accent(),
            Role::OnAccent => Rgb::WHITE,
            Role::Check => Rgb::new(0x4a, 0xde, 0x80),
        }
    }

    /// Mix `fg` toward `bg` by `1 - opacity`.
    pub fn fade(fg: Rgb, bg: Rgb, opacity: f64) -> Rgb {
        bg.mix(fg, opacity.clamp(0.0, 1.0) as f32)
    }

    pub fn color(c: Rgb) -> Color {
        let (r, g, b) = c.to_bytes();
        Color::Rgb(r, g, b)
    }

    /// Style for a role painted at `opacity` over `bg`.
    pub fn role_style(role: Role, bg: Rgb, opacity: f64) -> Style {
        let fg = Self::fade(Self::role_color(role, bg), bg, opacity);
        // No background: the cell keeps whatever the page painted there.
        let style = Style::default().fg(Self::color(fg));
        match role {
            Role::Heading => style.add_modifier(Modifier::BOLD),
            Role::OnAccent => {
                let surface = Self::fade(Self::accent(), bg, opacity);
                style.bg(Self::color(surface)).add_modifier(Modifier::BOLD)
            }
            Role::Accent => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn status_message_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_opacity_is_background() {
        let bg = Rgb::new(0x11, 0x18, 0x27);
        assert_eq!(Theme::fade(Rgb::WHITE, bg, 0.0), bg);
        assert_eq!(Theme::fade(Rgb::WHITE, bg, 1.0), Rgb::WHITE);
    }

    #[test]
    fn ink_contrasts_with_background() {
        let light = Rgb::new(0xf8, 0xfa, 0xfc);
        let dark = Rgb::new(0x11, 0x18, 0x27);
        assert!(Theme::role_color(Role::Heading, light).luma() < 0.5);
        assert!(Theme::role_color(Role::Heading, dark).luma() > 0.5);
    }
}
