//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::ui::header::{header_items, HeaderTarget};
use crate::ui::layout::HEADER_HEIGHT;

use super::state::AppState;

/// Header must be at least this opaque before it accepts clicks.
const HEADER_CLICK_OPACITY: f64 = 0.5;

/// Process a key event through the configured bindings.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        // Unbound digits pick a pricing tab directly.
        if let Some(index) = tab_digit(key) {
            state.status_message = None;
            switch_tab(state, TabMove::Select(index));
        }
        return;
    };
    state.status_message = None;
    apply_action(state, action);
}

/// `1`..=`9` without modifiers, as a zero-based tab index.
fn tab_digit(key: KeyEvent) -> Option<usize> {
    match (key.code, key.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            c.to_digit(10).map(|d| d as usize - 1)
        }
        _ => None,
    }
}

fn apply_action(state: &mut AppState, action: Action) {
    let wheel = f64::from(state.config.page.animation.wheel_rows);
    let page = f64::from(state.viewport.height.max(1));
    let last = state.animator.total() - 1;

    match action {
        Action::ScrollDown => state.scroll.scroll_by(wheel),
        Action::ScrollUp => state.scroll.scroll_by(-wheel),
        Action::PageDown => state.scroll.scroll_by(page),
        Action::PageUp => state.scroll.scroll_by(-page),
        Action::NextSection => {
            let next = if state.scroll.target() < state.geometry().scroll_region().start {
                0
            } else {
                (state.target_section() + 1).min(last)
            };
            state.scroll_to_section(next);
        }
        Action::PrevSection => {
            // Before the first section, the hero is the previous stop.
            match state.target_section() {
                0 => state.scroll.scroll_to(0.0),
                current => state.scroll_to_section(current - 1),
            }
        }
        Action::Top => {
            tracing::debug!("scroll to top");
            state.scroll.scroll_to(0.0);
        }
        Action::GetStarted => state.scroll_to_section(last),
        Action::NextTab => switch_tab(state, TabMove::Next),
        Action::PrevTab => switch_tab(state, TabMove::Prev),
        Action::ToggleHeaderColor => match state.toggle_header_color() {
            Ok(()) => {
                let mode = if state.header_color_is_fixed() {
                    "fixed"
                } else {
                    "interpolated"
                };
                tracing::debug!(mode, "header text color");
                state.status_message = Some(format!("Header color: {mode}"));
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot switch header color");
                state.status_message = Some(format!("Header color unchanged: {err}"));
            }
        },
        Action::Quit => state.should_quit = true,
    }
}

#[derive(Debug, Clone, Copy)]
enum TabMove {
    Next,
    Prev,
    Select(usize),
}

/// Change the pricing tab, but only while the pricing section is the one
/// accepting input.
fn switch_tab(state: &mut AppState, to: TabMove) {
    let Some(section) = state.pricing_index else {
        return;
    };
    let interactive = state
        .frame()
        .sections
        .get(section)
        .is_some_and(|p| p.interactive);
    if !interactive {
        state.status_message = Some("Scroll to the pricing section to switch plans".to_string());
        return;
    }
    let Some(tabs) = state.tabs.as_mut() else {
        return;
    };
    match to {
        TabMove::Next => tabs.next(),
        TabMove::Prev => tabs.prev(),
        TabMove::Select(index) => {
            if !tabs.select(index) {
                state.status_message = Some(format!("No plan tab {}", index + 1));
                return;
            }
        }
    }
    if let Some(active) = tabs.active() {
        tracing::debug!(category = %active.name, "pricing tab");
    }
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let wheel = f64::from(state.config.page.animation.wheel_rows);
    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll.scroll_by(wheel),
        MouseEventKind::ScrollUp => state.scroll.scroll_by(-wheel),
        MouseEventKind::Down(MouseButton::Left) => handle_click(state, mouse.column, mouse.row),
        _ => {}
    }
}

fn handle_click(state: &mut AppState, col: u16, row: u16) {
    let header = state.frame().header;
    if header.opacity < HEADER_CLICK_OPACITY {
        return;
    }
    // Items are laid out for a fully slid-in header; follow the slide.
    let shift = header.offset.to_rows(1.0, f64::from(HEADER_HEIGHT));
    let area = state.viewport;
    let target = header_items(area, &state.config.page.hero.brand, &state.nav_titles())
        .into_iter()
        .find(|item| {
            i32::from(item.rect.y) + shift == i32::from(row)
                && col >= item.rect.x
                && col < item.rect.x.saturating_add(item.rect.width)
        })
        .map(|item| item.target);

    match target {
        Some(HeaderTarget::Section(i)) => state.scroll_to_section(i),
        Some(HeaderTarget::GetStarted) => apply_action(state, Action::GetStarted),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, PageConfig};
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn state() -> AppState {
        let mut state = AppState::new(AppConfig::new(PageConfig::default())).unwrap();
        state.set_viewport(Rect::new(0, 0, 100, 40));
        state
    }

    fn settle(state: &mut AppState) {
        while state.scroll.is_animating() {
            state.scroll.tick();
        }
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
        settle(state);
    }

    fn click(state: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
        settle(state);
    }

    #[test]
    fn next_section_walks_from_hero_to_end() {
        let mut state = state();
        for expected in [0, 1, 2, 3, 3] {
            press(&mut state, KeyCode::Char('n'));
            assert_eq!(state.frame().current, expected);
        }
        press(&mut state, KeyCode::Char('p'));
        assert_eq!(state.frame().current, 2);
    }

    #[test]
    fn prev_from_first_section_returns_to_hero() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        press(&mut state, KeyCode::Char('p'));
        assert_eq!(state.scroll.position(), 0.0);
    }

    #[test]
    fn get_started_and_top() {
        let mut state = state();
        press(&mut state, KeyCode::End);
        assert_eq!(state.frame().current, 3);
        assert!(state.frame().sections[3].interactive);
        press(&mut state, KeyCode::Home);
        assert_eq!(state.scroll.position(), 0.0);
    }

    #[test]
    fn tabs_switch_only_on_pricing_section() {
        let mut state = state();
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.tabs.as_ref().map(|t| t.active_index()), Some(0));
        assert!(state.status_message.is_some());

        state.scroll_to_section(2);
        settle(&mut state);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.tabs.as_ref().map(|t| t.active_index()), Some(1));
        assert!(state.status_message.is_none());
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
        );
        assert_eq!(state.tabs.as_ref().map(|t| t.active_index()), Some(0));
    }

    #[test]
    fn digits_select_tabs_directly() {
        let mut state = state();
        press(&mut state, KeyCode::Char('2'));
        assert_eq!(state.tabs.as_ref().map(|t| t.active_index()), Some(0));
        assert!(state.status_message.is_some());

        state.scroll_to_section(2);
        settle(&mut state);
        press(&mut state, KeyCode::Char('2'));
        assert_eq!(state.tabs.as_ref().map(|t| t.active_index()), Some(1));
        assert!(state.status_message.is_none());
        press(&mut state, KeyCode::Char('1'));
        assert_eq!(state.tabs.as_ref().map(|t| t.active_index()), Some(0));

        press(&mut state, KeyCode::Char('9'));
        assert_eq!(state.tabs.as_ref().map(|t| t.active_index()), Some(0));
        assert_eq!(state.status_message.as_deref(), Some("No plan tab 9"));
    }

    #[test]
    fn wheel_scrolls_by_configured_rows() {
        let mut state = state();
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut state, wheel);
        assert_eq!(
            state.scroll.target(),
            f64::from(state.config.page.animation.wheel_rows)
        );
    }

    #[test]
    fn header_click_navigates_once_visible() {
        let mut state = state();
        let about = header_items(state.viewport, &state.config.page.hero.brand, &state.nav_titles())
            .into_iter()
            .find(|i| i.target == HeaderTarget::Section(1))
            .unwrap()
            .rect;

        // Header hidden over the hero: clicks fall through.
        click(&mut state, about.x, about.y);
        assert_eq!(state.scroll.position(), 0.0);

        state.scroll_to_section(0);
        settle(&mut state);
        click(&mut state, about.x, about.y);
        assert_eq!(state.frame().current, 1);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = state();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        handle_key(&mut state, key);
        assert!(!state.should_quit);
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }
}
