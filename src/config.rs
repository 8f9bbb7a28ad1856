//! User configuration: page content, animation tuning and keybindings.
//!
//! Everything lives in one TOML file at
//! `$XDG_CONFIG_HOME/scroll-page/page.toml` (default
//! `~/.config/scroll-page/page.toml`).  Every field has a default, so a missing
//! file or a partial one both work; the built-in page is the INFINIO landing
//! page.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::core::{
    background::{self, Aurora, BackgroundModel},
    color::Rgb,
    content::{self, Hero, Section},
    error::ConfigError,
    frame::Animator,
    header::{self, HeaderModel, HeaderTextColor},
    pricing::PricingTabs,
    section,
};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    NextSection,
    PrevSection,
    Top,
    GetStarted,
    NextTab,
    PrevTab,
    ToggleHeaderColor,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help line and config file).
    pub const ALL: &[Action] = &[
        Action::ScrollDown,
        Action::ScrollUp,
        Action::PageDown,
        Action::PageUp,
        Action::NextSection,
        Action::PrevSection,
        Action::Top,
        Action::GetStarted,
        Action::NextTab,
        Action::PrevTab,
        Action::ToggleHeaderColor,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::PageDown => "page_down",
            Action::PageUp => "page_up",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::Top => "top",
            Action::GetStarted => "get_started",
            Action::NextTab => "next_tab",
            Action::PrevTab => "prev_tab",
            Action::ToggleHeaderColor => "toggle_header_color",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Shift+Tab"`, `"↓"`, `"q"`).
    pub fn display(&self) -> String {
        self.format(true)
    }

    /// Config-file form (e.g. `"Shift+Tab"`, `"Down"`, `"q"`).
    fn to_config_string(&self) -> String {
        self.format(false)
    }

    fn format(&self, arrows: bool) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up if arrows => "↑".into(),
            KeyCode::Down if arrows => "↓".into(),
            KeyCode::Left if arrows => "←".into(),
            KeyCode::Right if arrows => "→".into(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab | KeyCode::BackTab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Tab"`, `"q"`, `"PageDown"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.trim().split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.trim().to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.trim().to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            // crossterm reports Shift+Tab as BackTab
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => {
                let n: u8 = k[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ => {
                // Keep the case for single characters ("G" ≠ "g").
                let mut chars = key_part.trim().chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

/// Built-in bindings.
pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
    use Action::*;
    use KeyCode::*;
    let n = KeyModifiers::NONE;
    let shift = KeyModifiers::SHIFT;
    let mut m = HashMap::new();

    m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
    m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
    m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)]);
    m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
    m.insert(NextSection, vec![KeyBind::new(Right, n), KeyBind::new(Char('n'), n)]);
    m.insert(PrevSection, vec![KeyBind::new(Left, n), KeyBind::new(Char('p'), n)]);
    m.insert(Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
    m.insert(GetStarted, vec![KeyBind::new(End, n), KeyBind::new(Enter, n)]);
    m.insert(NextTab, vec![KeyBind::new(Tab, n)]);
    m.insert(PrevTab, vec![KeyBind::new(BackTab, shift)]);
    m.insert(ToggleHeaderColor, vec![KeyBind::new(Char('c'), n)]);
    m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

    m
}

// ───────────────────────────────────────── page config ───────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub at: f64,
    pub color: Rgb,
}

fn stops(raw: Vec<(f64, Rgb)>) -> Vec<ColorStop> {
    raw.into_iter().map(|(at, color)| ColorStop { at, color }).collect()
}

fn pairs(stops: &[ColorStop]) -> Vec<(f64, Rgb)> {
    stops.iter().map(|s| (s.at, s.color)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Fade margin of each section window, as a fraction of total progress.
    pub margin: f64,
    /// How many CSS-style pixels one terminal row stands for.
    pub px_per_row: f64,
    /// Animation tick interval.
    pub frame_ms: u64,
    /// Smooth-scroll damping per tick, `0.05..=0.95`.
    pub smooth_scroll_speed: f64,
    /// Rows scrolled per wheel notch / arrow key.
    pub wheel_rows: u16,
}

impl AnimationConfig {
    /// Reject tuning values that would stall or scramble the animation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.05..=0.95).contains(&self.smooth_scroll_speed) {
            return Err(ConfigError::ScrollSpeed(self.smooth_scroll_speed));
        }
        if !self.px_per_row.is_finite() || self.px_per_row <= 0.0 {
            return Err(ConfigError::PxPerRow(self.px_per_row));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::FrameInterval);
        }
        Ok(())
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            margin: section::DEFAULT_MARGIN,
            px_per_row: 16.0,
            frame_ms: 16,
            smooth_scroll_speed: 0.3,
            wheel_rows: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub epsilon: f64,
    /// When set, the header text keeps this color instead of following
    /// `text_color`.
    pub fixed_text_color: Option<Rgb>,
    pub text_color: Vec<ColorStop>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            epsilon: header::DEFAULT_EPSILON,
            fixed_text_color: None,
            text_color: stops(header::default_text_stops()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuroraConfig {
    pub tint: Rgb,
    pub from: f64,
    pub to: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub stops: Vec<ColorStop>,
    pub aurora: Option<AuroraConfig>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            stops: stops(background::default_stops()),
            aurora: None,
        }
    }
}

/// The whole page: content plus every curve that animates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub animation: AnimationConfig,
    pub header: HeaderConfig,
    pub background: BackgroundConfig,
    pub hero: Hero,
    pub sections: Vec<Section>,
    /// Action name → key strings.  Actions not listed keep their defaults.
    pub keys: BTreeMap<String, Vec<String>>,
}

impl Default for PageConfig {
    fn default() -> Self {
        let defaults = default_bindings();
        let keys = Action::ALL
            .iter()
            .filter_map(|a| {
                let binds = defaults.get(a)?;
                Some((
                    a.config_key().to_string(),
                    binds.iter().map(KeyBind::to_config_string).collect(),
                ))
            })
            .collect();
        Self {
            animation: AnimationConfig::default(),
            header: HeaderConfig::default(),
            background: BackgroundConfig::default(),
            hero: Hero::default(),
            sections: content::default_sections(),
            keys,
        }
    }
}

impl PageConfig {
    pub fn from_toml(src: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(src).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Header text color source, honouring `fixed_text_color`.
    pub fn header_text_color(&self) -> Result<HeaderTextColor, ConfigError> {
        match self.header.fixed_text_color {
            Some(color) => Ok(HeaderTextColor::Fixed(color)),
            None => HeaderTextColor::interpolated(&pairs(&self.header.text_color))
                .map_err(ConfigError::curve("header text color")),
        }
    }

    /// Validate every curve and assemble the animator.
    pub fn build_animator(&self) -> Result<Animator, ConfigError> {
        self.animation.validate()?;
        if let Some(aurora) = &self.background.aurora {
            if !(0.0..=1.0).contains(&aurora.opacity) {
                return Err(ConfigError::AuroraOpacity(aurora.opacity));
            }
        }
        let header = HeaderModel::new(self.header.epsilon, self.header_text_color()?)?;
        let aurora = self
            .background
            .aurora
            .as_ref()
            .map(|a| Aurora::new(a.tint, a.from, a.to, a.opacity))
            .transpose()
            .map_err(ConfigError::curve("aurora"))?;
        let background = BackgroundModel::new(&pairs(&self.background.stops), aurora)
            .map_err(ConfigError::curve("background"))?;
        Animator::new(self.sections.len(), self.animation.margin, header, background)
    }

    /// Tab state for the first pricing section, if the page has one.
    pub fn pricing_tabs(&self) -> Result<Option<PricingTabs>, ConfigError> {
        self.sections
            .iter()
            .find_map(|s| s.pricing_categories())
            .map(|categories| PricingTabs::new(categories.to_vec()))
            .transpose()
    }

    /// Defaults overlaid with the `[keys]` table.
    pub fn bindings(&self) -> HashMap<Action, Vec<KeyBind>> {
        let mut bindings = default_bindings();
        for (key, values) in &self.keys {
            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(key = %key, "unknown action in [keys]");
                continue;
            };
            let parsed: Vec<KeyBind> = values
                .iter()
                .filter_map(|v| {
                    let bind = KeyBind::parse(v);
                    if bind.is_none() {
                        tracing::warn!(action = %key, value = %v, "unparseable key binding");
                    }
                    bind
                })
                .collect();
            if !parsed.is_empty() {
                bindings.insert(action, parsed);
            }
        }
        bindings
    }
}

// ───────────────────────────────────────── app config ────────

/// Loaded configuration: the page plus resolved keybindings.
pub struct AppConfig {
    pub page: PageConfig,
    pub bindings: HashMap<Action, Vec<KeyBind>>,
}

impl AppConfig {
    pub fn new(page: PageConfig) -> Self {
        let bindings = page.bindings();
        Self { page, bindings }
    }

    /// Load from `explicit` if given (it must exist), otherwise from the
    /// default path, falling back to the built-in page when that is absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = config_path();
                if !p.exists() {
                    tracing::debug!(path = %p.display(), "no config file, using built-in page");
                    return Ok(Self::new(PageConfig::default()));
                }
                p
            }
        };
        let src = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let page = PageConfig::from_toml(&src, &path)?;
        tracing::debug!(path = %path.display(), sections = page.sections.len(), "loaded page config");
        Ok(Self::new(page))
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: sections | {}: tabs | {}: header color | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::PrevSection),
            self.short_binding(Action::NextTab),
            self.short_binding(Action::ToggleHeaderColor),
            self.short_binding(Action::Quit),
        )
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/scroll-page/page.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scroll-page").join("page.toml")
}
