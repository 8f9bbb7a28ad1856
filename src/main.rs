//! A scroll-driven landing page in the terminal.
//!
//! Run the binary to scroll through the page.  Run with `--frame <PROGRESS>`
//! to print the animation state for one scroll position as JSON.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::{AppConfig, PageConfig};
use crate::core::{color::Rgb, progress::Progress};
use crate::ui::{
    header::HeaderWidget, layout::AppLayout, page::PageWidget, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven landing page for the terminal")]
struct Cli {
    /// Page config file (defaults to `$XDG_CONFIG_HOME/scroll-page/page.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the computed frame at this progress (0..=1) as JSON and exit.
    #[arg(long, value_name = "PROGRESS", allow_negative_numbers = true)]
    frame: Option<f64>,

    /// Paint the header text in one fixed color, e.g. `#F8FAFC`.
    #[arg(long, value_name = "HEX")]
    fixed_header_color: Option<Rgb>,

    /// Section fade margin, as a fraction of the whole scroll (0..=0.5).
    #[arg(long, value_name = "M")]
    margin: Option<f64>,

    /// Print the built-in page config as TOML and exit.
    #[arg(long)]
    write_default_config: bool,
}

impl Cli {
    /// Overlay command-line overrides on the loaded page.
    fn apply(&self, page: &mut PageConfig) {
        if let Some(color) = self.fixed_header_color {
            page.header.fixed_text_color = Some(color);
        }
        if let Some(margin) = self.margin {
            page.animation.margin = margin;
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    if cli.write_default_config {
        print!("{}", PageConfig::default().to_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading page config")?;
    cli.apply(&mut config.page);

    // ── headless mode ─────────────────────────────────────────
    if let Some(progress) = cli.frame {
        let animator = config.page.build_animator()?;
        let frame = animator.compute_frame(Progress::new(progress));
        println!("{}", serde_json::to_string_pretty(&frame)?);
        return Ok(());
    }

    let mut state = AppState::new(config)?;
    tracing::debug!(
        sections = state.animator.total(),
        margin = state.animator.margin(),
        "page ready"
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let frame_interval = Duration::from_millis(state.config.page.animation.frame_ms.max(1));
    let mut events = spawn_event_reader(frame_interval);

    loop {
        terminal.draw(|f| {
            let layout = AppLayout::from_area(f.area());
            state.set_viewport(layout.page_area);

            // Every draw recomputes the whole frame from the painted offset.
            let frame = state.frame();
            let page = &state.config.page;

            let page_widget = PageWidget::new(&frame, &page.sections, &page.hero)
                .tabs(state.tabs.as_ref())
                .offset(state.scroll.position())
                .px_per_row(page.animation.px_per_row)
                .tick(state.tick)
                .intro(state.hero_intro())
                .card_reveal(state.card_reveal());
            f.render_widget(page_widget, layout.page_area);

            let titles = state.nav_titles();
            let header = HeaderWidget::new(&frame.header, frame.background.color, &titles)
                .brand(&page.hero.brand)
                .current(frame.current);
            f.render_widget(header, layout.header_area);

            let hint = state.config.status_bar_hint();
            let status = match state.status_message.as_deref() {
                Some(msg) => Paragraph::new(msg).style(Theme::status_message_style()),
                None => Paragraph::new(hint).style(Theme::status_bar_style()),
            };
            f.render_widget(status, layout.status_area);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            // Picked up by the next draw through `set_viewport`.
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => state.on_tick(),
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_to_page() {
        let cli = Cli::parse_from([
            "scroll-page",
            "--margin",
            "0.2",
            "--fixed-header-color",
            "#112233",
        ]);
        let mut page = PageConfig::default();
        cli.apply(&mut page);
        assert_eq!(page.animation.margin, 0.2);
        assert_eq!(page.header.fixed_text_color, Some(Rgb::new(0x11, 0x22, 0x33)));
    }

    #[test]
    fn no_flags_leave_page_untouched() {
        let cli = Cli::parse_from(["scroll-page"]);
        let mut page = PageConfig::default();
        cli.apply(&mut page);
        assert_eq!(page.to_toml().unwrap(), PageConfig::default().to_toml().unwrap());
    }

    #[test]
    fn negative_frame_progress_parses() {
        let cli = Cli::parse_from(["scroll-page", "--frame", "-0.5"]);
        assert_eq!(cli.frame, Some(-0.5));
    }
}
