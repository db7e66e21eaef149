//! Terminal user interface (TUI) for jobdeck.
//!
//! ## Entry points
//!
//! - [`run_browser`]: full-screen job browser with filters, paging and the
//!   add/edit form.

pub mod browser;
pub mod form_dialog;
mod text;

use anyhow::{Context, Result, anyhow};
use browser::Browser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use jobdeck_core::api::JobsApi;
use jobdeck_core::session::Session;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::{Duration, Instant};
use tracing::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Take over the terminal and run the browser until the user quits.
///
/// The terminal is restored on every exit path, including errors.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to, or read.
pub fn run_browser<A: JobsApi>(api: A, page_size: u32) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, terminal::EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err).context("enter alternate screen");
    }

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .context("create terminal")
        .and_then(|mut term| event_loop(&mut term, Browser::new(Session::new(api, page_size))));

    let restored = restore_terminal();
    if result.is_err()
        && let Err(err) = &restored
    {
        warn!(error = %format!("{err:#}"), "terminal restore failed");
    }
    result.and(restored)
}

fn restore_terminal() -> Result<()> {
    restore_with(disable_raw_mode, || {
        execute!(io::stdout(), terminal::LeaveAlternateScreen)
    })
}

/// Run both restore steps even when the first fails, reporting every failure.
fn restore_with(
    disable_raw: impl FnOnce() -> io::Result<()>,
    leave_screen: impl FnOnce() -> io::Result<()>,
) -> Result<()> {
    let raw = disable_raw().context("disable raw mode");
    let screen = leave_screen().context("leave alternate screen");
    match (raw, screen) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
        (Err(raw), Err(screen)) => Err(anyhow!("{raw:#}; {screen:#}")),
    }
}

fn event_loop<A: JobsApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut browser: Browser<A>,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| {
                let area = frame.area();
                browser.render(frame, area);
            })
            .context("draw frame")?;

        // Drawn with the progress message; now do the blocking work.
        if browser.has_deferred() {
            browser.run_deferred(Instant::now());
            continue;
        }

        let timeout = browser
            .keyword_deadline(Instant::now())
            .map_or(POLL_INTERVAL, |d| d.min(POLL_INTERVAL));
        if event::poll(timeout).context("poll event")? {
            match event::read().context("read event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => browser.handle_key(key),
                _ => {}
            }
        }

        browser.tick(Instant::now());
        if browser.should_quit() {
            return Ok(());
        }
    }
}
