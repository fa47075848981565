use std::io::{self, IsTerminal, Stdout};

use anyhow::{Context, Result, bail};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    text::Text,
    widgets::{Clear, Paragraph},
};
use tracing::{debug, info};

use crate::{
    app::{ClickTracker, handle_keypress, handle_mouse},
    error::HexcompareError,
    render::render_frame,
    session::Session,
    source::FileSource,
};

/// Whether a `TERM` value names a terminal that can draw the coloured grid.
///
/// DEC `vt*` entries and `dumb` describe monochrome terminals.
fn term_supports_color(term: Option<&str>) -> bool {
    match term {
        None => false,
        Some(term) => {
            let term = term.trim();
            !term.is_empty() && term != "dumb" && !term.starts_with("vt")
        }
    }
}

fn draw_session<B: Backend>(terminal: &mut Terminal<B>, session: &mut Session) -> Result<()> {
    let lines = render_frame(session).context("failed to read bytes for display")?;

    let text = Text::from(lines);
    terminal.draw(move |frame| {
        let area = frame.area();
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(text), area);
    })?;

    Ok(())
}

fn run_event_loop<B: Backend>(terminal: &mut Terminal<B>, session: &mut Session) -> Result<()> {
    let mut clicks = ClickTracker::default();
    draw_session(terminal, session)?;

    loop {
        match event::read().context("failed to read terminal event")? {
            Event::Key(key) => {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }

                if handle_keypress(key, session).should_quit {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse(mouse, session, &mut clicks),
            Event::Resize(columns, rows) => {
                debug!(columns, rows, "terminal resized");
                session.resize(columns, rows)?;
            }
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
        }

        draw_session(terminal, session)?;
    }

    Ok(())
}

pub(crate) fn start_interactive_comparison(
    primary: FileSource,
    secondary: FileSource,
) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        bail!("Interactive TTY is required to run hexcompare");
    }

    let term = std::env::var("TERM").ok();
    if !term_supports_color(term.as_deref()) {
        debug!(?term, "terminal reports no colour support");
        return Err(HexcompareError::ColorUnsupported.into());
    }

    let (columns, rows) = crossterm::terminal::size().context("failed to read terminal size")?;
    let mut session = Session::new(primary, secondary, columns, rows)?;
    info!(columns, rows, "session ready");

    enable_raw_mode().context("failed to enable raw mode")?;

    let mut stdout = io::stdout();
    if let Err(error) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide) {
        let _ = disable_raw_mode();
        return Err(error).context("failed to initialize terminal UI");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(error) => {
            let _ = disable_raw_mode();
            let mut cleanup_stdout = io::stdout();
            let _ = execute!(
                cleanup_stdout,
                Show,
                DisableMouseCapture,
                LeaveAlternateScreen
            );
            return Err(error).context("failed to build terminal backend");
        }
    };

    let run_result = run_event_loop(&mut terminal, &mut session);
    restore_terminal(&mut terminal).context("failed to restore terminal state")?;

    run_result
}

/// Undoes raw mode, mouse capture and the alternate screen, reporting the first failure.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    let raw_mode = disable_raw_mode();
    let screen = execute!(
        terminal.backend_mut(),
        Show,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
    let cursor = terminal.show_cursor();

    raw_mode?;
    screen?;
    cursor?;
    Ok(())
}
