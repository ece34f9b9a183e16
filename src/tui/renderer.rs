//! Owns the terminal for the lifetime of the view.
//!
//! [`Renderer::new`] switches to raw mode and the alternate screen; dropping
//! the renderer (or calling [`Renderer::restore`]) switches back, so the
//! shell is left usable on every exit path. Draw requests are coalesced to at
//! most one frame per [`MIN_REDRAW_INTERVAL`].

use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::Instant;

use super::app::App;
use super::ui;
use crate::Result;

/// Four frames per second at most.
pub const MIN_REDRAW_INTERVAL: Duration = Duration::from_millis(250);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Something that can show the current state.
///
/// Only [`present`](Present::present) is required; views that draw
/// synchronously can ignore the deferred-redraw hooks.
pub trait Present {
    /// Asks for the state to be shown. May be deferred, never dropped.
    fn present(&mut self, app: &App) -> Result<()>;

    /// Marks the view stale, e.g. after a resize.
    fn request_redraw(&mut self) {}

    /// When a deferred frame is due, if any.
    fn next_redraw(&self) -> Option<Instant> {
        None
    }

    /// Draws a deferred frame if it is due.
    fn flush(&mut self, _app: &App) -> Result<()> {
        Ok(())
    }
}

/// Decides when a pending redraw may go out.
#[derive(Debug)]
pub struct RedrawThrottle {
    min_interval: Duration,
    last_draw: Option<Instant>,
    dirty: bool,
}

impl RedrawThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_draw: None,
            dirty: false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// When the pending redraw may be drawn, or `None` if nothing is pending.
    pub fn due_at(&self) -> Option<Instant> {
        if !self.dirty {
            return None;
        }
        Some(match self.last_draw {
            Some(last) => last + self.min_interval,
            None => Instant::now(),
        })
    }

    /// Returns `true` and clears the pending flag if a frame may be drawn now.
    pub fn take_if_due(&mut self, now: Instant) -> bool {
        let due = self.dirty
            && self
                .last_draw
                .is_none_or(|last| last + self.min_interval <= now);
        if due {
            self.dirty = false;
            self.last_draw = Some(now);
        }
        due
    }
}

/// Full-screen renderer for the price view.
pub struct Renderer {
    terminal: Tui,
    throttle: RedrawThrottle,
    restored: bool,
}

impl Renderer {
    /// Takes over the terminal.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Io`](crate::AlertError::Io) if stdout is not a
    /// TTY or the terminal cannot be switched to raw mode.
    pub fn new() -> Result<Self> {
        if !io::stdout().is_terminal() {
            return Err(crate::AlertError::Io(
                "the price view requires an interactive terminal (TTY)".to_string(),
            ));
        }

        enable_raw_mode()
            .map_err(|e| crate::AlertError::Io(format!("failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode();
            crate::AlertError::Io(format!("failed to enter alternate screen: {e}"))
        })?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            crate::AlertError::Io(format!("failed to create terminal: {e}"))
        })?;

        Ok(Self {
            terminal,
            throttle: RedrawThrottle::new(MIN_REDRAW_INTERVAL),
            restored: false,
        })
    }

    /// Hands the terminal back to the shell.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Io`](crate::AlertError::Io) if raw mode or the
    /// alternate screen cannot be left.
    pub fn restore(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode().map_err(|e| crate::AlertError::Io(e.to_string()))?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| crate::AlertError::Io(e.to_string()))?;
        self.terminal
            .show_cursor()
            .map_err(|e| crate::AlertError::Io(e.to_string()))?;
        Ok(())
    }
}

impl Present for Renderer {
    fn present(&mut self, app: &App) -> Result<()> {
        self.request_redraw();
        self.flush(app)
    }

    fn request_redraw(&mut self) {
        self.throttle.mark_dirty();
    }

    fn next_redraw(&self) -> Option<Instant> {
        self.throttle.due_at()
    }

    /// Draws a frame if one is pending and the throttle allows it.
    fn flush(&mut self, app: &App) -> Result<()> {
        if self.throttle.take_if_due(Instant::now()) {
            self.terminal
                .draw(|frame| ui::render(frame, app))
                .map_err(|e| crate::AlertError::Io(format!("failed to draw: {e}")))?;
        }
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.release();
    }
}
