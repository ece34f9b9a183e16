//! Event handling for the TUI.

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures_util::StreamExt;
use tracing::warn;

/// Terminal events the watcher reacts to.
#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    /// The user asked to leave.
    Quit,
    /// The terminal was resized; the view must be redrawn.
    Resize,
    /// Anything else.
    Other,
}

impl From<CrosstermEvent> for Event {
    fn from(event: CrosstermEvent) -> Self {
        match event {
            CrosstermEvent::Key(key) if is_quit_key(&key) => Event::Quit,
            CrosstermEvent::Resize(_, _) => Event::Resize,
            _ => Event::Other,
        }
    }
}

/// `q`, `Esc`, and `Ctrl-C` (raw mode swallows SIGINT) all quit.
fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => key.modifiers.is_empty(),
        _ => false,
    }
}

/// Anything that yields terminal events.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    /// Waits for the next event.
    async fn next(&mut self) -> Event;
}

/// Async stream of terminal events.
pub struct Events {
    stream: EventStream,
}

impl Events {
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }
}

impl EventSource for Events {
    /// A closed input stream reads as [`Event::Quit`].
    async fn next(&mut self) -> Event {
        match self.stream.next().await {
            Some(Ok(event)) => event.into(),
            Some(Err(e)) => {
                warn!("terminal input error: {e}");
                Event::Quit
            }
            None => Event::Quit,
        }
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}
