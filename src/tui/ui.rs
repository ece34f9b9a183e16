//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::app::App;
use super::components::{banner, price_table, status_bar};

/// Renders the entire view from the current state.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner::HEIGHT), // Banner
            Constraint::Min(3),                 // Price table
            Constraint::Length(1),              // Status bar
        ])
        .split(frame.area());

    banner::render(frame, layout[0]);
    price_table::render(frame, layout[1], app);
    status_bar::render(frame, layout[2], app);
}
