//! Banner panel.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
};

const TITLE_ART: [&str; 5] = [
    r" _________    _    ____  _   _      _    _     _____ ____ _____ ",
    r"|__  / ___|  / \  / ___|| | | |    / \  | |   | ____|  _ \_   _|",
    r"  / / |     / _ \ \___ \| |_| |   / _ \ | |   |  _| | |_) || |  ",
    r" / /| |___ / ___ \ ___) |  _  |  / ___ \| |___| |___|  _ < | |  ",
    r"/____\____/_/   \_\____/|_| |_| /_/   \_\_____|_____|_| \_\|_|  ",
];

const SUBTITLE: &str = "G E N E R A T I O N A L   W E A L T H";

/// Rows the banner occupies, borders included.
pub const HEIGHT: u16 = TITLE_ART.len() as u16 + 4;

/// Renders the banner.
pub fn render(frame: &mut Frame, area: Rect) {
    let style = Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = TITLE_ART.iter().map(|row| Line::from(*row)).collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(SUBTITLE));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let para = Paragraph::new(Text::from(lines))
        .style(style)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(para, area);
}
