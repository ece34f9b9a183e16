//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::App;

const HELP: &str = " q quit ";

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!(" {}/{} ", app.asset, app.fiat),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("│"),
        Span::raw(format!(" alert > {}% ", app.trigger)),
        Span::raw("│"),
        Span::raw(format!(" every {}s ", app.interval.as_secs())),
        Span::raw("│"),
        Span::raw(format!(" samples {} ", app.samples)),
        Span::raw("│"),
        Span::styled(
            format!(" alerts {} ", app.alerts),
            Style::default().fg(if app.alerts > 0 {
                Color::Yellow
            } else {
                Color::White
            }),
        ),
        Span::raw("│"),
    ];

    if let Some(ref message) = app.status {
        spans.push(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        ));
    }

    let used: usize = spans.iter().map(|s| s.width()).sum();
    let pad = (area.width as usize).saturating_sub(used + HELP.len());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(HELP, Style::default().fg(Color::Black).bg(Color::Cyan)));

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
