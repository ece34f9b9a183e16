//! Table of recent samples.

use std::cmp::Ordering;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table},
};
use rust_decimal::Decimal;

use crate::models::Observation;
use crate::tui::app::App;

/// Renders the price table, oldest sample at the top.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(vec![
        Cell::from("Asset"),
        Cell::from(format!("Previous Value ({})", app.fiat)),
        Cell::from(format!("New Value ({})", app.fiat)),
        Cell::from("Last Updated"),
        Cell::from(Line::from("Percentage (%)").alignment(Alignment::Right)),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app.rows.iter().map(observation_row).collect();

    let widths = [
        Constraint::Percentage(12),
        Constraint::Percentage(24),
        Constraint::Percentage(24),
        Constraint::Percentage(18),
        Constraint::Percentage(22),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(table, area);
}

fn observation_row(obs: &Observation) -> Row<'static> {
    let percent = Line::from(format_percent(obs.percent))
        .style(percent_style(obs.percent))
        .alignment(Alignment::Right);

    Row::new(vec![
        Cell::from(obs.asset.clone()).style(Style::default().fg(Color::Cyan)),
        Cell::from(format_price(obs.previous)),
        Cell::from(format_price(obs.price)),
        Cell::from(obs.timestamp.format("%H:%M:%S").to_string()),
        Cell::from(percent),
    ])
}

/// Two decimals with `,` between thousands, e.g. `12,345.68`.
pub fn format_price(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Three decimals with an explicit `+` on rises, e.g. `+0.125`.
pub fn format_percent(percent: Decimal) -> String {
    let magnitude = format!("{:.3}", percent.abs().round_dp(3));
    match percent.cmp(&Decimal::ZERO) {
        Ordering::Greater => format!("+{magnitude}"),
        Ordering::Less => format!("-{magnitude}"),
        Ordering::Equal => magnitude,
    }
}

/// Green for rises, red otherwise.
fn percent_style(percent: Decimal) -> Style {
    if percent > Decimal::ZERO {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}
