//! Modal notice for the outcome of a check.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::controller::CheckOutcome;

/// Renders `outcome` in a centered dialog on top of `area`.
pub fn render(frame: &mut Frame, area: Rect, outcome: &CheckOutcome) {
    let (title, color) = if outcome.is_success() {
        (" Submitted ", Color::Green)
    } else {
        (" Error ", Color::Red)
    };

    let dialog = centered(area, 50, 7);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let text = vec![
        Line::from(outcome.message()),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter/Esc to dismiss",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    frame.render_widget(Clear, dialog);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        dialog,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [dialog] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    dialog
}
