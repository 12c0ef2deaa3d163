//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, ConnectionStatus};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let status_color = match app.connection_status {
        ConnectionStatus::Connected => Color::Green,
        ConnectionStatus::Connecting => Color::Yellow,
        ConnectionStatus::Failed(_) => Color::Red,
    };

    let network_span = Span::styled(
        format!(" {} ", app.environment.label()),
        Style::default().fg(Color::Cyan),
    );

    // A connect failure is permanent, so it outranks transient errors.
    let error_span = match (&app.connection_status, &app.error_message) {
        (ConnectionStatus::Failed(reason), _) => Span::styled(
            format!(" {reason} "),
            Style::default().fg(Color::Red),
        ),
        (_, Some(error)) => Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        ),
        _ => Span::raw(""),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.connection_status.label()),
            Style::default().fg(status_color),
        ),
        Span::raw("│"),
        network_span,
        Span::raw("│"),
        error_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
