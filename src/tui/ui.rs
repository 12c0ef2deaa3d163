//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::App;
use super::components::{notice, status_bar};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Status bar
            Constraint::Length(4), // Balance and schedule
            Constraint::Length(3), // Check button
            Constraint::Min(0),
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    render_title(frame, main_layout[0]);
    status_bar::render(frame, main_layout[1], app);
    render_overview(frame, main_layout[2], app);
    render_button(frame, main_layout[3], app);
    render_keybindings(frame, main_layout[5]);

    if let Some(outcome) = &app.notice {
        notice::render(frame, area, outcome);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        " ICP Top-up Scheduler ",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, area);
}

/// Renders the last recorded balance and the next check time.
fn render_overview(frame: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let text = vec![
        Line::from(vec![
            Span::styled("Last recorded balance: ", label),
            Span::styled(app.view.balance_label(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Next automatic check: ", label),
            Span::raw(app.view.next_check_label()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_button(frame: &mut Frame, area: Rect, app: &App) {
    let caption = if app.view.is_busy() {
        "Submitting…"
    } else {
        "Run check & top-up now"
    };

    let style = if app.can_run_check() {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let button = Paragraph::new(Line::from(Span::styled(format!(" {caption} "), style)))
        .block(block);
    frame.render_widget(button, area);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        " Enter: run check   r: refresh   q: quit ",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
