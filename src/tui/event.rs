//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::controller::{CheckOutcome, Command, ViewState};

use super::app::{App, ConnectionStatus};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// New state published by the controller.
    View(ViewState),
    /// A triggered check finished.
    Outcome(CheckOutcome),
    /// A refresh failed; displayed values were kept.
    RefreshFailed(String),

    /// Session established.
    Connected,
    /// Session could not be established.
    ConnectFailed(String),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
///
/// Returns the command to forward to the controller, if any.
pub fn update(app: &mut App, message: Message) -> Option<Command> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::View(view) => {
            app.view = view;
            None
        }
        Message::Outcome(outcome) => {
            app.notice = Some(outcome);
            None
        }
        Message::RefreshFailed(error) => {
            app.show_error(format!("refresh failed: {error}"));
            None
        }
        Message::Connected => {
            app.connection_status = ConnectionStatus::Connected;
            None
        }
        Message::ConnectFailed(error) => {
            app.connection_status = ConnectionStatus::Failed(error);
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Command> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Key(_) | Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_errors();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    // An open notice swallows every key until dismissed.
    if app.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.notice = None;
        }
        return None;
    }

    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => {
            app.should_quit = true;
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.can_run_check().then_some(Command::RunCheck),
        KeyCode::Char('r') => {
            app.is_connected().then_some(Command::Refresh)
        }
        _ => None,
    }
}
