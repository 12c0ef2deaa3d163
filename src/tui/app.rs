//! Application state for the TUI.

use std::time::{Duration, Instant};

use crate::config::Environment;
use crate::controller::{CheckOutcome, ViewState};

/// How long a transient error stays in the status bar.
const ERROR_DISPLAY_TIME: Duration = Duration::from_secs(5);

/// Central application state container.
///
/// Holds the last [`ViewState`] published by the controller plus whatever
/// is purely presentational.
pub struct App {
    /// Network this build talks to.
    pub environment: Environment,
    /// Latest state published by the controller.
    pub view: ViewState,
    /// Session handle status.
    pub connection_status: ConnectionStatus,
    /// Outcome of the last check, shown as a modal until dismissed.
    pub notice: Option<CheckOutcome>,
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App instance with default state.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            view: ViewState::default(),
            connection_status: ConnectionStatus::Connecting,
            notice: None,
            error_message: None,
            should_quit: false,
        }
    }

    /// Whether a session exists.
    pub fn is_connected(&self) -> bool {
        self.connection_status == ConnectionStatus::Connected
    }

    /// Whether the check button is enabled.
    pub fn can_run_check(&self) -> bool {
        self.is_connected() && !self.view.is_busy()
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than five seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > ERROR_DISPLAY_TIME
        {
            self.error_message = None;
        }
    }
}

/// Session handle status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    /// `connect` failed; nothing can be fetched for the rest of the session.
    Failed(String),
}

impl ConnectionStatus {
    /// Returns a display string for the status.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Online",
            ConnectionStatus::Failed(_) => "Offline",
        }
    }
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    /// The error message.
    pub message: String,
    /// When the error was shown.
    pub timestamp: Instant,
}
