//! Terminal user interface for the top-up monitor.
//!
//! Provides a Ratatui-based page showing the last recorded balance and the
//! next scheduled check, with one action to run the check immediately.

pub mod app;
pub mod components;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
