use std::sync::Arc;

use tokio::sync::mpsc;
use topup_monitor::MonitorError;
use topup_monitor::config::fetch_config;
use topup_monitor::controller::{Command, ViewController};
use topup_monitor::credentials::load_identity;
use topup_monitor::logging;
use topup_monitor::session::{Session, connect};
use topup_monitor::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use topup_monitor::tui::{App, Message, Tui, render, restore_terminal, setup_terminal};
use tracing::info;

/// Interval between UI ticks (clears stale status messages).
const TICK_INTERVAL_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<(), MonitorError> {
    logging::init(&logging::log_path())?;

    let app_config = fetch_config()?;
    let identity = load_identity()?;
    let service_config = app_config.service.clone();
    info!(
        network = service_config.environment.label(),
        canister = %service_config.canister_id,
        "starting"
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<Command>();

    let controller = ViewController::<Session>::new(tx.clone());
    let session = async move { connect(&service_config, identity).await.map(Arc::new) };
    tokio::spawn(controller.run(session, cmd_rx));

    let mut terminal = setup_terminal()?;
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx, TICK_INTERVAL_MS);

    let mut app = App::new(app_config.service.environment);
    let result = run_app(&mut terminal, &mut app, &mut rx, &cmd_tx).await;

    restore_terminal(&mut terminal)?;
    result
}

/// Draws and dispatches messages until the user quits.
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Message>,
    commands: &mpsc::UnboundedSender<Command>,
) -> Result<(), MonitorError> {
    while !app.should_quit {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| MonitorError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(command) = update(app, message) {
            // The controller stops for good after a failed connect.
            let _ = commands.send(command);
        }
    }
    Ok(())
}
